use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "smart-planner", version, about = "Smart Planner CLI")]
struct Cli {
    /// Log at debug level regardless of configuration
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Task management
    Task {
        #[command(subcommand)]
        action: commands::task::TaskAction,
    },
    /// Notes attached to tasks
    Note {
        #[command(subcommand)]
        action: commands::note::NoteAction,
    },
    /// Suggest a daily plan from pending tasks
    Plan(commands::plan::PlanArgs),
    /// Deadline risk of a task
    Risk {
        /// Task ID (defaults to the selected task)
        id: Option<String>,
    },
    /// Task counts and next due task
    Summary,
    /// Tasks due over the coming days
    Timeline {
        /// Number of days to show
        #[arg(long, default_value_t = smart_planner_core::views::DEFAULT_TIMELINE_DAYS)]
        days: u32,
    },
    /// Export tasks and notes
    Export {
        #[command(subcommand)]
        format: commands::exchange::ExportFormat,
    },
    /// Replace all data with an exported JSON file
    Import {
        /// Path to a JSON export
        file: std::path::PathBuf,
    },
    /// Add demo tasks when there are none
    Seed,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();
    commands::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Task { action } => commands::task::run(action),
        Commands::Note { action } => commands::note::run(action),
        Commands::Plan(args) => commands::plan::run(args),
        Commands::Risk { id } => commands::view::risk(id),
        Commands::Summary => commands::view::summary(),
        Commands::Timeline { days } => commands::view::timeline(days),
        Commands::Export { format } => commands::exchange::export(format),
        Commands::Import { file } => commands::exchange::import(&file),
        Commands::Seed => commands::exchange::seed(),
        Commands::Config { action } => commands::config::run(action),
    };

    if let Err(e) = result {
        log::error!("event=command_failed module=cli error={e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
