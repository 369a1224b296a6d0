use clap::Subcommand;
use std::path::{Path, PathBuf};

use smart_planner_core::local_now;

use super::{open_session, CliResult};

#[derive(Subcommand)]
pub enum ExportFormat {
    /// Full snapshot as JSON
    Json {
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Tasks as CSV
    Csv {
        /// Write to a file instead of stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

pub fn export(format: ExportFormat) -> CliResult {
    let session = open_session()?;
    let (content, output) = match format {
        ExportFormat::Json { output } => (session.export_json()?, output),
        ExportFormat::Csv { output } => (session.export_csv(), output),
    };
    match output {
        Some(path) => {
            std::fs::write(&path, content)?;
            println!("Exported to {}", path.display());
        }
        None => println!("{content}"),
    }
    Ok(())
}

pub fn import(file: &Path) -> CliResult {
    let mut session = open_session()?;
    let count = session.import_file(file)?;
    println!("Imported {count} tasks");
    Ok(())
}

pub fn seed() -> CliResult {
    let mut session = open_session()?;
    if session.seed_if_empty(local_now().date())? {
        println!("Seeded {} demo tasks", session.store().tasks().len());
    } else {
        println!("Planner already has tasks; nothing seeded");
    }
    Ok(())
}
