pub mod config;
pub mod exchange;
pub mod note;
pub mod plan;
pub mod task;
pub mod view;

use smart_planner_core::storage::data_dir;
use smart_planner_core::{Config, Database, PlannerSession};

pub type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Open the planner stored in the data directory.
pub fn open_session() -> Result<PlannerSession<Database>, Box<dyn std::error::Error>> {
    Ok(PlannerSession::open(Database::open()?))
}

/// Route core logs into `<data dir>/logs`. Failures only warn: logging is
/// never a reason to refuse a command.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        "debug".to_string()
    } else {
        Config::load().map(|c| c.logging.level).unwrap_or_else(|_| "info".into())
    };
    let dir = match data_dir() {
        Ok(dir) => dir.join("logs"),
        Err(e) => {
            eprintln!("warning: logging disabled: {e}");
            return;
        }
    };
    if let Err(e) = smart_planner_core::logging::init_logging(&level, &dir) {
        eprintln!("warning: logging disabled: {e}");
    }
}

/// Resolve an explicit task id or fall back to the selected task.
pub fn task_or_selected(
    session: &PlannerSession<Database>,
    id: Option<String>,
) -> Result<String, Box<dyn std::error::Error>> {
    id.or_else(|| session.store().selected_task_id().map(str::to_string))
        .ok_or_else(|| "no task id given and no task selected".into())
}
