mod backend;
mod config;
pub mod database;

pub use backend::{MemoryBackend, SnapshotBackend, STORE_KEY};
pub use config::{Config, LoggingConfig};
pub use database::Database;

use std::path::PathBuf;

use crate::error::ConfigError;

/// Returns the planner data directory, creating it if needed.
///
/// `SMART_PLANNER_HOME` overrides the location. Otherwise it is
/// `~/.config/smart-planner[-dev]/`, with `SMART_PLANNER_ENV=dev` selecting
/// the development directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, ConfigError> {
    let dir = match std::env::var_os("SMART_PLANNER_HOME") {
        Some(home) if !home.is_empty() => PathBuf::from(home),
        _ => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("SMART_PLANNER_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("smart-planner-dev")
            } else {
                base_dir.join("smart-planner")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| ConfigError::DataDir(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
