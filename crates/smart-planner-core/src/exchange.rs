//! JSON export/import and CSV export of the planner state.
//!
//! JSON carries the full snapshot and round-trips exactly. CSV is a
//! projection of tasks only, for spreadsheets.

use log::info;
use serde_json::Value;

use crate::error::{ImportError, Result};
use crate::store::Snapshot;
use crate::task::Task;

pub const CSV_HEADER: [&str; 7] = ["id", "title", "topic", "priority", "due", "category", "completed"];

/// Pretty-printed JSON of the whole snapshot.
pub fn export_json(snapshot: &Snapshot) -> Result<String> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

/// Parse and validate an import payload.
///
/// The payload must be a JSON object with a non-null `tasks` field. The
/// returned snapshot already satisfies the store invariants.
pub fn import_json(payload: &str) -> std::result::Result<Snapshot, ImportError> {
    let value: Value = serde_json::from_str(payload)?;
    let object = value.as_object().ok_or(ImportError::NotAnObject)?;
    match object.get("tasks") {
        None | Some(Value::Null) => return Err(ImportError::MissingTasks),
        Some(_) => {}
    }
    let snapshot: Snapshot = serde_json::from_value(value)?;
    let snapshot = snapshot.validated()?;
    info!(
        "event=import_parsed module=exchange tasks={} note_lists={}",
        snapshot.tasks.len(),
        snapshot.notes.len()
    );
    Ok(snapshot)
}

/// CSV of tasks with the `CSV_HEADER` columns, rows joined by `\n`.
///
/// Title and topic are always quoted. Category is quoted only when it
/// needs to be.
pub fn export_csv(tasks: &[Task]) -> String {
    let mut lines = Vec::with_capacity(tasks.len() + 1);
    lines.push(CSV_HEADER.join(","));
    for task in tasks {
        let due = task.due.map(|d| d.format("%Y-%m-%d").to_string()).unwrap_or_default();
        let row = [
            task.id.clone(),
            quote(&task.title),
            quote(&task.topic),
            task.priority.to_string(),
            due,
            quote_if_needed(&task.category),
            task.completed.to_string(),
        ];
        lines.push(row.join(","));
    }
    lines.join("\n")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn quote_if_needed(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        quote(field)
    } else {
        field.to_string()
    }
}
