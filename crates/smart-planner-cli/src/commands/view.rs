//! Read-only report commands.

use serde_json::json;
use smart_planner_core::{local_now, views};

use super::{open_session, task_or_selected, CliResult};

pub fn risk(id: Option<String>) -> CliResult {
    let session = open_session()?;
    let id = task_or_selected(&session, id)?;
    let risk = session
        .risk(&id, local_now())
        .ok_or_else(|| format!("Task not found: {id}"))?;
    let out = json!({
        "task_id": id,
        "label": risk.label.as_str(),
        "severity": risk.severity,
        "color": risk.severity.color(),
        "days_left": risk.days_left,
    });
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

pub fn summary() -> CliResult {
    let session = open_session()?;
    let summary = views::summary(session.store().tasks());
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

pub fn timeline(days: u32) -> CliResult {
    let session = open_session()?;
    let days = views::timeline(session.store().tasks(), local_now().date(), days);
    println!("{}", serde_json::to_string_pretty(&days)?);
    Ok(())
}
