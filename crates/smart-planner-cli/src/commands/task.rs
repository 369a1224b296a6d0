//! Task management commands for CLI.

use chrono::NaiveDate;
use clap::Subcommand;
use serde_json::json;
use smart_planner_core::views::{visible_tasks, TaskFilter};
use smart_planner_core::{classify, local_now, Priority, TaskDraft, TaskPatch};

use super::{open_session, task_or_selected, CliResult};

#[derive(Subcommand)]
pub enum TaskAction {
    /// Create a new task
    Create {
        /// Task title (default: Untitled)
        title: Option<String>,
        /// Topic or subject
        #[arg(long)]
        topic: Option<String>,
        /// Priority: low, medium or high (default: medium)
        #[arg(long)]
        priority: Option<Priority>,
        /// Due date (YYYY-MM-DD)
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Category (default: general)
        #[arg(long)]
        category: Option<String>,
        /// Select the new task
        #[arg(long)]
        select: bool,
    },
    /// List tasks, pending first then by due date
    List {
        /// Filter by category
        #[arg(long)]
        category: Option<String>,
        /// Filter by priority
        #[arg(long)]
        priority: Option<Priority>,
        /// Filter by exact due date
        #[arg(long)]
        due: Option<NaiveDate>,
        /// Search title, topic and notes
        #[arg(long)]
        search: Option<String>,
    },
    /// Get task details with notes and risk
    Get {
        /// Task ID (defaults to the selected task)
        id: Option<String>,
    },
    /// Update a task
    Update {
        /// Task ID
        id: String,
        /// New title
        #[arg(long)]
        title: Option<String>,
        /// New topic
        #[arg(long)]
        topic: Option<String>,
        /// New priority
        #[arg(long)]
        priority: Option<Priority>,
        /// New due date (YYYY-MM-DD)
        #[arg(long, conflicts_with = "clear_due")]
        due: Option<NaiveDate>,
        /// Remove the due date
        #[arg(long)]
        clear_due: bool,
        /// New category
        #[arg(long)]
        category: Option<String>,
        /// Set completed status
        #[arg(long)]
        completed: Option<bool>,
    },
    /// Mark a task completed
    Complete {
        /// Task ID
        id: String,
    },
    /// Mark a task pending again
    Reopen {
        /// Task ID
        id: String,
    },
    /// Delete a task and its notes
    Delete {
        /// Task ID
        id: String,
    },
    /// Select a task for note commands
    Select {
        /// Task ID; omit with --clear to deselect
        #[arg(required_unless_present = "clear")]
        id: Option<String>,
        /// Clear the selection
        #[arg(long, conflicts_with = "id")]
        clear: bool,
    },
}

pub fn run(action: TaskAction) -> CliResult {
    let mut session = open_session()?;

    match action {
        TaskAction::Create {
            title,
            topic,
            priority,
            due,
            category,
            select,
        } => {
            let id = session.create_task(TaskDraft {
                title,
                topic,
                priority,
                due,
                category,
            })?;
            if select {
                session.select_task(Some(&id))?;
            }
            println!("Task created: {id}");
            if let Some(task) = session.store().task(&id) {
                println!("{}", serde_json::to_string_pretty(task)?);
            }
        }
        TaskAction::List {
            category,
            priority,
            due,
            search,
        } => {
            let filter = TaskFilter {
                category,
                priority,
                due,
                text: search,
            };
            let store = session.store();
            let tasks = visible_tasks(store.tasks(), store.note_map(), &filter);
            println!("{}", serde_json::to_string_pretty(&tasks)?);
        }
        TaskAction::Get { id } => {
            let id = task_or_selected(&session, id)?;
            let store = session.store();
            match store.task(&id) {
                Some(task) => {
                    let detail = json!({
                        "task": task,
                        "notes": store.notes(&id),
                        "risk": classify(task, local_now()),
                        "selected": store.selected_task_id() == Some(id.as_str()),
                    });
                    println!("{}", serde_json::to_string_pretty(&detail)?);
                }
                None => return Err(format!("Task not found: {id}").into()),
            }
        }
        TaskAction::Update {
            id,
            title,
            topic,
            priority,
            due,
            clear_due,
            category,
            completed,
        } => {
            let patch = TaskPatch {
                title,
                topic,
                priority,
                due: if clear_due { Some(None) } else { due.map(Some) },
                category,
                completed,
            };
            if patch.is_empty() {
                return Err("nothing to update".into());
            }
            session.update_task(&id, patch)?;
            println!("Task updated:");
            if let Some(task) = session.store().task(&id) {
                println!("{}", serde_json::to_string_pretty(task)?);
            }
        }
        TaskAction::Complete { id } => {
            session.update_task(&id, TaskPatch::completed(true))?;
            println!("Task completed: {id}");
        }
        TaskAction::Reopen { id } => {
            session.update_task(&id, TaskPatch::completed(false))?;
            println!("Task reopened: {id}");
        }
        TaskAction::Delete { id } => {
            session.delete_task(&id)?;
            println!("Task deleted: {id}");
        }
        TaskAction::Select { id, clear } => {
            if clear {
                session.select_task(None)?;
                println!("Selection cleared");
            } else {
                session.select_task(id.as_deref())?;
                println!("Task selected: {}", id.unwrap_or_default());
            }
        }
    }
    Ok(())
}
