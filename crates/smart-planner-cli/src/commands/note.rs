use clap::Subcommand;

use super::{open_session, task_or_selected, CliResult};

#[derive(Subcommand)]
pub enum NoteAction {
    /// Append a note to a task
    Add {
        /// Note content (HTML is stored as-is)
        html: String,
        /// Task ID (defaults to the selected task)
        #[arg(long)]
        task: Option<String>,
    },
    /// List a task's notes, oldest first
    List {
        /// Task ID (defaults to the selected task)
        #[arg(long)]
        task: Option<String>,
    },
    /// Show the most recent note
    Latest {
        /// Task ID (defaults to the selected task)
        #[arg(long)]
        task: Option<String>,
    },
    /// Replace a note's content
    Update {
        /// Note ID
        note_id: String,
        /// New content
        html: String,
        /// Task ID (defaults to the selected task)
        #[arg(long)]
        task: Option<String>,
    },
    /// Delete a note (default: the most recent one)
    Delete {
        /// Note ID
        note_id: Option<String>,
        /// Task ID (defaults to the selected task)
        #[arg(long)]
        task: Option<String>,
    },
}

pub fn run(action: NoteAction) -> CliResult {
    let mut session = open_session()?;

    match action {
        NoteAction::Add { html, task } => {
            let task_id = task_or_selected(&session, task)?;
            let note_id = session.add_note(&task_id, html.trim())?;
            println!("Note saved: {note_id}");
        }
        NoteAction::List { task } => {
            let task_id = task_or_selected(&session, task)?;
            println!("{}", serde_json::to_string_pretty(session.store().notes(&task_id))?);
        }
        NoteAction::Latest { task } => {
            let task_id = task_or_selected(&session, task)?;
            match session.store().latest_note(&task_id) {
                Some(note) => println!("{}", serde_json::to_string_pretty(note)?),
                None => println!("No notes for task: {task_id}"),
            }
        }
        NoteAction::Update { note_id, html, task } => {
            let task_id = task_or_selected(&session, task)?;
            session.update_note(&task_id, &note_id, html)?;
            println!("Note updated: {note_id}");
        }
        NoteAction::Delete { note_id, task } => {
            let task_id = task_or_selected(&session, task)?;
            let note_id = match note_id {
                Some(id) => id,
                None => session
                    .store()
                    .latest_note(&task_id)
                    .map(|n| n.id.clone())
                    .ok_or("No note to delete")?,
            };
            session.delete_note(&task_id, &note_id)?;
            println!("Note deleted: {note_id}");
        }
    }
    Ok(())
}
