use serde::{Deserialize, Serialize};

/// Every successful store mutation produces a StoreEvent.
/// Callers decide when to persist and re-render in response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum StoreEvent {
    TaskCreated {
        task_id: String,
    },
    TaskUpdated {
        task_id: String,
    },
    /// Task removed together with its notes.
    TaskDeleted {
        task_id: String,
        notes_removed: usize,
        selection_cleared: bool,
    },
    NoteAdded {
        task_id: String,
        note_id: String,
    },
    NoteUpdated {
        task_id: String,
        note_id: String,
    },
    NoteDeleted {
        task_id: String,
        note_id: String,
    },
    SelectionChanged {
        task_id: Option<String>,
    },
    /// Whole state replaced, e.g. by an import.
    SnapshotReplaced {
        task_count: usize,
    },
    /// Demo tasks inserted into an empty store.
    Seeded {
        task_count: usize,
    },
}

impl StoreEvent {
    /// Task the event concerns, if any.
    pub fn task_id(&self) -> Option<&str> {
        match self {
            StoreEvent::TaskCreated { task_id }
            | StoreEvent::TaskUpdated { task_id }
            | StoreEvent::TaskDeleted { task_id, .. }
            | StoreEvent::NoteAdded { task_id, .. }
            | StoreEvent::NoteUpdated { task_id, .. }
            | StoreEvent::NoteDeleted { task_id, .. } => Some(task_id),
            StoreEvent::SelectionChanged { task_id } => task_id.as_deref(),
            StoreEvent::SnapshotReplaced { .. } | StoreEvent::Seeded { .. } => None,
        }
    }
}
