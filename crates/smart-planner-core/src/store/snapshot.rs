//! Serializable store state.

use log::warn;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

use crate::error::ImportError;
use crate::task::{Note, Task};

/// Complete state of the store at one instant.
///
/// The JSON shape is `{ "tasks": [...], "notes": { taskId: [...] },
/// "selectedTaskId": id | null }`, shared by persistence and export.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub notes: BTreeMap<String, Vec<Note>>,
    #[serde(default)]
    pub selected_task_id: Option<String>,
}

impl Snapshot {
    /// Enforce the store invariants on externally supplied state.
    ///
    /// Duplicate task or note ids are rejected. Blank titles and categories
    /// get their defaults. Note lists of unknown tasks are dropped, every
    /// task gets a note list, and a selection pointing at a missing task is
    /// cleared.
    pub fn validated(mut self) -> Result<Self, ImportError> {
        for task in &mut self.tasks {
            task.normalize_blanks();
        }

        let mut task_ids = HashSet::with_capacity(self.tasks.len());
        for task in &self.tasks {
            if !task_ids.insert(task.id.as_str()) {
                return Err(ImportError::DuplicateTaskId(task.id.clone()));
            }
        }

        let orphaned: Vec<String> = self
            .notes
            .keys()
            .filter(|id| !task_ids.contains(id.as_str()))
            .cloned()
            .collect();
        for id in orphaned {
            let dropped = self.notes.remove(&id).map(|n| n.len()).unwrap_or(0);
            warn!("event=snapshot_prune module=store task_id={id} notes_dropped={dropped}");
        }

        let mut note_ids = HashSet::new();
        for note in self.notes.values().flatten() {
            if !note_ids.insert(note.id.as_str()) {
                return Err(ImportError::DuplicateNoteId(note.id.clone()));
            }
        }

        for task in &self.tasks {
            self.notes.entry(task.id.clone()).or_default();
        }

        let dangling = self
            .selected_task_id
            .as_deref()
            .is_some_and(|id| !task_ids.contains(id));
        if dangling {
            if let Some(selected) = self.selected_task_id.take() {
                warn!("event=snapshot_selection_cleared module=store task_id={selected}");
            }
        }

        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::{Priority, TaskDraft};

    fn task(id: &str) -> Task {
        Task {
            id: id.into(),
            ..Task::from_draft(TaskDraft::default())
        }
    }

    fn note(id: &str) -> Note {
        Note {
            id: id.into(),
            html: "<p>x</p>".into(),
            created: 1,
        }
    }

    #[test]
    fn json_shape_uses_camel_case_selection() {
        let snap = Snapshot {
            tasks: vec![task("t-1")],
            notes: BTreeMap::from([("t-1".to_string(), vec![note("n-1")])]),
            selected_task_id: Some("t-1".into()),
        };
        let json = serde_json::to_value(&snap).unwrap();
        assert_eq!(json["selectedTaskId"], "t-1");
        assert_eq!(json["notes"]["t-1"][0]["id"], "n-1");
        assert_eq!(json["tasks"][0]["priority"], "medium");
    }

    #[test]
    fn validation_prunes_orphans_and_clears_dangling_selection() {
        let snap = Snapshot {
            tasks: vec![task("t-1")],
            notes: BTreeMap::from([("t-ghost".to_string(), vec![note("n-1")])]),
            selected_task_id: Some("t-ghost".into()),
        }
        .validated()
        .unwrap();

        assert!(!snap.notes.contains_key("t-ghost"));
        assert_eq!(snap.notes.get("t-1"), Some(&Vec::new()));
        assert_eq!(snap.selected_task_id, None);
    }

    #[test]
    fn validation_fills_blank_title_and_category() {
        let mut t = task("t-1");
        t.title = "   ".into();
        t.category = String::new();
        let snap = Snapshot {
            tasks: vec![t],
            ..Default::default()
        }
        .validated()
        .unwrap();

        assert_eq!(snap.tasks[0].title, "Untitled");
        assert_eq!(snap.tasks[0].category, "general");
    }

    #[test]
    fn validation_rejects_duplicate_ids() {
        let dup_tasks = Snapshot {
            tasks: vec![task("t-1"), task("t-1")],
            ..Default::default()
        };
        assert!(matches!(
            dup_tasks.validated(),
            Err(ImportError::DuplicateTaskId(id)) if id == "t-1"
        ));

        let mut t2 = task("t-2");
        t2.priority = Priority::High;
        let dup_notes = Snapshot {
            tasks: vec![task("t-1"), t2],
            notes: BTreeMap::from([
                ("t-1".to_string(), vec![note("n-1")]),
                ("t-2".to_string(), vec![note("n-1")]),
            ]),
            selected_task_id: None,
        };
        assert!(matches!(
            dup_notes.validated(),
            Err(ImportError::DuplicateNoteId(id)) if id == "n-1"
        ));
    }
}
