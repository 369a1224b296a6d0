//! In-memory task store.
//!
//! Owns every task and note plus the current selection. All mutation goes
//! through [`TaskStore`]; each successful change queues a [`StoreEvent`]
//! that the owner drains with [`TaskStore::take_events`] to decide when to
//! persist or re-render. Lookups that miss return [`StoreError`] and leave
//! the state untouched.

mod snapshot;

pub use snapshot::Snapshot;

use chrono::{Duration, NaiveDate};
use log::debug;
use std::collections::BTreeMap;

use crate::error::{ImportError, StoreError};
use crate::events::StoreEvent;
use crate::task::{Note, Priority, Task, TaskDraft, TaskPatch};

#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
    notes: BTreeMap<String, Vec<Note>>,
    selected_task_id: Option<String>,
    pending: Vec<StoreEvent>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a snapshot after enforcing its invariants.
    pub fn from_snapshot(snapshot: Snapshot) -> Result<Self, ImportError> {
        let snapshot = snapshot.validated()?;
        Ok(Self {
            tasks: snapshot.tasks,
            notes: snapshot.notes,
            selected_task_id: snapshot.selected_task_id,
            pending: Vec::new(),
        })
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            tasks: self.tasks.clone(),
            notes: self.notes.clone(),
            selected_task_id: self.selected_task_id.clone(),
        }
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Notes of a task, oldest first. Empty for unknown ids.
    pub fn notes(&self, task_id: &str) -> &[Note] {
        self.notes.get(task_id).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn latest_note(&self, task_id: &str) -> Option<&Note> {
        self.notes(task_id).last()
    }

    pub fn note_map(&self) -> &BTreeMap<String, Vec<Note>> {
        &self.notes
    }

    pub fn selected_task_id(&self) -> Option<&str> {
        self.selected_task_id.as_deref()
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.selected_task_id().and_then(|id| self.task(id))
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Drain the events queued since the last call.
    pub fn take_events(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.pending)
    }

    pub fn create_task(&mut self, draft: TaskDraft) -> String {
        let task = Task::from_draft(draft);
        let id = task.id.clone();
        debug!("event=task_create module=store task_id={id}");
        self.tasks.push(task);
        self.notes.entry(id.clone()).or_default();
        self.emit(StoreEvent::TaskCreated { task_id: id.clone() });
        id
    }

    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> Result<(), StoreError> {
        let task = self.task_mut(id)?;
        patch.apply(task);
        debug!("event=task_update module=store task_id={id}");
        self.emit(StoreEvent::TaskUpdated { task_id: id.to_string() });
        Ok(())
    }

    /// Remove a task and all of its notes.
    pub fn delete_task(&mut self, id: &str) -> Result<(), StoreError> {
        let pos = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| StoreError::TaskNotFound(id.to_string()))?;
        self.tasks.remove(pos);
        let notes_removed = self.notes.remove(id).map(|n| n.len()).unwrap_or(0);
        let selection_cleared = self.selected_task_id.as_deref() == Some(id);
        if selection_cleared {
            self.selected_task_id = None;
        }
        debug!("event=task_delete module=store task_id={id} notes_removed={notes_removed}");
        self.emit(StoreEvent::TaskDeleted {
            task_id: id.to_string(),
            notes_removed,
            selection_cleared,
        });
        Ok(())
    }

    /// Select a task, or clear the selection with `None`.
    pub fn select_task(&mut self, id: Option<&str>) -> Result<(), StoreError> {
        if let Some(id) = id {
            self.task_mut(id)?;
        }
        let next = id.map(str::to_string);
        if next != self.selected_task_id {
            self.selected_task_id = next.clone();
            self.emit(StoreEvent::SelectionChanged { task_id: next });
        }
        Ok(())
    }

    /// Append a note. Unknown tasks are rejected so no orphaned list is created.
    pub fn add_note(&mut self, task_id: &str, html: impl Into<String>) -> Result<String, StoreError> {
        self.task_mut(task_id)?;
        let note = Note::new(html);
        let note_id = note.id.clone();
        self.notes.entry(task_id.to_string()).or_default().push(note);
        debug!("event=note_add module=store task_id={task_id} note_id={note_id}");
        self.emit(StoreEvent::NoteAdded {
            task_id: task_id.to_string(),
            note_id: note_id.clone(),
        });
        Ok(note_id)
    }

    pub fn update_note(
        &mut self,
        task_id: &str,
        note_id: &str,
        html: impl Into<String>,
    ) -> Result<(), StoreError> {
        let note = self
            .notes
            .get_mut(task_id)
            .and_then(|list| list.iter_mut().find(|n| n.id == note_id))
            .ok_or_else(|| not_found(task_id, note_id))?;
        note.html = html.into();
        self.emit(StoreEvent::NoteUpdated {
            task_id: task_id.to_string(),
            note_id: note_id.to_string(),
        });
        Ok(())
    }

    pub fn delete_note(&mut self, task_id: &str, note_id: &str) -> Result<(), StoreError> {
        let list = self
            .notes
            .get_mut(task_id)
            .ok_or_else(|| not_found(task_id, note_id))?;
        let pos = list
            .iter()
            .position(|n| n.id == note_id)
            .ok_or_else(|| not_found(task_id, note_id))?;
        list.remove(pos);
        debug!("event=note_delete module=store task_id={task_id} note_id={note_id}");
        self.emit(StoreEvent::NoteDeleted {
            task_id: task_id.to_string(),
            note_id: note_id.to_string(),
        });
        Ok(())
    }

    /// Replace the entire state. On error the store is unchanged.
    pub fn replace_snapshot(&mut self, snapshot: Snapshot) -> Result<(), ImportError> {
        let snapshot = snapshot.validated()?;
        let task_count = snapshot.tasks.len();
        self.tasks = snapshot.tasks;
        self.notes = snapshot.notes;
        self.selected_task_id = snapshot.selected_task_id;
        self.emit(StoreEvent::SnapshotReplaced { task_count });
        Ok(())
    }

    /// Insert demo tasks when the store has none. Returns whether it seeded.
    pub fn seed_if_empty(&mut self, today: NaiveDate) -> bool {
        if !self.tasks.is_empty() {
            return false;
        }
        let demo = [
            ("Math — Integration assignment", "Calculus", Priority::High, 2, "Math"),
            ("Read Chapter 4 — Database", "DB", Priority::Medium, 4, "CS"),
            ("Write journalism piece", "Interview", Priority::Low, 7, "Journalism"),
        ];
        let queued = self.pending.len();
        let mut first = None;
        for (title, topic, priority, in_days, category) in demo {
            let id = self.create_task(TaskDraft {
                title: Some(title.into()),
                topic: Some(topic.into()),
                priority: Some(priority),
                due: Some(today + Duration::days(in_days)),
                category: Some(category.into()),
            });
            first.get_or_insert(id);
        }
        if let Some(first) = first {
            self.notes
                .entry(first)
                .or_default()
                .push(Note::new("<p>Focus on substitution method. Practice 3 problems.</p>"));
        }
        self.pending.truncate(queued);
        self.emit(StoreEvent::Seeded { task_count: self.tasks.len() });
        true
    }

    fn task_mut(&mut self, id: &str) -> Result<&mut Task, StoreError> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| StoreError::TaskNotFound(id.to_string()))
    }

    fn emit(&mut self, event: StoreEvent) {
        self.pending.push(event);
    }
}

fn not_found(task_id: &str, note_id: &str) -> StoreError {
    StoreError::NoteNotFound {
        task_id: task_id.to_string(),
        note_id: note_id.to_string(),
    }
}
