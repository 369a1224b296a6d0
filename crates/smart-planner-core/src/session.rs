//! Planner session: a store bound to a persistence backend.
//!
//! After every successful mutation the session writes the full snapshot to
//! the backend, then hands the store's events to each registered listener.
//! Failed lookups change nothing, so nothing is written.

use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info};
use std::path::Path;

use crate::error::Result;
use crate::events::StoreEvent;
use crate::exchange;
use crate::plan::{suggest_daily_plan, PlanConfig, PlanEntry};
use crate::risk::{classify, RiskAssessment};
use crate::storage::SnapshotBackend;
use crate::store::TaskStore;
use crate::task::{TaskDraft, TaskPatch};

type Listener = Box<dyn FnMut(&StoreEvent)>;

pub struct PlannerSession<B: SnapshotBackend> {
    store: TaskStore,
    backend: B,
    listeners: Vec<Listener>,
}

impl<B: SnapshotBackend> PlannerSession<B> {
    /// Load the persisted state; unreadable state starts an empty store.
    pub fn open(backend: B) -> Self {
        let store = backend.load_store();
        debug!(
            "event=session_open module=session tasks={}",
            store.tasks().len()
        );
        Self {
            store,
            backend,
            listeners: Vec::new(),
        }
    }

    /// Read-only view of the current state.
    pub fn store(&self) -> &TaskStore {
        &self.store
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Register a change listener, called after each persisted mutation.
    pub fn subscribe(&mut self, listener: impl FnMut(&StoreEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn create_task(&mut self, draft: TaskDraft) -> Result<String> {
        let id = self.store.create_task(draft);
        self.commit()?;
        Ok(id)
    }

    pub fn update_task(&mut self, id: &str, patch: TaskPatch) -> Result<()> {
        self.store.update_task(id, patch)?;
        self.commit()
    }

    pub fn delete_task(&mut self, id: &str) -> Result<()> {
        self.store.delete_task(id)?;
        self.commit()
    }

    pub fn select_task(&mut self, id: Option<&str>) -> Result<()> {
        self.store.select_task(id)?;
        self.commit()
    }

    pub fn add_note(&mut self, task_id: &str, html: impl Into<String>) -> Result<String> {
        let note_id = self.store.add_note(task_id, html)?;
        self.commit()?;
        Ok(note_id)
    }

    pub fn update_note(&mut self, task_id: &str, note_id: &str, html: impl Into<String>) -> Result<()> {
        self.store.update_note(task_id, note_id, html)?;
        self.commit()
    }

    pub fn delete_note(&mut self, task_id: &str, note_id: &str) -> Result<()> {
        self.store.delete_note(task_id, note_id)?;
        self.commit()
    }

    /// Replace all state with an imported JSON snapshot.
    ///
    /// A rejected payload leaves the store and the backend untouched.
    pub fn import_json(&mut self, payload: &str) -> Result<usize> {
        let snapshot = exchange::import_json(payload)?;
        let count = snapshot.tasks.len();
        self.store.replace_snapshot(snapshot)?;
        self.commit()?;
        info!("event=import_applied module=session tasks={count}");
        Ok(count)
    }

    /// Read an exported snapshot file and import it.
    pub fn import_file(&mut self, path: &Path) -> Result<usize> {
        let payload = std::fs::read_to_string(path)?;
        self.import_json(&payload)
    }

    pub fn export_json(&self) -> Result<String> {
        exchange::export_json(&self.store.snapshot())
    }

    pub fn export_csv(&self) -> String {
        exchange::export_csv(self.store.tasks())
    }

    pub fn seed_if_empty(&mut self, today: NaiveDate) -> Result<bool> {
        let seeded = self.store.seed_if_empty(today);
        self.commit()?;
        Ok(seeded)
    }

    pub fn daily_plan(&self, now: NaiveDateTime, config: &PlanConfig) -> Vec<PlanEntry> {
        suggest_daily_plan(self.store.tasks(), now, config)
    }

    /// Risk of one task, `None` for unknown ids.
    pub fn risk(&self, task_id: &str, now: NaiveDateTime) -> Option<RiskAssessment> {
        self.store.task(task_id).map(|t| classify(t, now))
    }

    fn commit(&mut self) -> Result<()> {
        let events = self.store.take_events();
        if events.is_empty() {
            return Ok(());
        }
        self.backend.save(&self.store.snapshot())?;
        for event in &events {
            debug!(
                "event=store_change module=session task_id={}",
                event.task_id().unwrap_or("-")
            );
            for listener in &mut self.listeners {
                listener(event);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::storage::MemoryBackend;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn every_mutation_is_persisted() {
        let mut session = PlannerSession::open(MemoryBackend::new());
        let id = session.create_task(TaskDraft::titled("Essay")).unwrap();
        assert_eq!(session.backend().writes(), 1);

        let note = session.add_note(&id, "<p>outline</p>").unwrap();
        session.update_note(&id, &note, "<p>draft</p>").unwrap();
        session.update_task(&id, TaskPatch::completed(true)).unwrap();
        session.select_task(Some(&id)).unwrap();
        assert_eq!(session.backend().writes(), 5);

        let reopened = PlannerSession::open(session.into_backend());
        let store = reopened.store();
        assert!(store.task(&id).unwrap().completed);
        assert_eq!(store.notes(&id)[0].html, "<p>draft</p>");
        assert_eq!(store.selected_task_id(), Some(id.as_str()));
    }

    #[test]
    fn not_found_writes_nothing() {
        let mut session = PlannerSession::open(MemoryBackend::new());
        let err = session.delete_task("t-none").unwrap_err();
        assert!(matches!(err, CoreError::Store(_)));
        assert!(session.add_note("t-none", "x").is_err());
        assert_eq!(session.backend().writes(), 0);
    }

    #[test]
    fn listeners_see_events_after_save() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut session = PlannerSession::open(MemoryBackend::new());
        let sink = Rc::clone(&seen);
        session.subscribe(move |e| sink.borrow_mut().push(e.clone()));

        let id = session.create_task(TaskDraft::default()).unwrap();
        session.delete_task(&id).unwrap();

        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0], StoreEvent::TaskCreated { task_id: id.clone() });
        assert!(matches!(&seen[1], StoreEvent::TaskDeleted { task_id, .. } if *task_id == id));
    }

    #[test]
    fn rejected_import_keeps_state() {
        let mut session = PlannerSession::open(MemoryBackend::new());
        session.create_task(TaskDraft::titled("Keep")).unwrap();
        let before = session.store().snapshot();

        assert!(matches!(
            session.import_json(r#"{"notes":{}}"#),
            Err(CoreError::Import(_))
        ));
        assert_eq!(session.store().snapshot(), before);
        assert_eq!(session.backend().writes(), 1);
    }

    #[test]
    fn import_replaces_everything() {
        let mut session = PlannerSession::open(MemoryBackend::new());
        session.create_task(TaskDraft::titled("Old")).unwrap();
        let payload = r#"{
            "tasks": [{"id":"t-x","title":"New","topic":"","priority":"low",
                       "due":null,"category":"general","completed":false,"created":1}],
            "notes": {"t-x": [{"id":"n-x","html":"<p>hi</p>","created":2}]},
            "selectedTaskId": "t-x"
        }"#;
        assert_eq!(session.import_json(payload).unwrap(), 1);
        let store = session.store();
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].title, "New");
        assert_eq!(store.selected_task_id(), Some("t-x"));
        assert_eq!(session.backend().writes(), 2);
    }

    #[test]
    fn import_file_reads_export() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("export.json");
        let mut source = PlannerSession::open(MemoryBackend::new());
        source.create_task(TaskDraft::titled("Carried")).unwrap();
        std::fs::write(&path, source.export_json().unwrap()).unwrap();

        let mut target = PlannerSession::open(MemoryBackend::new());
        assert_eq!(target.import_file(&path).unwrap(), 1);
        assert_eq!(target.store().tasks()[0].title, "Carried");

        let missing = dir.path().join("missing.json");
        assert!(matches!(target.import_file(&missing), Err(CoreError::Io(_))));
        assert_eq!(target.backend().writes(), 1);
    }

    #[test]
    fn seed_persists_once() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();
        let mut session = PlannerSession::open(MemoryBackend::new());
        assert!(session.seed_if_empty(today).unwrap());
        assert!(!session.seed_if_empty(today).unwrap());
        assert_eq!(session.backend().writes(), 1);
        assert_eq!(session.store().tasks().len(), 3);
    }

    #[test]
    fn malformed_backend_opens_empty() {
        let session = PlannerSession::open(MemoryBackend::with_blob("{{{"));
        assert!(session.store().is_empty());
    }
}
