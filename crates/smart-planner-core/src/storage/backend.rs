//! Snapshot persistence backends.

use log::warn;

use super::Database;
use crate::error::Result;
use crate::store::{Snapshot, TaskStore};

/// Key under which the snapshot blob is stored.
pub const STORE_KEY: &str = "smart-planner-v1";

/// Opaque get/put of the serialized snapshot.
///
/// Implementors only move strings; the provided methods handle encoding.
pub trait SnapshotBackend {
    fn get(&self) -> Result<Option<String>>;

    fn put(&mut self, blob: &str) -> Result<()>;

    /// Serialize and store the whole snapshot.
    fn save(&mut self, snapshot: &Snapshot) -> Result<()> {
        let blob = serde_json::to_string(snapshot)?;
        self.put(&blob)
    }

    /// Load the persisted store, falling back to an empty one when nothing
    /// is stored or the stored blob is unreadable.
    fn load_store(&self) -> TaskStore {
        let blob = match self.get() {
            Ok(Some(blob)) => blob,
            Ok(None) => return TaskStore::new(),
            Err(e) => {
                warn!("event=store_load module=storage status=read_failed error={e}");
                return TaskStore::new();
            }
        };
        let snapshot = match serde_json::from_str::<Snapshot>(&blob) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("event=store_load module=storage status=malformed error={e}");
                return TaskStore::new();
            }
        };
        TaskStore::from_snapshot(snapshot).unwrap_or_else(|e| {
            warn!("event=store_load module=storage status=invalid error={e}");
            TaskStore::new()
        })
    }
}

impl SnapshotBackend for Database {
    fn get(&self) -> Result<Option<String>> {
        Ok(self.kv_get(STORE_KEY)?)
    }

    fn put(&mut self, blob: &str) -> Result<()> {
        Ok(self.kv_set(STORE_KEY, blob)?)
    }
}

/// In-process backend for tests and embedding.
#[derive(Debug, Default, Clone)]
pub struct MemoryBackend {
    blob: Option<String>,
    writes: usize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an existing blob, valid or not.
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            blob: Some(blob.into()),
            writes: 0,
        }
    }

    pub fn blob(&self) -> Option<&str> {
        self.blob.as_deref()
    }

    /// Number of `put` calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl SnapshotBackend for MemoryBackend {
    fn get(&self) -> Result<Option<String>> {
        Ok(self.blob.clone())
    }

    fn put(&mut self, blob: &str) -> Result<()> {
        self.blob = Some(blob.to_string());
        self.writes += 1;
        Ok(())
    }
}
