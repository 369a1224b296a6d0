//! Core error types for smart-planner-core.
//!
//! This module defines the error hierarchy using thiserror. Store lookups
//! that miss are reported as [`StoreError`] and never change state; import
//! rejections are [`ImportError`] and leave the store untouched.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for smart-planner-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Task/note lookup errors
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Rejected import
    #[error("Import rejected: {0}")]
    Import(#[from] ImportError),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A mutation or lookup referenced something that does not exist.
///
/// These are soft failures: the store is left exactly as it was.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("note not found: {note_id} (task {task_id})")]
    NoteNotFound { task_id: String, note_id: String },
}

/// Structural problems found while importing a snapshot.
#[derive(Error, Debug)]
pub enum ImportError {
    /// Payload is not valid JSON or does not match the data model
    #[error("invalid snapshot: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Top level is not a JSON object
    #[error("snapshot must be a JSON object")]
    NotAnObject,

    /// `tasks` missing or null
    #[error("snapshot has no `tasks` field")]
    MissingTasks,

    #[error("duplicate task id: {0}")]
    DuplicateTaskId(String),

    #[error("duplicate note id: {0}")]
    DuplicateNoteId(String),
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
