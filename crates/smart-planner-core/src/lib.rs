//! # Smart Planner Core Library
//!
//! Core logic for a single-user task and notes planner. Every operation is
//! available through the standalone CLI binary; a GUI would be a thin layer
//! over the same library.
//!
//! ## Architecture
//!
//! - **Task Store**: owned in-memory tasks, notes and selection, mutated
//!   only through [`TaskStore`], which queues a [`StoreEvent`] per change
//! - **Risk Classifier**: deadline pressure label per task ([`classify`])
//! - **Urgency Scorer**: priority weight over days left ([`scoring`])
//! - **Daily Plan**: proportional hour allocation ([`suggest_daily_plan`])
//! - **Storage**: SQLite key-value snapshot persistence and TOML configuration
//! - **Exchange**: JSON export/import and CSV export
//!
//! ## Key Components
//!
//! - [`PlannerSession`]: store + backend, persisting after each mutation
//! - [`Database`]: SQLite kv store implementing [`SnapshotBackend`]
//! - [`Config`]: application configuration management

pub mod error;
pub mod events;
pub mod exchange;
pub mod logging;
pub mod plan;
pub mod risk;
pub mod scoring;
pub mod session;
pub mod storage;
pub mod store;
pub mod task;
pub mod views;

pub use error::{ConfigError, CoreError, DatabaseError, ImportError, StoreError};
pub use events::StoreEvent;
pub use plan::{suggest_daily_plan, PlanConfig, PlanEntry};
pub use risk::{classify, RiskAssessment, RiskLabel, Severity};
pub use scoring::UrgencyScore;
pub use session::PlannerSession;
pub use storage::{Config, Database, MemoryBackend, SnapshotBackend};
pub use store::{Snapshot, TaskStore};
pub use task::{local_now, Note, Priority, Task, TaskDraft, TaskPatch};
