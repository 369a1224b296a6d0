//! Read-only view-models for renderers.
//!
//! Everything here takes borrowed store data and returns plain values;
//! nothing mutates the store.

mod filter;
mod summary;
mod timeline;

pub use filter::{categories, sort_for_list, visible_tasks, TaskFilter};
pub use summary::{summary, NextDue, Summary};
pub use timeline::{timeline, TimelineDay, DEFAULT_TIMELINE_DAYS};
