//! Task and note records.
//!
//! Tasks carry a title, topic, priority, optional due date, category and a
//! completion flag. Notes are opaque rich-text blobs owned by one task.
//! Field names and value shapes match the persisted JSON snapshot.

mod note;

pub use note::Note;

use chrono::{Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Title used when a task is created or renamed without one.
pub const DEFAULT_TITLE: &str = "Untitled";
/// Category used when a task is created or recategorized without one.
pub const DEFAULT_CATEGORY: &str = "general";

const DAY_MS: i64 = 86_400_000;

/// Task priority.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            other => Err(format!("unknown priority: {other}")),
        }
    }
}

/// A planner task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier, immutable
    pub id: String,
    /// Display title, never empty
    pub title: String,
    /// Free-text topic
    #[serde(default)]
    pub topic: String,
    #[serde(default)]
    pub priority: Priority,
    /// Due date without time component
    #[serde(default, deserialize_with = "deserialize_due")]
    pub due: Option<NaiveDate>,
    #[serde(default = "default_category")]
    pub category: String,
    #[serde(default)]
    pub completed: bool,
    /// Creation time in epoch milliseconds, immutable
    #[serde(default)]
    pub created: i64,
}

impl Task {
    /// Build a task from a draft, filling defaults for omitted fields.
    pub fn from_draft(draft: TaskDraft) -> Self {
        Task {
            id: new_id("t"),
            title: non_blank_or(draft.title, DEFAULT_TITLE),
            topic: draft.topic.unwrap_or_default(),
            priority: draft.priority.unwrap_or_default(),
            due: draft.due,
            category: non_blank_or(draft.category, DEFAULT_CATEGORY),
            completed: false,
            created: now_millis(),
        }
    }

    /// Replace a blank title or category with its default.
    pub(crate) fn normalize_blanks(&mut self) {
        if self.title.trim().is_empty() {
            self.title = DEFAULT_TITLE.to_string();
        }
        if self.category.trim().is_empty() {
            self.category = DEFAULT_CATEGORY.to_string();
        }
    }

    /// Whole days until the end of the due day, `None` when there is no due date.
    pub fn days_left(&self, now: NaiveDateTime) -> Option<i64> {
        self.due.map(|due| days_left(due, now))
    }
}

/// Fields supplied when creating a task. `None` means "use the default".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: Option<String>,
    pub topic: Option<String>,
    pub priority: Option<Priority>,
    pub due: Option<NaiveDate>,
    pub category: Option<String>,
}

impl TaskDraft {
    pub fn titled(title: impl Into<String>) -> Self {
        TaskDraft {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

/// Partial update for a task. Only `Some` fields are applied.
///
/// `due: Some(None)` clears the due date.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub topic: Option<String>,
    pub priority: Option<Priority>,
    pub due: Option<Option<NaiveDate>>,
    pub category: Option<String>,
    pub completed: Option<bool>,
}

impl TaskPatch {
    pub fn completed(completed: bool) -> Self {
        TaskPatch {
            completed: Some(completed),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == TaskPatch::default()
    }

    /// Merge into `task`. Blank title and category fall back to their defaults.
    pub fn apply(self, task: &mut Task) {
        if let Some(title) = self.title {
            task.title = non_blank_or(Some(title), DEFAULT_TITLE);
        }
        if let Some(topic) = self.topic {
            task.topic = topic;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due) = self.due {
            task.due = due;
        }
        if let Some(category) = self.category {
            task.category = non_blank_or(Some(category), DEFAULT_CATEGORY);
        }
        if let Some(completed) = self.completed {
            task.completed = completed;
        }
    }
}

/// Whole days between `now` and 23:59:59.999 on `due`, rounded up.
///
/// Zero or negative means the due day has passed. A task due today has 1
/// day left until midnight, so only the final instant of the day reads 0.
pub fn days_left(due: NaiveDate, now: NaiveDateTime) -> i64 {
    let end_of_day = due.and_time(NaiveTime::default()) + Duration::milliseconds(DAY_MS - 1);
    let ms = (end_of_day - now).num_milliseconds();
    -(-ms).div_euclid(DAY_MS)
}

/// Current local wall-clock time, the reference for deadline math.
pub fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub(crate) fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub(crate) fn new_id(prefix: &str) -> String {
    format!("{prefix}-{}", uuid::Uuid::new_v4().simple())
}

fn non_blank_or(value: Option<String>, fallback: &str) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => fallback.to_string(),
    }
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Accepts `null`, `""` or `YYYY-MM-DD`.
fn deserialize_due<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| serde::de::Error::custom(format!("invalid due date '{s}': {e}"))),
    }
}
