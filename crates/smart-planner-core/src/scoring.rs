//! Urgency scoring.
//!
//! ```text
//! score = weight(priority) / max(1, days_left)
//! ```
//!
//! Weights are high = 3, medium = 2, low = 1. A task without a due date has
//! infinitely many days left and scores 0, so the daily plan only picks it
//! up when nothing dated is pending.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::task::{Priority, Task};

/// Weight for each priority level.
pub fn priority_weight(priority: Priority) -> f64 {
    match priority {
        Priority::High => 3.0,
        Priority::Medium => 2.0,
        Priority::Low => 1.0,
    }
}

/// Days left clamped to at least 1; `None` (no due date) is infinite.
pub fn effective_days_left(days_left: Option<i64>) -> f64 {
    match days_left {
        Some(dl) => dl.max(1) as f64,
        None => f64::INFINITY,
    }
}

/// Urgency for a given priority and deadline distance.
pub fn score_for(priority: Priority, days_left: Option<i64>) -> f64 {
    priority_weight(priority) / effective_days_left(days_left)
}

/// A task paired with its urgency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrgencyScore {
    pub task_id: String,
    pub score: f64,
    pub days_left: Option<i64>,
}

impl UrgencyScore {
    /// Higher score first; equal scores put the nearer deadline first.
    /// Two undated tasks compare equal.
    pub fn rank(&self, other: &Self) -> Ordering {
        other
            .score
            .partial_cmp(&self.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| compare_days_left(self.days_left, other.days_left))
    }
}

pub fn score(task: &Task, now: NaiveDateTime) -> UrgencyScore {
    let days_left = task.days_left(now);
    UrgencyScore {
        task_id: task.id.clone(),
        score: score_for(task.priority, days_left),
        days_left,
    }
}

/// Ascending, with `None` after every date.
fn compare_days_left(a: Option<i64>, b: Option<i64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
