//! Suggested daily plan.
//!
//! Pending tasks are ranked by urgency and the top slice shares a daily hour
//! budget in proportion to score. The denominator is the total score of
//! *every* pending task, not only the slice that gets hours, and each entry
//! gets at least one hour. The hours handed out can therefore sum to more
//! or less than the budget; the plan is a suggestion, not a constraint.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::scoring::{score, UrgencyScore};
use crate::task::{Priority, Task};

pub const DEFAULT_DAILY_BUDGET_HOURS: f64 = 5.0;
pub const DEFAULT_MAX_ENTRIES: usize = 8;

/// Allocator settings, the `[plan]` section of the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    #[serde(default = "default_daily_budget_hours")]
    pub daily_budget_hours: f64,
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

fn default_daily_budget_hours() -> f64 {
    DEFAULT_DAILY_BUDGET_HOURS
}
fn default_max_entries() -> usize {
    DEFAULT_MAX_ENTRIES
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            daily_budget_hours: DEFAULT_DAILY_BUDGET_HOURS,
            max_entries: DEFAULT_MAX_ENTRIES,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub task_id: String,
    pub title: String,
    pub due: Option<NaiveDate>,
    pub hours: u32,
    pub priority: Priority,
    pub score: f64,
}

/// Build the plan, most urgent first. No pending tasks gives an empty plan.
pub fn suggest_daily_plan(tasks: &[Task], now: NaiveDateTime, config: &PlanConfig) -> Vec<PlanEntry> {
    let mut scored: Vec<(&Task, UrgencyScore)> = tasks
        .iter()
        .filter(|t| !t.completed)
        .map(|t| (t, score(t, now)))
        .collect();
    // Stable: equal rank keeps list order.
    scored.sort_by(|(_, a), (_, b)| a.rank(b));

    let total: f64 = scored.iter().map(|(_, s)| s.score).sum();
    let denominator = if total == 0.0 { 1.0 } else { total };

    scored
        .into_iter()
        .take(config.max_entries)
        .map(|(task, urgency)| PlanEntry {
            task_id: task.id.clone(),
            title: task.title.clone(),
            due: task.due,
            hours: allocate_hours(urgency.score, denominator, config.daily_budget_hours),
            priority: task.priority,
            score: urgency.score,
        })
        .collect()
}

/// `max(1, round(score / total * budget))`, halves rounding up.
fn allocate_hours(score: f64, total: f64, budget: f64) -> u32 {
    let share = (score / total * budget + 0.5).floor();
    if share.is_finite() && share >= 1.0 {
        share as u32
    } else {
        1
    }
}

/// Sum of allocated hours; may exceed the configured budget.
pub fn total_hours(plan: &[PlanEntry]) -> u32 {
    plan.iter().map(|e| e.hours).sum()
}
