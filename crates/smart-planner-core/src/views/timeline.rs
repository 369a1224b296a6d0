use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::task::Task;

pub const DEFAULT_TIMELINE_DAYS: u32 = 7;

/// Tasks due on one calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineDay {
    pub date: NaiveDate,
    pub tasks: Vec<Task>,
}

/// One bucket per day starting at `today`. Completed tasks are included so
/// the day shows what was finished; undated tasks never appear.
pub fn timeline(tasks: &[Task], today: NaiveDate, days: u32) -> Vec<TimelineDay> {
    (0..i64::from(days))
        .map(|offset| {
            let date = today + Duration::days(offset);
            TimelineDay {
                date,
                tasks: tasks.iter().filter(|t| t.due == Some(date)).cloned().collect(),
            }
        })
        .collect()
}
