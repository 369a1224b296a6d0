//! Deadline risk classification.
//!
//! Rules are checked in order and the first match wins:
//!
//! | Condition                          | Label       |
//! |------------------------------------|-------------|
//! | completed                          | Done        |
//! | no due date                        | No due date |
//! | days left ≤ 0                      | Overdue     |
//! | days left ≤ 2 and priority high    | High risk   |
//! | days left ≤ 3                      | At risk     |
//! | otherwise                          | On track    |

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::task::{Priority, Task};

/// Risk label, ordered as in the table above.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum RiskLabel {
    Done,
    NoDueDate,
    Overdue,
    HighRisk,
    AtRisk,
    OnTrack,
}

impl RiskLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLabel::Done => "Done",
            RiskLabel::NoDueDate => "No due date",
            RiskLabel::Overdue => "Overdue",
            RiskLabel::HighRisk => "High risk",
            RiskLabel::AtRisk => "At risk",
            RiskLabel::OnTrack => "On track",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            RiskLabel::Done => Severity::Success,
            RiskLabel::NoDueDate => Severity::Muted,
            RiskLabel::Overdue => Severity::Critical,
            RiskLabel::HighRisk => Severity::Warning,
            RiskLabel::AtRisk => Severity::Caution,
            RiskLabel::OnTrack => Severity::Ok,
        }
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display tag attached to a risk label.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Success,
    Muted,
    Critical,
    Warning,
    Caution,
    Ok,
}

impl Severity {
    /// Hex colour for renderers.
    pub fn color(&self) -> &'static str {
        match self {
            Severity::Success => "#7ed0a8",
            Severity::Muted => "#9aa4b2",
            Severity::Critical => "#ff7676",
            Severity::Warning => "#ffb86b",
            Severity::Caution => "#ffd580",
            Severity::Ok => "#6ee7b7",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiskAssessment {
    pub label: RiskLabel,
    pub severity: Severity,
    /// `None` when the task has no due date.
    pub days_left: Option<i64>,
}

pub fn classify(task: &Task, now: NaiveDateTime) -> RiskAssessment {
    let days_left = task.days_left(now);
    let label = match days_left {
        _ if task.completed => RiskLabel::Done,
        None => RiskLabel::NoDueDate,
        Some(dl) if dl <= 0 => RiskLabel::Overdue,
        Some(dl) if dl <= 2 && task.priority == Priority::High => RiskLabel::HighRisk,
        Some(dl) if dl <= 3 => RiskLabel::AtRisk,
        Some(_) => RiskLabel::OnTrack,
    };
    RiskAssessment {
        label,
        severity: label.severity(),
        days_left,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};
    use crate::task::TaskDraft;

    fn noon(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(12, 0, 0).unwrap()
    }

    fn task(priority: Priority, due_in: Option<i64>, now: NaiveDateTime) -> Task {
        Task::from_draft(TaskDraft {
            priority: Some(priority),
            due: due_in.map(|d| now.date() + Duration::days(d)),
            ..Default::default()
        })
    }

    #[test]
    fn label_ladder() {
        let now = noon(2026, 4, 10);
        let cases = [
            (Priority::High, Some(-1), RiskLabel::Overdue),
            (Priority::High, Some(0), RiskLabel::HighRisk),
            (Priority::High, Some(1), RiskLabel::HighRisk),
            (Priority::Medium, Some(1), RiskLabel::AtRisk),
            (Priority::Low, Some(2), RiskLabel::AtRisk),
            (Priority::High, Some(2), RiskLabel::AtRisk),
            (Priority::High, Some(3), RiskLabel::OnTrack),
            (Priority::Medium, None, RiskLabel::NoDueDate),
        ];
        for (priority, due_in, expected) in cases {
            let t = task(priority, due_in, now);
            assert_eq!(classify(&t, now).label, expected, "{priority:?} due_in={due_in:?}");
        }
    }

    #[test]
    fn due_today_is_not_overdue_until_day_ends() {
        let now = noon(2026, 4, 10);
        let t = task(Priority::Low, Some(0), now);
        let r = classify(&t, now);
        assert_eq!(r.days_left, Some(1));
        assert_eq!(r.label, RiskLabel::AtRisk);

        let urgent = task(Priority::High, Some(0), now);
        assert_eq!(classify(&urgent, now).label, RiskLabel::HighRisk);
    }

    #[test]
    fn end_of_due_day_is_overdue_even_when_high() {
        let due = NaiveDate::from_ymd_opt(2026, 4, 10).unwrap();
        let now = due.and_hms_milli_opt(23, 59, 59, 999).unwrap();
        let t = Task::from_draft(TaskDraft {
            priority: Some(Priority::High),
            due: Some(due),
            ..Default::default()
        });
        let r = classify(&t, now);
        assert_eq!(r.days_left, Some(0));
        assert_eq!(r.label, RiskLabel::Overdue);
        assert_eq!(r.severity, Severity::Critical);
    }

    #[test]
    fn completed_wins_over_everything() {
        let now = noon(2026, 4, 10);
        let mut t = task(Priority::High, Some(-5), now);
        t.completed = true;
        assert_eq!(classify(&t, now).label, RiskLabel::Done);
        assert_eq!(classify(&t, now).severity.color(), "#7ed0a8");
    }

    #[test]
    fn label_text() {
        assert_eq!(RiskLabel::NoDueDate.to_string(), "No due date");
        assert_eq!(RiskLabel::HighRisk.as_str(), "High risk");
    }
}
