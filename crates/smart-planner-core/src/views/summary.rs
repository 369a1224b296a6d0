use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Earliest-due pending task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NextDue {
    pub task_id: String,
    pub title: String,
    pub due: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub next_due: Option<NextDue>,
}

pub fn summary(tasks: &[Task]) -> Summary {
    let completed = tasks.iter().filter(|t| t.completed).count();
    // min_by_key keeps the first of equal keys, i.e. list order on ties.
    let next_due = tasks
        .iter()
        .filter(|t| !t.completed)
        .filter_map(|t| t.due.map(|due| (t, due)))
        .min_by_key(|(_, due)| *due)
        .map(|(t, due)| NextDue {
            task_id: t.id.clone(),
            title: t.title.clone(),
            due,
        });
    Summary {
        total: tasks.len(),
        completed,
        pending: tasks.len() - completed,
        next_due,
    }
}
