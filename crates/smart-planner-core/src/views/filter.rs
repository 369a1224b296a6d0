use chrono::NaiveDate;
use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::task::{Note, Priority, Task, DEFAULT_CATEGORY};

/// Task list filter. `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TaskFilter {
    pub category: Option<String>,
    pub priority: Option<Priority>,
    pub due: Option<NaiveDate>,
    /// Case-insensitive substring over title, topic and note html.
    pub text: Option<String>,
}

impl TaskFilter {
    pub fn matches(&self, task: &Task, notes: &[Note]) -> bool {
        if self.category.as_deref().is_some_and(|c| c != task.category) {
            return false;
        }
        if self.priority.is_some_and(|p| p != task.priority) {
            return false;
        }
        if self.due.is_some() && self.due != task.due {
            return false;
        }
        match self.text.as_deref().map(str::trim) {
            None | Some("") => true,
            Some(query) => {
                let mut haystack = format!("{} {}", task.title, task.topic);
                for note in notes {
                    haystack.push(' ');
                    haystack.push_str(&note.html);
                }
                haystack.to_lowercase().contains(&query.to_lowercase())
            }
        }
    }
}

/// Filtered tasks in list order: see [`sort_for_list`].
pub fn visible_tasks<'a>(
    tasks: &'a [Task],
    notes: &BTreeMap<String, Vec<Note>>,
    filter: &TaskFilter,
) -> Vec<&'a Task> {
    let mut list: Vec<&Task> = tasks
        .iter()
        .filter(|t| {
            let task_notes = notes.get(&t.id).map(Vec::as_slice).unwrap_or(&[]);
            filter.matches(t, task_notes)
        })
        .collect();
    sort_for_list(&mut list);
    list
}

/// Pending before completed, then by due date with undated last.
/// Stable, so equal tasks keep insertion order.
pub fn sort_for_list(list: &mut [&Task]) {
    list.sort_by(|a, b| {
        a.completed.cmp(&b.completed).then_with(|| match (a.due, b.due) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
    });
}

/// `general` first, then each other non-empty category once, first-seen order.
pub fn categories(tasks: &[Task]) -> Vec<String> {
    let mut out = vec![DEFAULT_CATEGORY.to_string()];
    for task in tasks {
        if !task.category.is_empty() && !out.contains(&task.category) {
            out.push(task.category.clone());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::TaskStore;
    use crate::task::{TaskDraft, TaskPatch};

    fn date(d: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2026, 6, d)
    }

    fn fixture() -> TaskStore {
        let mut store = TaskStore::new();
        let calc = store.create_task(TaskDraft {
            title: Some("Integration set".into()),
            topic: Some("Calculus".into()),
            priority: Some(Priority::High),
            due: date(10),
            category: Some("Math".into()),
        });
        store.create_task(TaskDraft {
            title: Some("Read chapter".into()),
            topic: Some("DB".into()),
            due: date(5),
            category: Some("CS".into()),
            ..Default::default()
        });
        let done = store.create_task(TaskDraft {
            title: Some("Old quiz".into()),
            due: date(1),
            category: Some("Math".into()),
            ..Default::default()
        });
        store.create_task(TaskDraft::titled("Someday idea"));
        store.update_task(&done, TaskPatch::completed(true)).unwrap();
        store.add_note(&calc, "<p>Use SUBSTITUTION</p>").unwrap();
        store
    }

    fn titles(list: &[&Task]) -> Vec<String> {
        list.iter().map(|t| t.title.clone()).collect()
    }

    #[test]
    fn list_order_pending_then_due_then_undated() {
        let store = fixture();
        let list = visible_tasks(store.tasks(), store.note_map(), &TaskFilter::default());
        assert_eq!(
            titles(&list),
            ["Read chapter", "Integration set", "Someday idea", "Old quiz"]
        );
    }

    #[test]
    fn field_filters() {
        let store = fixture();
        let by_cat = TaskFilter {
            category: Some("Math".into()),
            ..Default::default()
        };
        assert_eq!(
            titles(&visible_tasks(store.tasks(), store.note_map(), &by_cat)),
            ["Integration set", "Old quiz"]
        );

        let by_priority = TaskFilter {
            priority: Some(Priority::High),
            ..Default::default()
        };
        assert_eq!(
            titles(&visible_tasks(store.tasks(), store.note_map(), &by_priority)),
            ["Integration set"]
        );

        let by_due = TaskFilter {
            due: date(5),
            ..Default::default()
        };
        assert_eq!(
            titles(&visible_tasks(store.tasks(), store.note_map(), &by_due)),
            ["Read chapter"]
        );
    }

    #[test]
    fn text_search_covers_topic_and_notes() {
        let store = fixture();
        let search = |q: &str| {
            let filter = TaskFilter {
                text: Some(q.into()),
                ..Default::default()
            };
            titles(&visible_tasks(store.tasks(), store.note_map(), &filter))
        };
        assert_eq!(search("substitution"), ["Integration set"]);
        assert_eq!(search("  db "), ["Read chapter"]);
        assert_eq!(search("   ").len(), 4);
        assert!(search("nothing-like-this").is_empty());
    }

    #[test]
    fn categories_start_with_general() {
        let store = fixture();
        assert_eq!(categories(store.tasks()), ["general", "Math", "CS"]);
        assert_eq!(categories(&[]), ["general"]);
    }
}
