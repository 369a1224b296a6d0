use serde::{Deserialize, Serialize};

use super::{new_id, now_millis};

/// A rich-text note attached to a task.
///
/// `html` is stored and returned as-is; the core never inspects its markup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    pub html: String,
    #[serde(default)]
    pub created: i64,
}

impl Note {
    pub fn new(html: impl Into<String>) -> Self {
        Note {
            id: new_id("n"),
            html: html.into(),
            created: now_millis(),
        }
    }
}
