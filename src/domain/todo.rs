use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TodoId(pub i64);

impl fmt::Display for TodoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

/// A single task. `id` stays `None` until a repository stores the record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Todo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TodoId>,
    pub title: String,
    pub completed: bool,
    #[serde(default)]
    pub version: i64,
}

impl Todo {
    pub fn new(title: impl Into<String>, completed: bool) -> Self {
        Self { id: None, title: title.into(), completed, version: 0 }
    }

    pub fn with_id(id: i64, title: impl Into<String>, completed: bool, version: i64) -> Self {
        Self { id: Some(TodoId(id)), title: title.into(), completed, version }
    }

    /// Same record content under a different identifier.
    pub fn identified_as(self, id: TodoId) -> Self {
        Self { id: Some(id), ..self }
    }
}
