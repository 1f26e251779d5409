use serde::{Deserialize, Serialize};

/// Identifier assigned by the store. Never reused within a collection until it is dropped.
pub type TodoId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
}

/// A partial set of fields. Only the fields that are `Some` are written by a save.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_completed(mut self, completed: bool) -> Self {
        self.completed = Some(completed);
        self
    }

    pub fn title(title: impl Into<String>) -> Self {
        Self::new().with_title(title)
    }

    pub fn completed(completed: bool) -> Self {
        Self::new().with_completed(completed)
    }

    /// Overwrites the supplied fields on `todo`, leaving the rest untouched.
    pub fn apply_to(&self, todo: &mut Todo) {
        if let Some(title) = &self.title {
            todo.title = title.clone();
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
    }

    /// Builds a fresh record from the patch, filling absent fields with defaults.
    pub fn into_todo(self, id: TodoId) -> Todo {
        Todo {
            id,
            title: self.title.unwrap_or_default(),
            completed: self.completed.unwrap_or(false),
        }
    }
}

/// Exact-match query: a record matches when every supplied field is equal.
/// The empty query matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<TodoId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
}

impl TodoQuery {
    pub fn by_id(id: TodoId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.title.is_none() && self.completed.is_none()
    }

    pub fn matches(&self, todo: &Todo) -> bool {
        self.id.is_none_or(|id| id == todo.id)
            && self.title.as_deref().is_none_or(|t| t == todo.title)
            && self.completed.is_none_or(|c| c == todo.completed)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TodoCounts {
    pub active: usize,
    pub completed: usize,
    pub total: usize,
}

impl TodoCounts {
    pub fn from_todos(todos: &[Todo]) -> Self {
        let completed = todos.iter().filter(|t| t.completed).count();
        Self {
            active: todos.len() - completed,
            completed,
            total: todos.len(),
        }
    }
}
