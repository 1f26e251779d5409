//! # Model
//!
//! Thin domain layer over a [`DataStore`]. It holds no state of its own besides
//! the store, so every call round-trips through storage and sees current data.

use crate::error::Result;
use crate::store::DataStore;
use crate::todo::{Todo, TodoCounts, TodoId, TodoPatch, TodoQuery};

pub struct TodoModel<S: DataStore> {
    store: S,
}

impl<S: DataStore> TodoModel<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Creates an open todo from `title`.
    ///
    /// Blank titles are ignored: nothing is persisted and `Ok(None)` is returned.
    pub fn create(&mut self, title: &str) -> Result<Option<Todo>> {
        let title = title.trim();
        if title.is_empty() {
            return Ok(None);
        }
        let fields = TodoPatch::title(title).with_completed(false);
        let created = self.store.save(fields, None)?;
        Ok(created.into_iter().next())
    }

    /// Reads every todo when `query` is `None`, otherwise the matching ones.
    pub fn read(&self, query: Option<&TodoQuery>) -> Result<Vec<Todo>> {
        match query {
            Some(query) => self.store.find(query),
            None => self.store.find_all(),
        }
    }

    pub fn read_all(&self) -> Result<Vec<Todo>> {
        self.read(None)
    }

    pub fn read_one(&self, id: TodoId) -> Result<Option<Todo>> {
        let found = self.store.find(&TodoQuery::by_id(id))?;
        Ok(found.into_iter().next())
    }

    /// Overwrites the fields present in `data`. Unknown ids are left alone.
    pub fn update(&mut self, id: TodoId, data: TodoPatch) -> Result<Vec<Todo>> {
        self.store.save(data, Some(id))
    }

    pub fn remove(&mut self, id: TodoId) -> Result<Vec<Todo>> {
        self.store.remove(id)
    }

    /// Wipes the whole list and restarts id assignment.
    pub fn remove_all(&mut self) -> Result<Vec<Todo>> {
        self.store.drop_collection()
    }

    pub fn get_count(&self) -> Result<TodoCounts> {
        let todos = self.store.find_all()?;
        Ok(TodoCounts::from_todos(&todos))
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
