//! # Storage Layer
//!
//! The storage service persists one ordered collection of todos per list name.
//! The [`DataStore`] trait is the contract the model consumes; it is the only
//! way state is read or written, and the model keeps no cached copy.
//!
//! ## Layers
//!
//! - [`backend::StorageBackend`]: raw string-keyed persistence (`localStorage`
//!   equivalent). One entry per collection name.
//!   - [`fs_backend::FsBackend`]: one JSON file per list, atomic writes
//!   - [`mem_backend::MemBackend`]: in-memory, for tests
//! - [`local_store::LocalStore`]: implements [`DataStore`] over any backend,
//!   owning id assignment and query semantics.
//!
//! ## Storage Format
//!
//! ```text
//! <data>/lists/
//! ├── todos.json       # {"todos": [{"id": 0, "title": "...", "completed": false}, ...]}
//! └── groceries.json
//! ```
//!
//! ## Id assignment
//!
//! Ids come from a counter held by the open store. On open the counter resumes
//! at `max(id) + 1`, which is only sound as long as nothing renumbers records
//! behind the store's back. Dropping the collection resets the counter to 0.

use crate::error::Result;
use crate::todo::{Todo, TodoId, TodoPatch, TodoQuery};
use serde::{Deserialize, Serialize};

pub mod backend;
pub mod fs_backend;
pub mod local_store;
pub mod mem_backend;

/// The persisted value of one collection entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionData {
    pub todos: Vec<Todo>,
}

/// Abstract interface for the storage service.
///
/// Every operation completes before returning; results reflect storage state
/// at the time of the call.
pub trait DataStore {
    /// Records matching every field of `query`, in insertion order.
    fn find(&self, query: &TodoQuery) -> Result<Vec<Todo>>;

    /// All records, in insertion order.
    fn find_all(&self) -> Result<Vec<Todo>>;

    /// With `id`: merges `fields` into that record (no-op if absent) and returns
    /// the whole collection. Without: assigns the next id, appends, and returns
    /// a one-element vector with the new record.
    fn save(&mut self, fields: TodoPatch, id: Option<TodoId>) -> Result<Vec<Todo>>;

    /// Deletes the first record with `id` and returns the remaining collection,
    /// whether or not anything matched.
    fn remove(&mut self, id: TodoId) -> Result<Vec<Todo>>;

    /// Clears the collection, resets the id counter and returns the empty collection.
    fn drop_collection(&mut self) -> Result<Vec<Todo>>;
}
