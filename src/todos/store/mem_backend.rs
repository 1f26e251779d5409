use super::backend::StorageBackend;
use crate::error::{Result, TodoError};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage backend for testing.
///
/// Uses `RefCell` for interior mutability since the app is single-threaded.
#[derive(Default)]
pub struct MemBackend {
    items: RefCell<HashMap<String, String>>,
    simulate_write_error: RefCell<bool>,
}

impl MemBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds a raw value, bypassing the store (e.g. to emulate a previous session).
    pub fn with_item(self, key: &str, value: &str) -> Self {
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self
    }

    /// Enable write error simulation for testing error handling.
    pub fn set_simulate_write_error(&self, simulate: bool) {
        *self.simulate_write_error.borrow_mut() = simulate;
    }

    /// Removes a raw value behind the store's back.
    pub fn clear_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

impl StorageBackend for MemBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        if *self.simulate_write_error.borrow() {
            return Err(TodoError::Store("Simulated write error".to_string()));
        }
        self.items
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_reads_none() {
        let backend = MemBackend::new();
        assert_eq!(backend.get_item("todos").unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let backend = MemBackend::new();
        backend.set_item("todos", "{}").unwrap();
        assert_eq!(backend.get_item("todos").unwrap().as_deref(), Some("{}"));
    }

    #[test]
    fn simulated_write_error_keeps_previous_value() {
        let backend = MemBackend::new().with_item("todos", "old");
        backend.set_simulate_write_error(true);
        assert!(backend.set_item("todos", "new").is_err());
        assert_eq!(backend.get_item("todos").unwrap().as_deref(), Some("old"));
    }
}
