//! Test doubles for the store and view seams.
//!
//! [`SpyStore`] wraps any [`DataStore`] and records each call before
//! forwarding it, so tests can assert on what reached storage (or that
//! nothing did). [`RecordingView`] keeps every render command it receives and
//! lets tests raise UI events directly, bypassing raw input translation.

use crate::error::Result;
use crate::store::DataStore;
use crate::todo::{Todo, TodoId, TodoPatch, TodoQuery};
use crate::view::{Bindings, RenderCommand, UiEvent, UiEventKind, View};
use std::cell::RefCell;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Find(TodoQuery),
    FindAll,
    Save {
        fields: TodoPatch,
        id: Option<TodoId>,
    },
    Remove(TodoId),
    Drop,
}

pub struct SpyStore<S: DataStore> {
    inner: S,
    calls: RefCell<Vec<StoreCall>>,
}

impl<S: DataStore> SpyStore<S> {
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            calls: RefCell::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.borrow().clone()
    }

    /// Save calls that targeted an existing record.
    pub fn updates(&self) -> Vec<(TodoId, TodoPatch)> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|call| match call {
                StoreCall::Save {
                    fields,
                    id: Some(id),
                } => Some((*id, fields.clone())),
                _ => None,
            })
            .collect()
    }

    pub fn clear_calls(&self) {
        self.calls.borrow_mut().clear();
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn record(&self, call: StoreCall) {
        self.calls.borrow_mut().push(call);
    }
}

impl<S: DataStore> DataStore for SpyStore<S> {
    fn find(&self, query: &TodoQuery) -> Result<Vec<Todo>> {
        self.record(StoreCall::Find(query.clone()));
        self.inner.find(query)
    }

    fn find_all(&self) -> Result<Vec<Todo>> {
        self.record(StoreCall::FindAll);
        self.inner.find_all()
    }

    fn save(&mut self, fields: TodoPatch, id: Option<TodoId>) -> Result<Vec<Todo>> {
        self.record(StoreCall::Save {
            fields: fields.clone(),
            id,
        });
        self.inner.save(fields, id)
    }

    fn remove(&mut self, id: TodoId) -> Result<Vec<Todo>> {
        self.record(StoreCall::Remove(id));
        self.inner.remove(id)
    }

    fn drop_collection(&mut self) -> Result<Vec<Todo>> {
        self.record(StoreCall::Drop);
        self.inner.drop_collection()
    }
}

/// A view that renders nothing and remembers everything.
#[derive(Default)]
pub struct RecordingView {
    commands: Vec<RenderCommand>,
    bindings: Bindings,
}

impl RecordingView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    /// Returns the recorded commands and starts a fresh recording.
    pub fn take_commands(&mut self) -> Vec<RenderCommand> {
        std::mem::take(&mut self.commands)
    }

    pub fn command_names(&self) -> Vec<&'static str> {
        self.commands.iter().map(RenderCommand::name).collect()
    }

    pub fn is_bound(&self, kind: UiEventKind) -> bool {
        self.bindings.is_bound(kind)
    }

    /// Raises `event` as if the user had produced it.
    pub fn trigger(&mut self, event: UiEvent) -> bool {
        self.bindings.emit(event)
    }
}

impl View for RecordingView {
    fn render(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    fn bind(&mut self, kind: UiEventKind) {
        self.bindings.bind(kind);
    }

    fn take_events(&mut self) -> Vec<UiEvent> {
        self.bindings.drain()
    }
}
