//! # View Layer
//!
//! The view has exactly two entry points, and no business logic:
//!
//! - [`View::render`] applies one [`RenderCommand`]. The command set is closed;
//!   it is the entire boundary between controller and view.
//! - [`View::bind`] subscribes the controller to one kind of [`UiEvent`].
//!   Events of kinds nobody bound are dropped by the view. Queued events are
//!   handed over through [`View::take_events`].
//!
//! [`terminal::TerminalView`] is the concrete view: it keeps an in-memory
//! screen, mutates it as commands arrive, translates raw inputs (clicks,
//! keys, blur) into events, and prints the screen through templates.

use crate::route::Route;
use crate::todo::{Todo, TodoId};
use serde::Serialize;
use std::collections::{BTreeSet, VecDeque};
use tracing::trace;

pub mod styles;
pub mod templates;
pub mod terminal;

/// The fixed set of UI update instructions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", content = "parameter", rename_all = "camelCase")]
pub enum RenderCommand {
    /// Replace the whole list with these records.
    ShowEntries(Vec<Todo>),
    RemoveItem(TodoId),
    /// Number of active todos.
    UpdateElementCount(usize),
    ClearCompletedButton { completed: usize, visible: bool },
    ContentBlockVisibility { visible: bool },
    ToggleAll { checked: bool },
    SetFilter(Route),
    ClearNewTodo,
    ElementComplete { id: TodoId, completed: bool },
    EditItem { id: TodoId, title: String },
    EditItemDone { id: TodoId, title: String },
}

impl RenderCommand {
    pub fn name(&self) -> &'static str {
        match self {
            RenderCommand::ShowEntries(_) => "showEntries",
            RenderCommand::RemoveItem(_) => "removeItem",
            RenderCommand::UpdateElementCount(_) => "updateElementCount",
            RenderCommand::ClearCompletedButton { .. } => "clearCompletedButton",
            RenderCommand::ContentBlockVisibility { .. } => "contentBlockVisibility",
            RenderCommand::ToggleAll { .. } => "toggleAll",
            RenderCommand::SetFilter(_) => "setFilter",
            RenderCommand::ClearNewTodo => "clearNewTodo",
            RenderCommand::ElementComplete { .. } => "elementComplete",
            RenderCommand::EditItem { .. } => "editItem",
            RenderCommand::EditItemDone { .. } => "editItemDone",
        }
    }
}

/// Kinds of user interaction the view can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum UiEventKind {
    NewTodo,
    RemoveCompleted,
    ToggleAll,
    ItemEdit,
    ItemRemove,
    ItemToggle,
    ItemEditDone,
    ItemEditCancel,
}

impl UiEventKind {
    pub fn all() -> &'static [UiEventKind] {
        &[
            UiEventKind::NewTodo,
            UiEventKind::RemoveCompleted,
            UiEventKind::ToggleAll,
            UiEventKind::ItemEdit,
            UiEventKind::ItemRemove,
            UiEventKind::ItemToggle,
            UiEventKind::ItemEditDone,
            UiEventKind::ItemEditCancel,
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// The new-item input changed to this value.
    NewTodo(String),
    RemoveCompleted,
    ToggleAll { completed: bool },
    ItemEdit { id: TodoId },
    ItemRemove { id: TodoId },
    ItemToggle { id: TodoId, completed: bool },
    ItemEditDone { id: TodoId, title: String },
    ItemEditCancel { id: TodoId },
}

impl UiEvent {
    pub fn kind(&self) -> UiEventKind {
        match self {
            UiEvent::NewTodo(_) => UiEventKind::NewTodo,
            UiEvent::RemoveCompleted => UiEventKind::RemoveCompleted,
            UiEvent::ToggleAll { .. } => UiEventKind::ToggleAll,
            UiEvent::ItemEdit { .. } => UiEventKind::ItemEdit,
            UiEvent::ItemRemove { .. } => UiEventKind::ItemRemove,
            UiEvent::ItemToggle { .. } => UiEventKind::ItemToggle,
            UiEvent::ItemEditDone { .. } => UiEventKind::ItemEditDone,
            UiEvent::ItemEditCancel { .. } => UiEventKind::ItemEditCancel,
        }
    }
}

pub trait View {
    fn render(&mut self, command: RenderCommand);

    fn bind(&mut self, kind: UiEventKind);

    /// Drains the events emitted since the last call, oldest first.
    fn take_events(&mut self) -> Vec<UiEvent>;
}

/// Subscription set plus the queue of pending events, shared by view implementations.
#[derive(Debug, Default)]
pub struct Bindings {
    bound: BTreeSet<UiEventKind>,
    pending: VecDeque<UiEvent>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, kind: UiEventKind) {
        self.bound.insert(kind);
    }

    pub fn is_bound(&self, kind: UiEventKind) -> bool {
        self.bound.contains(&kind)
    }

    /// Queues `event` if its kind is bound. Returns whether it was queued.
    pub fn emit(&mut self, event: UiEvent) -> bool {
        if !self.is_bound(event.kind()) {
            trace!(?event, "dropping unbound event");
            return false;
        }
        self.pending.push_back(event);
        true
    }

    pub fn drain(&mut self) -> Vec<UiEvent> {
        self.pending.drain(..).collect()
    }
}
