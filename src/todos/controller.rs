//! # Controller
//!
//! Mediates between [`TodoModel`] and a [`View`]. The only state it keeps is
//! the active [`Route`], used to skip redundant re-renders when the same route
//! is shown twice.
//!
//! The controller subscribes to every [`UiEventKind`] at construction. Events
//! are delivered either directly through [`Controller::handle`] or by
//! [`Controller::pump`], which drains whatever the view queued since the last
//! call. Each handler runs its store calls and renders in order and returns
//! before the next event is looked at.
//!
//! A store failure aborts the handler: the error is returned and no further
//! render is issued for that event.

use crate::error::Result;
use crate::model::TodoModel;
use crate::route::Route;
use crate::store::DataStore;
use crate::todo::{TodoId, TodoPatch, TodoQuery};
use crate::view::{RenderCommand, UiEvent, UiEventKind, View};
use tracing::debug;

pub struct Controller<S: DataStore, V: View> {
    model: TodoModel<S>,
    view: V,
    active_route: Option<Route>,
}

impl<S: DataStore, V: View> Controller<S, V> {
    pub fn new(model: TodoModel<S>, mut view: V) -> Self {
        for kind in UiEventKind::all() {
            view.bind(*kind);
        }
        Self {
            model,
            view,
            active_route: None,
        }
    }

    pub fn model(&self) -> &TodoModel<S> {
        &self.model
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn active_route(&self) -> Option<Route> {
        self.active_route
    }

    /// Shows the list for a navigation fragment (`""`, `"#/"`, `"#/active"`, ...).
    ///
    /// Showing the route that is already active only re-renders the filter
    /// highlight.
    pub fn set_view(&mut self, raw: &str) -> Result<()> {
        let route = Route::from_fragment(raw);
        if self.active_route == Some(route) {
            debug!(%route, "route unchanged");
            self.view.render(RenderCommand::SetFilter(route));
            return Ok(());
        }
        self.show_route(route)
    }

    /// Wipes the list and redraws.
    pub fn reset(&mut self) -> Result<()> {
        debug!("resetting list");
        self.model.remove_all()?;
        self.refresh()
    }

    /// Handles every event the view queued since the last call. Returns how many ran.
    ///
    /// The queue is drained up front: when a handler fails, the events queued
    /// after it are discarded and the error is returned.
    pub fn pump(&mut self) -> Result<usize> {
        let events = self.view.take_events();
        let count = events.len();
        for event in events {
            self.handle(event)?;
        }
        Ok(count)
    }

    pub fn handle(&mut self, event: UiEvent) -> Result<()> {
        debug!(?event, "handling event");
        match event {
            UiEvent::NewTodo(title) => self.add_item(&title),
            UiEvent::RemoveCompleted => self.remove_completed(),
            UiEvent::ToggleAll { completed } => self.toggle_all(completed),
            UiEvent::ItemEdit { id } => self.edit_item(id),
            UiEvent::ItemRemove { id } => self.remove_item(id),
            UiEvent::ItemToggle { id, completed } => self.toggle_item(id, completed),
            UiEvent::ItemEditDone { id, title } => self.edit_item_save(id, &title),
            UiEvent::ItemEditCancel { id } => self.edit_item_cancel(id),
        }
    }

    fn add_item(&mut self, title: &str) -> Result<()> {
        self.model.create(title)?;
        self.refresh()?;
        self.view.render(RenderCommand::ClearNewTodo);
        Ok(())
    }

    fn edit_item(&mut self, id: TodoId) -> Result<()> {
        if let Some(todo) = self.model.read_one(id)? {
            self.view.render(RenderCommand::EditItem {
                id,
                title: todo.title,
            });
        }
        Ok(())
    }

    fn edit_item_save(&mut self, id: TodoId, title: &str) -> Result<()> {
        let title = title.trim();
        if title.is_empty() {
            return self.remove_item(id);
        }
        self.model.update(id, TodoPatch::title(title))?;
        self.view.render(RenderCommand::EditItemDone {
            id,
            title: title.to_string(),
        });
        Ok(())
    }

    fn edit_item_cancel(&mut self, id: TodoId) -> Result<()> {
        if let Some(todo) = self.model.read_one(id)? {
            self.view.render(RenderCommand::EditItemDone {
                id,
                title: todo.title,
            });
        }
        Ok(())
    }

    fn remove_item(&mut self, id: TodoId) -> Result<()> {
        self.model.remove(id)?;
        self.view.render(RenderCommand::RemoveItem(id));
        self.update_counts()
    }

    fn remove_completed(&mut self) -> Result<()> {
        let completed = self.model.read(Some(&TodoQuery::completed(true)))?;
        for todo in completed {
            self.model.remove(todo.id)?;
            self.view.render(RenderCommand::RemoveItem(todo.id));
        }
        self.update_counts()
    }

    fn toggle_item(&mut self, id: TodoId, completed: bool) -> Result<()> {
        self.set_completed(id, completed)?;
        self.refresh()
    }

    /// Only records whose state actually changes are updated.
    fn toggle_all(&mut self, completed: bool) -> Result<()> {
        let changing = self.model.read(Some(&TodoQuery::completed(!completed)))?;
        for todo in changing {
            self.set_completed(todo.id, completed)?;
        }
        self.refresh()
    }

    fn set_completed(&mut self, id: TodoId, completed: bool) -> Result<()> {
        self.model.update(id, TodoPatch::completed(completed))?;
        self.view
            .render(RenderCommand::ElementComplete { id, completed });
        Ok(())
    }

    /// Re-renders the active route even if it did not change.
    fn refresh(&mut self) -> Result<()> {
        let route = self.active_route.unwrap_or_default();
        self.show_route(route)
    }

    fn show_route(&mut self, route: Route) -> Result<()> {
        debug!(%route, "showing route");
        let todos = self.model.read(route.query().as_ref())?;
        self.view.render(RenderCommand::ShowEntries(todos));
        self.active_route = Some(route);
        self.view.render(RenderCommand::SetFilter(route));
        self.update_counts()
    }

    fn update_counts(&mut self) -> Result<()> {
        let counts = self.model.get_count()?;
        self.view.render(RenderCommand::ContentBlockVisibility {
            visible: counts.total > 0,
        });
        self.view.render(RenderCommand::ToggleAll {
            checked: counts.active == 0,
        });
        self.view.render(RenderCommand::ClearCompletedButton {
            completed: counts.completed,
            visible: counts.completed > 0,
        });
        self.view
            .render(RenderCommand::UpdateElementCount(counts.active));
        Ok(())
    }
}
