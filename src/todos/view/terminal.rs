//! Terminal view.
//!
//! [`Screen`] plays the role a page's DOM plays for a browser view: render
//! commands mutate it, and raw inputs (clicks, key presses, blur) read it to
//! decide which [`UiEvent`] to emit. [`TerminalView::present`] prints it.
//!
//! Inputs addressed to a row that is not on screen do nothing, exactly like
//! clicking an element that is not in the page.

use super::styles::names;
use super::templates::{clear_completed_label, item_counter, render_page};
use super::{Bindings, RenderCommand, UiEvent, UiEventKind, View};
use crate::route::Route;
use crate::todo::{Todo, TodoId};
use serde::Serialize;
use tracing::trace;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 80;
pub const NEW_TODO_PLACEHOLDER: &str = "What needs to be done?";
const EDIT_MARKER: &str = "✎";

/// In-place edit input attached to a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditField {
    pub value: String,
    /// Set by Escape so the blur that follows does not commit the edit.
    pub canceled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub id: TodoId,
    pub title: String,
    pub completed: bool,
    pub edit: Option<EditField>,
}

impl From<Todo> for Row {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            completed: todo.completed,
            edit: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Screen {
    pub rows: Vec<Row>,
    pub item_counter: String,
    pub clear_completed_label: String,
    pub clear_completed_visible: bool,
    pub content_visible: bool,
    pub toggle_all_checked: bool,
    pub filter: Route,
    pub new_todo: String,
}

impl Screen {
    pub fn row(&self, id: TodoId) -> Option<&Row> {
        self.rows.iter().find(|r| r.id == id)
    }

    fn row_mut(&mut self, id: TodoId) -> Option<&mut Row> {
        self.rows.iter_mut().find(|r| r.id == id)
    }

    /// The row currently showing an edit field, if any.
    pub fn editing(&self) -> Option<&Row> {
        self.rows.iter().find(|r| r.edit.is_some())
    }
}

#[derive(Default)]
pub struct TerminalView {
    screen: Screen,
    bindings: Bindings,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    // --- Raw inputs ---

    /// The new-item input changed (typed text committed).
    pub fn enter_new_todo(&mut self, value: &str) {
        self.screen.new_todo = value.to_string();
        self.bindings.emit(UiEvent::NewTodo(value.to_string()));
    }

    pub fn click_clear_completed(&mut self) {
        self.bindings.emit(UiEvent::RemoveCompleted);
    }

    /// Flips the toggle-all checkbox and reports its new state.
    pub fn click_toggle_all(&mut self) {
        self.screen.toggle_all_checked = !self.screen.toggle_all_checked;
        let completed = self.screen.toggle_all_checked;
        self.bindings.emit(UiEvent::ToggleAll { completed });
    }

    pub fn double_click_label(&mut self, id: TodoId) -> bool {
        if self.screen.row(id).is_none() {
            return false;
        }
        self.bindings.emit(UiEvent::ItemEdit { id });
        true
    }

    pub fn click_destroy(&mut self, id: TodoId) -> bool {
        if self.screen.row(id).is_none() {
            return false;
        }
        self.bindings.emit(UiEvent::ItemRemove { id });
        true
    }

    /// Flips the row checkbox and reports its new state.
    pub fn click_toggle(&mut self, id: TodoId) -> bool {
        let Some(row) = self.screen.row_mut(id) else {
            return false;
        };
        row.completed = !row.completed;
        let completed = row.completed;
        self.bindings.emit(UiEvent::ItemToggle { id, completed });
        true
    }

    pub fn type_in_edit(&mut self, id: TodoId, value: &str) -> bool {
        match self.screen.row_mut(id).and_then(|r| r.edit.as_mut()) {
            Some(edit) => {
                edit.value = value.to_string();
                true
            }
            None => false,
        }
    }

    /// Enter in an edit field leaves it, like submitting a form.
    pub fn press_enter(&mut self, id: TodoId) -> bool {
        self.blur(id)
    }

    /// Focus left the edit field: commits unless the edit was canceled.
    pub fn blur(&mut self, id: TodoId) -> bool {
        let Some(edit) = self.screen.row(id).and_then(|r| r.edit.as_ref()) else {
            return false;
        };
        if !edit.canceled {
            let title = edit.value.clone();
            self.bindings.emit(UiEvent::ItemEditDone { id, title });
        }
        true
    }

    /// Escape marks the field canceled before blurring it, so only the cancel
    /// event reaches the controller.
    pub fn press_escape(&mut self, id: TodoId) -> bool {
        let Some(edit) = self.screen.row_mut(id).and_then(|r| r.edit.as_mut()) else {
            return false;
        };
        edit.canceled = true;
        self.blur(id);
        self.bindings.emit(UiEvent::ItemEditCancel { id });
        true
    }

    // --- Output ---

    /// Renders the screen for a terminal.
    pub fn present(&self, use_color: bool) -> String {
        render_page(&PageData::from_screen(&self.screen), use_color)
            .unwrap_or_else(|e| format!("Render error: {}\n", e))
    }
}

impl View for TerminalView {
    fn render(&mut self, command: RenderCommand) {
        trace!(command = command.name(), "render");
        let screen = &mut self.screen;
        match command {
            RenderCommand::ShowEntries(todos) => {
                screen.rows = todos.into_iter().map(Row::from).collect();
            }
            RenderCommand::RemoveItem(id) => {
                screen.rows.retain(|r| r.id != id);
            }
            RenderCommand::UpdateElementCount(active) => {
                screen.item_counter = item_counter(active);
            }
            RenderCommand::ClearCompletedButton { completed, visible } => {
                screen.clear_completed_label = clear_completed_label(completed);
                screen.clear_completed_visible = visible;
            }
            RenderCommand::ContentBlockVisibility { visible } => {
                screen.content_visible = visible;
            }
            RenderCommand::ToggleAll { checked } => {
                screen.toggle_all_checked = checked;
            }
            RenderCommand::SetFilter(route) => {
                screen.filter = route;
            }
            RenderCommand::ClearNewTodo => {
                screen.new_todo.clear();
            }
            RenderCommand::ElementComplete { id, completed } => {
                if let Some(row) = screen.row_mut(id) {
                    row.completed = completed;
                }
            }
            RenderCommand::EditItem { id, title } => {
                if let Some(row) = screen.row_mut(id) {
                    row.edit = Some(EditField {
                        value: title,
                        canceled: false,
                    });
                }
            }
            RenderCommand::EditItemDone { id, title } => {
                if let Some(row) = screen.row_mut(id) {
                    row.edit = None;
                    row.title = title;
                }
            }
        }
    }

    fn bind(&mut self, kind: UiEventKind) {
        self.bindings.bind(kind);
    }

    fn take_events(&mut self) -> Vec<UiEvent> {
        self.bindings.drain()
    }
}

// --- Template data ---

#[derive(Serialize)]
struct StyledText {
    text: String,
    style: &'static str,
}

#[derive(Serialize)]
struct ItemLine {
    checkbox: &'static str,
    id_label: String,
    text: String,
    style: &'static str,
}

#[derive(Serialize)]
struct FilterLink {
    label: &'static str,
    style: &'static str,
}

#[derive(Serialize)]
struct ClearCompleted {
    label: String,
    visible: bool,
}

#[derive(Serialize)]
struct PageData {
    header: &'static str,
    new_todo: StyledText,
    content_visible: bool,
    toggle_all: StyledText,
    items: Vec<ItemLine>,
    counter: String,
    filters: Vec<FilterLink>,
    clear_completed: ClearCompleted,
}

impl PageData {
    fn from_screen(screen: &Screen) -> Self {
        let new_todo = if screen.new_todo.is_empty() {
            StyledText {
                text: NEW_TODO_PLACEHOLDER.to_string(),
                style: names::PLACEHOLDER,
            }
        } else {
            StyledText {
                text: screen.new_todo.clone(),
                style: names::INPUT,
            }
        };

        let toggle_all = StyledText {
            text: format!(
                "{} Mark all as complete",
                checkbox(screen.toggle_all_checked)
            ),
            style: names::TOGGLE_ALL,
        };

        let filters = Route::all()
            .iter()
            .map(|route| FilterLink {
                label: route.label(),
                style: if *route == screen.filter {
                    names::FILTER_SELECTED
                } else {
                    names::FILTER
                },
            })
            .collect();

        Self {
            header: "todos",
            new_todo,
            content_visible: screen.content_visible,
            toggle_all,
            items: screen.rows.iter().map(item_line).collect(),
            counter: screen.item_counter.clone(),
            filters,
            clear_completed: ClearCompleted {
                label: screen.clear_completed_label.clone(),
                visible: screen.clear_completed_visible,
            },
        }
    }
}

fn checkbox(checked: bool) -> &'static str {
    if checked {
        "[x]"
    } else {
        "[ ]"
    }
}

fn item_line(row: &Row) -> ItemLine {
    let id_label = format!("#{}", row.id);
    // "  [x] #12 " precedes the text
    let prefix_width = 2 + 3 + 1 + id_label.width() + 1;
    let available = LINE_WIDTH.saturating_sub(prefix_width);

    let (text, style) = match &row.edit {
        Some(edit) => (
            format!("{} {}", EDIT_MARKER, edit.value),
            names::EDITING,
        ),
        None if row.completed => (row.title.clone(), names::ITEM_DONE),
        None => (row.title.clone(), names::ITEM_TITLE),
    };

    ItemLine {
        checkbox: checkbox(row.completed),
        id_label,
        text: truncate_to_width(&text, available),
        style,
    }
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(id: TodoId, title: &str, completed: bool) -> Todo {
        Todo {
            id,
            title: title.to_string(),
            completed,
        }
    }

    fn bound_view() -> TerminalView {
        let mut view = TerminalView::new();
        for kind in UiEventKind::all() {
            view.bind(*kind);
        }
        view
    }

    fn view_with(todos: Vec<Todo>) -> TerminalView {
        let mut view = bound_view();
        view.render(RenderCommand::ShowEntries(todos));
        view.render(RenderCommand::ContentBlockVisibility { visible: true });
        view
    }

    #[test]
    fn show_entries_replaces_rows() {
        let mut view = view_with(vec![todo(1, "a", false)]);
        view.render(RenderCommand::ShowEntries(vec![
            todo(2, "b", true),
            todo(3, "c", false),
        ]));
        let ids: Vec<_> = view.screen().rows.iter().map(|r| r.id).collect();
        assert_eq!(ids, [2, 3]);
    }

    #[test]
    fn commands_on_missing_rows_are_no_ops() {
        let mut view = view_with(vec![todo(1, "a", false)]);
        let before = view.screen().clone();

        view.render(RenderCommand::RemoveItem(9));
        view.render(RenderCommand::ElementComplete {
            id: 9,
            completed: true,
        });
        view.render(RenderCommand::EditItem {
            id: 9,
            title: "x".into(),
        });
        view.render(RenderCommand::EditItemDone {
            id: 9,
            title: "x".into(),
        });

        assert_eq!(view.screen(), &before);
    }

    #[test]
    fn edit_item_done_updates_title_and_closes_field() {
        let mut view = view_with(vec![todo(1, "a", false)]);
        view.render(RenderCommand::EditItem {
            id: 1,
            title: "a".into(),
        });
        assert!(view.screen().editing().is_some());

        view.render(RenderCommand::EditItemDone {
            id: 1,
            title: "renamed".into(),
        });
        let row = view.screen().row(1).unwrap();
        assert_eq!(row.title, "renamed");
        assert!(row.edit.is_none());
    }

    #[test]
    fn aggregate_commands_update_footer_state() {
        let mut view = bound_view();
        view.render(RenderCommand::UpdateElementCount(1));
        view.render(RenderCommand::ClearCompletedButton {
            completed: 2,
            visible: true,
        });
        view.render(RenderCommand::ToggleAll { checked: true });
        view.render(RenderCommand::SetFilter(Route::Completed));

        let screen = view.screen();
        assert_eq!(screen.item_counter, "1 item left");
        assert_eq!(screen.clear_completed_label, "Clear completed");
        assert!(screen.clear_completed_visible);
        assert!(screen.toggle_all_checked);
        assert_eq!(screen.filter, Route::Completed);
    }

    #[test]
    fn new_todo_input_is_cleared_on_command() {
        let mut view = bound_view();
        view.enter_new_todo("buy milk");
        assert_eq!(view.screen().new_todo, "buy milk");
        assert_eq!(view.take_events(), vec![UiEvent::NewTodo("buy milk".into())]);

        view.render(RenderCommand::ClearNewTodo);
        assert!(view.screen().new_todo.is_empty());
    }

    #[test]
    fn clicks_on_rows_emit_item_events() {
        let mut view = view_with(vec![todo(4, "a", false)]);
        assert!(view.click_toggle(4));
        assert!(view.double_click_label(4));
        assert!(view.click_destroy(4));
        assert!(!view.click_destroy(5));

        assert_eq!(
            view.take_events(),
            vec![
                UiEvent::ItemToggle {
                    id: 4,
                    completed: true
                },
                UiEvent::ItemEdit { id: 4 },
                UiEvent::ItemRemove { id: 4 },
            ]
        );
    }

    #[test]
    fn toggle_all_reports_new_checkbox_state() {
        let mut view = bound_view();
        view.click_toggle_all();
        view.click_toggle_all();
        assert_eq!(
            view.take_events(),
            vec![
                UiEvent::ToggleAll { completed: true },
                UiEvent::ToggleAll { completed: false }
            ]
        );
    }

    #[test]
    fn enter_commits_the_edit_value() {
        let mut view = view_with(vec![todo(2, "old", false)]);
        view.render(RenderCommand::EditItem {
            id: 2,
            title: "old".into(),
        });
        assert!(view.type_in_edit(2, "new"));
        assert!(view.press_enter(2));

        assert_eq!(
            view.take_events(),
            vec![UiEvent::ItemEditDone {
                id: 2,
                title: "new".into()
            }]
        );
    }

    #[test]
    fn escape_cancels_without_committing() {
        let mut view = view_with(vec![todo(2, "old", false)]);
        view.render(RenderCommand::EditItem {
            id: 2,
            title: "old".into(),
        });
        view.type_in_edit(2, "half typed");
        assert!(view.press_escape(2));

        assert_eq!(view.take_events(), vec![UiEvent::ItemEditCancel { id: 2 }]);

        // A late blur on the canceled field still does not commit
        view.blur(2);
        assert!(view.take_events().is_empty());
    }

    #[test]
    fn edit_inputs_need_an_open_field() {
        let mut view = view_with(vec![todo(2, "old", false)]);
        assert!(!view.type_in_edit(2, "x"));
        assert!(!view.press_enter(2));
        assert!(!view.press_escape(2));
        assert!(view.take_events().is_empty());
    }

    #[test]
    fn unbound_view_emits_nothing() {
        let mut view = TerminalView::new();
        view.render(RenderCommand::ShowEntries(vec![todo(1, "a", false)]));
        view.click_toggle(1);
        view.enter_new_todo("x");
        assert!(view.take_events().is_empty());
    }

    #[test]
    fn present_lists_rows_and_footer() {
        let mut view = view_with(vec![todo(0, "Buy milk", false), todo(1, "Walk dog", true)]);
        view.render(RenderCommand::UpdateElementCount(1));
        view.render(RenderCommand::ClearCompletedButton {
            completed: 1,
            visible: true,
        });
        view.render(RenderCommand::SetFilter(Route::All));

        let out = view.present(false);
        assert!(out.contains("  [ ] #0 Buy milk"));
        assert!(out.contains("  [x] #1 Walk dog"));
        assert!(out.contains("1 item left  All  Active  Completed  Clear completed"));
        assert!(out.contains(NEW_TODO_PLACEHOLDER));
        assert!(!out.contains("(!?)"));
    }

    #[test]
    fn present_hides_content_block() {
        let view = bound_view();
        let out = view.present(false);
        assert!(out.contains("Nothing to do."));
        assert!(!out.contains("Mark all as complete"));
    }

    #[test]
    fn present_shows_edit_value() {
        let mut view = view_with(vec![todo(3, "old", false)]);
        view.render(RenderCommand::EditItem {
            id: 3,
            title: "old".into(),
        });
        view.type_in_edit(3, "draft");
        assert!(view.present(false).contains("#3 ✎ draft"));
    }

    #[test]
    fn long_titles_are_truncated() {
        let title = "x".repeat(200);
        let line = item_line(&Row::from(todo(1, &title, false)));
        assert!(line.text.ends_with('…'));
        assert!(line.text.width() <= LINE_WIDTH);
    }
}
