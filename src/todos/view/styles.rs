//! Styles for the terminal view.
//!
//! Templates only refer to semantic style names (see [`names`]); the theme maps
//! each name to a `console::Style`. Swapping the look means editing this file
//! alone, never a template.
//!
//! When color is off the `style` filter returns text unchanged, but a name that
//! is missing from the theme is still flagged with [`MISSING_STYLE_INDICATOR`]
//! so template typos show up in plain output and in tests.

use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

pub const MISSING_STYLE_INDICATOR: &str = "(!?)";

/// Style identifiers shared between templates and renderers.
pub mod names {
    pub const HEADER: &str = "header";
    pub const PROMPT: &str = "prompt";
    pub const PLACEHOLDER: &str = "placeholder";
    pub const INPUT: &str = "input";
    pub const TOGGLE_ALL: &str = "toggle-all";
    pub const ITEM_ID: &str = "item-id";
    pub const ITEM_TITLE: &str = "item-title";
    pub const ITEM_DONE: &str = "item-done";
    pub const CHECKBOX: &str = "checkbox";
    pub const EDITING: &str = "editing";
    pub const COUNTER: &str = "counter";
    pub const FILTER: &str = "filter";
    pub const FILTER_SELECTED: &str = "filter-selected";
    pub const CLEAR_COMPLETED: &str = "clear-completed";
    pub const MUTED: &str = "muted";
}

/// A collection of named styles.
#[derive(Clone, Default)]
pub struct Theme {
    styles: HashMap<String, Style>,
}

impl Theme {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a named style, replacing any previous one with that name.
    pub fn add(mut self, name: &str, style: Style) -> Self {
        self.styles.insert(name.to_string(), style);
        self
    }

    pub fn has(&self, name: &str) -> bool {
        self.styles.contains_key(name)
    }

    /// Applies the named style. Unknown names get the missing-style indicator.
    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.apply_to(text).force_styling(true).to_string(),
            Some(_) => text.to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }
}

pub static TODOS_THEME: Lazy<Theme> = Lazy::new(|| {
    let muted = Style::new().color256(245);
    Theme::new()
        .add(names::HEADER, Style::new().red().bold())
        .add(names::PROMPT, Style::new().cyan().bold())
        .add(names::PLACEHOLDER, muted.clone().italic())
        .add(names::INPUT, Style::new())
        .add(names::TOGGLE_ALL, muted.clone())
        .add(names::ITEM_ID, Style::new().yellow())
        .add(names::ITEM_TITLE, Style::new())
        .add(names::ITEM_DONE, muted.clone().strikethrough())
        .add(names::CHECKBOX, Style::new().green())
        .add(names::EDITING, Style::new().black().on_yellow())
        .add(names::COUNTER, Style::new().bold())
        .add(names::FILTER, muted.clone())
        .add(names::FILTER_SELECTED, Style::new().underlined().bold())
        .add(names::CLEAR_COMPLETED, Style::new().magenta())
        .add(names::MUTED, muted)
});
