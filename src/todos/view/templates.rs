//! # Terminal Templates
//!
//! The page is rendered from minijinja templates kept as stand-alone files, so
//! they can be edited and diffed without touching code. They are included here
//! as string constants.
//!
//! Conventions:
//!
//! 1. Whitespace: `trim_blocks` and `lstrip_blocks` are on, so a line holding
//!    only a block tag produces no output. Every emitted line ends in a variable
//!    tag or literal text.
//! 2. Composition: the row layout lives in its own template (`item`) and is
//!    imported as a macro.
//! 3. Styles: templates never branch to pick a style. The renderer computes a
//!    style name and the template passes it to the `style` filter.
//!
//! The text snippets the page shows for counters and buttons are produced by
//! [`item_counter`] and [`clear_completed_label`].

use super::styles::TODOS_THEME;
use minijinja::{Environment, Error, Value};
use serde::Serialize;

pub const PAGE_TEMPLATE: &str = include_str!("templates/page.tmp");
pub const ITEM_TEMPLATE: &str = include_str!("templates/item.tmp");

/// Renders the page template with `data`, applying ANSI styles when `use_color` is set.
pub fn render_page<T: Serialize>(data: &T, use_color: bool) -> Result<String, Error> {
    let env = environment(use_color)?;
    env.get_template("page")?.render(data)
}

fn environment(use_color: bool) -> Result<Environment<'static>, Error> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);

    let theme = TODOS_THEME.clone();
    env.add_filter("style", move |value: Value, name: String| -> String {
        theme.apply(&name, &value.to_string(), use_color)
    });

    env.add_template("page", PAGE_TEMPLATE)?;
    env.add_template("item", ITEM_TEMPLATE)?;
    Ok(env)
}

/// `"1 item left"`, `"3 items left"`.
pub fn item_counter(active: usize) -> String {
    let plural = if active == 1 { "" } else { "s" };
    format!("{} item{} left", active, plural)
}

pub fn clear_completed_label(completed: usize) -> String {
    if completed > 0 {
        "Clear completed".to_string()
    } else {
        String::new()
    }
}
