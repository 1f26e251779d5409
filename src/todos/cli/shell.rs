//! Interactive session.
//!
//! Each line is one user action on the terminal view. Lines starting with `#`
//! are navigation (the equivalent of a hash change). While a row is in edit
//! mode every line is the new title, except `:esc`, which cancels.

use super::setup::to_fragment;
use std::io::{BufRead, Write};
use todos::controller::Controller;
use todos::error::Result;
use todos::store::DataStore;
use todos::todo::TodoId;
use todos::view::terminal::TerminalView;

const HELP: &str = "\
Commands:
  add <title>      add a todo (also: a)
  toggle <id>      flip a todo (also: t)
  toggle-all       flip every todo
  rm <id>          remove a todo
  clear            remove completed todos
  edit <id>        start editing a title (also: e); then type the new title,
                   or :esc to cancel
  route <name>     show all, active or completed
  #/<route>        same as route
  help             this text
  quit             leave (also: exit, :q)
";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellInput {
    Navigate(String),
    Add(String),
    Toggle(TodoId),
    ToggleAll,
    Remove(TodoId),
    ClearCompleted,
    Edit(TodoId),
    EditValue(String),
    CancelEdit,
    Help,
    Redraw,
    Quit,
    Invalid(String),
}

pub fn parse_shell_line(line: &str, editing: bool) -> ShellInput {
    let line = line.trim_end_matches(['\r', '\n']);
    if editing {
        return match line.trim() {
            ":esc" => ShellInput::CancelEdit,
            _ => ShellInput::EditValue(line.to_string()),
        };
    }

    let line = line.trim();
    if line.is_empty() {
        return ShellInput::Redraw;
    }
    if line.starts_with('#') {
        return ShellInput::Navigate(line.to_string());
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "add" | "a" => ShellInput::Add(rest.to_string()),
        "toggle" | "t" => with_id(rest, ShellInput::Toggle),
        "toggle-all" => ShellInput::ToggleAll,
        "rm" => with_id(rest, ShellInput::Remove),
        "clear" => ShellInput::ClearCompleted,
        "edit" | "e" => with_id(rest, ShellInput::Edit),
        "route" => ShellInput::Navigate(to_fragment(rest)),
        "help" | "?" => ShellInput::Help,
        "quit" | "exit" | ":q" => ShellInput::Quit,
        other => ShellInput::Invalid(format!("Unknown command: {}", other)),
    }
}

fn with_id(arg: &str, make: fn(TodoId) -> ShellInput) -> ShellInput {
    match arg.parse::<TodoId>() {
        Ok(id) => make(id),
        Err(_) => ShellInput::Invalid(format!("Expected a todo id, got {:?}", arg)),
    }
}

/// Runs the session until `quit` or end of input.
pub fn run_shell<S, R, W>(
    app: &mut Controller<S, TerminalView>,
    input: R,
    out: &mut W,
    use_color: bool,
) -> Result<()>
where
    S: DataStore,
    R: BufRead,
    W: Write,
{
    write!(out, "{}", app.view().present(use_color))?;
    prompt(app, out)?;

    for line in input.lines() {
        let line = line?;
        let editing = app.view().screen().editing().map(|row| row.id);

        match parse_shell_line(&line, editing.is_some()) {
            ShellInput::Quit => break,
            ShellInput::Help => write!(out, "{}", HELP)?,
            ShellInput::Invalid(message) => writeln!(out, "{}", message)?,
            input => {
                apply(app, input, editing, out)?;
                app.pump()?;
                write!(out, "{}", app.view().present(use_color))?;
            }
        }
        prompt(app, out)?;
    }

    writeln!(out)?;
    Ok(())
}

fn apply<S: DataStore, W: Write>(
    app: &mut Controller<S, TerminalView>,
    input: ShellInput,
    editing: Option<TodoId>,
    out: &mut W,
) -> Result<()> {
    if let ShellInput::Navigate(fragment) = &input {
        return app.set_view(fragment);
    }

    let view = app.view_mut();
    let hit = match input {
        ShellInput::Add(title) => {
            view.enter_new_todo(&title);
            true
        }
        ShellInput::Toggle(id) => view.click_toggle(id),
        ShellInput::ToggleAll => {
            view.click_toggle_all();
            true
        }
        ShellInput::Remove(id) => view.click_destroy(id),
        ShellInput::ClearCompleted => {
            view.click_clear_completed();
            true
        }
        ShellInput::Edit(id) => view.double_click_label(id),
        ShellInput::EditValue(value) => match editing {
            Some(id) => view.type_in_edit(id, &value) && view.press_enter(id),
            None => false,
        },
        ShellInput::CancelEdit => match editing {
            Some(id) => view.press_escape(id),
            None => false,
        },
        ShellInput::Navigate(_)
        | ShellInput::Help
        | ShellInput::Redraw
        | ShellInput::Quit
        | ShellInput::Invalid(_) => true,
    };
    if !hit {
        writeln!(out, "That todo is not on screen.")?;
    }
    Ok(())
}

fn prompt<S: DataStore, W: Write>(app: &Controller<S, TerminalView>, out: &mut W) -> Result<()> {
    match app.view().screen().editing() {
        Some(row) => write!(out, "edit #{}> ", row.id)?,
        None => write!(out, "> ")?,
    }
    out.flush()?;
    Ok(())
}
