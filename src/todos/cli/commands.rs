//! # CLI Layer
//!
//! One invocation is one short session with the terminal view:
//!
//! 1. Open the list and show the requested route (`--route`, or the filter
//!    given to `list`).
//! 2. Translate the subcommand into raw inputs on the view (a click, typing
//!    and Enter), exactly as a user would produce them.
//! 3. Let the controller handle the resulting events, then print the screen.
//!
//! Ids refer to rows on screen. Acting on a todo that the current route does
//! not show is an error, like clicking something that is not there.

use super::logging::{init_subscriber, Verbosity};
use super::setup::{
    print_grouped_help, print_subcommand_help, to_fragment, Cli, Commands, ItemCommands,
    ListCommands, MiscCommands,
};
use super::shell::run_shell;
use clap::Parser;
use std::io::IsTerminal;
use std::path::Path;
use todos::config::TodosConfig;
use todos::error::{Result, TodoError};
use todos::init::{initialize, resolve_data_dir, TodoApp};
use todos::route::Route;
use todos::todo::TodoId;

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    if cli.help {
        if cli.command.is_none() {
            print_grouped_help();
        } else {
            print_subcommand_help(&cli.command);
        }
        return Ok(());
    }

    init_subscriber(Verbosity::from_flags(cli.verbose, cli.quiet), cli.no_color);

    let data_dir = resolve_data_dir()?;

    // Config works without opening a list
    if let Some(Commands::Misc(MiscCommands::Config { key, value })) = &cli.command {
        return handle_config(&data_dir, key.as_deref(), value.as_deref());
    }

    let ctx = initialize(&data_dir, cli.list.as_deref())?;
    let mut app = ctx.app;
    let use_color = !cli.no_color && ctx.config.color.use_color(std::io::stdout().is_terminal());

    let fragment = match &cli.command {
        Some(Commands::List(ListCommands::List {
            filter: Some(filter),
        })) => Route::from(*filter).fragment(),
        _ => cli.route.as_deref().map(to_fragment).unwrap_or_default(),
    };
    app.set_view(&fragment)?;

    match cli.command {
        None | Some(Commands::List(ListCommands::List { .. })) => {}
        Some(Commands::List(cmd)) => match cmd {
            ListCommands::Add { title } => {
                app.view_mut().enter_new_todo(&title.join(" "));
            }
            ListCommands::ToggleAll => app.view_mut().click_toggle_all(),
            ListCommands::Clear => app.view_mut().click_clear_completed(),
            ListCommands::Shell => {
                let stdin = std::io::stdin();
                let mut stdout = std::io::stdout();
                return run_shell(&mut app, stdin.lock(), &mut stdout, use_color);
            }
            ListCommands::List { .. } => {}
        },
        Some(Commands::Item(cmd)) => match cmd {
            ItemCommands::Toggle { id } => {
                let hit = app.view_mut().click_toggle(id);
                require_on_screen(&app, id, hit)?;
            }
            ItemCommands::Rm { id } => {
                let hit = app.view_mut().click_destroy(id);
                require_on_screen(&app, id, hit)?;
            }
            ItemCommands::Edit { id, title } => handle_edit(&mut app, id, &title.join(" "))?,
        },
        Some(Commands::Misc(cmd)) => match cmd {
            MiscCommands::Reset => app.reset()?,
            MiscCommands::Config { .. } => {}
        },
    }

    app.pump()?;
    print!("{}", app.view().present(use_color));
    Ok(())
}

/// Double-click, type, Enter. An empty title removes the todo.
fn handle_edit(app: &mut TodoApp, id: TodoId, title: &str) -> Result<()> {
    let hit = app.view_mut().double_click_label(id);
    require_on_screen(app, id, hit)?;
    app.pump()?;

    let view = app.view_mut();
    view.type_in_edit(id, title);
    view.press_enter(id);
    Ok(())
}

fn require_on_screen(app: &TodoApp, id: TodoId, hit: bool) -> Result<()> {
    if hit {
        return Ok(());
    }
    let route = app.active_route().unwrap_or_default();
    Err(TodoError::Api(format!(
        "Todo #{} is not shown in {} ({})",
        id,
        route.label(),
        route
    )))
}

fn handle_config(data_dir: &Path, key: Option<&str>, value: Option<&str>) -> Result<()> {
    let mut config = TodosConfig::load(data_dir)?;
    match (key, value) {
        (None, _) => {
            for key in TodosConfig::KEYS {
                println!("{} = {}", key, config.get(key)?);
            }
        }
        (Some(key), None) => println!("{}", config.get(key)?),
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save(data_dir)?;
            println!("{} = {}", key, config.get(key)?);
        }
    }
    Ok(())
}
