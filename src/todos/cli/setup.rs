use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use todos::route::Route;
use todos::todo::TodoId;

/// Returns the version string, including git hash and commit date for non-release builds.
/// Format: "0.3.2" for releases, "0.3.2@abc1234 2024-01-15 14:30" for dev builds
fn get_version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("GIT_HASH");
    const GIT_COMMIT_DATE: &str = env!("GIT_COMMIT_DATE");
    const IS_RELEASE: &str = env!("IS_RELEASE");

    use std::sync::OnceLock;
    static VERSION_STRING: OnceLock<String> = OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" || GIT_HASH.is_empty() {
            VERSION.to_string()
        } else {
            format!("{}@{} {}", VERSION, GIT_HASH, GIT_COMMIT_DATE)
        }
    })
}

#[derive(Parser, Debug)]
#[command(
    name = "todos",
    bin_name = "todos",
    version = get_version(),
    disable_help_flag = true,
    disable_help_subcommand = true
)]
#[command(about = "A route-filtered to-do list for the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// List to operate on (defaults to the configured collection)
    #[arg(short, long, global = true, help_heading = "Options")]
    pub list: Option<String>,

    /// Route to show, e.g. "#/active" or "completed"
    #[arg(short, long, global = true, help_heading = "Options")]
    pub route: Option<String>,

    /// Disable colored output
    #[arg(long, global = true, help_heading = "Options")]
    pub no_color: bool,

    /// Verbose logging
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, global = true, help_heading = "Options")]
    pub quiet: bool,

    /// Print help
    #[arg(short, long, global = true)]
    pub help: bool,
}

/// Filter accepted by `todos list`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FilterArg {
    All,
    Active,
    Completed,
}

impl From<FilterArg> for Route {
    fn from(filter: FilterArg) -> Self {
        match filter {
            FilterArg::All => Route::All,
            FilterArg::Active => Route::Active,
            FilterArg::Completed => Route::Completed,
        }
    }
}

/// Turns `--route` input into a navigation fragment. Bare names get the `#/` prefix.
pub fn to_fragment(raw: &str) -> String {
    if raw.starts_with('#') || raw.is_empty() {
        raw.to_string()
    } else {
        format!("#/{}", raw.trim_start_matches('/'))
    }
}

/// Command group definitions for help output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandGroup {
    List,
    Item,
    Misc,
}

impl CommandGroup {
    pub fn heading(&self) -> &'static str {
        match self {
            CommandGroup::List => "List Commands:",
            CommandGroup::Item => "Per-Item Commands:",
            CommandGroup::Misc => "Miscellaneous:",
        }
    }

    pub fn for_command(name: &str) -> Option<Self> {
        match name {
            "list" | "add" | "toggle-all" | "clear" | "shell" => Some(CommandGroup::List),
            "toggle" | "edit" | "rm" => Some(CommandGroup::Item),
            "reset" | "config" => Some(CommandGroup::Misc),
            _ => None,
        }
    }

    pub fn all() -> &'static [CommandGroup] {
        &[CommandGroup::List, CommandGroup::Item, CommandGroup::Misc]
    }
}

pub fn get_grouped_help() -> String {
    let cmd = Cli::command();
    let version = cmd.get_version().unwrap_or("unknown");

    let mut output = String::new();
    output.push_str(&format!("todos {version}\n"));
    output.push_str("A route-filtered to-do list for the terminal\n");
    output.push('\n');
    output.push_str("Usage: todos [OPTIONS] [COMMAND]\n");

    let subcommands: Vec<_> = cmd.get_subcommands().collect();

    for group in CommandGroup::all() {
        let group_cmds: Vec<_> = subcommands
            .iter()
            .filter(|sc| {
                !sc.is_hide_set() && CommandGroup::for_command(sc.get_name()) == Some(*group)
            })
            .collect();

        if !group_cmds.is_empty() {
            output.push('\n');
            output.push_str(&format!("{}\n", group.heading()));
            for sc in group_cmds {
                let name = sc.get_name();
                let about = sc.get_about().map(|s| s.to_string()).unwrap_or_default();
                output.push_str(&format!("  {:<12} {}\n", name, about));
            }
        }
    }

    output.push('\n');
    output.push_str("Options:\n");
    output.push_str("  -l, --list <NAME>    List to operate on\n");
    output.push_str("  -r, --route <ROUTE>  Route to show (#/, #/active, #/completed)\n");
    output.push_str("      --no-color       Disable colored output\n");
    output.push_str("  -v, --verbose        Verbose logging\n");
    output.push_str("  -q, --quiet          Only log errors\n");
    output.push_str("  -h, --help           Print help\n");
    output.push_str("  -V, --version        Print version\n");

    output
}

pub fn print_grouped_help() {
    print!("{}", get_grouped_help());
}

/// Prints help for a specific subcommand using clap's built-in rendering
pub fn print_subcommand_help(command: &Option<Commands>) {
    let name = match command {
        Some(Commands::List(c)) => match c {
            ListCommands::List { .. } => "list",
            ListCommands::Add { .. } => "add",
            ListCommands::ToggleAll => "toggle-all",
            ListCommands::Clear => "clear",
            ListCommands::Shell => "shell",
        },
        Some(Commands::Item(c)) => match c {
            ItemCommands::Toggle { .. } => "toggle",
            ItemCommands::Edit { .. } => "edit",
            ItemCommands::Rm { .. } => "rm",
        },
        Some(Commands::Misc(c)) => match c {
            MiscCommands::Reset => "reset",
            MiscCommands::Config { .. } => "config",
        },
        None => {
            print_grouped_help();
            return;
        }
    };

    let mut cmd = Cli::command();
    for subcmd in cmd.get_subcommands_mut() {
        if subcmd.get_name() == name {
            print!("{}", subcmd.render_help());
            return;
        }
    }
    print_grouped_help();
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    List(ListCommands),

    #[command(flatten)]
    Item(ItemCommands),

    #[command(flatten)]
    Misc(MiscCommands),
}

#[derive(Subcommand, Debug)]
pub enum ListCommands {
    /// Show the list
    #[command(alias = "ls", display_order = 1)]
    List {
        /// Which todos to show (overrides --route)
        #[arg(value_enum)]
        filter: Option<FilterArg>,
    },

    /// Add a todo
    #[command(alias = "a", display_order = 2)]
    Add {
        /// Title words (joined with spaces)
        #[arg(trailing_var_arg = true, num_args = 0..)]
        title: Vec<String>,
    },

    /// Mark every todo completed, or every todo active if all are completed
    #[command(display_order = 3)]
    ToggleAll,

    /// Remove completed todos
    #[command(display_order = 4)]
    Clear,

    /// Interactive session
    #[command(alias = "sh", display_order = 5)]
    Shell,
}

#[derive(Subcommand, Debug)]
pub enum ItemCommands {
    /// Flip a todo between active and completed
    #[command(alias = "t", display_order = 10)]
    Toggle {
        /// Id of the todo
        id: TodoId,
    },

    /// Rename a todo (an empty title removes it)
    #[command(alias = "e", display_order = 11)]
    Edit {
        /// Id of the todo
        id: TodoId,

        /// New title words (joined with spaces)
        #[arg(trailing_var_arg = true, num_args = 0..)]
        title: Vec<String>,
    },

    /// Remove a todo
    #[command(alias = "remove", display_order = 12)]
    Rm {
        /// Id of the todo
        id: TodoId,
    },
}

#[derive(Subcommand, Debug)]
pub enum MiscCommands {
    /// Remove every todo and restart ids at 0
    #[command(display_order = 30)]
    Reset,

    /// Get or set configuration
    #[command(display_order = 31)]
    Config {
        /// Configuration key (collection, color)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
