//! # Todos CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, and this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (src/todos/cli/)                                 │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Subcommands as raw view inputs (commands.rs)             │
//! │  - Interactive session (shell.rs)                           │
//! │  - tracing subscriber (logging.rs)                          │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Library (src/todos/lib.rs)                                 │
//! │  - TerminalView → Controller → Model → LocalStore           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Errors from any layer surface here as `Error: <message>` and exit code 1.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
