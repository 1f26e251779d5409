//! # CLI Behavior
//!
//! This is **one possible UI client** for the todos core. It is the only place
//! that knows about stdout, stderr and exit codes.
//!
//! ## Naked Execution (`todos`)
//!
//! Running `todos` with no arguments shows the list, like `todos list`.
//!
//! ## Routes
//!
//! `--route` takes a navigation fragment (`#/`, `#/active`, `#/completed`) or
//! a bare name (`active`). Unknown routes show everything.
//!
//! ## Module Structure
//!
//! - `commands`: `run()`, turning subcommands into view inputs
//! - `setup`: Argument parsing via clap, grouped help
//! - `shell`: Interactive line-based session
//! - `logging`: tracing subscriber setup

mod commands;
mod logging;
pub mod setup;
mod shell;

pub use commands::run;
