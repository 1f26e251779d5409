//! # Todos Architecture
//!
//! Todos is a small to-do list core built as Model / View / Controller over an
//! injected storage service. The terminal front end in `cli/` is one client of
//! it; nothing below the controller knows about a terminal.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI (cli/, wired by main.rs)                               │
//! │  - Parses arguments, turns them into raw view inputs        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌──────────────────────────┐      ┌──────────────────────────┐
//! │  View (view/)            │ ◀──▶ │  Controller              │
//! │  - render(RenderCommand) │      │  - routes, event handlers│
//! │  - bind(UiEventKind)     │      │  - no state but a route  │
//! └──────────────────────────┘      └──────────────────────────┘
//!                                                │
//!                                                ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Model (model.rs)                                           │
//! │  - create/read/update/remove/count over the store           │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage (store/)                                           │
//! │  - DataStore trait, LocalStore over a key/value backend     │
//! │  - FsBackend (production), MemBackend (testing)             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Control flow
//!
//! 1. A route is shown with [`controller::Controller::set_view`]
//!    (`""`, `"#/active"`, `"#/completed"`).
//! 2. Raw input on the view (a click, Enter, Escape) becomes a
//!    [`view::UiEvent`], queued only if the controller bound its kind.
//! 3. [`controller::Controller::pump`] hands queued events to the handlers,
//!    which call the model and answer with [`view::RenderCommand`]s.
//!
//! Every step is synchronous: a handler's store calls and renders finish, in
//! order, before the next event runs.
//!
//! ## Module Overview
//!
//! - [`controller`]: Route handling and event handlers
//! - [`model`]: Domain operations over a store
//! - [`store`]: Storage service contract and implementations
//! - [`view`]: Render/event contract, terminal view, templates, styles
//! - [`todo`]: Record, patch, query and count types
//! - [`route`]: Filter routes and fragment parsing
//! - [`config`]: Configuration management
//! - [`init`]: Bootstrap wiring for the binary
//! - [`error`]: Error types
//! - `cli`: Argument parsing, shell loop and logging setup for the binary (not part of the lib API)

pub mod config;
pub mod controller;
pub mod error;
pub mod init;
pub mod model;
pub mod route;
pub mod store;
pub mod todo;
pub mod view;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
