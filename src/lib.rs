//! # apiterm - Terminal API Client
//!
//! A small interactive form for firing GET and POST requests at an HTTP API
//! and reading the JSON that comes back, highlighted, without leaving the
//! terminal. The same request path is available non-interactively through the
//! `get` and `post` subcommands.

pub mod cmd_args;
pub mod config;
pub mod logging;
pub mod oneshot;
pub mod tui;

pub use tui::*;
