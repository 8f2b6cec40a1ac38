//! # Interactive Form
//!
//! The terminal UI: a three-field request form (URL, method, body) above a
//! response panel.
//!
//! ```text
//! ┌──────────────┐  AppEvent   ┌──────────────┐   Effect   ┌──────────────┐
//! │  Controller  │────────────►│ StateMachine │───────────►│ HttpService  │
//! │ - Event loop │             │ - update()   │            │ - spawn      │
//! │ - Rendering  │◄────────────│   (pure)     │            │ - Completion │
//! └──────────────┘    Model    └──────────────┘            └──────────────┘
//!        ▲                                                        │
//!        └────────────────────── Completion ──────────────────────┘
//! ```
//!
//! Only the controller mutates the model, and only by feeding events through
//! `StateMachine::update`. HTTP work runs on a tokio task and comes back as a
//! `Completion` event.

pub mod commands;
pub mod controllers;
pub mod events;
pub mod formatter;
pub mod io;
pub mod models;
pub mod services;
pub mod update;
pub mod views;

pub use commands::{Action, Command, CommandRegistry};
pub use controllers::AppController;
pub use events::{AppEvent, Completion};
pub use formatter::ResponseFormatter;
pub use models::{Field, InputFieldSet, Model};
pub use services::{HttpMethod, HttpService, RequestDispatcher, RequestSpec};
pub use update::{Effect, StateMachine};
