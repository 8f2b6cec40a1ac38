//! # Controllers Module
//!
//! The controller owns the model and runs the event loop.

pub mod app_controller;

pub use app_controller::AppController;
