//! Step definitions for Cucumber tests
//!
//! - `form` - opening the form, keyboard input, focus and screen checks
//! - `http` - mock server setup and request/response checks

pub mod form;
pub mod http;
