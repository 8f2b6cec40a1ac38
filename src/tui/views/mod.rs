//! # Views Module
//!
//! Frame layout and terminal output.

pub mod ansi_escape_codes;
pub mod frame;
pub mod terminal_renderer;

// Re-export main types for convenience
pub use frame::render_frame;
pub use terminal_renderer::{TerminalRenderer, ViewRenderer};
