//! # I/O Abstraction Layer
//!
//! Trait abstractions for terminal input and output so the event loop can be
//! driven by a real terminal or by scripted events in tests.
//!
//! ```text
//! Production:  AppController ──▶ TerminalEventStream ──▶ crossterm::event::read()
//!                            ──▶ TerminalRenderStream ──▶ crossterm::execute!()
//!
//! Testing:     AppController ──▶ MockEventStream     ──▶ VecDeque<Event>
//!                            ──▶ MockRenderStream    ──▶ Vec<RenderCommand>
//! ```

use anyhow::Result;
use crossterm::event::Event;
use std::io::Write;
use std::time::Duration;

pub mod mock;
pub mod terminal;

pub use mock::{MockEventStream, MockRenderStream, RenderCommand};
pub use terminal::{TerminalEventStream, TerminalRenderStream};

/// Type alias for terminal size (width, height)
pub type TerminalSize = (u16, u16);

/// Input event stream abstraction
pub trait EventStream: Send {
    /// Check if events are available, waiting at most `timeout`.
    /// This is equivalent to crossterm::event::poll().
    fn poll(&mut self, timeout: Duration) -> Result<bool>;

    /// Read the next available event. Only call after `poll` returned true.
    fn read(&mut self) -> Result<Event>;
}

/// Output render stream abstraction
pub trait RenderStream: Write + Send {
    /// Clear the entire screen
    fn clear_screen(&mut self) -> Result<()>;

    /// Move cursor to specific position (column, row)
    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()>;

    fn hide_cursor(&mut self) -> Result<()>;

    fn show_cursor(&mut self) -> Result<()>;

    /// Get terminal size as (width, height)
    fn get_size(&self) -> Result<TerminalSize>;

    fn enter_alternate_screen(&mut self) -> Result<()>;

    fn leave_alternate_screen(&mut self) -> Result<()>;

    fn enable_raw_mode(&mut self) -> Result<()>;

    fn disable_raw_mode(&mut self) -> Result<()>;

    /// Ask the terminal to deliver pastes as a single event
    fn enable_bracketed_paste(&mut self) -> Result<()>;

    fn disable_bracketed_paste(&mut self) -> Result<()>;
}
