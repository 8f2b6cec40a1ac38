//! # Terminal I/O
//!
//! crossterm-backed streams. Drawing commands and text are queued on the
//! writer and reach the terminal on `flush`; mode switches (raw mode,
//! alternate screen, bracketed paste) take effect immediately.

use super::{EventStream, RenderStream, TerminalSize};
use anyhow::Result;
use crossterm::event::{self, DisableBracketedPaste, EnableBracketedPaste, Event};
use crossterm::style::Print;
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, Command, ExecutableCommand, QueueableCommand};
use std::io::{self, Write};
use std::time::Duration;

/// Keyboard, paste and resize events from the real terminal
#[derive(Debug, Default)]
pub struct TerminalEventStream;

impl TerminalEventStream {
    pub fn new() -> Self {
        Self
    }
}

impl EventStream for TerminalEventStream {
    fn poll(&mut self, timeout: Duration) -> Result<bool> {
        Ok(event::poll(timeout)?)
    }

    fn read(&mut self) -> Result<Event> {
        Ok(event::read()?)
    }
}

/// Output side of the terminal, stdout in production
pub struct TerminalRenderStream<W: Write> {
    writer: W,
}

impl TerminalRenderStream<io::Stdout> {
    pub fn new() -> Self {
        Self::with_writer(io::stdout())
    }
}

impl Default for TerminalRenderStream<io::Stdout> {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> TerminalRenderStream<W> {
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Queue a drawing command until the next flush
    fn queue(&mut self, command: impl Command) -> Result<()> {
        self.writer.queue(command)?;
        Ok(())
    }

    /// Send a mode switch straight away
    fn switch(&mut self, command: impl Command) -> Result<()> {
        self.writer.execute(command)?;
        Ok(())
    }
}

impl<W: Write> Write for TerminalRenderStream<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match std::str::from_utf8(buf) {
            Ok(text) => {
                self.writer.queue(Print(text))?;
                Ok(buf.len())
            }
            Err(_) => self.writer.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

impl<W: Write + Send> RenderStream for TerminalRenderStream<W> {
    fn clear_screen(&mut self) -> Result<()> {
        self.queue(terminal::Clear(ClearType::All))
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        self.queue(cursor::MoveTo(x, y))
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.switch(cursor::Hide)
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.switch(cursor::Show)
    }

    fn get_size(&self) -> Result<TerminalSize> {
        Ok(terminal::size()?)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        self.switch(EnterAlternateScreen)
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        self.switch(LeaveAlternateScreen)
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        Ok(terminal::enable_raw_mode()?)
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        Ok(terminal::disable_raw_mode()?)
    }

    fn enable_bracketed_paste(&mut self) -> Result<()> {
        self.switch(EnableBracketedPaste)
    }

    fn disable_bracketed_paste(&mut self) -> Result<()> {
        self.switch(DisableBracketedPaste)
    }
}
