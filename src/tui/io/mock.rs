//! # Mock I/O Implementations for Testing
//!
//! Scripted input and recorded output, so the event loop can run without a
//! terminal.

use super::{EventStream, RenderStream, TerminalSize};
use anyhow::Result;
use crossterm::event::Event;
use std::collections::VecDeque;
use std::io::Write;
use std::time::Duration;

/// Pre-programmed events consumed in order
pub struct MockEventStream {
    events: VecDeque<Event>,
}

impl MockEventStream {
    pub fn new(events: Vec<Event>) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    pub fn push_event(&mut self, event: Event) {
        self.events.push_back(event);
    }

    pub fn remaining(&self) -> usize {
        self.events.len()
    }
}

impl EventStream for MockEventStream {
    fn poll(&mut self, _timeout: Duration) -> Result<bool> {
        Ok(!self.events.is_empty())
    }

    fn read(&mut self) -> Result<Event> {
        self.events
            .pop_front()
            .ok_or_else(|| anyhow::anyhow!("No events available"))
    }
}

/// Recorded render command for verification
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    ClearScreen,
    MoveCursor(u16, u16),
    HideCursor,
    ShowCursor,
    EnterAlternateScreen,
    LeaveAlternateScreen,
    EnableRawMode,
    DisableRawMode,
    EnableBracketedPaste,
    DisableBracketedPaste,
    Write(Vec<u8>),
    Flush,
}

/// Records every rendering command and the text of the latest frame
pub struct MockRenderStream {
    commands: Vec<RenderCommand>,
    frame: Vec<u8>,
    terminal_size: TerminalSize,
    raw_mode: bool,
    alternate_screen: bool,
}

impl MockRenderStream {
    pub fn new() -> Self {
        Self::with_size((80, 24))
    }

    pub fn with_size(size: TerminalSize) -> Self {
        Self {
            commands: Vec::new(),
            frame: Vec::new(),
            terminal_size: size,
            raw_mode: false,
            alternate_screen: false,
        }
    }

    pub fn get_commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn has_command(&self, command: &RenderCommand) -> bool {
        self.commands.contains(command)
    }

    /// Text written since the cursor last moved to the top-left corner
    pub fn current_frame(&self) -> String {
        String::from_utf8_lossy(&self.frame).to_string()
    }

    pub fn is_raw_mode(&self) -> bool {
        self.raw_mode
    }

    pub fn is_alternate_screen(&self) -> bool {
        self.alternate_screen
    }
}

impl Default for MockRenderStream {
    fn default() -> Self {
        Self::new()
    }
}

impl Write for MockRenderStream {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.frame.extend_from_slice(buf);
        self.commands.push(RenderCommand::Write(buf.to_vec()));
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.commands.push(RenderCommand::Flush);
        Ok(())
    }
}

impl RenderStream for MockRenderStream {
    fn clear_screen(&mut self) -> Result<()> {
        self.commands.push(RenderCommand::ClearScreen);
        self.frame.clear();
        Ok(())
    }

    fn move_cursor(&mut self, x: u16, y: u16) -> Result<()> {
        if (x, y) == (0, 0) {
            self.frame.clear();
        } else {
            self.frame.push(b'\n');
        }
        self.commands.push(RenderCommand::MoveCursor(x, y));
        Ok(())
    }

    fn hide_cursor(&mut self) -> Result<()> {
        self.commands.push(RenderCommand::HideCursor);
        Ok(())
    }

    fn show_cursor(&mut self) -> Result<()> {
        self.commands.push(RenderCommand::ShowCursor);
        Ok(())
    }

    fn get_size(&self) -> Result<TerminalSize> {
        Ok(self.terminal_size)
    }

    fn enter_alternate_screen(&mut self) -> Result<()> {
        self.commands.push(RenderCommand::EnterAlternateScreen);
        self.alternate_screen = true;
        Ok(())
    }

    fn leave_alternate_screen(&mut self) -> Result<()> {
        self.commands.push(RenderCommand::LeaveAlternateScreen);
        self.alternate_screen = false;
        Ok(())
    }

    fn enable_raw_mode(&mut self) -> Result<()> {
        self.commands.push(RenderCommand::EnableRawMode);
        self.raw_mode = true;
        Ok(())
    }

    fn disable_raw_mode(&mut self) -> Result<()> {
        self.commands.push(RenderCommand::DisableRawMode);
        self.raw_mode = false;
        Ok(())
    }

    fn enable_bracketed_paste(&mut self) -> Result<()> {
        self.commands.push(RenderCommand::EnableBracketedPaste);
        Ok(())
    }

    fn disable_bracketed_paste(&mut self) -> Result<()> {
        self.commands.push(RenderCommand::DisableBracketedPaste);
        Ok(())
    }
}
