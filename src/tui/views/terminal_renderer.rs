//! # Terminal Renderer
//!
//! Copies frames produced by `frame::render_frame` onto a `RenderStream`.
//! Every row of the screen is rewritten and padded on each render, so stale
//! text never survives a shorter frame.

use super::frame::{clip, render_frame, visible_width};
use crate::tui::formatter::ResponseFormatter;
use crate::tui::io::RenderStream;
use crate::tui::models::Model;
use anyhow::Result;

/// Trait for rendering views
pub trait ViewRenderer {
    /// Initialize the terminal for rendering
    fn initialize(&mut self) -> Result<()>;

    /// Render the full application state
    fn render_full(&mut self, model: &Model) -> Result<()>;

    /// Cleanup terminal on exit
    fn cleanup(&mut self) -> Result<()>;
}

/// Renderer over an injected render stream
pub struct TerminalRenderer<RS: RenderStream> {
    render_stream: RS,
    formatter: ResponseFormatter,
    terminal_size: (u16, u16),
    initialized: bool,
}

impl<RS: RenderStream> TerminalRenderer<RS> {
    /// Create a renderer; the terminal size is read from the stream
    pub fn with_render_stream(render_stream: RS) -> Result<Self> {
        let terminal_size = render_stream.get_size()?;
        Ok(Self {
            render_stream,
            formatter: ResponseFormatter::new(),
            terminal_size,
            initialized: false,
        })
    }

    pub fn update_size(&mut self, width: u16, height: u16) {
        self.terminal_size = (width, height);
    }

    pub fn terminal_size(&self) -> (u16, u16) {
        self.terminal_size
    }

    pub fn render_stream(&self) -> &RS {
        &self.render_stream
    }

    /// Clear and redraw, used after a resize
    pub fn redraw(&mut self, model: &Model) -> Result<()> {
        self.render_stream.clear_screen()?;
        self.render_full(model)
    }
}

impl<RS: RenderStream> ViewRenderer for TerminalRenderer<RS> {
    fn initialize(&mut self) -> Result<()> {
        self.render_stream.enable_raw_mode()?;
        self.render_stream.enter_alternate_screen()?;
        self.render_stream.enable_bracketed_paste()?;
        self.render_stream.hide_cursor()?;
        self.render_stream.clear_screen()?;
        self.initialized = true;
        tracing::debug!("Terminal initialized at {:?}", self.terminal_size);
        Ok(())
    }

    fn render_full(&mut self, model: &Model) -> Result<()> {
        let (width, height) = self.terminal_size;
        let width = width as usize;
        let lines = render_frame(model, &self.formatter);

        for row in 0..height {
            self.render_stream.move_cursor(0, row)?;
            let line = lines
                .get(row as usize)
                .map(|line| clip(line, width))
                .unwrap_or_default();
            let padding = width.saturating_sub(visible_width(&line));
            write!(self.render_stream, "{line}{}", " ".repeat(padding))?;
        }

        if lines.len() > height as usize {
            tracing::debug!(
                "Frame clipped: {} lines for {} rows",
                lines.len(),
                height
            );
        }

        self.render_stream.flush()?;
        Ok(())
    }

    fn cleanup(&mut self) -> Result<()> {
        if !self.initialized {
            return Ok(());
        }
        self.render_stream.show_cursor()?;
        self.render_stream.disable_bracketed_paste()?;
        self.render_stream.leave_alternate_screen()?;
        self.render_stream.disable_raw_mode()?;
        self.initialized = false;
        Ok(())
    }
}
