//! Single-line text input field
//!
//! A `Field` owns its value, cursor, placeholder and focus flag. Cursor
//! positions are counted in characters, never bytes.

use crate::tui::views::ansi_escape_codes::{CURSOR_STYLE, PLACEHOLDER_STYLE};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use unicode_width::UnicodeWidthChar;

/// One editable text input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    value: Vec<char>,
    placeholder: String,
    cursor: usize,
    focused: bool,
    char_limit: Option<usize>,
    width: usize,
}

impl Field {
    /// Create an empty, blurred field
    pub fn new(placeholder: impl Into<String>, width: usize) -> Self {
        Self {
            value: Vec::new(),
            placeholder: placeholder.into(),
            cursor: 0,
            focused: false,
            char_limit: None,
            width,
        }
    }

    /// Limit the number of characters the field accepts
    pub fn with_char_limit(mut self, limit: usize) -> Self {
        self.char_limit = Some(limit);
        self
    }

    pub fn value(&self) -> String {
        self.value.iter().collect()
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn char_limit(&self) -> Option<usize> {
        self.char_limit
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn focus(&mut self) {
        self.focused = true;
    }

    pub fn blur(&mut self) {
        self.focused = false;
    }

    /// Replace the value, truncated to the character limit, and move the
    /// cursor to the end
    pub fn set_value(&mut self, text: &str) {
        self.value = text.chars().collect();
        if let Some(limit) = self.char_limit {
            self.value.truncate(limit);
        }
        self.cursor = self.value.len();
    }

    pub fn clear(&mut self) {
        self.value.clear();
        self.cursor = 0;
    }

    /// Insert text at the cursor. Characters beyond the limit are dropped.
    pub fn insert_str(&mut self, text: &str) -> bool {
        let mut changed = false;
        for ch in text.chars().filter(|c| !c.is_control()) {
            if self.is_full() {
                tracing::debug!("Field at character limit, dropping input");
                break;
            }
            self.value.insert(self.cursor, ch);
            self.cursor += 1;
            changed = true;
        }
        changed
    }

    fn is_full(&self) -> bool {
        self.char_limit
            .is_some_and(|limit| self.value.len() >= limit)
    }

    /// Apply an editing key. Returns true if the value or cursor changed.
    pub fn handle_key(&mut self, event: &KeyEvent) -> bool {
        let ctrl = event.modifiers.contains(KeyModifiers::CONTROL);
        let before = (self.cursor, self.value.len());

        match event.code {
            KeyCode::Char('a') if ctrl => self.cursor = 0,
            KeyCode::Char('e') if ctrl => self.cursor = self.value.len(),
            KeyCode::Char('u') if ctrl => {
                self.value.drain(..self.cursor);
                self.cursor = 0;
            }
            KeyCode::Char('k') if ctrl => self.value.truncate(self.cursor),
            KeyCode::Char(_) if ctrl => {}
            KeyCode::Char(ch) => {
                let mut buf = [0u8; 4];
                return self.insert_str(ch.encode_utf8(&mut buf));
            }
            KeyCode::Backspace => {
                if self.cursor > 0 {
                    self.cursor -= 1;
                    self.value.remove(self.cursor);
                }
            }
            KeyCode::Delete => {
                if self.cursor < self.value.len() {
                    self.value.remove(self.cursor);
                }
            }
            KeyCode::Left => self.cursor = self.cursor.saturating_sub(1),
            KeyCode::Right => self.cursor = (self.cursor + 1).min(self.value.len()),
            KeyCode::Home => self.cursor = 0,
            KeyCode::End => self.cursor = self.value.len(),
            _ => return false,
        }

        before != (self.cursor, self.value.len())
    }

    /// Styled view of the field, at most `width` cells wide
    pub fn view(&self) -> String {
        self.view_within(self.width)
    }

    /// Styled view no wider than `max_width` or the field's own width.
    ///
    /// The window scrolls horizontally so that the cursor stays visible.
    pub fn view_within(&self, max_width: usize) -> String {
        if self.value.is_empty() {
            return self.placeholder_view();
        }

        let width = self.width.min(max_width).max(1);
        let cell = |ch: char| ch.width().unwrap_or(0);

        // Walk left from the cursor for as long as the window has room
        let mut start = self.cursor;
        let mut used = self.value.get(self.cursor).map_or(1, |c| cell(*c));
        while start > 0 && used + cell(self.value[start - 1]) <= width {
            start -= 1;
            used += cell(self.value[start]);
        }

        let mut out = String::new();
        let mut used = 0;
        for (idx, ch) in self.value.iter().enumerate().skip(start) {
            let w = cell(*ch);
            if used + w > width {
                break;
            }
            used += w;
            if self.focused && idx == self.cursor {
                out.push_str(&CURSOR_STYLE.paint(&ch.to_string()));
            } else {
                out.push(*ch);
            }
        }

        if self.focused && self.cursor == self.value.len() && used < width {
            out.push_str(&CURSOR_STYLE.paint(" "));
        }

        out
    }

    fn placeholder_view(&self) -> String {
        let mut chars = self.placeholder.chars();
        if !self.focused {
            return PLACEHOLDER_STYLE.paint(&self.placeholder);
        }
        match chars.next() {
            Some(first) => {
                let rest: String = chars.collect();
                let mut out = CURSOR_STYLE.paint(&first.to_string());
                if !rest.is_empty() {
                    out.push_str(&PLACEHOLDER_STYLE.paint(&rest));
                }
                out
            }
            None => CURSOR_STYLE.paint(" "),
        }
    }
}
