//! The three request inputs: URL, method and body

use super::field::Field;
use crossterm::event::KeyEvent;

pub const URL_FIELD: usize = 0;
pub const METHOD_FIELD: usize = 1;
pub const BODY_FIELD: usize = 2;
pub const FIELD_COUNT: usize = 3;

pub const URL_PLACEHOLDER: &str = "https://apiterm.com/resource";
pub const METHOD_PLACEHOLDER: &str = "GET";
pub const BODY_PLACEHOLDER: &str = r#"{"key":"value"}"#;

pub const METHOD_CHAR_LIMIT: usize = 10;
const WIDE_FIELD_WIDTH: usize = 60;
const METHOD_FIELD_WIDTH: usize = 10;

/// Field labels in display order
pub const FIELD_LABELS: [&str; FIELD_COUNT] = ["URL", "Method", "Body"];

/// Ordered set of exactly three fields: URL, method, body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputFieldSet {
    fields: [Field; FIELD_COUNT],
}

impl InputFieldSet {
    /// Fresh fields with default placeholders and the URL field focused
    pub fn new() -> Self {
        let fields = [
            Field::new(URL_PLACEHOLDER, WIDE_FIELD_WIDTH),
            Field::new(METHOD_PLACEHOLDER, METHOD_FIELD_WIDTH).with_char_limit(METHOD_CHAR_LIMIT),
            Field::new(BODY_PLACEHOLDER, WIDE_FIELD_WIDTH),
        ];
        Self { fields }.compute_focus(URL_FIELD)
    }

    /// Return this set with only `index` focused
    pub fn compute_focus(mut self, index: usize) -> Self {
        self.focus(index);
        self
    }

    /// Blur every field, then focus field `index`
    pub fn focus(&mut self, index: usize) {
        self.blur_all();
        if let Some(field) = self.fields.get_mut(index) {
            field.focus();
        }
    }

    fn blur_all(&mut self) {
        self.fields.iter_mut().for_each(Field::blur);
    }

    /// Index of the focused field, if any
    pub fn focused_index(&self) -> Option<usize> {
        self.fields.iter().position(Field::is_focused)
    }

    pub fn set_value(&mut self, index: usize, text: &str) {
        if let Some(field) = self.fields.get_mut(index) {
            field.set_value(text);
        }
    }

    pub fn value(&self, index: usize) -> String {
        self.fields.get(index).map(Field::value).unwrap_or_default()
    }

    pub fn get(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter()
    }

    /// Forward an editing key to field `index`. Ignored unless that field
    /// holds focus.
    pub fn handle_key(&mut self, index: usize, event: &KeyEvent) -> bool {
        match self.fields.get_mut(index) {
            Some(field) if field.is_focused() => field.handle_key(event),
            _ => false,
        }
    }

    /// Insert pasted text into field `index` if it holds focus. Line breaks
    /// are dropped since every field is single-line.
    pub fn paste(&mut self, index: usize, text: &str) -> bool {
        let flat: String = text.chars().filter(|c| *c != '\n' && *c != '\r').collect();
        match self.fields.get_mut(index) {
            Some(field) if field.is_focused() => field.insert_str(&flat),
            _ => false,
        }
    }

    /// Empty every value. Focus is left untouched.
    pub fn clear_all(&mut self) {
        self.fields.iter_mut().for_each(Field::clear);
    }
}

impl Default for InputFieldSet {
    fn default() -> Self {
        Self::new()
    }
}
