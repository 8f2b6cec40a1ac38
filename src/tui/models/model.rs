//! Aggregate state of the interactive form

use super::field_set::{InputFieldSet, URL_FIELD};

/// Everything the form renders from.
///
/// Owned and mutated only by the event loop. The focused field is always
/// `fields[focus_index]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    pub(crate) fields: InputFieldSet,
    pub(crate) focus_index: usize,
    pub(crate) response: String,
    pub(crate) loading: bool,
    pub(crate) viewport_width: u16,
    pub(crate) viewport_height: u16,
}

impl Model {
    /// Initial state: empty fields, URL focused, nothing loaded. The viewport
    /// is unknown (zero) until the first size report.
    pub fn new() -> Self {
        Self {
            fields: InputFieldSet::new(),
            focus_index: URL_FIELD,
            response: String::new(),
            loading: false,
            viewport_width: 0,
            viewport_height: 0,
        }
    }

    /// Initial state with a known viewport
    pub fn with_viewport(width: u16, height: u16) -> Self {
        Self {
            viewport_width: width,
            viewport_height: height,
            ..Self::new()
        }
    }

    pub fn fields(&self) -> &InputFieldSet {
        &self.fields
    }

    pub fn focus_index(&self) -> usize {
        self.focus_index
    }

    /// Rendered completion text, empty when there is none
    pub fn response(&self) -> &str {
        &self.response
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn viewport(&self) -> (u16, u16) {
        (self.viewport_width, self.viewport_height)
    }

    pub fn value(&self, index: usize) -> String {
        self.fields.value(index)
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::new()
    }
}
