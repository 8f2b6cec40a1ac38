//! # Application Events
//!
//! Everything the event loop reacts to arrives as one `AppEvent`. Terminal
//! input is converted at the boundary; request results arrive as
//! `AppEvent::Completion` through the dispatcher's channel.

use crossterm::event::{Event, KeyEvent, KeyEventKind};
use std::fmt;

/// Result of one dispatch, delivered exactly once
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Completion {
    /// The server answered; `body` is the full payload
    Success { status: u16, body: String },
    /// Validation, unsupported method, or transport failure
    Error { message: String },
}

impl Completion {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error { .. })
    }

    /// Text shown in the response panel
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success { status, body } => write!(f, "Status: {status}\nBody: {body}"),
            Self::Error { message } => write!(f, "Error: {message}"),
        }
    }
}

/// Input to the state machine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Key(KeyEvent),
    Paste(String),
    Resize { width: u16, height: u16 },
    Completion(Completion),
}

impl AppEvent {
    /// Convert a terminal event. Key releases, mouse and focus events are
    /// not of interest and map to `None`.
    pub fn from_terminal(event: Event) -> Option<Self> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Some(Self::Key(key)),
            Event::Paste(text) => Some(Self::Paste(text)),
            Event::Resize(width, height) => Some(Self::Resize { width, height }),
            _ => None,
        }
    }
}

impl From<Completion> for AppEvent {
    fn from(completion: Completion) -> Self {
        Self::Completion(completion)
    }
}
