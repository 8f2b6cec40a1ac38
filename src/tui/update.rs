//! # Form State Machine
//!
//! `StateMachine::update` takes the current model and one event and returns
//! the next model plus the side effect the event loop must perform. It never
//! touches the terminal or the network itself.

use crate::tui::commands::{Action, CommandRegistry};
use crate::tui::events::{AppEvent, Completion};
use crate::tui::models::{Model, BODY_FIELD, FIELD_COUNT, METHOD_FIELD, URL_FIELD};
use crate::tui::services::http::RequestSpec;

/// Work requested by a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    Quit,
    Dispatch(RequestSpec),
}

/// Interprets events against the form model
pub struct StateMachine {
    commands: CommandRegistry,
}

impl StateMachine {
    pub fn new() -> Self {
        Self {
            commands: CommandRegistry::new(),
        }
    }

    /// Apply one event
    pub fn update(&self, mut model: Model, event: AppEvent) -> (Model, Effect) {
        let effect = match event {
            AppEvent::Key(key) => {
                let action = self.commands.process_event(key);
                apply_action(&mut model, action)
            }
            AppEvent::Paste(text) => {
                model.fields.paste(model.focus_index, &text);
                Effect::None
            }
            AppEvent::Resize { width, height } => {
                model.viewport_width = width;
                model.viewport_height = height;
                Effect::None
            }
            AppEvent::Completion(completion) => {
                apply_completion(&mut model, completion);
                Effect::None
            }
        };
        (model, effect)
    }
}

impl Default for StateMachine {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_action(model: &mut Model, action: Action) -> Effect {
    match action {
        Action::Quit => Effect::Quit,
        Action::FocusNext => {
            move_focus(model, (model.focus_index + 1) % FIELD_COUNT);
            Effect::None
        }
        Action::FocusPrevious => {
            move_focus(model, (model.focus_index + FIELD_COUNT - 1) % FIELD_COUNT);
            Effect::None
        }
        Action::Submit if model.focus_index != BODY_FIELD => {
            move_focus(model, (model.focus_index + 1) % FIELD_COUNT);
            Effect::None
        }
        Action::Submit if model.loading => {
            tracing::debug!("Submit ignored, a request is already in flight");
            Effect::None
        }
        Action::Submit => {
            model.loading = true;
            model.response.clear();
            let request = RequestSpec::new(
                model.fields.value(METHOD_FIELD),
                model.fields.value(URL_FIELD),
                model.fields.value(BODY_FIELD),
            );
            tracing::info!("Dispatching {} {}", request.method, request.url);
            Effect::Dispatch(request)
        }
        Action::Reset if model.loading => {
            tracing::debug!("Reset ignored while loading");
            Effect::None
        }
        Action::Reset => {
            model.fields.clear_all();
            model.response.clear();
            move_focus(model, URL_FIELD);
            Effect::None
        }
        Action::Edit(key) => {
            model.fields.handle_key(model.focus_index, &key);
            Effect::None
        }
    }
}

fn move_focus(model: &mut Model, index: usize) {
    model.focus_index = index;
    model.fields.focus(index);
}

fn apply_completion(model: &mut Model, completion: Completion) {
    if !model.loading {
        tracing::warn!("Completion arrived with no request in flight");
    }
    tracing::debug!("Request completed, error={}", completion.is_error());
    model.response = completion.render();
    model.loading = false;
}
