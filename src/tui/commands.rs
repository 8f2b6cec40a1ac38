//! # Key Commands
//!
//! Maps raw key events to form actions. Each binding is a `Command`; the
//! registry asks every command whether it is relevant and takes the first
//! match. Keys no command claims become `Action::Edit` for the focused field.
//!
//! Commands only translate keys. Guards such as "no reset while loading" are
//! applied by the state machine, which sees the whole model.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key asks the form to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    FocusNext,
    FocusPrevious,
    Submit,
    Reset,
    Edit(KeyEvent),
}

/// A single key binding
pub trait Command: Send + Sync {
    /// Check if this command handles the key
    fn is_relevant(&self, event: &KeyEvent) -> bool;

    /// Produce the action for a relevant key
    fn execute(&self, event: KeyEvent) -> Action;

    /// Command name for logging
    fn name(&self) -> &'static str;
}

fn is_ctrl(event: &KeyEvent, ch: char) -> bool {
    event.code == KeyCode::Char(ch) && event.modifiers.contains(KeyModifiers::CONTROL)
}

/// Quit (Ctrl+C or q)
pub struct QuitCommand;

impl Command for QuitCommand {
    fn is_relevant(&self, event: &KeyEvent) -> bool {
        is_ctrl(event, 'c') || (event.code == KeyCode::Char('q') && event.modifiers.is_empty())
    }

    fn execute(&self, _event: KeyEvent) -> Action {
        Action::Quit
    }

    fn name(&self) -> &'static str {
        "Quit"
    }
}

/// Focus the next field (Tab or Down)
pub struct FocusNextCommand;

impl Command for FocusNextCommand {
    fn is_relevant(&self, event: &KeyEvent) -> bool {
        match event.code {
            KeyCode::Tab => !event.modifiers.contains(KeyModifiers::SHIFT),
            KeyCode::Down => true,
            _ => false,
        }
    }

    fn execute(&self, _event: KeyEvent) -> Action {
        Action::FocusNext
    }

    fn name(&self) -> &'static str {
        "FocusNext"
    }
}

/// Focus the previous field (Shift+Tab or Up)
pub struct FocusPreviousCommand;

impl Command for FocusPreviousCommand {
    fn is_relevant(&self, event: &KeyEvent) -> bool {
        match event.code {
            KeyCode::BackTab | KeyCode::Up => true,
            KeyCode::Tab => event.modifiers.contains(KeyModifiers::SHIFT),
            _ => false,
        }
    }

    fn execute(&self, _event: KeyEvent) -> Action {
        Action::FocusPrevious
    }

    fn name(&self) -> &'static str {
        "FocusPrevious"
    }
}

/// Advance focus or send the request (Enter)
pub struct SubmitCommand;

impl Command for SubmitCommand {
    fn is_relevant(&self, event: &KeyEvent) -> bool {
        event.code == KeyCode::Enter
    }

    fn execute(&self, _event: KeyEvent) -> Action {
        Action::Submit
    }

    fn name(&self) -> &'static str {
        "Submit"
    }
}

/// Clear the form for a new request (Ctrl+N)
pub struct ResetCommand;

impl Command for ResetCommand {
    fn is_relevant(&self, event: &KeyEvent) -> bool {
        is_ctrl(event, 'n')
    }

    fn execute(&self, _event: KeyEvent) -> Action {
        Action::Reset
    }

    fn name(&self) -> &'static str {
        "Reset"
    }
}

/// Ordered list of key bindings
pub struct CommandRegistry {
    commands: Vec<Box<dyn Command>>,
}

impl CommandRegistry {
    /// Registry with the default form bindings
    pub fn new() -> Self {
        let mut registry = Self {
            commands: Vec::new(),
        };
        registry.register(Box::new(QuitCommand));
        registry.register(Box::new(ResetCommand));
        registry.register(Box::new(FocusPreviousCommand));
        registry.register(Box::new(FocusNextCommand));
        registry.register(Box::new(SubmitCommand));
        registry
    }

    pub fn register(&mut self, command: Box<dyn Command>) {
        self.commands.push(command);
    }

    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Resolve a key to an action
    pub fn process_event(&self, event: KeyEvent) -> Action {
        match self.commands.iter().find(|c| c.is_relevant(&event)) {
            Some(command) => {
                tracing::debug!("Key {:?} handled by {}", event, command.name());
                command.execute(event)
            }
            None => Action::Edit(event),
        }
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    fn resolve(code: KeyCode, modifiers: KeyModifiers) -> Action {
        CommandRegistry::new().process_event(key(code, modifiers))
    }

    #[test]
    fn registry_should_register_default_commands() {
        assert_eq!(CommandRegistry::new().command_count(), 5);
    }

    #[test]
    fn ctrl_c_and_q_should_quit() {
        assert_eq!(resolve(KeyCode::Char('c'), KeyModifiers::CONTROL), Action::Quit);
        assert_eq!(resolve(KeyCode::Char('q'), KeyModifiers::NONE), Action::Quit);
    }

    #[test]
    fn plain_c_should_edit() {
        let event = key(KeyCode::Char('c'), KeyModifiers::NONE);
        assert_eq!(CommandRegistry::new().process_event(event), Action::Edit(event));
    }

    #[test]
    fn tab_and_down_should_focus_next() {
        assert_eq!(resolve(KeyCode::Tab, KeyModifiers::NONE), Action::FocusNext);
        assert_eq!(resolve(KeyCode::Down, KeyModifiers::NONE), Action::FocusNext);
    }

    #[test]
    fn shift_tab_and_up_should_focus_previous() {
        assert_eq!(resolve(KeyCode::BackTab, KeyModifiers::SHIFT), Action::FocusPrevious);
        assert_eq!(resolve(KeyCode::Tab, KeyModifiers::SHIFT), Action::FocusPrevious);
        assert_eq!(resolve(KeyCode::Up, KeyModifiers::NONE), Action::FocusPrevious);
    }

    #[test]
    fn enter_should_submit_and_ctrl_n_should_reset() {
        assert_eq!(resolve(KeyCode::Enter, KeyModifiers::NONE), Action::Submit);
        assert_eq!(resolve(KeyCode::Char('n'), KeyModifiers::CONTROL), Action::Reset);
    }

    #[test]
    fn editing_keys_should_fall_through() {
        let event = key(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(CommandRegistry::new().process_event(event), Action::Edit(event));
    }
}
