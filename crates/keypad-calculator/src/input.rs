//! Keyboard input handling
//!
//! Maps crossterm key events onto calculator actions. Characters go through
//! [`Action::from_char`]; anything without a calculator meaning is ignored.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::core::Action;

/// What a key press means to the front end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Forward an action to the calculator
    Press(Action),
    /// Quit the application
    Quit,
    /// No action (ignored input)
    None,
}

/// Input handler that maps key events to actions
#[derive(Debug, Default)]
pub struct InputHandler;

impl InputHandler {
    /// Creates a new input handler
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Maps a key event to an action
    #[must_use]
    pub fn handle_key(&self, event: KeyEvent) -> KeyAction {
        let KeyEvent {
            code,
            modifiers,
            kind,
            ..
        } = event;

        // Windows reports releases too
        if kind == KeyEventKind::Release {
            return KeyAction::None;
        }

        if modifiers.contains(KeyModifiers::CONTROL) {
            return match code {
                KeyCode::Char('c' | 'q') => KeyAction::Quit,
                _ => KeyAction::None,
            };
        }

        match code {
            KeyCode::Char('q' | 'Q') => KeyAction::Quit,
            KeyCode::Char(c) => {
                Action::from_char(c).map_or(KeyAction::None, KeyAction::Press)
            }
            KeyCode::Enter => KeyAction::Press(Action::Evaluate),
            KeyCode::Backspace => KeyAction::Press(Action::Backspace),
            KeyCode::Esc | KeyCode::Delete => KeyAction::Press(Action::Clear),
            _ => KeyAction::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Digit, Operator};

    fn key_event(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn key_event_ctrl(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::CONTROL)
    }

    // ===== Constructor tests =====

    #[test]
    fn test_input_handler_new() {
        let handler = InputHandler::new();
        let _ = format!("{:?}", handler);
    }

    // ===== Character input tests =====

    #[test]
    fn test_handle_digit_keys() {
        let handler = InputHandler::new();
        for d in Digit::ALL {
            let event = key_event(KeyCode::Char(d.to_char()));
            assert_eq!(handler.handle_key(event), KeyAction::Press(Action::Digit(d)));
        }
    }

    #[test]
    fn test_handle_operator_keys() {
        let handler = InputHandler::new();
        for op in Operator::ALL {
            let event = key_event(KeyCode::Char(op.symbol()));
            assert_eq!(
                handler.handle_key(event),
                KeyAction::Press(Action::Operator(op))
            );
        }
    }

    #[test]
    fn test_handle_decimal_point() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('.'))),
            KeyAction::Press(Action::DecimalPoint)
        );
    }

    #[test]
    fn test_handle_toggle_sign() {
        let handler = InputHandler::new();
        for c in ['n', '_'] {
            assert_eq!(
                handler.handle_key(key_event(KeyCode::Char(c))),
                KeyAction::Press(Action::ToggleSign)
            );
        }
    }

    #[test]
    fn test_handle_equals_and_enter() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('='))),
            KeyAction::Press(Action::Evaluate)
        );
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Enter)),
            KeyAction::Press(Action::Evaluate)
        );
    }

    // ===== Edit key tests =====

    #[test]
    fn test_handle_backspace() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Backspace)),
            KeyAction::Press(Action::Backspace)
        );
    }

    #[test]
    fn test_handle_clear_keys() {
        let handler = InputHandler::new();
        for code in [KeyCode::Esc, KeyCode::Delete, KeyCode::Char('c')] {
            assert_eq!(
                handler.handle_key(key_event(code)),
                KeyAction::Press(Action::Clear)
            );
        }
    }

    // ===== Quit tests =====

    #[test]
    fn test_handle_quit_keys() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event(KeyCode::Char('q'))),
            KeyAction::Quit
        );
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('c'))),
            KeyAction::Quit
        );
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('q'))),
            KeyAction::Quit
        );
    }

    #[test]
    fn test_handle_ctrl_unknown() {
        let handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key_event_ctrl(KeyCode::Char('x'))),
            KeyAction::None
        );
    }

    // ===== Ignored input =====

    #[test]
    fn test_handle_unknown_keys() {
        let handler = InputHandler::new();
        for code in [
            KeyCode::F(1),
            KeyCode::Tab,
            KeyCode::Left,
            KeyCode::Char('%'),
            KeyCode::Char('a'),
        ] {
            assert_eq!(handler.handle_key(key_event(code)), KeyAction::None);
        }
    }

    #[test]
    fn test_handle_key_release_ignored() {
        let handler = InputHandler::new();
        let mut event = key_event(KeyCode::Char('5'));
        event.kind = KeyEventKind::Release;
        assert_eq!(handler.handle_key(event), KeyAction::None);
    }
}
