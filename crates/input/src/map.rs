//! Key mapping from terminal events to player actions.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// What a key press asks for; its meaning depends on whether a drag is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UiAction {
    Left,
    Right,
    Up,
    Down,
    /// Grab the block under the cursor, or drop the dragged one
    Confirm,
    Cancel,
    Restart,
}

/// Map keyboard input to player actions.
pub fn handle_key_event(key: KeyEvent) -> Option<UiAction> {
    match key.code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(UiAction::Left)
        }
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('L') | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(UiAction::Right)
        }
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(UiAction::Up)
        }
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(UiAction::Down)
        }

        KeyCode::Char(' ') | KeyCode::Enter => Some(UiAction::Confirm),
        KeyCode::Esc | KeyCode::Backspace => Some(UiAction::Cancel),

        KeyCode::Char('r') | KeyCode::Char('R') => Some(UiAction::Restart),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_keys() {
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Left)), Some(UiAction::Left));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Right)), Some(UiAction::Right));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Up)), Some(UiAction::Up));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Down)), Some(UiAction::Down));

        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('H'))),
            Some(UiAction::Left)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('d'))),
            Some(UiAction::Right)
        );
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('k'))),
            Some(UiAction::Up)
        );
    }

    #[test]
    fn test_drag_keys() {
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char(' '))),
            Some(UiAction::Confirm)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Enter)), Some(UiAction::Confirm));
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Esc)), Some(UiAction::Cancel));
        assert_eq!(
            handle_key_event(KeyEvent::from(KeyCode::Char('r'))),
            Some(UiAction::Restart)
        );
        assert_eq!(handle_key_event(KeyEvent::from(KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }
}
