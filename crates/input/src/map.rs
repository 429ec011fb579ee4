//! Key mapping from terminal events to game actions.

use crate::types::Action;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to game actions.
///
/// Letters follow the A/D move, S drop, Q/E rotate, R restart layout; arrow keys
/// and space are accepted as well.
pub fn map_key(key: KeyEvent) -> Option<Action> {
    match key.code {
        // Movement
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Some(Action::Move(-1)),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Some(Action::Move(1)),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') | KeyCode::Char(' ') => {
            Some(Action::Drop)
        }

        // Rotation
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Char('z') | KeyCode::Char('Z') => {
            Some(Action::RotateLeft)
        }
        KeyCode::Up | KeyCode::Char('e') | KeyCode::Char('E') | KeyCode::Char('x') | KeyCode::Char('X') => {
            Some(Action::RotateRight)
        }

        // Restart
        KeyCode::Char('r') | KeyCode::Char('R') => {
            if key.modifiers.contains(KeyModifiers::CONTROL) {
                None
            } else {
                Some(Action::Restart)
            }
        }

        _ => None,
    }
}

/// Check if key should quit the game.
///
/// `q` rotates, so quitting is Esc or Ctrl-C.
pub fn should_quit(key: KeyEvent) -> bool {
    key.code == KeyCode::Esc
        || (matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
            && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_movement_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('a'))), Some(Action::Move(-1)));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('D'))), Some(Action::Move(1)));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Left)), Some(Action::Move(-1)));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Right)), Some(Action::Move(1)));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('s'))), Some(Action::Drop));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char(' '))), Some(Action::Drop));
    }

    #[test]
    fn test_rotation_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('q'))), Some(Action::RotateLeft));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('E'))), Some(Action::RotateRight));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Up)), Some(Action::RotateRight));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('Z'))), Some(Action::RotateLeft));
    }

    #[test]
    fn test_restart_and_unmapped_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('r'))), Some(Action::Restart));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL)),
            None
        );
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('p'))), None);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Tab)), None);
    }

    #[test]
    fn test_quit_keys() {
        assert!(should_quit(KeyEvent::from(KeyCode::Esc)));
        assert!(should_quit(KeyEvent::new(
            KeyCode::Char('c'),
            KeyModifiers::CONTROL
        )));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('q'))));
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }
}
