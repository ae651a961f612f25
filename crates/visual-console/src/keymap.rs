//! Key bindings of the console app.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use visual_console_layout::{ConsoleAction, FooterHint};

/// What a key press asks the app to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Forward to the console view state
    Console(ConsoleAction),
    /// Show or hide the detail pane
    ToggleDetails,
    Quit,
}

/// Translate a key press into a command
pub fn command_for(key: KeyEvent) -> Option<Command> {
    use ConsoleAction::*;

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Command::Quit),
            _ => None,
        };
    }

    let action = match key.code {
        // Selection
        KeyCode::Left | KeyCode::Char('h') => SelectLeft,
        KeyCode::Right | KeyCode::Char('l') => SelectRight,
        KeyCode::Up | KeyCode::Char('k') => SelectUp,
        KeyCode::Down | KeyCode::Char('j') => SelectDown,
        KeyCode::Home | KeyCode::Char('g') => SelectFirst,
        KeyCode::End | KeyCode::Char('G') => SelectLast,
        // Folding
        KeyCode::Enter | KeyCode::Char(' ') => Activate,
        KeyCode::Char('f') => ToggleFold,
        // Scrolling
        KeyCode::Char('<') => ScrollLeft,
        KeyCode::Char('>') => ScrollRight,
        // Console
        KeyCode::Char('c') => Clear,
        KeyCode::Char('x') => ToggleCancel,
        KeyCode::Char('p') => TogglePause,
        // General
        KeyCode::Char('d') => return Some(Command::ToggleDetails),
        KeyCode::Char('q') | KeyCode::Esc => return Some(Command::Quit),
        _ => return None,
    };
    Some(Command::Console(action))
}

/// Hints shown in the console's bottom border
pub fn footer_hints(cancelled: bool, paused: bool) -> Vec<FooterHint> {
    vec![
        FooterHint::new("Enter×2", "Fold"),
        FooterHint::new("d", "Details"),
        FooterHint::new("c", "Clear"),
        FooterHint::new("p", if paused { "Unpause" } else { "Pause" }),
        FooterHint::new("x", if cancelled { "Resume" } else { "Cancel" }),
        FooterHint::new("q", "Quit"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn press(code: KeyCode) -> Option<Command> {
        command_for(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_vim_and_arrow_keys_agree() {
        assert_eq!(press(KeyCode::Char('j')), press(KeyCode::Down));
        assert_eq!(press(KeyCode::Char('h')), press(KeyCode::Left));
        assert_eq!(
            press(KeyCode::Enter),
            Some(Command::Console(ConsoleAction::Activate))
        );
    }

    #[test]
    fn test_ctrl_c_quits() {
        assert_eq!(
            command_for(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Command::Quit)
        );
        assert_eq!(
            press(KeyCode::Char('c')),
            Some(Command::Console(ConsoleAction::Clear))
        );
    }

    #[test]
    fn test_pause_key_and_hint() {
        assert_eq!(
            press(KeyCode::Char('p')),
            Some(Command::Console(ConsoleAction::TogglePause))
        );
        let hints = footer_hints(false, true);
        assert!(hints.iter().any(|h| h.key == "p" && h.description == "Unpause"));
    }

    #[test]
    fn test_unbound_key() {
        assert_eq!(press(KeyCode::Char('z')), None);
    }
}
