//! Key-binding decoding into explicit commands.
//!
//! Every operator interaction is a [`Command`] dispatched through one
//! handler, keeping the screen logic independent of the rendering toolkit.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Everything the operator can ask the repositories screen to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Re-run the listing query.
    Refresh,
    /// Show or hide the search bar.
    ToggleSearch,
    /// Open the selected repository on GitHub.
    OpenExternal,
    /// Open the selected repository on the platform frontend.
    OpenFrontend,
    /// Queue badge updates for the selected repository's issues.
    RebadgeIssues,
    /// Queue a platform re-sync for the selected repository.
    ResyncIssues,
    /// Leave the organization scope (scoped listing only).
    Back,
    /// Exit the application.
    Quit,
    CursorUp,
    CursorDown,
    SearchInput(char),
    SearchBackspace,
    SearchSubmit,
    SearchCancel,
}

/// Decode a key event into a command.
///
/// `search_open` routes printable keys into the search bar; `scoped` enables
/// the escape-back binding that only exists on the organization-scoped
/// variant of the listing.
pub fn decode_key(key: &KeyEvent, search_open: bool, scoped: bool) -> Option<Command> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    if search_open {
        return match key.code {
            KeyCode::Esc => Some(Command::SearchCancel),
            KeyCode::Enter => Some(Command::SearchSubmit),
            KeyCode::Backspace => Some(Command::SearchBackspace),
            KeyCode::Char('f') if ctrl => Some(Command::ToggleSearch),
            KeyCode::Char('c') if ctrl => Some(Command::Quit),
            KeyCode::Char(c) if !ctrl => Some(Command::SearchInput(c)),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Char('r') if ctrl => Some(Command::Refresh),
        KeyCode::Char('f') if ctrl => Some(Command::ToggleSearch),
        KeyCode::Char('g') if ctrl => Some(Command::OpenExternal),
        KeyCode::Char('p') if ctrl => Some(Command::OpenFrontend),
        KeyCode::Char('b') if ctrl => Some(Command::RebadgeIssues),
        KeyCode::Char('s') if ctrl => Some(Command::ResyncIssues),
        KeyCode::Char('c') if ctrl => Some(Command::Quit),
        KeyCode::Char('q') => Some(Command::Quit),
        KeyCode::Esc if scoped => Some(Command::Back),
        KeyCode::Up | KeyCode::Char('k') => Some(Command::CursorUp),
        KeyCode::Down | KeyCode::Char('j') => Some(Command::CursorDown),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn plain(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_action_bindings() {
        assert_eq!(decode_key(&ctrl('r'), false, false), Some(Command::Refresh));
        assert_eq!(
            decode_key(&ctrl('f'), false, false),
            Some(Command::ToggleSearch)
        );
        assert_eq!(
            decode_key(&ctrl('g'), false, false),
            Some(Command::OpenExternal)
        );
        assert_eq!(
            decode_key(&ctrl('p'), false, false),
            Some(Command::OpenFrontend)
        );
        assert_eq!(
            decode_key(&ctrl('b'), false, false),
            Some(Command::RebadgeIssues)
        );
        assert_eq!(
            decode_key(&ctrl('s'), false, false),
            Some(Command::ResyncIssues)
        );
    }

    #[test]
    fn test_escape_back_only_when_scoped() {
        assert_eq!(
            decode_key(&plain(KeyCode::Esc), false, true),
            Some(Command::Back)
        );
        assert_eq!(decode_key(&plain(KeyCode::Esc), false, false), None);
    }

    #[test]
    fn test_search_mode_captures_printable_keys() {
        let key = plain(KeyCode::Char('b'));
        assert_eq!(
            decode_key(&key, true, false),
            Some(Command::SearchInput('b'))
        );
        // The same key outside search mode is not bound
        assert_eq!(decode_key(&key, false, false), None);
    }

    #[test]
    fn test_search_mode_submit_and_cancel() {
        assert_eq!(
            decode_key(&plain(KeyCode::Enter), true, false),
            Some(Command::SearchSubmit)
        );
        assert_eq!(
            decode_key(&plain(KeyCode::Esc), true, true),
            Some(Command::SearchCancel)
        );
        assert_eq!(
            decode_key(&plain(KeyCode::Backspace), true, false),
            Some(Command::SearchBackspace)
        );
    }

    #[test]
    fn test_quit_bindings() {
        assert_eq!(
            decode_key(&plain(KeyCode::Char('q')), false, false),
            Some(Command::Quit)
        );
        assert_eq!(decode_key(&ctrl('c'), false, false), Some(Command::Quit));
        // Ctrl+C still quits while typing a search
        assert_eq!(decode_key(&ctrl('c'), true, false), Some(Command::Quit));
        // A plain 'q' goes into the search input instead
        assert_eq!(
            decode_key(&plain(KeyCode::Char('q')), true, false),
            Some(Command::SearchInput('q'))
        );
    }

    #[test]
    fn test_cursor_movement() {
        assert_eq!(
            decode_key(&plain(KeyCode::Up), false, false),
            Some(Command::CursorUp)
        );
        assert_eq!(
            decode_key(&plain(KeyCode::Char('j')), false, false),
            Some(Command::CursorDown)
        );
    }
}
