use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq)]
pub enum TuiEvent {
    // Commands (passed on to core::update)
    ForceQuit,
    OpenFile,
    Save,
    Execute,

    // TUI-local events (handled directly in TUI)
    Escape,
    Submit,
    InputChar(char),
    Paste(String), // Bracketed paste - preserves newlines
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorUp,
    CursorDown,
    CursorHome,
    CursorEnd,
    ScrollOutputUp,
    ScrollOutputDown,
    Resize,
}

/// Indentation inserted for the Tab key.
const TAB_TEXT: &str = "    ";

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

/// Poll for an event, blocking up to `timeout`.
pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => {}
        Ok(false) => return None,
        Err(e) => {
            log::warn!("Event poll failed: {}", e);
            return None;
        }
    }

    let event = match event::read() {
        Ok(event) => event,
        Err(e) => {
            log::warn!("Event read failed: {}", e);
            return None;
        }
    };

    translate(event)
}

/// Map a raw crossterm event to a `TuiEvent`.
pub fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => {
            // Keyboard enhancement reports releases too; only presses and repeats matter.
            if key_event.kind == KeyEventKind::Release {
                return None;
            }
            log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
            match (key_event.modifiers, key_event.code) {
                (KeyModifiers::CONTROL, KeyCode::Char('c' | 'q')) => Some(TuiEvent::ForceQuit),
                (KeyModifiers::CONTROL, KeyCode::Char('o')) => Some(TuiEvent::OpenFile),
                (KeyModifiers::CONTROL, KeyCode::Char('s')) => Some(TuiEvent::Save),
                (KeyModifiers::CONTROL, KeyCode::Char('r')) => Some(TuiEvent::Execute),
                (_, KeyCode::F(5)) => Some(TuiEvent::Execute),
                // Ctrl+J inserts newline (ASCII LF; Ctrl+Enter sends this in most terminals)
                (KeyModifiers::CONTROL, KeyCode::Char('j')) => Some(TuiEvent::InputChar('\n')),
                (KeyModifiers::ALT, KeyCode::Up) => Some(TuiEvent::ScrollOutputUp),
                (KeyModifiers::ALT, KeyCode::Down) => Some(TuiEvent::ScrollOutputDown),
                (m, KeyCode::Char(c)) if !m.contains(KeyModifiers::CONTROL) => {
                    Some(TuiEvent::InputChar(c))
                }
                (_, KeyCode::Tab) => Some(TuiEvent::Paste(TAB_TEXT.to_string())),
                (_, KeyCode::Backspace) => Some(TuiEvent::Backspace),
                (_, KeyCode::Delete) => Some(TuiEvent::Delete),
                (_, KeyCode::Enter) => Some(TuiEvent::Submit),
                (_, KeyCode::Esc) => Some(TuiEvent::Escape),
                (_, KeyCode::Left) => Some(TuiEvent::CursorLeft),
                (_, KeyCode::Right) => Some(TuiEvent::CursorRight),
                (_, KeyCode::Up) => Some(TuiEvent::CursorUp),
                (_, KeyCode::Down) => Some(TuiEvent::CursorDown),
                (_, KeyCode::Home) => Some(TuiEvent::CursorHome),
                (_, KeyCode::End) => Some(TuiEvent::CursorEnd),
                _ => None,
            }
        }
        Event::Mouse(mouse_event) => match mouse_event.kind {
            MouseEventKind::ScrollUp => Some(TuiEvent::ScrollOutputUp),
            MouseEventKind::ScrollDown => Some(TuiEvent::ScrollOutputDown),
            _ => None,
        },
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(modifiers: KeyModifiers, code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, modifiers))
    }

    #[test]
    fn test_command_shortcuts() {
        assert_eq!(translate(key(KeyModifiers::CONTROL, KeyCode::Char('o'))), Some(TuiEvent::OpenFile));
        assert_eq!(translate(key(KeyModifiers::CONTROL, KeyCode::Char('s'))), Some(TuiEvent::Save));
        assert_eq!(translate(key(KeyModifiers::CONTROL, KeyCode::Char('r'))), Some(TuiEvent::Execute));
        assert_eq!(translate(key(KeyModifiers::NONE, KeyCode::F(5))), Some(TuiEvent::Execute));
        assert_eq!(translate(key(KeyModifiers::CONTROL, KeyCode::Char('c'))), Some(TuiEvent::ForceQuit));
    }

    #[test]
    fn test_plain_and_shifted_chars_are_input() {
        assert_eq!(translate(key(KeyModifiers::NONE, KeyCode::Char('s'))), Some(TuiEvent::InputChar('s')));
        assert_eq!(translate(key(KeyModifiers::SHIFT, KeyCode::Char('S'))), Some(TuiEvent::InputChar('S')));
    }

    #[test]
    fn test_unbound_control_chord_is_ignored() {
        assert_eq!(translate(key(KeyModifiers::CONTROL, KeyCode::Char('x'))), None);
    }

    #[test]
    fn test_tab_inserts_spaces() {
        assert_eq!(
            translate(key(KeyModifiers::NONE, KeyCode::Tab)),
            Some(TuiEvent::Paste("    ".to_string()))
        );
    }
}
