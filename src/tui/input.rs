//! Input dispatch layer for Elm Architecture (TEA) pattern.
//!
//! Maps terminal events to messages. The picker has a single mode, so the
//! mapping is a flat table.

use super::Message;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Map a terminal event to a message. Anything that is not a key press is a no-op.
pub fn message_for_event(event: &Event) -> Message {
    match event {
        Event::Key(key) => dispatch(*key),
        _ => Message::None,
    }
}

/// Map a key event to a message.
pub fn dispatch(key: KeyEvent) -> Message {
    // Release/repeat events are reported on some platforms; only act on presses
    if key.kind != KeyEventKind::Press {
        return Message::None;
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Message::Quit,
        KeyCode::Char('q') => Message::Quit,
        KeyCode::Char('k') | KeyCode::Up => Message::MoveUp,
        KeyCode::Char('j') | KeyCode::Down => Message::MoveDown,
        KeyCode::Enter | KeyCode::Char(' ') => Message::Toggle,
        _ => Message::None,
    }
}
