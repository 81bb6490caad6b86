//! Terminal key presses, as bytes for the meter.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub fn is_interrupt(key: &KeyEvent) -> bool {
    key.modifiers == KeyModifiers::CONTROL && key.code == KeyCode::Char('c')
}

/// The byte sent to the meter for a key press, if it has one.
pub fn to_byte(key: &KeyEvent) -> Option<u8> {
    if key.kind != KeyEventKind::Press || key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Enter => Some(b'\r'),
        KeyCode::Char(c) if c.is_ascii() => Some(c as u8),
        _ => None,
    }
}
