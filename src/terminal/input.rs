//! Keyboard encoding
//!
//! Turns egui input events into the bytes an xterm-compatible program
//! expects on its input.

use eframe::egui::{Event, Key, Modifiers};

/// Encode one input event; `None` when it produces no terminal input.
///
/// Copy/paste shortcuts are left to the caller.
pub fn encode_event(event: &Event, application_cursor: bool) -> Option<Vec<u8>> {
    match event {
        Event::Text(text) if !text.is_empty() => Some(text.as_bytes().to_vec()),
        Event::Key {
            key,
            pressed: true,
            modifiers,
            ..
        } => encode_key(*key, *modifiers, application_cursor),
        _ => None,
    }
}

/// Encode a pressed key; printable text arrives separately as `Event::Text`
pub fn encode_key(key: Key, modifiers: Modifiers, application_cursor: bool) -> Option<Vec<u8>> {
    if modifiers.ctrl && !modifiers.shift {
        if let Some(byte) = ctrl_byte(key) {
            return Some(vec![byte]);
        }
    }

    let bytes: &[u8] = match key {
        Key::Enter => b"\r",
        Key::Tab if modifiers.shift => b"\x1b[Z",
        Key::Tab => b"\t",
        Key::Backspace => b"\x7f",
        Key::Escape => b"\x1b",
        Key::ArrowUp => cursor_key(b'A', application_cursor),
        Key::ArrowDown => cursor_key(b'B', application_cursor),
        Key::ArrowRight => cursor_key(b'C', application_cursor),
        Key::ArrowLeft => cursor_key(b'D', application_cursor),
        Key::Home => cursor_key(b'H', application_cursor),
        Key::End => cursor_key(b'F', application_cursor),
        Key::PageUp => b"\x1b[5~",
        Key::PageDown => b"\x1b[6~",
        Key::Insert => b"\x1b[2~",
        Key::Delete => b"\x1b[3~",
        _ => return None,
    };
    Some(bytes.to_vec())
}

fn cursor_key(letter: u8, application_cursor: bool) -> &'static [u8] {
    match (letter, application_cursor) {
        (b'A', true) => b"\x1bOA",
        (b'A', false) => b"\x1b[A",
        (b'B', true) => b"\x1bOB",
        (b'B', false) => b"\x1b[B",
        (b'C', true) => b"\x1bOC",
        (b'C', false) => b"\x1b[C",
        (b'D', true) => b"\x1bOD",
        (b'D', false) => b"\x1b[D",
        (b'H', true) => b"\x1bOH",
        (b'H', false) => b"\x1b[H",
        (_, true) => b"\x1bOF",
        (_, false) => b"\x1b[F",
    }
}

/// Control byte for Ctrl+letter
fn ctrl_byte(key: Key) -> Option<u8> {
    let name = key.name();
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Some((c.to_ascii_lowercase() as u8) & 0x1f),
        _ => None,
    }
}

/// Paste text, wrapped in bracketed-paste markers when requested
pub fn paste_bytes(text: &str, bracketed: bool) -> Vec<u8> {
    if !bracketed {
        return text.as_bytes().to_vec();
    }
    let mut bytes = Vec::with_capacity(text.len() + 12);
    bytes.extend_from_slice(b"\x1b[200~");
    bytes.extend_from_slice(text.as_bytes());
    bytes.extend_from_slice(b"\x1b[201~");
    bytes
}
