//! Key-name normalization.
//!
//! Callers name keys with short strings (`"ctrl"`, `"enter"`, `"a"`, `"!"`).
//! [`parse_key`] turns those into a [`Key`]: either a named physical key
//! from [`codes::KEY_TABLE`] or a plain character to be typed as unicode.

pub mod codes;
pub mod shortcuts;

pub use codes::{KeyCode, KeyRow, KEY_TABLE};

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    #[error("unknown key '{0}'; use single characters or special key names like 'enter', 'ctrl', 'shift'")]
    UnknownKey(String),
}

/// A key to press or release.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// A physical key with a code on every platform.
    Named(KeyCode),
    /// A character with no unshifted key of its own (`'A'`, `'!'`, `'é'`).
    Char(char),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Named(code) => write!(f, "{code:?}"),
            Key::Char(c) => write!(f, "'{c}'"),
        }
    }
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        Key::Named(code)
    }
}

/// Accepted key names (lowercase) and the key each one means.
const KEY_NAMES: &[(&str, KeyCode)] = &[
    ("ctrl", KeyCode::Control),
    ("control", KeyCode::Control),
    ("alt", KeyCode::Alt),
    ("shift", KeyCode::Shift),
    ("meta", KeyCode::Meta),
    ("win", KeyCode::Meta),
    ("windows", KeyCode::Meta),
    ("cmd", KeyCode::Meta),
    ("command", KeyCode::Meta),
    ("super", KeyCode::Meta),
    ("f1", KeyCode::F1),
    ("f2", KeyCode::F2),
    ("f3", KeyCode::F3),
    ("f4", KeyCode::F4),
    ("f5", KeyCode::F5),
    ("f6", KeyCode::F6),
    ("f7", KeyCode::F7),
    ("f8", KeyCode::F8),
    ("f9", KeyCode::F9),
    ("f10", KeyCode::F10),
    ("f11", KeyCode::F11),
    ("f12", KeyCode::F12),
    ("enter", KeyCode::Enter),
    ("return", KeyCode::Enter),
    ("tab", KeyCode::Tab),
    ("space", KeyCode::Space),
    ("backspace", KeyCode::Backspace),
    ("delete", KeyCode::Delete),
    ("del", KeyCode::Delete),
    ("escape", KeyCode::Escape),
    ("esc", KeyCode::Escape),
    ("up", KeyCode::ArrowUp),
    ("down", KeyCode::ArrowDown),
    ("left", KeyCode::ArrowLeft),
    ("right", KeyCode::ArrowRight),
    ("home", KeyCode::Home),
    ("end", KeyCode::End),
    ("pageup", KeyCode::PageUp),
    ("page_up", KeyCode::PageUp),
    ("pagedown", KeyCode::PageDown),
    ("page_down", KeyCode::PageDown),
    ("capslock", KeyCode::CapsLock),
    ("caps_lock", KeyCode::CapsLock),
    ("numlock", KeyCode::NumLock),
    ("num_lock", KeyCode::NumLock),
    ("scrolllock", KeyCode::ScrollLock),
    ("scroll_lock", KeyCode::ScrollLock),
    ("insert", KeyCode::Insert),
    ("printscreen", KeyCode::PrintScreen),
    ("print_screen", KeyCode::PrintScreen),
    ("pause", KeyCode::Pause),
    ("menu", KeyCode::Menu),
];

/// Key for a character that is typed with a physical key rather than as text.
///
/// Line breaks (`'\n'`, `'\r'`) are Enter and `'\t'` is Tab.
pub fn control_char_key(c: char) -> Option<KeyCode> {
    match c {
        '\n' | '\r' => Some(KeyCode::Enter),
        '\t' => Some(KeyCode::Tab),
        _ => None,
    }
}

/// Parses a key name.
///
/// Names are matched case-insensitively against the alias list first, so
/// `"F5"` is the function key. Any other single character is a key on its
/// own: unshifted printable ASCII maps to its [`KeyCode`], everything else
/// becomes [`Key::Char`].
///
/// # Errors
///
/// [`KeyError::UnknownKey`] for multi-character strings that are not a known name.
pub fn parse_key(name: &str) -> Result<Key, KeyError> {
    let lower = name.to_lowercase();
    if let Some((_, code)) = KEY_NAMES.iter().find(|(alias, _)| *alias == lower) {
        return Ok(Key::Named(*code));
    }

    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(control_char_key(c)
            .or_else(|| KeyCode::from_char(c))
            .map_or(Key::Char(c), Key::Named)),
        _ => Err(KeyError::UnknownKey(name.to_string())),
    }
}
