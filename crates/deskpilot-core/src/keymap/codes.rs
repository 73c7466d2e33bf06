//! Normalized key codes and their per-platform values.
//!
//! One row per key. Each row carries the X11 KeySym (Linux), the Windows
//! Virtual-Key code and the macOS virtual keycode (`CGKeyCode`), plus the
//! unshifted US-layout character the key produces, if any.
//!
//! | Key | X11 KeySym | Windows VK | macOS CGKeyCode |
//! |-----|-----------|------------|-----------------|
//! | A | 0x0061 | 0x41 | 0x00 |
//! | Enter | 0xFF0D | 0x0D | 0x24 |
//! | Left Ctrl | 0xFFE3 | 0x11 | 0x3B |

use serde::{Deserialize, Serialize};

/// A physical key, independent of platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KeyCode {
    KeyA,
    KeyB,
    KeyC,
    KeyD,
    KeyE,
    KeyF,
    KeyG,
    KeyH,
    KeyI,
    KeyJ,
    KeyK,
    KeyL,
    KeyM,
    KeyN,
    KeyO,
    KeyP,
    KeyQ,
    KeyR,
    KeyS,
    KeyT,
    KeyU,
    KeyV,
    KeyW,
    KeyX,
    KeyY,
    KeyZ,
    Digit0,
    Digit1,
    Digit2,
    Digit3,
    Digit4,
    Digit5,
    Digit6,
    Digit7,
    Digit8,
    Digit9,
    Minus,
    Equal,
    BracketLeft,
    BracketRight,
    Backslash,
    Semicolon,
    Quote,
    Backquote,
    Comma,
    Period,
    Slash,
    Enter,
    Escape,
    Backspace,
    Tab,
    Space,
    CapsLock,
    NumLock,
    ScrollLock,
    PrintScreen,
    Pause,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
    Control,
    Shift,
    Alt,
    Meta,
    Menu,
}

/// One key with its platform codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyRow {
    pub code: KeyCode,
    /// Unshifted US-layout character, for printable keys.
    pub ch: Option<char>,
    pub x11_keysym: u32,
    pub windows_vk: u16,
    pub macos_keycode: u16,
}

const fn row(code: KeyCode, ch: Option<char>, x11_keysym: u32, windows_vk: u16, macos_keycode: u16) -> KeyRow {
    KeyRow {
        code,
        ch,
        x11_keysym,
        windows_vk,
        macos_keycode,
    }
}

use KeyCode as K;

pub const KEY_TABLE: &[KeyRow] = &[
    // Letters: X11 uses the lowercase Latin-1 keysym, Windows the uppercase ASCII code.
    row(K::KeyA, Some('a'), 0x0061, 0x41, 0x00),
    row(K::KeyB, Some('b'), 0x0062, 0x42, 0x0B),
    row(K::KeyC, Some('c'), 0x0063, 0x43, 0x08),
    row(K::KeyD, Some('d'), 0x0064, 0x44, 0x02),
    row(K::KeyE, Some('e'), 0x0065, 0x45, 0x0E),
    row(K::KeyF, Some('f'), 0x0066, 0x46, 0x03),
    row(K::KeyG, Some('g'), 0x0067, 0x47, 0x05),
    row(K::KeyH, Some('h'), 0x0068, 0x48, 0x04),
    row(K::KeyI, Some('i'), 0x0069, 0x49, 0x22),
    row(K::KeyJ, Some('j'), 0x006A, 0x4A, 0x26),
    row(K::KeyK, Some('k'), 0x006B, 0x4B, 0x28),
    row(K::KeyL, Some('l'), 0x006C, 0x4C, 0x25),
    row(K::KeyM, Some('m'), 0x006D, 0x4D, 0x2E),
    row(K::KeyN, Some('n'), 0x006E, 0x4E, 0x2D),
    row(K::KeyO, Some('o'), 0x006F, 0x4F, 0x1F),
    row(K::KeyP, Some('p'), 0x0070, 0x50, 0x23),
    row(K::KeyQ, Some('q'), 0x0071, 0x51, 0x0C),
    row(K::KeyR, Some('r'), 0x0072, 0x52, 0x0F),
    row(K::KeyS, Some('s'), 0x0073, 0x53, 0x01),
    row(K::KeyT, Some('t'), 0x0074, 0x54, 0x11),
    row(K::KeyU, Some('u'), 0x0075, 0x55, 0x20),
    row(K::KeyV, Some('v'), 0x0076, 0x56, 0x09),
    row(K::KeyW, Some('w'), 0x0077, 0x57, 0x0D),
    row(K::KeyX, Some('x'), 0x0078, 0x58, 0x07),
    row(K::KeyY, Some('y'), 0x0079, 0x59, 0x10),
    row(K::KeyZ, Some('z'), 0x007A, 0x5A, 0x06),
    // Digit row
    row(K::Digit0, Some('0'), 0x0030, 0x30, 0x1D),
    row(K::Digit1, Some('1'), 0x0031, 0x31, 0x12),
    row(K::Digit2, Some('2'), 0x0032, 0x32, 0x13),
    row(K::Digit3, Some('3'), 0x0033, 0x33, 0x14),
    row(K::Digit4, Some('4'), 0x0034, 0x34, 0x15),
    row(K::Digit5, Some('5'), 0x0035, 0x35, 0x17),
    row(K::Digit6, Some('6'), 0x0036, 0x36, 0x16),
    row(K::Digit7, Some('7'), 0x0037, 0x37, 0x1A),
    row(K::Digit8, Some('8'), 0x0038, 0x38, 0x1C),
    row(K::Digit9, Some('9'), 0x0039, 0x39, 0x19),
    // Punctuation (VK_OEM_*)
    row(K::Minus, Some('-'), 0x002D, 0xBD, 0x1B),
    row(K::Equal, Some('='), 0x003D, 0xBB, 0x18),
    row(K::BracketLeft, Some('['), 0x005B, 0xDB, 0x21),
    row(K::BracketRight, Some(']'), 0x005D, 0xDD, 0x1E),
    row(K::Backslash, Some('\\'), 0x005C, 0xDC, 0x2A),
    row(K::Semicolon, Some(';'), 0x003B, 0xBA, 0x29),
    row(K::Quote, Some('\''), 0x0027, 0xDE, 0x27),
    row(K::Backquote, Some('`'), 0x0060, 0xC0, 0x32),
    row(K::Comma, Some(','), 0x002C, 0xBC, 0x2B),
    row(K::Period, Some('.'), 0x002E, 0xBE, 0x2F),
    row(K::Slash, Some('/'), 0x002F, 0xBF, 0x2C),
    // Editing and whitespace
    row(K::Enter, None, 0xFF0D, 0x0D, 0x24),
    row(K::Escape, None, 0xFF1B, 0x1B, 0x35),
    row(K::Backspace, None, 0xFF08, 0x08, 0x33),
    row(K::Tab, None, 0xFF09, 0x09, 0x30),
    row(K::Space, Some(' '), 0x0020, 0x20, 0x31),
    // Locks and system keys. macOS has no Insert/PrintScreen/ScrollLock/Pause;
    // the conventional Help/F13/F14/F15 positions stand in.
    row(K::CapsLock, None, 0xFFE5, 0x14, 0x39),
    row(K::NumLock, None, 0xFF7F, 0x90, 0x47),
    row(K::ScrollLock, None, 0xFF14, 0x91, 0x6B),
    row(K::PrintScreen, None, 0xFF61, 0x2C, 0x69),
    row(K::Pause, None, 0xFF13, 0x13, 0x71),
    row(K::Insert, None, 0xFF63, 0x2D, 0x72),
    row(K::Delete, None, 0xFFFF, 0x2E, 0x75),
    // Navigation
    row(K::Home, None, 0xFF50, 0x24, 0x73),
    row(K::End, None, 0xFF57, 0x23, 0x77),
    row(K::PageUp, None, 0xFF55, 0x21, 0x74),
    row(K::PageDown, None, 0xFF56, 0x22, 0x79),
    row(K::ArrowUp, None, 0xFF52, 0x26, 0x7E),
    row(K::ArrowDown, None, 0xFF54, 0x28, 0x7D),
    row(K::ArrowLeft, None, 0xFF51, 0x25, 0x7B),
    row(K::ArrowRight, None, 0xFF53, 0x27, 0x7C),
    // Function keys
    row(K::F1, None, 0xFFBE, 0x70, 0x7A),
    row(K::F2, None, 0xFFBF, 0x71, 0x78),
    row(K::F3, None, 0xFFC0, 0x72, 0x63),
    row(K::F4, None, 0xFFC1, 0x73, 0x76),
    row(K::F5, None, 0xFFC2, 0x74, 0x60),
    row(K::F6, None, 0xFFC3, 0x75, 0x61),
    row(K::F7, None, 0xFFC4, 0x76, 0x62),
    row(K::F8, None, 0xFFC5, 0x77, 0x64),
    row(K::F9, None, 0xFFC6, 0x78, 0x65),
    row(K::F10, None, 0xFFC7, 0x79, 0x6D),
    row(K::F11, None, 0xFFC8, 0x7A, 0x67),
    row(K::F12, None, 0xFFC9, 0x7B, 0x6F),
    // Modifiers (left-hand variants)
    row(K::Control, None, 0xFFE3, 0x11, 0x3B),
    row(K::Shift, None, 0xFFE1, 0x10, 0x38),
    row(K::Alt, None, 0xFFE9, 0x12, 0x3A),
    row(K::Meta, None, 0xFFEB, 0x5B, 0x37),
    row(K::Menu, None, 0xFF67, 0x5D, 0x6E),
];

impl KeyCode {
    /// The table row for this key.
    pub fn row(self) -> &'static KeyRow {
        // Table rows are in declaration order.
        &KEY_TABLE[self as usize]
    }

    pub fn x11_keysym(self) -> u32 {
        self.row().x11_keysym
    }

    pub fn windows_vk(self) -> u16 {
        self.row().windows_vk
    }

    pub fn macos_keycode(self) -> u16 {
        self.row().macos_keycode
    }

    /// The key that types `c` without modifiers on a US layout.
    pub fn from_char(c: char) -> Option<KeyCode> {
        KEY_TABLE.iter().find(|r| r.ch == Some(c)).map(|r| r.code)
    }

    /// `true` for Control, Shift, Alt and Meta.
    pub fn is_modifier(self) -> bool {
        matches!(self, K::Control | K::Shift | K::Alt | K::Meta)
    }
}
