//! Linux X11 input emulation via the XTest extension.
//!
//! # What is XTest? (for beginners)
//!
//! XTest is an X11 protocol extension that lets a process synthesize keyboard
//! and mouse events as if the user had physically interacted with the
//! hardware. The receiving application cannot tell them from real input.
//!
//! - `XTestFakeKeyEvent(display, keycode, is_press, delay)`
//! - `XTestFakeMotionEvent(display, screen, x, y, delay)`
//! - `XTestFakeButtonEvent(display, button, is_press, delay)`
//!
//! # Key code translation
//!
//! `XTestFakeKeyEvent` takes a server *keycode*, not a KeySym:
//!
//! ```text
//! KeyCode → X11 KeySym → XKeysymToKeycode(display, keysym) → X11 keycode
//! ```
//!
//! Characters go through the same path with the KeySym derived from the
//! code point. Shifted characters are sent with Shift held around them.
//!
//! # Mouse scroll via button events
//!
//! | Button | Direction |
//! |--------|-----------|
//! | 4      | Up        |
//! | 5      | Down      |
//! | 6      | Left      |
//! | 7      | Right     |

use std::os::raw::{c_int, c_uint, c_ulong};
use std::sync::{Mutex, MutexGuard, PoisonError};

use deskpilot_core::{KeyCode, Point};
use tracing::debug;
use x11::{xlib, xtest};

use crate::application::emulate_input::{EmulationError, MouseButton, PlatformInputEmulator};
use crate::infrastructure::x11_display::XDisplay;

// ── X11 constants ─────────────────────────────────────────────────────────────

/// No artificial delay; the server timestamps the event itself.
const CURRENT_TIME: c_ulong = 0;

/// `-1` means the screen that currently holds the pointer.
const SCREEN_DEFAULT: c_int = -1;

const XK_SHIFT_L: u32 = 0xFFE1;

/// Linux X11/XTest input emulator.
pub struct LinuxXTestEmulator {
    display: Mutex<XDisplay>,
}

impl LinuxXTestEmulator {
    /// Connects to the X display.
    ///
    /// # Errors
    ///
    /// Returns `EmulationError::Platform` if the X display cannot be opened
    /// or the server lacks the XTest extension.
    pub fn new() -> Result<Self, EmulationError> {
        let display = XDisplay::open().map_err(EmulationError::Platform)?;

        let (mut event_base, mut error_base, mut major, mut minor) = (0, 0, 0, 0);
        // SAFETY: `display` is a live connection; the out-params are locals.
        let has_xtest = unsafe {
            xtest::XTestQueryExtension(display.as_ptr(), &mut event_base, &mut error_base, &mut major, &mut minor)
        };
        if has_xtest == 0 {
            return Err(EmulationError::Platform("X server has no XTest extension".to_string()));
        }
        debug!(major, minor, "XTest available");

        Ok(Self {
            display: Mutex::new(display),
        })
    }

    fn display(&self) -> MutexGuard<'_, XDisplay> {
        self.display.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn keycode_for(display: &XDisplay, keysym: u32) -> Result<u8, EmulationError> {
        // SAFETY: `display` is a live connection.
        let code = unsafe { xlib::XKeysymToKeycode(display.as_ptr(), xlib::KeySym::from(keysym)) };
        if code == 0 {
            return Err(EmulationError::Platform(format!(
                "keysym {keysym:#x} is not on the current keyboard layout"
            )));
        }
        Ok(code)
    }

    fn fake_key(display: &XDisplay, keycode: u8, pressed: bool) -> Result<(), EmulationError> {
        // SAFETY: `display` is a live connection.
        let ok = unsafe {
            xtest::XTestFakeKeyEvent(display.as_ptr(), c_uint::from(keycode), to_bool(pressed), CURRENT_TIME)
        };
        if ok == 0 {
            return Err(EmulationError::Platform("XTestFakeKeyEvent failed".to_string()));
        }
        Ok(())
    }

    fn fake_button(display: &XDisplay, button: c_uint, pressed: bool) -> Result<(), EmulationError> {
        // SAFETY: `display` is a live connection.
        let ok = unsafe { xtest::XTestFakeButtonEvent(display.as_ptr(), button, to_bool(pressed), CURRENT_TIME) };
        if ok == 0 {
            return Err(EmulationError::Platform("XTestFakeButtonEvent failed".to_string()));
        }
        Ok(())
    }

    /// Whether the keycode produces `keysym` only with Shift held.
    fn needs_shift(display: &XDisplay, keycode: u8, keysym: u32) -> bool {
        // SAFETY: `display` is a live connection.
        let unshifted = unsafe { xlib::XKeycodeToKeysym(display.as_ptr(), keycode, 0) };
        unshifted != xlib::KeySym::from(keysym)
    }
}

impl PlatformInputEmulator for LinuxXTestEmulator {
    fn cursor_position(&self) -> Result<Point, EmulationError> {
        let display = self.display();
        let (mut root_ret, mut child_ret) = (0, 0);
        let (mut root_x, mut root_y, mut win_x, mut win_y) = (0, 0, 0, 0);
        let mut mask = 0;
        // SAFETY: `display` is live; every out-param is a local.
        let ok = unsafe {
            xlib::XQueryPointer(
                display.as_ptr(),
                display.root(),
                &mut root_ret,
                &mut child_ret,
                &mut root_x,
                &mut root_y,
                &mut win_x,
                &mut win_y,
                &mut mask,
            )
        };
        if ok == 0 {
            return Err(EmulationError::Platform("pointer is on another X screen".to_string()));
        }
        Ok(Point::new(root_x, root_y))
    }

    fn emit_mouse_move(&self, x: i32, y: i32) -> Result<(), EmulationError> {
        let display = self.display();
        let (width, height) = display.root_size();
        if x < 0 || y < 0 || x >= width || y >= height {
            return Err(EmulationError::OutOfBounds { x, y });
        }
        // SAFETY: `display` is a live connection.
        let ok = unsafe { xtest::XTestFakeMotionEvent(display.as_ptr(), SCREEN_DEFAULT, x, y, CURRENT_TIME) };
        if ok == 0 {
            return Err(EmulationError::Platform("XTestFakeMotionEvent failed".to_string()));
        }
        display.flush();
        Ok(())
    }

    fn emit_mouse_button(&self, button: MouseButton, pressed: bool) -> Result<(), EmulationError> {
        let display = self.display();
        Self::fake_button(&display, button_number(button), pressed)?;
        display.flush();
        Ok(())
    }

    fn emit_mouse_scroll(&self, delta_x: i32, delta_y: i32) -> Result<(), EmulationError> {
        let display = self.display();
        for (button, clicks) in scroll_buttons(delta_x, delta_y) {
            for _ in 0..clicks {
                Self::fake_button(&display, button, true)?;
                Self::fake_button(&display, button, false)?;
            }
        }
        display.flush();
        Ok(())
    }

    fn emit_key(&self, key: KeyCode, pressed: bool) -> Result<(), EmulationError> {
        let display = self.display();
        let keycode = Self::keycode_for(&display, key.x11_keysym())?;
        Self::fake_key(&display, keycode, pressed)?;
        display.flush();
        Ok(())
    }

    fn emit_char(&self, ch: char, pressed: bool) -> Result<(), EmulationError> {
        let display = self.display();
        let keysym = char_to_keysym(ch);
        let keycode = Self::keycode_for(&display, keysym)?;
        let shift = if Self::needs_shift(&display, keycode, keysym) {
            Some(Self::keycode_for(&display, XK_SHIFT_L)?)
        } else {
            None
        };

        if pressed {
            if let Some(shift) = shift {
                Self::fake_key(&display, shift, true)?;
            }
            Self::fake_key(&display, keycode, true)?;
        } else {
            Self::fake_key(&display, keycode, false)?;
            if let Some(shift) = shift {
                Self::fake_key(&display, shift, false)?;
            }
        }
        display.flush();
        Ok(())
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

fn to_bool(b: bool) -> c_int {
    if b {
        xlib::True
    } else {
        xlib::False
    }
}

fn button_number(button: MouseButton) -> c_uint {
    match button {
        MouseButton::Left => 1,
        MouseButton::Middle => 2,
        MouseButton::Right => 3,
    }
}

/// Wheel buttons and click counts, vertical first.
fn scroll_buttons(delta_x: i32, delta_y: i32) -> Vec<(c_uint, u32)> {
    let mut out = Vec::with_capacity(2);
    if delta_y != 0 {
        out.push((if delta_y > 0 { 4 } else { 5 }, delta_y.unsigned_abs()));
    }
    if delta_x != 0 {
        out.push((if delta_x > 0 { 7 } else { 6 }, delta_x.unsigned_abs()));
    }
    out
}

/// Latin-1 code points are their own KeySyms; everything else uses the
/// Unicode KeySym range.
fn char_to_keysym(ch: char) -> u32 {
    match ch {
        '\n' | '\r' => 0xFF0D,
        '\t' => 0xFF09,
        '\u{8}' => 0xFF08,
        c if (' '..='~').contains(&c) || ('\u{A0}'..='\u{FF}').contains(&c) => c as u32,
        c => 0x0100_0000 + c as u32,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_to_keysym_latin1_is_identity() {
        assert_eq!(char_to_keysym('a'), 0x61);
        assert_eq!(char_to_keysym('é'), 0xE9);
    }

    #[test]
    fn test_char_to_keysym_uses_unicode_range_above_latin1() {
        assert_eq!(char_to_keysym('€'), 0x0100_20AC);
    }

    #[test]
    fn test_char_to_keysym_control_characters() {
        assert_eq!(char_to_keysym('\n'), 0xFF0D);
        assert_eq!(char_to_keysym('\t'), 0xFF09);
    }

    #[test]
    fn test_scroll_buttons_vertical_before_horizontal() {
        assert_eq!(scroll_buttons(-2, 3), vec![(4, 3), (6, 2)]);
        assert_eq!(scroll_buttons(1, -1), vec![(5, 1), (7, 1)]);
        assert!(scroll_buttons(0, 0).is_empty());
    }

    #[test]
    fn test_button_numbers_follow_x11_convention() {
        assert_eq!(button_number(MouseButton::Left), 1);
        assert_eq!(button_number(MouseButton::Middle), 2);
        assert_eq!(button_number(MouseButton::Right), 3);
    }

    #[test]
    fn test_linux_emulator_smoke() {
        let result = LinuxXTestEmulator::new();
        if std::env::var("DISPLAY").is_err() {
            assert!(result.is_err(), "construction must fail without DISPLAY");
        }
    }
}
