//! Windows input emulation via `SendInput`.
//!
//! # Absolute coordinates on a multi-monitor desktop
//!
//! `MOUSEEVENTF_ABSOLUTE` takes coordinates normalized to `0..=65535`. With
//! `MOUSEEVENTF_VIRTUALDESK` that range spans the whole virtual screen,
//! whose top-left (`SM_XVIRTUALSCREEN`, `SM_YVIRTUALSCREEN`) can be
//! negative when a monitor sits left of or above the primary. Targets that
//! fall on no monitor at all are refused with `OutOfBounds`.
//!
//! # Characters
//!
//! Text is sent with `KEYEVENTF_UNICODE`, one UTF-16 unit per event, so the
//! result does not depend on the active keyboard layout.

use deskpilot_core::{KeyCode, Point};
use windows::Win32::Foundation::POINT;
use windows::Win32::Graphics::Gdi::{MonitorFromPoint, MONITOR_DEFAULTTONULL};
use windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_KEYBOARD, INPUT_MOUSE, KEYBDINPUT, KEYBD_EVENT_FLAGS, KEYEVENTF_EXTENDEDKEY,
    KEYEVENTF_KEYUP, KEYEVENTF_UNICODE, MOUSEEVENTF_ABSOLUTE, MOUSEEVENTF_HWHEEL, MOUSEEVENTF_LEFTDOWN,
    MOUSEEVENTF_LEFTUP, MOUSEEVENTF_MIDDLEDOWN, MOUSEEVENTF_MIDDLEUP, MOUSEEVENTF_MOVE, MOUSEEVENTF_RIGHTDOWN,
    MOUSEEVENTF_RIGHTUP, MOUSEEVENTF_VIRTUALDESK, MOUSEEVENTF_WHEEL, MOUSEINPUT, MOUSE_EVENT_FLAGS, VIRTUAL_KEY,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetCursorPos, GetSystemMetrics, SM_CXVIRTUALSCREEN, SM_CYVIRTUALSCREEN, SM_XVIRTUALSCREEN, SM_YVIRTUALSCREEN,
};

use crate::application::emulate_input::{EmulationError, MouseButton, PlatformInputEmulator};

/// One wheel notch.
const WHEEL_DELTA: i32 = 120;

/// Virtual keys that need `KEYEVENTF_EXTENDEDKEY`.
const EXTENDED_VKS: &[u16] = &[
    0x21, 0x22, 0x23, 0x24, 0x25, 0x26, 0x27, 0x28, // nav
    0x2D, 0x2E, // Insert, Delete
    0x5B, 0x5C, 0x5D, // Win keys, Apps
    0x90, // NumLock
    0xA3, 0xA5, // Right Ctrl, Right Alt
];

#[derive(Debug, Default)]
pub struct WindowsInputEmulator;

impl WindowsInputEmulator {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformInputEmulator for WindowsInputEmulator {
    fn cursor_position(&self) -> Result<Point, EmulationError> {
        let mut pt = POINT::default();
        // SAFETY: `pt` is a valid out-param on the stack.
        unsafe { GetCursorPos(&mut pt) }.map_err(|e| EmulationError::Platform(format!("GetCursorPos failed: {e}")))?;
        Ok(Point::new(pt.x, pt.y))
    }

    fn emit_mouse_move(&self, x: i32, y: i32) -> Result<(), EmulationError> {
        // SAFETY: MonitorFromPoint only reads its arguments.
        let monitor = unsafe { MonitorFromPoint(POINT { x, y }, MONITOR_DEFAULTTONULL) };
        if monitor.is_invalid() {
            return Err(EmulationError::OutOfBounds { x, y });
        }
        let (dx, dy) = normalize_coords(x, y, virtual_screen());
        send(&[mouse_input(dx, dy, 0, MOUSEEVENTF_MOVE | MOUSEEVENTF_ABSOLUTE | MOUSEEVENTF_VIRTUALDESK)])
    }

    fn emit_mouse_button(&self, button: MouseButton, pressed: bool) -> Result<(), EmulationError> {
        let flags = match (button, pressed) {
            (MouseButton::Left, true) => MOUSEEVENTF_LEFTDOWN,
            (MouseButton::Left, false) => MOUSEEVENTF_LEFTUP,
            (MouseButton::Right, true) => MOUSEEVENTF_RIGHTDOWN,
            (MouseButton::Right, false) => MOUSEEVENTF_RIGHTUP,
            (MouseButton::Middle, true) => MOUSEEVENTF_MIDDLEDOWN,
            (MouseButton::Middle, false) => MOUSEEVENTF_MIDDLEUP,
        };
        send(&[mouse_input(0, 0, 0, flags)])
    }

    fn emit_mouse_scroll(&self, delta_x: i32, delta_y: i32) -> Result<(), EmulationError> {
        if delta_y != 0 {
            send(&[mouse_input(0, 0, wheel_data(delta_y), MOUSEEVENTF_WHEEL)])?;
        }
        if delta_x != 0 {
            send(&[mouse_input(0, 0, wheel_data(delta_x), MOUSEEVENTF_HWHEEL)])?;
        }
        Ok(())
    }

    fn emit_key(&self, key: KeyCode, pressed: bool) -> Result<(), EmulationError> {
        let vk = key.windows_vk();
        let mut flags = KEYBD_EVENT_FLAGS(0);
        if !pressed {
            flags |= KEYEVENTF_KEYUP;
        }
        if EXTENDED_VKS.contains(&vk) {
            flags |= KEYEVENTF_EXTENDEDKEY;
        }
        send(&[key_input(VIRTUAL_KEY(vk), 0, flags)])
    }

    fn emit_char(&self, ch: char, pressed: bool) -> Result<(), EmulationError> {
        let mut flags = KEYEVENTF_UNICODE;
        if !pressed {
            flags |= KEYEVENTF_KEYUP;
        }
        let mut units = [0u16; 2];
        let inputs: Vec<INPUT> = ch
            .encode_utf16(&mut units)
            .iter()
            .map(|&unit| key_input(VIRTUAL_KEY(0), unit, flags))
            .collect();
        send(&inputs)
    }
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// `(left, top, width, height)` of the virtual screen.
fn virtual_screen() -> (i32, i32, i32, i32) {
    // SAFETY: GetSystemMetrics is always safe to call.
    unsafe {
        (
            GetSystemMetrics(SM_XVIRTUALSCREEN),
            GetSystemMetrics(SM_YVIRTUALSCREEN),
            GetSystemMetrics(SM_CXVIRTUALSCREEN),
            GetSystemMetrics(SM_CYVIRTUALSCREEN),
        )
    }
}

/// Maps a virtual-screen pixel to the `0..=65535` absolute range.
fn normalize_coords(x: i32, y: i32, (left, top, width, height): (i32, i32, i32, i32)) -> (i32, i32) {
    fn axis(v: i32, origin: i32, extent: i32) -> i32 {
        if extent <= 1 {
            return 0;
        }
        let scaled = (i64::from(v) - i64::from(origin)) * 65535 / (i64::from(extent) - 1);
        scaled.clamp(0, 65535) as i32
    }
    (axis(x, left, width), axis(y, top, height))
}

fn wheel_data(clicks: i32) -> u32 {
    clicks.saturating_mul(WHEEL_DELTA) as u32
}

fn mouse_input(dx: i32, dy: i32, data: u32, flags: MOUSE_EVENT_FLAGS) -> INPUT {
    INPUT {
        r#type: INPUT_MOUSE,
        Anonymous: INPUT_0 {
            mi: MOUSEINPUT {
                dx,
                dy,
                mouseData: data,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

fn key_input(vk: VIRTUAL_KEY, scan: u16, flags: KEYBD_EVENT_FLAGS) -> INPUT {
    INPUT {
        r#type: INPUT_KEYBOARD,
        Anonymous: INPUT_0 {
            ki: KEYBDINPUT {
                wVk: vk,
                wScan: scan,
                dwFlags: flags,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }
}

fn send(inputs: &[INPUT]) -> Result<(), EmulationError> {
    // SAFETY: every INPUT in the slice is fully initialized.
    let sent = unsafe { SendInput(inputs, std::mem::size_of::<INPUT>() as i32) };
    if sent as usize != inputs.len() {
        return Err(EmulationError::Platform(format!(
            "SendInput accepted {sent} of {} events: {}",
            inputs.len(),
            windows::core::Error::from_win32()
        )));
    }
    Ok(())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
