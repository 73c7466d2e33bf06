//! macOS input emulation via Core Graphics events.
//!
//! Events are created from a `HIDSystemState` source and posted at the HID
//! tap, so they look like hardware input to every application. The process
//! needs the Accessibility permission; without it macOS silently drops them.
//!
//! Pointer moves while a button is held are sent as `*MouseDragged` events,
//! otherwise applications see a hover instead of a drag.

use std::sync::{Mutex, PoisonError};

use core_graphics::display::CGDisplay;
use core_graphics::event::{CGEvent, CGEventTapLocation, CGEventType, CGMouseButton, ScrollEventUnit};
use core_graphics::event_source::{CGEventSource, CGEventSourceStateID};
use core_graphics::geometry::CGPoint;
use deskpilot_core::{KeyCode, Point};

use crate::application::emulate_input::{EmulationError, MouseButton, PlatformInputEmulator};

#[derive(Debug, Default)]
pub struct MacosInputEmulator {
    held: Mutex<Option<MouseButton>>,
}

impl MacosInputEmulator {
    pub fn new() -> Self {
        Self::default()
    }

    fn held(&self) -> Option<MouseButton> {
        *self.held.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_held(&self, button: Option<MouseButton>) {
        *self.held.lock().unwrap_or_else(PoisonError::into_inner) = button;
    }
}

fn source() -> Result<CGEventSource, EmulationError> {
    CGEventSource::new(CGEventSourceStateID::HIDSystemState)
        .map_err(|_| EmulationError::Platform("CGEventSourceCreate failed".to_string()))
}

fn current_location() -> Result<CGPoint, EmulationError> {
    let event = CGEvent::new(source()?).map_err(|_| EmulationError::Platform("CGEventCreate failed".to_string()))?;
    Ok(event.location())
}

fn on_any_display(x: i32, y: i32) -> Result<bool, EmulationError> {
    let ids = CGDisplay::active_displays()
        .map_err(|code| EmulationError::Platform(format!("CGGetActiveDisplayList failed: {code}")))?;
    let (fx, fy) = (f64::from(x), f64::from(y));
    Ok(ids.into_iter().any(|id| {
        let b = CGDisplay::new(id).bounds();
        fx >= b.origin.x && fx < b.origin.x + b.size.width && fy >= b.origin.y && fy < b.origin.y + b.size.height
    }))
}

fn cg_button(button: MouseButton) -> CGMouseButton {
    match button {
        MouseButton::Left => CGMouseButton::Left,
        MouseButton::Right => CGMouseButton::Right,
        MouseButton::Middle => CGMouseButton::Center,
    }
}

fn button_event_type(button: MouseButton, pressed: bool) -> CGEventType {
    match (button, pressed) {
        (MouseButton::Left, true) => CGEventType::LeftMouseDown,
        (MouseButton::Left, false) => CGEventType::LeftMouseUp,
        (MouseButton::Right, true) => CGEventType::RightMouseDown,
        (MouseButton::Right, false) => CGEventType::RightMouseUp,
        (MouseButton::Middle, true) => CGEventType::OtherMouseDown,
        (MouseButton::Middle, false) => CGEventType::OtherMouseUp,
    }
}

fn move_event_type(held: Option<MouseButton>) -> CGEventType {
    match held {
        None => CGEventType::MouseMoved,
        Some(MouseButton::Left) => CGEventType::LeftMouseDragged,
        Some(MouseButton::Right) => CGEventType::RightMouseDragged,
        Some(MouseButton::Middle) => CGEventType::OtherMouseDragged,
    }
}

impl PlatformInputEmulator for MacosInputEmulator {
    fn cursor_position(&self) -> Result<Point, EmulationError> {
        let loc = current_location()?;
        Ok(Point::new(loc.x.round() as i32, loc.y.round() as i32))
    }

    fn emit_mouse_move(&self, x: i32, y: i32) -> Result<(), EmulationError> {
        if !on_any_display(x, y)? {
            return Err(EmulationError::OutOfBounds { x, y });
        }
        let held = self.held();
        let button = cg_button(held.unwrap_or_default());
        let point = CGPoint::new(f64::from(x), f64::from(y));
        let event = CGEvent::new_mouse_event(source()?, move_event_type(held), point, button)
            .map_err(|_| EmulationError::Platform("CGEventCreateMouseEvent failed".to_string()))?;
        event.post(CGEventTapLocation::HID);
        Ok(())
    }

    fn emit_mouse_button(&self, button: MouseButton, pressed: bool) -> Result<(), EmulationError> {
        let at = current_location()?;
        let event = CGEvent::new_mouse_event(source()?, button_event_type(button, pressed), at, cg_button(button))
            .map_err(|_| EmulationError::Platform("CGEventCreateMouseEvent failed".to_string()))?;
        event.post(CGEventTapLocation::HID);
        self.set_held(pressed.then_some(button));
        Ok(())
    }

    fn emit_mouse_scroll(&self, delta_x: i32, delta_y: i32) -> Result<(), EmulationError> {
        // wheel1 is vertical (positive = up), wheel2 horizontal (positive = left).
        let event = CGEvent::new_scroll_event(source()?, ScrollEventUnit::LINE, 2, delta_y, -delta_x, 0)
            .map_err(|_| EmulationError::Platform("CGEventCreateScrollWheelEvent failed".to_string()))?;
        event.post(CGEventTapLocation::HID);
        Ok(())
    }

    fn emit_key(&self, key: KeyCode, pressed: bool) -> Result<(), EmulationError> {
        let event = CGEvent::new_keyboard_event(source()?, key.macos_keycode(), pressed)
            .map_err(|_| EmulationError::Platform("CGEventCreateKeyboardEvent failed".to_string()))?;
        event.post(CGEventTapLocation::HID);
        Ok(())
    }

    fn emit_char(&self, ch: char, pressed: bool) -> Result<(), EmulationError> {
        let event = CGEvent::new_keyboard_event(source()?, 0, pressed)
            .map_err(|_| EmulationError::Platform("CGEventCreateKeyboardEvent failed".to_string()))?;
        let mut buf = [0u8; 4];
        event.set_string(ch.encode_utf8(&mut buf));
        event.post(CGEventTapLocation::HID);
        Ok(())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
