//! Input-injection port: the narrow interface the pointer and keyboard
//! services use to drive the OS.
//!
//! Implementations live in `infrastructure::input_emulation`, one per OS,
//! plus an in-memory recorder for tests. All coordinates crossing this
//! boundary are **global** virtual-desktop coordinates; the services have
//! already done the screen-local translation.

use std::fmt;
use std::str::FromStr;

use deskpilot_core::{KeyCode, Point};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::application::error::AutomationError;

/// Error type for input emulation operations.
#[derive(Debug, Error)]
pub enum EmulationError {
    #[error("platform error: {0}")]
    Platform(String),
    /// The OS reported the target as lying outside every monitor.
    #[error("position ({x}, {y}) is outside the desktop")]
    OutOfBounds { x: i32, y: i32 },
    #[error("emulator not initialized")]
    NotInitialized,
}

/// A pointer button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseButton {
    #[default]
    Left,
    Right,
    Middle,
}

impl FromStr for MouseButton {
    type Err = AutomationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(MouseButton::Left),
            "right" => Ok(MouseButton::Right),
            "middle" => Ok(MouseButton::Middle),
            _ => Err(AutomationError::UnknownButton(s.to_string())),
        }
    }
}

impl fmt::Display for MouseButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MouseButton::Left => "left",
            MouseButton::Right => "right",
            MouseButton::Middle => "middle",
        };
        f.write_str(name)
    }
}

/// Platform-agnostic input emulation trait.
///
/// Each supported OS provides an implementation in the infrastructure layer.
#[cfg_attr(test, mockall::automock)]
pub trait PlatformInputEmulator: Send + Sync {
    /// Current pointer position in global coordinates.
    fn cursor_position(&self) -> Result<Point, EmulationError>;

    /// Moves the pointer to an absolute global position.
    fn emit_mouse_move(&self, x: i32, y: i32) -> Result<(), EmulationError>;

    /// Presses (`pressed = true`) or releases a button at the current position.
    fn emit_mouse_button(&self, button: MouseButton, pressed: bool) -> Result<(), EmulationError>;

    /// Scrolls by whole wheel clicks. Positive `delta_y` scrolls up,
    /// positive `delta_x` scrolls right.
    fn emit_mouse_scroll(&self, delta_x: i32, delta_y: i32) -> Result<(), EmulationError>;

    /// Presses or releases a physical key.
    fn emit_key(&self, key: KeyCode, pressed: bool) -> Result<(), EmulationError>;

    /// Presses or releases a key that produces `ch`, independent of layout.
    fn emit_char(&self, ch: char, pressed: bool) -> Result<(), EmulationError>;
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_names_parse_case_insensitively() {
        assert_eq!("left".parse::<MouseButton>().unwrap(), MouseButton::Left);
        assert_eq!("RIGHT".parse::<MouseButton>().unwrap(), MouseButton::Right);
        assert_eq!("Middle".parse::<MouseButton>().unwrap(), MouseButton::Middle);
    }

    #[test]
    fn test_unknown_button_is_rejected() {
        let err = "back".parse::<MouseButton>().unwrap_err();
        assert!(matches!(err, AutomationError::UnknownButton(ref b) if b == "back"));
    }

    #[test]
    fn test_button_display_round_trips_through_from_str() {
        for b in [MouseButton::Left, MouseButton::Right, MouseButton::Middle] {
            assert_eq!(b.to_string().parse::<MouseButton>().unwrap(), b);
        }
    }
}
