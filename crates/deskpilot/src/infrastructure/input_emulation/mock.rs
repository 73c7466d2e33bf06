//! Mock platform input emulator for testing.
//!
//! # Why a mock emulator?
//!
//! The real emulators move the actual cursor and type into whatever window
//! has focus, and need a desktop session to run at all. `MockInputEmulator`
//! records every call as an [`InputEvent`] in one ordered list and keeps a
//! simulated cursor, so tests can assert on exactly what would have been
//! sent.
//!
//! # Usage in tests
//!
//! ```ignore
//! let emulator = Arc::new(MockInputEmulator::new());
//! let desktop = Desktop::new(screens, capturer, emulator.clone(), encoder);
//!
//! desktop.pointer().move_to(0, 0, Some(1))?;
//!
//! assert_eq!(emulator.events(), vec![InputEvent::MouseMove { x: 1920, y: 0 }]);
//! ```
//!
//! # Simulated failures
//!
//! - [`with_desktop`](MockInputEmulator::with_desktop) rejects moves outside
//!   the given rectangle with `OutOfBounds`, like an OS that refuses to
//!   place the cursor off-screen.
//! - [`set_failing`](MockInputEmulator::set_failing) makes every call fail.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use deskpilot_core::{KeyCode, Point, Rect};

use crate::application::emulate_input::{EmulationError, MouseButton, PlatformInputEmulator};

/// One call recorded by [`MockInputEmulator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    MouseMove { x: i32, y: i32 },
    MouseButton { button: MouseButton, pressed: bool },
    Scroll { delta_x: i32, delta_y: i32 },
    Key { key: KeyCode, pressed: bool },
    Char { ch: char, pressed: bool },
}

/// Records input instead of sending it.
#[derive(Debug, Default)]
pub struct MockInputEmulator {
    events: Mutex<Vec<InputEvent>>,
    cursor: Mutex<Point>,
    desktop: Option<Rect>,
    failing: AtomicBool,
}

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockInputEmulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves outside `desktop` (global coordinates) fail with `OutOfBounds`.
    pub fn with_desktop(desktop: Rect) -> Self {
        Self {
            desktop: Some(desktop),
            ..Self::default()
        }
    }

    /// All events recorded so far, oldest first.
    pub fn events(&self) -> Vec<InputEvent> {
        lock(&self.events).clone()
    }

    /// Returns and clears the recorded events.
    pub fn take_events(&self) -> Vec<InputEvent> {
        std::mem::take(&mut *lock(&self.events))
    }

    /// Only the pointer moves, as `(x, y)` pairs.
    pub fn moves(&self) -> Vec<(i32, i32)> {
        lock(&self.events)
            .iter()
            .filter_map(|e| match *e {
                InputEvent::MouseMove { x, y } => Some((x, y)),
                _ => None,
            })
            .collect()
    }

    pub fn cursor(&self) -> Point {
        *lock(&self.cursor)
    }

    /// Places the simulated cursor without recording a move.
    pub fn set_cursor(&self, p: Point) {
        *lock(&self.cursor) = p;
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn record(&self, event: InputEvent) -> Result<(), EmulationError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(EmulationError::Platform("simulated failure".to_string()));
        }
        lock(&self.events).push(event);
        Ok(())
    }
}

impl PlatformInputEmulator for MockInputEmulator {
    fn cursor_position(&self) -> Result<Point, EmulationError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(EmulationError::Platform("simulated failure".to_string()));
        }
        Ok(self.cursor())
    }

    fn emit_mouse_move(&self, x: i32, y: i32) -> Result<(), EmulationError> {
        if let Some(desktop) = self.desktop {
            if !desktop.contains(Point::new(x, y)) {
                return Err(EmulationError::OutOfBounds { x, y });
            }
        }
        self.record(InputEvent::MouseMove { x, y })?;
        self.set_cursor(Point::new(x, y));
        Ok(())
    }

    fn emit_mouse_button(&self, button: MouseButton, pressed: bool) -> Result<(), EmulationError> {
        self.record(InputEvent::MouseButton { button, pressed })
    }

    fn emit_mouse_scroll(&self, delta_x: i32, delta_y: i32) -> Result<(), EmulationError> {
        self.record(InputEvent::Scroll { delta_x, delta_y })
    }

    fn emit_key(&self, key: KeyCode, pressed: bool) -> Result<(), EmulationError> {
        self.record(InputEvent::Key { key, pressed })
    }

    fn emit_char(&self, ch: char, pressed: bool) -> Result<(), EmulationError> {
        self.record(InputEvent::Char { ch, pressed })
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
