//! deskpilot library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the binary entry point in `main.rs` share the same module tree.
//!
//! # What does deskpilot do? (for beginners)
//!
//! deskpilot drives a desktop the way a person would: it takes screenshots,
//! moves and clicks the mouse, and types. The hard part is *where*. A
//! desktop with several monitors is one big coordinate space (the virtual
//! desktop) in which each monitor occupies a rectangle, possibly at
//! negative coordinates. Callers think in terms of "screen 1, pixel
//! (100, 50)"; the OS wants global coordinates.
//!
//! 1. Every call enumerates the monitors afresh (`ScreenService`).
//! 2. The caller's screen number is mapped to a monitor: `0` is always the
//!    primary, `1..` the other monitors in OS order, `None` the whole
//!    virtual desktop.
//! 3. Screen-local coordinates are translated to global ones (and regions
//!    clipped) by `deskpilot_core`.
//! 4. A platform adapter captures pixels or injects input.
//!
//! ```ignore
//! use deskpilot::infrastructure::native_desktop;
//!
//! let desktop = native_desktop()?;
//! desktop.pointer().click_at(100, 50, MouseButton::Left, Some(1))?;
//! desktop.capture().screenshot_to_file("shot.png", None, Some(1), None)?;
//! ```

/// Application layer: ports and use cases.
pub mod application;

/// Infrastructure layer: OS adapters, mocks, encoding, config and logging.
pub mod infrastructure;

pub use application::capture::{CaptureService, ImageFormat};
pub use application::desktop::Desktop;
pub use application::emulate_input::MouseButton;
pub use application::error::{AutomationError, Result};
pub use application::keyboard::KeyboardService;
pub use application::pointer::{DragOptions, PointerService, DEFAULT_SCROLL_AMOUNT};
pub use application::screens::ScreenService;
