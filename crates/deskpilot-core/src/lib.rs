//! # deskpilot-core
//!
//! Platform-independent heart of deskpilot: the multi-monitor coordinate
//! model, the screen registry logic, and the key-name tables.
//!
//! This crate has zero dependencies on OS APIs. Everything that talks to the
//! operating system lives in the `deskpilot` crate behind small traits, and
//! feeds this crate plain data ([`RawMonitor`] lists, pointer positions).
//!
//! # Architecture overview (for beginners)
//!
//! A desktop with several monitors is one big coordinate plane, the
//! *virtual desktop*. Each monitor is a rectangle somewhere on that plane;
//! its top-left corner may even sit at negative coordinates when it is placed
//! left of or above the primary monitor.
//!
//! Callers usually want to think in *screen-local* coordinates ("pixel
//! (500, 300) on screen 1"). This crate turns such requests into global
//! coordinates in three small steps:
//!
//! 1. **`domain::snapshot`** – index the monitors the OS reported, pick the
//!    primary, compute the bounding box of the whole desktop.
//! 2. **`domain::selector`** – map the caller's screen number
//!    (`0` = primary, `1+` = the others, `None` = everything) to an explicit
//!    [`ScreenSelector`].
//! 3. **`domain::translate`** – move points and regions between the resolved
//!    frame and the virtual desktop, clipping regions to the frame.
//!
//! - **`keymap`** – normalized key names, per-platform key codes, and
//!   platform-aware shortcut combinations.
//! - **`platform`** – which OS and display server we are running on.

pub mod domain;
pub mod keymap;
pub mod platform;

pub use domain::error::ScreenError;
pub use domain::frame::ResolvedFrame;
pub use domain::geometry::{Point, Rect, Region};
pub use domain::monitor::{MonitorDescriptor, RawMonitor};
pub use domain::pixels::{PixelBuffer, PixelBufferError};
pub use domain::selector::{remap_screen, ScreenSelector};
pub use domain::snapshot::ScreenSnapshot;
pub use keymap::{control_char_key, parse_key, Key, KeyCode, KeyError};
pub use keymap::shortcuts::Shortcut;
pub use platform::{DisplayServer, Platform};
