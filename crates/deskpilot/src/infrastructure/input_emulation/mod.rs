//! Platform-specific input emulation implementations.
//!
//! With the `native` feature the OS backend is selected at compile time via
//! `#[cfg(target_os = ...)]` and re-exported as `NativeInputEmulator`. The
//! recording [`mock::MockInputEmulator`] is always available.

pub mod mock;

#[cfg(all(feature = "native", target_os = "windows"))]
pub mod windows;

#[cfg(all(feature = "native", target_os = "linux"))]
pub mod linux;

#[cfg(all(feature = "native", target_os = "macos"))]
pub mod macos;

pub use crate::application::emulate_input::{EmulationError, MouseButton, PlatformInputEmulator};
pub use mock::{InputEvent, MockInputEmulator};

#[cfg(all(feature = "native", target_os = "windows"))]
pub use windows::WindowsInputEmulator as NativeInputEmulator;

#[cfg(all(feature = "native", target_os = "linux"))]
pub use linux::LinuxXTestEmulator as NativeInputEmulator;

#[cfg(all(feature = "native", target_os = "macos"))]
pub use macos::MacosInputEmulator as NativeInputEmulator;
