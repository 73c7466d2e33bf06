//! Infrastructure layer: OS adapters for the application ports.
//!
//! # What lives here?
//!
//! - **`screen_info`** – monitor enumeration (XRandR, `EnumDisplayMonitors`,
//!   `CGGetActiveDisplayList`).
//! - **`capture`** – screen capture (`XGetImage`, GDI, Core Graphics).
//! - **`input_emulation`** – synthetic pointer and keyboard events (XTest,
//!   `SendInput`, `CGEvent`).
//! - **`encoding`** – PNG / JPEG / BMP output via the `image` crate.
//! - **`storage`** – the TOML config file.
//! - **`logging`** – `tracing` subscriber setup.
//!
//! Native backends are compiled only with the `native` feature. Each
//! adapter module also has a public in-memory mock that works everywhere.

pub mod capture;
pub mod encoding;
pub mod input_emulation;
pub mod logging;
pub mod screen_info;
pub mod storage;

#[cfg(all(feature = "native", target_os = "linux"))]
mod x11_display;

#[cfg(all(feature = "native", any(target_os = "linux", target_os = "windows", target_os = "macos")))]
pub use native::native_desktop;

#[cfg(all(feature = "native", any(target_os = "linux", target_os = "windows", target_os = "macos")))]
mod native {
    use std::sync::Arc;

    use tracing::info;

    use super::capture::NativeCapturer;
    use super::encoding::ImageCrateEncoder;
    use super::input_emulation::NativeInputEmulator;
    use super::screen_info::NativeScreenEnumerator;
    use crate::application::desktop::Desktop;
    use crate::application::error::Result;

    /// A [`Desktop`] wired to this OS's backends.
    ///
    /// # Errors
    ///
    /// [`crate::application::error::AutomationError::BackendUnavailable`]
    /// if the display connection or input extension cannot be opened.
    pub fn native_desktop() -> Result<Desktop> {
        #[cfg(target_os = "linux")]
        let (capturer, emulator) = {
            use crate::application::error::AutomationError;
            (
                NativeCapturer::new().map_err(|e| AutomationError::BackendUnavailable(e.to_string()))?,
                NativeInputEmulator::new().map_err(|e| AutomationError::BackendUnavailable(e.to_string()))?,
            )
        };
        #[cfg(not(target_os = "linux"))]
        let (capturer, emulator) = (NativeCapturer::new(), NativeInputEmulator::new());

        info!(platform = ?deskpilot_core::Platform::current(), "native backends ready");
        Ok(Desktop::new(
            Arc::new(NativeScreenEnumerator::new()),
            Arc::new(capturer),
            Arc::new(emulator),
            Arc::new(ImageCrateEncoder::new()),
        ))
    }
}
