//! Platform-specific monitor enumeration.
//!
//! # Platform implementations
//!
//! Each platform implements [`PlatformScreenEnumerator`]; with the `native`
//! feature the right one is re-exported as `NativeScreenEnumerator`:
//!
//! | Module    | OS      | API used                                     |
//! |-----------|---------|----------------------------------------------|
//! | `windows` | Windows | `EnumDisplayMonitors` + `GetMonitorInfoW`    |
//! | `linux`   | Linux   | `XRRGetMonitors` (XRandR 1.5)                |
//! | `macos`   | macOS   | `CGGetActiveDisplayList` + `CGDisplayBounds` |
//!
//! A [`MockScreenEnumerator`] is always compiled so tests on any platform
//! can describe a monitor layout without a physical display.
//!
//! All implementations report monitors in the OS's own order. None of them
//! sorts the primary to the front; the registry does the screen numbering.

use std::sync::{Mutex, PoisonError};

use deskpilot_core::RawMonitor;

pub use crate::application::screens::{PlatformScreenEnumerator, ScreenInfoError};

#[cfg(all(feature = "native", target_os = "windows"))]
pub mod windows;

#[cfg(all(feature = "native", target_os = "linux"))]
pub mod linux;

#[cfg(all(feature = "native", target_os = "macos"))]
pub mod macos;

#[cfg(all(feature = "native", target_os = "windows"))]
pub use windows::WindowsScreenEnumerator as NativeScreenEnumerator;

#[cfg(all(feature = "native", target_os = "linux"))]
pub use linux::LinuxScreenEnumerator as NativeScreenEnumerator;

#[cfg(all(feature = "native", target_os = "macos"))]
pub use macos::MacosScreenEnumerator as NativeScreenEnumerator;

// ── Mock ──────────────────────────────────────────────────────────────────────

/// In-memory enumerator with a replaceable monitor list.
///
/// [`set_monitors`](Self::set_monitors) swaps the layout between calls,
/// which is how tests simulate a monitor being plugged in or removed.
#[derive(Debug, Default)]
pub struct MockScreenEnumerator {
    monitors: Mutex<Vec<RawMonitor>>,
    failure: Mutex<Option<String>>,
}

impl MockScreenEnumerator {
    pub fn new(monitors: Vec<RawMonitor>) -> Self {
        Self {
            monitors: Mutex::new(monitors),
            failure: Mutex::new(None),
        }
    }

    /// One 1920x1080 primary at the origin.
    pub fn single_1080p() -> Self {
        Self::new(vec![RawMonitor::new("Mock-0", 0, 0, 1920, 1080).primary()])
    }

    /// Two 2560x1440 monitors side by side, primary on the left.
    pub fn dual_1440p() -> Self {
        Self::new(vec![
            RawMonitor::new("Mock-0", 0, 0, 2560, 1440).primary(),
            RawMonitor::new("Mock-1", 2560, 0, 2560, 1440),
        ])
    }

    /// 1920x1080 primary with a 1280x1024 monitor to its right.
    pub fn side_by_side() -> Self {
        Self::new(vec![
            RawMonitor::new("Mock-0", 0, 0, 1920, 1080).primary(),
            RawMonitor::new("Mock-1", 1920, 0, 1280, 1024),
        ])
    }

    /// Replaces the layout returned by later calls.
    pub fn set_monitors(&self, monitors: Vec<RawMonitor>) {
        *self.monitors.lock().unwrap_or_else(PoisonError::into_inner) = monitors;
    }

    /// Makes later calls fail with `reason` (`None` restores success).
    pub fn set_failure(&self, reason: Option<&str>) {
        *self.failure.lock().unwrap_or_else(PoisonError::into_inner) = reason.map(str::to_string);
    }
}

impl PlatformScreenEnumerator for MockScreenEnumerator {
    fn enumerate_monitors(&self) -> Result<Vec<RawMonitor>, ScreenInfoError> {
        if let Some(reason) = self.failure.lock().unwrap_or_else(PoisonError::into_inner).clone() {
            return Err(ScreenInfoError::PlatformError(reason));
        }
        Ok(self.monitors.lock().unwrap_or_else(PoisonError::into_inner).clone())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_single_1080p_returns_one_primary() {
        let monitors = MockScreenEnumerator::single_1080p().enumerate_monitors().unwrap();
        assert_eq!(monitors.len(), 1);
        assert!(monitors[0].is_primary);
        assert_eq!((monitors[0].width, monitors[0].height), (1920, 1080));
    }

    #[test]
    fn test_mock_dual_1440p_places_second_monitor_right_of_first() {
        let monitors = MockScreenEnumerator::dual_1440p().enumerate_monitors().unwrap();
        assert_eq!(monitors[1].x, 2560);
        assert!(!monitors[1].is_primary);
    }

    #[test]
    fn test_set_monitors_changes_next_enumeration() {
        // Arrange
        let mock = MockScreenEnumerator::side_by_side();

        // Act
        mock.set_monitors(vec![RawMonitor::new("only", 0, 0, 800, 600).primary()]);

        // Assert
        let monitors = mock.enumerate_monitors().unwrap();
        assert_eq!(monitors.len(), 1);
        assert_eq!(monitors[0].name, "only");
    }

    #[test]
    fn test_set_failure_makes_enumeration_fail_until_cleared() {
        let mock = MockScreenEnumerator::single_1080p();

        mock.set_failure(Some("display went away"));
        assert!(mock.enumerate_monitors().is_err());

        mock.set_failure(None);
        assert!(mock.enumerate_monitors().is_ok());
    }
}
