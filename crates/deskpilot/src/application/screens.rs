//! ScreenService: monitor queries with the public screen numbering.
//!
//! # Screen numbers
//!
//! Every operation that takes a `screen: Option<usize>` uses the same
//! convention: `Some(0)` is the primary monitor, `Some(k)` the k-th other
//! monitor in OS enumeration order, `None` the whole virtual desktop.
//!
//! Nothing here is cached. Each call asks the OS again, so a monitor that
//! was unplugged since the previous call is reported as
//! `InvalidScreenIndex` rather than silently targeted.

use std::sync::Arc;

use deskpilot_core::{MonitorDescriptor, Point, RawMonitor, Rect, ResolvedFrame, ScreenSnapshot};
use thiserror::Error;
use tracing::debug;

use crate::application::error::{AutomationError, Result};

/// Error type for screen enumeration operations.
#[derive(Debug, Error)]
pub enum ScreenInfoError {
    /// The platform API call to enumerate monitors failed.
    #[error("platform API error while enumerating monitors: {0}")]
    PlatformError(String),
}

/// Trait for enumerating monitors on the current platform.
///
/// Implementors return monitors in the OS's own order and must not sort
/// them; the primary is flagged, not moved to the front.
#[cfg_attr(test, mockall::automock)]
pub trait PlatformScreenEnumerator: Send + Sync {
    /// # Errors
    ///
    /// Returns [`ScreenInfoError::PlatformError`] if the OS API call fails.
    fn enumerate_monitors(&self) -> Result<Vec<RawMonitor>, ScreenInfoError>;
}

/// Monitor geometry queries.
#[derive(Clone)]
pub struct ScreenService {
    enumerator: Arc<dyn PlatformScreenEnumerator>,
}

impl ScreenService {
    pub fn new(enumerator: Arc<dyn PlatformScreenEnumerator>) -> Self {
        Self { enumerator }
    }

    /// Enumerates monitors now and indexes them.
    ///
    /// # Errors
    ///
    /// [`AutomationError::EnumerationFailed`] if the OS query fails,
    /// `NoMonitorsFound` if it returns nothing usable.
    pub fn snapshot(&self) -> Result<ScreenSnapshot> {
        let raw = self
            .enumerator
            .enumerate_monitors()
            .map_err(|e| AutomationError::EnumerationFailed(e.to_string()))?;
        debug!(count = raw.len(), "monitors enumerated");
        Ok(ScreenSnapshot::from_raw(raw)?)
    }

    /// Resolves a public screen number against a fresh snapshot.
    pub fn resolve_screen(&self, screen: Option<usize>) -> Result<ResolvedFrame> {
        Ok(self.snapshot()?.resolve_screen(screen)?)
    }

    /// `(width, height)` of a monitor, or of the virtual desktop for `None`.
    pub fn get_screen_size(&self, screen: Option<usize>) -> Result<(u32, u32)> {
        Ok(self.resolve_screen(screen)?.size())
    }

    /// Top-left corner of a monitor in virtual-desktop coordinates.
    ///
    /// For `None` this is the top-left of the virtual desktop bounds.
    pub fn get_screen_offset(&self, screen: Option<usize>) -> Result<Point> {
        Ok(self.resolve_screen(screen)?.desktop_rect().origin())
    }

    /// Every monitor, in enumeration order.
    pub fn get_all_screens(&self) -> Result<Vec<MonitorDescriptor>> {
        Ok(self.snapshot()?.into_monitors())
    }

    /// `(width, height)` of the bounding box around all monitors.
    pub fn get_virtual_screen_size(&self) -> Result<(u32, u32)> {
        Ok(self.get_virtual_screen_bounds()?.size())
    }

    /// Bounding box around all monitors; left/top may be negative.
    pub fn get_virtual_screen_bounds(&self) -> Result<Rect> {
        Ok(self.snapshot()?.virtual_bounds())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
