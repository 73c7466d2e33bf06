//! Failure kinds raised by the registry and the coordinate translator.

use crate::domain::geometry::Rect;
use thiserror::Error;

/// Errors produced while enumerating, selecting or clipping against monitors.
///
/// These are never recovered locally: a bad screen index is not clamped and
/// an out-of-frame region is not shrunk to nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScreenError {
    /// The OS reported no usable monitor.
    #[error("no monitors found")]
    NoMonitorsFound,

    /// The requested screen does not exist in the current snapshot.
    #[error("screen {requested} not found; available screens: 0-{}", .available.saturating_sub(1))]
    InvalidScreenIndex { requested: usize, available: usize },

    /// The region does not overlap the frame it was requested against.
    #[error("region {region} lies outside the frame bounds {bounds}")]
    RegionOutOfBounds { region: Rect, bounds: Rect },
}
