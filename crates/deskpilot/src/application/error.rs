//! Error type returned by every deskpilot operation.

use std::path::PathBuf;

use deskpilot_core::{KeyError, Rect, ScreenError};
use thiserror::Error;

/// Failure of a screen, capture, pointer or keyboard operation.
///
/// Registry and translator errors pass through unchanged inside
/// [`AutomationError::Screen`]; platform failures carry the geometry or
/// action that was being attempted.
#[derive(Debug, Error)]
pub enum AutomationError {
    /// `NoMonitorsFound`, `InvalidScreenIndex` or `RegionOutOfBounds`.
    #[error(transparent)]
    Screen(#[from] ScreenError),

    /// The OS monitor query itself failed.
    #[error("monitor enumeration failed: {0}")]
    EnumerationFailed(String),

    /// A native backend could not be opened (no X display, missing XTest).
    #[error("platform backend unavailable: {0}")]
    BackendUnavailable(String),

    /// The platform refused a pointer target outside the virtual desktop.
    #[error("position ({x}, {y}) is outside the virtual desktop")]
    PositionOutOfBounds { x: i32, y: i32 },

    #[error("capture of {rect} failed: {reason}")]
    CaptureFailed { rect: Rect, reason: String },

    #[error("input injection failed while trying to {action}: {reason}")]
    InputInjectionFailed { action: String, reason: String },

    #[error(transparent)]
    UnknownKey(#[from] KeyError),

    #[error("unknown button '{0}'; expected left, right or middle")]
    UnknownButton(String),

    #[error("image encoding failed: {0}")]
    Encoding(String),

    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl AutomationError {
    /// Shorthand for [`AutomationError::InputInjectionFailed`].
    pub(crate) fn injection(action: impl Into<String>, reason: impl ToString) -> Self {
        AutomationError::InputInjectionFailed {
            action: action.into(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T, E = AutomationError> = std::result::Result<T, E>;
