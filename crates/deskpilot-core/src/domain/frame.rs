//! The coordinate context a position or region is interpreted in.

use crate::domain::geometry::{Point, Rect};
use crate::domain::monitor::MonitorDescriptor;

/// Result of resolving a [`crate::ScreenSelector`] against a snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedFrame {
    /// A single monitor; positions are local to its top-left corner.
    Monitor(MonitorDescriptor),
    /// The whole virtual desktop; positions are already global.
    Combined(Rect),
}

impl ResolvedFrame {
    /// Translation origin: the monitor's top-left corner, or `(0, 0)` for the
    /// combined desktop.
    pub fn origin(&self) -> Point {
        match self {
            Self::Monitor(m) => m.origin(),
            Self::Combined(_) => Point::new(0, 0),
        }
    }

    /// Area regions are clipped against, in this frame's own coordinates.
    pub fn bounds(&self) -> Rect {
        match self {
            Self::Monitor(m) => Rect::new(0, 0, m.width(), m.height()),
            Self::Combined(bounds) => *bounds,
        }
    }

    /// Footprint of the frame in virtual-desktop coordinates.
    pub fn desktop_rect(&self) -> Rect {
        match self {
            Self::Monitor(m) => m.rect(),
            Self::Combined(bounds) => *bounds,
        }
    }

    pub fn size(&self) -> (u32, u32) {
        self.desktop_rect().size()
    }

    pub fn monitor(&self) -> Option<&MonitorDescriptor> {
        match self {
            Self::Monitor(m) => Some(m),
            Self::Combined(_) => None,
        }
    }
}
