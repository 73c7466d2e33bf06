//! Monitor descriptors.

use crate::domain::geometry::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One monitor exactly as a platform enumerator reported it.
///
/// Nothing is validated here; [`crate::ScreenSnapshot::from_raw`] drops
/// degenerate entries and settles the primary flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawMonitor {
    /// OS-provided name (`"DP-1"`, `"\\\\.\\DISPLAY1"`, ...). May be empty.
    pub name: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    pub is_primary: bool,
}

impl RawMonitor {
    /// A non-primary monitor at `(x, y)` with the given size.
    pub fn new(name: impl Into<String>, x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            width,
            height,
            is_primary: false,
        }
    }

    /// Marks this monitor as the one the OS designates primary.
    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Zero width or height.
    pub fn is_degenerate(&self) -> bool {
        self.rect().is_empty()
    }
}

/// Immutable description of one physical monitor inside a snapshot.
///
/// Only a [`crate::ScreenSnapshot`] creates these, which guarantees
/// `width > 0`, `height > 0` and a single primary per snapshot. The `index`
/// is the raw enumeration position and means nothing outside the snapshot
/// that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct MonitorDescriptor {
    index: usize,
    name: String,
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    is_primary: bool,
}

impl MonitorDescriptor {
    pub(crate) fn from_raw(index: usize, raw: RawMonitor, is_primary: bool) -> Self {
        let name = if raw.name.trim().is_empty() {
            format!("Screen {index}")
        } else {
            raw.name
        };
        Self {
            index,
            name,
            x: raw.x,
            y: raw.y,
            width: raw.width,
            height: raw.height,
            is_primary,
        }
    }

    /// Raw enumeration index within the snapshot.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn is_primary(&self) -> bool {
        self.is_primary
    }

    /// Top-left corner in virtual-desktop coordinates.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Footprint in virtual-desktop coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

impl fmt::Display for MonitorDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let primary = if self.is_primary { " (primary)" } else { "" };
        write!(
            f,
            "{}{}: {}x{} at ({}, {})",
            self.name, primary, self.width, self.height, self.x, self.y
        )
    }
}
