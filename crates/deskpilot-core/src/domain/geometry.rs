//! Integer points and axis-aligned rectangles.
//!
//! Rectangles follow the inclusive-start / exclusive-end convention: a
//! `Rect { x: 0, width: 1920, .. }` covers columns `0..1920`, so column 1920
//! belongs to whatever lies to the right.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position in some frame's coordinate space (may be negative).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns this point moved by `(dx, dy)`, saturating at the `i32` range.
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl From<Point> for (i32, i32) {
    fn from(p: Point) -> Self {
        (p.x, p.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// An axis-aligned rectangle: top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: i32,
    /// Top edge (inclusive).
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

/// A rectangle whose coordinate space is given by the accompanying screen
/// selector: screen-local for a single monitor, global for the combined
/// desktop.
pub type Region = Rect;

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Builds a rectangle from its edges; a reversed edge pair yields zero size.
    fn from_edges(left: i64, top: i64, right: i64, bottom: i64) -> Self {
        let clamp = |v: i64| v.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
        let span = |lo: i64, hi: i64| (hi - lo).clamp(0, i64::from(u32::MAX)) as u32;
        Self::new(clamp(left), clamp(top), span(left, right), span(top, bottom))
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> i32 {
        self.right_i64().clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> i32 {
        self.bottom_i64().clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
    }

    fn right_i64(&self) -> i64 {
        i64::from(self.x) + i64::from(self.width)
    }

    fn bottom_i64(&self) -> i64 {
        i64::from(self.y) + i64::from(self.height)
    }

    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Number of pixels covered.
    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns `true` if `p` lies inside (left/top inclusive, right/bottom exclusive).
    pub fn contains(&self, p: Point) -> bool {
        let (px, py) = (i64::from(p.x), i64::from(p.y));
        px >= i64::from(self.x) && px < self.right_i64() && py >= i64::from(self.y) && py < self.bottom_i64()
    }

    /// The overlapping part of two rectangles, or `None` when it has zero area.
    pub fn intersection(&self, other: &Rect) -> Option<Rect> {
        let left = i64::from(self.x).max(i64::from(other.x));
        let top = i64::from(self.y).max(i64::from(other.y));
        let right = self.right_i64().min(other.right_i64());
        let bottom = self.bottom_i64().min(other.bottom_i64());
        if right <= left || bottom <= top {
            return None;
        }
        Some(Self::from_edges(left, top, right, bottom))
    }

    /// Smallest rectangle covering both.
    pub fn union(&self, other: &Rect) -> Rect {
        Self::from_edges(
            i64::from(self.x).min(i64::from(other.x)),
            i64::from(self.y).min(i64::from(other.y)),
            self.right_i64().max(other.right_i64()),
            self.bottom_i64().max(other.bottom_i64()),
        )
    }

    /// Returns this rectangle with its origin moved by `(dx, dy)`.
    pub fn translate(&self, dx: i32, dy: i32) -> Rect {
        let origin = self.origin().offset(dx, dy);
        Rect::new(origin.x, origin.y, self.width, self.height)
    }
}

impl From<(i32, i32, u32, u32)> for Rect {
    fn from((x, y, width, height): (i32, i32, u32, u32)) -> Self {
        Self::new(x, y, width, height)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} at ({}, {})", self.width, self.height, self.x, self.y)
    }
}
