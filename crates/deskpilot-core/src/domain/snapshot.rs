//! Screen registry logic: one point-in-time view of the monitor topology.
//!
//! A [`ScreenSnapshot`] is built from whatever a platform enumerator returned
//! and is never cached by anything in this workspace. Every public operation
//! builds a fresh one, so a monitor unplugged between two calls shows up as
//! an `InvalidScreenIndex` instead of a pointer landing on a dead screen.

use crate::domain::error::ScreenError;
use crate::domain::frame::ResolvedFrame;
use crate::domain::geometry::Rect;
use crate::domain::monitor::{MonitorDescriptor, RawMonitor};
use crate::domain::selector::{remap_screen, ScreenSelector};
use tracing::{debug, warn};

/// Ordered, validated monitor list of a single enumeration.
///
/// Invariants upheld by [`ScreenSnapshot::from_raw`]:
/// - at least one monitor;
/// - every monitor has non-zero width and height;
/// - exactly one monitor is primary;
/// - order is the enumerator's order (never re-sorted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenSnapshot {
    monitors: Vec<MonitorDescriptor>,
    primary: usize,
}

impl ScreenSnapshot {
    /// Indexes raw monitors in enumeration order and settles the primary.
    ///
    /// # Errors
    ///
    /// Returns [`ScreenError::NoMonitorsFound`] if `raw` is empty or holds
    /// only degenerate (zero-area) monitors.
    pub fn from_raw(raw: Vec<RawMonitor>) -> Result<Self, ScreenError> {
        let usable: Vec<RawMonitor> = raw
            .into_iter()
            .filter(|m| {
                if m.is_degenerate() {
                    warn!(name = %m.name, width = m.width, height = m.height, "skipping degenerate monitor");
                    false
                } else {
                    true
                }
            })
            .collect();

        if usable.is_empty() {
            return Err(ScreenError::NoMonitorsFound);
        }

        let flagged: Vec<usize> = usable
            .iter()
            .enumerate()
            .filter(|(_, m)| m.is_primary)
            .map(|(i, _)| i)
            .collect();
        let primary = match flagged.as_slice() {
            [] => {
                warn!("OS reported no primary monitor; treating the first one as primary");
                0
            }
            [only] => *only,
            [first, ..] => {
                warn!(count = flagged.len(), "OS reported several primary monitors; keeping the first");
                *first
            }
        };

        let monitors: Vec<MonitorDescriptor> = usable
            .into_iter()
            .enumerate()
            .map(|(i, m)| MonitorDescriptor::from_raw(i, m, i == primary))
            .collect();

        debug!(count = monitors.len(), primary, "screen snapshot taken");
        Ok(Self { monitors, primary })
    }

    /// All monitors in enumeration order.
    pub fn monitors(&self) -> &[MonitorDescriptor] {
        &self.monitors
    }

    pub fn into_monitors(self) -> Vec<MonitorDescriptor> {
        self.monitors
    }

    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    /// Always `false`; a snapshot cannot be empty.
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    /// Raw index of the primary monitor.
    pub fn primary_index(&self) -> usize {
        self.primary
    }

    pub fn primary(&self) -> &MonitorDescriptor {
        &self.monitors[self.primary]
    }

    /// Looks up a monitor by raw enumeration index.
    pub fn get(&self, index: usize) -> Result<&MonitorDescriptor, ScreenError> {
        self.monitors.get(index).ok_or(ScreenError::InvalidScreenIndex {
            requested: index,
            available: self.monitors.len(),
        })
    }

    /// Minimal rectangle covering every monitor (the virtual desktop bounds).
    pub fn virtual_bounds(&self) -> Rect {
        let first = self.monitors[0].rect();
        self.monitors[1..]
            .iter()
            .fold(first, |acc, m| acc.union(&m.rect()))
    }

    /// Resolves an explicit selector to the frame it names.
    ///
    /// # Errors
    ///
    /// [`ScreenError::InvalidScreenIndex`] when `Index(i)` is out of range.
    pub fn resolve(&self, selector: ScreenSelector) -> Result<ResolvedFrame, ScreenError> {
        let frame = match selector {
            ScreenSelector::Primary => ResolvedFrame::Monitor(self.primary().clone()),
            ScreenSelector::Index(i) => ResolvedFrame::Monitor(self.get(i)?.clone()),
            ScreenSelector::AllCombined => ResolvedFrame::Combined(self.virtual_bounds()),
        };
        debug!(?selector, rect = %frame.desktop_rect(), "resolved frame");
        Ok(frame)
    }

    /// Resolves a public screen number (`0` = primary, `k` = k-th other
    /// monitor, `None` = combined desktop).
    pub fn resolve_screen(&self, screen: Option<usize>) -> Result<ResolvedFrame, ScreenError> {
        self.resolve(remap_screen(self, screen)?)
    }
}
