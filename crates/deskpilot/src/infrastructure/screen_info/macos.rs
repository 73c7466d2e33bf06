//! macOS monitor enumeration via Core Graphics (`CGDisplay`).
//!
//! `CGDisplayBounds` is already in the global display space: origin at the
//! top-left of the main display, y growing downwards. No flipping needed.

use core_graphics::display::CGDisplay;
use deskpilot_core::RawMonitor;

use super::{PlatformScreenEnumerator, ScreenInfoError};

#[derive(Debug, Default)]
pub struct MacosScreenEnumerator;

impl MacosScreenEnumerator {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformScreenEnumerator for MacosScreenEnumerator {
    fn enumerate_monitors(&self) -> Result<Vec<RawMonitor>, ScreenInfoError> {
        let active = CGDisplay::active_displays()
            .map_err(|code| ScreenInfoError::PlatformError(format!("CGGetActiveDisplayList failed: {code}")))?;
        let main_id = CGDisplay::main().id;

        let monitors = active
            .into_iter()
            .map(|id| {
                let bounds = CGDisplay::new(id).bounds();
                RawMonitor {
                    name: format!("Display {id}"),
                    x: bounds.origin.x as i32,
                    y: bounds.origin.y as i32,
                    width: bounds.size.width.max(0.0) as u32,
                    height: bounds.size.height.max(0.0) as u32,
                    is_primary: id == main_id,
                }
            })
            .collect();
        Ok(monitors)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
