//! Linux monitor enumeration via XRandR.
//!
//! `XRRGetMonitors` reports each logical monitor inside the single X screen
//! with its offset in root-window coordinates, which is exactly the global
//! coordinate space the rest of the crate uses. Servers without RandR 1.5
//! fall back to one monitor covering the root window.

use deskpilot_core::RawMonitor;
use tracing::{debug, warn};
use x11::{xlib, xrandr};

use super::{PlatformScreenEnumerator, ScreenInfoError};
use crate::infrastructure::x11_display::XDisplay;

/// Opens a fresh connection per call so hot-plugged monitors show up.
#[derive(Debug, Default)]
pub struct LinuxScreenEnumerator;

impl LinuxScreenEnumerator {
    pub fn new() -> Self {
        Self
    }
}

impl PlatformScreenEnumerator for LinuxScreenEnumerator {
    fn enumerate_monitors(&self) -> Result<Vec<RawMonitor>, ScreenInfoError> {
        let display = XDisplay::open().map_err(ScreenInfoError::PlatformError)?;
        let monitors = query_randr_monitors(&display);
        if !monitors.is_empty() {
            return Ok(monitors);
        }

        warn!("XRRGetMonitors returned nothing; using the root window as one monitor");
        let (width, height) = display.root_size();
        if width <= 0 || height <= 0 {
            return Err(ScreenInfoError::PlatformError("X11 reported a zero-sized root window".to_string()));
        }
        Ok(vec![RawMonitor::new("X11 root", 0, 0, width as u32, height as u32).primary()])
    }
}

fn query_randr_monitors(display: &XDisplay) -> Vec<RawMonitor> {
    let mut count: i32 = 0;
    // SAFETY: `display` is live; the array is released with XRRFreeMonitors
    // after its entries have been copied out.
    unsafe {
        let infos = xrandr::XRRGetMonitors(display.as_ptr(), display.root(), xlib::True, &mut count);
        if infos.is_null() || count <= 0 {
            if !infos.is_null() {
                xrandr::XRRFreeMonitors(infos);
            }
            return Vec::new();
        }

        let monitors = std::slice::from_raw_parts(infos, count as usize)
            .iter()
            .map(|info| RawMonitor {
                name: display.atom_name(info.name),
                x: info.x,
                y: info.y,
                width: info.width.max(0) as u32,
                height: info.height.max(0) as u32,
                is_primary: info.primary != 0,
            })
            .collect::<Vec<_>>();
        xrandr::XRRFreeMonitors(infos);

        debug!(count = monitors.len(), "XRandR monitors");
        monitors
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
