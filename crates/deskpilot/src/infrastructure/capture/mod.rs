//! Platform screen capture.
//!
//! | Module    | OS      | API used                                  |
//! |-----------|---------|-------------------------------------------|
//! | `windows` | Windows | GDI `BitBlt` + `GetDIBits`                |
//! | `linux`   | Linux   | `XGetImage` on the root window            |
//! | `macos`   | macOS   | `CGDisplayCreateImageForRect` per display |
//!
//! Every backend receives one rectangle in global coordinates and returns
//! tightly packed RGB8 rows; [`bgrx_to_rgb`] does the common conversion from
//! the 32-bit layouts the OS APIs hand back.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use deskpilot_core::{PixelBuffer, Point, Rect};

pub use crate::application::capture::{CaptureError, PlatformCapturer};

#[cfg(all(feature = "native", target_os = "windows"))]
pub mod windows;

#[cfg(all(feature = "native", target_os = "linux"))]
pub mod linux;

#[cfg(all(feature = "native", target_os = "macos"))]
pub mod macos;

#[cfg(all(feature = "native", target_os = "windows"))]
pub use windows::GdiCapturer as NativeCapturer;

#[cfg(all(feature = "native", target_os = "linux"))]
pub use linux::XImageCapturer as NativeCapturer;

#[cfg(all(feature = "native", target_os = "macos"))]
pub use macos::CoreGraphicsCapturer as NativeCapturer;

/// Converts 32-bit B,G,R,X rows (`stride` bytes apart) into packed RGB8.
///
/// Returns `None` if `src` is too short for the given geometry.
pub fn bgrx_to_rgb(src: &[u8], width: usize, height: usize, stride: usize) -> Option<Vec<u8>> {
    let row_bytes = width.checked_mul(4)?;
    let needed = match height {
        0 => 0,
        h => stride.checked_mul(h - 1)?.checked_add(row_bytes)?,
    };
    if stride < row_bytes || src.len() < needed {
        return None;
    }
    let mut out = Vec::with_capacity(width * height * 3);
    for row in 0..height {
        let start = row * stride;
        for px in src[start..start + row_bytes].chunks_exact(4) {
            out.extend_from_slice(&[px[2], px[1], px[0]]);
        }
    }
    Some(out)
}

// ── Mock ──────────────────────────────────────────────────────────────────────

/// The colour [`MockCapturer`] paints at global position `p`.
///
/// Depends only on the global coordinate, so a test can check that a
/// capture really came from where it claims.
pub fn mock_pixel(p: Point) -> [u8; 3] {
    [p.x as u8, p.y as u8, 0x80]
}

/// Renders [`mock_pixel`] for any requested rectangle and remembers the
/// requests.
#[derive(Debug, Default)]
pub struct MockCapturer {
    requests: Mutex<Vec<Rect>>,
    failing: AtomicBool,
}

impl MockCapturer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Global rectangles requested so far.
    pub fn requests(&self) -> Vec<Rect> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl PlatformCapturer for MockCapturer {
    fn capture_region(&self, rect: Rect) -> Result<PixelBuffer, CaptureError> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(rect);
        if self.failing.load(Ordering::SeqCst) {
            return Err(CaptureError::Platform("simulated capture failure".to_string()));
        }

        let mut data = Vec::with_capacity(rect.area() as usize * 3);
        for dy in 0..rect.height as i32 {
            for dx in 0..rect.width as i32 {
                data.extend_from_slice(&mock_pixel(Point::new(rect.x + dx, rect.y + dy)));
            }
        }
        PixelBuffer::new(rect.origin(), rect.width, rect.height, data).map_err(|e| CaptureError::Platform(e.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
