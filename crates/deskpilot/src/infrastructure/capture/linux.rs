//! Linux capture via `XGetImage` on the root window.
//!
//! The root window spans every XRandR monitor, so one request covers any
//! rectangle of the virtual desktop, including one that crosses monitors.

use std::os::raw::c_ulong;
use std::sync::{Mutex, PoisonError};

use deskpilot_core::{PixelBuffer, Rect};
use tracing::debug;
use x11::xlib;

use super::{bgrx_to_rgb, CaptureError, PlatformCapturer};
use crate::infrastructure::x11_display::XDisplay;

const ALL_PLANES: c_ulong = !0;

pub struct XImageCapturer {
    display: Mutex<XDisplay>,
}

impl XImageCapturer {
    /// # Errors
    ///
    /// Returns `CaptureError::Platform` if the X display cannot be opened.
    pub fn new() -> Result<Self, CaptureError> {
        Ok(Self {
            display: Mutex::new(XDisplay::open().map_err(CaptureError::Platform)?),
        })
    }
}

impl PlatformCapturer for XImageCapturer {
    fn capture_region(&self, rect: Rect) -> Result<PixelBuffer, CaptureError> {
        let display = self.display.lock().unwrap_or_else(PoisonError::into_inner);

        // XGetImage raises a fatal BadMatch for areas outside the root.
        let (root_w, root_h) = display.root_size();
        let root = Rect::new(0, 0, root_w.max(0) as u32, root_h.max(0) as u32);
        if rect.intersection(&root) != Some(rect) {
            return Err(CaptureError::Platform(format!("{rect} is outside the X root window {root}")));
        }

        // SAFETY: `display` is live and `rect` lies inside the root window.
        // The image is destroyed below on every path.
        let image = unsafe {
            xlib::XGetImage(
                display.as_ptr(),
                display.root(),
                rect.x,
                rect.y,
                rect.width,
                rect.height,
                ALL_PLANES,
                xlib::ZPixmap,
            )
        };
        if image.is_null() {
            return Err(CaptureError::Platform("XGetImage returned null".to_string()));
        }

        // SAFETY: `image` is non-null and owned by us until XDestroyImage.
        let rgb = unsafe {
            let rgb = image_to_rgb(&mut *image);
            xlib::XDestroyImage(image);
            rgb
        };
        debug!(%rect, "XGetImage");
        PixelBuffer::new(rect.origin(), rect.width, rect.height, rgb?).map_err(|e| CaptureError::Platform(e.to_string()))
    }
}

unsafe fn image_to_rgb(image: &mut xlib::XImage) -> Result<Vec<u8>, CaptureError> {
    let (width, height) = (image.width.max(0) as usize, image.height.max(0) as usize);
    let is_bgrx = image.bits_per_pixel == 32
        && image.byte_order == xlib::LSBFirst
        && image.red_mask == 0x00FF_0000
        && image.green_mask == 0x0000_FF00
        && image.blue_mask == 0x0000_00FF;

    if is_bgrx {
        let stride = image.bytes_per_line.max(0) as usize;
        let src = std::slice::from_raw_parts(image.data as *const u8, stride * height);
        return bgrx_to_rgb(src, width, height, stride)
            .ok_or_else(|| CaptureError::Platform("XImage buffer shorter than its geometry".to_string()));
    }

    // Uncommon visuals: read pixel by pixel through the masks.
    let channels = [image.red_mask, image.green_mask, image.blue_mask];
    let mut out = Vec::with_capacity(width * height * 3);
    for y in 0..height as i32 {
        for x in 0..width as i32 {
            let pixel = xlib::XGetPixel(image, x, y);
            for mask in channels {
                out.push(scale_channel(pixel, mask));
            }
        }
    }
    Ok(out)
}

/// Extracts the bits selected by `mask` and scales them to 0..=255.
fn scale_channel(pixel: c_ulong, mask: c_ulong) -> u8 {
    if mask == 0 {
        return 0;
    }
    let shift = mask.trailing_zeros();
    let max = mask >> shift;
    let value = (pixel & mask) >> shift;
    ((value as u64 * 255) / max as u64) as u8
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_channel_eight_bit_mask_is_identity() {
        assert_eq!(scale_channel(0x00AB_CDEF, 0x00FF_0000), 0xAB);
        assert_eq!(scale_channel(0x00AB_CDEF, 0x0000_00FF), 0xEF);
    }

    #[test]
    fn test_scale_channel_widens_rgb565() {
        assert_eq!(scale_channel(0xF800, 0xF800), 255);
        assert_eq!(scale_channel(0x07E0, 0xF800), 0);
    }

    #[test]
    fn test_x_image_capturer_smoke() {
        let Ok(capturer) = XImageCapturer::new() else {
            assert!(std::env::var("DISPLAY").is_err(), "XOpenDisplay must succeed when DISPLAY is set");
            return;
        };
        let buf = capturer.capture_region(Rect::new(0, 0, 8, 8)).expect("capture 8x8 at origin");
        assert_eq!((buf.width(), buf.height()), (8, 8));
    }
}
