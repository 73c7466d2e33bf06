//! macOS capture via `CGDisplayCreateImageForRect`.
//!
//! Core Graphics images are per display, so a global rectangle is split
//! across the displays it touches and the pieces are copied into one
//! buffer. Areas covered by no display stay black.
//!
//! On Retina displays the image has more pixels than points; those images
//! are sampled at their point grid so the result matches the requested
//! size.

use core_graphics::display::CGDisplay;
use core_graphics::geometry::{CGPoint, CGRect, CGSize};
use deskpilot_core::{PixelBuffer, Rect};
use tracing::debug;

use super::{CaptureError, PlatformCapturer};

#[derive(Debug, Default)]
pub struct CoreGraphicsCapturer;

impl CoreGraphicsCapturer {
    pub fn new() -> Self {
        Self
    }
}

fn display_rect(display: &CGDisplay) -> Rect {
    let b = display.bounds();
    Rect::new(
        b.origin.x as i32,
        b.origin.y as i32,
        b.size.width.max(0.0) as u32,
        b.size.height.max(0.0) as u32,
    )
}

impl PlatformCapturer for CoreGraphicsCapturer {
    fn capture_region(&self, rect: Rect) -> Result<PixelBuffer, CaptureError> {
        let ids = CGDisplay::active_displays()
            .map_err(|code| CaptureError::Platform(format!("CGGetActiveDisplayList failed: {code}")))?;

        let mut out = vec![0u8; rect.area() as usize * 3];
        let mut covered = false;

        for id in ids {
            let display = CGDisplay::new(id);
            let bounds = display_rect(&display);
            let Some(part) = rect.intersection(&bounds) else {
                continue;
            };

            let local = CGRect::new(
                &CGPoint::new(f64::from(part.x - bounds.x), f64::from(part.y - bounds.y)),
                &CGSize::new(f64::from(part.width), f64::from(part.height)),
            );
            let image = display
                .image_for_rect(local)
                .ok_or_else(|| CaptureError::Platform(format!("CGDisplayCreateImageForRect failed for display {id}")))?;

            let (img_w, img_h) = (image.width(), image.height());
            let stride = image.bytes_per_row();
            let data = image.data();
            let bytes = data.bytes();

            // BGRA, possibly scaled by the backing factor.
            for row in 0..part.height as usize {
                let sy = row * img_h / part.height as usize;
                for col in 0..part.width as usize {
                    let sx = col * img_w / part.width as usize;
                    let src = sy * stride + sx * 4;
                    let Some(px) = bytes.get(src..src + 4) else {
                        return Err(CaptureError::Platform("CGImage buffer shorter than its geometry".to_string()));
                    };
                    let dx = (part.x - rect.x) as usize + col;
                    let dy = (part.y - rect.y) as usize + row;
                    let dst = (dy * rect.width as usize + dx) * 3;
                    out[dst..dst + 3].copy_from_slice(&[px[2], px[1], px[0]]);
                }
            }
            covered = true;
        }

        if !covered {
            return Err(CaptureError::Platform(format!("{rect} is not on any display")));
        }
        debug!(%rect, "Core Graphics capture");
        PixelBuffer::new(rect.origin(), rect.width, rect.height, out).map_err(|e| CaptureError::Platform(e.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_graphics_capture_of_main_display_corner() {
        let buf = CoreGraphicsCapturer::new().capture_region(Rect::new(0, 0, 8, 8)).expect("capture");
        assert_eq!((buf.width(), buf.height()), (8, 8));
    }
}
