//! Windows capture via GDI.
//!
//! The screen DC covers the whole virtual screen in virtual-screen
//! coordinates, so the global rectangle is passed to `BitBlt` unchanged.
//! `CAPTUREBLT` includes layered windows in the copy.

use deskpilot_core::{PixelBuffer, Rect};
use tracing::debug;
use windows::Win32::Foundation::HWND;
use windows::Win32::Graphics::Gdi::{
    BitBlt, CreateCompatibleBitmap, CreateCompatibleDC, DeleteDC, DeleteObject, GetDC, GetDIBits, ReleaseDC,
    SelectObject, BITMAPINFO, BITMAPINFOHEADER, BI_RGB, CAPTUREBLT, DIB_RGB_COLORS, HBITMAP, HDC, HGDIOBJ, SRCCOPY,
};

use super::{bgrx_to_rgb, CaptureError, PlatformCapturer};

#[derive(Debug, Default)]
pub struct GdiCapturer;

impl GdiCapturer {
    pub fn new() -> Self {
        Self
    }
}

/// Screen DC, memory DC and bitmap, released in reverse order on drop.
struct GdiSurface {
    screen: HDC,
    memory: HDC,
    bitmap: HBITMAP,
    previous: HGDIOBJ,
}

impl GdiSurface {
    unsafe fn new(width: i32, height: i32) -> Result<Self, CaptureError> {
        let screen = GetDC(HWND::default());
        if screen.is_invalid() {
            return Err(CaptureError::Platform("GetDC(NULL) failed".to_string()));
        }
        let memory = CreateCompatibleDC(screen);
        let bitmap = CreateCompatibleBitmap(screen, width, height);
        let previous = SelectObject(memory, bitmap);
        let surface = Self {
            screen,
            memory,
            bitmap,
            previous,
        };
        if memory.is_invalid() || bitmap.is_invalid() {
            return Err(CaptureError::Platform("could not allocate a GDI bitmap".to_string()));
        }
        Ok(surface)
    }
}

impl Drop for GdiSurface {
    fn drop(&mut self) {
        // SAFETY: every handle was created in `new` and is released once.
        unsafe {
            if !self.memory.is_invalid() {
                SelectObject(self.memory, self.previous);
                let _ = DeleteDC(self.memory);
            }
            if !self.bitmap.is_invalid() {
                let _ = DeleteObject(self.bitmap);
            }
            ReleaseDC(HWND::default(), self.screen);
        }
    }
}

impl PlatformCapturer for GdiCapturer {
    fn capture_region(&self, rect: Rect) -> Result<PixelBuffer, CaptureError> {
        let (w, h) = (rect.width as i32, rect.height as i32);

        // SAFETY: all handles are owned by `surface`; `pixels` is sized for
        // `h` rows of `w` 32-bit pixels as described by `info`.
        let pixels = unsafe {
            let surface = GdiSurface::new(w, h)?;
            BitBlt(surface.memory, 0, 0, w, h, surface.screen, rect.x, rect.y, SRCCOPY | CAPTUREBLT)
                .map_err(|e| CaptureError::Platform(format!("BitBlt failed: {e}")))?;

            let mut info = BITMAPINFO {
                bmiHeader: BITMAPINFOHEADER {
                    biSize: std::mem::size_of::<BITMAPINFOHEADER>() as u32,
                    biWidth: w,
                    // Negative height: top-down rows.
                    biHeight: -h,
                    biPlanes: 1,
                    biBitCount: 32,
                    biCompression: BI_RGB.0,
                    ..Default::default()
                },
                ..Default::default()
            };
            let mut pixels = vec![0u8; rect.width as usize * rect.height as usize * 4];
            let rows = GetDIBits(
                surface.memory,
                surface.bitmap,
                0,
                rect.height,
                Some(pixels.as_mut_ptr().cast()),
                &mut info,
                DIB_RGB_COLORS,
            );
            if rows != h {
                return Err(CaptureError::Platform(format!("GetDIBits copied {rows} of {h} rows")));
            }
            pixels
        };

        let stride = rect.width as usize * 4;
        let rgb = bgrx_to_rgb(&pixels, rect.width as usize, rect.height as usize, stride)
            .ok_or_else(|| CaptureError::Platform("DIB buffer shorter than its geometry".to_string()))?;
        debug!(%rect, "GDI capture");
        PixelBuffer::new(rect.origin(), rect.width, rect.height, rgb).map_err(|e| CaptureError::Platform(e.to_string()))
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
