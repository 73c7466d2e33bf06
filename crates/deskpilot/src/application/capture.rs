//! CaptureService: screenshots of a monitor, a region of it, or the whole
//! virtual desktop.
//!
//! # How a capture request is resolved
//!
//! 1. The screen number is resolved against a fresh snapshot.
//! 2. The optional region is clipped to the frame; without one the whole
//!    frame is captured.
//! 3. The (clipped) region is translated to global coordinates and handed
//!    to the platform capturer in one call.
//!
//! For `screen = None` the region is already in global coordinates. Gaps in
//! a non-rectangular desktop are whatever the platform fills them with.
//! The returned [`PixelBuffer::origin`] is always the global coordinate of
//! its top-left pixel.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use deskpilot_core::domain::translate::{clip_region, region_to_global};
use deskpilot_core::{PixelBuffer, Rect, Region};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use crate::application::error::{AutomationError, Result};
use crate::application::screens::ScreenService;

#[derive(Debug, Error)]
pub enum CaptureError {
    #[error("platform capture error: {0}")]
    Platform(String),
}

/// Rasterizes a rectangle of the virtual desktop.
#[cfg_attr(test, mockall::automock)]
pub trait PlatformCapturer: Send + Sync {
    /// Captures `rect` (global coordinates) into an RGB8 buffer whose origin
    /// is `rect`'s top-left corner.
    fn capture_region(&self, rect: Rect) -> Result<PixelBuffer, CaptureError>;
}

#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("{0}")]
    Image(String),
}

/// Encoded screenshot formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
    Bmp,
}

impl ImageFormat {
    /// Guesses the format from a file extension.
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(|e| e.parse().ok())
    }

    pub fn extension(self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpg",
            ImageFormat::Bmp => "bmp",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = AutomationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(ImageFormat::Png),
            "jpg" | "jpeg" => Ok(ImageFormat::Jpeg),
            "bmp" => Ok(ImageFormat::Bmp),
            other => Err(AutomationError::Encoding(format!("unsupported image format '{other}'"))),
        }
    }
}

/// Turns a pixel buffer into file bytes.
#[cfg_attr(test, mockall::automock)]
pub trait PixelEncoder: Send + Sync {
    fn encode(&self, pixels: &PixelBuffer, format: ImageFormat) -> Result<Vec<u8>, EncodeError>;
}

/// Screenshot use case.
#[derive(Clone)]
pub struct CaptureService {
    screens: ScreenService,
    capturer: Arc<dyn PlatformCapturer>,
    encoder: Arc<dyn PixelEncoder>,
}

impl CaptureService {
    pub fn new(screens: ScreenService, capturer: Arc<dyn PlatformCapturer>, encoder: Arc<dyn PixelEncoder>) -> Self {
        Self {
            screens,
            capturer,
            encoder,
        }
    }

    /// Captures `region` of `screen` (or the whole frame).
    ///
    /// # Errors
    ///
    /// - `InvalidScreenIndex` / `NoMonitorsFound` from screen resolution.
    /// - `RegionOutOfBounds` when `region` does not overlap the frame.
    /// - [`AutomationError::CaptureFailed`] with the global rectangle that
    ///   was attempted. Nothing is retried.
    pub fn screenshot(&self, region: Option<Region>, screen: Option<usize>) -> Result<PixelBuffer> {
        let frame = self.screens.resolve_screen(screen)?;
        let local = match region {
            Some(r) => clip_region(&frame, r)?,
            None => frame.bounds(),
        };
        let rect = region_to_global(&frame, local);
        debug!(?screen, %rect, "capturing");

        let pixels = self
            .capturer
            .capture_region(rect)
            .map_err(|e| AutomationError::CaptureFailed {
                rect,
                reason: e.to_string(),
            })?;

        if pixels.rect() != rect {
            return Err(AutomationError::CaptureFailed {
                rect,
                reason: format!("platform returned {} instead", pixels.rect()),
            });
        }
        Ok(pixels)
    }

    /// Captures and encodes in `format`.
    pub fn screenshot_to_bytes(&self, region: Option<Region>, screen: Option<usize>, format: ImageFormat) -> Result<Vec<u8>> {
        let pixels = self.screenshot(region, screen)?;
        self.encoder
            .encode(&pixels, format)
            .map_err(|e| AutomationError::Encoding(e.to_string()))
    }

    /// Captures, encodes and writes to `path`; returns the path written.
    ///
    /// Without an explicit `format` it is taken from the file extension,
    /// falling back to PNG.
    pub fn screenshot_to_file(
        &self,
        path: impl AsRef<Path>,
        region: Option<Region>,
        screen: Option<usize>,
        format: Option<ImageFormat>,
    ) -> Result<PathBuf> {
        let path = path.as_ref();
        let format = format
            .or_else(|| ImageFormat::from_path(path))
            .unwrap_or_default();
        let bytes = self.screenshot_to_bytes(region, screen, format)?;
        std::fs::write(path, &bytes).map_err(|source| AutomationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), bytes = bytes.len(), ?format, "screenshot saved");
        Ok(path.to_path_buf())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::screens::MockPlatformScreenEnumerator;
    use deskpilot_core::{RawMonitor, ScreenError};
    use mockall::predicate::eq;

    fn dual_screens() -> ScreenService {
        let mut mock = MockPlatformScreenEnumerator::new();
        mock.expect_enumerate_monitors().returning(|| {
            Ok(vec![
                RawMonitor::new("DP-1", 0, 0, 1920, 1080).primary(),
                RawMonitor::new("HDMI-1", 1920, 0, 1280, 1024),
            ])
        });
        ScreenService::new(Arc::new(mock))
    }

    fn service(capturer: MockPlatformCapturer) -> CaptureService {
        CaptureService::new(dual_screens(), Arc::new(capturer), Arc::new(MockPixelEncoder::new()))
    }

    fn echo_capturer(expected: Rect) -> MockPlatformCapturer {
        let mut capturer = MockPlatformCapturer::new();
        capturer
            .expect_capture_region()
            .with(eq(expected))
            .times(1)
            .returning(|rect| Ok(PixelBuffer::filled(rect, [1, 2, 3])));
        capturer
    }

    #[test]
    fn test_full_secondary_screen_is_captured_at_its_global_rect() {
        let svc = service(echo_capturer(Rect::new(1920, 0, 1280, 1024)));
        let buf = svc.screenshot(None, Some(1)).unwrap();
        assert_eq!(buf.origin().x, 1920);
    }

    #[test]
    fn test_local_region_is_translated_to_global() {
        let svc = service(echo_capturer(Rect::new(2020, 50, 200, 100)));
        let buf = svc.screenshot(Some(Rect::new(100, 50, 200, 100)), Some(1)).unwrap();
        assert_eq!((buf.width(), buf.height()), (200, 100));
    }

    #[test]
    fn test_region_is_clipped_before_capture() {
        let svc = service(echo_capturer(Rect::new(1900, 1000, 20, 80)));
        let buf = svc.screenshot(Some(Rect::new(1900, 1000, 400, 300)), Some(0)).unwrap();
        assert_eq!((buf.width(), buf.height()), (20, 80));
    }

    #[test]
    fn test_combined_capture_covers_virtual_desktop() {
        let svc = service(echo_capturer(Rect::new(0, 0, 3200, 1080)));
        let buf = svc.screenshot(None, None).unwrap();
        assert_eq!((buf.width(), buf.height()), (3200, 1080));
    }

    #[test]
    fn test_combined_region_is_used_as_global() {
        let svc = service(echo_capturer(Rect::new(1800, 10, 300, 20)));
        let buf = svc.screenshot(Some(Rect::new(1800, 10, 300, 20)), None).unwrap();
        assert_eq!(buf.origin().x, 1800);
    }

    #[test]
    fn test_region_outside_frame_never_reaches_platform() {
        let mut capturer = MockPlatformCapturer::new();
        capturer.expect_capture_region().never();
        let svc = service(capturer);

        let err = svc.screenshot(Some(Rect::new(2000, 0, 400, 300)), Some(0)).unwrap_err();

        assert!(matches!(err, AutomationError::Screen(ScreenError::RegionOutOfBounds { .. })));
    }

    #[test]
    fn test_platform_failure_reports_attempted_rect() {
        let mut capturer = MockPlatformCapturer::new();
        capturer
            .expect_capture_region()
            .times(1)
            .returning(|_| Err(CaptureError::Platform("XGetImage returned null".into())));
        let svc = service(capturer);

        let err = svc.screenshot(None, Some(1)).unwrap_err();

        match err {
            AutomationError::CaptureFailed { rect, reason } => {
                assert_eq!(rect, Rect::new(1920, 0, 1280, 1024));
                assert!(reason.contains("XGetImage"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_wrong_sized_platform_buffer_is_capture_failure() {
        let mut capturer = MockPlatformCapturer::new();
        capturer
            .expect_capture_region()
            .returning(|_| Ok(PixelBuffer::filled(Rect::new(0, 0, 10, 10), [0, 0, 0])));
        let svc = service(capturer);

        assert!(matches!(svc.screenshot(None, Some(0)), Err(AutomationError::CaptureFailed { .. })));
    }

    #[test]
    fn test_screenshot_to_bytes_passes_format_to_encoder() {
        // Arrange
        let mut encoder = MockPixelEncoder::new();
        encoder
            .expect_encode()
            .withf(|pixels, format| pixels.width() == 1920 && *format == ImageFormat::Jpeg)
            .times(1)
            .returning(|_, _| Ok(vec![0xFF, 0xD8]));
        let svc = CaptureService::new(
            dual_screens(),
            Arc::new(echo_capturer(Rect::new(0, 0, 1920, 1080))),
            Arc::new(encoder),
        );

        // Act
        let bytes = svc.screenshot_to_bytes(None, Some(0), ImageFormat::Jpeg).unwrap();

        // Assert
        assert_eq!(bytes, vec![0xFF, 0xD8]);
    }

    #[test]
    fn test_format_parsing_and_extension_inference() {
        assert_eq!("JPG".parse::<ImageFormat>().unwrap(), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_path(Path::new("shot.bmp")), Some(ImageFormat::Bmp));
        assert_eq!(ImageFormat::from_path(Path::new("shot")), None);
        assert!("tiff".parse::<ImageFormat>().is_err());
    }
}
