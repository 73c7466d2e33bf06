//! PNG / JPEG / BMP encoding with the `image` crate.

use std::io::Cursor;

use deskpilot_core::PixelBuffer;
use image::RgbImage;

use crate::application::capture::{EncodeError, ImageFormat, PixelEncoder};

/// Encodes RGB8 pixel buffers in memory.
#[derive(Debug, Default, Clone, Copy)]
pub struct ImageCrateEncoder;

impl ImageCrateEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl PixelEncoder for ImageCrateEncoder {
    fn encode(&self, pixels: &PixelBuffer, format: ImageFormat) -> Result<Vec<u8>, EncodeError> {
        let img = RgbImage::from_raw(pixels.width(), pixels.height(), pixels.as_bytes().to_vec())
            .ok_or_else(|| EncodeError::Image("pixel data does not match its dimensions".to_string()))?;

        let target = match format {
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Bmp => image::ImageFormat::Bmp,
        };

        let mut buffer = Cursor::new(Vec::new());
        img.write_to(&mut buffer, target)
            .map_err(|e| EncodeError::Image(e.to_string()))?;
        Ok(buffer.into_inner())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
