//! In-memory captured image.

use crate::domain::geometry::{Point, Rect};
use thiserror::Error;

/// Bytes per RGB8 pixel.
pub const BYTES_PER_PIXEL: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PixelBufferError {
    #[error("pixel data is {actual} bytes, expected {expected} for {width}x{height} RGB")]
    LengthMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
}

/// Row-major RGB8 image captured from the desktop.
///
/// `origin` is the **global** virtual-desktop coordinate of the top-left
/// pixel, even for captures requested in screen-local coordinates. A capture
/// of the whole desktop therefore has the virtual desktop's top-left corner
/// as origin, which may be negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    origin: Point,
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps raw RGB8 data.
    ///
    /// # Errors
    ///
    /// [`PixelBufferError::LengthMismatch`] unless `data.len() == width * height * 3`.
    pub fn new(origin: Point, width: u32, height: u32, data: Vec<u8>) -> Result<Self, PixelBufferError> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if data.len() != expected {
            return Err(PixelBufferError::LengthMismatch {
                width,
                height,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            origin,
            width,
            height,
            data,
        })
    }

    /// A buffer covering `rect` filled with one colour.
    pub fn filled(rect: Rect, rgb: [u8; 3]) -> Self {
        let data = rgb
            .iter()
            .copied()
            .cycle()
            .take(rect.width as usize * rect.height as usize * BYTES_PER_PIXEL)
            .collect();
        Self {
            origin: rect.origin(),
            width: rect.width,
            height: rect.height,
            data,
        }
    }

    pub fn origin(&self) -> Point {
        self.origin
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Covered area in global coordinates.
    pub fn rect(&self) -> Rect {
        Rect::new(self.origin.x, self.origin.y, self.width, self.height)
    }

    /// Pixel at buffer-relative `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let at = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        Some([self.data[at], self.data[at + 1], self.data[at + 2]])
    }

    /// Pixel at a global desktop coordinate, if the buffer covers it.
    pub fn pixel_at_global(&self, p: Point) -> Option<[u8; 3]> {
        if !self.rect().contains(p) {
            return None;
        }
        self.pixel((p.x - self.origin.x) as u32, (p.y - self.origin.y) as u32)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = PixelBuffer::new(Point::new(0, 0), 2, 2, vec![0; 11]).unwrap_err();
        assert_eq!(
            err,
            PixelBufferError::LengthMismatch {
                width: 2,
                height: 2,
                expected: 12,
                actual: 11
            }
        );
    }

    #[test]
    fn test_pixel_reads_row_major_rgb() {
        let data = vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12];
        let buf = PixelBuffer::new(Point::new(0, 0), 2, 2, data).unwrap();
        assert_eq!(buf.pixel(1, 0), Some([4, 5, 6]));
        assert_eq!(buf.pixel(0, 1), Some([7, 8, 9]));
        assert_eq!(buf.pixel(2, 0), None);
    }

    #[test]
    fn test_pixel_at_global_honours_origin() {
        let buf = PixelBuffer::filled(Rect::new(1920, -10, 4, 4), [9, 8, 7]);
        assert_eq!(buf.pixel_at_global(Point::new(1921, -9)), Some([9, 8, 7]));
        assert_eq!(buf.pixel_at_global(Point::new(1919, 0)), None);
    }

    #[test]
    fn test_filled_has_expected_length() {
        let buf = PixelBuffer::filled(Rect::new(0, 0, 3200, 1080), [0, 0, 0]);
        assert_eq!(buf.as_bytes().len(), 3200 * 1080 * 3);
    }
}
