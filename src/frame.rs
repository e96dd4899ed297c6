//! A single animation frame: a square RGBA pixel buffer.

use std::path::Path;

use image::RgbaImage;
use thiserror::Error;

use crate::color::{Color, TRANSPARENT};
use crate::output::{save_png, OutputError};

/// Error returned by checked pixel writes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameError {
    /// Coordinate lies outside the frame
    #[error("pixel ({x}, {y}) is outside the {width}x{height} frame")]
    OutOfBounds { x: i64, y: i64, width: u32, height: u32 },
}

/// One width×height buffer of RGBA pixels.
///
/// Storage is row-major (an `image::RgbaImage`), so the buffer length is
/// always `width * height * 4` bytes. Every pixel starts fully transparent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelFrame {
    image: RgbaImage,
}

impl PixelFrame {
    /// Create a blank (fully transparent) frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self { image: RgbaImage::from_pixel(width, height, TRANSPARENT) }
    }

    /// Create a blank square frame.
    pub fn square(size: u32) -> Self {
        Self::new(size, size)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Whether `(x, y)` names a pixel of this frame.
    pub fn contains(&self, x: i64, y: i64) -> bool {
        x >= 0 && y >= 0 && x < self.width() as i64 && y < self.height() as i64
    }

    /// Read a pixel, or `None` when the coordinate is out of range.
    pub fn get(&self, x: i64, y: i64) -> Option<Color> {
        if self.contains(x, y) {
            Some(*self.image.get_pixel(x as u32, y as u32))
        } else {
            None
        }
    }

    /// Write a pixel, failing when the coordinate is out of range.
    pub fn set(&mut self, x: i64, y: i64, color: Color) -> Result<(), FrameError> {
        if !self.contains(x, y) {
            return Err(FrameError::OutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            });
        }
        self.image.put_pixel(x as u32, y as u32, color);
        Ok(())
    }

    /// Write a pixel if it is in range; out-of-range writes are dropped.
    ///
    /// Returns `true` when a pixel was written. Raster tools draw through this
    /// so a shape that crosses the grid edge is clipped instead of rejected.
    pub fn plot(&mut self, x: i64, y: i64, color: Color) -> bool {
        self.set(x, y, color).is_ok()
    }

    /// Reset every pixel to transparent, in place.
    pub fn clear(&mut self) {
        for pixel in self.image.pixels_mut() {
            *pixel = TRANSPARENT;
        }
    }

    /// Borrow the underlying bitmap.
    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    /// Copy of the underlying bitmap, as handed to the display.
    pub fn to_image(&self) -> RgbaImage {
        self.image.clone()
    }

    /// Pixels as rows of `[r, g, b, a]`, top row first.
    pub fn to_rows(&self) -> Vec<Vec<[u8; 4]>> {
        self.image.rows().map(|row| row.map(|p| p.0).collect()).collect()
    }

    /// Number of pixels that are not fully transparent black.
    pub fn painted_count(&self) -> usize {
        self.image.pixels().filter(|p| **p != TRANSPARENT).count()
    }

    /// Write this frame to an image file (PNG by extension).
    pub fn export_png(&self, path: &Path) -> Result<(), OutputError> {
        save_png(&self.image, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_new_frame_is_transparent() {
        let frame = PixelFrame::square(8);
        assert_eq!(frame.width(), 8);
        assert_eq!(frame.height(), 8);
        assert_eq!(frame.image().as_raw().len(), 8 * 8 * 4);
        assert!(frame.image().pixels().all(|p| *p == TRANSPARENT));
        assert_eq!(frame.painted_count(), 0);
    }

    #[test]
    fn test_set_then_get() {
        let mut frame = PixelFrame::square(16);
        for c in [Rgba([255, 0, 0, 255]), Rgba([1, 2, 3, 4]), TRANSPARENT] {
            for (x, y) in [(0, 0), (15, 15), (3, 11)] {
                frame.set(x, y, c).unwrap();
                assert_eq!(frame.get(x, y), Some(c));
            }
        }
    }

    #[test]
    fn test_set_out_of_bounds() {
        let mut frame = PixelFrame::square(4);
        let err = frame.set(4, 0, Rgba([1, 1, 1, 1])).unwrap_err();
        assert_eq!(err, FrameError::OutOfBounds { x: 4, y: 0, width: 4, height: 4 });
        assert!(frame.set(-1, 2, Rgba([1, 1, 1, 1])).is_err());
        assert_eq!(frame.get(0, 4), None);
    }

    #[test]
    fn test_plot_drops_out_of_range() {
        let mut frame = PixelFrame::square(4);
        assert!(!frame.plot(-1, -1, Rgba([9, 9, 9, 9])));
        assert!(!frame.plot(2, 10, Rgba([9, 9, 9, 9])));
        assert!(frame.plot(2, 3, Rgba([9, 9, 9, 9])));
        assert_eq!(frame.painted_count(), 1);
    }

    #[test]
    fn test_equality_is_deep() {
        let mut a = PixelFrame::square(4);
        let mut b = PixelFrame::square(4);
        assert_eq!(a, b);
        a.set(1, 1, Rgba([5, 5, 5, 5])).unwrap();
        assert_ne!(a, b);
        b.set(1, 1, Rgba([5, 5, 5, 5])).unwrap();
        assert_eq!(a, b);
        assert_ne!(PixelFrame::square(4), PixelFrame::square(8));
    }

    #[test]
    fn test_clear() {
        let mut frame = PixelFrame::square(4);
        frame.set(0, 0, Rgba([5, 5, 5, 5])).unwrap();
        frame.set(3, 3, Rgba([5, 5, 5, 5])).unwrap();
        frame.clear();
        assert_eq!(frame, PixelFrame::square(4));
    }

    #[test]
    fn test_to_rows_is_row_major() {
        let mut frame = PixelFrame::square(2);
        frame.set(1, 0, Rgba([10, 20, 30, 40])).unwrap();
        let rows = frame.to_rows();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![[0, 0, 0, 0], [10, 20, 30, 40]]);
        assert_eq!(rows[1], vec![[0, 0, 0, 0], [0, 0, 0, 0]]);
    }

    #[test]
    fn test_export_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        let mut frame = PixelFrame::square(8);
        frame.set(7, 0, Rgba([0, 255, 0, 255])).unwrap();

        frame.export_png(&path).unwrap();
        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(&loaded, frame.image());
    }
}
