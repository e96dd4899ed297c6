//! Onion skinning for frame-to-frame drawing reference.
//!
//! The shell draws the previous frame faintly beneath the canvas. The ghost
//! is produced by masking the frame with a fixed semi-transparent overlay and
//! enlarging it to the canvas scale.

use image::{Rgba, RgbaImage};

use crate::output::scale_image;

/// Alpha of the overlay used to mask the ghost frame.
pub const ONION_MASK_ALPHA: u8 = 120;

/// Mask an image with a uniform overlay alpha (destination-in compositing).
///
/// Color channels are untouched; each pixel's alpha is multiplied by
/// `mask_alpha / 255`.
fn mask_alpha(image: &RgbaImage, mask_alpha: u8) -> RgbaImage {
    let mut result = image.clone();
    for pixel in result.pixels_mut() {
        let a = (pixel[3] as u32 * mask_alpha as u32 + 127) / 255;
        *pixel = Rgba([pixel[0], pixel[1], pixel[2], a as u8]);
    }
    result
}

/// Render the ghost of `frame`, enlarged by `scale`.
///
/// # Examples
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use spritegrid::onion::render_onion_skin;
///
/// let frame = RgbaImage::from_pixel(2, 2, Rgba([255, 0, 0, 255]));
/// let ghost = render_onion_skin(&frame, 8);
/// assert_eq!(ghost.dimensions(), (16, 16));
/// assert_eq!(ghost.get_pixel(0, 0)[3], 120);
/// ```
pub fn render_onion_skin(frame: &RgbaImage, scale: u32) -> RgbaImage {
    scale_image(mask_alpha(frame, ONION_MASK_ALPHA), scale)
}

/// The bitmap shown when there is no previous frame.
pub fn empty_onion_skin() -> RgbaImage {
    RgbaImage::new(0, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_keeps_color_and_dims_alpha() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
        img.put_pixel(1, 0, Rgba([10, 20, 30, 128]));

        let masked = mask_alpha(&img, ONION_MASK_ALPHA);
        assert_eq!(*masked.get_pixel(0, 0), Rgba([10, 20, 30, 120]));
        assert_eq!(*masked.get_pixel(1, 0), Rgba([10, 20, 30, 60]));
    }

    #[test]
    fn test_transparent_stays_transparent() {
        let img = RgbaImage::new(3, 3);
        let ghost = render_onion_skin(&img, 2);
        assert!(ghost.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_ghost_scaled() {
        let img = RgbaImage::from_pixel(4, 4, Rgba([1, 1, 1, 255]));
        assert_eq!(render_onion_skin(&img, 32).dimensions(), (128, 128));
        assert_eq!(render_onion_skin(&img, 1).dimensions(), (4, 4));
    }

    #[test]
    fn test_empty_onion_skin() {
        assert_eq!(empty_onion_skin().dimensions(), (0, 0));
    }
}
