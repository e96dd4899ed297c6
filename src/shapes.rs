//! Outline rasterization for the two-click shape tools.
//!
//! The `rasterize_*` functions turn a pair of corner points into the set of
//! integer pixel coordinates forming the outline; `rectangle` and `ellipse`
//! paint those coordinates into a frame, clipping anything off-grid.

use std::collections::HashSet;

use crate::color::Color;
use crate::frame::PixelFrame;

/// A logical pixel coordinate. Signed so shapes may extend past the grid.
pub type Point = (i64, i64);

/// Normalized bounding box of two corners: `(x_start, y_start, x_end, y_end)`.
fn bounds(a: Point, b: Point) -> (i64, i64, i64, i64) {
    (a.0.min(b.0), a.1.min(b.1), a.0.max(b.0), a.1.max(b.1))
}

/// Rasterize a one-pixel rectangle outline spanning two corners (inclusive).
///
/// Top and bottom rows cover the full width, corners included; the side
/// columns cover only the rows strictly between them.
///
/// # Examples
///
/// ```
/// use spritegrid::shapes::rasterize_rect_outline;
///
/// let pixels = rasterize_rect_outline((0, 0), (3, 3));
/// assert_eq!(pixels.len(), 12);
/// assert!(!pixels.contains(&(1, 1)));
/// ```
pub fn rasterize_rect_outline(a: Point, b: Point) -> HashSet<Point> {
    let (x_start, y_start, x_end, y_end) = bounds(a, b);
    let mut pixels = HashSet::new();

    for x in x_start..=x_end {
        pixels.insert((x, y_start));
        pixels.insert((x, y_end));
    }
    for y in (y_start + 1)..y_end {
        pixels.insert((x_start, y));
        pixels.insert((x_end, y));
    }

    pixels
}

/// Rasterize an ellipse outline inscribed in the box spanned by two corners.
///
/// Radii are half the box extents and the center is `start + radius`, both
/// with integer truncation, so boxes with an odd span lean toward the
/// top-left. Uses the two-region midpoint algorithm and mirrors each step
/// into all four quadrants.
///
/// # Examples
///
/// ```
/// use spritegrid::shapes::rasterize_ellipse_outline;
///
/// let pixels = rasterize_ellipse_outline((0, 0), (6, 4));
/// assert!(pixels.contains(&(3, 0)));
/// assert!(pixels.contains(&(0, 2)));
/// assert!(!pixels.contains(&(3, 2))); // Center stays empty
/// ```
pub fn rasterize_ellipse_outline(a: Point, b: Point) -> HashSet<Point> {
    let (x_start, y_start, x_end, y_end) = bounds(a, b);
    let rx = (x_end - x_start) / 2;
    let ry = (y_end - y_start) / 2;
    let cx = x_start + rx;
    let cy = y_start + ry;

    let rx_sq = (rx * rx) as f64;
    let ry_sq = (ry * ry) as f64;

    let mut pixels = HashSet::new();
    let mut x = 0i64;
    let mut y = ry;

    // Region 1: slope magnitude below 1
    let mut p1 = ry_sq - rx_sq * ry as f64 + 0.25 * rx_sq;
    let mut dx = 2.0 * ry_sq * x as f64;
    let mut dy = 2.0 * rx_sq * y as f64;

    while dx < dy {
        mirror_quadrants(cx, cy, x, y, &mut pixels);

        x += 1;
        dx += 2.0 * ry_sq;
        if p1 < 0.0 {
            p1 += dx + ry_sq;
        } else {
            y -= 1;
            dy -= 2.0 * rx_sq;
            p1 += dx - dy + ry_sq;
        }
    }

    // Region 2: slope magnitude 1 or more
    let xf = x as f64 + 0.5;
    let yf = (y - 1) as f64;
    let mut p2 = ry_sq * xf * xf + rx_sq * yf * yf - rx_sq * ry_sq;

    while y >= 0 {
        mirror_quadrants(cx, cy, x, y, &mut pixels);

        y -= 1;
        dy -= 2.0 * rx_sq;
        if p2 > 0.0 {
            p2 += rx_sq - dy;
        } else {
            x += 1;
            dx += 2.0 * ry_sq;
            p2 += dx - dy + rx_sq;
        }
    }

    pixels
}

fn mirror_quadrants(cx: i64, cy: i64, x: i64, y: i64, pixels: &mut HashSet<Point>) {
    pixels.insert((cx + x, cy + y));
    pixels.insert((cx + x, cy - y));
    pixels.insert((cx - x, cy + y));
    pixels.insert((cx - x, cy - y));
}

fn paint(frame: &mut PixelFrame, pixels: HashSet<Point>, color: Color) -> usize {
    pixels.into_iter().filter(|&(x, y)| frame.plot(x, y, color)).count()
}

/// Paint a rectangle outline into `frame`. Returns the number of pixels written.
pub fn rectangle(frame: &mut PixelFrame, a: Point, b: Point, color: Color) -> usize {
    paint(frame, rasterize_rect_outline(a, b), color)
}

/// Paint an ellipse outline into `frame`, dropping off-grid points.
/// Returns the number of pixels written.
pub fn ellipse(frame: &mut PixelFrame, a: Point, b: Point, color: Color) -> usize {
    paint(frame, rasterize_ellipse_outline(a, b), color)
}
