//! Breadth-first flood fill over 4-connected neighbors.

use std::collections::VecDeque;

use crate::color::Color;
use crate::frame::PixelFrame;

/// Neighbor order: west, east, north (y + 1), south (y - 1).
const NEIGHBORS: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, 1), (0, -1)];

/// Flood fill the region of `target`-colored pixels connected to `start`.
///
/// A dequeued pixel is repainted only if it still holds `target`; neighbors
/// are queued when in bounds and not already `replacement`. That check keeps
/// the queue finite even when `target == replacement`, so no visited set is
/// needed. Returns the number of pixel writes performed.
///
/// # Examples
///
/// ```
/// use image::Rgba;
/// use spritegrid::fill::flood_fill;
/// use spritegrid::frame::PixelFrame;
///
/// let mut frame = PixelFrame::square(8);
/// let written = flood_fill(&mut frame, (0, 0), Rgba([255, 0, 0, 255]), Rgba([0, 0, 0, 0]));
/// assert_eq!(written, 64);
/// ```
pub fn flood_fill(
    frame: &mut PixelFrame,
    start: (i64, i64),
    replacement: Color,
    target: Color,
) -> usize {
    if !frame.contains(start.0, start.1) {
        return 0;
    }

    let mut written = 0;
    let mut queue = VecDeque::new();
    queue.push_back(start);

    while let Some((x, y)) = queue.pop_front() {
        if frame.get(x, y) != Some(target) {
            continue;
        }
        frame.plot(x, y, replacement);
        written += 1;

        for (dx, dy) in NEIGHBORS {
            let (nx, ny) = (x + dx, y + dy);
            match frame.get(nx, ny) {
                Some(color) if color != replacement => queue.push_back((nx, ny)),
                _ => {}
            }
        }
    }

    written
}
