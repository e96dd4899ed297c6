//! Animation preview playback state.
//!
//! The host owns the timer. It asks [`Playback::period`] how long to wait,
//! calls [`Playback::tick`] when the wait is over, and re-arms with the
//! period again whether or not the tick produced a bitmap.

use std::time::Duration;

use image::RgbaImage;

use crate::frame::PixelFrame;
use crate::output::scale_image;
use crate::scale::GridSize;

/// Default preview frame rate.
pub const DEFAULT_FPS: i32 = 3;

/// Preview playback settings plus the preview cursor.
///
/// The preview cursor is independent of the document's edit cursor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playback {
    fps: i32,
    playing: bool,
    scaled: bool,
    preview_index: usize,
}

impl Default for Playback {
    fn default() -> Self {
        Self { fps: DEFAULT_FPS, playing: false, scaled: true, preview_index: 0 }
    }
}

impl Playback {
    pub fn new(fps: i32, playing: bool, scaled: bool) -> Self {
        Self { fps, playing, scaled, preview_index: 0 }
    }

    pub fn fps(&self) -> i32 {
        self.fps
    }

    /// Set the frame rate. Any value is accepted; see [`Playback::period`].
    pub fn set_fps(&mut self, fps: i32) {
        self.fps = fps;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    pub fn is_scaled(&self) -> bool {
        self.scaled
    }

    pub fn set_scaled(&mut self, scaled: bool) {
        self.scaled = scaled;
    }

    pub fn preview_index(&self) -> usize {
        self.preview_index
    }

    /// Move the preview back to the first frame.
    pub fn rewind(&mut self) {
        self.preview_index = 0;
    }

    /// Delay until the next tick, or `None` when fps is not positive and the
    /// host should stop re-arming.
    pub fn period(&self) -> Option<Duration> {
        if self.fps <= 0 {
            return None;
        }
        Some(Duration::from_millis(1000 / self.fps as u64))
    }

    /// Advance the preview and return the bitmap to show.
    ///
    /// While paused nothing advances and `None` is returned. The index wraps
    /// to 0 after the last frame; a sequence that shrank since the last tick
    /// also wraps.
    pub fn tick(&mut self, frames: &[PixelFrame], grid: GridSize) -> Option<RgbaImage> {
        if !self.playing || frames.is_empty() {
            return None;
        }

        self.preview_index = if self.preview_index + 1 < frames.len() {
            self.preview_index + 1
        } else {
            0
        };

        let image = frames[self.preview_index].to_image();
        if self.scaled {
            Some(scale_image(image, grid.preview_scale()))
        } else {
            Some(image)
        }
    }
}
