//! Animated GIF export of a document's frame sequence.
//!
//! The GIF replays the playback preview: every frame in order, looping
//! forever, one frame per playback period.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use image::codecs::gif::{GifEncoder, Repeat};
use image::{Delay, Frame};
use thiserror::Error;

use crate::frame::PixelFrame;
use crate::output::scale_image;
use crate::playback::Playback;

/// Error type for GIF export
#[derive(Debug, Error)]
pub enum GifError {
    /// The playback rate has no period, so there is no frame delay
    #[error("fps must be positive, got {0}")]
    InvalidFps(i32),
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// GIF encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Write `frames` as a looping GIF, each shown for one playback period and
/// enlarged by `scale`. Returns the number of frames written.
///
/// Nothing is written when the playback rate is not positive.
pub fn render_gif(
    frames: &[PixelFrame],
    playback: &Playback,
    scale: u32,
    path: &Path,
) -> Result<usize, GifError> {
    let period = playback.period().ok_or(GifError::InvalidFps(playback.fps()))?;
    let delay = Delay::from_saturating_duration(period);

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut encoder = GifEncoder::new(BufWriter::new(File::create(path)?));
    encoder.set_repeat(Repeat::Infinite)?;
    for frame in frames {
        encoder.encode_frame(Frame::from_parts(scale_image(frame.to_image(), scale), 0, 0, delay))?;
    }

    log::info!("wrote {} frame(s) at {}ms to '{}'", frames.len(), period.as_millis(), path.display());
    Ok(frames.len())
}
