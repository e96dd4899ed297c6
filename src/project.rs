//! Project file persistence (`.ssp`).
//!
//! A project is one JSON object:
//!
//! ```text
//! {
//!   "width": 8, "height": 8, "numberOfFrames": 2,
//!   "frames": { "frame0": [[[r,g,b,a], ...], ...], "frame1": ... }
//! }
//! ```
//!
//! Loading is lenient. Missing keys keep the document's current value,
//! short rows leave the remaining pixels transparent, and channel values are
//! clamped to 0-255. Only unreadable files, non-JSON content and unsupported
//! grid sizes are errors, and on error the document is not touched.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use image::Rgba;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::document::Document;
use crate::frame::PixelFrame;
use crate::scale::{GridSize, GridSizeError};

/// Default project file extension.
pub const PROJECT_EXTENSION: &str = "ssp";

/// Error type for project save/load
#[derive(Debug, Error)]
pub enum ProjectError {
    /// File could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// Content is not JSON
    #[error("invalid project JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The project names a grid size the editor does not support
    #[error(transparent)]
    UnsupportedSize(#[from] GridSizeError),
}

/// On-disk layout written by [`save`].
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProjectFile {
    width: u32,
    height: u32,
    number_of_frames: usize,
    frames: BTreeMap<String, Vec<Vec<[u8; 4]>>>,
}

fn frame_key(index: usize) -> String {
    format!("frame{}", index)
}

/// Serialize a document to project JSON.
pub fn encode(doc: &Document) -> Result<String, ProjectError> {
    let size = doc.grid_size().pixels();
    let project = ProjectFile {
        width: size,
        height: size,
        number_of_frames: doc.frame_count(),
        frames: doc
            .frames()
            .iter()
            .enumerate()
            .map(|(i, frame)| (frame_key(i), frame.to_rows()))
            .collect(),
    };
    Ok(serde_json::to_string_pretty(&project)?)
}

/// Write a document to a project file.
pub fn save(doc: &Document, path: &Path) -> Result<(), ProjectError> {
    let content = encode(doc)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent)?;
        }
    }
    fs::write(path, content)?;
    log::info!("saved {} frame(s) to '{}'", doc.frame_count(), path.display());
    Ok(())
}

/// Load a project file into an existing document.
pub fn load_into(doc: &mut Document, path: &Path) -> Result<(), ProjectError> {
    let content = fs::read_to_string(path)?;
    decode_into(doc, &content)?;
    log::info!("opened '{}' ({} frame(s))", path.display(), doc.frame_count());
    Ok(())
}

/// Apply project JSON to an existing document.
pub fn decode_into(doc: &mut Document, content: &str) -> Result<(), ProjectError> {
    let value: Value = serde_json::from_str(content)?;
    let Some(object) = value.as_object() else {
        log::warn!("project is not a JSON object; nothing loaded");
        return Ok(());
    };

    let grid = match object.get("height") {
        None => doc.grid_size(),
        Some(height) => match whole_number(height) {
            Some(h) => GridSize::try_from(h)?,
            None => {
                log::warn!("ignoring non-integer project height {}", height);
                doc.grid_size()
            }
        },
    };

    let frames = match object.get("frames") {
        Some(Value::Object(frames)) => Some(decode_frames(frames, grid)),
        Some(other) => {
            log::warn!("ignoring project frames of unexpected type: {}", json_type(other));
            None
        }
        None => None,
    };

    match frames {
        Some(frames) => doc.replace_frames(grid, frames),
        None if grid != doc.grid_size() => {
            log::warn!("project changes grid size to {} without frames; starting blank", grid);
            doc.replace_frames(grid, vec![PixelFrame::square(grid.pixels())]);
        }
        None => {}
    }

    Ok(())
}

/// Decode `frame0..frameN` where N is the number of entries in the map.
/// A missing key yields a blank frame; an empty map yields one blank frame.
fn decode_frames(frames: &serde_json::Map<String, Value>, grid: GridSize) -> Vec<PixelFrame> {
    let count = frames.len().max(1);
    (0..count)
        .map(|i| {
            let mut frame = PixelFrame::square(grid.pixels());
            match frames.get(&frame_key(i)) {
                Some(Value::Array(rows)) => decode_rows(&mut frame, rows),
                Some(other) => {
                    log::warn!("{} is {}, expected rows; left blank", frame_key(i), json_type(other))
                }
                None if !frames.is_empty() => log::warn!("{} missing; left blank", frame_key(i)),
                None => {}
            }
            frame
        })
        .collect()
}

fn decode_rows(frame: &mut PixelFrame, rows: &[Value]) {
    for (y, row) in rows.iter().enumerate() {
        let Some(pixels) = row.as_array() else { continue };
        for (x, pixel) in pixels.iter().enumerate() {
            let channels = pixel.as_array().map(Vec::as_slice).unwrap_or(&[]);
            let channel = |i: usize| {
                channels.get(i).and_then(whole_number).unwrap_or(0).clamp(0, 255) as u8
            };
            frame.plot(x as i64, y as i64, Rgba([channel(0), channel(1), channel(2), channel(3)]));
        }
    }
}

/// Integer value of a JSON number, accepting whole floats such as `32.0`.
fn whole_number(value: &Value) -> Option<i64> {
    value.as_i64().or_else(|| {
        value.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
