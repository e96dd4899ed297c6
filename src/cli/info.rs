//! CLI implementation for the `sgrid info` command.

use std::path::Path;
use std::process::ExitCode;

use serde::Serialize;

use crate::document::DocumentSettings;

use super::{open_project, EXIT_ERROR, EXIT_SUCCESS};

#[derive(Debug, Serialize)]
struct ProjectInfo {
    grid_size: u32,
    frames: Vec<FrameInfo>,
}

#[derive(Debug, Serialize)]
struct FrameInfo {
    index: usize,
    painted: usize,
}

/// Execute the info command.
pub fn run_info(input: &Path, json: bool) -> ExitCode {
    let doc = match open_project(input, DocumentSettings::default()) {
        Ok(d) => d,
        Err(code) => return code,
    };

    let info = ProjectInfo {
        grid_size: doc.grid_size().pixels(),
        frames: doc
            .frames()
            .iter()
            .enumerate()
            .map(|(i, f)| FrameInfo { index: i + 1, painted: f.painted_count() })
            .collect(),
    };

    if json {
        match serde_json::to_string_pretty(&info) {
            Ok(s) => println!("{}", s),
            Err(e) => {
                eprintln!("Error: {}", e);
                return ExitCode::from(EXIT_ERROR);
            }
        }
    } else {
        println!("{}", input.display());
        println!("  Grid: {}x{}", info.grid_size, info.grid_size);
        println!("  Frames: {}", info.frames.len());
        for frame in &info.frames {
            println!("    frame {}: {} painted pixel(s)", frame.index, frame.painted);
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}
