//! CLI implementation for the `sgrid export` and `sgrid gif` commands.

use std::path::Path;
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::document::DocumentSettings;
use crate::gif::{render_gif, GifError};
use crate::output::{save_png, scale_image};

use super::{document_settings, open_project, resolve_config, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the export command.
pub fn run_export(input: &Path, output: &Path, frame: usize, scale: u32) -> ExitCode {
    let doc = match open_project(input, DocumentSettings::default()) {
        Ok(d) => d,
        Err(code) => return code,
    };

    let Some(selected) = frame.checked_sub(1).and_then(|i| doc.frames().get(i)) else {
        eprintln!("Error: frame {} out of range (project has {} frame(s))", frame, doc.frame_count());
        return ExitCode::from(EXIT_INVALID_ARGS);
    };

    match save_png(&scale_image(selected.to_image(), scale), output) {
        Ok(()) => {
            eprintln!("Saved: {}", output.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: cannot export '{}': {}", output.display(), e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Execute the gif command.
pub fn run_gif(
    input: &Path,
    output: &Path,
    fps: Option<i32>,
    scale: u32,
    config_path: Option<&Path>,
) -> ExitCode {
    let config = match resolve_config(config_path, &CliOverrides { fps, ..Default::default() }) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let settings = match document_settings(&config) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let doc = match open_project(input, settings) {
        Ok(d) => d,
        Err(code) => return code,
    };

    match render_gif(doc.frames(), doc.playback(), scale, output) {
        Ok(written) => {
            eprintln!("Saved: {} ({} frame(s))", output.display(), written);
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e @ GifError::InvalidFps(_)) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_INVALID_ARGS)
        }
        Err(e) => {
            eprintln!("Error: cannot write '{}': {}", output.display(), e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
