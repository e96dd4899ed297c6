//! CLI implementation for the `sgrid play` command.
//!
//! Drives the document's playback ticker the way a GUI timer would: wait one
//! period, tick, show the bitmap, re-arm.

use std::path::Path;
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::output::save_png;

use super::{document_settings, open_project, resolve_config, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the play command.
pub fn run_play(
    input: &Path,
    out_dir: &Path,
    ticks: usize,
    fps: Option<i32>,
    unscaled: bool,
    no_wait: bool,
    config_path: Option<&Path>,
) -> ExitCode {
    let overrides = CliOverrides { fps, scaled: unscaled.then_some(false), ..Default::default() };
    let config = match resolve_config(config_path, &overrides) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let settings = match document_settings(&config) {
        Ok(s) => s,
        Err(code) => return code,
    };
    let mut doc = match open_project(input, settings) {
        Ok(d) => d,
        Err(code) => return code,
    };

    let Some(period) = doc.playback().period() else {
        eprintln!("Error: fps must be positive, got {}", doc.playback().fps());
        return ExitCode::from(EXIT_INVALID_ARGS);
    };

    doc.playback_mut().set_playing(true);
    let mut written = 0;
    for tick in 0..ticks {
        if !no_wait {
            std::thread::sleep(period);
        }
        let Some(image) = doc.tick() else { continue };

        let path = out_dir.join(format!("preview_{:03}.png", tick));
        if let Err(e) = save_png(&image, &path) {
            eprintln!("Error: cannot write '{}': {}", path.display(), e);
            return ExitCode::from(EXIT_ERROR);
        }
        written += 1;
        log::debug!("tick {} showed frame {}", tick, doc.playback().preview_index() + 1);
    }

    eprintln!("Wrote {} preview frame(s) to {}", written, out_dir.display());
    ExitCode::from(EXIT_SUCCESS)
}
