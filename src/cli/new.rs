//! CLI implementation for the `sgrid new` command.

use std::path::Path;
use std::process::ExitCode;

use crate::config::CliOverrides;
use crate::document::Document;
use crate::project::{self, PROJECT_EXTENSION};
use crate::scale::GridSize;

use super::{document_settings, resolve_config, EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};

/// Execute the new command.
pub fn run_new(
    output: &Path,
    size: Option<GridSize>,
    force: bool,
    config_path: Option<&Path>,
) -> ExitCode {
    let output = if output.extension().is_none() {
        output.with_extension(PROJECT_EXTENSION)
    } else {
        output.to_path_buf()
    };
    let output = output.as_path();

    if output.exists() && !force {
        eprintln!("Error: '{}' already exists (use --force to overwrite)", output.display());
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    let overrides = CliOverrides { grid_size: size, ..Default::default() };
    let config = match resolve_config(config_path, &overrides) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let settings = match document_settings(&config) {
        Ok(s) => s,
        Err(code) => return code,
    };

    let doc = Document::with_settings(config.editor.grid_size, settings);
    match project::save(&doc, output) {
        Ok(()) => {
            eprintln!("Created {}x{} project: {}", doc.grid_size(), doc.grid_size(), output.display());
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}
