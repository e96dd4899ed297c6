//! Command-line interface implementation
//!
//! This module provides the CLI entry point and dispatches to submodules
//! for specific command implementations.

mod draw;
mod export;
mod info;
mod new;
mod play;

use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use crate::config::{load_config, merge_cli_overrides, CliOverrides, SgridConfig};
use crate::document::{Document, DocumentSettings};
use crate::scale::GridSize;

/// Exit codes
pub(crate) const EXIT_SUCCESS: u8 = 0;
pub(crate) const EXIT_ERROR: u8 = 1;
pub(crate) const EXIT_INVALID_ARGS: u8 = 2;

/// Spritegrid - edit pixel-grid sprite animations
#[derive(Parser)]
#[command(name = "sgrid")]
#[command(about = "Spritegrid - edit pixel-grid sprite animations (.ssp projects)")]
#[command(version)]
pub struct Cli {
    /// Config file (default: nearest sgrid.toml, then ~/.config/spritegrid/sgrid.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a new project with one blank frame
    New {
        /// Output project file (.ssp is added when there is no extension)
        output: PathBuf,

        /// Grid size: 8, 16, 32, 64, 128 or 256 (default: from config, else 32)
        #[arg(long)]
        size: Option<GridSize>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show grid size and per-frame contents of a project
    Info {
        /// Project file (.ssp)
        input: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay editor events against a project
    ///
    /// Events run in order. Tools and frame controls: pen, eraser, bucket,
    /// rect, ellipse, add-frame, prev, next, delete-frame, clear-frame.
    /// Pointer events: click=X,Y and rclick=X,Y (grid coordinates), point=X,Y
    /// and rpoint=X,Y (display coordinates). Colors: color=C, rcolor=C,
    /// alpha=N.
    Draw {
        /// Project file (.ssp)
        input: PathBuf,

        /// Events to apply
        #[arg(required = true)]
        events: Vec<String>,

        /// Write to this file instead of modifying the input
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Primary color before any events (default: from config)
        #[arg(long)]
        primary: Option<String>,

        /// Secondary color before any events (default: from config)
        #[arg(long)]
        secondary: Option<String>,

        /// Alpha applied to both colors before any events (default: from config)
        #[arg(long)]
        alpha: Option<u8>,

        /// Apply events and report, but do not write
        #[arg(long)]
        dry_run: bool,
    },

    /// Export one frame as a PNG image
    Export {
        /// Project file (.ssp)
        input: PathBuf,

        /// Output image path
        #[arg(short, long)]
        output: PathBuf,

        /// 1-based frame number
        #[arg(long, default_value = "1")]
        frame: usize,

        /// Scale output by integer factor (1-64, default: 1)
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..=64))]
        scale: u32,
    },

    /// Export all frames as an animated GIF at the playback rate
    Gif {
        /// Project file (.ssp)
        input: PathBuf,

        /// Output GIF path
        #[arg(short, long)]
        output: PathBuf,

        /// Frames per second (default: from config)
        #[arg(long)]
        fps: Option<i32>,

        /// Scale output by integer factor (1-64, default: 1)
        #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..=64))]
        scale: u32,
    },

    /// Run the playback preview and write each previewed frame as PNG
    Play {
        /// Project file (.ssp)
        input: PathBuf,

        /// Directory for preview_NNN.png files
        #[arg(short, long)]
        out_dir: PathBuf,

        /// Number of ticks to run
        #[arg(long, default_value = "1")]
        ticks: usize,

        /// Frames per second (default: from config)
        #[arg(long)]
        fps: Option<i32>,

        /// Write frames at grid size instead of preview size
        #[arg(long)]
        unscaled: bool,

        /// Do not wait between ticks
        #[arg(long)]
        no_wait: bool,
    },
}

/// Load configuration, apply overrides, and report problems to stderr.
pub(crate) fn resolve_config(
    config_path: Option<&Path>,
    overrides: &CliOverrides,
) -> Result<SgridConfig, ExitCode> {
    let mut config = match load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return Err(ExitCode::from(EXIT_ERROR));
        }
    };
    merge_cli_overrides(&mut config, overrides);
    Ok(config)
}

/// Build document settings from a resolved config.
pub(crate) fn document_settings(config: &SgridConfig) -> Result<DocumentSettings, ExitCode> {
    config.document_settings().map_err(|e| {
        eprintln!("Error: invalid color: {}", e);
        ExitCode::from(EXIT_INVALID_ARGS)
    })
}

/// Open a project, reporting failures to stderr.
pub(crate) fn open_project(path: &Path, settings: DocumentSettings) -> Result<Document, ExitCode> {
    Document::open_with_settings(path, settings).map_err(|e| {
        eprintln!("Error: cannot open '{}': {}", path.display(), e);
        ExitCode::from(EXIT_ERROR)
    })
}

/// Run the CLI application
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::New { output, size, force } => new::run_new(&output, size, force, config_path),
        Commands::Info { input, json } => info::run_info(&input, json),
        Commands::Draw { input, events, output, primary, secondary, alpha, dry_run } => {
            let overrides = CliOverrides { primary, secondary, alpha, ..Default::default() };
            draw::run_draw(&input, &events, output.as_deref(), &overrides, dry_run, config_path)
        }
        Commands::Export { input, output, frame, scale } => {
            export::run_export(&input, &output, frame, scale)
        }
        Commands::Gif { input, output, fps, scale } => {
            export::run_gif(&input, &output, fps, scale, config_path)
        }
        Commands::Play { input, out_dir, ticks, fps, unscaled, no_wait } => {
            play::run_play(&input, &out_dir, ticks, fps, unscaled, no_wait, config_path)
        }
    }
}
