//! Configuration loading and discovery for `sgrid.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::SgridConfig;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::scale::GridSize;

/// Name of the configuration file.
pub const CONFIG_FILE: &str = "sgrid.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse sgrid.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override grid size for new documents
    pub grid_size: Option<GridSize>,
    /// Override primary color
    pub primary: Option<String>,
    /// Override secondary color
    pub secondary: Option<String>,
    /// Override brush alpha
    pub alpha: Option<u8>,
    /// Override preview fps
    pub fps: Option<i32>,
    /// Override preview scaling
    pub scaled: Option<bool>,
}

/// Find sgrid.toml by walking up from the current working directory.
///
/// Search order:
/// 1. Walk up from current directory looking for sgrid.toml
/// 2. Check XDG_CONFIG_HOME/spritegrid/sgrid.toml (or ~/.config/spritegrid/sgrid.toml)
pub fn find_config() -> Option<PathBuf> {
    if let Ok(cwd) = env::current_dir() {
        if let Some(path) = find_config_from(cwd) {
            return Some(path);
        }
    }

    find_xdg_config()
}

/// Find sgrid.toml in the XDG config directory.
pub fn find_xdg_config() -> Option<PathBuf> {
    let xdg_config = env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|_| env::var("HOME").map(|h| PathBuf::from(h).join(".config")))
        .ok()?;

    let config_path = xdg_config.join("spritegrid").join(CONFIG_FILE);
    if config_path.exists() {
        Some(config_path)
    } else {
        None
    }
}

/// Find sgrid.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from an sgrid.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses
/// `find_config()` to locate one. If no config file is found, returns the
/// default configuration.
pub fn load_config(path: Option<&Path>) -> Result<SgridConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => {
            log::debug!("loading config from '{}'", p.display());
            load_config_file(&p)
        }
        None => Ok(SgridConfig::default()),
    }
}

/// Load configuration from a specific file path.
fn load_config_file(path: &Path) -> Result<SgridConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: SgridConfig = toml::from_str(&contents)?;

    let errors = config.validate();
    if !errors.is_empty() {
        return Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()));
    }

    Ok(config)
}

/// Merge CLI overrides into a configuration.
///
/// CLI arguments take precedence over config file values. The result is not
/// re-validated here; callers go through `SgridConfig::document_settings`,
/// which reports bad colors.
pub fn merge_cli_overrides(config: &mut SgridConfig, overrides: &CliOverrides) {
    if let Some(grid_size) = overrides.grid_size {
        config.editor.grid_size = grid_size;
    }
    if let Some(ref primary) = overrides.primary {
        config.editor.primary = primary.clone();
    }
    if let Some(ref secondary) = overrides.secondary {
        config.editor.secondary = secondary.clone();
    }
    if let Some(alpha) = overrides.alpha {
        config.editor.alpha = alpha;
    }
    if let Some(fps) = overrides.fps {
        config.playback.fps = fps;
    }
    if let Some(scaled) = overrides.scaled {
        config.playback.scaled = scaled;
    }
}
