//! Configuration schema types for `sgrid.toml`
//!
//! Defines editor and playback defaults and their validation rules.

use serde::{Deserialize, Serialize};

use crate::color::{parse_color, with_alpha, ColorError};
use crate::document::DocumentSettings;
use crate::playback::{Playback, DEFAULT_FPS};
use crate::scale::GridSize;

/// Editor defaults for new documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// Grid size for `sgrid new` when none is given
    #[serde(default)]
    pub grid_size: GridSize,
    /// Color bound to the primary button
    #[serde(default = "default_primary")]
    pub primary: String,
    /// Color bound to the secondary button
    #[serde(default = "default_secondary")]
    pub secondary: String,
    /// Brush alpha applied to both colors
    #[serde(default = "default_alpha")]
    pub alpha: u8,
}

fn default_primary() -> String {
    "#000000".to_string()
}

fn default_secondary() -> String {
    "#FFFFFF".to_string()
}

fn default_alpha() -> u8 {
    255
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: GridSize::default(),
            primary: default_primary(),
            secondary: default_secondary(),
            alpha: default_alpha(),
        }
    }
}

/// Animation preview settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Preview frames per second
    #[serde(default = "default_fps")]
    pub fps: i32,
    /// Enlarge the preview by the grid's preview scale
    #[serde(default = "default_true")]
    pub scaled: bool,
}

fn default_fps() -> i32 {
    DEFAULT_FPS
}

fn default_true() -> bool {
    true
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self { fps: default_fps(), scaled: true }
    }
}

/// Complete sgrid.toml configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SgridConfig {
    #[serde(default)]
    pub editor: EditorConfig,
    #[serde(default)]
    pub playback: PlaybackConfig,
}

/// Configuration validation error
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    /// Path to the invalid field (e.g., "editor.primary")
    pub field: String,
    /// Error message
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "sgrid.toml: '{}' {}", self.field, self.message)
    }
}

impl SgridConfig {
    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Vec<ConfigValidationError> {
        let mut errors = Vec::new();

        for (field, value) in
            [("editor.primary", &self.editor.primary), ("editor.secondary", &self.editor.secondary)]
        {
            if let Err(e) = parse_color(value) {
                errors.push(ConfigValidationError {
                    field: field.to_string(),
                    message: format!("is not a color: {}", e),
                });
            }
        }

        if self.playback.fps <= 0 {
            errors.push(ConfigValidationError {
                field: "playback.fps".to_string(),
                message: "must be a positive integer".to_string(),
            });
        }

        errors
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Starting settings for a document created or opened under this config.
    pub fn document_settings(&self) -> Result<DocumentSettings, ColorError> {
        Ok(DocumentSettings {
            primary: with_alpha(parse_color(&self.editor.primary)?, self.editor.alpha),
            secondary: with_alpha(parse_color(&self.editor.secondary)?, self.editor.alpha),
            playback: Playback::new(self.playback.fps, false, self.playback.scaled),
        })
    }
}
