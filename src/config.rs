//! Application configuration
//!
//! Stores user preferences in `~/.config/grido/config.yaml`

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::model::interaction::DRAG_THRESHOLD;
use crate::model::project::DEFAULT_SECTION_CODE;
use crate::model::viewport::ZOOM_DEBOUNCE_MS;

/// Rows of a section that has never been configured
pub const DEFAULT_ROWS: usize = 10;
/// Columns of a section that has never been configured
pub const DEFAULT_COLS: usize = 15;
/// Code used when the section code input is left blank
pub const FALLBACK_SECTION_CODE: &str = "SECTION";

/// Configuration that persists across sessions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Size of new sections and fallback for invalid size input
    pub default_rows: usize,
    pub default_cols: usize,
    /// Section shown when no project is loaded
    pub default_section_code: String,
    /// Idle time after the last wheel event before the full redraw
    pub zoom_debounce_ms: u64,
    /// Pointer travel separating a click from a drag (logical px)
    pub drag_threshold: f64,
    /// Font used for all text; system fonts are tried when unset
    pub font_path: Option<PathBuf>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            default_rows: DEFAULT_ROWS,
            default_cols: DEFAULT_COLS,
            default_section_code: DEFAULT_SECTION_CODE.to_string(),
            zoom_debounce_ms: ZOOM_DEBOUNCE_MS,
            drag_threshold: DRAG_THRESHOLD,
            font_path: None,
        }
    }
}

impl GridConfig {
    /// Load config from disk, or return defaults if not found
    pub fn load() -> Self {
        let Some(path) = crate::config_paths::AppFile::Config.path() else {
            tracing::debug!("No config directory available, using defaults");
            return Self::default();
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            tracing::debug!(
                "Config file not found at {}, using defaults",
                path.display()
            );
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match serde_yaml::from_str::<GridConfig>(&content) {
                Ok(config) => {
                    tracing::info!("Loaded config from {}", path.display());
                    config.sanitized()
                }
                Err(e) => {
                    tracing::warn!("Failed to parse config at {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!("Failed to read config at {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save config to disk
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> Result<(), String> {
        let path = crate::config_paths::AppFile::Config.path()
            .ok_or_else(|| "No config directory available".to_string())?;
        self.save_to(&path)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), String> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create config directory: {}", e))?;
        }

        let content = serde_yaml::to_string(self)
            .map_err(|e| format!("Failed to serialize config: {}", e))?;

        std::fs::write(path, content)
            .map_err(|e| format!("Failed to write config to {}: {}", path.display(), e))?;

        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Replace out-of-range values with defaults
    fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        let max = crate::model::grid::MAX_DIMENSION;
        if self.default_rows == 0 || self.default_rows > max {
            self.default_rows = defaults.default_rows;
        }
        if self.default_cols == 0 || self.default_cols > max {
            self.default_cols = defaults.default_cols;
        }
        if self.default_section_code.trim().is_empty() {
            self.default_section_code = defaults.default_section_code;
        }
        if !self.drag_threshold.is_finite() || self.drag_threshold < 0.0 {
            self.drag_threshold = defaults.drag_threshold;
        }
        self
    }
}
