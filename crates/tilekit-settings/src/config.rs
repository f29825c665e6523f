//! Configuration and settings management for tilekit
//!
//! Provides configuration file handling and validation. Supports JSON and
//! TOML file formats stored in the platform-specific config directory.
//!
//! Configuration is organized into logical sections:
//! - History settings (undo depth, merging of rapid edits)
//! - Property editor defaults (file dialog filter, name suggestions)

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, ConfigResult, SettingsResult};

/// Largest accepted undo limit.
pub const MAX_UNDO_LIMIT: usize = 10_000;

/// Undo history settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of undo entries kept; 0 keeps everything
    pub undo_limit: usize,
    /// Coalesce consecutive tile offset edits on the same tileset
    pub merge_tile_offset_edits: bool,
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            undo_limit: 100,
            merge_tile_offset_edits: true,
        }
    }
}

/// Defaults handed to property editors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PropertyEditorSettings {
    /// Filter shown by file-path editors for image properties
    pub image_file_filter: String,
    /// Completion suggestions offered when renaming a tileset
    pub name_suggestions: Vec<String>,
}

impl Default for PropertyEditorSettings {
    fn default() -> Self {
        Self {
            image_file_filter: "Image files (*.png *.gif *.jpg *.jpeg *.bmp)".to_string(),
            name_suggestions: Vec::new(),
        }
    }
}

/// Complete editor configuration
///
/// Aggregates all settings sections and provides file I/O operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Undo history settings
    pub history: HistorySettings,
    /// Property editor defaults
    pub properties: PropertyEditorSettings,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = ConfigFormat::from_path(path)?;
        let content = std::fs::read_to_string(path)?;

        let config: Self = match format {
            ConfigFormat::Json => serde_json::from_str(&content)?,
            ConfigFormat::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load config from file, falling back to defaults when the file is absent
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            tracing::info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match ConfigFormat::from_path(path)? {
            ConfigFormat::Json => serde_json::to_string_pretty(self)?,
            ConfigFormat::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(path, content)?;

        tracing::debug!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> ConfigResult<()> {
        if self.history.undo_limit > MAX_UNDO_LIMIT {
            return Err(ConfigError::ValueOutOfRange {
                key: "history.undo_limit".to_string(),
                value: self.history.undo_limit.to_string(),
            });
        }

        if self.properties.image_file_filter.trim().is_empty() {
            return Err(ConfigError::ValueOutOfRange {
                key: "properties.image_file_filter".to_string(),
                value: String::new(),
            });
        }

        Ok(())
    }

    /// Merge another config into this one
    ///
    /// Sections of `other` that differ from the defaults replace ours; sections
    /// left at their defaults keep our values.
    pub fn merge(&mut self, other: &Config) {
        if other.history != HistorySettings::default() {
            self.history = other.history.clone();
        }
        if other.properties != PropertyEditorSettings::default() {
            self.properties = other.properties.clone();
        }
    }
}

/// Location of the per-user config file
pub fn default_config_path() -> ConfigResult<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("tilekit").join("config.toml"))
        .ok_or_else(|| {
            ConfigError::ConfigDirectory("platform config directory unavailable".to_string())
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ConfigFormat {
    Json,
    Toml,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> ConfigResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(ConfigError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}
