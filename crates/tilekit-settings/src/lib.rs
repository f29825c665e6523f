//! Tilekit Settings Crate
//!
//! Handles editor configuration: undo history limits, merge policy and the
//! defaults handed to property editors.

pub mod config;
pub mod error;

pub use config::{default_config_path, Config, HistorySettings, PropertyEditorSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
