//! # Tilekit
//!
//! Headless editing core for the tileset panel of a tile-map editor:
//! - Reversible property commands for tilesets and tiles
//! - Undo history with merging of rapid edits, macros and clean tracking
//! - Property-grid editor factory and tileset property browser
//!
//! ## Architecture
//!
//! Tilekit is organized as a workspace with multiple crates:
//!
//! 1. **tilekit-core** - Document model, geometry types, change notifications
//! 2. **tilekit-editor** - Commands, undo stack, property grid, editing session
//! 3. **tilekit-settings** - Configuration files and validation
//! 4. **tilekit** - Logging setup and re-exports

pub use tilekit_core::{
    Color, DocumentError, DocumentEvent, EventBus, EventFilter, HistoryEvent, MapDocument, Point,
    Size, Tile, TileId, Tileset, TilesetId, TilesetParameters,
};

pub use tilekit_editor::{
    ChangeTileImageSource, ChangeTilesetColumnCount, ChangeTilesetParameters,
    ChangeTilesetTileOffset, CompositeCommand, EditorCommand, EditorError, EditorFactory,
    EditorResult, EditorSession, PropertyManager, PropertyType, PropertyValue, RenameTileset,
    TilesetPropertyBrowser, TilesetRow, UndoCommand, UndoStack,
};

pub use tilekit_settings::{default_config_path, Config, HistorySettings, PropertyEditorSettings};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Console output with `RUST_LOG` support, falling back to `info`.
pub fn init_logging() -> anyhow::Result<()> {
    init_logging_with("info")
}

/// Initialize logging with `default_directive` when `RUST_LOG` is unset.
///
/// Fails if a global subscriber is already installed.
pub fn init_logging_with(default_directive: &str) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))?;

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
