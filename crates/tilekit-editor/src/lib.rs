//! # Tilekit Editor
//!
//! Reversible editing of tileset attributes and the property-grid wiring
//! that produces those edits.
//!
//! ## Core Components
//!
//! ### Commands
//! - **EditorCommand**: tagged union of every reversible edit
//! - Each command snapshots the old and new value of one property of one
//!   tileset or tile, addressed by id
//! - Tile offset edits coalesce when pushed back to back
//!
//! ### Undo History
//! - **UndoStack**: applies, merges, groups (macros) and navigates commands
//! - Tracks the clean index for "document modified" state
//!
//! ### Property Grid
//! - **PropertyManager**: typed property values and attributes
//! - **EditorFactory**: picks an editor model per property type and keeps
//!   every created editor in sync with its property
//! - **TilesetPropertyBrowser**: maps a tileset onto property rows and turns
//!   committed edits into commands
//!
//! ## Architecture
//!
//! ```text
//! EditorSession
//!   ├── MapDocument (tilekit-core)
//!   ├── UndoStack ── EditorCommand
//!   └── TilesetPropertyBrowser
//!         ├── PropertyManager
//!         └── EditorFactory
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tilekit_editor::{EditorSession, RenameTileset};
//!
//! let mut session = EditorSession::new(&config);
//! let id = session.document_mut().add_tileset(tileset);
//! let rename = RenameTileset::new(session.document(), id, "grass_v2")?;
//! session.execute(rename.into())?;
//! session.undo()?;
//! ```

pub mod commands;
pub mod error;
pub mod properties;
pub mod session;
pub mod undo_stack;

pub use commands::{
    ChangeTileImageSource, ChangeTilesetColumnCount, ChangeTilesetParameters,
    ChangeTilesetTileOffset, CommandId, CompositeCommand, EditorCommand, RenameTileset,
    UndoCommand,
};
pub use error::{EditorError, EditorResult};
pub use properties::{
    AttributeValue, Completer, Editor, EditorFactory, EditorId, EditorKind, FileEdit, LineEdit,
    PropertyId, PropertyManager, PropertyType, PropertyValue, TilesetParametersEdit,
    TilesetPropertyBrowser, TilesetRow, ValueEdit,
};
pub use session::EditorSession;
pub use undo_stack::UndoStack;
