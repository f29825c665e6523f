//! Event type definitions for the event bus.
//!
//! Events carry identifiers only; subscribers read the new values back from
//! the document.

use serde::{Deserialize, Serialize};

use crate::tileset::{TileId, TilesetId};

/// Root event enum for all document events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentEvent {
    /// Tileset attribute changes and tileset lifecycle
    Tileset(TilesetEvent),
    /// Tile attribute changes
    Tile(TileEvent),
    /// Undo history navigation
    History(HistoryEvent),
}

impl DocumentEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            DocumentEvent::Tileset(_) => EventCategory::Tileset,
            DocumentEvent::Tile(_) => EventCategory::Tile,
            DocumentEvent::History(_) => EventCategory::History,
        }
    }

    /// The tileset this event concerns, if any
    pub fn tileset_id(&self) -> Option<TilesetId> {
        match self {
            DocumentEvent::Tileset(e) => Some(e.tileset_id()),
            DocumentEvent::Tile(e) => Some(e.tile_id().tileset),
            DocumentEvent::History(_) => None,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            DocumentEvent::Tileset(e) => e.description(),
            DocumentEvent::Tile(e) => e.description(),
            DocumentEvent::History(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Tileset events.
    Tileset,
    /// Tile events.
    Tile,
    /// Undo history events.
    History,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Tileset => write!(f, "Tileset"),
            EventCategory::Tile => write!(f, "Tile"),
            EventCategory::History => write!(f, "History"),
        }
    }
}

/// Tileset-related events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TilesetEvent {
    /// A tileset was added to the document.
    Added {
        /// The new tileset.
        id: TilesetId,
    },
    /// A tileset was removed from the document.
    Removed {
        /// The removed tileset.
        id: TilesetId,
    },
    /// The tileset name changed.
    NameChanged {
        /// The renamed tileset.
        id: TilesetId,
    },
    /// The drawing offset of the tileset's tiles changed.
    TileOffsetChanged {
        /// The affected tileset.
        id: TilesetId,
    },
    /// One or more of the image parameters changed, as a single step.
    ParametersChanged {
        /// The affected tileset.
        id: TilesetId,
    },
    /// The column count changed.
    ColumnCountChanged {
        /// The affected tileset.
        id: TilesetId,
    },
}

impl TilesetEvent {
    pub fn tileset_id(&self) -> TilesetId {
        match self {
            TilesetEvent::Added { id }
            | TilesetEvent::Removed { id }
            | TilesetEvent::NameChanged { id }
            | TilesetEvent::TileOffsetChanged { id }
            | TilesetEvent::ParametersChanged { id }
            | TilesetEvent::ColumnCountChanged { id } => *id,
        }
    }

    pub fn description(&self) -> String {
        match self {
            TilesetEvent::Added { id } => format!("Tileset {} added", id),
            TilesetEvent::Removed { id } => format!("Tileset {} removed", id),
            TilesetEvent::NameChanged { id } => format!("Tileset {} renamed", id),
            TilesetEvent::TileOffsetChanged { id } => {
                format!("Tileset {} tile offset changed", id)
            }
            TilesetEvent::ParametersChanged { id } => {
                format!("Tileset {} parameters changed", id)
            }
            TilesetEvent::ColumnCountChanged { id } => {
                format!("Tileset {} column count changed", id)
            }
        }
    }
}

/// Tile-related events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TileEvent {
    /// A tile was added to, or replaced in, its tileset.
    Added {
        /// The new tile.
        id: TileId,
    },
    /// A tile was removed from its tileset.
    Removed {
        /// The removed tile.
        id: TileId,
    },
    /// The tile's own image changed.
    ImageSourceChanged {
        /// The affected tile.
        id: TileId,
    },
}

impl TileEvent {
    pub fn tile_id(&self) -> TileId {
        match self {
            TileEvent::Added { id }
            | TileEvent::Removed { id }
            | TileEvent::ImageSourceChanged { id } => *id,
        }
    }

    pub fn description(&self) -> String {
        match self {
            TileEvent::Added { id } => format!("Tile {} added", id),
            TileEvent::Removed { id } => format!("Tile {} removed", id),
            TileEvent::ImageSourceChanged { id } => format!("Tile {} image changed", id),
        }
    }
}

/// Undo history events
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryEvent {
    /// The undo position moved (push, undo, redo, clear).
    IndexChanged {
        /// Number of entries that can be undone.
        index: usize,
        /// Whether an undo is available.
        can_undo: bool,
        /// Whether a redo is available.
        can_redo: bool,
    },
    /// The document moved onto or off its saved state.
    CleanChanged {
        /// True when the history is at the clean index.
        clean: bool,
    },
}

impl HistoryEvent {
    pub fn description(&self) -> String {
        match self {
            HistoryEvent::IndexChanged { index, .. } => format!("History index {}", index),
            HistoryEvent::CleanChanged { clean: true } => "History clean".to_string(),
            HistoryEvent::CleanChanged { clean: false } => "History modified".to_string(),
        }
    }
}
