//! # Tilekit Core
//!
//! Core types, document model and change notifications for tilekit.
//! Provides the tileset/tile arena that editing commands operate on,
//! the geometry value types they snapshot, and the event bus that
//! views subscribe to in order to refresh after a change.

pub mod document;
pub mod error;
pub mod event_bus;
pub mod tileset;
pub mod types;

pub use document::MapDocument;

pub use error::{DocumentError, Error, Result};

pub use event_bus::{
    DocumentEvent, EventBus, EventBusConfig, EventCategory, EventFilter, HistoryEvent,
    Subscription, SubscriptionId, TileEvent, TilesetEvent,
};

pub use tileset::{Tile, TileId, Tileset, TilesetId, TilesetParameters};

pub use types::{Color, Point, Size};
