//! The map document: arena of tilesets plus the change-notification sink.
//!
//! All attribute setters publish a [`DocumentEvent`] after writing, so callers
//! (undo commands in particular) never notify views themselves.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::error::DocumentError;
use crate::event_bus::{DocumentEvent, EventBus, EventBusConfig, TileEvent, TilesetEvent};
use crate::tileset::{Tile, TileId, Tileset, TilesetId, TilesetParameters};
use crate::types::Point;

/// Document owning every tileset being edited.
#[derive(Debug, Default)]
pub struct MapDocument {
    tilesets: BTreeMap<TilesetId, Tileset>,
    next_tileset_id: u64,
    event_bus: EventBus,
}

impl MapDocument {
    /// Creates an empty document with a default event bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty document whose bus uses `config`.
    pub fn with_event_bus(config: EventBusConfig) -> Self {
        Self {
            event_bus: EventBus::with_config(config),
            ..Self::default()
        }
    }

    /// The bus every change notification is published on.
    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Takes ownership of `tileset` and returns its new identifier.
    ///
    /// Identifiers are never reused within one document.
    pub fn add_tileset(&mut self, tileset: Tileset) -> TilesetId {
        self.next_tileset_id += 1;
        let id = TilesetId(self.next_tileset_id);
        tracing::debug!("Adding tileset {} '{}'", id, tileset.name);
        self.tilesets.insert(id, tileset);
        self.notify(DocumentEvent::Tileset(TilesetEvent::Added { id }));
        id
    }

    /// Removes a tileset. Commands still addressing it will fail on apply.
    pub fn remove_tileset(&mut self, id: TilesetId) -> Result<Tileset, DocumentError> {
        let tileset = self
            .tilesets
            .remove(&id)
            .ok_or(DocumentError::TilesetNotFound { id })?;
        tracing::debug!("Removed tileset {} '{}'", id, tileset.name);
        self.notify(DocumentEvent::Tileset(TilesetEvent::Removed { id }));
        Ok(tileset)
    }

    pub fn tileset(&self, id: TilesetId) -> Result<&Tileset, DocumentError> {
        self.tilesets
            .get(&id)
            .ok_or(DocumentError::TilesetNotFound { id })
    }

    pub fn contains_tileset(&self, id: TilesetId) -> bool {
        self.tilesets.contains_key(&id)
    }

    /// Tileset identifiers in creation order.
    pub fn tileset_ids(&self) -> Vec<TilesetId> {
        self.tilesets.keys().copied().collect()
    }

    pub fn tileset_count(&self) -> usize {
        self.tilesets.len()
    }

    pub fn tile(&self, id: TileId) -> Result<&Tile, DocumentError> {
        self.tileset(id.tileset)
            .ok()
            .and_then(|tileset| tileset.tile(id.local))
            .ok_or(DocumentError::TileNotFound { id })
    }

    /// Adds or replaces a tile in an existing tileset.
    pub fn add_tile(&mut self, tileset: TilesetId, tile: Tile) -> Result<TileId, DocumentError> {
        let id = TileId::new(tileset, tile.id);
        self.tileset_mut(tileset)?.add_tile(tile);
        self.notify(DocumentEvent::Tile(TileEvent::Added { id }));
        Ok(id)
    }

    pub fn remove_tile(&mut self, id: TileId) -> Result<Tile, DocumentError> {
        let tile = self
            .tileset_mut(id.tileset)
            .ok()
            .and_then(|tileset| tileset.tiles.remove(&id.local))
            .ok_or(DocumentError::TileNotFound { id })?;
        self.notify(DocumentEvent::Tile(TileEvent::Removed { id }));
        Ok(tile)
    }

    pub fn set_tileset_name(
        &mut self,
        id: TilesetId,
        name: impl Into<String>,
    ) -> Result<(), DocumentError> {
        self.tileset_mut(id)?.name = name.into();
        self.notify(DocumentEvent::Tileset(TilesetEvent::NameChanged { id }));
        Ok(())
    }

    pub fn set_tileset_tile_offset(
        &mut self,
        id: TilesetId,
        offset: Point,
    ) -> Result<(), DocumentError> {
        self.tileset_mut(id)?.tile_offset = offset;
        self.notify(DocumentEvent::Tileset(TilesetEvent::TileOffsetChanged { id }));
        Ok(())
    }

    /// Writes all image parameters, then emits a single notification.
    pub fn set_tileset_parameters(
        &mut self,
        id: TilesetId,
        parameters: &TilesetParameters,
    ) -> Result<(), DocumentError> {
        self.tileset_mut(id)?.apply_parameters(parameters);
        self.notify(DocumentEvent::Tileset(TilesetEvent::ParametersChanged { id }));
        Ok(())
    }

    pub fn set_tileset_column_count(
        &mut self,
        id: TilesetId,
        column_count: u32,
    ) -> Result<(), DocumentError> {
        self.tileset_mut(id)?.column_count = column_count;
        self.notify(DocumentEvent::Tileset(TilesetEvent::ColumnCountChanged { id }));
        Ok(())
    }

    pub fn set_tile_image_source(
        &mut self,
        id: TileId,
        image_source: impl Into<PathBuf>,
    ) -> Result<(), DocumentError> {
        let tile = self
            .tileset_mut(id.tileset)
            .ok()
            .and_then(|tileset| tileset.tile_mut(id.local))
            .ok_or(DocumentError::TileNotFound { id })?;
        tile.image_source = image_source.into();
        self.notify(DocumentEvent::Tile(TileEvent::ImageSourceChanged { id }));
        Ok(())
    }

    fn tileset_mut(&mut self, id: TilesetId) -> Result<&mut Tileset, DocumentError> {
        self.tilesets
            .get_mut(&id)
            .ok_or(DocumentError::TilesetNotFound { id })
    }

    fn notify(&self, event: DocumentEvent) {
        self.event_bus.publish(event);
    }
}
