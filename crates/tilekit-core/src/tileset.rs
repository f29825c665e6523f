//! Tileset and tile entities owned by a [`MapDocument`](crate::MapDocument).
//!
//! Entities are addressed by stable identifiers rather than references so that
//! undo commands can outlive a borrow of the document and detect removal.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::types::{Color, Point, Size};

/// Stable identifier of a tileset inside one document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TilesetId(pub u64);

impl std::fmt::Display for TilesetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Stable identifier of a tile: its tileset plus the tile's local id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TileId {
    pub tileset: TilesetId,
    pub local: u32,
}

impl TileId {
    pub fn new(tileset: TilesetId, local: u32) -> Self {
        Self { tileset, local }
    }
}

impl std::fmt::Display for TileId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.tileset, self.local)
    }
}

/// A single tile. Tiles of image-collection tilesets carry their own image.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tile {
    pub id: u32,
    /// Empty for tiles cut from the tileset image.
    pub image_source: PathBuf,
}

impl Tile {
    pub fn new(id: u32) -> Self {
        Self {
            id,
            image_source: PathBuf::new(),
        }
    }

    pub fn with_image(id: u32, image_source: impl Into<PathBuf>) -> Self {
        Self {
            id,
            image_source: image_source.into(),
        }
    }
}

/// A tileset and the attributes the tileset panel can edit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tileset {
    pub name: String,
    pub tile_size: Size,
    pub tile_spacing: u32,
    pub margin: u32,
    pub tile_offset: Point,
    pub image_source: PathBuf,
    pub transparent_color: Option<Color>,
    pub column_count: u32,
    pub tiles: BTreeMap<u32, Tile>,
}

impl Tileset {
    /// Creates an empty tileset with the given name and tile size.
    pub fn new(name: impl Into<String>, tile_size: Size) -> Self {
        Self {
            name: name.into(),
            tile_size,
            tile_spacing: 0,
            margin: 0,
            tile_offset: Point::ZERO,
            image_source: PathBuf::new(),
            transparent_color: None,
            column_count: 0,
            tiles: BTreeMap::new(),
        }
    }

    /// Builder-style image source, mostly for tests and fixtures.
    pub fn with_image(mut self, image_source: impl Into<PathBuf>) -> Self {
        self.image_source = image_source.into();
        self
    }

    pub fn with_columns(mut self, column_count: u32) -> Self {
        self.column_count = column_count;
        self
    }

    /// Inserts or replaces a tile, keyed by its local id.
    pub fn add_tile(&mut self, tile: Tile) {
        self.tiles.insert(tile.id, tile);
    }

    pub fn tile(&self, id: u32) -> Option<&Tile> {
        self.tiles.get(&id)
    }

    pub fn tile_mut(&mut self, id: u32) -> Option<&mut Tile> {
        self.tiles.get_mut(&id)
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// Snapshot of the image-related parameters.
    pub fn parameters(&self) -> TilesetParameters {
        TilesetParameters::from(self)
    }

    /// Writes every field of `parameters` in one go.
    pub fn apply_parameters(&mut self, parameters: &TilesetParameters) {
        self.image_source = parameters.image_source.clone();
        self.transparent_color = parameters.transparent_color;
        self.tile_size = parameters.tile_size;
        self.tile_spacing = parameters.tile_spacing;
        self.margin = parameters.margin;
    }
}

/// The image-related parameters of a tileset, edited together in one dialog.
///
/// Equality is field-wise.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TilesetParameters {
    pub image_source: PathBuf,
    pub transparent_color: Option<Color>,
    pub tile_size: Size,
    pub tile_spacing: u32,
    pub margin: u32,
}

impl From<&Tileset> for TilesetParameters {
    fn from(tileset: &Tileset) -> Self {
        Self {
            image_source: tileset.image_source.clone(),
            transparent_color: tileset.transparent_color,
            tile_size: tileset.tile_size,
            tile_spacing: tileset.tile_spacing,
            margin: tileset.margin,
        }
    }
}
