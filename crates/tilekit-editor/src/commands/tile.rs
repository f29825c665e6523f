//! Commands that change attributes of a single tile.

use std::path::{Path, PathBuf};

use tilekit_core::{DocumentError, MapDocument, TileId};

use super::UndoCommand;

/// Replaces the image of one tile in an image-collection tileset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeTileImageSource {
    tile: TileId,
    old_image_source: PathBuf,
    new_image_source: PathBuf,
}

impl ChangeTileImageSource {
    pub fn new(
        document: &MapDocument,
        tile: TileId,
        image_source: impl Into<PathBuf>,
    ) -> Result<Self, DocumentError> {
        let old_image_source = document.tile(tile)?.image_source.clone();
        Ok(Self {
            tile,
            old_image_source,
            new_image_source: image_source.into(),
        })
    }

    pub fn tile(&self) -> TileId {
        self.tile
    }

    pub fn old_image_source(&self) -> &Path {
        &self.old_image_source
    }

    pub fn new_image_source(&self) -> &Path {
        &self.new_image_source
    }

    fn apply(&self, document: &mut MapDocument, image_source: &Path) -> Result<(), DocumentError> {
        document.set_tile_image_source(self.tile, image_source)
    }
}

impl UndoCommand for ChangeTileImageSource {
    fn undo(&mut self, document: &mut MapDocument) -> Result<(), DocumentError> {
        self.apply(document, &self.old_image_source)
    }

    fn redo(&mut self, document: &mut MapDocument) -> Result<(), DocumentError> {
        self.apply(document, &self.new_image_source)
    }

    fn text(&self) -> String {
        "Change Tile Image".to_string()
    }
}
