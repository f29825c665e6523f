//! Commands that change attributes of a whole tileset.

use tilekit_core::{DocumentError, MapDocument, Point, TilesetId, TilesetParameters};

use super::{CommandId, UndoCommand};

/// Renames a tileset. Consecutive renames stay separate history entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameTileset {
    tileset: TilesetId,
    old_name: String,
    new_name: String,
}

impl RenameTileset {
    pub fn new(
        document: &MapDocument,
        tileset: TilesetId,
        new_name: impl Into<String>,
    ) -> Result<Self, DocumentError> {
        let old_name = document.tileset(tileset)?.name.clone();
        Ok(Self {
            tileset,
            old_name,
            new_name: new_name.into(),
        })
    }

    pub fn tileset(&self) -> TilesetId {
        self.tileset
    }

    pub fn old_name(&self) -> &str {
        &self.old_name
    }

    pub fn new_name(&self) -> &str {
        &self.new_name
    }
}

impl UndoCommand for RenameTileset {
    fn undo(&mut self, document: &mut MapDocument) -> Result<(), DocumentError> {
        document.set_tileset_name(self.tileset, self.old_name.clone())
    }

    fn redo(&mut self, document: &mut MapDocument) -> Result<(), DocumentError> {
        document.set_tileset_name(self.tileset, self.new_name.clone())
    }

    fn text(&self) -> String {
        "Change Tileset Name".to_string()
    }
}

/// Changes the drawing offset of a tileset's tiles.
///
/// Dragging the offset produces many small edits; consecutive ones on the
/// same tileset merge into a single history entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeTilesetTileOffset {
    tileset: TilesetId,
    old_offset: Point,
    new_offset: Point,
}

impl ChangeTilesetTileOffset {
    pub fn new(
        document: &MapDocument,
        tileset: TilesetId,
        new_offset: Point,
    ) -> Result<Self, DocumentError> {
        let old_offset = document.tileset(tileset)?.tile_offset;
        Ok(Self {
            tileset,
            old_offset,
            new_offset,
        })
    }

    pub fn tileset(&self) -> TilesetId {
        self.tileset
    }

    pub fn old_offset(&self) -> Point {
        self.old_offset
    }

    pub fn new_offset(&self) -> Point {
        self.new_offset
    }

    /// Adopts `other`'s new offset when it targets the same tileset.
    pub fn merge_with(&mut self, other: &ChangeTilesetTileOffset) -> bool {
        if other.tileset != self.tileset {
            return false;
        }
        tracing::trace!(
            "Merging tile offset {} into {} on tileset {}",
            other.new_offset,
            self.new_offset,
            self.tileset
        );
        self.new_offset = other.new_offset;
        true
    }
}

impl UndoCommand for ChangeTilesetTileOffset {
    fn undo(&mut self, document: &mut MapDocument) -> Result<(), DocumentError> {
        document.set_tileset_tile_offset(self.tileset, self.old_offset)
    }

    fn redo(&mut self, document: &mut MapDocument) -> Result<(), DocumentError> {
        document.set_tileset_tile_offset(self.tileset, self.new_offset)
    }

    fn text(&self) -> String {
        "Change Drawing Offset".to_string()
    }

    fn id(&self) -> Option<CommandId> {
        Some(CommandId::ChangeTilesetTileOffset)
    }
}

/// Changes the image parameters of a tileset as one atomic step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeTilesetParameters {
    tileset: TilesetId,
    old_parameters: TilesetParameters,
    new_parameters: TilesetParameters,
}

impl ChangeTilesetParameters {
    /// Fails with `InvalidParameter` for a zero tile width or height.
    pub fn new(
        document: &MapDocument,
        tileset: TilesetId,
        parameters: TilesetParameters,
    ) -> Result<Self, DocumentError> {
        if parameters.tile_size.is_empty() {
            return Err(DocumentError::InvalidParameter {
                name: "tile_size".to_string(),
                reason: format!("{} has a zero dimension", parameters.tile_size),
            });
        }

        let old_parameters = document.tileset(tileset)?.parameters();
        Ok(Self {
            tileset,
            old_parameters,
            new_parameters: parameters,
        })
    }

    pub fn tileset(&self) -> TilesetId {
        self.tileset
    }

    pub fn old_parameters(&self) -> &TilesetParameters {
        &self.old_parameters
    }

    pub fn new_parameters(&self) -> &TilesetParameters {
        &self.new_parameters
    }

    /// True when applying the command would leave the tileset as it is.
    pub fn is_noop(&self) -> bool {
        self.old_parameters == self.new_parameters
    }
}

impl UndoCommand for ChangeTilesetParameters {
    fn undo(&mut self, document: &mut MapDocument) -> Result<(), DocumentError> {
        document.set_tileset_parameters(self.tileset, &self.old_parameters)
    }

    fn redo(&mut self, document: &mut MapDocument) -> Result<(), DocumentError> {
        document.set_tileset_parameters(self.tileset, &self.new_parameters)
    }

    fn text(&self) -> String {
        "Edit Tileset".to_string()
    }
}

/// Changes the number of columns a tileset is laid out in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeTilesetColumnCount {
    tileset: TilesetId,
    old_column_count: u32,
    new_column_count: u32,
}

impl ChangeTilesetColumnCount {
    pub fn new(
        document: &MapDocument,
        tileset: TilesetId,
        column_count: u32,
    ) -> Result<Self, DocumentError> {
        let old_column_count = document.tileset(tileset)?.column_count;
        Ok(Self {
            tileset,
            old_column_count,
            new_column_count: column_count,
        })
    }

    pub fn tileset(&self) -> TilesetId {
        self.tileset
    }

    pub fn old_column_count(&self) -> u32 {
        self.old_column_count
    }

    pub fn new_column_count(&self) -> u32 {
        self.new_column_count
    }
}

impl UndoCommand for ChangeTilesetColumnCount {
    fn undo(&mut self, document: &mut MapDocument) -> Result<(), DocumentError> {
        document.set_tileset_column_count(self.tileset, self.old_column_count)
    }

    fn redo(&mut self, document: &mut MapDocument) -> Result<(), DocumentError> {
        document.set_tileset_column_count(self.tileset, self.new_column_count)
    }

    fn text(&self) -> String {
        "Change Columns".to_string()
    }
}
