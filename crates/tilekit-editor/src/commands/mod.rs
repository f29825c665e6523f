//! Reversible edits of tileset and tile attributes.
//!
//! Every command stores the identifier of its target plus an old and a new
//! snapshot of exactly one property (or, for [`ChangeTilesetParameters`], one
//! aggregate). Constructors only capture; [`UndoStack::push`] applies the new
//! value the first time.
//!
//! [`UndoStack::push`]: crate::UndoStack::push

mod composite;
mod tile;
mod tileset;

pub use composite::CompositeCommand;
pub use tile::ChangeTileImageSource;
pub use tileset::{
    ChangeTilesetColumnCount, ChangeTilesetParameters, ChangeTilesetTileOffset, RenameTileset,
};

use tilekit_core::{DocumentError, MapDocument};

/// Kind identifier used by the undo stack to find merge candidates.
///
/// Commands without a merge policy report `None` from [`UndoCommand::id`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    ChangeTilesetTileOffset,
}

/// A command that can be undone and redone against a document.
pub trait UndoCommand {
    /// Restores the old snapshot.
    fn undo(&mut self, document: &mut MapDocument) -> Result<(), DocumentError>;

    /// Applies the new snapshot.
    fn redo(&mut self, document: &mut MapDocument) -> Result<(), DocumentError>;

    /// Returns the label shown in undo/redo menus.
    fn text(&self) -> String;

    /// Returns the merge kind, or `None` when the command never merges.
    fn id(&self) -> Option<CommandId> {
        None
    }
}

/// Every reversible edit the editor can record.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorCommand {
    RenameTileset(RenameTileset),
    ChangeTilesetTileOffset(ChangeTilesetTileOffset),
    ChangeTilesetParameters(ChangeTilesetParameters),
    ChangeTilesetColumnCount(ChangeTilesetColumnCount),
    ChangeTileImageSource(ChangeTileImageSource),
    Composite(CompositeCommand),
}

impl EditorCommand {
    fn inner(&self) -> &dyn UndoCommand {
        match self {
            EditorCommand::RenameTileset(cmd) => cmd,
            EditorCommand::ChangeTilesetTileOffset(cmd) => cmd,
            EditorCommand::ChangeTilesetParameters(cmd) => cmd,
            EditorCommand::ChangeTilesetColumnCount(cmd) => cmd,
            EditorCommand::ChangeTileImageSource(cmd) => cmd,
            EditorCommand::Composite(cmd) => cmd,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn UndoCommand {
        match self {
            EditorCommand::RenameTileset(cmd) => cmd,
            EditorCommand::ChangeTilesetTileOffset(cmd) => cmd,
            EditorCommand::ChangeTilesetParameters(cmd) => cmd,
            EditorCommand::ChangeTilesetColumnCount(cmd) => cmd,
            EditorCommand::ChangeTileImageSource(cmd) => cmd,
            EditorCommand::Composite(cmd) => cmd,
        }
    }

    /// Tries to absorb `other`, which was pushed right after `self`.
    ///
    /// Only commands of the same kind on the same target merge; on success
    /// `self` takes over `other`'s new value and `other` can be dropped. On
    /// failure neither command changes.
    pub fn merge_with(&mut self, other: &EditorCommand) -> bool {
        match (self, other) {
            (
                EditorCommand::ChangeTilesetTileOffset(this),
                EditorCommand::ChangeTilesetTileOffset(other),
            ) => this.merge_with(other),
            _ => false,
        }
    }
}

impl UndoCommand for EditorCommand {
    fn undo(&mut self, document: &mut MapDocument) -> Result<(), DocumentError> {
        self.inner_mut().undo(document)
    }

    fn redo(&mut self, document: &mut MapDocument) -> Result<(), DocumentError> {
        self.inner_mut().redo(document)
    }

    fn text(&self) -> String {
        self.inner().text()
    }

    fn id(&self) -> Option<CommandId> {
        self.inner().id()
    }
}

macro_rules! impl_from_command {
    ($($variant:ident),* $(,)?) => {
        $(
            impl From<$variant> for EditorCommand {
                fn from(cmd: $variant) -> Self {
                    EditorCommand::$variant(cmd)
                }
            }
        )*
    };
}

impl_from_command!(
    RenameTileset,
    ChangeTilesetTileOffset,
    ChangeTilesetParameters,
    ChangeTilesetColumnCount,
    ChangeTileImageSource,
);

impl From<CompositeCommand> for EditorCommand {
    fn from(cmd: CompositeCommand) -> Self {
        EditorCommand::Composite(cmd)
    }
}
