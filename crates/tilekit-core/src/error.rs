//! Error handling for tilekit
//!
//! Provides the error types shared by every layer that touches the document:
//! - Document errors (arena lookups, parameter validation)
//! - The umbrella `Error` used at crate boundaries
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::tileset::{TileId, TilesetId};

/// Document error type
///
/// Raised when a command or accessor addresses an entity that is no longer
/// owned by the document, or when a value cannot be stored in it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DocumentError {
    /// The tileset was removed from the document
    #[error("Tileset {id} not found")]
    TilesetNotFound {
        /// The identifier that failed to resolve.
        id: TilesetId,
    },

    /// The tile was removed from its tileset, or the tileset itself is gone
    #[error("Tile {id} not found")]
    TileNotFound {
        /// The identifier that failed to resolve.
        id: TileId,
    },

    /// A value is outside the range the document accepts
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// The name of the offending parameter.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },
}

impl DocumentError {
    /// Whether this error means the addressed entity no longer exists.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            DocumentError::TilesetNotFound { .. } | DocumentError::TileNotFound { .. }
        )
    }
}

/// Main error type for tilekit
///
/// A unified error type that can represent any error from the core layer.
#[derive(Error, Debug)]
pub enum Error {
    /// Document error
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a document error
    pub fn is_document_error(&self) -> bool {
        matches!(self, Error::Document(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
