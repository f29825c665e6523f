//! Error types for the editor crate.
//!
//! This module provides structured error types for undo history navigation,
//! command application and the property model.

use thiserror::Error;
use tilekit_core::DocumentError;

use crate::properties::{EditorId, PropertyId, PropertyType};

/// Errors that can occur during editor operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// A command could not be applied to the document.
    #[error(transparent)]
    Document(#[from] DocumentError),

    /// The undo stack is empty.
    #[error("Nothing to undo")]
    NothingToUndo,

    /// The redo stack is empty.
    #[error("Nothing to redo")]
    NothingToRedo,

    /// A macro is open; navigation and nested macros are refused until it ends.
    #[error("A macro is already in progress")]
    MacroInProgress,

    /// `end_macro` was called without a matching `begin_macro`.
    #[error("No macro in progress")]
    NoMacroInProgress,

    /// The property is not owned by this manager.
    #[error("Unknown property {id}")]
    UnknownProperty { id: PropertyId },

    /// The editor was never created by this factory, or was destroyed.
    #[error("Unknown editor {id}")]
    UnknownEditor { id: EditorId },

    /// A value of the wrong type was assigned to a property.
    #[error("Type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: PropertyType,
        actual: PropertyType,
    },

    /// The session has no property browser open.
    #[error("No tileset is open in the property browser")]
    NoActiveBrowser,
}

impl EditorError {
    /// True when the error means the command's target no longer exists.
    pub fn is_target_not_found(&self) -> bool {
        matches!(self, EditorError::Document(e) if e.is_not_found())
    }
}

/// Result type alias for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
