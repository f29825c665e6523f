//! Headless property grid.
//!
//! [`PropertyManager`] holds typed values, [`EditorFactory`] creates and
//! syncs editor models for them, and [`TilesetPropertyBrowser`] binds both
//! to one tileset of a document.

mod editors;
mod factory;
mod manager;
mod tileset_browser;
mod value;

pub use editors::{
    editor_kind_for, Completer, Editor, EditorId, EditorKind, FileEdit, LineEdit,
    TilesetParametersEdit, ValueEdit,
};
pub use factory::EditorFactory;
pub use manager::{Property, PropertyId, PropertyManager};
pub use tileset_browser::{TilesetPropertyBrowser, TilesetRow};
pub use value::{
    AttributeValue, PropertyType, PropertyValue, FILTER_ATTRIBUTE, SUGGESTIONS_ATTRIBUTE,
};
