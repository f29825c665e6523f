//! Headless editor models created by the [`EditorFactory`](super::EditorFactory).
//!
//! Each model holds the state a widget would show. Views render them; user
//! input is fed back through the factory.

use std::path::{Path, PathBuf};

use tilekit_core::TilesetParameters;

use super::value::{PropertyType, PropertyValue};

/// Identifier of an editor created by one factory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EditorId(u64);

impl EditorId {
    pub(crate) fn new(raw: u64) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for EditorId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "editor {}", self.0)
    }
}

/// Path field with a browse button and a file dialog filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileEdit {
    file_path: PathBuf,
    filter: String,
}

impl FileEdit {
    pub fn new(file_path: impl Into<PathBuf>, filter: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            filter: filter.into(),
        }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    pub fn set_file_path(&mut self, file_path: impl Into<PathBuf>) {
        self.file_path = file_path.into();
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: impl Into<String>) {
        self.filter = filter.into();
    }
}

/// Summary field with a button that opens the tileset image dialog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TilesetParametersEdit {
    parameters: TilesetParameters,
}

impl TilesetParametersEdit {
    pub fn new(parameters: TilesetParameters) -> Self {
        Self { parameters }
    }

    pub fn parameters(&self) -> &TilesetParameters {
        &self.parameters
    }

    pub fn set_parameters(&mut self, parameters: TilesetParameters) {
        self.parameters = parameters;
    }

    /// Text shown next to the button.
    pub fn summary(&self) -> String {
        let file_name = self
            .parameters
            .image_source
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("{} [{}]", file_name, self.parameters.tile_size)
    }
}

/// Case-insensitive prefix completion over a fixed list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Completer {
    suggestions: Vec<String>,
}

impl Completer {
    pub fn new(suggestions: Vec<String>) -> Self {
        Self { suggestions }
    }

    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Suggestions starting with `prefix`, ignoring case, in list order.
    pub fn complete(&self, prefix: &str) -> Vec<&str> {
        let prefix = prefix.to_lowercase();
        self.suggestions
            .iter()
            .filter(|s| s.to_lowercase().starts_with(&prefix))
            .map(String::as_str)
            .collect()
    }
}

/// Single-line text field, optionally with completion.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LineEdit {
    text: String,
    completer: Option<Completer>,
}

impl LineEdit {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completer: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn completer(&self) -> Option<&Completer> {
        self.completer.as_ref()
    }

    pub fn set_completer(&mut self, completer: Completer) {
        self.completer = Some(completer);
    }
}

/// Generic editor for the remaining value types.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueEdit {
    value: PropertyValue,
}

impl ValueEdit {
    pub fn new(value: PropertyValue) -> Self {
        Self { value }
    }

    pub fn value(&self) -> &PropertyValue {
        &self.value
    }

    pub fn set_value(&mut self, value: PropertyValue) {
        self.value = value;
    }
}

/// Kind of editor model, matching the [`Editor`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorKind {
    File,
    TilesetParameters,
    Line,
    Value,
}

/// An editor model of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Editor {
    File(FileEdit),
    TilesetParameters(TilesetParametersEdit),
    Line(LineEdit),
    Value(ValueEdit),
}

impl Editor {
    pub fn kind(&self) -> EditorKind {
        match self {
            Editor::File(_) => EditorKind::File,
            Editor::TilesetParameters(_) => EditorKind::TilesetParameters,
            Editor::Line(_) => EditorKind::Line,
            Editor::Value(_) => EditorKind::Value,
        }
    }

    /// The value the editor currently shows.
    pub fn value(&self) -> PropertyValue {
        match self {
            Editor::File(edit) => PropertyValue::FilePath(edit.file_path.clone()),
            Editor::TilesetParameters(edit) => {
                PropertyValue::TilesetParameters(edit.parameters.clone())
            }
            Editor::Line(edit) => PropertyValue::String(edit.text.clone()),
            Editor::Value(edit) => edit.value.clone(),
        }
    }

    /// Shows `value`. Values of a type the editor cannot display are ignored.
    pub fn set_value(&mut self, value: &PropertyValue) {
        match (self, value) {
            (Editor::File(edit), PropertyValue::FilePath(path)) => edit.set_file_path(path.clone()),
            (Editor::TilesetParameters(edit), PropertyValue::TilesetParameters(params)) => {
                edit.set_parameters(params.clone())
            }
            (Editor::Line(edit), PropertyValue::String(text)) => edit.set_text(text.clone()),
            (Editor::Value(edit), value)
                if edit.value.property_type() == value.property_type() =>
            {
                edit.set_value(value.clone())
            }
            (editor, value) => {
                tracing::trace!(
                    "{:?} editor ignores value of type {}",
                    editor.kind(),
                    value.property_type()
                );
            }
        }
    }

    pub fn as_file_edit(&self) -> Option<&FileEdit> {
        match self {
            Editor::File(edit) => Some(edit),
            _ => None,
        }
    }

    pub fn as_tileset_parameters_edit(&self) -> Option<&TilesetParametersEdit> {
        match self {
            Editor::TilesetParameters(edit) => Some(edit),
            _ => None,
        }
    }

    pub fn as_line_edit(&self) -> Option<&LineEdit> {
        match self {
            Editor::Line(edit) => Some(edit),
            _ => None,
        }
    }

    pub fn as_value_edit(&self) -> Option<&ValueEdit> {
        match self {
            Editor::Value(edit) => Some(edit),
            _ => None,
        }
    }
}

/// Editor kind chosen for a property type.
pub fn editor_kind_for(property_type: PropertyType) -> EditorKind {
    match property_type {
        PropertyType::FilePath => EditorKind::File,
        PropertyType::TilesetParameters => EditorKind::TilesetParameters,
        PropertyType::String => EditorKind::Line,
        _ => EditorKind::Value,
    }
}
