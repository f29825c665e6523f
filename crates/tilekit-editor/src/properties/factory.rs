//! Editor factory for the property grid.
//!
//! Picks an editor model by property type, remembers which editors belong to
//! which property, and keeps them in sync:
//!
//! - manager value changes are pushed to every editor of the property
//! - `filter` attribute changes are pushed to the property's file editors
//! - editor input is written back through [`PropertyManager::set_value`]

use std::collections::HashMap;
use std::path::PathBuf;

use super::editors::{
    editor_kind_for, Completer, Editor, EditorId, EditorKind, FileEdit, LineEdit,
    TilesetParametersEdit, ValueEdit,
};
use super::manager::PropertyManager;
use super::value::{AttributeValue, PropertyValue, FILTER_ATTRIBUTE, SUGGESTIONS_ATTRIBUTE};
use super::PropertyId;
use crate::error::{EditorError, EditorResult};

/// Creates editor models and tracks them per property.
#[derive(Debug, Default)]
pub struct EditorFactory {
    editors: HashMap<EditorId, TrackedEditor>,
    created: HashMap<PropertyId, Vec<EditorId>>,
    next_id: u64,
}

#[derive(Debug)]
struct TrackedEditor {
    property: PropertyId,
    editor: Editor,
}

impl EditorFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the editor for `property`, initialised from the manager.
    pub fn create_editor(
        &mut self,
        manager: &PropertyManager,
        property: PropertyId,
    ) -> EditorResult<EditorId> {
        let prop = manager.property(property)?;
        let value = prop.value();

        let editor = match (editor_kind_for(prop.property_type()), value) {
            (EditorKind::File, PropertyValue::FilePath(path)) => {
                let filter = prop
                    .attribute(FILTER_ATTRIBUTE)
                    .and_then(AttributeValue::as_text)
                    .unwrap_or_default();
                Editor::File(FileEdit::new(path.clone(), filter))
            }
            (EditorKind::TilesetParameters, PropertyValue::TilesetParameters(params)) => {
                Editor::TilesetParameters(TilesetParametersEdit::new(params.clone()))
            }
            (EditorKind::Line, PropertyValue::String(text)) => {
                let mut edit = LineEdit::new(text.clone());
                let suggestions = prop
                    .attribute(SUGGESTIONS_ATTRIBUTE)
                    .and_then(AttributeValue::as_list)
                    .unwrap_or_default();
                if !suggestions.is_empty() {
                    edit.set_completer(Completer::new(suggestions.to_vec()));
                }
                Editor::Line(edit)
            }
            (_, value) => Editor::Value(ValueEdit::new(value.clone())),
        };

        let id = EditorId::new(self.next_id);
        self.next_id += 1;
        tracing::debug!("Created {:?} {} for {}", editor.kind(), id, property);

        self.created.entry(property).or_default().push(id);
        self.editors.insert(id, TrackedEditor { property, editor });
        Ok(id)
    }

    pub fn editor(&self, id: EditorId) -> Option<&Editor> {
        self.editors.get(&id).map(|tracked| &tracked.editor)
    }

    /// The property an editor was created for.
    pub fn property_of(&self, id: EditorId) -> Option<PropertyId> {
        self.editors.get(&id).map(|tracked| tracked.property)
    }

    /// Editors currently tracked for `property`, in creation order.
    pub fn editors_for(&self, property: PropertyId) -> &[EditorId] {
        self.created
            .get(&property)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_tracking(&self, property: PropertyId) -> bool {
        self.created.contains_key(&property)
    }

    pub fn editor_count(&self) -> usize {
        self.editors.len()
    }

    /// Shows `value` in every editor of `property`.
    pub fn property_changed(&mut self, property: PropertyId, value: &PropertyValue) {
        let Some(ids) = self.created.get(&property) else {
            return;
        };
        for id in ids {
            if let Some(tracked) = self.editors.get_mut(id) {
                tracked.editor.set_value(value);
            }
        }
    }

    /// Forwards attribute changes to the editors that display them.
    ///
    /// Only the `filter` attribute of file editors is live; completion lists
    /// are fixed when an editor is created.
    pub fn attribute_changed(
        &mut self,
        property: PropertyId,
        attribute: &str,
        value: &AttributeValue,
    ) {
        if attribute != FILTER_ATTRIBUTE {
            return;
        }
        let Some(filter) = value.as_text() else {
            return;
        };
        let Some(ids) = self.created.get(&property) else {
            return;
        };
        for id in ids {
            if let Some(TrackedEditor {
                editor: Editor::File(edit),
                ..
            }) = self.editors.get_mut(id)
            {
                edit.set_filter(filter);
            }
        }
    }

    /// Routes a path picked in a file editor to its property.
    ///
    /// Unknown editors are ignored and report no change.
    pub fn file_path_changed(
        &mut self,
        manager: &mut PropertyManager,
        editor: EditorId,
        path: impl Into<PathBuf>,
    ) -> EditorResult<bool> {
        let is_file_edit = self
            .editor(editor)
            .is_some_and(|e| e.kind() == EditorKind::File);
        if !is_file_edit {
            tracing::trace!("Ignoring path change from untracked {}", editor);
            return Ok(false);
        }
        self.editor_value_changed(manager, editor, PropertyValue::FilePath(path.into()))
    }

    /// Writes editor input to the owning property, then syncs its editors.
    ///
    /// Returns whether the property value changed.
    pub fn editor_value_changed(
        &mut self,
        manager: &mut PropertyManager,
        editor: EditorId,
        value: PropertyValue,
    ) -> EditorResult<bool> {
        let property = self
            .property_of(editor)
            .ok_or(EditorError::UnknownEditor { id: editor })?;

        let changed = manager.set_value(property, value)?;
        if changed {
            let value = manager.value(property)?.clone();
            self.property_changed(property, &value);
        }
        Ok(changed)
    }

    /// Forgets a destroyed editor; a property left without editors is
    /// dropped from tracking.
    pub fn editor_destroyed(&mut self, editor: EditorId) -> bool {
        let Some(tracked) = self.editors.remove(&editor) else {
            return false;
        };
        if let Some(ids) = self.created.get_mut(&tracked.property) {
            ids.retain(|id| *id != editor);
            if ids.is_empty() {
                self.created.remove(&tracked.property);
            }
        }
        tracing::debug!("Destroyed {} of {}", editor, tracked.property);
        true
    }

    /// Destroys every editor of `property`.
    pub fn property_removed(&mut self, property: PropertyId) {
        if let Some(ids) = self.created.remove(&property) {
            for id in ids {
                self.editors.remove(&id);
            }
        }
    }
}
