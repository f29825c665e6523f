//! Property rows for one tileset.
//!
//! The browser mirrors tileset attributes into a [`PropertyManager`], turns
//! committed edits into commands, and refreshes rows from document
//! notifications queued by its bus subscription.

use std::collections::BTreeMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tilekit_core::{
    DocumentError, DocumentEvent, EventCategory, EventFilter, MapDocument, Subscription,
    TileEvent, TileId, Tileset, TilesetEvent, TilesetId,
};
use tilekit_settings::PropertyEditorSettings;

use super::editors::{Editor, EditorId};
use super::factory::EditorFactory;
use super::manager::PropertyManager;
use super::value::{AttributeValue, PropertyValue, FILTER_ATTRIBUTE, SUGGESTIONS_ATTRIBUTE};
use super::PropertyId;
use crate::commands::{
    ChangeTileImageSource, ChangeTilesetColumnCount, ChangeTilesetParameters,
    ChangeTilesetTileOffset, EditorCommand, RenameTileset, UndoCommand,
};
use crate::error::{EditorError, EditorResult};

/// A row of the tileset property grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TilesetRow {
    Name,
    TileOffset,
    Parameters,
    Image,
    Columns,
    /// Image of the tile with this local id
    TileImage(u32),
}

impl TilesetRow {
    pub fn label(&self) -> String {
        match self {
            TilesetRow::Name => "Name".to_string(),
            TilesetRow::TileOffset => "Tile Offset".to_string(),
            TilesetRow::Parameters => "Tileset Parameters".to_string(),
            TilesetRow::Image => "Image".to_string(),
            TilesetRow::Columns => "Columns".to_string(),
            TilesetRow::TileImage(id) => format!("Tile {} Image", id),
        }
    }

    fn value_of(&self, tileset: &Tileset) -> Option<PropertyValue> {
        let value = match self {
            TilesetRow::Name => PropertyValue::String(tileset.name.clone()),
            TilesetRow::TileOffset => PropertyValue::Point(tileset.tile_offset),
            TilesetRow::Parameters => PropertyValue::TilesetParameters(tileset.parameters()),
            TilesetRow::Image => PropertyValue::FilePath(tileset.image_source.clone()),
            TilesetRow::Columns => PropertyValue::Int(i64::from(tileset.column_count)),
            TilesetRow::TileImage(id) => {
                PropertyValue::FilePath(tileset.tile(*id)?.image_source.clone())
            }
        };
        Some(value)
    }
}

/// Rows affected by one document notification.
fn rows_for_event(event: &DocumentEvent) -> Vec<TilesetRow> {
    match event {
        DocumentEvent::Tileset(TilesetEvent::NameChanged { .. }) => vec![TilesetRow::Name],
        DocumentEvent::Tileset(TilesetEvent::TileOffsetChanged { .. }) => {
            vec![TilesetRow::TileOffset]
        }
        DocumentEvent::Tileset(TilesetEvent::ParametersChanged { .. }) => {
            vec![TilesetRow::Parameters, TilesetRow::Image]
        }
        DocumentEvent::Tileset(TilesetEvent::ColumnCountChanged { .. }) => {
            vec![TilesetRow::Columns]
        }
        DocumentEvent::Tile(TileEvent::ImageSourceChanged { id }) => {
            vec![TilesetRow::TileImage(id.local)]
        }
        _ => Vec::new(),
    }
}

/// Property grid model for a single tileset.
#[derive(Debug)]
pub struct TilesetPropertyBrowser {
    tileset: TilesetId,
    manager: PropertyManager,
    factory: EditorFactory,
    rows: BTreeMap<TilesetRow, PropertyId>,
    settings: PropertyEditorSettings,
    pending: Arc<Mutex<Vec<DocumentEvent>>>,
    /// Unsubscribes when the browser is dropped
    subscription: Subscription,
}

impl TilesetPropertyBrowser {
    /// Builds the rows for `tileset` and subscribes to its notifications.
    ///
    /// The subscription lasts as long as the browser.
    pub fn new(
        document: &MapDocument,
        tileset: TilesetId,
        settings: &PropertyEditorSettings,
    ) -> EditorResult<Self> {
        let source = document.tileset(tileset)?;

        let pending = Arc::new(Mutex::new(Vec::new()));
        let queue = pending.clone();
        let subscription = document.event_bus().subscribe_scoped(
            EventFilter::Categories(vec![EventCategory::Tileset, EventCategory::Tile]),
            move |event| {
                if event.tileset_id() == Some(tileset) {
                    queue.lock().push(event);
                }
            },
        );

        let mut browser = Self {
            tileset,
            manager: PropertyManager::new(),
            factory: EditorFactory::new(),
            rows: BTreeMap::new(),
            settings: settings.clone(),
            pending,
            subscription,
        };

        for row in [
            TilesetRow::Name,
            TilesetRow::TileOffset,
            TilesetRow::Parameters,
            TilesetRow::Image,
            TilesetRow::Columns,
        ] {
            browser.add_row(source, row)?;
        }
        for id in source.tiles.keys() {
            browser.add_row(source, TilesetRow::TileImage(*id))?;
        }

        tracing::debug!(
            "Opened property browser for tileset {} with {} rows",
            tileset,
            browser.rows.len()
        );
        Ok(browser)
    }

    pub fn tileset(&self) -> TilesetId {
        self.tileset
    }

    pub fn manager(&self) -> &PropertyManager {
        &self.manager
    }

    pub fn factory(&self) -> &EditorFactory {
        &self.factory
    }

    /// Rows in display order.
    pub fn rows(&self) -> Vec<TilesetRow> {
        self.rows.keys().copied().collect()
    }

    pub fn property(&self, row: TilesetRow) -> Option<PropertyId> {
        self.rows.get(&row).copied()
    }

    pub fn row_of(&self, property: PropertyId) -> Option<TilesetRow> {
        self.rows
            .iter()
            .find_map(|(row, id)| (*id == property).then_some(*row))
    }

    /// The value a row currently shows.
    pub fn value(&self, row: TilesetRow) -> Option<&PropertyValue> {
        let property = self.property(row)?;
        self.manager.value(property).ok()
    }

    /// Creates an editor for `row`.
    pub fn create_editor(&mut self, row: TilesetRow) -> EditorResult<EditorId> {
        let property = self.row_property(row)?;
        self.factory.create_editor(&self.manager, property)
    }

    pub fn editor(&self, id: EditorId) -> Option<&Editor> {
        self.factory.editor(id)
    }

    pub fn destroy_editor(&mut self, id: EditorId) -> bool {
        self.factory.editor_destroyed(id)
    }

    /// Builds the command for committing `value` to `row`.
    ///
    /// Returns `None` when the value equals the document's current value.
    pub fn commit(
        &self,
        document: &MapDocument,
        row: TilesetRow,
        value: PropertyValue,
    ) -> EditorResult<Option<EditorCommand>> {
        let property = self.row_property(row)?;
        let expected = self.manager.property_type(property)?;
        let actual = value.property_type();
        if expected != actual {
            return Err(EditorError::TypeMismatch { expected, actual });
        }

        let tileset = document.tileset(self.tileset)?;
        if row.value_of(tileset).as_ref() == Some(&value) {
            tracing::trace!("Commit of unchanged {} ignored", row.label());
            return Ok(None);
        }

        let id = self.tileset;
        let command: EditorCommand = match (row, value) {
            (TilesetRow::Name, PropertyValue::String(name)) => {
                RenameTileset::new(document, id, name)?.into()
            }
            (TilesetRow::TileOffset, PropertyValue::Point(offset)) => {
                ChangeTilesetTileOffset::new(document, id, offset)?.into()
            }
            (TilesetRow::Parameters, PropertyValue::TilesetParameters(parameters)) => {
                ChangeTilesetParameters::new(document, id, parameters)?.into()
            }
            (TilesetRow::Image, PropertyValue::FilePath(path)) => {
                let mut parameters = tileset.parameters();
                parameters.image_source = path;
                ChangeTilesetParameters::new(document, id, parameters)?.into()
            }
            (TilesetRow::Columns, PropertyValue::Int(count)) => {
                let count = u32::try_from(count).map_err(|_| DocumentError::InvalidParameter {
                    name: "column_count".to_string(),
                    reason: format!("{} is out of range", count),
                })?;
                ChangeTilesetColumnCount::new(document, id, count)?.into()
            }
            (TilesetRow::TileImage(local), PropertyValue::FilePath(path)) => {
                ChangeTileImageSource::new(document, TileId::new(id, local), path)?.into()
            }
            (_, value) => {
                return Err(EditorError::TypeMismatch {
                    expected,
                    actual: value.property_type(),
                })
            }
        };

        tracing::debug!("Committing {} as '{}'", row.label(), command.text());
        Ok(Some(command))
    }

    /// Handles input from one of this browser's editors.
    ///
    /// The input is not written to the row; the row follows the document
    /// once the returned command is applied and [`sync`](Self::sync) runs.
    pub fn edit(
        &mut self,
        document: &MapDocument,
        editor: EditorId,
        value: PropertyValue,
    ) -> EditorResult<Option<EditorCommand>> {
        let property = self
            .factory
            .property_of(editor)
            .ok_or(EditorError::UnknownEditor { id: editor })?;
        let row = self
            .row_of(property)
            .ok_or(EditorError::UnknownProperty { id: property })?;

        let result = self.commit(document, row, value);
        if !matches!(result, Ok(Some(_))) {
            // put the editors back to the document's value
            if let Ok(tileset) = document.tileset(self.tileset) {
                if let Some(current) = row.value_of(tileset) {
                    self.factory.property_changed(property, &current);
                }
            }
        }
        result
    }

    /// Number of notifications waiting for [`sync`](Self::sync).
    pub fn pending(&self) -> usize {
        self.pending.lock().len()
    }

    /// Applies queued notifications to the affected rows.
    ///
    /// Tile rows are added and dropped as tiles come and go. Returns the
    /// number of rows that changed. A removed tileset leaves the rows as
    /// they were.
    pub fn sync(&mut self, document: &MapDocument) -> usize {
        let events = std::mem::take(&mut *self.pending.lock());
        if events.is_empty() {
            return 0;
        }

        let Ok(tileset) = document.tileset(self.tileset) else {
            tracing::debug!("Tileset {} is gone, not syncing rows", self.tileset);
            return 0;
        };

        let mut changed = 0;
        for event in &events {
            match event {
                DocumentEvent::Tile(TileEvent::Added { id }) => {
                    let row = TilesetRow::TileImage(id.local);
                    if self.rows.contains_key(&row) {
                        changed += usize::from(self.update_row(tileset, row));
                    } else {
                        match self.add_row(tileset, row) {
                            Ok(()) => changed += usize::from(self.rows.contains_key(&row)),
                            Err(e) => tracing::warn!("Could not add {}: {}", row.label(), e),
                        }
                    }
                }
                DocumentEvent::Tile(TileEvent::Removed { id }) => {
                    changed += usize::from(self.remove_row(TilesetRow::TileImage(id.local)));
                }
                _ => {
                    for row in rows_for_event(event) {
                        changed += usize::from(self.update_row(tileset, row));
                    }
                }
            }
        }
        tracing::trace!(
            "Synced {} notifications, {} rows changed",
            events.len(),
            changed
        );
        changed
    }

    /// Rebuilds every row from the document, adding and dropping tile rows
    /// to match the tileset's tiles.
    pub fn refresh(&mut self, document: &MapDocument) -> EditorResult<()> {
        self.pending.lock().clear();
        let tileset = document.tileset(self.tileset)?;

        let stale: Vec<TilesetRow> = self
            .rows
            .keys()
            .filter(|row| matches!(row, TilesetRow::TileImage(id) if tileset.tile(*id).is_none()))
            .copied()
            .collect();
        for row in stale {
            self.remove_row(row);
        }

        for id in tileset.tiles.keys() {
            let row = TilesetRow::TileImage(*id);
            if !self.rows.contains_key(&row) {
                self.add_row(tileset, row)?;
            }
        }

        let rows: Vec<TilesetRow> = self.rows.keys().copied().collect();
        for row in rows {
            self.update_row(tileset, row);
        }
        Ok(())
    }

    /// Stops listening to document notifications before the browser is
    /// dropped.
    pub fn detach(&self) {
        if self.subscription.cancel() {
            tracing::debug!("Detached property browser for tileset {}", self.tileset);
        }
        self.pending.lock().clear();
    }

    fn add_row(&mut self, tileset: &Tileset, row: TilesetRow) -> EditorResult<()> {
        let Some(value) = row.value_of(tileset) else {
            return Ok(());
        };
        let property = self.manager.add_property(row.label(), value);

        match row {
            TilesetRow::Name => {
                self.manager.set_attribute(
                    property,
                    SUGGESTIONS_ATTRIBUTE,
                    AttributeValue::List(self.settings.name_suggestions.clone()),
                )?;
            }
            TilesetRow::Image | TilesetRow::TileImage(_) => {
                self.manager.set_attribute(
                    property,
                    FILTER_ATTRIBUTE,
                    AttributeValue::Text(self.settings.image_file_filter.clone()),
                )?;
            }
            _ => {}
        }

        self.rows.insert(row, property);
        Ok(())
    }

    fn remove_row(&mut self, row: TilesetRow) -> bool {
        let Some(property) = self.rows.remove(&row) else {
            return false;
        };
        self.factory.property_removed(property);
        self.manager.remove_property(property);
        true
    }

    /// Writes the document's value into `row`; returns whether it changed.
    fn update_row(&mut self, tileset: &Tileset, row: TilesetRow) -> bool {
        let (Some(property), Some(value)) = (self.property(row), row.value_of(tileset)) else {
            return false;
        };
        match self.manager.set_value(property, value) {
            Ok(true) => {
                if let Ok(value) = self.manager.value(property) {
                    let value = value.clone();
                    self.factory.property_changed(property, &value);
                }
                true
            }
            Ok(false) => false,
            Err(e) => {
                tracing::warn!("Could not update {}: {}", row.label(), e);
                false
            }
        }
    }

    fn row_property(&self, row: TilesetRow) -> EditorResult<PropertyId> {
        match self.property(row) {
            Some(property) => Ok(property),
            None => match row {
                TilesetRow::TileImage(local) => Err(DocumentError::TileNotFound {
                    id: TileId::new(self.tileset, local),
                }
                .into()),
                _ => Err(DocumentError::TilesetNotFound { id: self.tileset }.into()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tilekit_core::{Point, Size, Tile};

    fn setup() -> (MapDocument, TilesetId, TilesetPropertyBrowser) {
        let mut doc = MapDocument::new();
        let mut tileset = Tileset::new("grass", Size::new(16, 16))
            .with_image("grass.png")
            .with_columns(4);
        tileset.add_tile(Tile::with_image(0, "tuft.png"));
        let id = doc.add_tileset(tileset);
        let settings = PropertyEditorSettings {
            name_suggestions: vec!["Grass".to_string(), "Water".to_string()],
            ..Default::default()
        };
        let browser = TilesetPropertyBrowser::new(&doc, id, &settings).unwrap();
        (doc, id, browser)
    }

    #[test]
    fn test_rows_mirror_tileset() {
        let (_doc, _id, browser) = setup();
        assert_eq!(
            browser.rows(),
            vec![
                TilesetRow::Name,
                TilesetRow::TileOffset,
                TilesetRow::Parameters,
                TilesetRow::Image,
                TilesetRow::Columns,
                TilesetRow::TileImage(0),
            ]
        );
        assert_eq!(browser.value(TilesetRow::Name), Some(&PropertyValue::from("grass")));
        assert_eq!(browser.value(TilesetRow::Columns), Some(&PropertyValue::Int(4)));
        assert_eq!(TilesetRow::TileImage(0).label(), "Tile 0 Image");
    }

    #[test]
    fn test_commit_unchanged_value_builds_nothing() {
        let (doc, _id, browser) = setup();
        let cmd = browser
            .commit(&doc, TilesetRow::Name, "grass".into())
            .unwrap();
        assert!(cmd.is_none());
    }

    #[test]
    fn test_commit_builds_matching_command() {
        let (mut doc, id, browser) = setup();
        let mut cmd = browser
            .commit(&doc, TilesetRow::TileOffset, Point::new(4, 2).into())
            .unwrap()
            .unwrap();
        assert_eq!(cmd.text(), "Change Drawing Offset");

        cmd.redo(&mut doc).unwrap();
        assert_eq!(doc.tileset(id).unwrap().tile_offset, Point::new(4, 2));
    }

    #[test]
    fn test_image_row_changes_parameters() {
        let (doc, _id, browser) = setup();
        let cmd = browser
            .commit(
                &doc,
                TilesetRow::Image,
                PropertyValue::FilePath(PathBuf::from("meadow.png")),
            )
            .unwrap()
            .unwrap();
        match cmd {
            EditorCommand::ChangeTilesetParameters(params) => {
                assert_eq!(params.new_parameters().image_source, PathBuf::from("meadow.png"));
                assert_eq!(params.new_parameters().tile_size, Size::new(16, 16));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_commit_rejects_wrong_type_and_negative_columns() {
        let (doc, _id, browser) = setup();
        assert!(matches!(
            browser.commit(&doc, TilesetRow::Columns, "four".into()),
            Err(EditorError::TypeMismatch { .. })
        ));
        assert!(matches!(
            browser.commit(&doc, TilesetRow::Columns, PropertyValue::Int(-1)),
            Err(EditorError::Document(DocumentError::InvalidParameter { .. }))
        ));
    }

    #[test]
    fn test_sync_follows_document() {
        let (mut doc, id, mut browser) = setup();
        let editor = browser.create_editor(TilesetRow::Name).unwrap();

        doc.set_tileset_name(id, "meadow").unwrap();
        assert_eq!(browser.pending(), 1);
        assert_eq!(browser.sync(&doc), 1);
        assert_eq!(browser.pending(), 0);

        assert_eq!(browser.value(TilesetRow::Name), Some(&PropertyValue::from("meadow")));
        assert_eq!(
            browser.editor(editor).map(Editor::value),
            Some(PropertyValue::from("meadow"))
        );
    }

    #[test]
    fn test_other_tilesets_are_ignored() {
        let (mut doc, _id, mut browser) = setup();
        let other = doc.add_tileset(Tileset::new("water", Size::new(8, 8)));
        doc.set_tileset_name(other, "sea").unwrap();
        assert_eq!(browser.pending(), 0);
        assert_eq!(browser.sync(&doc), 0);
    }

    #[test]
    fn test_name_editor_offers_suggestions() {
        let (_doc, _id, mut browser) = setup();
        let editor = browser.create_editor(TilesetRow::Name).unwrap();
        let completer = browser
            .editor(editor)
            .and_then(Editor::as_line_edit)
            .and_then(|edit| edit.completer())
            .unwrap();
        assert_eq!(completer.complete("wa"), vec!["Water"]);
    }

    #[test]
    fn test_edit_unchanged_restores_editor() {
        let (doc, _id, mut browser) = setup();
        let editor = browser.create_editor(TilesetRow::Columns).unwrap();
        let cmd = browser
            .edit(&doc, editor, PropertyValue::Int(4))
            .unwrap();
        assert!(cmd.is_none());
        assert_eq!(
            browser.editor(editor).map(Editor::value),
            Some(PropertyValue::Int(4))
        );
    }

    #[test]
    fn test_refresh_tracks_tiles() {
        let (mut doc, id, mut browser) = setup();
        doc.add_tile(id, Tile::with_image(5, "rock.png")).unwrap();
        doc.remove_tile(TileId::new(id, 0)).unwrap();

        browser.refresh(&doc).unwrap();
        let rows = browser.rows();
        assert!(rows.contains(&TilesetRow::TileImage(5)));
        assert!(!rows.contains(&TilesetRow::TileImage(0)));
    }

    #[test]
    fn test_sync_tracks_tiles() {
        let (mut doc, id, mut browser) = setup();
        let editor = browser.create_editor(TilesetRow::TileImage(0)).unwrap();
        doc.add_tile(id, Tile::with_image(5, "rock.png")).unwrap();
        doc.remove_tile(TileId::new(id, 0)).unwrap();

        assert_eq!(browser.sync(&doc), 2);
        assert_eq!(
            browser.value(TilesetRow::TileImage(5)),
            Some(&PropertyValue::FilePath(PathBuf::from("rock.png")))
        );
        assert_eq!(browser.property(TilesetRow::TileImage(0)), None);
        assert!(browser.editor(editor).is_none());
    }

    #[test]
    fn test_detach_stops_notifications() {
        let (mut doc, id, browser) = setup();
        browser.detach();
        doc.set_tileset_name(id, "meadow").unwrap();
        assert_eq!(browser.pending(), 0);
        assert_eq!(doc.event_bus().subscriber_count(), 0);
    }

    #[test]
    fn test_dropped_browsers_unsubscribe() {
        let (mut doc, id, first) = setup();
        let settings = PropertyEditorSettings::default();
        let others: Vec<TilesetPropertyBrowser> = (0..2)
            .map(|_| TilesetPropertyBrowser::new(&doc, id, &settings).unwrap())
            .collect();
        assert_eq!(doc.event_bus().subscriber_count(), 3);

        drop(first);
        drop(others);
        assert_eq!(doc.event_bus().subscriber_count(), 0);
        doc.set_tileset_name(id, "meadow").unwrap();
        assert_eq!(
            doc.event_bus().publish(DocumentEvent::Tileset(TilesetEvent::NameChanged { id })),
            0
        );
    }
}
