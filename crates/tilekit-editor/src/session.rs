//! Editing session: one document, its undo history and the tileset panel.

use tilekit_core::{MapDocument, TilesetId};
use tilekit_settings::{Config, PropertyEditorSettings};

use crate::commands::EditorCommand;
use crate::error::{EditorError, EditorResult};
use crate::properties::{EditorId, PropertyValue, TilesetPropertyBrowser, TilesetRow};
use crate::undo_stack::UndoStack;

/// Owns a document and routes every edit through its undo stack.
#[derive(Debug)]
pub struct EditorSession {
    document: MapDocument,
    undo_stack: UndoStack,
    browser: Option<TilesetPropertyBrowser>,
    property_settings: PropertyEditorSettings,
}

impl EditorSession {
    /// Starts a session on an empty document.
    pub fn new(config: &Config) -> Self {
        Self::with_document(MapDocument::new(), config)
    }

    pub fn with_document(document: MapDocument, config: &Config) -> Self {
        tracing::info!(
            "Starting editor session (undo limit {}, merging {})",
            config.history.undo_limit,
            config.history.merge_tile_offset_edits
        );
        Self {
            document,
            undo_stack: UndoStack::from_settings(&config.history),
            browser: None,
            property_settings: config.properties.clone(),
        }
    }

    pub fn document(&self) -> &MapDocument {
        &self.document
    }

    /// Direct access for changes that bypass the history, such as loading.
    pub fn document_mut(&mut self) -> &mut MapDocument {
        &mut self.document
    }

    pub fn undo_stack(&self) -> &UndoStack {
        &self.undo_stack
    }

    pub fn undo_stack_mut(&mut self) -> &mut UndoStack {
        &mut self.undo_stack
    }

    /// Shows `tileset` in the property browser, replacing any open one.
    pub fn open_tileset(
        &mut self,
        tileset: TilesetId,
    ) -> EditorResult<&mut TilesetPropertyBrowser> {
        let browser =
            TilesetPropertyBrowser::new(&self.document, tileset, &self.property_settings)?;
        Ok(self.browser.insert(browser))
    }

    pub fn close_tileset(&mut self) {
        if let Some(browser) = self.browser.take() {
            tracing::debug!("Closing property browser for tileset {}", browser.tileset());
        }
    }

    pub fn browser(&self) -> Option<&TilesetPropertyBrowser> {
        self.browser.as_ref()
    }

    pub fn browser_mut(&mut self) -> Option<&mut TilesetPropertyBrowser> {
        self.browser.as_mut()
    }

    /// Applies and records `command`, then refreshes the browser.
    pub fn execute(&mut self, command: impl Into<EditorCommand>) -> EditorResult<()> {
        let result = self.undo_stack.push(&mut self.document, command);
        self.sync_browser();
        result
    }

    /// Commits `value` to a row of the open tileset.
    ///
    /// Returns whether a command was recorded.
    pub fn commit(&mut self, row: TilesetRow, value: PropertyValue) -> EditorResult<bool> {
        let browser = self.browser.as_ref().ok_or(EditorError::NoActiveBrowser)?;
        match browser.commit(&self.document, row, value)? {
            Some(command) => self.execute(command).map(|()| true),
            None => Ok(false),
        }
    }

    /// Feeds input from a browser editor through the history.
    ///
    /// Returns whether a command was recorded.
    pub fn edit(&mut self, editor: EditorId, value: PropertyValue) -> EditorResult<bool> {
        let browser = self.browser.as_mut().ok_or(EditorError::NoActiveBrowser)?;
        match browser.edit(&self.document, editor, value)? {
            Some(command) => self.execute(command).map(|()| true),
            None => Ok(false),
        }
    }

    pub fn undo(&mut self) -> EditorResult<()> {
        let result = self.undo_stack.undo(&mut self.document);
        self.sync_browser();
        result
    }

    pub fn redo(&mut self) -> EditorResult<()> {
        let result = self.undo_stack.redo(&mut self.document);
        self.sync_browser();
        result
    }

    /// Groups the following edits into one history entry.
    pub fn begin_macro(&mut self, text: impl Into<String>) -> EditorResult<()> {
        self.undo_stack.begin_macro(text)
    }

    pub fn end_macro(&mut self) -> EditorResult<()> {
        self.undo_stack.end_macro(&self.document)
    }

    /// Marks the document as saved.
    pub fn mark_saved(&mut self) -> EditorResult<()> {
        self.undo_stack.set_clean(&self.document)
    }

    pub fn is_modified(&self) -> bool {
        !self.undo_stack.is_clean()
    }

    fn sync_browser(&mut self) {
        if let Some(browser) = self.browser.as_mut() {
            browser.sync(&self.document);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::RenameTileset;
    use tilekit_core::{Point, Size, Tileset};

    fn session() -> (EditorSession, TilesetId) {
        let mut session = EditorSession::new(&Config::default());
        let id = session
            .document_mut()
            .add_tileset(Tileset::new("grass", Size::new(16, 16)));
        (session, id)
    }

    #[test]
    fn test_execute_and_undo_keep_browser_in_sync() {
        let (mut session, id) = session();
        session.open_tileset(id).unwrap();

        let rename = RenameTileset::new(session.document(), id, "grass_v2").unwrap();
        session.execute(rename).unwrap();
        let shown = session.browser().and_then(|b| b.value(TilesetRow::Name)).cloned();
        assert_eq!(shown, Some(PropertyValue::from("grass_v2")));

        session.undo().unwrap();
        let shown = session.browser().and_then(|b| b.value(TilesetRow::Name)).cloned();
        assert_eq!(shown, Some(PropertyValue::from("grass")));
    }

    #[test]
    fn test_commit_without_browser() {
        let (mut session, _) = session();
        assert_eq!(
            session.commit(TilesetRow::Name, "x".into()),
            Err(EditorError::NoActiveBrowser)
        );
    }

    #[test]
    fn test_commit_records_only_changes() {
        let (mut session, id) = session();
        session.open_tileset(id).unwrap();

        assert_eq!(session.commit(TilesetRow::TileOffset, Point::ZERO.into()), Ok(false));
        assert_eq!(session.commit(TilesetRow::TileOffset, Point::new(4, 2).into()), Ok(true));
        assert_eq!(session.undo_stack().undo_count(), 1);
        assert!(session.is_modified());

        session.mark_saved().unwrap();
        assert!(!session.is_modified());
    }

    #[test]
    fn test_reopening_detaches_previous_browser() {
        let (mut session, id) = session();
        session.open_tileset(id).unwrap();
        session.open_tileset(id).unwrap();
        // one subscription for the open browser only
        assert_eq!(session.document().event_bus().subscriber_count(), 1);

        session.close_tileset();
        assert_eq!(session.document().event_bus().subscriber_count(), 0);
        assert!(session.browser().is_none());
    }
}
