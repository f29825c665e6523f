//! Undo history host.
//!
//! Keeps applied commands on an undo stack and undone ones on a redo stack.
//! Pushing applies the command, drops the redo branch and then either merges
//! the command into the top entry or records it as a new entry.

use tilekit_core::{DocumentEvent, HistoryEvent, MapDocument};
use tilekit_settings::HistorySettings;

use crate::commands::{CompositeCommand, EditorCommand, UndoCommand};
use crate::error::{EditorError, EditorResult};

/// Default number of entries kept when no settings are supplied.
const DEFAULT_UNDO_LIMIT: usize = 100;

/// Undo/redo history of one document.
#[derive(Debug)]
pub struct UndoStack {
    undo_stack: Vec<EditorCommand>,
    redo_stack: Vec<EditorCommand>,
    /// 0 means unlimited
    undo_limit: usize,
    merge_enabled: bool,
    /// Undo index of the saved state; `None` once that state is unreachable
    clean_index: Option<usize>,
    open_macro: Option<CompositeCommand>,
}

impl UndoStack {
    /// Create a new stack with the default limit (100)
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_UNDO_LIMIT)
    }

    /// Create with a custom limit; 0 keeps every entry
    pub fn with_limit(undo_limit: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            undo_limit,
            merge_enabled: true,
            clean_index: Some(0),
            open_macro: None,
        }
    }

    pub fn from_settings(settings: &HistorySettings) -> Self {
        let mut stack = Self::with_limit(settings.undo_limit);
        stack.merge_enabled = settings.merge_tile_offset_edits;
        stack
    }

    pub fn undo_limit(&self) -> usize {
        self.undo_limit
    }

    /// Changes the limit, evicting the oldest entries that no longer fit.
    pub fn set_undo_limit(&mut self, undo_limit: usize) {
        self.undo_limit = undo_limit;
        self.enforce_limit();
    }

    pub fn is_merge_enabled(&self) -> bool {
        self.merge_enabled
    }

    pub fn set_merge_enabled(&mut self, enabled: bool) {
        self.merge_enabled = enabled;
    }

    /// Applies `command` and records it.
    ///
    /// If applying fails the history is left exactly as it was. While a
    /// macro is open the command is collected into the macro instead.
    pub fn push(
        &mut self,
        document: &mut MapDocument,
        command: impl Into<EditorCommand>,
    ) -> EditorResult<()> {
        let mut command = command.into();
        command.redo(document)?;
        tracing::debug!("Applied '{}'", command.text());

        if let Some(group) = self.open_macro.as_mut() {
            let merged = self.merge_enabled
                && command.id().is_some()
                && group
                    .last_mut()
                    .is_some_and(|last| last.id() == command.id() && last.merge_with(&command));
            if !merged {
                group.push(command);
            }
            return Ok(());
        }

        let was_clean = self.is_clean();
        self.truncate_redo();

        let merged = self.merge_enabled
            && command.id().is_some()
            && self.clean_index != Some(self.undo_stack.len())
            && self
                .undo_stack
                .last_mut()
                .is_some_and(|top| top.id() == command.id() && top.merge_with(&command));

        if merged {
            tracing::debug!("Merged '{}' into the top entry", command.text());
        } else {
            self.undo_stack.push(command);
            self.enforce_limit();
        }

        self.notify(document, was_clean);
        Ok(())
    }

    /// Reverts the most recent entry.
    ///
    /// On failure the entry stays on the undo stack unchanged.
    pub fn undo(&mut self, document: &mut MapDocument) -> EditorResult<()> {
        if self.open_macro.is_some() {
            tracing::warn!("Undo refused while a macro is open");
            return Err(EditorError::MacroInProgress);
        }
        let was_clean = self.is_clean();
        let Some(mut command) = self.undo_stack.pop() else {
            tracing::warn!("Nothing to undo");
            return Err(EditorError::NothingToUndo);
        };

        if let Err(e) = command.undo(document) {
            tracing::warn!("Undo of '{}' failed: {}", command.text(), e);
            self.undo_stack.push(command);
            return Err(e.into());
        }

        tracing::debug!("Undid '{}'", command.text());
        self.redo_stack.push(command);
        self.notify(document, was_clean);
        Ok(())
    }

    /// Re-applies the most recently undone entry.
    ///
    /// On failure the entry stays on the redo stack unchanged.
    pub fn redo(&mut self, document: &mut MapDocument) -> EditorResult<()> {
        if self.open_macro.is_some() {
            tracing::warn!("Redo refused while a macro is open");
            return Err(EditorError::MacroInProgress);
        }
        let was_clean = self.is_clean();
        let Some(mut command) = self.redo_stack.pop() else {
            tracing::warn!("Nothing to redo");
            return Err(EditorError::NothingToRedo);
        };

        if let Err(e) = command.redo(document) {
            tracing::warn!("Redo of '{}' failed: {}", command.text(), e);
            self.redo_stack.push(command);
            return Err(e.into());
        }

        tracing::debug!("Redid '{}'", command.text());
        self.undo_stack.push(command);
        self.notify(document, was_clean);
        Ok(())
    }

    /// Starts collecting pushed commands into one entry labelled `text`.
    pub fn begin_macro(&mut self, text: impl Into<String>) -> EditorResult<()> {
        if self.open_macro.is_some() {
            return Err(EditorError::MacroInProgress);
        }
        let text = text.into();
        tracing::debug!("Beginning macro '{}'", text);
        self.open_macro = Some(CompositeCommand::new(text));
        Ok(())
    }

    /// Closes the open macro and records it as a single entry.
    ///
    /// The children are already applied. An empty macro leaves no entry.
    pub fn end_macro(&mut self, document: &MapDocument) -> EditorResult<()> {
        let group = self
            .open_macro
            .take()
            .ok_or(EditorError::NoMacroInProgress)?;

        if group.is_empty() {
            tracing::debug!("Discarding empty macro '{}'", group.text());
            return Ok(());
        }

        tracing::debug!("Ending macro '{}' with {} commands", group.text(), group.len());
        let was_clean = self.is_clean();
        self.truncate_redo();
        self.undo_stack.push(group.into());
        self.enforce_limit();
        self.notify(document, was_clean);
        Ok(())
    }

    pub fn is_macro_open(&self) -> bool {
        self.open_macro.is_some()
    }

    pub fn can_undo(&self) -> bool {
        self.open_macro.is_none() && !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        self.open_macro.is_none() && !self.redo_stack.is_empty()
    }

    /// Label of the entry `undo` would revert.
    pub fn undo_text(&self) -> Option<String> {
        self.undo_stack.last().map(UndoCommand::text)
    }

    /// Label of the entry `redo` would re-apply.
    pub fn redo_text(&self) -> Option<String> {
        self.redo_stack.last().map(UndoCommand::text)
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    /// Total number of recorded entries.
    pub fn count(&self) -> usize {
        self.undo_stack.len() + self.redo_stack.len()
    }

    /// Current position in the history; equals `undo_count`.
    pub fn index(&self) -> usize {
        self.undo_stack.len()
    }

    /// Drops all entries without touching the document; the result is clean.
    pub fn clear(&mut self, document: &MapDocument) {
        let was_clean = self.is_clean();
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.open_macro = None;
        self.clean_index = Some(0);
        tracing::debug!("Cleared undo history");
        self.notify(document, was_clean);
    }

    /// Marks the current position as the saved state.
    pub fn set_clean(&mut self, document: &MapDocument) -> EditorResult<()> {
        if self.open_macro.is_some() {
            return Err(EditorError::MacroInProgress);
        }
        let was_clean = self.is_clean();
        self.clean_index = Some(self.index());
        if !was_clean {
            Self::publish(document, HistoryEvent::CleanChanged { clean: true });
        }
        Ok(())
    }

    pub fn is_clean(&self) -> bool {
        self.open_macro.is_none() && self.clean_index == Some(self.index())
    }

    pub fn clean_index(&self) -> Option<usize> {
        self.clean_index
    }

    fn truncate_redo(&mut self) {
        if self.redo_stack.is_empty() {
            return;
        }
        tracing::trace!("Dropping {} redo entries", self.redo_stack.len());
        self.redo_stack.clear();
        if self.clean_index.is_some_and(|clean| clean > self.undo_stack.len()) {
            self.clean_index = None;
        }
    }

    fn enforce_limit(&mut self) {
        if self.undo_limit == 0 {
            return;
        }
        while self.undo_stack.len() > self.undo_limit {
            let evicted = self.undo_stack.remove(0);
            tracing::trace!("Evicting '{}' from undo history", evicted.text());
            self.clean_index = match self.clean_index {
                Some(0) | None => None,
                Some(clean) => Some(clean - 1),
            };
        }
    }

    fn notify(&self, document: &MapDocument, was_clean: bool) {
        Self::publish(
            document,
            HistoryEvent::IndexChanged {
                index: self.index(),
                can_undo: self.can_undo(),
                can_redo: self.can_redo(),
            },
        );
        let clean = self.is_clean();
        if clean != was_clean {
            Self::publish(document, HistoryEvent::CleanChanged { clean });
        }
    }

    fn publish(document: &MapDocument, event: HistoryEvent) {
        document.event_bus().publish(DocumentEvent::History(event));
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}
