//! A group of commands recorded as one history entry.

use tilekit_core::{DocumentError, MapDocument};

use super::{EditorCommand, UndoCommand};

/// Commands grouped under one label, undone and redone as a unit.
///
/// Produced by [`UndoStack::begin_macro`](crate::UndoStack::begin_macro) and
/// [`UndoStack::end_macro`](crate::UndoStack::end_macro). Children are
/// redone in insertion order and undone in reverse order.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeCommand {
    text: String,
    commands: Vec<EditorCommand>,
}

impl CompositeCommand {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            commands: Vec::new(),
        }
    }

    /// Appends a child that has already been applied.
    pub fn push(&mut self, command: EditorCommand) {
        self.commands.push(command);
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn commands(&self) -> &[EditorCommand] {
        &self.commands
    }

    pub(crate) fn last_mut(&mut self) -> Option<&mut EditorCommand> {
        self.commands.last_mut()
    }

    /// Undoes the first `applied` children in reverse order.
    ///
    /// Rollback errors are logged; the original failure is what the caller
    /// reports.
    fn rollback(&mut self, document: &mut MapDocument, applied: usize) {
        for command in self.commands[..applied].iter_mut().rev() {
            if let Err(e) = command.undo(document) {
                tracing::warn!("Rollback of '{}' failed: {}", command.text(), e);
            }
        }
    }
}

impl UndoCommand for CompositeCommand {
    fn undo(&mut self, document: &mut MapDocument) -> Result<(), DocumentError> {
        for index in (0..self.commands.len()).rev() {
            if let Err(e) = self.commands[index].undo(document) {
                tracing::warn!(
                    "Undo of '{}' stopped at child {}: {}",
                    self.text,
                    index,
                    e
                );
                // re-apply the children undone so far
                for undone in self.commands[index + 1..].iter_mut() {
                    if let Err(e) = undone.redo(document) {
                        tracing::warn!("Restore of '{}' failed: {}", undone.text(), e);
                    }
                }
                return Err(e);
            }
        }
        Ok(())
    }

    fn redo(&mut self, document: &mut MapDocument) -> Result<(), DocumentError> {
        for index in 0..self.commands.len() {
            if let Err(e) = self.commands[index].redo(document) {
                tracing::warn!(
                    "Redo of '{}' stopped at child {}: {}",
                    self.text,
                    index,
                    e
                );
                self.rollback(document, index);
                return Err(e);
            }
        }
        Ok(())
    }

    fn text(&self) -> String {
        self.text.clone()
    }
}
