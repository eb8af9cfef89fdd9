//! Linear undo/redo history over [`EditorCommand`]s.
//!
//! A command lives on exactly one of the two stacks (or on neither,
//! before it is executed). Executing a fresh command clears the redo
//! stack, so history is always a single line.

use tracing::debug;

use crate::collection::AnnotationCollection;
use crate::commands::EditorCommand;

#[derive(Debug, Default)]
pub struct CommandManager {
    undo_stack: Vec<EditorCommand>,
    redo_stack: Vec<EditorCommand>,
}

impl CommandManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies the command and records it for undo. Any pending redo
    /// chain is discarded.
    pub fn execute(&mut self, mut command: EditorCommand, collection: &mut AnnotationCollection) {
        debug!(command = command.name(), "execute");
        command.apply(collection);
        self.undo_stack.push(command);
        self.redo_stack.clear();
    }

    /// Reverts the most recent command. No-op on an empty history.
    pub fn undo(&mut self, collection: &mut AnnotationCollection) -> bool {
        let Some(mut command) = self.undo_stack.pop() else {
            return false;
        };
        debug!(command = command.name(), "undo");
        command.undo(collection);
        self.redo_stack.push(command);
        true
    }

    /// Re-applies the most recently undone command. No-op when nothing
    /// was undone.
    pub fn redo(&mut self, collection: &mut AnnotationCollection) -> bool {
        let Some(mut command) = self.redo_stack.pop() else {
            return false;
        };
        debug!(command = command.name(), "redo");
        command.apply(collection);
        self.undo_stack.push(command);
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Name of the command undo would revert, for menu labels.
    pub fn undo_description(&self) -> Option<&'static str> {
        self.undo_stack.last().map(|c| c.name())
    }

    pub fn redo_description(&self) -> Option<&'static str> {
        self.redo_stack.last().map(|c| c.name())
    }

    /// Drops the whole history without touching the collection.
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
    }
}
