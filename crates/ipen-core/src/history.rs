//! Undo/redo history layered over the ink document.

use crate::document::InkDocument;
use crate::error::{InkError, InkResult};
use crate::stroke::{Stroke, StrokeId};

/// Redo stack of strokes removed by undo.
///
/// Undo moves the most recent committed stroke onto the stack and redo moves
/// it back, so a stroke is owned either by the document or by the history,
/// never both. The stack is only meaningful right after a run of undos; any
/// divergent change must call [`History::invalidate`].
#[derive(Debug, Clone, Default)]
pub struct History {
    redo_stack: Vec<Stroke>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move the most recent committed stroke onto the redo stack.
    pub fn undo(&mut self, document: &mut InkDocument) -> InkResult<StrokeId> {
        let stroke = document.pop_committed().ok_or(InkError::NothingToUndo)?;
        let id = stroke.id();
        self.redo_stack.push(stroke);
        Ok(id)
    }

    /// Move the most recently undone stroke back to the top of the document.
    pub fn redo(&mut self, document: &mut InkDocument) -> InkResult<StrokeId> {
        let stroke = self.redo_stack.pop().ok_or(InkError::NothingToRedo)?;
        let id = stroke.id();
        document.push_committed(stroke);
        Ok(id)
    }

    /// Discard everything on the redo stack. Returns how many strokes were dropped.
    pub fn invalidate(&mut self) -> usize {
        let dropped = self.redo_stack.len();
        self.redo_stack.clear();
        dropped
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn redo_len(&self) -> usize {
        self.redo_stack.len()
    }
}
