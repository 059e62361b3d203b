//! Ink session: the document plus its history.

use crate::color::{InkColor, Palette};
use crate::document::InkDocument;
use crate::error::InkResult;
use crate::history::History;
use crate::stroke::{PaintStyle, StrokeId};
use kurbo::{Point, Size};

/// Session object owned by the application.
///
/// Every mutation of the ink goes through here so the redo stack stays
/// coherent with the document: beginning or committing a stroke, erasing a
/// stroke and resetting all discard pending redo history.
#[derive(Debug, Clone)]
pub struct Canvas {
    document: InkDocument,
    history: History,
    palette: Palette,
}

impl Canvas {
    /// Create an empty canvas for a surface of the given size.
    pub fn new(surface: Size) -> Self {
        Self::with_document(InkDocument::new(surface))
    }

    /// Create a canvas around an existing document.
    pub fn with_document(document: InkDocument) -> Self {
        Self {
            document,
            history: History::new(),
            palette: Palette::default(),
        }
    }

    /// Replace the palette used by [`Canvas::set_palette_color`].
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    pub fn document(&self) -> &InkDocument {
        &self.document
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Start a stroke at `point` with the current paint.
    pub fn begin_stroke(&mut self, point: Point) -> InkResult<StrokeId> {
        let paint = self.document.paint_for_new_stroke();
        self.begin_stroke_with(point, paint)
    }

    /// Start a stroke at `point` with an explicit paint.
    pub fn begin_stroke_with(&mut self, point: Point, paint: PaintStyle) -> InkResult<StrokeId> {
        let id = self.document.begin_stroke(point, paint)?;
        self.invalidate_redo();
        log::debug!("Stroke {} begun at ({:.1}, {:.1})", id, point.x, point.y);
        Ok(id)
    }

    /// Extend the open stroke. Returns false if no stroke is open.
    pub fn continue_stroke(&mut self, point: Point) -> bool {
        self.document.continue_stroke(point)
    }

    /// Commit the open stroke, if any.
    pub fn end_stroke(&mut self) -> Option<StrokeId> {
        let id = self.document.end_stroke()?;
        self.invalidate_redo();
        log::debug!("Stroke {} committed ({} total)", id, self.document.len());
        Some(id)
    }

    /// Remove the first committed stroke hit by `point`. Not undoable.
    pub fn erase_near(&mut self, point: Point) -> Option<StrokeId> {
        let removed = self.document.erase_near(point)?;
        self.invalidate_redo();
        log::debug!("Stroke {} erased", removed.id());
        Some(removed.id())
    }

    /// Undo the most recent committed stroke.
    pub fn undo(&mut self) -> InkResult<StrokeId> {
        let id = self.history.undo(&mut self.document)?;
        log::debug!("Undo stroke {}", id);
        Ok(id)
    }

    /// Restore the most recently undone stroke.
    pub fn redo(&mut self) -> InkResult<StrokeId> {
        let id = self.history.redo(&mut self.document)?;
        log::debug!("Redo stroke {}", id);
        Ok(id)
    }

    /// Clear all strokes, the open stroke and the redo history.
    pub fn reset(&mut self) {
        self.document.clear();
        self.history.invalidate();
        log::debug!("Canvas reset");
    }

    /// Set the color for subsequent strokes.
    pub fn set_color(&mut self, color: InkColor) {
        if self.document.set_color(color) {
            log::debug!("Pen color set to {:?}", color);
        }
    }

    /// Set the color for subsequent strokes from a palette entry.
    /// An unknown name leaves the current color unchanged.
    pub fn set_palette_color(&mut self, name: &str) -> InkResult<InkColor> {
        let color = self.palette.lookup(name)?;
        self.set_color(color);
        Ok(color)
    }

    /// Set the width for subsequent strokes.
    pub fn set_stroke_width(&mut self, width: f64) -> InkResult<()> {
        self.document.set_stroke_width(width)
    }

    pub fn current_color(&self) -> InkColor {
        self.document.current_color()
    }

    /// Resize the drawing surface.
    pub fn set_surface_size(&mut self, surface: Size) {
        self.document.set_surface_size(surface);
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.document.is_empty()
    }

    /// Check if redo is available.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn invalidate_redo(&mut self) {
        let dropped = self.history.invalidate();
        if dropped > 0 {
            log::debug!("Discarded {} redo entries", dropped);
        }
    }
}
