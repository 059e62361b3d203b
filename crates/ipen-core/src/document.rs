//! The ink document: committed strokes, the open stroke and the current paint.

use crate::color::InkColor;
use crate::error::{InkError, InkResult};
use crate::geometry::clamp_to_surface;
use crate::stroke::{PaintStyle, Stroke, StrokeId};
use kurbo::{Point, Size};

/// All strokes currently visible on the overlay.
///
/// Committed strokes are kept back to front (creation order). At most one
/// stroke is open at a time and only that stroke can gain points.
#[derive(Debug, Clone)]
pub struct InkDocument {
    /// Closed strokes in z-order.
    strokes: Vec<Stroke>,
    /// Stroke receiving points from the current gesture.
    open: Option<Stroke>,
    /// Color assigned to the next new stroke.
    current_color: InkColor,
    /// Width assigned to the next new stroke.
    stroke_width: f64,
    /// Paint handed to new strokes; rebuilt only when color or width changes.
    cached_paint: PaintStyle,
    /// Bumped every time `cached_paint` is rebuilt.
    paint_generation: u64,
    /// Drawing surface; incoming points are clamped to it.
    surface: Size,
}

impl InkDocument {
    /// Create an empty document for a surface of the given size.
    pub fn new(surface: Size) -> Self {
        Self::with_paint(surface, PaintStyle::default())
    }

    /// Create an empty document with an initial paint.
    pub fn with_paint(surface: Size, paint: PaintStyle) -> Self {
        Self {
            strokes: Vec::new(),
            open: None,
            current_color: paint.color,
            stroke_width: paint.stroke_width,
            cached_paint: paint,
            paint_generation: 0,
            surface,
        }
    }

    pub fn surface_size(&self) -> Size {
        self.surface
    }

    /// Resize the drawing surface. Existing strokes are left untouched.
    pub fn set_surface_size(&mut self, surface: Size) {
        self.surface = surface;
    }

    pub fn current_color(&self) -> InkColor {
        self.current_color
    }

    /// Set the color for subsequent strokes. Returns true if the color changed.
    pub fn set_color(&mut self, color: InkColor) -> bool {
        if self.current_color == color {
            return false;
        }
        self.current_color = color;
        true
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    /// Set the width for subsequent strokes.
    pub fn set_stroke_width(&mut self, width: f64) -> InkResult<()> {
        if !width.is_finite() || width <= 0.0 {
            return Err(InkError::InvalidStrokeWidth(width));
        }
        self.stroke_width = width;
        Ok(())
    }

    /// Resolve the paint for a stroke about to begin.
    ///
    /// The cached paint is compared by value against the current color and
    /// width. When one of them differs the cache is rebuilt and
    /// [`paint_generation`](Self::paint_generation) is incremented.
    pub fn paint_for_new_stroke(&mut self) -> PaintStyle {
        let stale = self.cached_paint.color != self.current_color
            || self.cached_paint.stroke_width != self.stroke_width;
        if stale {
            self.cached_paint = PaintStyle::new(self.current_color, self.stroke_width);
            self.paint_generation += 1;
            log::debug!(
                "Paint rebuilt: {:?} width {}",
                self.current_color,
                self.stroke_width
            );
        }
        self.cached_paint
    }

    /// Number of times the cached paint has been rebuilt.
    pub fn paint_generation(&self) -> u64 {
        self.paint_generation
    }

    /// Open a new stroke at `point` with the given paint.
    pub fn begin_stroke(&mut self, point: Point, paint: PaintStyle) -> InkResult<StrokeId> {
        if self.open.is_some() {
            return Err(InkError::StrokeInProgress);
        }
        let stroke = Stroke::begin(clamp_to_surface(point, self.surface), paint);
        let id = stroke.id();
        self.open = Some(stroke);
        Ok(id)
    }

    /// Append a point to the open stroke.
    /// Returns false (and does nothing) if no stroke is open.
    pub fn continue_stroke(&mut self, point: Point) -> bool {
        let surface = self.surface;
        match self.open.as_mut() {
            Some(stroke) => {
                stroke.push(clamp_to_surface(point, surface));
                true
            }
            None => false,
        }
    }

    /// Commit the open stroke to the end of the list.
    /// Returns the committed stroke's ID, or None if no stroke was open.
    pub fn end_stroke(&mut self) -> Option<StrokeId> {
        let stroke = self.open.take()?;
        let id = stroke.id();
        self.strokes.push(stroke);
        Some(id)
    }

    /// Remove the first committed stroke (creation order) whose hit radius
    /// contains `point`. The open stroke is never erased.
    pub fn erase_near(&mut self, point: Point) -> Option<Stroke> {
        let index = self.strokes.iter().position(|s| s.hit_test(point))?;
        Some(self.strokes.remove(index))
    }

    /// Remove and return the most recent committed stroke.
    pub(crate) fn pop_committed(&mut self) -> Option<Stroke> {
        self.strokes.pop()
    }

    /// Append a closed stroke at the top of the z-order.
    pub(crate) fn push_committed(&mut self, stroke: Stroke) {
        self.strokes.push(stroke);
    }

    /// Drop every committed stroke and the open stroke.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.open = None;
    }

    /// Committed strokes, back to front.
    pub fn strokes(&self) -> &[Stroke] {
        &self.strokes
    }

    /// The in-progress stroke, if any.
    pub fn open_stroke(&self) -> Option<&Stroke> {
        self.open.as_ref()
    }

    /// Everything to draw this frame, back to front: committed strokes then the open one.
    pub fn visible_strokes(&self) -> impl Iterator<Item = &Stroke> {
        self.strokes.iter().chain(self.open.iter())
    }

    /// Get a committed stroke by ID.
    pub fn get(&self, id: StrokeId) -> Option<&Stroke> {
        self.strokes.iter().find(|s| s.id() == id)
    }

    /// Check if a stroke is open.
    pub fn is_drawing(&self) -> bool {
        self.open.is_some()
    }

    /// Number of committed strokes.
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Check if there are no committed strokes.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }
}
