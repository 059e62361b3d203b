//! Freehand strokes and their paint attributes.

use crate::color::InkColor;
use crate::geometry::point_to_polyline_dist;
use kurbo::{BezPath, Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for strokes.
pub type StrokeId = Uuid;

/// Extra distance added around a stroke's half-width so thin strokes stay erasable.
pub const HIT_MARGIN: f64 = 2.0;

/// Default pen width in pixels.
pub const DEFAULT_STROKE_WIDTH: f64 = 2.0;

/// Paint attributes captured by a stroke when it begins.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaintStyle {
    /// Stroke color.
    pub color: InkColor,
    /// Stroke width in surface pixels.
    pub stroke_width: f64,
}

impl PaintStyle {
    pub fn new(color: InkColor, stroke_width: f64) -> Self {
        Self {
            color,
            stroke_width,
        }
    }

    /// Copy of this paint with another color.
    pub fn with_color(self, color: InkColor) -> Self {
        Self { color, ..self }
    }

    /// Proximity threshold around the centerline used for erasing.
    pub fn hit_radius(&self) -> f64 {
        self.stroke_width / 2.0 + HIT_MARGIN
    }

    /// Get the stroke color as a peniko Color.
    pub fn peniko_color(&self) -> Color {
        self.color.into()
    }
}

impl Default for PaintStyle {
    fn default() -> Self {
        Self::new(InkColor::default(), DEFAULT_STROKE_WIDTH)
    }
}

/// One continuous freehand gesture.
///
/// Points are kept in drawing order and never reordered. Only the document
/// can append to a stroke, and only while it is the open stroke.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    id: StrokeId,
    points: Vec<Point>,
    paint: PaintStyle,
}

impl Stroke {
    /// Start a stroke with its first point.
    pub(crate) fn begin(point: Point, paint: PaintStyle) -> Self {
        Self {
            id: Uuid::new_v4(),
            points: vec![point],
            paint,
        }
    }

    /// Append a point to the path.
    pub(crate) fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn id(&self) -> StrokeId {
        self.id
    }

    /// Points in drawing order.
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn paint(&self) -> &PaintStyle {
        &self.paint
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the path is empty.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// A stroke with exactly one point.
    pub fn is_dot(&self) -> bool {
        self.points.len() == 1
    }

    /// Bounding box of the centerline.
    pub fn bounds(&self) -> Rect {
        let Some(first) = self.points.first() else {
            return Rect::ZERO;
        };
        self.points
            .iter()
            .skip(1)
            .fold(Rect::from_points(*first, *first), |rect, p| {
                rect.union_pt(*p)
            })
    }

    /// Check whether `point` lies within the stroke's hit radius.
    ///
    /// A dot has no segments and is never hit.
    pub fn hit_test(&self, point: Point) -> bool {
        point_to_polyline_dist(point, &self.points) <= self.paint.hit_radius()
    }

    /// Polyline path for rendering.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();

        let Some(first) = self.points.first() else {
            return path;
        };

        path.move_to(*first);
        for point in self.points.iter().skip(1) {
            path.line_to(*point);
        }

        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(width: f64) -> Stroke {
        let mut stroke = Stroke::begin(
            Point::new(0.0, 0.0),
            PaintStyle::new(InkColor::WHITE, width),
        );
        stroke.push(Point::new(100.0, 0.0));
        stroke
    }

    #[test]
    fn test_begin_is_dot() {
        let stroke = Stroke::begin(Point::new(5.0, 5.0), PaintStyle::default());
        assert!(stroke.is_dot());
        assert_eq!(stroke.len(), 1);
        assert!(!stroke.is_empty());
    }

    #[test]
    fn test_hit_radius() {
        assert!((PaintStyle::new(InkColor::RED, 4.0).hit_radius() - 4.0).abs() < f64::EPSILON);
        assert!((PaintStyle::default().hit_radius() - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_test_boundary() {
        let stroke = line(4.0);
        assert!(stroke.hit_test(Point::new(50.0, 0.0)));
        assert!(stroke.hit_test(Point::new(50.0, 4.0)));
        assert!(!stroke.hit_test(Point::new(50.0, 4.01)));
        assert!(!stroke.hit_test(Point::new(50.0, 6.0)));
        assert!(!stroke.hit_test(Point::new(50.0, 10.0)));
    }

    #[test]
    fn test_hit_test_past_endpoint() {
        let stroke = line(4.0);
        assert!(stroke.hit_test(Point::new(103.0, 0.0)));
        assert!(!stroke.hit_test(Point::new(105.0, 0.0)));
    }

    #[test]
    fn test_dot_never_hit() {
        let stroke = Stroke::begin(Point::new(10.0, 10.0), PaintStyle::default());
        assert!(!stroke.hit_test(Point::new(10.0, 10.0)));
    }

    #[test]
    fn test_bounds() {
        let mut stroke = Stroke::begin(Point::new(0.0, 0.0), PaintStyle::default());
        stroke.push(Point::new(100.0, 50.0));
        stroke.push(Point::new(50.0, 100.0));

        let bounds = stroke.bounds();
        assert!((bounds.x0).abs() < f64::EPSILON);
        assert!((bounds.y0).abs() < f64::EPSILON);
        assert!((bounds.x1 - 100.0).abs() < f64::EPSILON);
        assert!((bounds.y1 - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_to_path_elements() {
        let stroke = line(2.0);
        assert_eq!(stroke.to_path().elements().len(), 2);

        let dot = Stroke::begin(Point::new(1.0, 1.0), PaintStyle::default());
        assert_eq!(dot.to_path().elements().len(), 1);
    }
}
