//! Point and segment distance math used for hit-testing.

use kurbo::{Point, Size, Vec2};

/// Distance from a point to a line segment (a→b).
///
/// The projection parameter is clamped to `[0, 1]`, so the closest point is
/// always on the segment itself. A zero-length segment measures distance to `a`.
pub fn point_to_segment_dist(point: Point, a: Point, b: Point) -> f64 {
    let seg = Vec2::new(b.x - a.x, b.y - a.y);
    let pv = Vec2::new(point.x - a.x, point.y - a.y);
    let len_sq = seg.hypot2();
    if len_sq < f64::EPSILON {
        return pv.hypot();
    }
    let t = (pv.dot(seg) / len_sq).clamp(0.0, 1.0);
    let proj = Point::new(a.x + t * seg.x, a.y + t * seg.y);
    ((point.x - proj.x).powi(2) + (point.y - proj.y).powi(2)).sqrt()
}

/// Minimum distance from a point to a polyline (sequence of connected segments).
///
/// Returns `f64::INFINITY` for fewer than two points: there are no segments.
pub fn point_to_polyline_dist(point: Point, points: &[Point]) -> f64 {
    points
        .windows(2)
        .map(|w| point_to_segment_dist(point, w[0], w[1]))
        .fold(f64::INFINITY, f64::min)
}

/// Clamp a point to `[0, width] × [0, height]`.
///
/// NaN coordinates collapse to 0.
pub fn clamp_to_surface(point: Point, surface: Size) -> Point {
    Point::new(
        point.x.max(0.0).min(surface.width.max(0.0)),
        point.y.max(0.0).min(surface.height.max(0.0)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_distance_perpendicular() {
        let d = point_to_segment_dist(
            Point::new(50.0, 3.0),
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        );
        assert!((d - 3.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_segment_distance_clamps_to_endpoint() {
        // Beyond the end of the segment: distance is to the endpoint, not the line.
        let d = point_to_segment_dist(
            Point::new(110.0, 0.0),
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        );
        assert!((d - 10.0).abs() < f64::EPSILON);

        let d = point_to_segment_dist(
            Point::new(-3.0, 4.0),
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
        );
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_degenerate_segment() {
        let p = Point::new(10.0, 10.0);
        let d = point_to_segment_dist(Point::new(13.0, 14.0), p, p);
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_polyline_needs_two_points() {
        assert_eq!(point_to_polyline_dist(Point::ZERO, &[]), f64::INFINITY);
        assert_eq!(
            point_to_polyline_dist(Point::ZERO, &[Point::ZERO]),
            f64::INFINITY
        );
    }

    #[test]
    fn test_polyline_takes_minimum() {
        let points = [
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
        ];
        let d = point_to_polyline_dist(Point::new(95.0, 50.0), &points);
        assert!((d - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_clamp_to_surface() {
        let surface = Size::new(800.0, 600.0);
        assert_eq!(
            clamp_to_surface(Point::new(-5.0, 700.0), surface),
            Point::new(0.0, 600.0)
        );
        assert_eq!(
            clamp_to_surface(Point::new(400.0, 300.0), surface),
            Point::new(400.0, 300.0)
        );
        assert_eq!(
            clamp_to_surface(Point::new(f64::NAN, 900.0), surface),
            Point::new(0.0, 600.0)
        );
    }
}
