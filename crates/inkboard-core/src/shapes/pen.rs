//! Freehand pen stroke.

use super::{Direction, ShapeTrait};
use crate::geometry::{bounds_from_points, point_to_polyline_dist};
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Smallest width or height a pen stroke may be resized to.
pub const MIN_PEN_SIZE: f64 = 10.0;

/// A freehand stroke: an ordered point list plus its cached SVG path.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pen {
    pub points: Vec<Point>,
    /// SVG path data for `points`, kept in sync by every mutation.
    pub path: String,
}

impl Pen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from existing points.
    pub fn from_points(points: Vec<Point>) -> Self {
        let path = svg_path(&points);
        Self { points, path }
    }

    /// Add a point to the stroke.
    pub fn add_point(&mut self, point: Point) {
        self.points.push(point);
        self.refresh_path();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    fn refresh_path(&mut self) {
        self.path = svg_path(&self.points);
    }
}

/// Build `M x y L x y ...` path data for a polyline.
fn svg_path(points: &[Point]) -> String {
    let mut path = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { 'M' } else { 'L' };
        if i > 0 {
            path.push(' ');
        }
        // Writing to a String cannot fail.
        let _ = write!(path, "{cmd} {} {}", p.x, p.y);
    }
    path
}

impl ShapeTrait for Pen {
    fn bounds(&self) -> Rect {
        bounds_from_points(&self.points)
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_polyline_dist(point, &self.points) <= tolerance
    }

    /// Scale every point around the bounding-box center so the box grows by
    /// the requested delta. Rejected when either dimension would drop below
    /// [`MIN_PEN_SIZE`].
    fn resize(&self, direction: Direction, dx: f64, dy: f64) -> Self {
        let bounds = self.bounds();
        let (width, height) = (bounds.width(), bounds.height());
        if width <= 0.0 || height <= 0.0 {
            return self.clone();
        }

        let new_width = if direction.east() {
            width + dx
        } else if direction.west() {
            width - dx
        } else {
            width
        };
        let new_height = if direction.south() {
            height + dy
        } else if direction.north() {
            height - dy
        } else {
            height
        };
        if new_width < MIN_PEN_SIZE || new_height < MIN_PEN_SIZE {
            return self.clone();
        }

        let center = bounds.center();
        let scale = Affine::translate(center.to_vec2())
            * Affine::scale_non_uniform(new_width / width, new_height / height)
            * Affine::translate(-center.to_vec2());
        let mut next = self.clone();
        next.transform(scale);
        next
    }

    fn transform(&mut self, affine: Affine) {
        for point in &mut self.points {
            *point = affine * *point;
        }
        self.refresh_path();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_follows_points() {
        let mut pen = Pen::from_points(vec![Point::new(0.0, 0.0), Point::new(10.0, 5.0)]);
        assert_eq!(pen.path, "M 0 0 L 10 5");
        pen.add_point(Point::new(20.0, 0.0));
        assert_eq!(pen.path, "M 0 0 L 10 5 L 20 0");
    }

    #[test]
    fn test_bounds() {
        let pen = Pen::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 50.0),
            Point::new(50.0, 100.0),
        ]);
        assert_eq!(pen.bounds(), Rect::new(0.0, 0.0, 100.0, 100.0));
    }

    #[test]
    fn test_resize_scales_around_center() {
        let pen = Pen::from_points(vec![Point::new(0.0, 0.0), Point::new(100.0, 100.0)]);
        let resized = pen.resize(Direction::E, 100.0, 0.0);
        let bounds = resized.bounds();
        assert!((bounds.width() - 200.0).abs() < 1e-9);
        assert!((bounds.height() - 100.0).abs() < 1e-9);
        assert!((bounds.center().x - 50.0).abs() < 1e-9);
        assert_ne!(resized.path, pen.path);
    }

    #[test]
    fn test_resize_below_floor_rejected() {
        let pen = Pen::from_points(vec![Point::new(0.0, 0.0), Point::new(20.0, 20.0)]);
        let resized = pen.resize(Direction::N, 0.0, 15.0);
        assert_eq!(resized, pen);
    }

    #[test]
    fn test_hit_test_checks_every_segment() {
        let pen = Pen::from_points(vec![
            Point::new(0.0, 0.0),
            Point::new(100.0, 0.0),
            Point::new(100.0, 100.0),
        ]);
        assert!(pen.hit_test(Point::new(50.0, 2.0), 5.0));
        assert!(pen.hit_test(Point::new(98.0, 60.0), 5.0));
        assert!(!pen.hit_test(Point::new(50.0, 50.0), 5.0));
    }
}
