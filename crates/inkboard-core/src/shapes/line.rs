//! Line shape.

use super::{Direction, ShapeTrait};
use crate::geometry::{bounds_from_points, point_to_segment_dist};
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};

/// A straight line segment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    pub start: Point,
    pub end: Point,
}

impl Line {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        self.start.distance(self.end)
    }

    pub fn midpoint(&self) -> Point {
        self.start.midpoint(self.end)
    }
}

impl ShapeTrait for Line {
    fn bounds(&self) -> Rect {
        bounds_from_points(&[self.start, self.end])
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_segment_dist(point, self.start, self.end) <= tolerance
    }

    /// Each compass side drives one endpoint coordinate: N → start.y,
    /// S → end.y, W → start.x, E → end.x.
    fn resize(&self, direction: Direction, dx: f64, dy: f64) -> Self {
        let mut next = self.clone();
        if direction.north() {
            next.start.y += dy;
        } else if direction.south() {
            next.end.y += dy;
        }
        if direction.west() {
            next.start.x += dx;
        } else if direction.east() {
            next.end.x += dx;
        }
        next
    }

    fn transform(&mut self, affine: Affine) {
        self.start = affine * self.start;
        self.end = affine * self.end;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_and_midpoint() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(3.0, 4.0));
        assert!((line.length() - 5.0).abs() < f64::EPSILON);
        assert_eq!(line.midpoint(), Point::new(1.5, 2.0));
    }

    #[test]
    fn test_resize_direction_mapping() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 100.0));

        let n = line.resize(Direction::N, 0.0, -10.0);
        assert_eq!(n.start, Point::new(0.0, -10.0));
        assert_eq!(n.end, line.end);

        let s = line.resize(Direction::S, 0.0, 10.0);
        assert_eq!(s.end, Point::new(100.0, 110.0));

        let w = line.resize(Direction::W, 5.0, 0.0);
        assert_eq!(w.start, Point::new(5.0, 0.0));

        let se = line.resize(Direction::SE, 5.0, 5.0);
        assert_eq!(se.end, Point::new(105.0, 105.0));
        assert_eq!(se.start, line.start);
    }

    #[test]
    fn test_hit_test() {
        let line = Line::new(Point::new(0.0, 0.0), Point::new(100.0, 0.0));
        assert!(line.hit_test(Point::new(50.0, 4.0), 5.0));
        assert!(!line.hit_test(Point::new(50.0, 10.0), 5.0));
        assert!(!line.hit_test(Point::new(110.0, 0.0), 5.0));
    }
}
