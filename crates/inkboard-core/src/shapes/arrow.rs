//! Arrow shape.

use super::{Direction, ShapeTrait};
use crate::geometry::{bounds_from_points, point_to_segment_dist};
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};

/// A straight arrow from `start` to `end`, with the head drawn at `end`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Arrow {
    pub start: Point,
    pub end: Point,
    /// Arrowhead size.
    pub head_size: f64,
}

impl Default for Arrow {
    fn default() -> Self {
        Self {
            start: Point::ZERO,
            end: Point::ZERO,
            head_size: Self::DEFAULT_HEAD_SIZE,
        }
    }
}

impl Arrow {
    pub const DEFAULT_HEAD_SIZE: f64 = 15.0;

    pub fn new(start: Point, end: Point) -> Self {
        Self {
            start,
            end,
            ..Self::default()
        }
    }

    /// Direction of the arrow (angle in radians).
    pub fn direction(&self) -> f64 {
        (self.end.y - self.start.y).atan2(self.end.x - self.start.x)
    }

    /// The two barb points of the arrowhead.
    pub fn head_points(&self) -> (Point, Point) {
        let angle = self.direction();
        let spread = std::f64::consts::FRAC_PI_6;
        let left = Point::new(
            self.end.x - self.head_size * (angle - spread).cos(),
            self.end.y - self.head_size * (angle - spread).sin(),
        );
        let right = Point::new(
            self.end.x - self.head_size * (angle + spread).cos(),
            self.end.y - self.head_size * (angle + spread).sin(),
        );
        (left, right)
    }
}

impl ShapeTrait for Arrow {
    fn bounds(&self) -> Rect {
        bounds_from_points(&[self.start, self.end])
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        point_to_segment_dist(point, self.start, self.end) <= tolerance
    }

    /// Unlike [`super::Line`], the vertical mapping is swapped:
    /// N → end.y, S → start.y. W → start.x and E → end.x as for lines.
    fn resize(&self, direction: Direction, dx: f64, dy: f64) -> Self {
        let mut next = self.clone();
        if direction.north() {
            next.end.y += dy;
        } else if direction.south() {
            next.start.y += dy;
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
