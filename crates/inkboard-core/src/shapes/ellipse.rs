//! Ellipse shape.

use super::{Direction, ShapeTrait};
use crate::geometry::point_to_polyline_dist;
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Number of segments used to approximate the outline for hit-testing.
const OUTLINE_SEGMENTS: usize = 64;

/// An axis-aligned ellipse (rotation lives on the element).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ellipse {
    pub center: Point,
    /// Horizontal radius.
    pub radius_x: f64,
    /// Vertical radius.
    pub radius_y: f64,
}

impl Default for Ellipse {
    fn default() -> Self {
        Self {
            center: Point::ZERO,
            radius_x: 1.0,
            radius_y: 1.0,
        }
    }
}

impl Ellipse {
    pub fn new(center: Point, radius_x: f64, radius_y: f64) -> Self {
        Self {
            center,
            radius_x,
            radius_y,
        }
    }

    pub fn circle(center: Point, radius: f64) -> Self {
        Self::new(center, radius, radius)
    }

    /// Closed polyline approximating the outline.
    pub fn outline(&self) -> Vec<Point> {
        (0..=OUTLINE_SEGMENTS)
            .map(|i| {
                let angle = TAU * i as f64 / OUTLINE_SEGMENTS as f64;
                Point::new(
                    self.center.x + self.radius_x * angle.cos(),
                    self.center.y + self.radius_y * angle.sin(),
                )
            })
            .collect()
    }

    fn contains(&self, point: Point) -> bool {
        if self.radius_x <= 0.0 || self.radius_y <= 0.0 {
            return false;
        }
        let dx = (point.x - self.center.x) / self.radius_x;
        let dy = (point.y - self.center.y) / self.radius_y;
        dx * dx + dy * dy <= 1.0
    }
}

impl ShapeTrait for Ellipse {
    fn bounds(&self) -> Rect {
        Rect::new(
            self.center.x - self.radius_x,
            self.center.y - self.radius_y,
            self.center.x + self.radius_x,
            self.center.y + self.radius_y,
        )
    }

    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.contains(point) || point_to_polyline_dist(point, &self.outline()) <= tolerance
    }

    /// Half of the delta goes to the radius and half to the center, so the
    /// opposite edge stays in place.
    fn resize(&self, direction: Direction, dx: f64, dy: f64) -> Self {
        let mut next = self.clone();
        let half_dx = dx / 2.0;
        let half_dy = dy / 2.0;

        if direction.north() {
            let ry = self.radius_y - half_dy;
            if ry > 0.0 {
                next.radius_y = ry;
                next.center.y = self.center.y + half_dy;
            }
        } else if direction.south() {
            let ry = self.radius_y + half_dy;
            if ry > 0.0 {
                next.radius_y = ry;
                next.center.y = self.center.y + half_dy;
            }
        }

        if direction.east() {
            let rx = self.radius_x + half_dx;
            if rx > 0.0 {
                next.radius_x = rx;
                next.center.x = self.center.x + half_dx;
            }
        } else if direction.west() {
            let rx = self.radius_x - half_dx;
            if rx > 0.0 {
                next.radius_x = rx;
                next.center.x = self.center.x + half_dx;
            }
        }

        next
    }

    fn transform(&mut self, affine: Affine) {
        self.center = affine * self.center;
        let coeffs = affine.as_coeffs();
        self.radius_x *= coeffs[0].abs();
        self.radius_y *= coeffs[3].abs();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resize_northeast() {
        let ellipse = Ellipse::new(Point::new(10.0, 10.0), 10.0, 10.0);
        let resized = ellipse.resize(Direction::NE, 5.0, -5.0);
        assert!((resized.center.x - 12.5).abs() < f64::EPSILON);
        assert!((resized.center.y - 7.5).abs() < f64::EPSILON);
        assert!((resized.radius_x - 12.5).abs() < f64::EPSILON);
        assert!((resized.radius_y - 12.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_resize_keeps_opposite_edge() {
        let ellipse = Ellipse::new(Point::new(0.0, 0.0), 10.0, 10.0);
        let resized = ellipse.resize(Direction::W, -6.0, 0.0);
        // Right edge stays at x = 10.
        assert!((resized.bounds().x1 - 10.0).abs() < 1e-12);
        assert!((resized.bounds().x0 + 16.0).abs() < 1e-12);
    }

    #[test]
    fn test_resize_rejects_collapse() {
        let ellipse = Ellipse::new(Point::new(0.0, 0.0), 2.0, 2.0);
        let resized = ellipse.resize(Direction::S, 0.0, -10.0);
        assert_eq!(resized, ellipse);
    }

    #[test]
    fn test_hit_test() {
        let circle = Ellipse::circle(Point::new(0.0, 0.0), 10.0);
        assert!(circle.hit_test(Point::new(0.0, 0.0), 0.0));
        assert!(circle.hit_test(Point::new(12.0, 0.0), 3.0));
        assert!(!circle.hit_test(Point::new(15.0, 0.0), 3.0));
    }

    #[test]
    fn test_bounds() {
        let ellipse = Ellipse::new(Point::new(50.0, 50.0), 30.0, 20.0);
        assert_eq!(ellipse.bounds(), Rect::new(20.0, 30.0, 80.0, 70.0));
    }
}
