//! Rectangle shape.

use super::{Direction, ShapeTrait, transform_rect};
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};

/// A rectangle with optional rounded corners.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    /// Top-left corner position.
    pub position: Point,
    pub width: f64,
    pub height: f64,
    /// Corner radius (0 = sharp corners).
    pub corner_radius: f64,
}

impl Default for Rectangle {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            width: 1.0,
            height: 1.0,
            corner_radius: Self::DEFAULT_CORNER_RADIUS,
        }
    }
}

impl Rectangle {
    pub const DEFAULT_CORNER_RADIUS: f64 = 5.0;

    /// Create a new rectangle with the default corner radius.
    pub fn new(position: Point, width: f64, height: f64) -> Self {
        Self {
            position,
            width,
            height,
            ..Self::default()
        }
    }

    /// Create a rectangle from two corner points.
    pub fn from_corners(p1: Point, p2: Point) -> Self {
        let rect = Rect::from_points(p1, p2);
        Self::new(rect.origin(), rect.width(), rect.height())
    }

    /// Get the rectangle as a kurbo Rect.
    pub fn as_rect(&self) -> Rect {
        Rect::from_origin_size(self.position, (self.width, self.height))
    }
}

/// Shared box resize rule for rectangles and images.
///
/// Returns the new `(position, width, height)`; each axis whose result
/// would be non-positive keeps its old values.
pub(crate) fn resize_box(
    position: Point,
    width: f64,
    height: f64,
    direction: Direction,
    dx: f64,
    dy: f64,
) -> (Point, f64, f64) {
    let (mut position, mut width, mut height) = (position, width, height);

    if direction.north() {
        let h = height - dy;
        if h > 0.0 {
            position.y += dy;
            height = h;
        }
    } else if direction.south() {
        let h = height + dy;
        if h > 0.0 {
            height = h;
        }
    }

    if direction.west() {
        let w = width - dx;
        if w > 0.0 {
            position.x += dx;
            width = w;
        }
    } else if direction.east() {
        let w = width + dx;
        if w > 0.0 {
            width = w;
        }
    }

    (position, width, height)
}

impl ShapeTrait for Rectangle {
    fn bounds(&self) -> Rect {
        self.as_rect()
    }

    fn resize(&self, direction: Direction, dx: f64, dy: f64) -> Self {
        let (position, width, height) =
            resize_box(self.position, self.width, self.height, direction, dx, dy);
        Self {
            position,
            width,
            height,
            ..self.clone()
        }
    }

    fn transform(&mut self, affine: Affine) {
        let rect = transform_rect(self.as_rect(), affine);
        self.position = rect.origin();
        self.width = rect.width();
        self.height = rect.height();
    }
}
