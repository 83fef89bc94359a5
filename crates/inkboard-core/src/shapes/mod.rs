//! Shape definitions for the whiteboard.

mod arrow;
mod ellipse;
mod image;
mod line;
mod pen;
mod rectangle;
mod text;

pub use arrow::Arrow;
pub use ellipse::Ellipse;
pub use image::Image;
pub use line::Line;
pub use pen::{Pen, MIN_PEN_SIZE};
pub use rectangle::Rectangle;
pub use text::{MIN_TEXT_SCALE, TEXT_SCALE_RATE, Text};

use kurbo::{Affine, Point, Rect};
use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Packed `0xRRGGBBAA` color, stored as a plain number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rgba(pub u32);

impl Rgba {
    pub const BLACK: Self = Self(0x0000_00ff);

    /// Convert for a renderer.
    pub fn to_color(self) -> Color {
        let [r, g, b, a] = self.0.to_be_bytes();
        Color::from_rgba8(r, g, b, a)
    }
}

/// Style record shared by every element. Missing fields fall back to the
/// board default when deserializing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeStyle {
    pub stroke_color: Rgba,
    pub stroke_width: f64,
    /// None leaves closed shapes unfilled.
    pub fill_color: Option<Rgba>,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            stroke_color: Rgba::BLACK,
            stroke_width: 2.0,
            fill_color: None,
        }
    }
}

/// Resize direction: one of the eight compass points.
///
/// Diagonals compose the two single-axis rules, so every shape only needs
/// to look at [`Direction::north`], [`Direction::south`],
/// [`Direction::east`] and [`Direction::west`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    N,
    S,
    E,
    W,
    NE,
    NW,
    SE,
    SW,
}

impl Direction {
    pub fn north(self) -> bool {
        matches!(self, Direction::N | Direction::NE | Direction::NW)
    }

    pub fn south(self) -> bool {
        matches!(self, Direction::S | Direction::SE | Direction::SW)
    }

    pub fn east(self) -> bool {
        matches!(self, Direction::E | Direction::NE | Direction::SE)
    }

    pub fn west(self) -> bool {
        matches!(self, Direction::W | Direction::NW | Direction::SW)
    }
}

/// Discriminant of [`Shape`], used for type queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Line,
    Arrow,
    Pen,
    Image,
    Text,
}

impl ShapeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Ellipse => "ellipse",
            ShapeKind::Line => "line",
            ShapeKind::Arrow => "arrow",
            ShapeKind::Pen => "pen",
            ShapeKind::Image => "image",
            ShapeKind::Text => "text",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Geometry operations every shape kind implements.
pub trait ShapeTrait {
    /// Axis-aligned bounds in the shape's local (unrotated) space.
    fn bounds(&self) -> Rect;

    /// Check if a point (in local coordinates) hits this shape.
    fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.bounds().inflate(tolerance, tolerance).contains(point)
    }

    /// Return a resized copy. Axes whose result would be invalid are left unchanged.
    fn resize(&self, direction: Direction, dx: f64, dy: f64) -> Self
    where
        Self: Sized;

    /// Apply an affine transform in place.
    fn transform(&mut self, affine: Affine);
}

/// Closed set of shape kinds with their geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Shape {
    Rectangle(Rectangle),
    Ellipse(Ellipse),
    Line(Line),
    Arrow(Arrow),
    Pen(Pen),
    Image(Image),
    Text(Text),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Rectangle(_) => ShapeKind::Rectangle,
            Shape::Ellipse(_) => ShapeKind::Ellipse,
            Shape::Line(_) => ShapeKind::Line,
            Shape::Arrow(_) => ShapeKind::Arrow,
            Shape::Pen(_) => ShapeKind::Pen,
            Shape::Image(_) => ShapeKind::Image,
            Shape::Text(_) => ShapeKind::Text,
        }
    }

    pub fn bounds(&self) -> Rect {
        match self {
            Shape::Rectangle(s) => s.bounds(),
            Shape::Ellipse(s) => s.bounds(),
            Shape::Line(s) => s.bounds(),
            Shape::Arrow(s) => s.bounds(),
            Shape::Pen(s) => s.bounds(),
            Shape::Image(s) => s.bounds(),
            Shape::Text(s) => s.bounds(),
        }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        match self {
            Shape::Rectangle(s) => s.hit_test(point, tolerance),
            Shape::Ellipse(s) => s.hit_test(point, tolerance),
            Shape::Line(s) => s.hit_test(point, tolerance),
            Shape::Arrow(s) => s.hit_test(point, tolerance),
            Shape::Pen(s) => s.hit_test(point, tolerance),
            Shape::Image(s) => s.hit_test(point, tolerance),
            Shape::Text(s) => s.hit_test(point, tolerance),
        }
    }

    pub fn resize(&self, direction: Direction, dx: f64, dy: f64) -> Shape {
        match self {
            Shape::Rectangle(s) => Shape::Rectangle(s.resize(direction, dx, dy)),
            Shape::Ellipse(s) => Shape::Ellipse(s.resize(direction, dx, dy)),
            Shape::Line(s) => Shape::Line(s.resize(direction, dx, dy)),
            Shape::Arrow(s) => Shape::Arrow(s.resize(direction, dx, dy)),
            Shape::Pen(s) => Shape::Pen(s.resize(direction, dx, dy)),
            Shape::Image(s) => Shape::Image(s.resize(direction, dx, dy)),
            Shape::Text(s) => Shape::Text(s.resize(direction, dx, dy)),
        }
    }

    pub fn transform(&mut self, affine: Affine) {
        match self {
            Shape::Rectangle(s) => s.transform(affine),
            Shape::Ellipse(s) => s.transform(affine),
            Shape::Line(s) => s.transform(affine),
            Shape::Arrow(s) => s.transform(affine),
            Shape::Pen(s) => s.transform(affine),
            Shape::Image(s) => s.transform(affine),
            Shape::Text(s) => s.transform(affine),
        }
    }

    /// Explicit width and height, for kinds that store them.
    pub fn explicit_size(&self) -> Option<(f64, f64)> {
        match self {
            Shape::Rectangle(r) => Some((r.width, r.height)),
            Shape::Image(i) => Some((i.width, i.height)),
            _ => None,
        }
    }

    /// Text content, for kinds that carry text.
    pub fn text_content(&self) -> Option<&str> {
        match self {
            Shape::Text(t) => Some(&t.content),
            _ => None,
        }
    }
}

/// Map a rectangle through an affine transform and return the normalized result.
///
/// Used by box-like shapes so that flips keep a positive width and height.
pub(crate) fn transform_rect(rect: Rect, affine: Affine) -> Rect {
    let p0 = affine * Point::new(rect.x0, rect.y0);
    let p1 = affine * Point::new(rect.x1, rect.y1);
    Rect::from_points(p0, p1)
}
