//! Image shape for embedded raster images.

use super::rectangle::resize_box;
use super::{Direction, ShapeTrait, transform_rect};
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};

/// An image placed on the board. Pixel data is referenced by `source`
/// (URL or data URI) and never decoded here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Top-left corner position.
    pub position: Point,
    /// Display width.
    pub width: f64,
    /// Display height.
    pub height: f64,
    pub source: String,
    /// Original image width in pixels.
    #[serde(default)]
    pub natural_width: u32,
    /// Original image height in pixels.
    #[serde(default)]
    pub natural_height: u32,
}

impl Default for Image {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            width: 100.0,
            height: 100.0,
            source: String::new(),
            natural_width: 0,
            natural_height: 0,
        }
    }
}

impl Image {
    /// Create an image displayed at its natural size.
    pub fn new(
        position: Point,
        source: impl Into<String>,
        natural_width: u32,
        natural_height: u32,
    ) -> Self {
        Self {
            position,
            width: f64::from(natural_width.max(1)),
            height: f64::from(natural_height.max(1)),
            source: source.into(),
            natural_width,
            natural_height,
        }
    }

    /// Natural aspect ratio (width / height), if known.
    pub fn aspect_ratio(&self) -> Option<f64> {
        (self.natural_height > 0)
            .then(|| f64::from(self.natural_width) / f64::from(self.natural_height))
    }

    pub fn as_rect(&self) -> Rect {
        Rect::from_origin_size(self.position, (self.width, self.height))
    }
}

impl ShapeTrait for Image {
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
