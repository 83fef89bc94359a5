//! Text shape.

use super::{Direction, ShapeTrait, transform_rect};
use kurbo::{Affine, Point, Rect};
use serde::{Deserialize, Serialize};

/// Scale change per world unit of drag when resizing text.
pub const TEXT_SCALE_RATE: f64 = 0.01;
/// Smallest allowed text scale factor on either axis.
pub const MIN_TEXT_SCALE: f64 = 0.1;

/// Average glyph width as a fraction of the font size.
const CHAR_WIDTH_FACTOR: f64 = 0.55;
/// Line height as a multiple of the font size.
const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// A text label. Resizing changes the two scale factors, not the font size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    /// Top-left corner of the text box.
    pub position: Point,
    pub content: String,
    /// Font size in world units.
    pub font_size: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl Default for Text {
    fn default() -> Self {
        Self {
            position: Point::ZERO,
            content: String::new(),
            font_size: Self::DEFAULT_FONT_SIZE,
            scale_x: 1.0,
            scale_y: 1.0,
        }
    }
}

impl Text {
    pub const DEFAULT_FONT_SIZE: f64 = 20.0;

    pub fn new(position: Point, content: impl Into<String>) -> Self {
        Self {
            position,
            content: content.into(),
            ..Self::default()
        }
    }

    /// Unscaled layout size approximated from character counts.
    fn base_size(&self) -> (f64, f64) {
        let max_line_len = self
            .content
            .lines()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        let line_count = self.content.lines().count().max(1);
        (
            max_line_len as f64 * self.font_size * CHAR_WIDTH_FACTOR,
            line_count as f64 * self.font_size * LINE_HEIGHT_FACTOR,
        )
    }
}

/// Step a scale factor by `delta * TEXT_SCALE_RATE`, clamped to the minimum.
/// Returns the new scale and the drag distance actually applied.
fn step_scale(scale: f64, delta: f64) -> (f64, f64) {
    let next = (scale + delta * TEXT_SCALE_RATE).max(MIN_TEXT_SCALE);
    (next, (next - scale) / TEXT_SCALE_RATE)
}

impl ShapeTrait for Text {
    fn bounds(&self) -> Rect {
        let (width, height) = self.base_size();
        Rect::from_origin_size(self.position, (width * self.scale_x, height * self.scale_y))
    }

    fn resize(&self, direction: Direction, dx: f64, dy: f64) -> Self {
        let mut next = self.clone();

        if direction.east() {
            next.scale_x = step_scale(self.scale_x, dx).0;
        } else if direction.west() {
            let (scale, applied) = step_scale(self.scale_x, -dx);
            next.scale_x = scale;
            next.position.x -= applied;
        }

        if direction.south() {
            next.scale_y = step_scale(self.scale_y, dy).0;
        } else if direction.north() {
            let (scale, applied) = step_scale(self.scale_y, -dy);
            next.scale_y = scale;
            next.position.y -= applied;
        }

        next
    }

    fn transform(&mut self, affine: Affine) {
        let rect = transform_rect(self.bounds(), affine);
        self.position = rect.origin();
    }
}
