//! Viewport pan/zoom, used to resolve the visible region of the board.

use kurbo::{Affine, Point, Rect, Size, Vec2};
use serde::{Deserialize, Serialize};

pub const MIN_ZOOM: f64 = 0.1;
pub const MAX_ZOOM: f64 = 10.0;

/// World-to-screen mapping: `screen = world * zoom + offset`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Camera {
    /// Screen-space translation.
    pub offset: Vec2,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            offset: Vec2::ZERO,
            zoom: 1.0,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    /// World to screen transform.
    pub fn transform(&self) -> Affine {
        Affine::translate(self.offset) * Affine::scale(self.zoom)
    }

    /// Screen to world transform.
    pub fn inverse_transform(&self) -> Affine {
        Affine::scale(1.0 / self.zoom) * Affine::translate(-self.offset)
    }

    pub fn screen_to_world(&self, screen: Point) -> Point {
        self.inverse_transform() * screen
    }

    pub fn world_to_screen(&self, world: Point) -> Point {
        self.transform() * world
    }

    /// Pan by a screen-space delta.
    pub fn pan(&mut self, delta: Vec2) {
        self.offset += delta;
    }

    /// Zoom by `factor` while keeping `anchor` (screen space) fixed.
    pub fn zoom_at(&mut self, anchor: Point, factor: f64) {
        let zoom = (self.zoom * factor).clamp(MIN_ZOOM, MAX_ZOOM);
        if (zoom - self.zoom).abs() < f64::EPSILON {
            return;
        }
        let world = self.screen_to_world(anchor);
        self.zoom = zoom;
        self.offset += anchor - self.world_to_screen(world);
    }

    /// Move the camera so that `world` sits at the middle of the viewport.
    pub fn center_on(&mut self, world: Point, viewport: Size) {
        let middle = Point::new(viewport.width / 2.0, viewport.height / 2.0);
        self.offset = middle.to_vec2() - world.to_vec2() * self.zoom;
    }

    /// The world-space rectangle covered by a viewport of the given size.
    pub fn visible_world_rect(&self, viewport: Size) -> Rect {
        let top_left = self.screen_to_world(Point::ZERO);
        let bottom_right = self.screen_to_world(Point::new(viewport.width, viewport.height));
        Rect::from_points(top_left, bottom_right)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_by_default() {
        let camera = Camera::new();
        let p = Point::new(12.0, 34.0);
        assert_eq!(camera.screen_to_world(p), p);
    }

    #[test]
    fn test_round_trip() {
        let camera = Camera {
            offset: Vec2::new(-40.0, 15.0),
            zoom: 2.5,
        };
        let p = Point::new(7.0, -3.0);
        let back = camera.screen_to_world(camera.world_to_screen(p));
        assert!((back.x - p.x).abs() < 1e-10);
        assert!((back.y - p.y).abs() < 1e-10);
    }

    #[test]
    fn test_zoom_at_keeps_anchor() {
        let mut camera = Camera::new();
        let anchor = Point::new(200.0, 100.0);
        let before = camera.screen_to_world(anchor);
        camera.zoom_at(anchor, 2.0);
        let after = camera.screen_to_world(anchor);
        assert!((before.x - after.x).abs() < 1e-10);
        assert!((before.y - after.y).abs() < 1e-10);

        camera.zoom_at(anchor, 1e6);
        assert!((camera.zoom - MAX_ZOOM).abs() < f64::EPSILON);
    }

    #[test]
    fn test_visible_world_rect() {
        let mut camera = Camera::new();
        camera.pan(Vec2::new(-100.0, -50.0));
        camera.zoom = 2.0;
        let visible = camera.visible_world_rect(Size::new(800.0, 600.0));
        // Offset is applied after scaling, so the pan divides by zoom too.
        assert!((visible.x0 - 50.0).abs() < 1e-10);
        assert!((visible.y0 - 25.0).abs() < 1e-10);
        assert!((visible.width() - 400.0).abs() < 1e-10);
        assert!((visible.height() - 300.0).abs() < 1e-10);
    }

    #[test]
    fn test_center_on() {
        let mut camera = Camera::new();
        camera.zoom = 2.0;
        camera.center_on(Point::new(10.0, 10.0), Size::new(100.0, 100.0));
        let middle = camera.world_to_screen(Point::new(10.0, 10.0));
        assert!((middle.x - 50.0).abs() < 1e-10);
        assert!((middle.y - 50.0).abs() < 1e-10);
    }
}
