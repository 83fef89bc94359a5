//! Elements: a shape plus the metadata every drawable carries.

use crate::geometry::{rotate_point, rotated_bounds};
use crate::layers::LayerId;
use crate::shapes::{
    Arrow, Direction, Ellipse, Image, Line, Pen, Rectangle, Shape, ShapeKind, ShapeStyle, Text,
};
use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
pub type ElementId = Uuid;
/// Identifier shared by all members of a group.
pub type GroupId = Uuid;

/// A drawable element.
///
/// Geometry lives in [`Shape`]; the element adds identity, rotation,
/// opacity, style and the store-managed `z_index`, `layer_id`,
/// `group_id` and `locked` fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub(crate) id: ElementId,
    pub shape: Shape,
    /// Rotation angle in radians (around the bounds center).
    #[serde(default)]
    pub rotation: f64,
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    #[serde(default)]
    pub style: ShapeStyle,
    #[serde(default)]
    pub z_index: Option<i64>,
    #[serde(default)]
    pub layer_id: Option<LayerId>,
    #[serde(default)]
    pub group_id: Option<GroupId>,
    #[serde(default)]
    pub locked: Option<bool>,
}

fn default_opacity() -> f64 {
    1.0
}

impl Element {
    /// Create an element with a fresh id and default metadata.
    pub fn new(shape: Shape) -> Self {
        Self {
            id: Uuid::new_v4(),
            shape,
            rotation: 0.0,
            opacity: 1.0,
            style: ShapeStyle::default(),
            z_index: None,
            layer_id: None,
            group_id: None,
            locked: None,
        }
    }

    pub fn rectangle(rect: Rectangle) -> Self {
        Self::new(Shape::Rectangle(rect))
    }

    pub fn ellipse(ellipse: Ellipse) -> Self {
        Self::new(Shape::Ellipse(ellipse))
    }

    pub fn line(line: Line) -> Self {
        Self::new(Shape::Line(line))
    }

    pub fn arrow(arrow: Arrow) -> Self {
        Self::new(Shape::Arrow(arrow))
    }

    pub fn pen(pen: Pen) -> Self {
        Self::new(Shape::Pen(pen))
    }

    pub fn image(image: Image) -> Self {
        Self::new(Shape::Image(image))
    }

    pub fn text(text: Text) -> Self {
        Self::new(Shape::Text(text))
    }

    pub fn with_style(mut self, style: ShapeStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_z_index(mut self, z_index: i64) -> Self {
        self.z_index = Some(z_index);
        self
    }

    pub fn with_layer(mut self, layer_id: LayerId) -> Self {
        self.layer_id = Some(layer_id);
        self
    }

    pub fn with_group(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn with_locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn kind(&self) -> ShapeKind {
        self.shape.kind()
    }

    /// Whether the element's own lock flag is set.
    pub fn is_locked(&self) -> bool {
        self.locked.unwrap_or(false)
    }

    /// Top-left corner of the local bounds.
    pub fn position(&self) -> Point {
        self.bounds().origin()
    }

    /// Bounds in local (unrotated) space.
    pub fn bounds(&self) -> Rect {
        self.shape.bounds()
    }

    /// Axis-aligned bounds after applying the element's rotation.
    pub fn screen_bounds(&self) -> Rect {
        rotated_bounds(self.bounds(), self.rotation)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Hit-test a world point, accounting for rotation.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        let local = if self.rotation.abs() < f64::EPSILON {
            point
        } else {
            rotate_point(point, self.center(), -self.rotation)
        };
        self.shape.hit_test(local, tolerance)
    }

    /// Return a resized copy.
    pub fn resize(&self, direction: Direction, dx: f64, dy: f64) -> Element {
        Element {
            shape: self.shape.resize(direction, dx, dy),
            ..self.clone()
        }
    }

    /// Return a copy moved by `delta`.
    pub fn translated(&self, delta: Vec2) -> Element {
        self.transformed(Affine::translate(delta))
    }

    /// Return a copy with `affine` applied to the geometry.
    pub fn transformed(&self, affine: Affine) -> Element {
        let mut shape = self.shape.clone();
        shape.transform(affine);
        Element {
            shape,
            ..self.clone()
        }
    }

    /// Replace the id with a fresh one (used when duplicating).
    pub(crate) fn regenerate_id(&mut self) {
        self.id = Uuid::new_v4();
    }
}

/// A partial update to an existing element.
///
/// `None` fields are left unchanged. Fields that are themselves optional on
/// [`Element`] use a nested `Option` so they can be cleared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ElementPatch {
    pub id: ElementId,
    pub shape: Option<Shape>,
    pub rotation: Option<f64>,
    pub opacity: Option<f64>,
    pub style: Option<ShapeStyle>,
    pub z_index: Option<i64>,
    pub layer_id: Option<Option<LayerId>>,
    pub group_id: Option<Option<GroupId>>,
    pub locked: Option<bool>,
}

impl ElementPatch {
    pub fn new(id: ElementId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    /// A patch that overwrites every mutable field with `element`'s values.
    ///
    /// The lock flag is only carried when it differs from `None`, so
    /// submitting a transformed copy of a locked element is still an
    /// ordinary edit.
    pub fn replace(element: &Element) -> Self {
        Self {
            id: element.id,
            shape: Some(element.shape.clone()),
            rotation: Some(element.rotation),
            opacity: Some(element.opacity),
            style: Some(element.style.clone()),
            z_index: element.z_index,
            layer_id: Some(element.layer_id),
            group_id: Some(element.group_id),
            locked: None,
        }
    }

    pub fn shape(mut self, shape: Shape) -> Self {
        self.shape = Some(shape);
        self
    }

    pub fn rotation(mut self, rotation: f64) -> Self {
        self.rotation = Some(rotation);
        self
    }

    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn style(mut self, style: ShapeStyle) -> Self {
        self.style = Some(style);
        self
    }

    pub fn z_index(mut self, z_index: i64) -> Self {
        self.z_index = Some(z_index);
        self
    }

    pub fn layer(mut self, layer_id: Option<LayerId>) -> Self {
        self.layer_id = Some(layer_id);
        self
    }

    pub fn group(mut self, group_id: Option<GroupId>) -> Self {
        self.group_id = Some(group_id);
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    /// Whether this patch is a lock/unlock operation.
    pub fn touches_lock(&self) -> bool {
        self.locked.is_some()
    }

    /// Shallow-merge the patch over `element`.
    pub fn apply(&self, element: &Element) -> Element {
        let mut next = element.clone();
        if let Some(shape) = &self.shape {
            next.shape = shape.clone();
        }
        if let Some(rotation) = self.rotation {
            next.rotation = rotation;
        }
        if let Some(opacity) = self.opacity {
            next.opacity = opacity.clamp(0.0, 1.0);
        }
        if let Some(style) = &self.style {
            next.style = style.clone();
        }
        if let Some(z_index) = self.z_index {
            next.z_index = Some(z_index);
        }
        if let Some(layer_id) = self.layer_id {
            next.layer_id = layer_id;
        }
        if let Some(group_id) = self.group_id {
            next.group_id = group_id;
        }
        if let Some(locked) = self.locked {
            next.locked = Some(locked);
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Rgba;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Element {
        Element::rectangle(Rectangle::new(Point::new(x, y), w, h))
    }

    #[test]
    fn test_fresh_ids() {
        let a = rect(0.0, 0.0, 10.0, 10.0);
        let b = rect(0.0, 0.0, 10.0, 10.0);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_resize_is_copy_on_write() {
        let el = rect(50.0, 50.0, 100.0, 100.0);
        let resized = el.resize(Direction::N, 0.0, -10.0);
        assert_eq!(resized.id(), el.id());
        assert!((resized.position().y - 40.0).abs() < f64::EPSILON);
        assert!((resized.bounds().height() - 110.0).abs() < f64::EPSILON);
        assert!((el.position().y - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_screen_bounds_account_for_rotation() {
        let el = rect(0.0, 0.0, 20.0, 10.0).with_rotation(std::f64::consts::FRAC_PI_2);
        let b = el.screen_bounds();
        assert!((b.width() - 10.0).abs() < 1e-9);
        assert!((b.height() - 20.0).abs() < 1e-9);
        assert_eq!(el.bounds(), Rect::new(0.0, 0.0, 20.0, 10.0));
    }

    #[test]
    fn test_rotated_hit_test() {
        let el = rect(0.0, 0.0, 100.0, 10.0).with_rotation(std::f64::consts::FRAC_PI_2);
        // After a quarter turn the bar is vertical around (50, 5).
        assert!(el.hit_test(Point::new(50.0, 40.0), 0.0));
        assert!(!el.hit_test(Point::new(90.0, 5.0), 0.0));
    }

    #[test]
    fn test_translated() {
        let el = rect(0.0, 0.0, 10.0, 10.0);
        let moved = el.translated(Vec2::new(5.0, -5.0));
        assert_eq!(moved.position(), Point::new(5.0, -5.0));
    }

    #[test]
    fn test_patch_merges_only_set_fields() {
        let el = rect(0.0, 0.0, 10.0, 10.0).with_z_index(3);
        let group = Uuid::new_v4();
        let next = ElementPatch::new(el.id()).opacity(0.5).group(Some(group)).apply(&el);
        assert!((next.opacity - 0.5).abs() < f64::EPSILON);
        assert_eq!(next.group_id, Some(group));
        assert_eq!(next.z_index, Some(3));
        assert_eq!(next.shape, el.shape);

        let cleared = ElementPatch::new(el.id()).group(None).apply(&next);
        assert_eq!(cleared.group_id, None);
    }

    #[test]
    fn test_style_merges_over_default() {
        let red = Rgba(0xff00_00ff);
        let el = rect(0.0, 0.0, 10.0, 10.0).with_style(ShapeStyle {
            fill_color: Some(red),
            ..ShapeStyle::default()
        });
        assert_eq!(el.style.stroke_color, Rgba::BLACK);
        assert_eq!(el.style.fill_color, Some(red));

        let mut value = serde_json::to_value(rect(0.0, 0.0, 1.0, 1.0)).unwrap();
        value["style"] = serde_json::json!({ "stroke_width": 6.0 });
        let loaded: Element = serde_json::from_value(value).unwrap();
        assert!((loaded.style.stroke_width - 6.0).abs() < f64::EPSILON);
        assert_eq!(loaded.style.stroke_color, Rgba::BLACK);

        let restyled = ElementPatch::new(el.id()).style(ShapeStyle::default()).apply(&el);
        assert_eq!(restyled.style, ShapeStyle::default());
    }

    #[test]
    fn test_touches_lock() {
        let id = Uuid::new_v4();
        assert!(ElementPatch::new(id).locked(true).touches_lock());
        assert!(!ElementPatch::new(id).rotation(1.0).touches_lock());
    }

    #[test]
    fn test_serde_round_trip_keeps_points() {
        let el = Element::pen(Pen::from_points(vec![Point::new(1.0, 2.0), Point::new(3.0, 4.0)]));
        let json = serde_json::to_string(&el).unwrap();
        let back: Element = serde_json::from_str(&json).unwrap();
        assert_eq!(back, el);
    }
}
