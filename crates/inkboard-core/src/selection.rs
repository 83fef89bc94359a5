//! Selection set, transform handles and batch edits on the selection.
//!
//! The manager holds only ids; the selection box and bounding box are
//! derived from the store after every selection-affecting call. Every edit
//! goes through [`ElementStore`], so lock filtering and history apply.

use crate::clipboard::{ClipboardBackend, MemoryClipboard};
use crate::config::{DEFAULT_ROTATE_HANDLE_OFFSET, EngineConfig};
use crate::element::{Element, ElementId, ElementPatch, GroupId};
use crate::events::EngineEvent;
use crate::geometry::{polyline_intersects_rect, rects_overlap, rotate_point, union_bounds};
use crate::shapes::{Direction, Shape};
use crate::store::ElementStore;
use crate::tools::{ToolActivator, ToolManager};
use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use uuid::Uuid;

/// Corner positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// The resize direction dragging this corner implies.
    pub fn direction(self) -> Direction {
        match self {
            Corner::TopLeft => Direction::NW,
            Corner::TopRight => Direction::NE,
            Corner::BottomLeft => Direction::SW,
            Corner::BottomRight => Direction::SE,
        }
    }
}

/// Type of bounding-box handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandleKind {
    Corner(Corner),
    /// Rotation handle above the top edge.
    Rotate,
}

/// A handle with its position in world coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Handle {
    pub position: Point,
    pub kind: HandleKind,
}

impl Handle {
    pub fn new(position: Point, kind: HandleKind) -> Self {
        Self { position, kind }
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.position.distance(point) <= tolerance
    }
}

/// Transform gizmo around the selection.
///
/// For a single element, `bounds` are the element's local bounds and
/// `rotation` its rotation; the handles are placed on the rotated box.
/// For several elements, `bounds` are their combined screen bounds and
/// `rotation` is zero.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundingBox {
    pub bounds: Rect,
    pub rotation: f64,
    pub handles: Vec<Handle>,
}

impl BoundingBox {
    pub fn new(bounds: Rect, rotation: f64, rotate_handle_offset: f64) -> Self {
        let center = bounds.center();
        let place = |x: f64, y: f64| rotate_point(Point::new(x, y), center, rotation);
        let handles = vec![
            Handle::new(place(bounds.x0, bounds.y0), HandleKind::Corner(Corner::TopLeft)),
            Handle::new(place(bounds.x1, bounds.y0), HandleKind::Corner(Corner::TopRight)),
            Handle::new(place(bounds.x0, bounds.y1), HandleKind::Corner(Corner::BottomLeft)),
            Handle::new(place(bounds.x1, bounds.y1), HandleKind::Corner(Corner::BottomRight)),
            Handle::new(
                place(center.x, bounds.y0 - rotate_handle_offset),
                HandleKind::Rotate,
            ),
        ];
        Self {
            bounds,
            rotation,
            handles,
        }
    }

    pub fn center(&self) -> Point {
        self.bounds.center()
    }

    pub fn rotate_handle(&self) -> Option<&Handle> {
        self.handles.iter().find(|h| h.kind == HandleKind::Rotate)
    }

    /// The first handle within `tolerance` of `point`.
    pub fn hit_test_handles(&self, point: Point, tolerance: f64) -> Option<HandleKind> {
        self.handles
            .iter()
            .find(|h| h.hit_test(point, tolerance))
            .map(|h| h.kind)
    }
}

/// Edge or axis to align the selection on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlignType {
    Left,
    /// Horizontal centers.
    Center,
    Right,
    Top,
    /// Vertical centers.
    Middle,
    Bottom,
}

/// Axis along which to distribute or flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

/// Holds the selected ids and the collaborators selection edits need.
pub struct SelectionManager {
    selected: HashSet<ElementId>,
    marquee_origin: Option<Point>,
    selection_box: Option<Rect>,
    bounding_box: Option<BoundingBox>,
    rotate_handle_offset: f64,
    clipboard: Box<dyn ClipboardBackend>,
    tools: Box<dyn ToolActivator>,
}

impl fmt::Debug for SelectionManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectionManager")
            .field("selected", &self.selected)
            .field("selection_box", &self.selection_box)
            .field("bounding_box", &self.bounding_box)
            .finish_non_exhaustive()
    }
}

impl Default for SelectionManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionManager {
    /// Selection with an in-memory clipboard and a [`ToolManager`].
    pub fn new() -> Self {
        Self::with_backends(Box::new(MemoryClipboard::new()), Box::new(ToolManager::new()))
    }

    pub fn with_backends(
        clipboard: Box<dyn ClipboardBackend>,
        tools: Box<dyn ToolActivator>,
    ) -> Self {
        Self {
            selected: HashSet::new(),
            marquee_origin: None,
            selection_box: None,
            bounding_box: None,
            rotate_handle_offset: DEFAULT_ROTATE_HANDLE_OFFSET,
            clipboard,
            tools,
        }
    }

    pub fn with_config(
        config: &EngineConfig,
        clipboard: Box<dyn ClipboardBackend>,
        tools: Box<dyn ToolActivator>,
    ) -> Self {
        Self {
            rotate_handle_offset: config.rotate_handle_offset,
            ..Self::with_backends(clipboard, tools)
        }
    }

    pub fn clipboard(&self) -> &dyn ClipboardBackend {
        self.clipboard.as_ref()
    }

    pub fn clipboard_mut(&mut self) -> &mut dyn ClipboardBackend {
        self.clipboard.as_mut()
    }

    pub fn tools(&self) -> &dyn ToolActivator {
        self.tools.as_ref()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn is_selected(&self, id: ElementId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected ids in store order.
    pub fn selected_ids(&self, store: &ElementStore) -> Vec<ElementId> {
        self.selected_elements(store).iter().map(|el| el.id()).collect()
    }

    /// Selected elements in store order.
    pub fn selected_elements<'a>(&self, store: &'a ElementStore) -> Vec<&'a Element> {
        store
            .elements()
            .iter()
            .filter(|el| self.selected.contains(&el.id()))
            .collect()
    }

    fn selected_cloned(&self, store: &ElementStore) -> Vec<Element> {
        self.selected_elements(store).into_iter().cloned().collect()
    }

    pub fn selection_box(&self) -> Option<Rect> {
        self.selection_box
    }

    pub fn bounding_box(&self) -> Option<&BoundingBox> {
        self.bounding_box.as_ref()
    }

    // --- Selecting ---

    /// `ids` plus every element sharing a group with one of them.
    /// Unknown ids are dropped.
    pub fn expand_groups(store: &ElementStore, ids: &[ElementId]) -> HashSet<ElementId> {
        let named = store.get_elements(ids);
        let groups: HashSet<GroupId> = named.iter().filter_map(|el| el.group_id).collect();
        let mut expanded: HashSet<ElementId> = named.iter().map(|el| el.id()).collect();
        if !groups.is_empty() {
            expanded.extend(
                store
                    .elements()
                    .iter()
                    .filter(|el| el.group_id.is_some_and(|g| groups.contains(&g)))
                    .map(|el| el.id()),
            );
        }
        expanded
    }

    /// Select elements (and their groups). Replaces the selection unless
    /// `append` is set. A non-empty result activates the select tool.
    pub fn select_elements(&mut self, store: &mut ElementStore, ids: &[ElementId], append: bool) {
        let expanded = Self::expand_groups(store, ids);
        if append {
            self.selected.extend(expanded);
        } else {
            self.selected = expanded;
        }
        self.selection_changed(store);
        if !self.selected.is_empty() {
            self.tools.activate_select_tool();
        }
    }

    pub fn deselect_elements(&mut self, store: &mut ElementStore, ids: &[ElementId]) {
        for id in Self::expand_groups(store, ids) {
            self.selected.remove(&id);
        }
        self.selection_changed(store);
    }

    /// Flip the selection state of each id together with its group.
    pub fn toggle_elements(&mut self, store: &mut ElementStore, ids: &[ElementId]) {
        for &id in ids {
            let group = Self::expand_groups(store, &[id]);
            if self.selected.contains(&id) {
                for member in group {
                    self.selected.remove(&member);
                }
            } else {
                self.selected.extend(group);
            }
        }
        self.selection_changed(store);
        if !self.selected.is_empty() {
            self.tools.activate_select_tool();
        }
    }

    /// Select every editable element.
    pub fn select_all(&mut self, store: &mut ElementStore) {
        let ids: Vec<ElementId> = store.editable_elements().iter().map(|el| el.id()).collect();
        self.select_elements(store, &ids, false);
    }

    pub fn clear_selection(&mut self, store: &mut ElementStore) {
        if self.selected.is_empty() {
            return;
        }
        self.selected.clear();
        self.selection_changed(store);
    }

    fn selection_changed(&mut self, store: &mut ElementStore) {
        self.refresh(store);
        let selected = self.selected_cloned(store);
        store.emit(EngineEvent::ElementsSelected(selected));
    }

    /// Drop ids no longer in the store and recompute the bounding box.
    pub fn refresh(&mut self, store: &ElementStore) {
        self.selected.retain(|&id| store.get_element(id).is_some());
        self.bounding_box = self.compute_bounding_box(store);
    }

    fn compute_bounding_box(&self, store: &ElementStore) -> Option<BoundingBox> {
        let selected = self.selected_elements(store);
        match selected.as_slice() {
            [] => None,
            [only] => Some(BoundingBox::new(
                only.bounds(),
                only.rotation,
                self.rotate_handle_offset,
            )),
            many => {
                let bounds = union_bounds(many.iter().map(|el| el.screen_bounds()))?;
                Some(BoundingBox::new(bounds, 0.0, self.rotate_handle_offset))
            }
        }
    }

    /// Which bounding-box handle, if any, lies under `point`.
    pub fn hit_test_handles(&self, point: Point, tolerance: f64) -> Option<HandleKind> {
        self.bounding_box
            .as_ref()
            .and_then(|bbox| bbox.hit_test_handles(point, tolerance))
    }

    // --- Marquee ---

    pub fn begin_selection_box(&mut self, origin: Point) {
        self.marquee_origin = Some(origin);
        self.selection_box = Some(Rect::from_points(origin, origin));
    }

    pub fn update_selection_box(&mut self, current: Point) {
        if let Some(origin) = self.marquee_origin {
            self.selection_box = Some(Rect::from_points(origin, current));
        }
    }

    pub fn cancel_selection_box(&mut self) {
        self.marquee_origin = None;
        self.selection_box = None;
    }

    /// Select the editable elements touched by the selection box and
    /// remove the box. Returns the ids selected by the box.
    pub fn finish_selection_box(
        &mut self,
        store: &mut ElementStore,
        append: bool,
    ) -> Vec<ElementId> {
        let Some(area) = self.selection_box.take() else {
            return Vec::new();
        };
        self.marquee_origin = None;
        let ids: Vec<ElementId> = store
            .editable_elements()
            .into_iter()
            .filter(|el| element_intersects_rect(el, area))
            .map(|el| el.id())
            .collect();
        if ids.is_empty() && !append {
            self.clear_selection(store);
        } else {
            self.select_elements(store, &ids, append);
        }
        ids
    }

    // --- Transforms ---

    fn apply(&mut self, store: &mut ElementStore, next: Vec<Element>) -> Vec<Element> {
        let patches = next.iter().map(ElementPatch::replace).collect();
        let updated = store.update_elements(patches, false);
        self.refresh(store);
        updated
    }

    pub fn move_selected(&mut self, store: &mut ElementStore, delta: Vec2) -> Vec<Element> {
        let next = self
            .selected_elements(store)
            .iter()
            .map(|el| el.translated(delta))
            .collect();
        self.apply(store, next)
    }

    pub fn resize_selected(
        &mut self,
        store: &mut ElementStore,
        direction: Direction,
        dx: f64,
        dy: f64,
    ) -> Vec<Element> {
        let next = self
            .selected_elements(store)
            .iter()
            .map(|el| el.resize(direction, dx, dy))
            .collect();
        self.apply(store, next)
    }

    /// Rotate by `angle` radians. Several elements also orbit the center
    /// of the selection.
    pub fn rotate_selected(&mut self, store: &mut ElementStore, angle: f64) -> Vec<Element> {
        let selected = self.selected_elements(store);
        let pivot = match selected.as_slice() {
            [] => return Vec::new(),
            [_] => None,
            many => union_bounds(many.iter().map(|el| el.screen_bounds())).map(|b| b.center()),
        };
        let next = selected
            .iter()
            .map(|el| {
                let mut rotated = match pivot {
                    Some(pivot) => {
                        let center = el.center();
                        el.translated(rotate_point(center, pivot, angle) - center)
                    }
                    None => (*el).clone(),
                };
                rotated.rotation += angle;
                rotated
            })
            .collect();
        self.apply(store, next)
    }

    /// Mirror the selection around the center of its combined bounds.
    pub fn flip_selected(&mut self, store: &mut ElementStore, axis: Axis) -> Vec<Element> {
        let selected = self.selected_elements(store);
        let Some(bounds) = union_bounds(selected.iter().map(|el| el.screen_bounds())) else {
            return Vec::new();
        };
        let center = bounds.center().to_vec2();
        let mirror = match axis {
            Axis::Horizontal => Affine::scale_non_uniform(-1.0, 1.0),
            Axis::Vertical => Affine::scale_non_uniform(1.0, -1.0),
        };
        let flip = Affine::translate(center) * mirror * Affine::translate(-center);
        let next = selected
            .iter()
            .map(|el| {
                let mut flipped = el.transformed(flip);
                flipped.rotation = -el.rotation;
                flipped
            })
            .collect();
        self.apply(store, next)
    }

    /// Align the selection. A single element aligns to `viewport`; several
    /// align to their combined bounds.
    pub fn align_elements(
        &mut self,
        store: &mut ElementStore,
        align: AlignType,
        viewport: Rect,
    ) -> Vec<Element> {
        let selected = self.selected_elements(store);
        let reference = match selected.as_slice() {
            [] => return Vec::new(),
            [_] => viewport,
            many => match union_bounds(many.iter().map(|el| el.screen_bounds())) {
                Some(bounds) => bounds,
                None => return Vec::new(),
            },
        };
        let next = selected
            .iter()
            .map(|el| {
                let b = el.screen_bounds();
                let delta = match align {
                    AlignType::Left => Vec2::new(reference.x0 - b.x0, 0.0),
                    AlignType::Center => Vec2::new(reference.center().x - b.center().x, 0.0),
                    AlignType::Right => Vec2::new(reference.x1 - b.x1, 0.0),
                    AlignType::Top => Vec2::new(0.0, reference.y0 - b.y0),
                    AlignType::Middle => Vec2::new(0.0, reference.center().y - b.center().y),
                    AlignType::Bottom => Vec2::new(0.0, reference.y1 - b.y1),
                };
                el.translated(delta)
            })
            .collect();
        self.apply(store, next)
    }

    /// Space the selection evenly along `axis`. Needs at least three
    /// elements; the two outermost stay in place.
    pub fn distribute_elements(&mut self, store: &mut ElementStore, axis: Axis) -> Vec<Element> {
        let mut selected = self.selected_elements(store);
        if selected.len() < 3 {
            log::warn!("Distribute needs at least 3 elements, got {}", selected.len());
            return Vec::new();
        }
        let span = |b: Rect| match axis {
            Axis::Horizontal => (b.x0, b.x1),
            Axis::Vertical => (b.y0, b.y1),
        };
        selected.sort_by(|a, b| span(a.screen_bounds()).0.total_cmp(&span(b.screen_bounds()).0));

        let count = selected.len();
        let start = span(selected[0].screen_bounds()).0;
        let end = span(selected[count - 1].screen_bounds()).1;
        let extent: f64 = selected
            .iter()
            .map(|el| {
                let (lo, hi) = span(el.screen_bounds());
                hi - lo
            })
            .sum();
        let gap = (end - start - extent) / (count - 1) as f64;

        let mut cursor = span(selected[0].screen_bounds()).1 + gap;
        let mut next = Vec::with_capacity(count - 2);
        for el in &selected[1..count - 1] {
            let (lo, hi) = span(el.screen_bounds());
            let shift = cursor - lo;
            let delta = match axis {
                Axis::Horizontal => Vec2::new(shift, 0.0),
                Axis::Vertical => Vec2::new(0.0, shift),
            };
            next.push(el.translated(delta));
            cursor += hi - lo + gap;
        }
        self.apply(store, next)
    }

    // --- Z-order ---

    pub fn bring_to_front(&mut self, store: &mut ElementStore) -> Vec<Element> {
        let ids = self.selected_ids(store);
        store.bring_to_front(&ids)
    }

    pub fn send_to_back(&mut self, store: &mut ElementStore) -> Vec<Element> {
        let ids = self.selected_ids(store);
        store.send_to_back(&ids)
    }

    /// Move each selected element one step up past its nearest unselected
    /// neighbor. Selected elements keep their order relative to each other.
    pub fn bring_forward(&mut self, store: &mut ElementStore) -> Vec<Element> {
        self.shift_z(store, true)
    }

    /// Move each selected element one step down past its nearest
    /// unselected neighbor.
    pub fn send_backward(&mut self, store: &mut ElementStore) -> Vec<Element> {
        self.shift_z(store, false)
    }

    fn shift_z(&mut self, store: &mut ElementStore, forward: bool) -> Vec<Element> {
        if self.selected.is_empty() {
            return Vec::new();
        }
        // Locked elements keep their slot and are never swapped.
        let mut ranked: Vec<(ElementId, i64)> = store
            .elements()
            .iter()
            .filter(|el| !store.is_element_locked(el.id()))
            .map(|el| (el.id(), el.z_index.unwrap_or(0)))
            .collect();
        ranked.sort_by_key(|&(_, z)| z);
        let z_values: Vec<i64> = ranked.iter().map(|&(_, z)| z).collect();
        let mut order: Vec<ElementId> = ranked.into_iter().map(|(id, _)| id).collect();

        let len = order.len();
        if forward {
            for i in (0..len.saturating_sub(1)).rev() {
                if self.selected.contains(&order[i]) && !self.selected.contains(&order[i + 1]) {
                    order.swap(i, i + 1);
                }
            }
        } else {
            for i in 1..len {
                if self.selected.contains(&order[i]) && !self.selected.contains(&order[i - 1]) {
                    order.swap(i, i - 1);
                }
            }
        }

        let patches: Vec<ElementPatch> = order
            .iter()
            .zip(&z_values)
            .filter(|&(id, &z)| {
                store
                    .get_element(*id)
                    .is_some_and(|el| el.z_index != Some(z))
            })
            .map(|(&id, &z)| ElementPatch::new(id).z_index(z))
            .collect();
        store.update_elements(patches, false)
    }

    // --- Groups and locks ---

    /// Put every selected element in one new group. Needs at least two.
    pub fn group_selected_elements(&mut self, store: &mut ElementStore) -> Option<GroupId> {
        let members: Vec<ElementId> = self
            .selected_ids(store)
            .into_iter()
            .filter(|&id| !store.is_element_locked(id))
            .collect();
        if members.len() < 2 {
            log::warn!("Grouping needs at least 2 unlocked selected elements");
            return None;
        }
        let group_id = Uuid::new_v4();
        let patches = members
            .into_iter()
            .map(|id| ElementPatch::new(id).group(Some(group_id)))
            .collect();
        let updated = store.update_elements(patches, false);
        self.refresh(store);
        if updated.is_empty() { None } else { Some(group_id) }
    }

    /// Dissolve every group the selection touches, including members that
    /// are not selected.
    pub fn ungroup_selected_elements(&mut self, store: &mut ElementStore) -> Vec<Element> {
        let groups: HashSet<GroupId> = self
            .selected_elements(store)
            .iter()
            .filter_map(|el| el.group_id)
            .collect();
        if groups.is_empty() {
            return Vec::new();
        }
        let patches = store
            .elements()
            .iter()
            .filter(|el| el.group_id.is_some_and(|g| groups.contains(&g)))
            .map(|el| ElementPatch::new(el.id()).group(None))
            .collect();
        let updated = store.update_elements(patches, false);
        self.refresh(store);
        updated
    }

    pub fn lock_selected(
        &mut self,
        store: &mut ElementStore,
        reason: Option<&str>,
    ) -> Vec<Element> {
        let ids = self.selected_ids(store);
        store.lock_elements(&ids, reason)
    }

    pub fn unlock_selected(&mut self, store: &mut ElementStore) -> Vec<Element> {
        let ids = self.selected_ids(store);
        store.unlock_elements(&ids)
    }

    pub fn delete_selected(&mut self, store: &mut ElementStore) -> Vec<Element> {
        let ids = self.selected_ids(store);
        let removed = store.remove_elements_by_ids(&ids, false);
        self.selection_changed(store);
        removed
    }

    // --- Clipboard ---

    pub fn copy_elements(&mut self, store: &ElementStore) -> usize {
        let selected = self.selected_cloned(store);
        self.clipboard.copy(&selected);
        selected.len()
    }

    /// Copy the selection, then remove whatever the locks allow.
    pub fn cut_elements(&mut self, store: &mut ElementStore) -> Vec<Element> {
        let selected = self.selected_cloned(store);
        if selected.is_empty() {
            return Vec::new();
        }
        self.clipboard.cut(&selected);
        let ids: Vec<ElementId> = selected.iter().map(Element::id).collect();
        let removed = store.remove_elements_by_ids(&ids, false);
        self.selection_changed(store);
        removed
    }

    /// Add the clipboard contents to the store and select them.
    pub fn paste_elements(&mut self, store: &mut ElementStore) -> Vec<Element> {
        let pasted = self.clipboard.paste();
        self.add_and_select(store, pasted)
    }

    /// Duplicate the selection, offset by `dx`/`dy` or the clipboard default.
    pub fn duplicate_elements(
        &mut self,
        store: &mut ElementStore,
        dx: Option<f64>,
        dy: Option<f64>,
    ) -> Vec<Element> {
        let selected = self.selected_cloned(store);
        let copies = self.clipboard.duplicate_elements(&selected, dx, dy);
        self.add_and_select(store, copies)
    }

    fn add_and_select(&mut self, store: &mut ElementStore, elements: Vec<Element>) -> Vec<Element> {
        if elements.is_empty() {
            return elements;
        }
        let added = store.add_elements(elements);
        let ids: Vec<ElementId> = added.iter().map(Element::id).collect();
        self.select_elements(store, &ids, false);
        added
    }
}

/// Marquee test: strokes are tested segment by segment, other shapes by
/// their screen bounds.
fn element_intersects_rect(element: &Element, area: Rect) -> bool {
    if element.rotation.abs() < f64::EPSILON {
        match &element.shape {
            Shape::Pen(pen) => return polyline_intersects_rect(&pen.points, area),
            Shape::Line(line) => return polyline_intersects_rect(&[line.start, line.end], area),
            Shape::Arrow(arrow) => return polyline_intersects_rect(&[arrow.start, arrow.end], area),
            _ => {}
        }
    }
    rects_overlap(element.screen_bounds(), area)
}
