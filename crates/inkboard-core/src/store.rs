//! The canonical element collection.
//!
//! The store owns persistent and draft elements, hands out z-indices,
//! enforces element and layer locks, and reports every persistent change to
//! [`History`] and the [`EventBus`].

use crate::config::EngineConfig;
use crate::element::{Element, ElementId, ElementPatch};
use crate::events::{EngineEvent, EventBus, EventListener, ListenerId};
use crate::geometry::{rects_overlap, union_bounds};
use crate::history::{Batch, History, now_millis};
use crate::layers::{LayerId, LayerManager};
use crate::shapes::ShapeKind;
use kurbo::{Point, Rect};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Audit record kept for each locked element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockInfo {
    /// Milliseconds since the Unix epoch.
    pub locked_at: u64,
    pub reason: Option<String>,
}

/// Everything needed to roll the store back outside of undo/redo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSnapshot {
    pub elements: Vec<Element>,
    pub drafts: Vec<Element>,
    pub max_z_index: i64,
}

/// Criteria for [`ElementStore::search`]. Unset criteria match everything;
/// set criteria are ANDed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    pub kind: Option<ShapeKind>,
    pub layer_id: Option<LayerId>,
    pub locked: Option<bool>,
    /// Case-insensitive substring of the element's text content.
    pub text: Option<String>,
    /// Inclusive z-index range.
    pub z_range: Option<(i64, i64)>,
    pub bounds: Option<Rect>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: ShapeKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn layer(mut self, layer_id: LayerId) -> Self {
        self.layer_id = Some(layer_id);
        self
    }

    pub fn locked(mut self, locked: bool) -> Self {
        self.locked = Some(locked);
        self
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn z_range(mut self, min: i64, max: i64) -> Self {
        self.z_range = Some((min, max));
        self
    }

    pub fn bounds(mut self, bounds: Rect) -> Self {
        self.bounds = Some(bounds);
        self
    }
}

/// Owns the elements together with the layer manager, history and event bus.
#[derive(Debug)]
pub struct ElementStore {
    elements: Vec<Element>,
    drafts: Vec<Element>,
    max_z_index: i64,
    lock_info: HashMap<ElementId, LockInfo>,
    layers: LayerManager,
    history: History,
    events: EventBus,
    default_element_size: f64,
}

impl Default for ElementStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ElementStore {
    pub fn new() -> Self {
        Self::with_config(&EngineConfig::default())
    }

    pub fn with_config(config: &EngineConfig) -> Self {
        Self {
            elements: Vec::new(),
            drafts: Vec::new(),
            max_z_index: 0,
            lock_info: HashMap::new(),
            layers: LayerManager::new(),
            history: History::with_limit(config.history_limit),
            events: EventBus::new(),
            default_element_size: config.default_element_size,
        }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn drafts(&self) -> &[Element] {
        &self.drafts
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn layers(&self) -> &LayerManager {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut LayerManager {
        &mut self.layers
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    pub fn subscribe(&mut self, listener: impl EventListener + 'static) -> ListenerId {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    pub(crate) fn emit(&mut self, event: EngineEvent) {
        self.events.emit(event);
    }

    fn emit_data_changed(&mut self) {
        let all = self.elements.clone();
        self.events.emit(EngineEvent::DataChanged(all));
    }

    // --- Z-index ---

    pub fn max_z_index(&self) -> i64 {
        self.max_z_index
    }

    /// Advance the counter and return the new value. Every call yields a
    /// larger value than the last.
    pub fn get_next_z_index(&mut self) -> i64 {
        self.max_z_index += 1;
        self.max_z_index
    }

    fn raise_max_z(&mut self, z_index: Option<i64>) {
        if let Some(z) = z_index {
            self.max_z_index = self.max_z_index.max(z);
        }
    }

    /// Fill in a missing z-index and, when requested, the active layer.
    fn prepare(&mut self, mut element: Element, assign_layer: bool) -> Element {
        match element.z_index {
            Some(z) => self.max_z_index = self.max_z_index.max(z),
            None => element.z_index = Some(self.get_next_z_index()),
        }
        if assign_layer && element.layer_id.is_none() {
            element.layer_id = Some(self.layers.active_layer_id());
        }
        element
    }

    fn contains_id(&self, id: ElementId) -> bool {
        self.elements.iter().any(|el| el.id == id) || self.drafts.iter().any(|el| el.id == id)
    }

    // --- Locks ---

    /// Why an edit to `element` is refused, if it is.
    fn rejection(&self, element: &Element, touches_lock: bool) -> Option<&'static str> {
        if element.is_locked() && !touches_lock {
            return Some("element is locked");
        }
        if self.layers.layer_for(element).is_some_and(|layer| layer.locked) {
            return Some("its layer is locked");
        }
        None
    }

    /// Whether the element is locked directly or through its layer.
    pub fn is_element_locked(&self, id: ElementId) -> bool {
        self.get_element(id)
            .is_some_and(|el| self.rejection(el, false).is_some())
    }

    pub fn lock_info(&self, id: ElementId) -> Option<&LockInfo> {
        self.lock_info.get(&id)
    }

    /// Lock elements, recording `reason` in the lock metadata.
    pub fn lock_elements(&mut self, ids: &[ElementId], reason: Option<&str>) -> Vec<Element> {
        let patches = ids.iter().map(|&id| ElementPatch::new(id).locked(true)).collect();
        let locked = self.update_elements(patches, false);
        for el in &locked {
            self.lock_info.insert(
                el.id,
                LockInfo {
                    locked_at: now_millis(),
                    reason: reason.map(str::to_string),
                },
            );
        }
        locked
    }

    pub fn unlock_elements(&mut self, ids: &[ElementId]) -> Vec<Element> {
        let patches = ids.iter().map(|&id| ElementPatch::new(id).locked(false)).collect();
        self.update_elements(patches, false)
    }

    fn sync_lock_info(&mut self, element: &Element) {
        match element.locked {
            Some(true) => {
                self.lock_info.entry(element.id).or_insert_with(|| LockInfo {
                    locked_at: now_millis(),
                    reason: None,
                });
            }
            _ => {
                self.lock_info.remove(&element.id);
            }
        }
    }

    fn sync_layer_membership(&mut self) {
        self.layers.clear_elements();
        for el in &self.elements {
            if let Some(layer_id) = el.layer_id {
                self.layers.attach_element(el.id, layer_id);
            }
        }
    }

    // --- Persistent mutations ---

    /// Add elements. Missing z-indices are allocated, missing layers default
    /// to the active layer. Ids already in the store are skipped.
    pub fn add_elements(&mut self, elements: Vec<Element>) -> Vec<Element> {
        let before = self.elements.clone();
        let mut added = Vec::with_capacity(elements.len());
        for element in elements {
            if self.contains_id(element.id) {
                log::warn!("Element {} already exists; skipping add", element.id);
                continue;
            }
            let element = self.prepare(element, true);
            if let Some(layer_id) = element.layer_id {
                self.layers.attach_element(element.id, layer_id);
            }
            self.sync_lock_info(&element);
            self.elements.push(element.clone());
            added.push(element);
        }
        if added.is_empty() {
            return added;
        }

        let after = self.elements.clone();
        self.history.record_change(before, after, "Add elements");
        self.emit(EngineEvent::ElementsAdded(added.clone()));
        self.emit_data_changed();
        added
    }

    /// Replace every persistent element without recording history.
    /// Ids held by drafts are skipped.
    pub fn set_elements(&mut self, elements: Vec<Element>) {
        let mut seen = HashSet::new();
        let mut kept = Vec::with_capacity(elements.len());
        for element in elements {
            if self.drafts.iter().any(|draft| draft.id == element.id) {
                log::warn!("Element {} is a draft; skipping in set_elements", element.id);
                continue;
            }
            if !seen.insert(element.id) {
                log::warn!("Duplicate element {} in set_elements; keeping the first", element.id);
                continue;
            }
            kept.push(element);
        }
        self.max_z_index = kept.iter().filter_map(|el| el.z_index).max().unwrap_or(0).max(0);
        let next: Vec<Element> = kept
            .into_iter()
            .map(|element| self.prepare(element, false))
            .collect();
        self.elements = next;
        self.lock_info.retain(|id, _| seen.contains(id));
        for el in self.elements.clone() {
            self.sync_lock_info(&el);
        }
        self.sync_layer_membership();
        self.emit_data_changed();
    }

    /// Shallow-merge patches onto existing elements.
    ///
    /// Unknown ids are ignored. Unless `ignore_lock` is set, patches are
    /// skipped for elements that are locked (except lock/unlock patches) and
    /// for elements whose layer is locked. Returns the updated elements.
    pub fn update_elements(
        &mut self,
        patches: Vec<ElementPatch>,
        ignore_lock: bool,
    ) -> Vec<Element> {
        let before = self.elements.clone();
        let mut updated = Vec::new();

        for patch in patches {
            let Some(index) = self.elements.iter().position(|el| el.id == patch.id) else {
                continue;
            };
            let current = &self.elements[index];
            if !ignore_lock {
                if let Some(reason) = self.rejection(current, patch.touches_lock()) {
                    log::warn!("Skipping update of {}: {reason}", current.id);
                    continue;
                }
            }
            let next = patch.apply(current);
            if next == *current {
                continue;
            }

            if next.layer_id != current.layer_id {
                match next.layer_id {
                    Some(layer_id) if self.layers.attach_element(next.id, layer_id) => {}
                    _ => self.layers.unregister_element(next.id),
                }
            }
            self.raise_max_z(next.z_index);
            if patch.touches_lock() {
                self.sync_lock_info(&next);
            }
            self.elements[index] = next.clone();
            updated.push(next);
        }

        if !updated.is_empty() {
            let after = self.elements.clone();
            self.history.record_change(before, after, "Update elements");
            self.emit(EngineEvent::ElementsUpdated(updated.clone()));
            self.emit_data_changed();
        }
        updated
    }

    /// Remove elements by id, with the same lock filtering as updates.
    /// Returns the removed elements.
    pub fn remove_elements_by_ids(&mut self, ids: &[ElementId], ignore_lock: bool) -> Vec<Element> {
        let targets: HashSet<ElementId> = ids.iter().copied().collect();
        let removable: HashSet<ElementId> = self
            .elements
            .iter()
            .filter(|el| targets.contains(&el.id))
            .filter(|el| {
                if ignore_lock {
                    return true;
                }
                match self.rejection(el, false) {
                    Some(reason) => {
                        log::warn!("Skipping removal of {}: {reason}", el.id);
                        false
                    }
                    None => true,
                }
            })
            .map(|el| el.id)
            .collect();
        if removable.is_empty() {
            return Vec::new();
        }

        let before = self.elements.clone();
        let (removed, kept): (Vec<Element>, Vec<Element>) = std::mem::take(&mut self.elements)
            .into_iter()
            .partition(|el| removable.contains(&el.id));
        self.elements = kept;
        for el in &removed {
            self.layers.unregister_element(el.id);
            self.lock_info.remove(&el.id);
        }

        let after = self.elements.clone();
        self.history.record_change(before, after, "Remove elements");
        self.emit(EngineEvent::ElementsRemoved(removed.clone()));
        self.emit_data_changed();
        removed
    }

    /// Remove every persistent element regardless of locks and reset the
    /// z-index counter. Recorded as one history entry.
    pub fn clear(&mut self) {
        let before = std::mem::take(&mut self.elements);
        self.max_z_index = 0;
        self.layers.clear_elements();
        self.lock_info.clear();
        log::debug!("Cleared {} elements", before.len());

        self.history
            .record_change(before.clone(), Vec::new(), "Clear elements");
        if !before.is_empty() {
            self.emit(EngineEvent::ElementsRemoved(before));
        }
        self.emit_data_changed();
    }

    /// Move an element to another layer. Rejected for missing or locked
    /// target layers and for locked elements.
    pub fn assign_element_to_layer(&mut self, element_id: ElementId, layer_id: LayerId) -> bool {
        match self.layers.layer(layer_id) {
            None => {
                log::warn!("Cannot assign {element_id}: layer {layer_id} not found");
                return false;
            }
            Some(layer) if layer.locked => {
                log::warn!("Cannot assign {element_id}: layer '{}' is locked", layer.name);
                return false;
            }
            Some(_) => {}
        }
        if self.get_element(element_id).is_some_and(|el| el.layer_id == Some(layer_id)) {
            return self.layers.assign_element_to_layer(element_id, layer_id);
        }
        let patch = ElementPatch::new(element_id).layer(Some(layer_id));
        !self.update_elements(vec![patch], false).is_empty()
    }

    // --- Z-order ---

    /// Give the elements new z-indices above everything else, keeping
    /// their relative order.
    pub fn bring_to_front(&mut self, ids: &[ElementId]) -> Vec<Element> {
        let targets: Vec<ElementId> = self
            .sorted_by_z(ids)
            .into_iter()
            .filter(|&id| !self.is_element_locked(id))
            .collect();
        let patches = targets
            .into_iter()
            .map(|id| ElementPatch::new(id).z_index(self.get_next_z_index()))
            .collect();
        self.update_elements(patches, false)
    }

    /// Give the elements z-indices below everything else, keeping their
    /// relative order.
    pub fn send_to_back(&mut self, ids: &[ElementId]) -> Vec<Element> {
        let targets = self.sorted_by_z(ids);
        let min_z = self
            .elements
            .iter()
            .map(|el| el.z_index.unwrap_or(0))
            .min()
            .unwrap_or(0);
        let base = min_z - targets.len() as i64;
        let patches = targets
            .into_iter()
            .enumerate()
            .map(|(i, id)| ElementPatch::new(id).z_index(base + i as i64))
            .collect();
        self.update_elements(patches, false)
    }

    fn sorted_by_z(&self, ids: &[ElementId]) -> Vec<ElementId> {
        let mut targets: Vec<&Element> = self.get_elements(ids);
        targets.sort_by_key(|el| el.z_index.unwrap_or(0));
        targets.into_iter().map(|el| el.id).collect()
    }

    /// Reassign dense z-indices 1..=N in current order, ignoring locks.
    pub fn normalize_z_indices(&mut self) -> Vec<Element> {
        let mut order: Vec<(usize, i64)> = self
            .elements
            .iter()
            .enumerate()
            .map(|(i, el)| (i, el.z_index.unwrap_or(0)))
            .collect();
        order.sort_by_key(|&(_, z)| z);
        let patches = order
            .into_iter()
            .enumerate()
            .map(|(rank, (index, _))| {
                ElementPatch::new(self.elements[index].id).z_index(rank as i64 + 1)
            })
            .collect();
        let updated = self.update_elements(patches, true);
        self.max_z_index = self.elements.len() as i64;
        updated
    }

    // --- Drafts ---

    pub fn get_draft_element(&self, id: ElementId) -> Option<&Element> {
        self.drafts.iter().find(|el| el.id == id)
    }

    /// Add in-progress elements. Refused when the active layer is locked.
    pub fn add_draft_elements(&mut self, elements: Vec<Element>) -> Vec<Element> {
        if self.layers.is_active_layer_locked() {
            log::warn!("Cannot add draft elements: active layer is locked");
            return Vec::new();
        }
        let mut added = Vec::with_capacity(elements.len());
        for element in elements {
            if self.contains_id(element.id) {
                log::warn!("Element {} already exists; skipping draft", element.id);
                continue;
            }
            let element = self.prepare(element, true);
            self.drafts.push(element.clone());
            added.push(element);
        }
        added
    }

    pub fn update_draft_elements(&mut self, patches: Vec<ElementPatch>) -> Vec<Element> {
        let mut updated = Vec::new();
        for patch in patches {
            if let Some(draft) = self.drafts.iter_mut().find(|el| el.id == patch.id) {
                *draft = patch.apply(draft);
                self.max_z_index = self.max_z_index.max(draft.z_index.unwrap_or(0));
                updated.push(draft.clone());
            }
        }
        updated
    }

    pub fn remove_draft_elements(&mut self, ids: &[ElementId]) -> Vec<Element> {
        let (removed, kept): (Vec<Element>, Vec<Element>) = std::mem::take(&mut self.drafts)
            .into_iter()
            .partition(|el| ids.contains(&el.id));
        self.drafts = kept;
        removed
    }

    pub fn clear_draft_elements(&mut self) {
        self.drafts.clear();
    }

    /// Promote drafts (all of them when `ids` is `None`) into the
    /// persistent collection. If the active layer is locked, every draft is
    /// discarded and nothing is committed.
    pub fn commit_draft_elements(&mut self, ids: Option<&[ElementId]>) -> Vec<Element> {
        if self.layers.is_active_layer_locked() {
            log::warn!(
                "Active layer is locked; discarding {} draft elements",
                self.drafts.len()
            );
            self.clear_draft_elements();
            return Vec::new();
        }
        let committed = match ids {
            Some(ids) => self.remove_draft_elements(ids),
            None => std::mem::take(&mut self.drafts),
        };
        self.add_elements(committed)
    }

    // --- Queries ---

    pub fn get_element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    /// Elements matching `ids`, in store order. Unknown ids are ignored.
    pub fn get_elements(&self, ids: &[ElementId]) -> Vec<&Element> {
        self.elements.iter().filter(|el| ids.contains(&el.id)).collect()
    }

    pub fn get_elements_by_type(&self, kind: ShapeKind) -> Vec<&Element> {
        self.elements.iter().filter(|el| el.kind() == kind).collect()
    }

    /// Elements whose screen bounds overlap `bounds`.
    pub fn find_in_bounds(&self, bounds: Rect) -> Vec<&Element> {
        self.elements
            .iter()
            .filter(|el| rects_overlap(el.screen_bounds(), bounds))
            .collect()
    }

    /// Elements whose reference center lies within `radius` of `center`.
    pub fn find_in_radius(&self, center: Point, radius: f64) -> Vec<&Element> {
        self.elements
            .iter()
            .filter(|el| self.reference_center(el).distance(center) <= radius)
            .collect()
    }

    /// The element whose reference center is closest to `point`.
    pub fn find_nearest(&self, point: Point) -> Option<&Element> {
        self.elements.iter().min_by(|a, b| {
            let da = self.reference_center(a).distance(point);
            let db = self.reference_center(b).distance(point);
            da.total_cmp(&db)
        })
    }

    /// Center used by distance queries: position plus half the explicit
    /// size, or half the default size when the shape has none.
    fn reference_center(&self, element: &Element) -> Point {
        let (width, height) = element
            .shape
            .explicit_size()
            .unwrap_or((self.default_element_size, self.default_element_size));
        let origin = element.position();
        Point::new(origin.x + width / 2.0, origin.y + height / 2.0)
    }

    /// Combined screen bounds of `elements`.
    pub fn calculate_bounds<'a>(elements: impl IntoIterator<Item = &'a Element>) -> Option<Rect> {
        union_bounds(elements.into_iter().map(Element::screen_bounds))
    }

    pub fn combined_bounds(&self, ids: &[ElementId]) -> Option<Rect> {
        Self::calculate_bounds(self.get_elements(ids))
    }

    pub fn search(&self, criteria: &SearchCriteria) -> Vec<&Element> {
        let needle = criteria.text.as_ref().map(|t| t.to_lowercase());
        self.elements
            .iter()
            .filter(|el| criteria.kind.is_none_or(|kind| el.kind() == kind))
            .filter(|el| {
                criteria.layer_id.is_none_or(|layer_id| {
                    self.layers
                        .layer_for(el)
                        .is_some_and(|layer| layer.id == layer_id)
                })
            })
            .filter(|el| criteria.locked.is_none_or(|locked| el.is_locked() == locked))
            .filter(|el| {
                needle.as_ref().is_none_or(|needle| {
                    el.shape
                        .text_content()
                        .is_some_and(|text| text.to_lowercase().contains(needle))
                })
            })
            .filter(|el| {
                criteria.z_range.is_none_or(|(min, max)| {
                    el.z_index.is_some_and(|z| (min..=max).contains(&z))
                })
            })
            .filter(|el| {
                criteria
                    .bounds
                    .is_none_or(|bounds| rects_overlap(el.screen_bounds(), bounds))
            })
            .collect()
    }

    pub fn visible_elements(&self) -> Vec<&Element> {
        self.layers.get_visible_elements(&self.elements)
    }

    pub fn editable_elements(&self) -> Vec<&Element> {
        self.layers.get_editable_elements(&self.elements)
    }

    /// Elements in paint order, bottom first.
    pub fn sorted_elements(&self) -> Vec<&Element> {
        self.layers.get_sorted_elements(&self.elements)
    }

    /// Visible elements under `point`, topmost first.
    pub fn elements_at_point(&self, point: Point, tolerance: f64) -> Vec<&Element> {
        let mut hits: Vec<&Element> = self
            .sorted_elements()
            .into_iter()
            .filter(|el| self.layers.layer_for(el).is_none_or(|layer| layer.visible))
            .filter(|el| el.hit_test(point, tolerance))
            .collect();
        hits.reverse();
        hits
    }

    // --- Snapshots and history ---

    pub fn create_snapshot(&self) -> StoreSnapshot {
        StoreSnapshot {
            elements: self.elements.clone(),
            drafts: self.drafts.clone(),
            max_z_index: self.max_z_index,
        }
    }

    /// Reinstate a snapshot without touching history.
    pub fn restore_snapshot(&mut self, snapshot: StoreSnapshot) {
        log::debug!("Restoring snapshot of {} elements", snapshot.elements.len());
        self.elements = snapshot.elements;
        self.drafts = snapshot.drafts;
        self.max_z_index = snapshot.max_z_index;
        self.resync_after_install();
        self.emit_data_changed();
    }

    fn install_elements(&mut self, elements: Vec<Element>) {
        self.elements = elements;
        let max_z = self.elements.iter().filter_map(|el| el.z_index).max().unwrap_or(0);
        self.max_z_index = self.max_z_index.max(max_z);
        self.resync_after_install();
    }

    fn resync_after_install(&mut self) {
        let ids: HashSet<ElementId> = self.elements.iter().map(|el| el.id).collect();
        self.lock_info.retain(|id, _| ids.contains(id));
        for el in self.elements.clone() {
            self.sync_lock_info(&el);
        }
        self.sync_layer_membership();
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Re-install the previous snapshot. Returns false if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.undo() else {
            return false;
        };
        self.install_elements(snapshot.clone());
        self.emit(EngineEvent::Undo(snapshot));
        self.emit_data_changed();
        true
    }

    /// Re-install the next snapshot. Returns false if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(snapshot) = self.history.redo() else {
            return false;
        };
        self.install_elements(snapshot.clone());
        self.emit(EngineEvent::Redo(snapshot));
        self.emit_data_changed();
        true
    }

    /// Open a history batch starting from the current elements.
    pub fn start_batch(&mut self, description: impl Into<String>) -> Batch {
        let before = self.elements.clone();
        self.history.start_batch(description, before)
    }

    /// Stage the current elements as the batch's after-snapshot.
    pub fn complete_batch(&mut self) {
        let after = self.elements.clone();
        self.history.complete_batch(after);
    }

    pub fn execute_batch(&mut self, batch: Batch) -> bool {
        batch.execute(&mut self.history)
    }

    pub fn cancel_batch(&mut self, batch: Batch) {
        batch.clear(&mut self.history);
    }
}
