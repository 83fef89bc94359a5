//! Layers: ordered, visibility/lock-controlled containers of element ids.
//!
//! There is always at least one layer, and exactly one of them is active.
//! An element id belongs to at most one layer at a time.

use crate::element::{Element, ElementId};
use crate::error::{EngineError, EngineResult};
use peniko::Mix;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for layers.
pub type LayerId = Uuid;

/// How a layer is composited over the layers below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    #[default]
    Normal,
    Multiply,
    Screen,
    Overlay,
    Darken,
    Lighten,
    ColorDodge,
    ColorBurn,
    HardLight,
    SoftLight,
    Difference,
    Exclusion,
}

impl BlendMode {
    /// All blend modes, in UI order.
    pub fn all() -> &'static [BlendMode] {
        &[
            BlendMode::Normal,
            BlendMode::Multiply,
            BlendMode::Screen,
            BlendMode::Overlay,
            BlendMode::Darken,
            BlendMode::Lighten,
            BlendMode::ColorDodge,
            BlendMode::ColorBurn,
            BlendMode::HardLight,
            BlendMode::SoftLight,
            BlendMode::Difference,
            BlendMode::Exclusion,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BlendMode::Normal => "normal",
            BlendMode::Multiply => "multiply",
            BlendMode::Screen => "screen",
            BlendMode::Overlay => "overlay",
            BlendMode::Darken => "darken",
            BlendMode::Lighten => "lighten",
            BlendMode::ColorDodge => "color-dodge",
            BlendMode::ColorBurn => "color-burn",
            BlendMode::HardLight => "hard-light",
            BlendMode::SoftLight => "soft-light",
            BlendMode::Difference => "difference",
            BlendMode::Exclusion => "exclusion",
        }
    }

    /// The matching peniko mix mode, for renderers.
    pub fn to_mix(self) -> Mix {
        match self {
            BlendMode::Normal => Mix::Normal,
            BlendMode::Multiply => Mix::Multiply,
            BlendMode::Screen => Mix::Screen,
            BlendMode::Overlay => Mix::Overlay,
            BlendMode::Darken => Mix::Darken,
            BlendMode::Lighten => Mix::Lighten,
            BlendMode::ColorDodge => Mix::ColorDodge,
            BlendMode::ColorBurn => Mix::ColorBurn,
            BlendMode::HardLight => Mix::HardLight,
            BlendMode::SoftLight => Mix::SoftLight,
            BlendMode::Difference => Mix::Difference,
            BlendMode::Exclusion => Mix::Exclusion,
        }
    }
}

impl fmt::Display for BlendMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BlendMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BlendMode::all()
            .iter()
            .copied()
            .find(|mode| mode.as_str() == s)
            .ok_or_else(|| EngineError::UnknownBlendMode(s.to_string()))
    }
}

/// A single layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Layer {
    pub id: LayerId,
    pub name: String,
    pub visible: bool,
    pub locked: bool,
    /// Stacking order; higher draws on top. Need not be contiguous.
    pub z_index: i64,
    /// Element ids owned by this layer, in insertion order.
    pub elements: Vec<ElementId>,
    pub opacity: f64,
    pub blend_mode: BlendMode,
}

impl Layer {
    pub fn new(name: impl Into<String>, z_index: i64) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            visible: true,
            locked: false,
            z_index,
            elements: Vec::new(),
            opacity: 1.0,
            blend_mode: BlendMode::Normal,
        }
    }

    pub fn contains(&self, element_id: ElementId) -> bool {
        self.elements.contains(&element_id)
    }
}

/// Serializable layer state: `{ layers, activeLayerId }`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerState {
    pub layers: Vec<Layer>,
    pub active_layer_id: LayerId,
}

impl LayerState {
    pub fn to_json(&self) -> EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> EngineResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Owns the layer list and the active layer id.
#[derive(Debug, Clone)]
pub struct LayerManager {
    layers: Vec<Layer>,
    active_layer_id: LayerId,
}

impl Default for LayerManager {
    fn default() -> Self {
        Self::new()
    }
}

impl LayerManager {
    /// Create a manager holding one visible, unlocked default layer.
    pub fn new() -> Self {
        let layer = Layer::new("Layer 1", 0);
        let active_layer_id = layer.id;
        Self {
            layers: vec![layer],
            active_layer_id,
        }
    }

    /// Layers in list order.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Layers ordered bottom to top by z-index.
    pub fn sorted_layers(&self) -> Vec<&Layer> {
        let mut sorted: Vec<&Layer> = self.layers.iter().collect();
        sorted.sort_by_key(|layer| layer.z_index);
        sorted
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Always false: the manager never holds fewer than one layer.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.id == id)
    }

    fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.iter_mut().find(|layer| layer.id == id)
    }

    /// Look up a layer for an edit, rejecting missing and locked layers.
    fn editable_layer_mut(&mut self, id: LayerId, action: &str) -> Option<&mut Layer> {
        match self.layers.iter_mut().find(|layer| layer.id == id) {
            None => {
                log::warn!("Cannot {action}: layer {id} not found");
                None
            }
            Some(layer) if layer.locked => {
                log::warn!("Cannot {action}: layer '{}' is locked", layer.name);
                None
            }
            Some(layer) => Some(layer),
        }
    }

    pub fn active_layer_id(&self) -> LayerId {
        self.active_layer_id
    }

    pub fn active_layer(&self) -> Option<&Layer> {
        self.layer(self.active_layer_id)
    }

    pub fn is_active_layer_locked(&self) -> bool {
        self.active_layer().is_some_and(|layer| layer.locked)
    }

    /// Add a layer on top of the stack and make it the only visible, active layer.
    pub fn add_layer(&mut self, name: Option<&str>) -> LayerId {
        let z_index = self
            .layers
            .iter()
            .map(|layer| layer.z_index)
            .max()
            .map_or(0, |z| z + 1);
        let name = match name {
            Some(name) if !name.trim().is_empty() => name.to_string(),
            _ => format!("Layer {}", self.layers.len() + 1),
        };

        for layer in &mut self.layers {
            layer.visible = false;
        }
        let layer = Layer::new(name, z_index);
        let id = layer.id;
        log::debug!("Added layer '{}' at z-index {}", layer.name, z_index);
        self.layers.push(layer);
        self.active_layer_id = id;
        id
    }

    /// Remove a layer. The last remaining layer can never be removed.
    pub fn remove_layer(&mut self, id: LayerId) -> bool {
        if self.layers.len() <= 1 {
            log::warn!("Cannot remove the last layer");
            return false;
        }
        let Some(index) = self.layers.iter().position(|layer| layer.id == id) else {
            log::warn!("Cannot remove layer {id}: not found");
            return false;
        };

        let removed = self.layers.remove(index);
        log::debug!(
            "Removed layer '{}' ({} elements now unlayered)",
            removed.name,
            removed.elements.len()
        );
        if self.active_layer_id == id {
            if let Some(last) = self.layers.last() {
                self.active_layer_id = last.id;
            }
        }
        true
    }

    pub fn rename_layer(&mut self, id: LayerId, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            log::warn!("Cannot rename layer {id}: name is empty");
            return false;
        }
        match self.editable_layer_mut(id, "rename layer") {
            Some(layer) => {
                layer.name = name.to_string();
                true
            }
            None => false,
        }
    }

    /// Set a layer's z-index directly.
    pub fn reorder_layer(&mut self, id: LayerId, z_index: i64) -> bool {
        match self.editable_layer_mut(id, "reorder layer") {
            Some(layer) => {
                layer.z_index = z_index;
                true
            }
            None => false,
        }
    }

    pub fn set_layer_opacity(&mut self, id: LayerId, opacity: f64) -> bool {
        match self.editable_layer_mut(id, "set layer opacity") {
            Some(layer) => {
                layer.opacity = opacity.clamp(0.0, 1.0);
                true
            }
            None => false,
        }
    }

    /// Set a blend mode by name. Unknown names reset the layer to
    /// [`BlendMode::Normal`] and return false.
    pub fn set_layer_blend_mode(&mut self, id: LayerId, mode: &str) -> bool {
        let Some(layer) = self.editable_layer_mut(id, "set blend mode") else {
            return false;
        };
        match mode.parse::<BlendMode>() {
            Ok(mode) => {
                layer.blend_mode = mode;
                true
            }
            Err(err) => {
                log::warn!("{err}; falling back to normal");
                layer.blend_mode = BlendMode::Normal;
                false
            }
        }
    }

    /// Swap z-index with the next layer above.
    pub fn move_layer_up(&mut self, id: LayerId) -> bool {
        self.swap_with_neighbor(id, true)
    }

    /// Swap z-index with the next layer below.
    pub fn move_layer_down(&mut self, id: LayerId) -> bool {
        self.swap_with_neighbor(id, false)
    }

    fn swap_with_neighbor(&mut self, id: LayerId, up: bool) -> bool {
        if self.editable_layer_mut(id, "move layer").is_none() {
            return false;
        }
        let order: Vec<(LayerId, i64)> = self
            .sorted_layers()
            .iter()
            .map(|layer| (layer.id, layer.z_index))
            .collect();
        let Some(pos) = order.iter().position(|(layer_id, _)| *layer_id == id) else {
            return false;
        };
        let neighbor = if up {
            order.get(pos + 1)
        } else {
            pos.checked_sub(1).and_then(|i| order.get(i))
        };
        let Some(&(neighbor_id, neighbor_z)) = neighbor else {
            log::warn!("Layer {id} is already at the {}", if up { "top" } else { "bottom" });
            return false;
        };
        let own_z = order[pos].1;
        if let Some(layer) = self.layer_mut(id) {
            layer.z_index = neighbor_z;
        }
        if let Some(layer) = self.layer_mut(neighbor_id) {
            layer.z_index = own_z;
        }
        true
    }

    pub fn toggle_layer_visibility(&mut self, id: LayerId) -> bool {
        match self.layer_mut(id) {
            Some(layer) => {
                layer.visible = !layer.visible;
                true
            }
            None => false,
        }
    }

    /// Toggle a layer's lock. Allowed on the active layer, which stays active.
    pub fn toggle_layer_lock(&mut self, id: LayerId) -> bool {
        match self.layer_mut(id) {
            Some(layer) => {
                layer.locked = !layer.locked;
                true
            }
            None => false,
        }
    }

    /// Make a layer active and the only visible one. Locked layers may be activated.
    pub fn set_active_layer(&mut self, id: LayerId) -> bool {
        if self.layer(id).is_none() {
            log::warn!("Cannot activate layer {id}: not found");
            return false;
        }
        for layer in &mut self.layers {
            layer.visible = layer.id == id;
        }
        self.active_layer_id = id;
        true
    }

    /// Move an element into a layer, removing it from every other layer first.
    pub fn assign_element_to_layer(&mut self, element_id: ElementId, layer_id: LayerId) -> bool {
        if self.editable_layer_mut(layer_id, "assign element").is_none() {
            return false;
        }
        self.attach_element(element_id, layer_id)
    }

    /// Register membership without the lock check. Used when the store
    /// installs elements that already carry a layer id.
    pub(crate) fn attach_element(&mut self, element_id: ElementId, layer_id: LayerId) -> bool {
        if self.layer(layer_id).is_none() {
            return false;
        }
        for layer in self.layers.iter_mut().filter(|layer| layer.id != layer_id) {
            layer.elements.retain(|id| *id != element_id);
        }
        // Look the target up again after the removal pass.
        let Some(target) = self.layer_mut(layer_id) else {
            return false;
        };
        if !target.contains(element_id) {
            target.elements.push(element_id);
        }
        true
    }

    /// Remove an element id from every layer.
    pub fn unregister_element(&mut self, element_id: ElementId) {
        for layer in &mut self.layers {
            layer.elements.retain(|id| *id != element_id);
        }
    }

    /// Remove every element id from every layer.
    pub fn clear_elements(&mut self) {
        for layer in &mut self.layers {
            layer.elements.clear();
        }
    }

    /// The layer whose element set contains `element_id`.
    pub fn layer_of(&self, element_id: ElementId) -> Option<&Layer> {
        self.layers.iter().find(|layer| layer.contains(element_id))
    }

    /// The layer an element belongs to: membership first, then its `layer_id`.
    pub fn layer_for(&self, element: &Element) -> Option<&Layer> {
        self.layer_of(element.id())
            .or_else(|| element.layer_id.and_then(|id| self.layer(id)))
    }

    /// Elements on visible layers. Unlayered elements count as visible.
    pub fn get_visible_elements<'a>(&self, elements: &'a [Element]) -> Vec<&'a Element> {
        elements
            .iter()
            .filter(|el| self.layer_for(el).is_none_or(|layer| layer.visible))
            .collect()
    }

    /// Elements on layers that are both visible and unlocked.
    pub fn get_editable_elements<'a>(&self, elements: &'a [Element]) -> Vec<&'a Element> {
        elements
            .iter()
            .filter(|el| {
                self.layer_for(el)
                    .is_none_or(|layer| layer.visible && !layer.locked)
            })
            .collect()
    }

    /// Elements ordered by layer z-index, then element z-index.
    /// Unlayered elements sort below every layer.
    pub fn get_sorted_elements<'a>(&self, elements: &'a [Element]) -> Vec<&'a Element> {
        let mut sorted: Vec<&Element> = elements.iter().collect();
        sorted.sort_by_key(|el| {
            let layer_z = self.layer_for(el).map_or(i64::MIN, |layer| layer.z_index);
            (layer_z, el.z_index.unwrap_or(0))
        });
        sorted
    }

    pub fn export_layer_state(&self) -> LayerState {
        LayerState {
            layers: self.layers.clone(),
            active_layer_id: self.active_layer_id,
        }
    }

    /// Replace all layers. Empty input yields a single default layer; an
    /// unknown active id falls back to the first imported layer.
    pub fn import_layer_state(&mut self, state: LayerState) {
        if state.layers.is_empty() {
            log::warn!("Imported layer state is empty; using a default layer");
            *self = Self::new();
            return;
        }
        let active_layer_id = if state.layers.iter().any(|l| l.id == state.active_layer_id) {
            state.active_layer_id
        } else {
            log::warn!(
                "Active layer {} missing from imported state; using the first layer",
                state.active_layer_id
            );
            state.layers[0].id
        };
        self.layers = state.layers;
        self.active_layer_id = active_layer_id;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Rectangle;
    use kurbo::Point;

    fn element() -> Element {
        Element::rectangle(Rectangle::new(Point::ZERO, 10.0, 10.0))
    }

    #[test]
    fn test_starts_with_one_layer() {
        let layers = LayerManager::new();
        assert_eq!(layers.len(), 1);
        assert_eq!(layers.layers()[0].name, "Layer 1");
        assert_eq!(layers.active_layer_id(), layers.layers()[0].id);
    }

    #[test]
    fn test_add_layer() {
        let mut layers = LayerManager::new();
        let first = layers.active_layer_id();
        let id = layers.add_layer(None);

        let added = layers.layer(id).unwrap();
        assert_eq!(added.name, "Layer 2");
        assert_eq!(added.z_index, 1);
        assert!(added.visible);
        assert!(!layers.layer(first).unwrap().visible);
        assert_eq!(layers.active_layer_id(), id);

        let named = layers.add_layer(Some("Sketch"));
        assert_eq!(layers.layer(named).unwrap().name, "Sketch");
        assert_eq!(layers.layer(named).unwrap().z_index, 2);
    }

    #[test]
    fn test_cannot_remove_last_layer() {
        let mut layers = LayerManager::new();
        let id = layers.active_layer_id();
        assert!(!layers.remove_layer(id));
        assert_eq!(layers.len(), 1);
    }

    #[test]
    fn test_remove_active_layer_activates_last() {
        let mut layers = LayerManager::new();
        let first = layers.active_layer_id();
        let second = layers.add_layer(None);
        let third = layers.add_layer(None);
        layers.set_active_layer(second);

        assert!(layers.remove_layer(second));
        assert_eq!(layers.active_layer_id(), third);
        assert!(layers.remove_layer(third));
        assert_eq!(layers.active_layer_id(), first);
        assert!(!layers.remove_layer(Uuid::new_v4()));
    }

    #[test]
    fn test_locked_layer_rejects_edits() {
        let mut layers = LayerManager::new();
        let id = layers.active_layer_id();
        assert!(layers.toggle_layer_lock(id));

        assert!(!layers.rename_layer(id, "New"));
        assert!(!layers.reorder_layer(id, 10));
        assert!(!layers.set_layer_opacity(id, 0.5));
        assert!(!layers.set_layer_blend_mode(id, "multiply"));
        assert!(!layers.assign_element_to_layer(Uuid::new_v4(), id));

        // Still allowed.
        assert!(layers.toggle_layer_visibility(id));
        assert!(layers.set_active_layer(id));
        assert_eq!(layers.active_layer_id(), id);
    }

    #[test]
    fn test_rename_rejects_blank() {
        let mut layers = LayerManager::new();
        let id = layers.active_layer_id();
        assert!(!layers.rename_layer(id, "   "));
        assert!(layers.rename_layer(id, " Background "));
        assert_eq!(layers.layer(id).unwrap().name, "Background");
    }

    #[test]
    fn test_opacity_is_clamped() {
        let mut layers = LayerManager::new();
        let id = layers.active_layer_id();
        assert!(layers.set_layer_opacity(id, 1.7));
        assert!((layers.layer(id).unwrap().opacity - 1.0).abs() < f64::EPSILON);
        assert!(layers.set_layer_opacity(id, -0.2));
        assert!(layers.layer(id).unwrap().opacity.abs() < f64::EPSILON);
    }

    #[test]
    fn test_blend_mode_validation() {
        let mut layers = LayerManager::new();
        let id = layers.active_layer_id();
        assert!(layers.set_layer_blend_mode(id, "color-burn"));
        assert_eq!(layers.layer(id).unwrap().blend_mode, BlendMode::ColorBurn);

        assert!(!layers.set_layer_blend_mode(id, "sparkle"));
        assert_eq!(layers.layer(id).unwrap().blend_mode, BlendMode::Normal);
    }

    #[test]
    fn test_blend_mode_parse() {
        assert_eq!("hard-light".parse::<BlendMode>().unwrap(), BlendMode::HardLight);
        assert!(matches!(
            "nope".parse::<BlendMode>(),
            Err(EngineError::UnknownBlendMode(_))
        ));
        assert_eq!(BlendMode::Screen.to_mix(), Mix::Screen);
    }

    #[test]
    fn test_move_layer_up_and_down() {
        let mut layers = LayerManager::new();
        let bottom = layers.active_layer_id();
        let top = layers.add_layer(None);

        assert!(!layers.move_layer_up(top));
        assert!(!layers.move_layer_down(bottom));

        assert!(layers.move_layer_up(bottom));
        assert_eq!(layers.layer(bottom).unwrap().z_index, 1);
        assert_eq!(layers.layer(top).unwrap().z_index, 0);

        layers.toggle_layer_lock(bottom);
        assert!(!layers.move_layer_down(bottom));
    }

    #[test]
    fn test_move_layer_swaps_sparse_z_indices() {
        let mut layers = LayerManager::new();
        let a = layers.active_layer_id();
        let b = layers.add_layer(None);
        let c = layers.add_layer(None);
        assert!(layers.reorder_layer(b, 5));
        assert!(layers.reorder_layer(c, 20));

        assert!(layers.move_layer_up(a));
        assert_eq!(layers.layer(a).unwrap().z_index, 5);
        assert_eq!(layers.layer(b).unwrap().z_index, 0);

        assert!(layers.move_layer_down(c));
        assert_eq!(layers.layer(c).unwrap().z_index, 5);
        assert_eq!(layers.layer(a).unwrap().z_index, 20);

        let order: Vec<LayerId> = layers.sorted_layers().iter().map(|layer| layer.id).collect();
        assert_eq!(order, vec![b, c, a]);
    }

    #[test]
    fn test_set_active_layer_shows_only_target() {
        let mut layers = LayerManager::new();
        let first = layers.active_layer_id();
        let second = layers.add_layer(None);
        assert!(layers.set_active_layer(first));
        assert!(layers.layer(first).unwrap().visible);
        assert!(!layers.layer(second).unwrap().visible);
        assert!(!layers.set_active_layer(Uuid::new_v4()));
    }

    #[test]
    fn test_single_layer_membership() {
        let mut layers = LayerManager::new();
        let first = layers.active_layer_id();
        let second = layers.add_layer(None);
        let el = Uuid::new_v4();

        assert!(layers.assign_element_to_layer(el, first));
        assert!(layers.assign_element_to_layer(el, second));
        assert!(layers.assign_element_to_layer(el, second));
        assert!(layers.assign_element_to_layer(el, first));

        let owners: Vec<_> = layers.layers().iter().filter(|l| l.contains(el)).collect();
        assert_eq!(owners.len(), 1);
        assert_eq!(owners[0].id, first);
        assert_eq!(layers.layer(first).unwrap().elements, vec![el]);
    }

    #[test]
    fn test_sorted_elements_follow_layer_order() {
        let mut layers = LayerManager::new();
        let l1 = layers.active_layer_id();
        let l2 = layers.add_layer(None);
        let l3 = layers.add_layer(None);

        let e1 = element();
        let e2 = element();
        let e3 = element();
        layers.assign_element_to_layer(e1.id(), l1);
        layers.assign_element_to_layer(e2.id(), l2);
        layers.assign_element_to_layer(e3.id(), l3);

        let input = vec![e3.clone(), e1.clone(), e2.clone()];
        let sorted: Vec<ElementId> = layers
            .get_sorted_elements(&input)
            .iter()
            .map(|el| el.id())
            .collect();
        assert_eq!(sorted, vec![e1.id(), e2.id(), e3.id()]);
    }

    #[test]
    fn test_visible_and_editable_views() {
        let mut layers = LayerManager::new();
        let l1 = layers.active_layer_id();
        let l2 = layers.add_layer(None);
        let hidden = element();
        let shown = element();
        let loose = element();
        layers.assign_element_to_layer(hidden.id(), l1);
        layers.assign_element_to_layer(shown.id(), l2);

        let all = vec![hidden.clone(), shown.clone(), loose.clone()];
        let visible: Vec<ElementId> =
            layers.get_visible_elements(&all).iter().map(|e| e.id()).collect();
        assert_eq!(visible, vec![shown.id(), loose.id()]);

        layers.toggle_layer_lock(l2);
        let editable: Vec<ElementId> =
            layers.get_editable_elements(&all).iter().map(|e| e.id()).collect();
        assert_eq!(editable, vec![loose.id()]);
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut layers = LayerManager::new();
        layers.add_layer(Some("Ink"));
        let state = layers.export_layer_state();
        let json = state.to_json().unwrap();
        assert!(json.contains("activeLayerId"));

        let mut other = LayerManager::new();
        other.import_layer_state(LayerState::from_json(&json).unwrap());
        assert_eq!(other.export_layer_state(), state);
    }

    #[test]
    fn test_import_fallbacks() {
        let mut layers = LayerManager::new();
        layers.import_layer_state(LayerState {
            layers: Vec::new(),
            active_layer_id: Uuid::new_v4(),
        });
        assert_eq!(layers.len(), 1);

        let a = Layer::new("A", 0);
        let b = Layer::new("B", 1);
        let first = a.id;
        layers.import_layer_state(LayerState {
            layers: vec![a, b],
            active_layer_id: Uuid::new_v4(),
        });
        assert_eq!(layers.active_layer_id(), first);
    }
}
