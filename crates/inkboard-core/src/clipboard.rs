//! Clipboard contract plus an in-memory JSON backend.

use crate::config::DEFAULT_PASTE_OFFSET;
use crate::element::{Element, GroupId};
use crate::error::EngineResult;
use kurbo::Vec2;
use std::collections::HashMap;
use uuid::Uuid;

/// Storage for copied elements.
///
/// `paste` and `duplicate_elements` return fresh elements: new ids, shifted
/// by an offset, with store-managed fields (z-index, layer) cleared.
pub trait ClipboardBackend {
    fn copy(&mut self, elements: &[Element]);
    fn cut(&mut self, elements: &[Element]);
    fn paste(&mut self) -> Vec<Element>;
    /// Copies of `elements` shifted by `dx`/`dy`, or by the backend's
    /// default offset when omitted.
    fn duplicate_elements(
        &self,
        elements: &[Element],
        dx: Option<f64>,
        dy: Option<f64>,
    ) -> Vec<Element>;
    fn has_data(&self) -> bool;
    fn get_data(&self) -> Option<Vec<Element>>;
    fn clear(&mut self);
}

/// Clone `elements` as new elements moved by `delta`.
///
/// Group membership is preserved among the copies but moved to fresh group
/// ids, so the copies do not join the source groups.
pub fn fresh_copies(elements: &[Element], delta: Vec2) -> Vec<Element> {
    let mut groups: HashMap<GroupId, GroupId> = HashMap::new();
    elements
        .iter()
        .map(|el| {
            let mut copy = el.translated(delta);
            copy.regenerate_id();
            copy.z_index = None;
            copy.layer_id = None;
            copy.group_id = el
                .group_id
                .map(|group| *groups.entry(group).or_insert_with(Uuid::new_v4));
            copy
        })
        .collect()
}

/// Clipboard that keeps its payload as a JSON string, so it can be
/// exchanged with a system clipboard as text.
#[derive(Debug, Clone)]
pub struct MemoryClipboard {
    data: Option<String>,
    offset: f64,
}

impl Default for MemoryClipboard {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::with_offset(DEFAULT_PASTE_OFFSET)
    }

    pub fn with_offset(offset: f64) -> Self {
        Self { data: None, offset }
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// The raw JSON payload.
    pub fn raw(&self) -> Option<&str> {
        self.data.as_deref()
    }

    /// Replace the payload with externally supplied JSON. It is validated
    /// lazily; unreadable data behaves like an empty clipboard.
    pub fn set_raw(&mut self, json: impl Into<String>) {
        self.data = Some(json.into());
    }

    fn store(&mut self, elements: &[Element]) -> EngineResult<()> {
        self.data = Some(serde_json::to_string(elements)?);
        Ok(())
    }

    fn store_logged(&mut self, elements: &[Element], action: &str) {
        match self.store(elements) {
            Ok(()) => log::debug!("Clipboard: {action} {} elements", elements.len()),
            Err(err) => {
                log::warn!("Clipboard: failed to {action} elements: {err}");
                self.data = None;
            }
        }
    }
}

impl ClipboardBackend for MemoryClipboard {
    fn copy(&mut self, elements: &[Element]) {
        self.store_logged(elements, "copy");
    }

    fn cut(&mut self, elements: &[Element]) {
        self.store_logged(elements, "cut");
    }

    fn paste(&mut self) -> Vec<Element> {
        match self.get_data() {
            Some(elements) => fresh_copies(&elements, Vec2::new(self.offset, self.offset)),
            None => Vec::new(),
        }
    }

    fn duplicate_elements(
        &self,
        elements: &[Element],
        dx: Option<f64>,
        dy: Option<f64>,
    ) -> Vec<Element> {
        let delta = Vec2::new(dx.unwrap_or(self.offset), dy.unwrap_or(self.offset));
        fresh_copies(elements, delta)
    }

    fn has_data(&self) -> bool {
        self.get_data().is_some_and(|elements| !elements.is_empty())
    }

    fn get_data(&self) -> Option<Vec<Element>> {
        let json = self.data.as_deref()?;
        match serde_json::from_str(json) {
            Ok(elements) => Some(elements),
            Err(err) => {
                log::warn!("Clipboard data is corrupted, ignoring it: {err}");
                None
            }
        }
    }

    fn clear(&mut self) {
        self.data = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::Rectangle;
    use kurbo::Point;

    fn rect(x: f64, y: f64) -> Element {
        Element::rectangle(Rectangle::new(Point::new(x, y), 10.0, 10.0)).with_z_index(4)
    }

    #[test]
    fn test_paste_returns_offset_copies() {
        let mut clipboard = MemoryClipboard::new();
        let original = rect(5.0, 5.0);
        clipboard.copy(std::slice::from_ref(&original));
        assert!(clipboard.has_data());

        let pasted = clipboard.paste();
        assert_eq!(pasted.len(), 1);
        assert_ne!(pasted[0].id(), original.id());
        assert_eq!(pasted[0].position(), Point::new(25.0, 25.0));
        assert_eq!(pasted[0].z_index, None);

        // Pasting again yields yet another id.
        let again = clipboard.paste();
        assert_ne!(again[0].id(), pasted[0].id());
    }

    #[test]
    fn test_duplicate_with_custom_offset() {
        let clipboard = MemoryClipboard::new();
        let original = rect(0.0, 0.0);
        let copies = clipboard.duplicate_elements(&[original], Some(5.0), None);
        assert_eq!(copies[0].position(), Point::new(5.0, 20.0));
    }

    #[test]
    fn test_copies_get_fresh_groups() {
        let group = Uuid::new_v4();
        let a = rect(0.0, 0.0).with_group(group);
        let b = rect(20.0, 0.0).with_group(group);
        let loose = rect(40.0, 0.0);

        let copies = fresh_copies(&[a, b, loose], Vec2::ZERO);
        let new_group = copies[0].group_id.unwrap();
        assert_ne!(new_group, group);
        assert_eq!(copies[1].group_id, Some(new_group));
        assert_eq!(copies[2].group_id, None);
    }

    #[test]
    fn test_corrupted_data_reads_as_empty() {
        let mut clipboard = MemoryClipboard::new();
        clipboard.set_raw("{not json");
        assert!(!clipboard.has_data());
        assert!(clipboard.get_data().is_none());
        assert!(clipboard.paste().is_empty());
    }

    #[test]
    fn test_clear() {
        let mut clipboard = MemoryClipboard::new();
        clipboard.cut(&[rect(0.0, 0.0)]);
        assert!(clipboard.raw().is_some());
        clipboard.clear();
        assert!(!clipboard.has_data());
    }
}
