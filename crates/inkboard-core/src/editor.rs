//! Editor: the store, selection and camera wired together.

use crate::camera::Camera;
use crate::clipboard::{ClipboardBackend, MemoryClipboard};
use crate::config::EngineConfig;
use crate::element::{Element, ElementId};
use crate::error::EngineResult;
use crate::selection::{AlignType, HandleKind, SelectionManager};
use crate::store::ElementStore;
use crate::tools::{ToolActivator, ToolManager};
use kurbo::{Point, Rect, Size};

/// Composition root for a single board.
#[derive(Debug)]
pub struct Editor {
    pub store: ElementStore,
    pub selection: SelectionManager,
    pub camera: Camera,
    /// Viewport size in screen pixels.
    pub viewport_size: Size,
    config: EngineConfig,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        let clipboard = MemoryClipboard::with_offset(config.paste_offset);
        Self::with_backends(config, Box::new(clipboard), Box::new(ToolManager::new()))
    }

    /// Build an editor from a JSON configuration.
    pub fn from_config_json(json: &str) -> EngineResult<Self> {
        Ok(Self::with_config(EngineConfig::from_json(json)?))
    }

    /// Build an editor with host-provided clipboard and tool hooks.
    pub fn with_backends(
        config: EngineConfig,
        clipboard: Box<dyn ClipboardBackend>,
        tools: Box<dyn ToolActivator>,
    ) -> Self {
        Self {
            store: ElementStore::with_config(&config),
            selection: SelectionManager::with_config(&config, clipboard, tools),
            camera: Camera::new(),
            viewport_size: Size::new(800.0, 600.0),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn set_viewport_size(&mut self, width: f64, height: f64) {
        self.viewport_size = Size::new(width, height);
    }

    /// The part of the board currently on screen.
    pub fn visible_world_rect(&self) -> Rect {
        self.camera.visible_world_rect(self.viewport_size)
    }

    /// Hit tolerance in world units at the current zoom.
    fn world_tolerance(&self) -> f64 {
        self.config.hit_tolerance / self.camera.zoom
    }

    /// Select the topmost editable element under `point` (world space).
    /// Clicking empty space clears the selection unless `append` is set.
    pub fn select_at(&mut self, point: Point, append: bool) -> Option<ElementId> {
        let editable: Vec<ElementId> = self
            .store
            .editable_elements()
            .iter()
            .map(|el| el.id())
            .collect();
        let hit = self
            .store
            .elements_at_point(point, self.world_tolerance())
            .into_iter()
            .map(Element::id)
            .find(|id| editable.contains(id));
        match hit {
            Some(id) => self.selection.select_elements(&mut self.store, &[id], append),
            None if !append => self.selection.clear_selection(&mut self.store),
            None => {}
        }
        hit
    }

    /// Which handle of the selection's bounding box lies under `point`.
    pub fn hit_test_handles(&self, point: Point) -> Option<HandleKind> {
        self.selection.hit_test_handles(point, self.world_tolerance())
    }

    /// Align the selection; a single element aligns to the visible area.
    pub fn align_selected(&mut self, align: AlignType) -> Vec<Element> {
        let viewport = self.visible_world_rect();
        self.selection.align_elements(&mut self.store, align, viewport)
    }

    /// Commit every draft and select the committed elements.
    pub fn commit_drafts(&mut self) -> Vec<Element> {
        let committed = self.store.commit_draft_elements(None);
        if !committed.is_empty() {
            let ids: Vec<ElementId> = committed.iter().map(Element::id).collect();
            self.selection.select_elements(&mut self.store, &ids, false);
        }
        committed
    }

    pub fn can_undo(&self) -> bool {
        self.store.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.store.can_redo()
    }

    /// Undo, then drop selected ids that no longer exist.
    pub fn undo(&mut self) -> bool {
        let undone = self.store.undo();
        if undone {
            self.selection.refresh(&self.store);
        }
        undone
    }

    /// Redo, then drop selected ids that no longer exist.
    pub fn redo(&mut self) -> bool {
        let redone = self.store.redo();
        if redone {
            self.selection.refresh(&self.store);
        }
        redone
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::ElementPatch;
    use crate::events::EngineEvent;
    use crate::selection::Corner;
    use crate::shapes::{Ellipse, Pen, Rectangle, Shape};
    use kurbo::Vec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn rect(x: f64, y: f64, w: f64, h: f64) -> Element {
        Element::rectangle(Rectangle::new(Point::new(x, y), w, h))
    }

    #[test]
    fn test_config_from_json() {
        let editor =
            Editor::from_config_json(r#"{"history_limit": 2, "hit_tolerance": 1.0}"#).unwrap();
        assert_eq!(editor.config().history_limit, 2);
        assert_eq!(editor.store.history().limit(), 2);
        assert!((editor.config().paste_offset - 20.0).abs() < f64::EPSILON);
        assert!(Editor::from_config_json("nope").is_err());
    }

    #[test]
    fn test_draw_commit_and_undo() {
        let mut editor = Editor::new();
        let mut pen = Pen::new();
        pen.add_point(Point::new(0.0, 0.0));
        let draft = editor.store.add_draft_elements(vec![Element::pen(pen)]).remove(0);
        for i in 1..=3 {
            let mut next = draft.clone();
            if let Shape::Pen(p) = &mut next.shape {
                for j in 1..=i {
                    p.add_point(Point::new(j as f64 * 10.0, j as f64 * 5.0));
                }
            }
            editor
                .store
                .update_draft_elements(vec![ElementPatch::replace(&next)]);
        }
        assert!(!editor.can_undo());

        let committed = editor.commit_drafts();
        assert_eq!(committed.len(), 1);
        assert!(editor.selection.is_selected(draft.id()));
        assert!(editor.store.drafts().is_empty());

        assert!(editor.undo());
        assert!(editor.store.is_empty());
        assert!(editor.selection.is_empty());
        assert!(editor.redo());
        assert_eq!(editor.store.len(), 1);
    }

    #[test]
    fn test_select_at_picks_topmost() {
        let mut editor = Editor::new();
        let added = editor
            .store
            .add_elements(vec![rect(0.0, 0.0, 50.0, 50.0), rect(25.0, 25.0, 50.0, 50.0)]);

        assert_eq!(editor.select_at(Point::new(30.0, 30.0), false), Some(added[1].id()));
        assert_eq!(editor.selection.len(), 1);
        assert_eq!(editor.select_at(Point::new(5.0, 5.0), true), Some(added[0].id()));
        assert_eq!(editor.selection.len(), 2);

        assert_eq!(editor.select_at(Point::new(500.0, 500.0), false), None);
        assert!(editor.selection.is_empty());
    }

    #[test]
    fn test_select_at_skips_locked_layers() {
        let mut editor = Editor::new();
        editor.store.add_elements(vec![rect(0.0, 0.0, 50.0, 50.0)]);
        let layer = editor.store.layers().active_layer_id();
        editor.store.layers_mut().toggle_layer_lock(layer);
        assert_eq!(editor.select_at(Point::new(10.0, 10.0), false), None);
    }

    #[test]
    fn test_single_element_aligns_to_visible_area() {
        let mut editor = Editor::new();
        editor.set_viewport_size(400.0, 300.0);
        editor.camera.pan(Vec2::new(-100.0, 0.0));
        let id = editor.store.add_elements(vec![rect(0.0, 0.0, 10.0, 10.0)])[0].id();
        editor.selection.select_elements(&mut editor.store, &[id], false);

        editor.align_selected(AlignType::Right);
        let moved = editor.store.get_element(id).unwrap();
        assert!((moved.bounds().x1 - 500.0).abs() < 1e-9);
    }

    #[test]
    fn test_handles_follow_zoom() {
        let mut editor = Editor::new();
        let id = editor.store.add_elements(vec![rect(0.0, 0.0, 100.0, 100.0)])[0].id();
        editor.selection.select_elements(&mut editor.store, &[id], false);

        assert_eq!(
            editor.hit_test_handles(Point::new(103.0, 103.0)),
            Some(HandleKind::Corner(Corner::BottomRight))
        );
        editor.camera.zoom = 4.0;
        assert_eq!(editor.hit_test_handles(Point::new(103.0, 103.0)), None);
    }

    #[test]
    fn test_paste_then_undo_prunes_selection() {
        let mut editor = Editor::new();
        let id = editor
            .store
            .add_elements(vec![Element::ellipse(Ellipse::circle(Point::new(10.0, 10.0), 5.0))])[0]
            .id();
        editor.selection.select_elements(&mut editor.store, &[id], false);
        editor.selection.copy_elements(&editor.store);
        let pasted = editor.selection.paste_elements(&mut editor.store);
        assert!(editor.selection.is_selected(pasted[0].id()));

        assert!(editor.undo());
        assert_eq!(editor.store.len(), 1);
        assert!(editor.selection.is_empty());
    }

    #[test]
    fn test_events_reach_host_listener() {
        let mut editor = Editor::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        editor
            .store
            .subscribe(move |event: &EngineEvent| sink.borrow_mut().push(event.name()));

        let id = editor.store.add_elements(vec![rect(0.0, 0.0, 10.0, 10.0)])[0].id();
        editor.selection.select_elements(&mut editor.store, &[id], false);
        editor.selection.move_selected(&mut editor.store, Vec2::new(1.0, 0.0));
        editor.undo();

        assert_eq!(
            *seen.borrow(),
            vec![
                "elements-added",
                "data-changed",
                "elements-selected",
                "elements-updated",
                "data-changed",
                "undo",
                "data-changed",
            ]
        );
    }
}
