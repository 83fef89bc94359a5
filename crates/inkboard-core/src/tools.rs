//! Tool identity and the hook the selection engine uses to switch tools.

use crate::shapes::ShapeKind;
use serde::{Deserialize, Serialize};

/// Available tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ToolKind {
    #[default]
    Select,
    Pan,
    Rectangle,
    Ellipse,
    Line,
    Arrow,
    Pen,
    Image,
    Text,
}

impl ToolKind {
    /// The shape a drawing tool creates, `None` for select and pan.
    pub fn shape_kind(self) -> Option<ShapeKind> {
        match self {
            ToolKind::Select | ToolKind::Pan => None,
            ToolKind::Rectangle => Some(ShapeKind::Rectangle),
            ToolKind::Ellipse => Some(ShapeKind::Ellipse),
            ToolKind::Line => Some(ShapeKind::Line),
            ToolKind::Arrow => Some(ShapeKind::Arrow),
            ToolKind::Pen => Some(ShapeKind::Pen),
            ToolKind::Image => Some(ShapeKind::Image),
            ToolKind::Text => Some(ShapeKind::Text),
        }
    }

    pub fn is_drawing_tool(self) -> bool {
        self.shape_kind().is_some()
    }
}

/// Notified when a selection change should switch the host to the select tool.
pub trait ToolActivator {
    fn activate_select_tool(&mut self);

    /// The tool currently active, if the implementor tracks it.
    fn current_tool(&self) -> Option<ToolKind> {
        None
    }
}

/// Tracks the current tool.
#[derive(Debug, Clone, Default)]
pub struct ToolManager {
    current_tool: ToolKind,
    previous_tool: Option<ToolKind>,
}

impl ToolManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> ToolKind {
        self.current_tool
    }

    pub fn previous(&self) -> Option<ToolKind> {
        self.previous_tool
    }

    /// Switch tools. Returns false if `tool` was already active.
    pub fn set_tool(&mut self, tool: ToolKind) -> bool {
        if tool == self.current_tool {
            return false;
        }
        log::debug!("Tool changed: {:?} -> {:?}", self.current_tool, tool);
        self.previous_tool = Some(self.current_tool);
        self.current_tool = tool;
        true
    }
}

impl ToolActivator for ToolManager {
    fn activate_select_tool(&mut self) {
        self.set_tool(ToolKind::Select);
    }

    fn current_tool(&self) -> Option<ToolKind> {
        Some(self.current_tool)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_tool_tracks_previous() {
        let mut tools = ToolManager::new();
        assert_eq!(tools.current(), ToolKind::Select);
        assert!(tools.set_tool(ToolKind::Pen));
        assert!(!tools.set_tool(ToolKind::Pen));
        assert_eq!(tools.previous(), Some(ToolKind::Select));
    }

    #[test]
    fn test_activator_switches_to_select() {
        let mut tools = ToolManager::new();
        tools.set_tool(ToolKind::Rectangle);
        tools.activate_select_tool();
        assert_eq!(ToolActivator::current_tool(&tools), Some(ToolKind::Select));
    }

    #[test]
    fn test_shape_kinds() {
        assert_eq!(ToolKind::Pen.shape_kind(), Some(ShapeKind::Pen));
        assert!(!ToolKind::Pan.is_drawing_tool());
        assert!(ToolKind::Text.is_drawing_tool());
    }
}
