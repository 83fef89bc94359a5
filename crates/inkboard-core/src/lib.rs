//! Inkboard Core Library
//!
//! Platform-agnostic document engine for the Inkboard whiteboard: elements,
//! layers, the element store, selection and undo history.

pub mod camera;
pub mod clipboard;
pub mod config;
pub mod editor;
pub mod element;
pub mod error;
pub mod events;
pub mod geometry;
pub mod history;
pub mod layers;
pub mod selection;
pub mod shapes;
pub mod store;
pub mod tools;

pub use camera::Camera;
pub use clipboard::{ClipboardBackend, MemoryClipboard};
pub use config::EngineConfig;
pub use editor::Editor;
pub use element::{Element, ElementId, ElementPatch, GroupId};
pub use error::{EngineError, EngineResult};
pub use events::{EngineEvent, EventBus, EventListener, ListenerId};
pub use history::{Batch, History, HistoryEntry};
pub use layers::{BlendMode, Layer, LayerId, LayerManager, LayerState};
pub use selection::{AlignType, Axis, BoundingBox, Corner, Handle, HandleKind, SelectionManager};
pub use shapes::{Direction, Rgba, Shape, ShapeKind, ShapeStyle};
pub use store::{ElementStore, LockInfo, SearchCriteria, StoreSnapshot};
pub use tools::{ToolActivator, ToolKind, ToolManager};
