//! Change notifications for hosts that need to repaint or sync.

use crate::element::{Element, ElementId};
use std::fmt;

/// Event emitted after a state change, carrying the affected elements.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    ElementsAdded(Vec<Element>),
    ElementsUpdated(Vec<Element>),
    ElementsRemoved(Vec<Element>),
    /// The persistent element set changed in any way.
    DataChanged(Vec<Element>),
    ElementsSelected(Vec<Element>),
    /// A snapshot was re-installed by undo.
    Undo(Vec<Element>),
    /// A snapshot was re-installed by redo.
    Redo(Vec<Element>),
}

impl EngineEvent {
    /// Short name, for logging.
    pub fn name(&self) -> &'static str {
        match self {
            EngineEvent::ElementsAdded(_) => "elements-added",
            EngineEvent::ElementsUpdated(_) => "elements-updated",
            EngineEvent::ElementsRemoved(_) => "elements-removed",
            EngineEvent::DataChanged(_) => "data-changed",
            EngineEvent::ElementsSelected(_) => "elements-selected",
            EngineEvent::Undo(_) => "undo",
            EngineEvent::Redo(_) => "redo",
        }
    }

    pub fn elements(&self) -> &[Element] {
        match self {
            EngineEvent::ElementsAdded(els)
            | EngineEvent::ElementsUpdated(els)
            | EngineEvent::ElementsRemoved(els)
            | EngineEvent::DataChanged(els)
            | EngineEvent::ElementsSelected(els)
            | EngineEvent::Undo(els)
            | EngineEvent::Redo(els) => els,
        }
    }

    pub fn element_ids(&self) -> Vec<ElementId> {
        self.elements().iter().map(Element::id).collect()
    }
}

/// Receives engine events.
pub trait EventListener {
    fn on_event(&mut self, event: &EngineEvent);
}

impl<F> EventListener for F
where
    F: FnMut(&EngineEvent),
{
    fn on_event(&mut self, event: &EngineEvent) {
        self(event)
    }
}

/// Handle returned by [`EventBus::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(usize);

/// Broadcasts events to registered listeners in subscription order.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<(ListenerId, Box<dyn EventListener>)>,
    next_id: usize,
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &format!("<{} listeners>", self.listeners.len()))
            .finish()
    }
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: impl EventListener + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn emit(&mut self, event: EngineEvent) {
        log::trace!("Event: {} ({} elements)", event.name(), event.elements().len());
        for (_, listener) in &mut self.listeners {
            listener.on_event(&event);
        }
    }
}
