//! Decoupled event bus between the controller and the presentation layer.
//!
//! The controller emits an event on every status transition via
//! [`EventBus::emit`]; any number of views can [`EventBus::subscribe`]
//! and react independently. Built on [`tokio::sync::broadcast`].

use tokio::sync::broadcast;

use crate::request::Status;

/// Events that flow through the system.
#[derive(Debug, Clone)]
pub enum Event {
    /// A request changed status (carries the new status).
    StatusChanged { status: Status },
}

/// A broadcast channel that any component can emit to or subscribe from.
#[derive(Debug)]
pub struct EventBus {
    tx: broadcast::Sender<Event>,
}

impl EventBus {
    /// Create a new event bus with the given channel capacity.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Emit an event to all current subscribers.
    /// Returns the number of receivers that will see it.
    pub fn emit(&self, event: Event) -> usize {
        self.tx.send(event).unwrap_or(0)
    }

    /// Subscribe to events. Returns a receiver that yields all
    /// future events (does not replay past ones).
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(16)
    }
}
