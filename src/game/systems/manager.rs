//! System Manager
//!
//! Owns every system, updates them in registration order, and drains
//! the event queue. The flush runs until the queue is empty, so events
//! enqueued by handlers are delivered within the same flush; systems
//! rely on same-frame chains (shoot → swing → release).

use tracing::trace;

use crate::game::events::GameEvent;
use crate::game::systems::{System, SystemContext};

/// Owns and drives all registered systems.
#[derive(Default)]
pub struct SystemManager {
    systems: Vec<Box<dyn System>>,
}

impl SystemManager {
    /// Create an empty manager.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a system. Registration order is update and delivery
    /// order.
    pub fn add(&mut self, system: Box<dyn System>) {
        self.systems.push(system);
    }

    /// Number of registered systems.
    pub fn len(&self) -> usize {
        self.systems.len()
    }

    /// Whether no systems are registered.
    pub fn is_empty(&self) -> bool {
        self.systems.is_empty()
    }

    /// Run every system's per-tick update in registration order.
    pub fn update_all(&mut self, ctx: &mut SystemContext<'_>, delta_time: f32) {
        for system in &mut self.systems {
            system.update(ctx, delta_time);
        }
    }

    /// Deliver queued events until the queue is empty.
    ///
    /// Each event goes once, in insertion order, to every system whose
    /// interests contain its kind; handlers may enqueue further events,
    /// which this same pass delivers.
    pub fn dispatch(&mut self, ctx: &mut SystemContext<'_>) {
        while let Some(event) = ctx.events.pop() {
            self.deliver(ctx, &event);
        }
    }

    fn deliver(&mut self, ctx: &mut SystemContext<'_>, event: &GameEvent) {
        let kind = event.kind();
        trace!(?kind, "delivering event");
        for system in &mut self.systems {
            if system.interests().contains(&kind) {
                system.on_event(ctx, event);
            }
        }
    }
}
