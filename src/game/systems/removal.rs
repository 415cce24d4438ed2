//! Removal System
//!
//! Deletes entities in response to Remove events. Removal happens at
//! the flush point, so every system sees a consistent store during its
//! update.

use tracing::debug;

use crate::game::events::{EventKind, GameEvent};
use crate::game::systems::{System, SystemContext};

/// Processes entity removal requests.
pub struct RemovalSystem;

impl System for RemovalSystem {
    fn name(&self) -> &'static str {
        "removal"
    }

    fn interests(&self) -> &'static [EventKind] {
        &[EventKind::Remove]
    }

    fn on_event(&mut self, ctx: &mut SystemContext<'_>, event: &GameEvent) {
        if let GameEvent::Remove { entity } = event {
            debug!(entity = ?entity, kind = ?ctx.store.kind_of(*entity), "removing entity");
            ctx.store.remove_entity(*entity);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::entity::EntityKind;
    use crate::ecs::store::EntityStore;
    use crate::game::constants::EngineConfig;
    use crate::game::events::EventQueue;

    #[test]
    fn test_remove_event_deletes_entity() {
        let mut store = EntityStore::new();
        let id = store.add_entity(EntityKind::Collectible);

        let mut events = EventQueue::new();
        let mut sounds = Vec::new();
        let config = EngineConfig::default();
        let mut ctx = SystemContext {
            store: &mut store,
            events: &mut events,
            sounds: &mut sounds,
            config: &config,
        };

        RemovalSystem.on_event(&mut ctx, &GameEvent::Remove { entity: id });
        assert!(!store.contains(id));
    }

    #[test]
    fn test_double_remove_is_noop() {
        let mut store = EntityStore::new();
        let id = store.add_entity(EntityKind::Collectible);
        store.remove_entity(id);

        let mut events = EventQueue::new();
        let mut sounds = Vec::new();
        let config = EngineConfig::default();
        let mut ctx = SystemContext {
            store: &mut store,
            events: &mut events,
            sounds: &mut sounds,
            config: &config,
        };
        // Second removal of the same id must not panic.
        RemovalSystem.on_event(&mut ctx, &GameEvent::Remove { entity: id });
        assert!(!store.contains(id));
    }
}
