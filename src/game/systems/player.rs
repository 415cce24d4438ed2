//! Player System
//!
//! Player-specific bookkeeping: finish flags and restoring the jump
//! capability on landing.

use crate::ecs::component::PlayerComponent;
use crate::ecs::entity::EntityId;
use crate::ecs::store::EntityStore;
use crate::game::events::{EventKind, GameEvent};
use crate::game::systems::hook::GrappleHookSystem;
use crate::game::systems::{System, SystemContext};

/// Owns player capability bookkeeping.
pub struct PlayerSystem;

impl PlayerSystem {
    /// Whether the player has crossed the finish line. `None` for
    /// non-player entities.
    pub fn has_player_finished(store: &EntityStore, entity: EntityId) -> Option<bool> {
        store
            .get::<PlayerComponent>(entity)
            .map(|player| player.finished)
    }

    /// Lock all capability flags (death, hook flight).
    pub fn lock_capabilities(store: &mut EntityStore, entity: EntityId) {
        if let Some(player) = store.get_mut::<PlayerComponent>(entity) {
            player.can_move = false;
            player.can_jump = false;
            player.can_hook = false;
        }
    }

    /// Restore all capability flags.
    pub fn restore_capabilities(store: &mut EntityStore, entity: EntityId) {
        if let Some(player) = store.get_mut::<PlayerComponent>(entity) {
            player.can_move = true;
            player.can_jump = true;
            player.can_hook = true;
        }
    }
}

impl System for PlayerSystem {
    fn name(&self) -> &'static str {
        "player"
    }

    fn interests(&self) -> &'static [EventKind] {
        &[EventKind::PlayerFloorContact]
    }

    fn on_event(&mut self, ctx: &mut SystemContext<'_>, event: &GameEvent) {
        let GameEvent::PlayerFloorContact { player, .. } = event else {
            return;
        };

        // Landing restores the jump, unless a hook is locking control.
        if GrappleHookSystem::hook_owned_by(ctx.store, *player).is_some() {
            return;
        }
        if let Some(component) = ctx.store.get_mut::<PlayerComponent>(*player) {
            component.can_jump = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::Vec2;
    use crate::ecs::factory::{spawn_grapple_hook, spawn_player};
    use crate::game::constants::EngineConfig;
    use crate::game::events::EventQueue;

    #[test]
    fn test_floor_contact_restores_jump() {
        let mut store = EntityStore::new();
        let config = EngineConfig::default();
        let player = spawn_player(
            &mut store,
            &config.combat,
            &config.movement,
            0,
            Vec2::new(0.0, 150.0),
        );
        store.get_mut::<PlayerComponent>(player).unwrap().can_jump = false;

        let mut events = EventQueue::new();
        let mut sounds = Vec::new();
        let mut ctx = SystemContext {
            store: &mut store,
            events: &mut events,
            sounds: &mut sounds,
            config: &config,
        };
        PlayerSystem.on_event(
            &mut ctx,
            &GameEvent::PlayerFloorContact {
                player,
                contact_point: Vec2::ZERO,
            },
        );

        assert!(store.get::<PlayerComponent>(player).unwrap().can_jump);
    }

    #[test]
    fn test_floor_contact_does_not_restore_jump_while_hooked() {
        let mut store = EntityStore::new();
        let config = EngineConfig::default();
        let player = spawn_player(
            &mut store,
            &config.combat,
            &config.movement,
            0,
            Vec2::new(0.0, 150.0),
        );
        spawn_grapple_hook(&mut store, &config.hook, player, false, Vec2::new(0.0, 150.0));
        store.get_mut::<PlayerComponent>(player).unwrap().can_jump = false;

        let mut events = EventQueue::new();
        let mut sounds = Vec::new();
        let mut ctx = SystemContext {
            store: &mut store,
            events: &mut events,
            sounds: &mut sounds,
            config: &config,
        };
        PlayerSystem.on_event(
            &mut ctx,
            &GameEvent::PlayerFloorContact {
                player,
                contact_point: Vec2::ZERO,
            },
        );

        assert!(!store.get::<PlayerComponent>(player).unwrap().can_jump);
    }
}
