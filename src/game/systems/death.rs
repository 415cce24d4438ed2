//! Death System
//!
//! Marks entities dead, freezes them, and advances death timers.
//! Monsters are removed after the delay; players respawn in place with
//! full health so a race never permanently eliminates a participant.

use tracing::debug;

use crate::core::vec2::Vec2;
use crate::ecs::component::DeathTimerComponent;
use crate::ecs::entity::{EntityId, EntityKind};
use crate::ecs::store::EntityStore;
use crate::game::events::{EventKind, GameEvent};
use crate::game::systems::health::HealthSystem;
use crate::game::systems::physics::PhysicsSystem;
use crate::game::systems::player::PlayerSystem;
use crate::game::systems::sprite::SpriteSystem;
use crate::game::systems::{System, SystemContext};

/// Owns death and respawn bookkeeping.
pub struct DeathSystem;

impl DeathSystem {
    /// Whether the entity is dead. `None` for entities that cannot die.
    pub fn is_dead(store: &EntityStore, entity: EntityId) -> Option<bool> {
        store
            .get::<DeathTimerComponent>(entity)
            .map(|timer| timer.dead)
    }

    fn handle_death(ctx: &mut SystemContext<'_>, entity: EntityId) {
        let Some(timer) = ctx.store.get_mut::<DeathTimerComponent>(entity) else {
            return;
        };
        if timer.dead {
            return;
        }
        timer.dead = true;
        timer.seconds_since_death = 0.0;

        PhysicsSystem::set_velocity(ctx.store, entity, Vec2::ZERO);
        SpriteSystem::set_animation(ctx.store, entity, "death");
        PlayerSystem::lock_capabilities(ctx.store, entity);
        debug!(entity = ?entity, kind = ?ctx.store.kind_of(entity), "entity died");
    }

    fn respawn_player(ctx: &mut SystemContext<'_>, player: EntityId) {
        HealthSystem::set_health(ctx.store, player, ctx.config.combat.initial_player_health);
        if let Some(timer) = ctx.store.get_mut::<DeathTimerComponent>(player) {
            timer.dead = false;
            timer.seconds_since_death = 0.0;
        }
        PlayerSystem::restore_capabilities(ctx.store, player);
        SpriteSystem::clear_animation(ctx.store, player);
        debug!(player = ?player, "player respawned");
    }
}

impl System for DeathSystem {
    fn name(&self) -> &'static str {
        "death"
    }

    fn interests(&self) -> &'static [EventKind] {
        &[EventKind::PlayerDeath, EventKind::MonsterDeath]
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, delta_time: f32) {
        let mut expired: Vec<EntityId> = Vec::new();
        for (entity, timer) in ctx.store.components_mut::<DeathTimerComponent>() {
            if !timer.dead {
                continue;
            }
            timer.seconds_since_death += delta_time;
            if timer.seconds_since_death >= ctx.config.death.removal_delay {
                expired.push(entity);
            }
        }

        for entity in expired {
            match ctx.store.kind_of(entity) {
                Some(EntityKind::Player) => Self::respawn_player(ctx, entity),
                Some(_) => ctx.events.push(GameEvent::Remove { entity }),
                None => {}
            }
        }
    }

    fn on_event(&mut self, ctx: &mut SystemContext<'_>, event: &GameEvent) {
        match event {
            GameEvent::PlayerDeath { player } => Self::handle_death(ctx, *player),
            GameEvent::MonsterDeath { monster } => Self::handle_death(ctx, *monster),
            _ => {}
        }
    }
}
