//! Homing Missile System
//!
//! Spawns missiles when the power-up fires, acquires targets, steers
//! flight, and resolves hits.

use tracing::debug;

use crate::core::vec2::Vec2;
use crate::ecs::component::{HomingMissileComponent, PowerUpKind};
use crate::ecs::entity::{EntityId, EntityKind};
use crate::ecs::factory::spawn_homing_missile;
use crate::game::constants::{MISSILE_LAUNCH_IMPULSE, MISSILE_SPAWN_AHEAD};
use crate::game::events::{EventKind, GameEvent};
use crate::game::systems::health::HealthSystem;
use crate::game::systems::physics::PhysicsSystem;
use crate::game::systems::position::PositionSystem;
use crate::game::systems::{System, SystemContext};

/// Owns homing-missile behavior.
pub struct HomingMissileSystem;

impl HomingMissileSystem {
    fn launch(ctx: &mut SystemContext<'_>, player: EntityId) {
        let Some(position) = PositionSystem::position_of(ctx.store, player) else {
            return;
        };
        let spawn_at = Vec2::new(position.x + MISSILE_SPAWN_AHEAD, position.y);
        let missile = spawn_homing_missile(ctx.store, spawn_at, player, MISSILE_LAUNCH_IMPULSE);
        debug!(player = ?player, missile = ?missile, "homing missile launched");
    }

    fn acquire_and_steer(ctx: &mut SystemContext<'_>, missile: EntityId) {
        let Some(position) = PositionSystem::position_of(ctx.store, missile) else {
            return;
        };
        let Some(guidance) = ctx.store.get::<HomingMissileComponent>(missile).copied() else {
            return;
        };

        match guidance.target {
            None => {
                let Some(target) =
                    PositionSystem::entity_ahead(ctx.store, position, EntityKind::Player)
                else {
                    return;
                };
                if let Some(component) = ctx.store.get_mut::<HomingMissileComponent>(missile) {
                    component.target = Some(target);
                }
                PhysicsSystem::apply_impulse(ctx.store, missile, guidance.impulse);
            }
            Some(target) => {
                let Some(target_position) = PositionSystem::position_of(ctx.store, target) else {
                    // Target vanished; fly on and let the floor catch it.
                    return;
                };
                let Some(velocity) = PhysicsSystem::velocity_of(ctx.store, missile) else {
                    return;
                };
                let heading = (target_position - position).normalize();
                if heading == Vec2::ZERO {
                    return;
                }
                PhysicsSystem::set_velocity(ctx.store, missile, heading.scale(velocity.length()));
                PositionSystem::rotate_toward(ctx.store, missile, heading);
            }
        }
    }

    fn handle_player_hit(ctx: &mut SystemContext<'_>, player: EntityId, missile: EntityId) {
        if ctx.store.get::<HomingMissileComponent>(missile).is_none() {
            return;
        }

        HealthSystem::apply_health_change(ctx.store, player, ctx.config.combat.missile_damage);

        // Knock the player along the missile's travel direction.
        let knockback = ctx.config.combat.missile_knockback;
        let travelling_left = PhysicsSystem::velocity_of(ctx.store, missile)
            .map(|velocity| velocity.x < 0.0)
            .unwrap_or(false);
        let impulse = if travelling_left { -knockback } else { knockback };
        PhysicsSystem::apply_impulse(ctx.store, player, impulse);

        ctx.events.push(GameEvent::Remove { entity: missile });
        if !HealthSystem::has_health(ctx.store, player) {
            debug!(player = ?player, "player died to missile");
            ctx.events.push(GameEvent::PlayerDeath { player });
        }
    }
}

impl System for HomingMissileSystem {
    fn name(&self) -> &'static str {
        "homing_missile"
    }

    fn interests(&self) -> &'static [EventKind] {
        &[
            EventKind::PowerUpGranted,
            EventKind::PlayerMissileContact,
            EventKind::MissileFloorContact,
        ]
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, _delta_time: f32) {
        for missile in ctx.store.entities_of_kind(EntityKind::HomingMissile) {
            Self::acquire_and_steer(ctx, missile);
        }
    }

    fn on_event(&mut self, ctx: &mut SystemContext<'_>, event: &GameEvent) {
        match event {
            GameEvent::PowerUpGranted { player, kind } if *kind == PowerUpKind::HomingMissile => {
                Self::launch(ctx, *player);
            }
            GameEvent::PlayerMissileContact { player, missile } => {
                Self::handle_player_hit(ctx, *player, *missile);
            }
            GameEvent::MissileFloorContact { missile } => {
                ctx.events.push(GameEvent::Remove { entity: *missile });
            }
            _ => {}
        }
    }
}
