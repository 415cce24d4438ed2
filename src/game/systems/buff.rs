//! Buff System
//!
//! Drives speed-boost lifecycles: applies the run-speed multiplier
//! once, counts the duration down, reverts on expiry and removes the
//! carrier entity.

use crate::ecs::component::{PhysicsComponent, SpeedBoostComponent};
use crate::ecs::entity::EntityId;
use crate::game::events::GameEvent;
use crate::game::systems::{System, SystemContext};

/// Applies and expires timed buffs.
pub struct BuffSystem;

impl System for BuffSystem {
    fn name(&self) -> &'static str {
        "buff"
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, delta_time: f32) {
        let mut to_apply: Vec<(EntityId, f32)> = Vec::new();
        let mut to_revert: Vec<(EntityId, EntityId, f32)> = Vec::new();

        for (carrier, boost) in ctx.store.components_mut::<SpeedBoostComponent>() {
            if !boost.applied && boost.remaining > 0.0 {
                boost.applied = true;
                to_apply.push((boost.target, boost.multiplier));
            }
            boost.remaining -= delta_time;
            // The carrier lingers until its Remove event is flushed;
            // the applied flag keeps the revert from running twice.
            if boost.remaining <= 0.0 && boost.applied {
                boost.applied = false;
                to_revert.push((carrier, boost.target, boost.multiplier));
            }
        }

        for (target, multiplier) in to_apply {
            if let Some(body) = ctx.store.get_mut::<PhysicsComponent>(target) {
                body.max_run_speed *= multiplier;
            }
        }

        for (carrier, target, multiplier) in to_revert {
            if let Some(body) = ctx.store.get_mut::<PhysicsComponent>(target) {
                body.max_run_speed /= multiplier;
            }
            ctx.events.push(GameEvent::Remove { entity: carrier });
        }
    }
}
