//! Movement System
//!
//! Translates Move/StopMoving/Jump events into velocity, facing, and
//! animation changes. Player capability flags gate each input.

use crate::core::vec2::Vec2;
use crate::ecs::component::{PhysicsComponent, PlayerComponent};
use crate::ecs::entity::EntityId;
use crate::game::events::{EventKind, GameEvent};
use crate::game::systems::physics::PhysicsSystem;
use crate::game::systems::position::PositionSystem;
use crate::game::systems::sprite::SpriteSystem;
use crate::game::systems::{System, SystemContext};

/// Drives horizontal movement and jumps.
pub struct MovementSystem;

impl MovementSystem {
    fn handle_move(ctx: &mut SystemContext<'_>, entity: EntityId, to_left: bool) {
        // Players with control locked (hook in flight, death) ignore input.
        if let Some(player) = ctx.store.get::<PlayerComponent>(entity) {
            if !player.can_move {
                return;
            }
        }

        let Some(speed) = ctx
            .store
            .get::<PhysicsComponent>(entity)
            .map(|body| body.max_run_speed)
        else {
            return;
        };

        let direction = if to_left { -1.0 } else { 1.0 };
        if let Some(body) = ctx.store.get_mut::<PhysicsComponent>(entity) {
            body.velocity.x = direction * speed;
        }
        PositionSystem::set_facing_left(ctx.store, entity, to_left);
        SpriteSystem::set_animation(ctx.store, entity, if to_left { "runLeft" } else { "run" });
    }

    fn handle_stop_moving(ctx: &mut SystemContext<'_>, entity: EntityId) {
        if let Some(body) = ctx.store.get_mut::<PhysicsComponent>(entity) {
            body.velocity.x = 0.0;
        }
        SpriteSystem::clear_animation(ctx.store, entity);
    }

    fn handle_jump(ctx: &mut SystemContext<'_>, entity: EntityId, impulse: Vec2) {
        if let Some(player) = ctx.store.get::<PlayerComponent>(entity) {
            if !player.can_jump {
                return;
            }
        }

        PhysicsSystem::apply_impulse(ctx.store, entity, impulse);

        // Grounded again only after the next floor contact.
        if let Some(player) = ctx.store.get_mut::<PlayerComponent>(entity) {
            player.can_jump = false;
        }
    }
}

impl System for MovementSystem {
    fn name(&self) -> &'static str {
        "movement"
    }

    fn interests(&self) -> &'static [EventKind] {
        &[EventKind::Move, EventKind::StopMoving, EventKind::Jump]
    }

    fn on_event(&mut self, ctx: &mut SystemContext<'_>, event: &GameEvent) {
        match event {
            GameEvent::Move { entity, to_left } => Self::handle_move(ctx, *entity, *to_left),
            GameEvent::StopMoving { entity } => Self::handle_stop_moving(ctx, *entity),
            GameEvent::Jump { entity, impulse } => Self::handle_jump(ctx, *entity, *impulse),
            _ => {}
        }
    }
}
