//! Monster System
//!
//! Keeps monster facing/animation consistent with physics-driven
//! movement, classifies player contacts into stomps vs bites, and
//! reverses patrol direction at geometry.

use crate::core::vec2::Vec2;
use crate::ecs::component::GrappleHookOwnerComponent;
use crate::ecs::entity::{EntityId, EntityKind};
use crate::game::constants::{ATTACK_EDGE_INSET, CONTACT_ALIGNMENT_TOLERANCE};
use crate::game::events::{EventKind, GameEvent};
use crate::game::systems::death::DeathSystem;
use crate::game::systems::physics::PhysicsSystem;
use crate::game::systems::position::PositionSystem;
use crate::game::systems::sprite::SpriteSystem;
use crate::game::systems::{System, SystemContext};

/// Owns monster behavior.
pub struct MonsterSystem;

impl MonsterSystem {
    fn handle_reversal(ctx: &mut SystemContext<'_>, monster: EntityId, is_left: bool) {
        if DeathSystem::is_dead(ctx.store, monster) != Some(false) {
            return;
        }

        ctx.events.push(GameEvent::Move {
            entity: monster,
            to_left: is_left,
        });
        SpriteSystem::set_animation(ctx.store, monster, if is_left { "runLeft" } else { "run" });
    }

    fn handle_player_contact(
        ctx: &mut SystemContext<'_>,
        player: EntityId,
        monster: EntityId,
    ) {
        // Touching a monster always tears an active hook off the player.
        let hooks: Vec<EntityId> = ctx
            .store
            .components::<GrappleHookOwnerComponent>()
            .filter(|(_, owner)| owner.owner == player)
            .map(|(hook, _)| hook)
            .collect();
        for hook in hooks {
            ctx.events.push(GameEvent::ReleaseHook { hook });
        }

        let Some(player_position) = PositionSystem::position_of(ctx.store, player) else {
            return;
        };
        let Some(monster_position) = PositionSystem::position_of(ctx.store, monster) else {
            return;
        };
        let Some(player_size) = PhysicsSystem::size_of(ctx.store, player) else {
            return;
        };
        let Some(monster_size) = PhysicsSystem::size_of(ctx.store, monster) else {
            return;
        };

        // A stomp is a player whose bottom edge is above the monster's
        // top edge (inset tolerance on both) and inside its footprint.
        let player_bottom = player_position.y - (player_size.y / 2.0 - ATTACK_EDGE_INSET);
        let monster_top = monster_position.y + (monster_size.y / 2.0 - ATTACK_EDGE_INSET);
        let is_player_above = player_bottom >= monster_top;
        let is_within_width = player_position.x < monster_position.x + monster_size.x / 2.0
            && player_position.x > monster_position.x - monster_size.x / 2.0;
        let is_player_attack = is_player_above && is_within_width;

        // Turn the monster away from the player either way.
        let is_left = monster_position.x < player_position.x;
        ctx.events.push(GameEvent::MonsterMovementReversal {
            monster,
            is_left,
        });

        if DeathSystem::is_dead(ctx.store, player) != Some(false)
            || DeathSystem::is_dead(ctx.store, monster) != Some(false)
        {
            return;
        }

        if is_player_attack {
            ctx.events.push(GameEvent::PlayerAttackMonster { player, monster });
        } else {
            ctx.events.push(GameEvent::MonsterAttackPlayer { monster, player });
        }
    }

    fn handle_obstacle_contact(
        ctx: &mut SystemContext<'_>,
        monster: EntityId,
        contact_point: Vec2,
    ) {
        let Some(position) = PositionSystem::position_of(ctx.store, monster) else {
            return;
        };

        // Only side hits reverse: vertically aligned with the contact,
        // horizontally clear of it.
        if (position.y - contact_point.y).abs() > CONTACT_ALIGNMENT_TOLERANCE
            || (position.x - contact_point.x).abs() <= CONTACT_ALIGNMENT_TOLERANCE
        {
            return;
        }

        let is_left = position.x < contact_point.x;
        ctx.events.push(GameEvent::MonsterMovementReversal {
            monster,
            is_left,
        });
    }

    fn handle_wall_contact(ctx: &mut SystemContext<'_>, monster: EntityId, contact_point: Vec2) {
        let Some(position) = PositionSystem::position_of(ctx.store, monster) else {
            return;
        };

        let is_left = position.x < contact_point.x;
        ctx.events.push(GameEvent::MonsterMovementReversal {
            monster,
            is_left,
        });
    }
}

impl System for MonsterSystem {
    fn name(&self) -> &'static str {
        "monster"
    }

    fn interests(&self) -> &'static [EventKind] {
        &[
            EventKind::MonsterMovementReversal,
            EventKind::PlayerMonsterContact,
            EventKind::MonsterObstacleContact,
            EventKind::MonsterWallContact,
        ]
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, _delta_time: f32) {
        // Re-emit a Move matching each live monster's velocity sign so
        // facing and animation track physics-driven movement.
        for monster in ctx.store.entities_of_kind(EntityKind::Monster) {
            if DeathSystem::is_dead(ctx.store, monster) != Some(false) {
                continue;
            }
            let Some(velocity) = PhysicsSystem::velocity_of(ctx.store, monster) else {
                continue;
            };
            ctx.events.push(GameEvent::Move {
                entity: monster,
                to_left: velocity.x < 0.0,
            });
        }
    }

    fn on_event(&mut self, ctx: &mut SystemContext<'_>, event: &GameEvent) {
        match event {
            GameEvent::MonsterMovementReversal { monster, is_left } => {
                Self::handle_reversal(ctx, *monster, *is_left);
            }
            GameEvent::PlayerMonsterContact {
                player, monster, ..
            } => {
                Self::handle_player_contact(ctx, *player, *monster);
            }
            GameEvent::MonsterObstacleContact {
                monster,
                contact_point,
            } => {
                Self::handle_obstacle_contact(ctx, *monster, *contact_point);
            }
            GameEvent::MonsterWallContact {
                monster,
                contact_point,
            } => {
                Self::handle_wall_contact(ctx, *monster, *contact_point);
            }
            _ => {}
        }
    }
}
