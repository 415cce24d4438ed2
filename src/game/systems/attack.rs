//! Attack System
//!
//! Applies attack damage and knockback, and emits death events when a
//! victim's health drops to zero or below.

use tracing::debug;

use crate::ecs::entity::EntityId;
use crate::game::events::{EventKind, GameEvent};
use crate::game::systems::health::HealthSystem;
use crate::game::systems::physics::PhysicsSystem;
use crate::game::systems::position::PositionSystem;
use crate::game::systems::{System, SystemContext};

/// Resolves attack events into damage and impulses.
pub struct AttackSystem;

impl AttackSystem {
    fn handle_monster_attack_player(
        ctx: &mut SystemContext<'_>,
        monster: EntityId,
        player: EntityId,
    ) {
        let Some(monster_position) = PositionSystem::position_of(ctx.store, monster) else {
            return;
        };
        let Some(player_position) = PositionSystem::position_of(ctx.store, player) else {
            return;
        };

        HealthSystem::apply_health_change(ctx.store, player, ctx.config.combat.monster_attack_damage);

        // Knock the player away from the monster.
        let knockback = ctx.config.combat.monster_knockback;
        let impulse = if monster_position.x > player_position.x {
            -knockback
        } else {
            knockback
        };
        PhysicsSystem::apply_impulse(ctx.store, player, impulse);

        if !HealthSystem::has_health(ctx.store, player) {
            debug!(player = ?player, "player died to monster attack");
            ctx.events.push(GameEvent::PlayerDeath { player });
        }
    }

    fn handle_player_attack_monster(
        ctx: &mut SystemContext<'_>,
        _player: EntityId,
        monster: EntityId,
    ) {
        HealthSystem::apply_health_change(ctx.store, monster, ctx.config.combat.player_attack_damage);
        PhysicsSystem::apply_impulse(ctx.store, monster, ctx.config.combat.player_attack_impulse);

        if !HealthSystem::has_health(ctx.store, monster) {
            debug!(monster = ?monster, "monster died to player stomp");
            ctx.events.push(GameEvent::MonsterDeath { monster });
        }
    }
}

impl System for AttackSystem {
    fn name(&self) -> &'static str {
        "attack"
    }

    fn interests(&self) -> &'static [EventKind] {
        &[EventKind::MonsterAttackPlayer, EventKind::PlayerAttackMonster]
    }

    fn on_event(&mut self, ctx: &mut SystemContext<'_>, event: &GameEvent) {
        match event {
            GameEvent::MonsterAttackPlayer { monster, player } => {
                Self::handle_monster_attack_player(ctx, *monster, *player);
            }
            GameEvent::PlayerAttackMonster { player, monster } => {
                Self::handle_player_attack_monster(ctx, *player, *monster);
            }
            _ => {}
        }
    }
}
