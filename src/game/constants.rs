//! Gameplay Constants and Configuration
//!
//! Collision category bits, entity dimensions, and the tunable config
//! structs consumed by the systems.

use std::collections::BTreeMap;

use crate::core::vec2::Vec2;

// =============================================================================
// COLLISION CATEGORIES
// =============================================================================

/// Physics category bits, one per collidable family.
pub mod category {
    /// Player bodies.
    pub const PLAYER: u32 = 1 << 0;
    /// Monster bodies.
    pub const MONSTER: u32 = 1 << 1;
    /// Collectible pickups.
    pub const COLLECTIBLE: u32 = 1 << 2;
    /// Obstacles.
    pub const OBSTACLE: u32 = 1 << 3;
    /// Walls and level boundaries.
    pub const WALL: u32 = 1 << 4;
    /// The floor.
    pub const FLOOR: u32 = 1 << 5;
    /// Grapple hooks and ropes.
    pub const HOOK: u32 = 1 << 6;
    /// Power-up boxes.
    pub const POWER_UP_BOX: u32 = 1 << 7;
    /// Homing missiles.
    pub const HOMING_MISSILE: u32 = 1 << 8;
}

/// Which categories report contacts to the core, per family.
pub mod contact_mask {
    use super::category;

    /// Contacts reported for players.
    pub const PLAYER: u32 = category::MONSTER
        | category::COLLECTIBLE
        | category::OBSTACLE
        | category::WALL
        | category::FLOOR
        | category::POWER_UP_BOX
        | category::HOMING_MISSILE;
    /// Contacts reported for monsters.
    pub const MONSTER: u32 =
        category::PLAYER | category::OBSTACLE | category::WALL | category::FLOOR;
    /// Contacts reported for collectibles.
    pub const COLLECTIBLE: u32 = category::PLAYER;
    /// Contacts reported for hooks.
    pub const HOOK: u32 = category::OBSTACLE | category::WALL | category::FLOOR;
    /// Contacts reported for power-up boxes.
    pub const POWER_UP_BOX: u32 = category::PLAYER;
    /// Contacts reported for missiles.
    pub const HOMING_MISSILE: u32 = category::PLAYER | category::FLOOR;
    /// Contacts reported for static geometry.
    pub const GEOMETRY: u32 =
        category::PLAYER | category::MONSTER | category::HOOK | category::HOMING_MISSILE;
}

/// Which categories bodies physically collide with, per family.
pub mod collision_mask {
    use super::category;

    /// Solid collisions for players.
    pub const PLAYER: u32 =
        category::MONSTER | category::OBSTACLE | category::WALL | category::FLOOR;
    /// Solid collisions for monsters.
    pub const MONSTER: u32 =
        category::PLAYER | category::OBSTACLE | category::WALL | category::FLOOR;
    /// Collectibles pass through everything.
    pub const COLLECTIBLE: u32 = 0;
    /// Hooks pass through everything; anchoring is event-driven.
    pub const HOOK: u32 = 0;
    /// Power-up boxes pass through everything.
    pub const POWER_UP_BOX: u32 = 0;
    /// Missiles pass through everything; hits are event-driven.
    pub const HOMING_MISSILE: u32 = 0;
    /// Static geometry blocks players and monsters.
    pub const GEOMETRY: u32 = category::PLAYER | category::MONSTER;
}

// =============================================================================
// DIMENSIONS
// =============================================================================

/// Canonical entity sizes.
pub mod dimensions {
    use crate::core::vec2::Vec2;

    /// Player body size.
    pub const PLAYER: Vec2 = Vec2::new(70.0, 100.0);
    /// Hook head size.
    pub const HOOK: Vec2 = Vec2::new(20.0, 20.0);
    /// Finish-line flag size.
    pub const FLAG: Vec2 = Vec2::new(100.0, 200.0);
    /// Homing missile size.
    pub const HOMING_MISSILE: Vec2 = Vec2::new(50.0, 20.0);
}

/// Inset applied to both bodies when deciding whether a player landed
/// on top of a monster.
pub const ATTACK_EDGE_INSET: f32 = 10.0;

/// Alignment window for monster direction reversal on obstacle contact.
pub const CONTACT_ALIGNMENT_TOLERANCE: f32 = 49.99;

/// How far ahead of the player a homing missile materializes.
pub const MISSILE_SPAWN_AHEAD: f32 = 100.0;

/// Launch impulse given to a homing missile.
pub const MISSILE_LAUNCH_IMPULSE: Vec2 = Vec2::new(4_000.0, 0.0);

/// Seconds a speed boost lasts.
pub const SPEED_BOOST_DURATION: f32 = 15.0;

/// Run-speed multiplier while a speed boost is active.
pub const SPEED_BOOST_MULTIPLIER: f32 = 2.5;

// =============================================================================
// CONFIG STRUCTS
// =============================================================================

/// Grapple-hook tuning.
#[derive(Clone, Debug)]
pub struct HookConfig {
    /// Per-tick endpoint delta when fired rightward.
    pub delta_right: Vec2,
    /// Per-tick endpoint delta when fired leftward.
    pub delta_left: Vec2,
    /// Per-tick swing rotation in degrees.
    pub delta_angle_degrees: f32,
    /// Maximum rope length; shooting past this releases the hook.
    pub max_length: f32,
    /// Minimum usable length; an anchor closer than this is discarded.
    pub min_length: f32,
    /// Length pulled in during the retract phase.
    pub default_retract_length: f32,
    /// Projected swing arc in degrees used to seed the swing budget.
    pub default_swing_angle_degrees: f32,
}

impl Default for HookConfig {
    fn default() -> Self {
        Self {
            delta_right: Vec2::new(10.0, 10.0),
            delta_left: Vec2::new(-10.0, 10.0),
            delta_angle_degrees: 3.0,
            max_length: 900.0,
            min_length: 100.0,
            default_retract_length: 140.0,
            default_swing_angle_degrees: 120.0,
        }
    }
}

impl HookConfig {
    /// The per-tick delta for the fired direction.
    pub fn delta(&self, is_left: bool) -> Vec2 {
        if is_left {
            self.delta_left
        } else {
            self.delta_right
        }
    }

    /// Magnitude of one tick of hook travel.
    pub fn delta_magnitude(&self, is_left: bool) -> f32 {
        self.delta(is_left).length()
    }
}

/// Health and attack tuning.
#[derive(Clone, Debug)]
pub struct CombatConfig {
    /// Starting player health.
    pub initial_player_health: i32,
    /// Starting monster health when a level omits it.
    pub initial_monster_health: i32,
    /// Health delta applied to a player hit by a monster.
    pub monster_attack_damage: i32,
    /// Health delta applied to a monster stomped by a player.
    pub player_attack_damage: i32,
    /// Horizontal knockback magnitude for a player hit by a monster.
    pub monster_knockback: Vec2,
    /// Impulse applied to a monster stomped by a player.
    pub player_attack_impulse: Vec2,
    /// Health delta applied to a player hit by a missile.
    pub missile_damage: i32,
    /// Horizontal knockback magnitude for a missile hit.
    pub missile_knockback: Vec2,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            initial_player_health: 100,
            initial_monster_health: 100,
            monster_attack_damage: -20,
            player_attack_damage: -200,
            monster_knockback: Vec2::new(2_500.0, 0.0),
            player_attack_impulse: Vec2::new(0.0, 400.0),
            missile_damage: -50,
            missile_knockback: Vec2::new(1_500.0, 0.0),
        }
    }
}

/// Movement tuning.
#[derive(Clone, Debug)]
pub struct MovementConfig {
    /// Impulse applied on jump.
    pub jump_impulse: Vec2,
    /// Player horizontal speed cap.
    pub max_player_run_speed: f32,
    /// Monster horizontal speed cap.
    pub max_monster_run_speed: f32,
    /// Initial monster patrol speed.
    pub monster_move_speed: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            jump_impulse: Vec2::new(0.0, 600.0),
            max_player_run_speed: 400.0,
            max_monster_run_speed: 200.0,
            monster_move_speed: 200.0,
        }
    }
}

/// Death and respawn tuning.
#[derive(Clone, Debug)]
pub struct DeathConfig {
    /// Seconds a corpse lingers before removal (monsters) or respawn
    /// (players).
    pub removal_delay: f32,
}

impl Default for DeathConfig {
    fn default() -> Self {
        Self { removal_delay: 3.0 }
    }
}

/// Race-mode scoring: finish ranking to score bonus.
#[derive(Clone, Debug)]
pub struct RaceConfig {
    /// Bonus applied per finish ranking (1-based).
    pub ranking_bonus: BTreeMap<u32, i32>,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            ranking_bonus: BTreeMap::from([(1, 100), (2, 50), (3, 25), (4, 10)]),
        }
    }
}

impl RaceConfig {
    /// The bonus for a ranking; unlisted rankings earn nothing.
    pub fn bonus_for(&self, ranking: u32) -> i32 {
        self.ranking_bonus.get(&ranking).copied().unwrap_or(0)
    }
}

/// Top-level engine configuration.
#[derive(Clone, Debug, Default)]
pub struct EngineConfig {
    /// Grapple-hook tuning.
    pub hook: HookConfig,
    /// Combat tuning.
    pub combat: CombatConfig,
    /// Movement tuning.
    pub movement: MovementConfig,
    /// Death/respawn tuning.
    pub death: DeathConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hook_delta_direction() {
        let config = HookConfig::default();
        assert_eq!(config.delta(false), Vec2::new(10.0, 10.0));
        assert_eq!(config.delta(true), Vec2::new(-10.0, 10.0));
        // Same magnitude either way.
        assert_eq!(config.delta_magnitude(true), config.delta_magnitude(false));
    }

    #[test]
    fn test_race_bonus_table() {
        let config = RaceConfig::default();
        assert_eq!(config.bonus_for(1), 100);
        assert_eq!(config.bonus_for(2), 50);
        assert_eq!(config.bonus_for(3), 25);
        assert_eq!(config.bonus_for(4), 10);
        assert_eq!(config.bonus_for(5), 0);
    }

    #[test]
    fn test_categories_are_disjoint() {
        let bits = [
            category::PLAYER,
            category::MONSTER,
            category::COLLECTIBLE,
            category::OBSTACLE,
            category::WALL,
            category::FLOOR,
            category::HOOK,
            category::POWER_UP_BOX,
            category::HOMING_MISSILE,
        ];
        let mut seen = 0u32;
        for bit in bits {
            assert_eq!(seen & bit, 0);
            seen |= bit;
        }
    }
}
