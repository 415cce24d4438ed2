//! Entity Factories
//!
//! One spawn function per entity kind, wiring up the canonical
//! component set, sprite keys, and physics bitmasks.

use crate::core::vec2::Vec2;
use crate::ecs::builder::EntityBuilder;
use crate::ecs::component::{PhysicsComponent, PowerUpKind};
use crate::ecs::entity::{EntityId, EntityKind};
use crate::ecs::store::EntityStore;
use crate::game::constants::{
    category, collision_mask, contact_mask, dimensions, CombatConfig, HookConfig, MovementConfig,
};

const PLAYER_IMAGES: [&str; 4] = [
    "playerRedNose",
    "playerAdventurer",
    "playerJack",
    "playerNinja",
];

/// Spawn a player avatar for the given slot.
pub fn spawn_player(
    store: &mut EntityStore,
    combat: &CombatConfig,
    movement: &MovementConfig,
    index: u8,
    position: Vec2,
) -> EntityId {
    let image = PLAYER_IMAGES[usize::from(index) % PLAYER_IMAGES.len()];

    EntityBuilder::new(EntityKind::Player)
        .player(index)
        .position(position)
        .health(combat.initial_player_health)
        .sprite(image, dimensions::PLAYER)
        .score(0)
        .death_timer()
        .physics(
            PhysicsComponent::rectangle(dimensions::PLAYER)
                .with_category(category::PLAYER)
                .with_contact_test(contact_mask::PLAYER)
                .with_collision_mask(collision_mask::PLAYER)
                .with_gravity(true)
                .with_restitution(0.0)
                .with_max_run_speed(movement.max_player_run_speed),
        )
        .spawn(store)
}

/// Spawn a patrolling monster.
pub fn spawn_monster(
    store: &mut EntityStore,
    movement: &MovementConfig,
    position: Vec2,
    health: i32,
    size: Vec2,
) -> EntityId {
    EntityBuilder::new(EntityKind::Monster)
        .position(position)
        .health(health)
        .sprite("monster", size)
        .death_timer()
        .physics(
            PhysicsComponent::rectangle(size)
                .with_velocity(Vec2::new(movement.monster_move_speed, 0.0))
                .with_category(category::MONSTER)
                .with_contact_test(contact_mask::MONSTER)
                .with_collision_mask(collision_mask::MONSTER)
                .with_gravity(true)
                .with_restitution(0.0)
                .with_max_run_speed(movement.max_monster_run_speed),
        )
        .spawn(store)
}

/// Spawn a collectible star.
pub fn spawn_collectible(
    store: &mut EntityStore,
    position: Vec2,
    points: i32,
    radius: f32,
) -> EntityId {
    EntityBuilder::new(EntityKind::Collectible)
        .position(position)
        .sprite("star", Vec2::new(radius * 2.0, radius * 2.0))
        .points(points)
        .physics(
            PhysicsComponent::circle(radius)
                .with_category(category::COLLECTIBLE)
                .with_contact_test(contact_mask::COLLECTIBLE)
                .with_collision_mask(collision_mask::COLLECTIBLE)
                .with_gravity(false)
                .with_dynamic(false),
        )
        .spawn(store)
}

/// Spawn an obstacle.
pub fn spawn_obstacle(store: &mut EntityStore, position: Vec2, size: Vec2) -> EntityId {
    EntityBuilder::new(EntityKind::Obstacle)
        .position(position)
        .sprite("obstacle", size)
        .physics(
            PhysicsComponent::rectangle(size)
                .with_category(category::OBSTACLE)
                .with_contact_test(contact_mask::GEOMETRY)
                .with_collision_mask(collision_mask::GEOMETRY)
                .with_dynamic(false),
        )
        .spawn(store)
}

/// Spawn a wall or level boundary.
pub fn spawn_wall(store: &mut EntityStore, position: Vec2, size: Vec2) -> EntityId {
    EntityBuilder::new(EntityKind::Wall)
        .position(position)
        .physics(
            PhysicsComponent::rectangle(size)
                .with_category(category::WALL)
                .with_contact_test(contact_mask::GEOMETRY)
                .with_collision_mask(collision_mask::GEOMETRY)
                .with_dynamic(false)
                .with_restitution(0.0),
        )
        .spawn(store)
}

/// Spawn the floor.
pub fn spawn_floor(store: &mut EntityStore, position: Vec2, size: Vec2) -> EntityId {
    EntityBuilder::new(EntityKind::Floor)
        .position(position)
        .physics(
            PhysicsComponent::rectangle(size)
                .with_category(category::FLOOR)
                .with_contact_test(contact_mask::GEOMETRY)
                .with_collision_mask(collision_mask::GEOMETRY)
                .with_dynamic(false)
                .with_restitution(0.0),
        )
        .spawn(store)
}

/// Spawn the finish-line flag.
pub fn spawn_finish_line(store: &mut EntityStore, position: Vec2) -> EntityId {
    EntityBuilder::new(EntityKind::FinishLine)
        .position(position)
        .sprite("flag", dimensions::FLAG)
        .spawn(store)
}

/// Spawn a power-up box.
pub fn spawn_power_up_box(
    store: &mut EntityStore,
    position: Vec2,
    size: Vec2,
    kind: PowerUpKind,
) -> EntityId {
    EntityBuilder::new(EntityKind::PowerUpBox)
        .position(position)
        .sprite("powerUpBox", size)
        .power_up(kind)
        .physics(
            PhysicsComponent::rectangle(size)
                .with_category(category::POWER_UP_BOX)
                .with_contact_test(contact_mask::POWER_UP_BOX)
                .with_collision_mask(collision_mask::POWER_UP_BOX)
                .with_dynamic(false),
        )
        .spawn(store)
}

/// Spawn a grapple hook and its rope, bound to the firing player.
///
/// Returns `(hook, rope)`. The pair is 1:1; the hook system removes
/// both on release.
pub fn spawn_grapple_hook(
    store: &mut EntityStore,
    config: &HookConfig,
    player: EntityId,
    is_left: bool,
    startpoint: Vec2,
) -> (EntityId, EntityId) {
    let rope = EntityBuilder::new(EntityKind::Rope)
        .position(startpoint)
        .sprite("rope", Vec2::ZERO)
        .physics(
            PhysicsComponent::rectangle(Vec2::ZERO)
                .with_category(category::HOOK)
                .with_contact_test(0)
                .with_collision_mask(collision_mask::HOOK)
                .with_dynamic(false)
                .with_gravity(false)
                .with_restitution(0.0),
        )
        .spawn(store);

    let hook = EntityBuilder::new(EntityKind::GrappleHook)
        .hook_owner(player)
        .owns_rope(rope)
        .grapple_hook(startpoint, is_left, config.default_retract_length)
        .position(startpoint)
        .sprite("hook", dimensions::HOOK)
        .physics(
            PhysicsComponent::rectangle(dimensions::HOOK)
                .with_category(category::HOOK)
                .with_contact_test(contact_mask::HOOK)
                .with_collision_mask(collision_mask::HOOK)
                .with_dynamic(true)
                .with_gravity(false)
                .with_restitution(0.0),
        )
        .spawn(store);

    (hook, rope)
}

/// Spawn a speed-boost carrier targeting an entity.
pub fn spawn_speed_boost(
    store: &mut EntityStore,
    target: EntityId,
    duration: f32,
    multiplier: f32,
) -> EntityId {
    EntityBuilder::new(EntityKind::SpeedBoostPowerUp)
        .speed_boost(target, duration, multiplier)
        .spawn(store)
}

/// Spawn a homing missile launched by a player.
pub fn spawn_homing_missile(
    store: &mut EntityStore,
    position: Vec2,
    source: EntityId,
    impulse: Vec2,
) -> EntityId {
    EntityBuilder::new(EntityKind::HomingMissile)
        .position(position)
        .sprite("homingMissile", dimensions::HOMING_MISSILE)
        .homing_missile(source, impulse)
        .physics(
            PhysicsComponent::rectangle(dimensions::HOMING_MISSILE)
                .with_category(category::HOMING_MISSILE)
                .with_contact_test(contact_mask::HOMING_MISSILE)
                .with_collision_mask(collision_mask::HOMING_MISSILE)
                .with_gravity(false)
                .with_linear_damping(0.0),
        )
        .spawn(store)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::component::{
        GrappleHookComponent, GrappleHookOwnerComponent, HealthComponent, OwnsRopeComponent,
        PlayerComponent, PointsComponent, SpriteComponent,
    };

    #[test]
    fn test_spawn_player_component_set() {
        let mut store = EntityStore::new();
        let combat = CombatConfig::default();
        let movement = MovementConfig::default();
        let id = spawn_player(&mut store, &combat, &movement, 1, Vec2::new(50.0, 150.0));

        assert_eq!(store.kind_of(id), Some(EntityKind::Player));
        assert_eq!(store.get::<PlayerComponent>(id).unwrap().index, 1);
        assert_eq!(store.get::<HealthComponent>(id).unwrap().health, 100);
        assert_eq!(store.get::<SpriteComponent>(id).unwrap().image, "playerAdventurer");
        let physics = store.get::<PhysicsComponent>(id).unwrap();
        assert_eq!(physics.category_bitmask, category::PLAYER);
        assert_eq!(physics.max_run_speed, movement.max_player_run_speed);
    }

    #[test]
    fn test_spawn_grapple_hook_pairs_hook_and_rope() {
        let mut store = EntityStore::new();
        let combat = CombatConfig::default();
        let movement = MovementConfig::default();
        let config = HookConfig::default();
        let player = spawn_player(&mut store, &combat, &movement, 0, Vec2::new(0.0, 0.0));

        let (hook, rope) = spawn_grapple_hook(&mut store, &config, player, false, Vec2::ZERO);

        assert_eq!(store.kind_of(hook), Some(EntityKind::GrappleHook));
        assert_eq!(store.kind_of(rope), Some(EntityKind::Rope));
        assert_eq!(store.get::<GrappleHookOwnerComponent>(hook).unwrap().owner, player);
        assert_eq!(store.get::<OwnsRopeComponent>(hook).unwrap().rope, rope);
        let hook_component = store.get::<GrappleHookComponent>(hook).unwrap();
        assert_eq!(hook_component.length_to_retract, config.default_retract_length);
    }

    #[test]
    fn test_spawn_collectible_is_static() {
        let mut store = EntityStore::new();
        let id = spawn_collectible(&mut store, Vec2::new(10.0, 10.0), 25, 16.0);

        let physics = store.get::<PhysicsComponent>(id).unwrap();
        assert!(!physics.is_dynamic);
        assert!(!physics.affected_by_gravity);
        assert_eq!(store.get::<PointsComponent>(id).unwrap().points, 25);
    }
}
