//! Collision Resolution
//!
//! A fixed matrix from unordered kind pairs to pure pairwise resolvers.
//! Lookup tries `(a, b)` then the mirrored `(b, a)` with swapped ids,
//! so the outcome never depends on which body reported the contact
//! first. Resolvers inspect the store and return at most one event;
//! mutation happens only when that event is later delivered.

use crate::core::vec2::Vec2;
use crate::ecs::entity::{EntityId, EntityKind};
use crate::ecs::store::EntityStore;
use crate::game::events::GameEvent;

/// A pure pairwise contact resolver.
///
/// Arguments are always passed in the matrix entry's kind order.
pub type Resolver = fn(&EntityStore, EntityId, EntityId, Vec2) -> Option<GameEvent>;

/// Canonical contact pairs. Every unordered pair not listed yields no
/// event.
const CONTACT_RESOLVERS: &[((EntityKind, EntityKind), Resolver)] = &[
    ((EntityKind::Player, EntityKind::Monster), player_monster),
    ((EntityKind::Player, EntityKind::Collectible), player_collectible),
    ((EntityKind::Player, EntityKind::Obstacle), player_obstacle),
    ((EntityKind::Player, EntityKind::Floor), player_floor),
    ((EntityKind::Player, EntityKind::PowerUpBox), player_power_up_box),
    ((EntityKind::Player, EntityKind::HomingMissile), player_missile),
    ((EntityKind::Monster, EntityKind::Obstacle), monster_obstacle),
    ((EntityKind::Monster, EntityKind::Wall), monster_wall),
    ((EntityKind::GrappleHook, EntityKind::Obstacle), hook_geometry),
    ((EntityKind::GrappleHook, EntityKind::Floor), hook_geometry),
    ((EntityKind::GrappleHook, EntityKind::Wall), hook_geometry),
    ((EntityKind::HomingMissile, EntityKind::Floor), missile_floor),
];

/// Canonical contact-end pairs.
const SEPARATION_RESOLVERS: &[((EntityKind, EntityKind), Resolver)] = &[(
    (EntityKind::Player, EntityKind::Collectible),
    player_collectible_exit,
)];

fn lookup(
    table: &[((EntityKind, EntityKind), Resolver)],
    a: EntityKind,
    b: EntityKind,
) -> Option<Resolver> {
    table
        .iter()
        .find(|((ka, kb), _)| *ka == a && *kb == b)
        .map(|(_, resolver)| *resolver)
}

fn resolve(
    table: &[((EntityKind, EntityKind), Resolver)],
    store: &EntityStore,
    a: EntityId,
    b: EntityId,
    contact_point: Vec2,
) -> Option<GameEvent> {
    let kind_a = store.kind_of(a)?;
    let kind_b = store.kind_of(b)?;

    if let Some(resolver) = lookup(table, kind_a, kind_b) {
        return resolver(store, a, b, contact_point);
    }
    if let Some(resolver) = lookup(table, kind_b, kind_a) {
        return resolver(store, b, a, contact_point);
    }
    None
}

/// Resolve a contact-begin report into at most one event.
pub fn resolve_contact(
    store: &EntityStore,
    a: EntityId,
    b: EntityId,
    contact_point: Vec2,
) -> Option<GameEvent> {
    resolve(CONTACT_RESOLVERS, store, a, b, contact_point)
}

/// Resolve a contact-end report into at most one event.
pub fn resolve_separation(
    store: &EntityStore,
    a: EntityId,
    b: EntityId,
    contact_point: Vec2,
) -> Option<GameEvent> {
    resolve(SEPARATION_RESOLVERS, store, a, b, contact_point)
}

// =============================================================================
// PAIRWISE RESOLVERS
// =============================================================================

fn player_monster(
    _store: &EntityStore,
    player: EntityId,
    monster: EntityId,
    contact_point: Vec2,
) -> Option<GameEvent> {
    Some(GameEvent::PlayerMonsterContact {
        player,
        monster,
        contact_point,
    })
}

fn player_collectible(
    _store: &EntityStore,
    player: EntityId,
    collectible: EntityId,
    _contact_point: Vec2,
) -> Option<GameEvent> {
    Some(GameEvent::PickupCollectible { player, collectible })
}

fn player_collectible_exit(
    _store: &EntityStore,
    player: EntityId,
    collectible: EntityId,
    _contact_point: Vec2,
) -> Option<GameEvent> {
    Some(GameEvent::CollectibleExit { player, collectible })
}

fn player_obstacle(
    _store: &EntityStore,
    player: EntityId,
    _obstacle: EntityId,
    contact_point: Vec2,
) -> Option<GameEvent> {
    Some(GameEvent::PlayerObstacleContact {
        player,
        contact_point,
    })
}

fn player_floor(
    _store: &EntityStore,
    player: EntityId,
    _floor: EntityId,
    contact_point: Vec2,
) -> Option<GameEvent> {
    Some(GameEvent::PlayerFloorContact {
        player,
        contact_point,
    })
}

fn player_power_up_box(
    _store: &EntityStore,
    player: EntityId,
    power_up_box: EntityId,
    _contact_point: Vec2,
) -> Option<GameEvent> {
    Some(GameEvent::PlayerPowerUpBoxContact {
        player,
        power_up_box,
    })
}

fn player_missile(
    _store: &EntityStore,
    player: EntityId,
    missile: EntityId,
    _contact_point: Vec2,
) -> Option<GameEvent> {
    Some(GameEvent::PlayerMissileContact { player, missile })
}

fn monster_obstacle(
    _store: &EntityStore,
    monster: EntityId,
    _obstacle: EntityId,
    contact_point: Vec2,
) -> Option<GameEvent> {
    Some(GameEvent::MonsterObstacleContact {
        monster,
        contact_point,
    })
}

fn monster_wall(
    _store: &EntityStore,
    monster: EntityId,
    _wall: EntityId,
    contact_point: Vec2,
) -> Option<GameEvent> {
    Some(GameEvent::MonsterWallContact {
        monster,
        contact_point,
    })
}

fn hook_geometry(
    _store: &EntityStore,
    hook: EntityId,
    _geometry: EntityId,
    contact_point: Vec2,
) -> Option<GameEvent> {
    Some(GameEvent::HookObstacleContact {
        hook,
        contact_point,
    })
}

fn missile_floor(
    _store: &EntityStore,
    missile: EntityId,
    _floor: EntityId,
    _contact_point: Vec2,
) -> Option<GameEvent> {
    Some(GameEvent::MissileFloorContact { missile })
}
