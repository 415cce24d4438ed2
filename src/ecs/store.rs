//! Entity/Component Store
//!
//! One homogeneous `BTreeMap<EntityId, C>` column per component type,
//! mapped through the sealed [`Component`] trait so generic access needs
//! no dynamic type lookups. Missing entities and missing components are
//! soft failures: lookups return `None`, mutations become no-ops.

use std::collections::BTreeMap;

use tracing::warn;

use crate::ecs::component::{
    DeathTimerComponent, GrappleHookComponent, GrappleHookOwnerComponent, HealthComponent,
    HomingMissileComponent, OwnsRopeComponent, PhysicsComponent, PlayerComponent, PointsComponent,
    PositionComponent, PowerUpComponent, ScoreComponent, SpeedBoostComponent, SpriteComponent,
};
use crate::ecs::entity::{EntityId, EntityKind};

mod sealed {
    /// Restricts [`super::Component`] to the component types declared in
    /// this crate.
    pub trait Sealed {}
}

/// Maps a component type to its column in the store.
pub trait Component: sealed::Sealed + Sized {
    /// The column holding all instances of this component type.
    fn column(store: &EntityStore) -> &BTreeMap<EntityId, Self>;
    /// Mutable access to the column.
    fn column_mut(store: &mut EntityStore) -> &mut BTreeMap<EntityId, Self>;
}

macro_rules! component_column {
    ($component:ty, $field:ident) => {
        impl sealed::Sealed for $component {}

        impl Component for $component {
            fn column(store: &EntityStore) -> &BTreeMap<EntityId, Self> {
                &store.$field
            }

            fn column_mut(store: &mut EntityStore) -> &mut BTreeMap<EntityId, Self> {
                &mut store.$field
            }
        }
    };
}

/// Owns all entities and their components. No gameplay logic.
#[derive(Clone, Debug, Default)]
pub struct EntityStore {
    entities: BTreeMap<EntityId, EntityKind>,
    positions: BTreeMap<EntityId, PositionComponent>,
    physics: BTreeMap<EntityId, PhysicsComponent>,
    healths: BTreeMap<EntityId, HealthComponent>,
    scores: BTreeMap<EntityId, ScoreComponent>,
    players: BTreeMap<EntityId, PlayerComponent>,
    points: BTreeMap<EntityId, PointsComponent>,
    sprites: BTreeMap<EntityId, SpriteComponent>,
    death_timers: BTreeMap<EntityId, DeathTimerComponent>,
    hooks: BTreeMap<EntityId, GrappleHookComponent>,
    hook_owners: BTreeMap<EntityId, GrappleHookOwnerComponent>,
    ropes: BTreeMap<EntityId, OwnsRopeComponent>,
    power_ups: BTreeMap<EntityId, PowerUpComponent>,
    speed_boosts: BTreeMap<EntityId, SpeedBoostComponent>,
    missiles: BTreeMap<EntityId, HomingMissileComponent>,
}

component_column!(PositionComponent, positions);
component_column!(PhysicsComponent, physics);
component_column!(HealthComponent, healths);
component_column!(ScoreComponent, scores);
component_column!(PlayerComponent, players);
component_column!(PointsComponent, points);
component_column!(SpriteComponent, sprites);
component_column!(DeathTimerComponent, death_timers);
component_column!(GrappleHookComponent, hooks);
component_column!(GrappleHookOwnerComponent, hook_owners);
component_column!(OwnsRopeComponent, ropes);
component_column!(PowerUpComponent, power_ups);
component_column!(SpeedBoostComponent, speed_boosts);
component_column!(HomingMissileComponent, missiles);

impl EntityStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Entities
    // =========================================================================

    /// Register a new entity of the given kind and return its id.
    pub fn add_entity(&mut self, kind: EntityKind) -> EntityId {
        let id = EntityId::new();
        self.entities.insert(id, kind);
        id
    }

    /// Register an entity under a pre-generated id.
    pub fn insert_entity(&mut self, id: EntityId, kind: EntityKind) {
        self.entities.insert(id, kind);
    }

    /// Whether the entity exists.
    pub fn contains(&self, id: EntityId) -> bool {
        self.entities.contains_key(&id)
    }

    /// The kind of an entity, if it exists.
    pub fn kind_of(&self, id: EntityId) -> Option<EntityKind> {
        self.entities.get(&id).copied()
    }

    /// All entities of a given kind, in id order.
    pub fn entities_of_kind(&self, kind: EntityKind) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|(_, k)| **k == kind)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Total number of live entities.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Remove an entity and every component attached to it.
    ///
    /// Removing an unknown entity is a no-op.
    pub fn remove_entity(&mut self, id: EntityId) {
        if self.entities.remove(&id).is_none() {
            return;
        }
        self.positions.remove(&id);
        self.physics.remove(&id);
        self.healths.remove(&id);
        self.scores.remove(&id);
        self.players.remove(&id);
        self.points.remove(&id);
        self.sprites.remove(&id);
        self.death_timers.remove(&id);
        self.hooks.remove(&id);
        self.hook_owners.remove(&id);
        self.ropes.remove(&id);
        self.power_ups.remove(&id);
        self.speed_boosts.remove(&id);
        self.missiles.remove(&id);
    }

    // =========================================================================
    // Components
    // =========================================================================

    /// Attach a component, overwriting any prior component of the same
    /// type on that entity. Attaching to an unknown entity is dropped.
    pub fn attach<C: Component>(&mut self, id: EntityId, component: C) {
        if !self.contains(id) {
            warn!(entity = ?id, "attach to unknown entity dropped");
            return;
        }
        C::column_mut(self).insert(id, component);
    }

    /// Fetch a component of type `C` for an entity.
    pub fn get<C: Component>(&self, id: EntityId) -> Option<&C> {
        C::column(self).get(&id)
    }

    /// Fetch a component of type `C` mutably.
    pub fn get_mut<C: Component>(&mut self, id: EntityId) -> Option<&mut C> {
        C::column_mut(self).get_mut(&id)
    }

    /// Detach and return a component, if present.
    pub fn detach<C: Component>(&mut self, id: EntityId) -> Option<C> {
        C::column_mut(self).remove(&id)
    }

    /// All components of type `C`, in entity-id order.
    pub fn components<'a, C: Component + 'a>(&'a self) -> impl Iterator<Item = (EntityId, &'a C)> {
        C::column(self).iter().map(|(id, c)| (*id, c))
    }

    /// All components of type `C`, mutably, in entity-id order.
    pub fn components_mut<'a, C: Component + 'a>(&'a mut self) -> impl Iterator<Item = (EntityId, &'a mut C)> {
        C::column_mut(self).iter_mut().map(|(id, c)| (*id, c))
    }

    // =========================================================================
    // Player resolution
    // =========================================================================

    /// Resolve a player index to its entity id.
    pub fn player_entity(&self, index: u8) -> Option<EntityId> {
        self.players
            .iter()
            .find(|(_, p)| p.index == index)
            .map(|(id, _)| *id)
    }

    /// Resolve an entity id to its player index.
    pub fn player_index(&self, id: EntityId) -> Option<u8> {
        self.players.get(&id).map(|p| p.index)
    }

    /// All player entities, in id order.
    pub fn player_entities(&self) -> Vec<EntityId> {
        self.entities_of_kind(EntityKind::Player)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::Vec2;

    #[test]
    fn test_absent_component_is_none_not_panic() {
        let mut store = EntityStore::new();
        let id = store.add_entity(EntityKind::Player);

        assert!(store.get::<PositionComponent>(id).is_none());
        assert!(store.get::<HealthComponent>(id).is_none());

        // Unknown entity is just as soft.
        let ghost = EntityId::new();
        assert!(store.get::<PositionComponent>(ghost).is_none());
        assert!(store.kind_of(ghost).is_none());
    }

    #[test]
    fn test_attach_overwrites_same_type() {
        let mut store = EntityStore::new();
        let id = store.add_entity(EntityKind::Player);

        store.attach(id, HealthComponent::new(100));
        store.attach(id, HealthComponent::new(40));

        assert_eq!(store.get::<HealthComponent>(id).unwrap().health, 40);
    }

    #[test]
    fn test_attach_to_unknown_entity_is_dropped() {
        let mut store = EntityStore::new();
        let ghost = EntityId::new();

        store.attach(ghost, HealthComponent::new(100));
        assert!(store.get::<HealthComponent>(ghost).is_none());
    }

    #[test]
    fn test_remove_entity_detaches_all_components() {
        let mut store = EntityStore::new();
        let id = store.add_entity(EntityKind::Monster);
        store.attach(id, PositionComponent::new(Vec2::new(1.0, 2.0)));
        store.attach(id, HealthComponent::new(100));
        store.attach(id, DeathTimerComponent::default());

        store.remove_entity(id);

        assert!(!store.contains(id));
        assert!(store.get::<PositionComponent>(id).is_none());
        assert!(store.get::<HealthComponent>(id).is_none());
        assert!(store.get::<DeathTimerComponent>(id).is_none());
    }

    #[test]
    fn test_entities_of_kind() {
        let mut store = EntityStore::new();
        let m1 = store.add_entity(EntityKind::Monster);
        let m2 = store.add_entity(EntityKind::Monster);
        store.add_entity(EntityKind::Collectible);

        let monsters = store.entities_of_kind(EntityKind::Monster);
        assert_eq!(monsters.len(), 2);
        assert!(monsters.contains(&m1) && monsters.contains(&m2));
    }

    #[test]
    fn test_player_index_resolution() {
        let mut store = EntityStore::new();
        let p0 = store.add_entity(EntityKind::Player);
        let p1 = store.add_entity(EntityKind::Player);
        store.attach(p0, PlayerComponent::new(0));
        store.attach(p1, PlayerComponent::new(1));

        assert_eq!(store.player_entity(0), Some(p0));
        assert_eq!(store.player_entity(1), Some(p1));
        assert_eq!(store.player_entity(2), None);
        assert_eq!(store.player_index(p1), Some(1));
        assert_eq!(store.player_index(p0), Some(0));
    }

    #[test]
    fn test_components_iterate_in_id_order() {
        let mut store = EntityStore::new();
        for i in 0..8 {
            let id = store.add_entity(EntityKind::Collectible);
            store.attach(id, PointsComponent::new(i));
        }

        let ids: Vec<EntityId> = store.components::<PointsComponent>().map(|(id, _)| id).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }
}
