//! Health System
//!
//! Signed health deltas with no floor: health may go negative, and
//! "alive" strictly means health > 0.

use crate::ecs::component::HealthComponent;
use crate::ecs::entity::EntityId;
use crate::ecs::store::EntityStore;
use crate::game::systems::System;

/// Owns health bookkeeping.
pub struct HealthSystem;

impl HealthSystem {
    /// Current health, if the entity has any.
    pub fn health_of(store: &EntityStore, entity: EntityId) -> Option<i32> {
        store
            .get::<HealthComponent>(entity)
            .map(|component| component.health)
    }

    /// Apply a signed health delta. No clamping.
    pub fn apply_health_change(store: &mut EntityStore, entity: EntityId, delta: i32) {
        if let Some(component) = store.get_mut::<HealthComponent>(entity) {
            component.health += delta;
        }
    }

    /// Set health outright (death respawn).
    pub fn set_health(store: &mut EntityStore, entity: EntityId, health: i32) {
        if let Some(component) = store.get_mut::<HealthComponent>(entity) {
            component.health = health;
        }
    }

    /// Whether the entity is alive. Entities without health are not.
    pub fn has_health(store: &EntityStore, entity: EntityId) -> bool {
        Self::health_of(store, entity).map(|h| h > 0).unwrap_or(false)
    }
}

impl System for HealthSystem {
    fn name(&self) -> &'static str {
        "health"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::entity::EntityKind;

    #[test]
    fn test_health_can_go_negative() {
        let mut store = EntityStore::new();
        let id = store.add_entity(EntityKind::Player);
        store.attach(id, HealthComponent::new(100));

        HealthSystem::apply_health_change(&mut store, id, -200);
        assert_eq!(HealthSystem::health_of(&store, id), Some(-100));
        assert!(!HealthSystem::has_health(&store, id));
    }

    #[test]
    fn test_has_health_is_strictly_positive() {
        let mut store = EntityStore::new();
        let id = store.add_entity(EntityKind::Monster);
        store.attach(id, HealthComponent::new(1));
        assert!(HealthSystem::has_health(&store, id));

        HealthSystem::apply_health_change(&mut store, id, -1);
        assert!(!HealthSystem::has_health(&store, id));
    }

    #[test]
    fn test_healthless_entity_is_not_alive() {
        let mut store = EntityStore::new();
        let id = store.add_entity(EntityKind::Obstacle);
        assert!(!HealthSystem::has_health(&store, id));
        // And applying a change is a no-op.
        HealthSystem::apply_health_change(&mut store, id, -50);
        assert_eq!(HealthSystem::health_of(&store, id), None);
    }
}
