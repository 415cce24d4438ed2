//! Physics Facade System
//!
//! Velocity/size accessors and impulse application over the abstract
//! body state in `PhysicsComponent`. The external physics collaborator
//! owns real bodies; this system only reads and writes the facade.

use crate::core::vec2::Vec2;
use crate::ecs::component::{PhysicsComponent, Shape};
use crate::ecs::entity::EntityId;
use crate::ecs::store::EntityStore;
use crate::game::systems::{System, SystemContext};

/// Facade over physics-engine body state.
pub struct PhysicsSystem;

impl PhysicsSystem {
    /// Current velocity, if the entity has a body.
    pub fn velocity_of(store: &EntityStore, entity: EntityId) -> Option<Vec2> {
        store
            .get::<PhysicsComponent>(entity)
            .map(|component| component.velocity)
    }

    /// Set the body's velocity.
    pub fn set_velocity(store: &mut EntityStore, entity: EntityId, velocity: Vec2) {
        if let Some(component) = store.get_mut::<PhysicsComponent>(entity) {
            component.velocity = velocity;
        }
    }

    /// Body size, if the entity has a body.
    pub fn size_of(store: &EntityStore, entity: EntityId) -> Option<Vec2> {
        store
            .get::<PhysicsComponent>(entity)
            .map(|component| component.size())
    }

    /// Resize a rectangular body (rope resync).
    pub fn set_size(store: &mut EntityStore, entity: EntityId, size: Vec2) {
        if let Some(component) = store.get_mut::<PhysicsComponent>(entity) {
            component.shape = Shape::Rectangle { size };
        }
    }

    /// Apply an impulse: `velocity += impulse / mass`.
    pub fn apply_impulse(store: &mut EntityStore, entity: EntityId, impulse: Vec2) {
        if let Some(component) = store.get_mut::<PhysicsComponent>(entity) {
            let mass = if component.mass > 0.0 { component.mass } else { 1.0 };
            component.velocity = component.velocity + impulse.scale(1.0 / mass);
        }
    }
}

impl System for PhysicsSystem {
    fn name(&self) -> &'static str {
        "physics"
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, _delta_time: f32) {
        // Clamp horizontal speed of dynamic bodies to their run cap.
        for (_, component) in ctx.store.components_mut::<PhysicsComponent>() {
            if !component.is_dynamic || component.pinned {
                continue;
            }
            let cap = component.max_run_speed;
            if component.velocity.x.abs() > cap {
                component.velocity.x = component.velocity.x.signum() * cap;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::entity::EntityKind;
    use crate::game::constants::EngineConfig;
    use crate::game::events::EventQueue;

    #[test]
    fn test_apply_impulse_scales_by_mass() {
        let mut store = EntityStore::new();
        let id = store.add_entity(EntityKind::Player);
        let mut body = PhysicsComponent::rectangle(Vec2::new(10.0, 10.0));
        body.mass = 2.0;
        store.attach(id, body);

        PhysicsSystem::apply_impulse(&mut store, id, Vec2::new(100.0, 50.0));
        assert_eq!(
            PhysicsSystem::velocity_of(&store, id),
            Some(Vec2::new(50.0, 25.0))
        );
    }

    #[test]
    fn test_update_clamps_horizontal_speed() {
        let mut store = EntityStore::new();
        let id = store.add_entity(EntityKind::Player);
        store.attach(
            id,
            PhysicsComponent::rectangle(Vec2::new(10.0, 10.0))
                .with_velocity(Vec2::new(-900.0, 300.0))
                .with_max_run_speed(400.0),
        );

        let mut events = EventQueue::new();
        let mut sounds = Vec::new();
        let config = EngineConfig::default();
        let mut ctx = SystemContext {
            store: &mut store,
            events: &mut events,
            sounds: &mut sounds,
            config: &config,
        };
        PhysicsSystem.update(&mut ctx, 1.0 / 60.0);

        // Horizontal clamped, vertical untouched.
        assert_eq!(
            PhysicsSystem::velocity_of(&store, id),
            Some(Vec2::new(-400.0, 300.0))
        );
    }

    #[test]
    fn test_static_bodies_are_not_clamped() {
        let mut store = EntityStore::new();
        let id = store.add_entity(EntityKind::Obstacle);
        store.attach(
            id,
            PhysicsComponent::rectangle(Vec2::new(10.0, 10.0))
                .with_velocity(Vec2::new(-900.0, 0.0))
                .with_dynamic(false)
                .with_max_run_speed(10.0),
        );

        let mut events = EventQueue::new();
        let mut sounds = Vec::new();
        let config = EngineConfig::default();
        let mut ctx = SystemContext {
            store: &mut store,
            events: &mut events,
            sounds: &mut sounds,
            config: &config,
        };
        PhysicsSystem.update(&mut ctx, 1.0 / 60.0);

        assert_eq!(
            PhysicsSystem::velocity_of(&store, id),
            Some(Vec2::new(-900.0, 0.0))
        );
    }

    #[test]
    fn test_set_size_reshapes_rectangle() {
        let mut store = EntityStore::new();
        let id = store.add_entity(EntityKind::Rope);
        store.attach(id, PhysicsComponent::rectangle(Vec2::ZERO));

        PhysicsSystem::set_size(&mut store, id, Vec2::new(10.0, 120.0));
        assert_eq!(PhysicsSystem::size_of(&store, id), Some(Vec2::new(10.0, 120.0)));
    }
}
