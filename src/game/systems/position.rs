//! Position System
//!
//! Accessors over `PositionComponent` plus teleport handling for
//! remote sync.

use std::f32::consts::FRAC_PI_2;

use crate::core::vec2::Vec2;
use crate::ecs::component::PositionComponent;
use crate::ecs::entity::{EntityId, EntityKind};
use crate::ecs::store::EntityStore;
use crate::game::events::{EventKind, GameEvent};
use crate::game::systems::{System, SystemContext};

/// Owns entity placement.
pub struct PositionSystem;

impl PositionSystem {
    /// Current position, if the entity has one.
    pub fn position_of(store: &EntityStore, entity: EntityId) -> Option<Vec2> {
        store
            .get::<PositionComponent>(entity)
            .map(|component| component.position)
    }

    /// Move an entity to a new position.
    pub fn move_to(store: &mut EntityStore, entity: EntityId, position: Vec2) {
        if let Some(component) = store.get_mut::<PositionComponent>(entity) {
            component.position = position;
        }
    }

    /// Set an entity's rotation in radians.
    pub fn rotate_to(store: &mut EntityStore, entity: EntityId, rotation: f32) {
        if let Some(component) = store.get_mut::<PositionComponent>(entity) {
            component.rotation = rotation;
        }
    }

    /// Rotate an entity to face along a direction vector.
    pub fn rotate_toward(store: &mut EntityStore, entity: EntityId, direction: Vec2) {
        let rotation = direction.angle() - FRAC_PI_2;
        Self::rotate_to(store, entity, rotation);
    }

    /// Whether the entity faces left.
    pub fn is_facing_left(store: &EntityStore, entity: EntityId) -> bool {
        store
            .get::<PositionComponent>(entity)
            .map(|component| component.facing_left)
            .unwrap_or(false)
    }

    /// Set the entity's facing.
    pub fn set_facing_left(store: &mut EntityStore, entity: EntityId, facing_left: bool) {
        if let Some(component) = store.get_mut::<PositionComponent>(entity) {
            component.facing_left = facing_left;
        }
    }

    /// The nearest entity of `kind` strictly ahead (greater x) of a
    /// position.
    pub fn entity_ahead(store: &EntityStore, position: Vec2, kind: EntityKind) -> Option<EntityId> {
        store
            .components::<PositionComponent>()
            .filter(|(id, component)| {
                store.kind_of(*id) == Some(kind) && component.position.x > position.x
            })
            .min_by(|(_, a), (_, b)| {
                a.position
                    .x
                    .partial_cmp(&b.position.x)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(id, _)| id)
    }
}

impl System for PositionSystem {
    fn name(&self) -> &'static str {
        "position"
    }

    fn interests(&self) -> &'static [EventKind] {
        &[EventKind::Teleport]
    }

    fn on_event(&mut self, ctx: &mut SystemContext<'_>, event: &GameEvent) {
        if let GameEvent::Teleport {
            entity,
            destination,
        } = event
        {
            Self::move_to(ctx.store, *entity, *destination);
        }
    }
}
