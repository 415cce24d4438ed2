//! Sprite Facade System
//!
//! Animation-key and size side effects over `SpriteComponent`. The
//! render collaborator owns the actual drawing.

use crate::core::vec2::Vec2;
use crate::ecs::component::SpriteComponent;
use crate::ecs::entity::EntityId;
use crate::ecs::store::EntityStore;
use crate::game::events::{EventKind, GameEvent};
use crate::game::systems::{System, SystemContext};

/// Facade over render-collaborator sprite state.
pub struct SpriteSystem;

impl SpriteSystem {
    /// Image key of an entity's sprite.
    pub fn image_of(store: &EntityStore, entity: EntityId) -> Option<String> {
        store
            .get::<SpriteComponent>(entity)
            .map(|component| component.image.clone())
    }

    /// Start a named animation.
    pub fn set_animation(store: &mut EntityStore, entity: EntityId, animation: &str) {
        if let Some(component) = store.get_mut::<SpriteComponent>(entity) {
            component.animation = Some(animation.to_owned());
        }
    }

    /// Stop any running animation.
    pub fn clear_animation(store: &mut EntityStore, entity: EntityId) {
        if let Some(component) = store.get_mut::<SpriteComponent>(entity) {
            component.animation = None;
        }
    }

    /// Resize the sprite (rope resync).
    pub fn set_size(store: &mut EntityStore, entity: EntityId, size: Vec2) {
        if let Some(component) = store.get_mut::<SpriteComponent>(entity) {
            component.size = size;
        }
    }
}

impl System for SpriteSystem {
    fn name(&self) -> &'static str {
        "sprite"
    }

    fn interests(&self) -> &'static [EventKind] {
        &[EventKind::CollectibleExit]
    }

    fn on_event(&mut self, ctx: &mut SystemContext<'_>, event: &GameEvent) {
        // Contact end clears the pickup highlight.
        if let GameEvent::CollectibleExit { collectible, .. } = event {
            Self::clear_animation(ctx.store, *collectible);
        }
    }
}
