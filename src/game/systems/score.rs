//! Score System
//!
//! The only mutator of `ScoreComponent`. Collectible pickups grant the
//! collectible's point value, play a sound effect, and remove the
//! collectible.

use tracing::debug;

use crate::ecs::component::{PointsComponent, ScoreComponent};
use crate::ecs::entity::EntityId;
use crate::ecs::store::EntityStore;
use crate::game::events::{EventKind, GameEvent};
use crate::game::systems::{SoundEffect, System, SystemContext};

/// Owns score bookkeeping.
pub struct ScoreSystem;

impl ScoreSystem {
    /// Current score, if the entity has one.
    pub fn score_of(store: &EntityStore, entity: EntityId) -> Option<i32> {
        store
            .get::<ScoreComponent>(entity)
            .map(|component| component.score)
    }

    /// Apply a signed score delta. No clamping.
    pub fn apply_score_change(store: &mut EntityStore, entity: EntityId, delta: i32) {
        if let Some(component) = store.get_mut::<ScoreComponent>(entity) {
            component.score += delta;
        }
    }

    /// Set the score outright (remote sync).
    pub fn set_score(store: &mut EntityStore, entity: EntityId, score: i32) {
        if let Some(component) = store.get_mut::<ScoreComponent>(entity) {
            component.score = score;
        }
    }
}

impl System for ScoreSystem {
    fn name(&self) -> &'static str {
        "score"
    }

    fn interests(&self) -> &'static [EventKind] {
        &[EventKind::PickupCollectible]
    }

    fn on_event(&mut self, ctx: &mut SystemContext<'_>, event: &GameEvent) {
        let GameEvent::PickupCollectible {
            player,
            collectible,
        } = event
        else {
            return;
        };

        let Some(points) = ctx
            .store
            .get::<PointsComponent>(*collectible)
            .map(|component| component.points)
        else {
            return;
        };

        ctx.sounds.push(SoundEffect::Collectible);
        Self::apply_score_change(ctx.store, *player, points);
        debug!(player = ?player, points, "collectible picked up");
        ctx.events.push(GameEvent::Remove {
            entity: *collectible,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::entity::EntityKind;
    use crate::game::constants::EngineConfig;
    use crate::game::events::EventQueue;

    #[test]
    fn test_pickup_grants_points_and_queues_removal() {
        let mut store = EntityStore::new();
        let player = store.add_entity(EntityKind::Player);
        store.attach(player, ScoreComponent::new(5));
        let collectible = store.add_entity(EntityKind::Collectible);
        store.attach(collectible, PointsComponent::new(10));

        let mut events = EventQueue::new();
        let mut sounds = Vec::new();
        let config = EngineConfig::default();
        let mut ctx = SystemContext {
            store: &mut store,
            events: &mut events,
            sounds: &mut sounds,
            config: &config,
        };

        ScoreSystem.on_event(
            &mut ctx,
            &GameEvent::PickupCollectible {
                player,
                collectible,
            },
        );

        assert_eq!(ScoreSystem::score_of(&store, player), Some(15));
        assert_eq!(sounds, vec![SoundEffect::Collectible]);
        assert_eq!(
            events.pop(),
            Some(GameEvent::Remove { entity: collectible })
        );
    }

    #[test]
    fn test_pickup_without_points_component_is_noop() {
        let mut store = EntityStore::new();
        let player = store.add_entity(EntityKind::Player);
        store.attach(player, ScoreComponent::new(5));
        let collectible = store.add_entity(EntityKind::Collectible);

        let mut events = EventQueue::new();
        let mut sounds = Vec::new();
        let config = EngineConfig::default();
        let mut ctx = SystemContext {
            store: &mut store,
            events: &mut events,
            sounds: &mut sounds,
            config: &config,
        };

        ScoreSystem.on_event(
            &mut ctx,
            &GameEvent::PickupCollectible {
                player,
                collectible,
            },
        );

        assert_eq!(ScoreSystem::score_of(&store, player), Some(5));
        assert!(sounds.is_empty());
        assert!(events.is_empty());
    }
}
