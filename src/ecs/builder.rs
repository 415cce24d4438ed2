//! Entity Builder
//!
//! By-value fluent builder staging typed components for one entity.
//! `spawn` registers the entity and attaches everything staged.

use crate::core::vec2::Vec2;
use crate::ecs::component::{
    DeathTimerComponent, GrappleHookComponent, GrappleHookOwnerComponent, HealthComponent,
    HomingMissileComponent, OwnsRopeComponent, PhysicsComponent, PlayerComponent, PointsComponent,
    PositionComponent, PowerUpComponent, PowerUpKind, ScoreComponent, SpeedBoostComponent,
    SpriteComponent,
};
use crate::ecs::entity::{EntityId, EntityKind};
use crate::ecs::store::EntityStore;

/// Staged configuration for one new entity.
#[derive(Debug, Default)]
pub struct EntityBuilder {
    id: EntityId,
    kind: Option<EntityKind>,
    position: Option<PositionComponent>,
    physics: Option<PhysicsComponent>,
    health: Option<HealthComponent>,
    score: Option<ScoreComponent>,
    player: Option<PlayerComponent>,
    points: Option<PointsComponent>,
    sprite: Option<SpriteComponent>,
    death_timer: Option<DeathTimerComponent>,
    hook: Option<GrappleHookComponent>,
    hook_owner: Option<GrappleHookOwnerComponent>,
    owns_rope: Option<OwnsRopeComponent>,
    power_up: Option<PowerUpComponent>,
    speed_boost: Option<SpeedBoostComponent>,
    missile: Option<HomingMissileComponent>,
}

impl EntityBuilder {
    /// Start building an entity of the given kind with a fresh id.
    pub fn new(kind: EntityKind) -> Self {
        Self {
            id: EntityId::new(),
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// The id the entity will be registered under.
    pub fn id(&self) -> EntityId {
        self.id
    }

    /// Stage a position component.
    pub fn position(mut self, position: Vec2) -> Self {
        self.position = Some(PositionComponent::new(position));
        self
    }

    /// Stage a physics component.
    pub fn physics(mut self, physics: PhysicsComponent) -> Self {
        self.physics = Some(physics);
        self
    }

    /// Stage a health component.
    pub fn health(mut self, health: i32) -> Self {
        self.health = Some(HealthComponent::new(health));
        self
    }

    /// Stage a score component.
    pub fn score(mut self, score: i32) -> Self {
        self.score = Some(ScoreComponent::new(score));
        self
    }

    /// Stage a player component.
    pub fn player(mut self, index: u8) -> Self {
        self.player = Some(PlayerComponent::new(index));
        self
    }

    /// Stage a points component.
    pub fn points(mut self, points: i32) -> Self {
        self.points = Some(PointsComponent::new(points));
        self
    }

    /// Stage a sprite component.
    pub fn sprite(mut self, image: impl Into<String>, size: Vec2) -> Self {
        self.sprite = Some(SpriteComponent::new(image, size));
        self
    }

    /// Stage a death timer component.
    pub fn death_timer(mut self) -> Self {
        self.death_timer = Some(DeathTimerComponent::default());
        self
    }

    /// Stage a grapple-hook component.
    pub fn grapple_hook(mut self, startpoint: Vec2, is_left: bool, retract_length: f32) -> Self {
        self.hook = Some(GrappleHookComponent::new(startpoint, is_left, retract_length));
        self
    }

    /// Stage a hook-owner back-reference.
    pub fn hook_owner(mut self, owner: EntityId) -> Self {
        self.hook_owner = Some(GrappleHookOwnerComponent { owner });
        self
    }

    /// Stage a rope back-reference.
    pub fn owns_rope(mut self, rope: EntityId) -> Self {
        self.owns_rope = Some(OwnsRopeComponent { rope });
        self
    }

    /// Stage a power-up payload.
    pub fn power_up(mut self, kind: PowerUpKind) -> Self {
        self.power_up = Some(PowerUpComponent { kind });
        self
    }

    /// Stage a speed-boost component.
    pub fn speed_boost(mut self, target: EntityId, duration: f32, multiplier: f32) -> Self {
        self.speed_boost = Some(SpeedBoostComponent::new(target, duration, multiplier));
        self
    }

    /// Stage a homing-missile component.
    pub fn homing_missile(mut self, source: EntityId, impulse: Vec2) -> Self {
        self.missile = Some(HomingMissileComponent::new(source, impulse));
        self
    }

    /// Register the entity and attach all staged components.
    pub fn spawn(self, store: &mut EntityStore) -> EntityId {
        let Some(kind) = self.kind else {
            return self.id;
        };
        let id = self.id;
        store.insert_entity(id, kind);

        if let Some(c) = self.position {
            store.attach(id, c);
        }
        if let Some(c) = self.physics {
            store.attach(id, c);
        }
        if let Some(c) = self.health {
            store.attach(id, c);
        }
        if let Some(c) = self.score {
            store.attach(id, c);
        }
        if let Some(c) = self.player {
            store.attach(id, c);
        }
        if let Some(c) = self.points {
            store.attach(id, c);
        }
        if let Some(c) = self.sprite {
            store.attach(id, c);
        }
        if let Some(c) = self.death_timer {
            store.attach(id, c);
        }
        if let Some(c) = self.hook {
            store.attach(id, c);
        }
        if let Some(c) = self.hook_owner {
            store.attach(id, c);
        }
        if let Some(c) = self.owns_rope {
            store.attach(id, c);
        }
        if let Some(c) = self.power_up {
            store.attach(id, c);
        }
        if let Some(c) = self.speed_boost {
            store.attach(id, c);
        }
        if let Some(c) = self.missile {
            store.attach(id, c);
        }

        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_attaches_staged_components() {
        let mut store = EntityStore::new();
        let id = EntityBuilder::new(EntityKind::Player)
            .position(Vec2::new(100.0, 200.0))
            .player(0)
            .health(100)
            .score(0)
            .death_timer()
            .spawn(&mut store);

        assert_eq!(store.kind_of(id), Some(EntityKind::Player));
        assert_eq!(
            store.get::<PositionComponent>(id).unwrap().position,
            Vec2::new(100.0, 200.0)
        );
        assert_eq!(store.get::<HealthComponent>(id).unwrap().health, 100);
        assert_eq!(store.get::<ScoreComponent>(id).unwrap().score, 0);
        assert!(store.get::<DeathTimerComponent>(id).is_some());
        // Nothing else was staged.
        assert!(store.get::<PhysicsComponent>(id).is_none());
        assert!(store.get::<GrappleHookComponent>(id).is_none());
    }

    #[test]
    fn test_builder_id_is_stable_before_spawn() {
        let mut store = EntityStore::new();
        let builder = EntityBuilder::new(EntityKind::Rope);
        let announced = builder.id();
        let spawned = builder.spawn(&mut store);
        assert_eq!(announced, spawned);
    }
}
