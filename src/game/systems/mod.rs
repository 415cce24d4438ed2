//! Gameplay Systems
//!
//! Each system owns one slice of gameplay logic. Systems are updated in
//! fixed registration order every tick, then the bus delivers queued
//! events to the systems that declared an interest in their kind.
//!
//! Cross-system queries go through associated functions on the owning
//! system (taking the store), never through direct access to another
//! system's private state.

pub mod attack;
pub mod buff;
pub mod death;
pub mod finish;
pub mod health;
pub mod homing_missile;
pub mod hook;
pub mod manager;
pub mod monster;
pub mod movement;
pub mod physics;
pub mod player;
pub mod position;
pub mod power_up;
pub mod removal;
pub mod score;
pub mod speed_boost;
pub mod sprite;

pub use manager::SystemManager;

use crate::ecs::store::EntityStore;
use crate::game::constants::EngineConfig;
use crate::game::events::{EventKind, EventQueue, GameEvent};

/// Fire-and-forget sound effect requests, drained by the sound
/// collaborator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundEffect {
    /// A collectible was picked up.
    Collectible,
    /// A power-up was granted.
    PowerUp,
}

/// The narrow slice of engine state a system works against.
pub struct SystemContext<'a> {
    /// The entity/component store.
    pub store: &'a mut EntityStore,
    /// The event queue; pushes land in the current flush or the next.
    pub events: &'a mut EventQueue,
    /// Pending sound-effect requests.
    pub sounds: &'a mut Vec<SoundEffect>,
    /// Engine configuration.
    pub config: &'a EngineConfig,
}

/// One slice of gameplay logic.
pub trait System {
    /// System name for logs.
    fn name(&self) -> &'static str;

    /// The event kinds this system wants delivered.
    fn interests(&self) -> &'static [EventKind] {
        &[]
    }

    /// Per-tick update, before the event flush.
    fn update(&mut self, _ctx: &mut SystemContext<'_>, _delta_time: f32) {}

    /// React to one delivered event.
    fn on_event(&mut self, _ctx: &mut SystemContext<'_>, _event: &GameEvent) {}
}
