//! # Comet Rush Simulation Core
//!
//! Deterministic, single-threaded ECS simulation for a multiplayer 2D
//! platformer.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                    COMET RUSH CORE                           │
//! ├──────────────────────────────────────────────────────────────┤
//! │  core/            - Shared primitives                        │
//! │  └── vec2.rs      - 2D float vector                          │
//! │                                                              │
//! │  ecs/             - Entity/component storage                 │
//! │  ├── entity.rs    - EntityId (uuid), EntityKind              │
//! │  ├── component.rs - All component types                      │
//! │  ├── store.rs     - One BTreeMap column per component type   │
//! │  ├── builder.rs   - By-value fluent entity builder           │
//! │  └── factory.rs   - spawn_* per entity kind                  │
//! │                                                              │
//! │  game/            - Gameplay                                 │
//! │  ├── events.rs    - GameEvent enum + FIFO event queue        │
//! │  ├── collision.rs - Pairwise contact dispatch matrix         │
//! │  ├── systems/     - One system per gameplay concern          │
//! │  ├── mode.rs      - GameMode trait + RaceMode                │
//! │  ├── level.rs     - Level/entity descriptors                 │
//! │  └── engine.rs    - GameEngine composition root              │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! One call to [`GameEngine::update`] runs one tick: systems update in
//! fixed registration order, the mode advances, the event bus flushes
//! until empty, and the end-of-game check runs. All gameplay mutation
//! happens on the simulation thread; external inputs and physics
//! contacts are merged through the engine's entry points between
//! ticks. Missing entities and components are soft failures: lookups
//! return `None` and mutations become no-ops, never a panic.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod ecs;
pub mod game;

// Re-export commonly used types
pub use crate::core::vec2::Vec2;
pub use crate::ecs::builder::EntityBuilder;
pub use crate::ecs::entity::{EntityId, EntityKind};
pub use crate::ecs::store::EntityStore;
pub use crate::game::constants::EngineConfig;
pub use crate::game::engine::{GameEngine, GameInfo, PlayerSnapshot};
pub use crate::game::events::{EventKind, GameEvent};
pub use crate::game::level::{EntityDescriptor, LevelDescriptor, LevelError};
pub use crate::game::mode::{GameMode, GameResults, RaceMode};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Maximum number of player slots.
pub const MAX_PLAYERS: u8 = 4;
