//! Entity Identity
//!
//! An entity is a unique id plus a kind tag. Entities own no data;
//! components keyed by `EntityId` carry all state.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique entity identifier.
///
/// Implements Ord for deterministic BTreeMap ordering.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(Uuid);

impl EntityId {
    /// Generate a fresh id.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Create from an existing UUID.
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Short form is enough to tell entities apart in logs.
        let bytes = self.0.as_bytes();
        write!(
            f,
            "EntityId({:02x}{:02x}{:02x}{:02x})",
            bytes[0], bytes[1], bytes[2], bytes[3]
        )
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The closed set of entity kinds in the simulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    /// A controllable player avatar.
    Player,
    /// A hostile monster.
    Monster,
    /// A pickup granting points.
    Collectible,
    /// Level geometry players and hooks can latch onto.
    Obstacle,
    /// A vertical barrier.
    Wall,
    /// The level floor.
    Floor,
    /// The head of a fired grapple hook.
    GrappleHook,
    /// The visual rope trailing a grapple hook.
    Rope,
    /// A box granting a power-up on contact.
    PowerUpBox,
    /// A launched homing missile.
    HomingMissile,
    /// Carrier entity for an active speed boost.
    SpeedBoostPowerUp,
    /// The finish-line flag.
    FinishLine,
}

impl EntityKind {
    /// Every kind, in declaration order.
    pub const ALL: [EntityKind; 12] = [
        EntityKind::Player,
        EntityKind::Monster,
        EntityKind::Collectible,
        EntityKind::Obstacle,
        EntityKind::Wall,
        EntityKind::Floor,
        EntityKind::GrappleHook,
        EntityKind::Rope,
        EntityKind::PowerUpBox,
        EntityKind::HomingMissile,
        EntityKind::SpeedBoostPowerUp,
        EntityKind::FinishLine,
    ];
}
