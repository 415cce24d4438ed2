//! Game Events
//!
//! The closed event vocabulary of the simulation plus the FIFO queue
//! the bus drains each tick. Events are immutable records; systems
//! react to them, they never carry behavior.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;
use crate::ecs::component::PowerUpKind;
use crate::ecs::entity::EntityId;
use crate::game::mode::GameResults;

/// Everything that can happen in the simulation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    // -- input-driven ---------------------------------------------------------
    /// Start moving an entity left or right.
    Move {
        /// The moving entity.
        entity: EntityId,
        /// Direction of travel.
        to_left: bool,
    },
    /// Stop horizontal movement.
    StopMoving {
        /// The stopping entity.
        entity: EntityId,
    },
    /// Jump with the given impulse.
    Jump {
        /// The jumping entity.
        entity: EntityId,
        /// Impulse to apply.
        impulse: Vec2,
    },
    /// Fire a grapple hook.
    UseGrappleHook {
        /// The firing player.
        player: EntityId,
        /// Fire direction.
        is_left: bool,
    },
    /// Teleport an entity (remote sync).
    Teleport {
        /// The teleported entity.
        entity: EntityId,
        /// Destination position.
        destination: Vec2,
    },

    // -- grapple-hook state machine -------------------------------------------
    /// Advance a hook one shooting step.
    ShootHook {
        /// The hook entity.
        hook: EntityId,
    },
    /// Advance a hook one retracting step.
    RetractHook {
        /// The hook entity.
        hook: EntityId,
    },
    /// Advance a hook one swinging step.
    SwingHook {
        /// The hook entity.
        hook: EntityId,
    },
    /// Release a hook and tear it down.
    ReleaseHook {
        /// The hook entity.
        hook: EntityId,
    },

    // -- contacts -------------------------------------------------------------
    /// Player touched a monster.
    PlayerMonsterContact {
        /// The player.
        player: EntityId,
        /// The monster.
        monster: EntityId,
        /// Reported contact point.
        contact_point: Vec2,
    },
    /// Player touched an obstacle.
    PlayerObstacleContact {
        /// The player.
        player: EntityId,
        /// Reported contact point.
        contact_point: Vec2,
    },
    /// Player touched the floor.
    PlayerFloorContact {
        /// The player.
        player: EntityId,
        /// Reported contact point.
        contact_point: Vec2,
    },
    /// Player touched a power-up box.
    PlayerPowerUpBoxContact {
        /// The player.
        player: EntityId,
        /// The box.
        power_up_box: EntityId,
    },
    /// Player was hit by a homing missile.
    PlayerMissileContact {
        /// The player.
        player: EntityId,
        /// The missile.
        missile: EntityId,
    },
    /// Monster ran into an obstacle.
    MonsterObstacleContact {
        /// The monster.
        monster: EntityId,
        /// Reported contact point.
        contact_point: Vec2,
    },
    /// Monster ran into a wall.
    MonsterWallContact {
        /// The monster.
        monster: EntityId,
        /// Reported contact point.
        contact_point: Vec2,
    },
    /// A grapple hook anchored on obstacle/floor/wall geometry.
    HookObstacleContact {
        /// The hook entity.
        hook: EntityId,
        /// Reported contact point.
        contact_point: Vec2,
    },
    /// A homing missile hit the floor.
    MissileFloorContact {
        /// The missile.
        missile: EntityId,
    },
    /// Player picked up a collectible.
    PickupCollectible {
        /// The picking player.
        player: EntityId,
        /// The collectible.
        collectible: EntityId,
    },
    /// Player stopped overlapping a collectible (contact end).
    CollectibleExit {
        /// The player.
        player: EntityId,
        /// The collectible.
        collectible: EntityId,
    },

    // -- combat ---------------------------------------------------------------
    /// A monster damaged a player.
    MonsterAttackPlayer {
        /// The attacking monster.
        monster: EntityId,
        /// The attacked player.
        player: EntityId,
    },
    /// A player stomped a monster.
    PlayerAttackMonster {
        /// The attacking player.
        player: EntityId,
        /// The attacked monster.
        monster: EntityId,
    },
    /// Turn a monster around.
    MonsterMovementReversal {
        /// The monster.
        monster: EntityId,
        /// New direction of travel.
        is_left: bool,
    },
    /// A player's health reached zero.
    PlayerDeath {
        /// The dead player.
        player: EntityId,
    },
    /// A monster's health reached zero.
    MonsterDeath {
        /// The dead monster.
        monster: EntityId,
    },

    // -- lifecycle ------------------------------------------------------------
    /// Remove an entity and all its components.
    Remove {
        /// The entity to remove.
        entity: EntityId,
    },
    /// A power-up was granted to a player.
    PowerUpGranted {
        /// The receiving player.
        player: EntityId,
        /// Which power-up.
        kind: PowerUpKind,
    },
    /// A player crossed the finish line.
    PlayerReachedFinish {
        /// The finishing player.
        player: EntityId,
    },
    /// The mode ended the game; carries the results payload.
    GameFinished {
        /// Final results.
        results: GameResults,
    },
}

/// Fieldless mirror of [`GameEvent`], used for listener registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// See [`GameEvent::Move`].
    Move,
    /// See [`GameEvent::StopMoving`].
    StopMoving,
    /// See [`GameEvent::Jump`].
    Jump,
    /// See [`GameEvent::UseGrappleHook`].
    UseGrappleHook,
    /// See [`GameEvent::Teleport`].
    Teleport,
    /// See [`GameEvent::ShootHook`].
    ShootHook,
    /// See [`GameEvent::RetractHook`].
    RetractHook,
    /// See [`GameEvent::SwingHook`].
    SwingHook,
    /// See [`GameEvent::ReleaseHook`].
    ReleaseHook,
    /// See [`GameEvent::PlayerMonsterContact`].
    PlayerMonsterContact,
    /// See [`GameEvent::PlayerObstacleContact`].
    PlayerObstacleContact,
    /// See [`GameEvent::PlayerFloorContact`].
    PlayerFloorContact,
    /// See [`GameEvent::PlayerPowerUpBoxContact`].
    PlayerPowerUpBoxContact,
    /// See [`GameEvent::PlayerMissileContact`].
    PlayerMissileContact,
    /// See [`GameEvent::MonsterObstacleContact`].
    MonsterObstacleContact,
    /// See [`GameEvent::MonsterWallContact`].
    MonsterWallContact,
    /// See [`GameEvent::HookObstacleContact`].
    HookObstacleContact,
    /// See [`GameEvent::MissileFloorContact`].
    MissileFloorContact,
    /// See [`GameEvent::PickupCollectible`].
    PickupCollectible,
    /// See [`GameEvent::CollectibleExit`].
    CollectibleExit,
    /// See [`GameEvent::MonsterAttackPlayer`].
    MonsterAttackPlayer,
    /// See [`GameEvent::PlayerAttackMonster`].
    PlayerAttackMonster,
    /// See [`GameEvent::MonsterMovementReversal`].
    MonsterMovementReversal,
    /// See [`GameEvent::PlayerDeath`].
    PlayerDeath,
    /// See [`GameEvent::MonsterDeath`].
    MonsterDeath,
    /// See [`GameEvent::Remove`].
    Remove,
    /// See [`GameEvent::PowerUpGranted`].
    PowerUpGranted,
    /// See [`GameEvent::PlayerReachedFinish`].
    PlayerReachedFinish,
    /// See [`GameEvent::GameFinished`].
    GameFinished,
}

impl GameEvent {
    /// The registration kind of this event.
    pub fn kind(&self) -> EventKind {
        match self {
            GameEvent::Move { .. } => EventKind::Move,
            GameEvent::StopMoving { .. } => EventKind::StopMoving,
            GameEvent::Jump { .. } => EventKind::Jump,
            GameEvent::UseGrappleHook { .. } => EventKind::UseGrappleHook,
            GameEvent::Teleport { .. } => EventKind::Teleport,
            GameEvent::ShootHook { .. } => EventKind::ShootHook,
            GameEvent::RetractHook { .. } => EventKind::RetractHook,
            GameEvent::SwingHook { .. } => EventKind::SwingHook,
            GameEvent::ReleaseHook { .. } => EventKind::ReleaseHook,
            GameEvent::PlayerMonsterContact { .. } => EventKind::PlayerMonsterContact,
            GameEvent::PlayerObstacleContact { .. } => EventKind::PlayerObstacleContact,
            GameEvent::PlayerFloorContact { .. } => EventKind::PlayerFloorContact,
            GameEvent::PlayerPowerUpBoxContact { .. } => EventKind::PlayerPowerUpBoxContact,
            GameEvent::PlayerMissileContact { .. } => EventKind::PlayerMissileContact,
            GameEvent::MonsterObstacleContact { .. } => EventKind::MonsterObstacleContact,
            GameEvent::MonsterWallContact { .. } => EventKind::MonsterWallContact,
            GameEvent::HookObstacleContact { .. } => EventKind::HookObstacleContact,
            GameEvent::MissileFloorContact { .. } => EventKind::MissileFloorContact,
            GameEvent::PickupCollectible { .. } => EventKind::PickupCollectible,
            GameEvent::CollectibleExit { .. } => EventKind::CollectibleExit,
            GameEvent::MonsterAttackPlayer { .. } => EventKind::MonsterAttackPlayer,
            GameEvent::PlayerAttackMonster { .. } => EventKind::PlayerAttackMonster,
            GameEvent::MonsterMovementReversal { .. } => EventKind::MonsterMovementReversal,
            GameEvent::PlayerDeath { .. } => EventKind::PlayerDeath,
            GameEvent::MonsterDeath { .. } => EventKind::MonsterDeath,
            GameEvent::Remove { .. } => EventKind::Remove,
            GameEvent::PowerUpGranted { .. } => EventKind::PowerUpGranted,
            GameEvent::PlayerReachedFinish { .. } => EventKind::PlayerReachedFinish,
            GameEvent::GameFinished { .. } => EventKind::GameFinished,
        }
    }
}

/// FIFO mailbox of pending events.
///
/// Any system may push during a tick; the bus alone drains it at the
/// flush point, in insertion order.
#[derive(Debug, Default)]
pub struct EventQueue {
    queue: VecDeque<GameEvent>,
}

impl EventQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enqueue an event.
    pub fn push(&mut self, event: GameEvent) {
        self.queue.push_back(event);
    }

    /// Dequeue the oldest pending event.
    pub fn pop(&mut self) -> Option<GameEvent> {
        self.queue.pop_front()
    }

    /// Number of pending events.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Whether no events are pending.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_preserves_insertion_order() {
        let mut queue = EventQueue::new();
        let a = EntityId::new();
        let b = EntityId::new();

        queue.push(GameEvent::PlayerDeath { player: a });
        queue.push(GameEvent::MonsterDeath { monster: b });
        queue.push(GameEvent::StopMoving { entity: a });

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop(), Some(GameEvent::PlayerDeath { player: a }));
        assert_eq!(queue.pop(), Some(GameEvent::MonsterDeath { monster: b }));
        assert_eq!(queue.pop(), Some(GameEvent::StopMoving { entity: a }));
        assert!(queue.pop().is_none());
    }

    #[test]
    fn test_event_kind_mapping() {
        let entity = EntityId::new();
        assert_eq!(
            GameEvent::Move { entity, to_left: true }.kind(),
            EventKind::Move
        );
        assert_eq!(
            GameEvent::ReleaseHook { hook: entity }.kind(),
            EventKind::ReleaseHook
        );
        assert_eq!(
            GameEvent::PowerUpGranted {
                player: entity,
                kind: PowerUpKind::SpeedBoost,
            }
            .kind(),
            EventKind::PowerUpGranted
        );
    }

    #[test]
    fn test_events_serialize_round_trip() {
        let event = GameEvent::PickupCollectible {
            player: EntityId::new(),
            collectible: EntityId::new(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
