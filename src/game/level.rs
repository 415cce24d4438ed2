//! Level Descriptors
//!
//! The persistence collaborator hands the core a level payload at load
//! time: map geometry plus a list of entity-creation descriptors. This
//! is the one setup-time surface where malformed input is possible, so
//! it is the one place that reports errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::vec2::Vec2;
use crate::ecs::component::PowerUpKind;
use crate::MAX_PLAYERS;

/// Errors raised while loading a level payload.
#[derive(Debug, Error)]
pub enum LevelError {
    /// The payload is not valid JSON for a level.
    #[error("invalid level JSON: {0}")]
    Parse(#[from] serde_json::Error),
    /// A player descriptor uses a slot outside 0..MAX_PLAYERS.
    #[error("player index {0} out of range")]
    PlayerIndexOutOfRange(u8),
    /// Two player descriptors claim the same slot.
    #[error("duplicate player index {0}")]
    DuplicatePlayerIndex(u8),
}

/// One entity to create at level load.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EntityDescriptor {
    /// A player spawn.
    Player {
        /// Player slot.
        index: u8,
        /// Spawn position.
        position: Vec2,
    },
    /// A monster spawn.
    Monster {
        /// Spawn position.
        position: Vec2,
        /// Starting health.
        health: i32,
        /// Body size.
        size: Vec2,
    },
    /// A collectible spawn.
    Collectible {
        /// Spawn position.
        position: Vec2,
        /// Points granted on pickup.
        points: i32,
        /// Pickup radius.
        radius: f32,
    },
    /// An obstacle.
    Obstacle {
        /// Position.
        position: Vec2,
        /// Size.
        size: Vec2,
    },
    /// A wall.
    Wall {
        /// Position.
        position: Vec2,
        /// Size.
        size: Vec2,
    },
    /// A power-up box.
    PowerUpBox {
        /// Position.
        position: Vec2,
        /// Size.
        size: Vec2,
        /// Which power-up the box grants.
        kind: PowerUpKind,
    },
}

/// A level: map extent, scene extent, and the entities to create.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LevelDescriptor {
    /// Level name.
    pub name: String,
    /// Playable map size.
    pub map_size: Vec2,
    /// Full scene size (floor span, boundary placement).
    pub scene_size: Vec2,
    /// Entities to create at load.
    pub entities: Vec<EntityDescriptor>,
}

impl LevelDescriptor {
    /// Parse and validate a level from JSON.
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let level: LevelDescriptor = serde_json::from_str(json)?;
        level.validate()?;
        Ok(level)
    }

    /// Check descriptor invariants.
    pub fn validate(&self) -> Result<(), LevelError> {
        let mut seen = [false; MAX_PLAYERS as usize];
        for descriptor in &self.entities {
            if let EntityDescriptor::Player { index, .. } = descriptor {
                if *index >= MAX_PLAYERS {
                    return Err(LevelError::PlayerIndexOutOfRange(*index));
                }
                if seen[usize::from(*index)] {
                    return Err(LevelError::DuplicatePlayerIndex(*index));
                }
                seen[usize::from(*index)] = true;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level_json() -> String {
        r#"{
            "name": "meadow",
            "map_size": { "x": 3000.0, "y": 800.0 },
            "scene_size": { "x": 3200.0, "y": 1000.0 },
            "entities": [
                { "type": "player", "index": 0, "position": { "x": 100.0, "y": 200.0 } },
                { "type": "monster", "position": { "x": 900.0, "y": 200.0 },
                  "health": 100, "size": { "x": 80.0, "y": 80.0 } },
                { "type": "collectible", "position": { "x": 400.0, "y": 250.0 },
                  "points": 10, "radius": 16.0 },
                { "type": "power_up_box", "position": { "x": 600.0, "y": 200.0 },
                  "size": { "x": 50.0, "y": 50.0 }, "kind": "SpeedBoost" }
            ]
        }"#
        .to_owned()
    }

    #[test]
    fn test_level_parses_from_json() {
        let level = LevelDescriptor::from_json(&level_json()).unwrap();
        assert_eq!(level.name, "meadow");
        assert_eq!(level.entities.len(), 4);
        assert!(matches!(
            level.entities[3],
            EntityDescriptor::PowerUpBox {
                kind: PowerUpKind::SpeedBoost,
                ..
            }
        ));
    }

    #[test]
    fn test_player_index_out_of_range_is_rejected() {
        let level = LevelDescriptor {
            name: "bad".into(),
            map_size: Vec2::new(100.0, 100.0),
            scene_size: Vec2::new(100.0, 100.0),
            entities: vec![EntityDescriptor::Player {
                index: 4,
                position: Vec2::ZERO,
            }],
        };
        assert!(matches!(
            level.validate(),
            Err(LevelError::PlayerIndexOutOfRange(4))
        ));
    }

    #[test]
    fn test_duplicate_player_index_is_rejected() {
        let level = LevelDescriptor {
            name: "bad".into(),
            map_size: Vec2::new(100.0, 100.0),
            scene_size: Vec2::new(100.0, 100.0),
            entities: vec![
                EntityDescriptor::Player {
                    index: 1,
                    position: Vec2::ZERO,
                },
                EntityDescriptor::Player {
                    index: 1,
                    position: Vec2::new(50.0, 0.0),
                },
            ],
        };
        assert!(matches!(
            level.validate(),
            Err(LevelError::DuplicatePlayerIndex(1))
        ));
    }

    #[test]
    fn test_malformed_json_is_a_parse_error() {
        assert!(matches!(
            LevelDescriptor::from_json("{ not json"),
            Err(LevelError::Parse(_))
        ));
    }
}
