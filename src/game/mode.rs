//! Game Modes
//!
//! A mode is the pluggable win-condition and scoring policy layered on
//! top of the simulation. [`RaceMode`] is the shipping mode: first past
//! the finish line earns the biggest bonus, the game ends once every
//! player has a final score.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::ecs::entity::EntityId;
use crate::ecs::store::EntityStore;
use crate::game::constants::RaceConfig;
use crate::game::systems::player::PlayerSystem;
use crate::game::systems::score::ScoreSystem;
use crate::game::systems::sprite::SpriteSystem;

/// Final standing of one player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerResult {
    /// Player slot.
    pub player_index: u8,
    /// Sprite image key for the results screen.
    pub image: String,
    /// Final score.
    pub score: i32,
}

/// Results payload produced when a mode ends the game.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameResults {
    /// One entry per player, in player-index order.
    pub players: Vec<PlayerResult>,
}

/// Pluggable win-condition/scoring policy.
pub trait GameMode {
    /// Mode name for logs.
    fn name(&self) -> &'static str;

    /// Whether levels for this mode get a finish line.
    fn has_finish_line(&self) -> bool;

    /// Learn the participating players. Called once after level setup.
    fn setup(&mut self, store: &EntityStore);

    /// Advance the mode's clock and rules by one tick.
    fn update(&mut self, store: &mut EntityStore, delta_time: f32);

    /// Elapsed mode time in seconds.
    fn time(&self) -> f32;

    /// Whether the game has ended.
    fn ended(&self) -> bool;

    /// Final results, once available.
    fn results(&self, store: &EntityStore) -> Option<GameResults>;
}

/// Race to the finish line. Ranking-dependent bonuses, game over when
/// every player has received one.
pub struct RaceMode {
    time: f32,
    config: RaceConfig,
    /// Per-player flag: has the finish-line bonus been awarded yet.
    finish_scored: BTreeMap<EntityId, bool>,
    next_ranking: u32,
}

impl RaceMode {
    /// Create a race mode with the given ranking table.
    pub fn new(config: RaceConfig) -> Self {
        Self {
            time: 0.0,
            config,
            finish_scored: BTreeMap::new(),
            next_ranking: 1,
        }
    }

    fn award_finish_bonuses(&mut self, store: &mut EntityStore) {
        let pending: Vec<EntityId> = self
            .finish_scored
            .iter()
            .filter(|(_, scored)| !**scored)
            .map(|(id, _)| *id)
            .collect();

        for player in pending {
            if PlayerSystem::has_player_finished(store, player) != Some(true) {
                continue;
            }

            let bonus = self.config.bonus_for(self.next_ranking);
            ScoreSystem::apply_score_change(store, player, bonus);
            self.finish_scored.insert(player, true);
            debug!(
                player = ?player,
                ranking = self.next_ranking,
                bonus,
                "finish-line bonus awarded"
            );
            self.next_ranking += 1;
        }
    }
}

impl Default for RaceMode {
    fn default() -> Self {
        Self::new(RaceConfig::default())
    }
}

impl GameMode for RaceMode {
    fn name(&self) -> &'static str {
        "race"
    }

    fn has_finish_line(&self) -> bool {
        true
    }

    fn setup(&mut self, store: &EntityStore) {
        self.time = 0.0;
        self.finish_scored.clear();
        self.next_ranking = 1;
        for player in store.player_entities() {
            self.finish_scored.insert(player, false);
        }
    }

    fn update(&mut self, store: &mut EntityStore, delta_time: f32) {
        self.time += delta_time;
        self.award_finish_bonuses(store);
    }

    fn time(&self) -> f32 {
        self.time
    }

    fn ended(&self) -> bool {
        !self.finish_scored.is_empty() && self.finish_scored.values().all(|scored| *scored)
    }

    fn results(&self, store: &EntityStore) -> Option<GameResults> {
        let mut players: Vec<PlayerResult> = self
            .finish_scored
            .keys()
            .filter_map(|id| {
                let index = store.player_index(*id)?;
                let image = SpriteSystem::image_of(store, *id).unwrap_or_default();
                let score = ScoreSystem::score_of(store, *id).unwrap_or(0);
                Some(PlayerResult {
                    player_index: index,
                    image,
                    score,
                })
            })
            .collect();
        players.sort_by_key(|result| result.player_index);
        Some(GameResults { players })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::Vec2;
    use crate::ecs::factory::spawn_player;
    use crate::game::constants::{CombatConfig, MovementConfig};

    fn race_setup() -> (EntityStore, RaceMode, EntityId, EntityId) {
        let mut store = EntityStore::new();
        let combat = CombatConfig::default();
        let movement = MovementConfig::default();
        let a = spawn_player(&mut store, &combat, &movement, 0, Vec2::new(0.0, 150.0));
        let b = spawn_player(&mut store, &combat, &movement, 1, Vec2::new(0.0, 150.0));

        let mut mode = RaceMode::new(RaceConfig {
            ranking_bonus: BTreeMap::from([(1, 100), (2, 50)]),
        });
        mode.setup(&store);
        (store, mode, a, b)
    }

    fn mark_finished(store: &mut EntityStore, player: EntityId) {
        store
            .get_mut::<crate::ecs::component::PlayerComponent>(player)
            .unwrap()
            .finished = true;
    }

    #[test]
    fn test_race_awards_ranked_bonuses_once() {
        let (mut store, mut mode, a, b) = race_setup();
        let dt = 1.0 / 60.0;

        mode.update(&mut store, dt);
        assert!(!mode.ended());

        // Player A finishes first.
        mark_finished(&mut store, a);
        mode.update(&mut store, dt);
        assert_eq!(ScoreSystem::score_of(&store, a), Some(100));
        assert!(!mode.ended());

        // Re-running must not double-award.
        mode.update(&mut store, dt);
        assert_eq!(ScoreSystem::score_of(&store, a), Some(100));

        // Player B finishes second; game ends.
        mark_finished(&mut store, b);
        mode.update(&mut store, dt);
        assert_eq!(ScoreSystem::score_of(&store, b), Some(50));
        assert!(mode.ended());
    }

    #[test]
    fn test_race_not_ended_before_setup() {
        let mode = RaceMode::default();
        assert!(!mode.ended());
    }

    #[test]
    fn test_race_results_sorted_by_index() {
        let (mut store, mut mode, a, b) = race_setup();
        mark_finished(&mut store, a);
        mark_finished(&mut store, b);
        mode.update(&mut store, 1.0 / 60.0);

        let results = mode.results(&store).unwrap();
        assert_eq!(results.players.len(), 2);
        assert_eq!(results.players[0].player_index, 0);
        assert_eq!(results.players[1].player_index, 1);
        assert_eq!(results.players[0].score, 100);
        assert_eq!(results.players[1].score, 50);
    }

    #[test]
    fn test_race_clock_accumulates() {
        let (mut store, mut mode, _, _) = race_setup();
        for _ in 0..60 {
            mode.update(&mut store, 1.0 / 60.0);
        }
        assert!((mode.time() - 1.0).abs() < 1e-4);
    }
}
