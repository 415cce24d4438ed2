//! Finish System
//!
//! Marks players finished once their x-position passes a finish line,
//! emitting PlayerReachedFinish for the mode and outer layers.

use tracing::debug;

use crate::ecs::component::PlayerComponent;
use crate::ecs::entity::EntityKind;
use crate::game::events::GameEvent;
use crate::game::systems::position::PositionSystem;
use crate::game::systems::{System, SystemContext};

/// Watches players cross the finish line.
pub struct FinishSystem;

impl System for FinishSystem {
    fn name(&self) -> &'static str {
        "finish"
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, _delta_time: f32) {
        let finish_xs: Vec<f32> = ctx
            .store
            .entities_of_kind(EntityKind::FinishLine)
            .into_iter()
            .filter_map(|line| PositionSystem::position_of(ctx.store, line))
            .map(|position| position.x)
            .collect();
        if finish_xs.is_empty() {
            return;
        }

        for player in ctx.store.player_entities() {
            let Some(component) = ctx.store.get::<PlayerComponent>(player) else {
                continue;
            };
            if component.finished {
                continue;
            }
            let Some(position) = PositionSystem::position_of(ctx.store, player) else {
                continue;
            };
            if finish_xs.iter().any(|x| position.x >= *x) {
                if let Some(component) = ctx.store.get_mut::<PlayerComponent>(player) {
                    component.finished = true;
                }
                debug!(player = ?player, "player reached finish line");
                ctx.events.push(GameEvent::PlayerReachedFinish { player });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::Vec2;
    use crate::ecs::factory::{spawn_finish_line, spawn_player};
    use crate::ecs::store::EntityStore;
    use crate::game::constants::EngineConfig;
    use crate::game::events::EventQueue;

    #[test]
    fn test_player_past_line_is_marked_finished_once() {
        let mut store = EntityStore::new();
        let config = EngineConfig::default();
        let player = spawn_player(
            &mut store,
            &config.combat,
            &config.movement,
            0,
            Vec2::new(3_100.0, 200.0),
        );
        spawn_finish_line(&mut store, Vec2::new(3_050.0, 200.0));

        let mut events = EventQueue::new();
        let mut sounds = Vec::new();
        let mut ctx = SystemContext {
            store: &mut store,
            events: &mut events,
            sounds: &mut sounds,
            config: &config,
        };
        FinishSystem.update(&mut ctx, 1.0 / 60.0);

        assert!(store.get::<PlayerComponent>(player).unwrap().finished);
        assert_eq!(events.pop(), Some(GameEvent::PlayerReachedFinish { player }));

        // A second pass emits nothing new.
        let mut ctx = SystemContext {
            store: &mut store,
            events: &mut events,
            sounds: &mut sounds,
            config: &config,
        };
        FinishSystem.update(&mut ctx, 1.0 / 60.0);
        assert!(events.is_empty());
    }

    #[test]
    fn test_player_before_line_is_not_finished() {
        let mut store = EntityStore::new();
        let config = EngineConfig::default();
        let player = spawn_player(
            &mut store,
            &config.combat,
            &config.movement,
            0,
            Vec2::new(10.0, 200.0),
        );
        spawn_finish_line(&mut store, Vec2::new(3_050.0, 200.0));

        let mut events = EventQueue::new();
        let mut sounds = Vec::new();
        let mut ctx = SystemContext {
            store: &mut store,
            events: &mut events,
            sounds: &mut sounds,
            config: &config,
        };
        FinishSystem.update(&mut ctx, 1.0 / 60.0);

        assert!(!store.get::<PlayerComponent>(player).unwrap().finished);
        assert!(events.is_empty());
    }
}
