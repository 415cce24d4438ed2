//! Game Engine
//!
//! The composition root: owns the store, the event queue, the system
//! manager, and the active mode. One call to [`GameEngine::update`]
//! advances the simulation one tick:
//!
//! 1. systems update in fixed registration order
//! 2. the mode advances its clock and rules
//! 3. the event bus flushes until empty
//! 4. the end-of-game check runs
//!
//! External inputs (local or remote) go through the `handle_*` entry
//! points between ticks; the physics collaborator reports contacts via
//! `handle_contact`/`handle_separation`.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::core::vec2::Vec2;
use crate::ecs::entity::EntityId;
use crate::ecs::factory;
use crate::ecs::store::EntityStore;
use crate::game::collision::{resolve_contact, resolve_separation};
use crate::game::constants::{dimensions, EngineConfig};
use crate::game::events::{EventQueue, GameEvent};
use crate::game::level::{EntityDescriptor, LevelDescriptor};
use crate::game::mode::{GameMode, GameResults};
use crate::game::systems::attack::AttackSystem;
use crate::game::systems::buff::BuffSystem;
use crate::game::systems::death::DeathSystem;
use crate::game::systems::finish::FinishSystem;
use crate::game::systems::health::HealthSystem;
use crate::game::systems::homing_missile::HomingMissileSystem;
use crate::game::systems::hook::GrappleHookSystem;
use crate::game::systems::monster::MonsterSystem;
use crate::game::systems::movement::MovementSystem;
use crate::game::systems::physics::PhysicsSystem;
use crate::game::systems::player::PlayerSystem;
use crate::game::systems::position::PositionSystem;
use crate::game::systems::power_up::PowerUpSystem;
use crate::game::systems::removal::RemovalSystem;
use crate::game::systems::score::ScoreSystem;
use crate::game::systems::speed_boost::SpeedBoostPowerUpSystem;
use crate::game::systems::sprite::SpriteSystem;
use crate::game::systems::{SoundEffect, SystemContext, SystemManager};

/// Per-player info in the HUD payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerInfo {
    /// Current position.
    pub position: Vec2,
    /// Sprite image key.
    pub image: String,
}

/// HUD payload for one player's view.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameInfo {
    /// The viewing player's score.
    pub player_score: i32,
    /// The viewing player's health.
    pub player_health: i32,
    /// Position and image of every player.
    pub players: Vec<PlayerInfo>,
    /// Playable map size.
    pub map_size: Vec2,
    /// Mode clock in seconds.
    pub time: f32,
}

/// Outbound network sync payload for one player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    /// Player slot.
    pub player_index: u8,
    /// Current position.
    pub position: Vec2,
    /// Current score.
    pub score: i32,
}

/// The simulation composition root.
pub struct GameEngine {
    store: EntityStore,
    systems: SystemManager,
    events: EventQueue,
    sounds: Vec<SoundEffect>,
    mode: Box<dyn GameMode>,
    config: EngineConfig,
    map_size: Vec2,
    results_emitted: bool,
}

impl GameEngine {
    /// Build an engine with the default system set.
    pub fn new(map_size: Vec2, mode: Box<dyn GameMode>, config: EngineConfig) -> Self {
        let mut systems = SystemManager::new();
        // Basic systems
        systems.add(Box::new(PositionSystem));
        systems.add(Box::new(PhysicsSystem));
        systems.add(Box::new(ScoreSystem));
        systems.add(Box::new(HealthSystem));
        systems.add(Box::new(SpriteSystem));
        // Complex systems
        systems.add(Box::new(RemovalSystem));
        systems.add(Box::new(AttackSystem));
        systems.add(Box::new(PlayerSystem));
        systems.add(Box::new(MonsterSystem));
        systems.add(Box::new(MovementSystem));
        systems.add(Box::new(BuffSystem));
        systems.add(Box::new(DeathSystem));
        systems.add(Box::new(FinishSystem));
        // Power-up systems
        systems.add(Box::new(PowerUpSystem));
        systems.add(Box::new(SpeedBoostPowerUpSystem));
        systems.add(Box::new(HomingMissileSystem));
        systems.add(Box::new(GrappleHookSystem));

        info!(mode = mode.name(), systems = systems.len(), "engine created");

        Self {
            store: EntityStore::new(),
            systems,
            events: EventQueue::new(),
            sounds: Vec::new(),
            mode,
            config,
            map_size,
            results_emitted: false,
        }
    }

    /// Read access to the store, for render/network collaborators.
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// The playable map size.
    pub fn map_size(&self) -> Vec2 {
        self.map_size
    }

    // =========================================================================
    // Setup
    // =========================================================================

    /// Create the level geometry and every descriptor entity, then let
    /// the mode learn the players.
    pub fn setup_level(&mut self, level: &LevelDescriptor) {
        let scene = level.scene_size;

        factory::spawn_floor(
            &mut self.store,
            Vec2::new(scene.x / 2.0, 100.0),
            Vec2::new(scene.x, 1.0),
        );
        factory::spawn_wall(
            &mut self.store,
            Vec2::new(0.0, scene.y / 2.0),
            Vec2::new(1.0, scene.y),
        );
        factory::spawn_wall(
            &mut self.store,
            Vec2::new(scene.x, scene.y / 2.0),
            Vec2::new(1.0, scene.y),
        );
        factory::spawn_wall(
            &mut self.store,
            Vec2::new(scene.x / 2.0, scene.y),
            Vec2::new(scene.x, 1.0),
        );
        if self.mode.has_finish_line() {
            factory::spawn_finish_line(
                &mut self.store,
                Vec2::new(self.map_size.x + dimensions::FLAG.x / 2.0, 200.0),
            );
        }

        for descriptor in &level.entities {
            match descriptor {
                EntityDescriptor::Player { index, position } => {
                    factory::spawn_player(
                        &mut self.store,
                        &self.config.combat,
                        &self.config.movement,
                        *index,
                        *position,
                    );
                }
                EntityDescriptor::Monster {
                    position,
                    health,
                    size,
                } => {
                    factory::spawn_monster(
                        &mut self.store,
                        &self.config.movement,
                        *position,
                        *health,
                        *size,
                    );
                }
                EntityDescriptor::Collectible {
                    position,
                    points,
                    radius,
                } => {
                    factory::spawn_collectible(&mut self.store, *position, *points, *radius);
                }
                EntityDescriptor::Obstacle { position, size } => {
                    factory::spawn_obstacle(&mut self.store, *position, *size);
                }
                EntityDescriptor::Wall { position, size } => {
                    factory::spawn_wall(&mut self.store, *position, *size);
                }
                EntityDescriptor::PowerUpBox {
                    position,
                    size,
                    kind,
                } => {
                    factory::spawn_power_up_box(&mut self.store, *position, *size, *kind);
                }
            }
        }

        self.mode.setup(&self.store);
        info!(
            level = %level.name,
            entities = self.store.entity_count(),
            "level loaded"
        );
    }

    // =========================================================================
    // Tick
    // =========================================================================

    /// Advance the simulation one tick.
    pub fn update(&mut self, delta_time: f32) {
        {
            let mut ctx = SystemContext {
                store: &mut self.store,
                events: &mut self.events,
                sounds: &mut self.sounds,
                config: &self.config,
            };
            self.systems.update_all(&mut ctx, delta_time);
        }

        self.mode.update(&mut self.store, delta_time);

        {
            let mut ctx = SystemContext {
                store: &mut self.store,
                events: &mut self.events,
                sounds: &mut self.sounds,
                config: &self.config,
            };
            self.systems.dispatch(&mut ctx);
        }

        self.check_game_ended();
    }

    fn check_game_ended(&mut self) {
        if self.results_emitted || !self.mode.ended() {
            return;
        }
        let Some(results) = self.mode.results(&self.store) else {
            return;
        };
        info!(?results, "game finished");
        self.events.push(GameEvent::GameFinished { results });
        self.results_emitted = true;
    }

    /// Whether the mode has ended the game.
    pub fn is_over(&self) -> bool {
        self.results_emitted
    }

    /// Final results, once the game is over.
    pub fn results(&self) -> Option<GameResults> {
        if !self.results_emitted {
            return None;
        }
        self.mode.results(&self.store)
    }

    // =========================================================================
    // Physics collaborator
    // =========================================================================

    /// Write a body's simulated state back into the core, as the
    /// physics collaborator does after stepping its world.
    pub fn sync_body(&mut self, entity: EntityId, position: Vec2, velocity: Vec2) {
        PositionSystem::move_to(&mut self.store, entity, position);
        PhysicsSystem::set_velocity(&mut self.store, entity, velocity);
    }

    /// Resolve a contact-begin report into a queued event.
    pub fn handle_contact(&mut self, a: EntityId, b: EntityId, contact_point: Vec2) {
        if let Some(event) = resolve_contact(&self.store, a, b, contact_point) {
            self.events.push(event);
        }
    }

    /// Resolve a contact-end report into a queued event.
    pub fn handle_separation(&mut self, a: EntityId, b: EntityId, contact_point: Vec2) {
        if let Some(event) = resolve_separation(&self.store, a, b, contact_point) {
            self.events.push(event);
        }
    }

    // =========================================================================
    // Input entry points
    // =========================================================================

    /// Queue a move input for a player slot.
    pub fn handle_player_move(&mut self, player_index: u8, to_left: bool) {
        let Some(entity) = self.store.player_entity(player_index) else {
            return;
        };
        self.events.push(GameEvent::Move { entity, to_left });
    }

    /// Queue a stop-moving input for a player slot.
    pub fn handle_player_stopped_moving(&mut self, player_index: u8) {
        let Some(entity) = self.store.player_entity(player_index) else {
            return;
        };
        self.events.push(GameEvent::StopMoving { entity });
    }

    /// Queue a jump input for a player slot.
    pub fn handle_player_jump(&mut self, player_index: u8) {
        let Some(entity) = self.store.player_entity(player_index) else {
            return;
        };
        self.events.push(GameEvent::Jump {
            entity,
            impulse: self.config.movement.jump_impulse,
        });
    }

    /// Queue a grapple-hook input; fires along the player's facing.
    pub fn handle_player_hook(&mut self, player_index: u8) {
        let Some(entity) = self.store.player_entity(player_index) else {
            return;
        };
        let is_left = PositionSystem::is_facing_left(&self.store, entity);
        self.events.push(GameEvent::UseGrappleHook {
            player: entity,
            is_left,
        });
    }

    // =========================================================================
    // Network collaborator
    // =========================================================================

    /// Position of a player slot.
    pub fn position_of_player(&self, player_index: u8) -> Option<Vec2> {
        let entity = self.store.player_entity(player_index)?;
        PositionSystem::position_of(&self.store, entity)
    }

    /// Score of a player slot.
    pub fn score_of_player(&self, player_index: u8) -> Option<i32> {
        let entity = self.store.player_entity(player_index)?;
        ScoreSystem::score_of(&self.store, entity)
    }

    /// Apply an authoritative remote snapshot for a player slot.
    pub fn sync_player(&mut self, player_index: u8, score: i32, position: Vec2) {
        let Some(entity) = self.store.player_entity(player_index) else {
            debug!(player_index, "sync for unknown player dropped");
            return;
        };
        PositionSystem::move_to(&mut self.store, entity, position);
        ScoreSystem::set_score(&mut self.store, entity, score);
    }

    /// Outbound sync payload for a player slot.
    pub fn player_snapshot(&self, player_index: u8) -> Option<PlayerSnapshot> {
        Some(PlayerSnapshot {
            player_index,
            position: self.position_of_player(player_index)?,
            score: self.score_of_player(player_index)?,
        })
    }

    // =========================================================================
    // HUD / sound collaborators
    // =========================================================================

    /// HUD payload for a player slot's view.
    pub fn game_info(&self, player_index: u8) -> Option<GameInfo> {
        let entity = self.store.player_entity(player_index)?;
        Some(GameInfo {
            player_score: ScoreSystem::score_of(&self.store, entity)?,
            player_health: HealthSystem::health_of(&self.store, entity)?,
            players: self.players_info(),
            map_size: self.map_size,
            time: self.mode.time(),
        })
    }

    /// Position and image of every player.
    pub fn players_info(&self) -> Vec<PlayerInfo> {
        self.store
            .player_entities()
            .into_iter()
            .filter_map(|player| {
                Some(PlayerInfo {
                    position: PositionSystem::position_of(&self.store, player)?,
                    image: SpriteSystem::image_of(&self.store, player)?,
                })
            })
            .collect()
    }

    /// Drain pending sound-effect requests.
    pub fn take_sound_effects(&mut self) -> Vec<SoundEffect> {
        std::mem::take(&mut self.sounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::component::{GrappleHookComponent, HookState, PlayerComponent};
    use crate::ecs::entity::EntityKind;
    use crate::game::mode::RaceMode;

    const DT: f32 = 1.0 / 60.0;

    fn demo_level() -> LevelDescriptor {
        LevelDescriptor {
            name: "test".into(),
            map_size: Vec2::new(3_000.0, 800.0),
            scene_size: Vec2::new(3_200.0, 1_000.0),
            entities: vec![
                EntityDescriptor::Player {
                    index: 0,
                    position: Vec2::new(100.0, 200.0),
                },
                EntityDescriptor::Player {
                    index: 1,
                    position: Vec2::new(100.0, 400.0),
                },
                EntityDescriptor::Collectible {
                    position: Vec2::new(400.0, 250.0),
                    points: 10,
                    radius: 16.0,
                },
            ],
        }
    }

    fn race_engine() -> GameEngine {
        let mut engine = GameEngine::new(
            Vec2::new(3_000.0, 800.0),
            Box::new(RaceMode::default()),
            EngineConfig::default(),
        );
        engine.setup_level(&demo_level());
        engine
    }

    #[test]
    fn test_setup_creates_geometry_and_descriptors() {
        let engine = race_engine();
        let store = engine.store();
        assert_eq!(store.entities_of_kind(EntityKind::Floor).len(), 1);
        assert_eq!(store.entities_of_kind(EntityKind::Wall).len(), 3);
        assert_eq!(store.entities_of_kind(EntityKind::FinishLine).len(), 1);
        assert_eq!(store.entities_of_kind(EntityKind::Player).len(), 2);
        assert_eq!(store.entities_of_kind(EntityKind::Collectible).len(), 1);
    }

    #[test]
    fn test_score_scenario_pickup() {
        let mut engine = race_engine();
        let player = engine.store().player_entity(0).unwrap();
        let collectible = engine.store().entities_of_kind(EntityKind::Collectible)[0];
        ScoreSystem::set_score(&mut engine.store, player, 5);

        engine.handle_contact(player, collectible, Vec2::new(400.0, 250.0));
        engine.update(DT);

        assert_eq!(engine.score_of_player(0), Some(15));
        assert!(!engine.store().contains(collectible));
        assert_eq!(engine.take_sound_effects(), vec![SoundEffect::Collectible]);
        // Drained: a second take sees nothing.
        assert!(engine.take_sound_effects().is_empty());
    }

    #[test]
    fn test_full_hook_lifecycle_reaches_release_and_cleans_up() {
        let mut engine = race_engine();
        let player = engine.store().player_entity(0).unwrap();

        engine.handle_player_hook(0);
        engine.update(DT);

        let hooks = engine.store().entities_of_kind(EntityKind::GrappleHook);
        assert_eq!(hooks.len(), 1);
        let hook = hooks[0];
        let rope = engine.store().entities_of_kind(EntityKind::Rope)[0];
        assert!(!engine.store().get::<PlayerComponent>(player).unwrap().can_move);

        // Fly until past the minimum usable length, then anchor it.
        for _ in 0..12 {
            engine.update(DT);
        }
        assert_eq!(
            engine.store().get::<GrappleHookComponent>(hook).unwrap().state,
            HookState::Shooting
        );
        let anchor = PositionSystem::position_of(engine.store(), hook).unwrap();
        engine.handle_contact(hook, engine.store().entities_of_kind(EntityKind::Floor)[0], anchor);
        engine.update(DT);
        assert_eq!(
            engine.store().get::<GrappleHookComponent>(hook).unwrap().state,
            HookState::Retracting
        );

        // Run the machine to completion: retract, swing, release.
        let mut ticks = 0;
        while engine.store().contains(hook) {
            engine.update(DT);
            ticks += 1;
            assert!(ticks < 1_000, "hook never tore down");
        }

        assert!(!engine.store().contains(rope), "rope must go with the hook");
        let component = engine.store().get::<PlayerComponent>(player).unwrap();
        assert!(component.can_move && component.can_jump && component.can_hook);
    }

    #[test]
    fn test_short_hook_chain_resolves_in_one_tick() {
        let mut engine = race_engine();
        let player = engine.store().player_entity(0).unwrap();

        engine.handle_player_hook(0);
        engine.update(DT);
        let hook = engine.store().entities_of_kind(EntityKind::GrappleHook)[0];
        let rope = engine.store().entities_of_kind(EntityKind::Rope)[0];

        // Anchor immediately: far below min length. The contact event,
        // the release it chains to, and both removals all land in the
        // same flush.
        let anchor = PositionSystem::position_of(engine.store(), hook).unwrap();
        let floor = engine.store().entities_of_kind(EntityKind::Floor)[0];
        engine.handle_contact(hook, floor, anchor);
        engine.update(DT);

        assert!(!engine.store().contains(hook));
        assert!(!engine.store().contains(rope));
        let component = engine.store().get::<PlayerComponent>(player).unwrap();
        assert!(component.can_move && component.can_jump && component.can_hook);
    }

    #[test]
    fn test_player_obstacle_contact_forces_release() {
        let mut engine = race_engine();
        let player = engine.store().player_entity(0).unwrap();

        engine.handle_player_hook(0);
        engine.update(DT);
        let hook = engine.store().entities_of_kind(EntityKind::GrappleHook)[0];

        // Player slams into an obstacle mid-flight.
        let obstacle = factory::spawn_obstacle(
            &mut engine.store,
            Vec2::new(120.0, 200.0),
            Vec2::new(50.0, 50.0),
        );
        engine.handle_contact(player, obstacle, Vec2::new(110.0, 200.0));
        engine.update(DT);

        assert!(!engine.store().contains(hook));
        assert!(engine.store().get::<PlayerComponent>(player).unwrap().can_move);
    }

    #[test]
    fn test_race_scenario_two_players() {
        let mut engine = race_engine();

        // Teleport player 0 past the finish line, tick, then player 1.
        let p0 = engine.store().player_entity(0).unwrap();
        let p1 = engine.store().player_entity(1).unwrap();
        let past_line = Vec2::new(3_100.0, 200.0);

        PositionSystem::move_to(&mut engine.store, p0, past_line);
        engine.update(DT);
        assert_eq!(engine.score_of_player(0), Some(100));
        assert!(!engine.is_over(), "game must wait for the second player");

        PositionSystem::move_to(&mut engine.store, p1, past_line);
        engine.update(DT);
        engine.update(DT);
        assert_eq!(engine.score_of_player(1), Some(50));
        assert!(engine.is_over());

        let results = engine.results().unwrap();
        assert_eq!(results.players.len(), 2);
        assert_eq!(results.players[0].score, 100);
        assert_eq!(results.players[1].score, 50);
    }

    #[test]
    fn test_sync_and_snapshot_round_trip() {
        let mut engine = race_engine();
        engine.sync_player(1, 77, Vec2::new(1_234.0, 250.0));

        let snapshot = engine.player_snapshot(1).unwrap();
        assert_eq!(snapshot.player_index, 1);
        assert_eq!(snapshot.score, 77);
        assert_eq!(snapshot.position, Vec2::new(1_234.0, 250.0));

        // Unknown slots degrade to None, not a panic.
        assert!(engine.player_snapshot(3).is_none());
        engine.sync_player(3, 1, Vec2::ZERO);
    }

    #[test]
    fn test_game_info_payload() {
        let mut engine = race_engine();
        engine.update(DT);

        let info = engine.game_info(0).unwrap();
        assert_eq!(info.player_health, 100);
        assert_eq!(info.player_score, 0);
        assert_eq!(info.players.len(), 2);
        assert_eq!(info.map_size, Vec2::new(3_000.0, 800.0));
        assert!(info.time > 0.0);
    }

    #[test]
    fn test_move_input_gated_while_hooked() {
        let mut engine = race_engine();
        engine.handle_player_hook(0);
        engine.update(DT);

        let before = engine.position_of_player(0).unwrap();
        engine.handle_player_move(0, false);
        engine.update(DT);

        // Velocity stayed zero: the move was swallowed by the lock.
        let player = engine.store().player_entity(0).unwrap();
        assert_eq!(
            PhysicsSystem::velocity_of(engine.store(), player).unwrap().x,
            0.0
        );
        // (Hook shooting does not move the owner.)
        assert_eq!(engine.position_of_player(0), Some(before));
    }
}
