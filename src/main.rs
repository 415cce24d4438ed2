//! Comet Rush Demo
//!
//! Builds an engine with a small in-code level, stands in for the
//! physics collaborator with naive integration and proximity contacts,
//! drives scripted inputs, and logs the race to completion.

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use comet_rush::core::vec2::Vec2;
use comet_rush::ecs::component::{PhysicsComponent, PositionComponent, PowerUpKind};
use comet_rush::ecs::entity::EntityKind;
use comet_rush::game::constants::EngineConfig;
use comet_rush::game::level::{EntityDescriptor, LevelDescriptor};
use comet_rush::game::mode::RaceMode;
use comet_rush::{EntityId, GameEngine, TICK_RATE, VERSION};

const GRAVITY: f32 = -980.0;
const MAX_TICKS: u32 = 120 * TICK_RATE;

fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    info!("Comet Rush core v{}", VERSION);
    info!("Tick rate: {} Hz", TICK_RATE);

    demo_race();
    Ok(())
}

fn demo_level() -> LevelDescriptor {
    LevelDescriptor {
        name: "demo-meadow".into(),
        map_size: Vec2::new(3_000.0, 800.0),
        scene_size: Vec2::new(3_200.0, 1_000.0),
        entities: vec![
            EntityDescriptor::Player {
                index: 0,
                position: Vec2::new(100.0, 150.0),
            },
            EntityDescriptor::Player {
                index: 1,
                position: Vec2::new(100.0, 150.0),
            },
            EntityDescriptor::Collectible {
                position: Vec2::new(700.0, 150.0),
                points: 10,
                radius: 16.0,
            },
            EntityDescriptor::Collectible {
                position: Vec2::new(1_400.0, 150.0),
                points: 25,
                radius: 16.0,
            },
            EntityDescriptor::PowerUpBox {
                position: Vec2::new(1_000.0, 150.0),
                size: Vec2::new(50.0, 50.0),
                kind: PowerUpKind::SpeedBoost,
            },
            EntityDescriptor::Obstacle {
                position: Vec2::new(2_000.0, 150.0),
                size: Vec2::new(60.0, 60.0),
            },
        ],
    }
}

/// Run a scripted two-player race.
fn demo_race() {
    let level = demo_level();
    let mut engine = GameEngine::new(
        level.map_size,
        Box::new(RaceMode::default()),
        EngineConfig::default(),
    );
    engine.setup_level(&level);

    info!("=== Starting demo race ===");

    let dt = 1.0 / TICK_RATE as f32;
    let mut sound_effects = 0usize;

    for tick in 0..MAX_TICKS {
        // Scripted inputs.
        if tick == 5 {
            engine.handle_player_move(0, false);
            engine.handle_player_move(1, false);
        }
        if tick == 60 {
            engine.handle_player_jump(0);
        }
        if tick == 120 {
            // Fires along the facing (rightward) and auto-releases at
            // max length since nothing anchors it mid-air.
            engine.handle_player_hook(1);
        }

        step_physics_stand_in(&mut engine, dt);
        engine.update(dt);

        sound_effects += engine.take_sound_effects().len();

        if tick % (10 * TICK_RATE) == 0 {
            if let Some(info) = engine.game_info(0) {
                info!(
                    "Tick {}: {:.1}s, player 0 at {}, score {}",
                    tick, info.time, info.players[0].position, info.player_score
                );
            }
        }

        if engine.is_over() {
            info!("Race finished at tick {}", tick);
            break;
        }
    }

    info!("=== Results ===");
    match engine.results() {
        Some(results) => {
            for player in results.players {
                info!(
                    "player {} ({}) - score {}",
                    player.player_index, player.image, player.score
                );
            }
        }
        None => info!("race did not finish within {} ticks", MAX_TICKS),
    }
    info!("Sound effects played: {}", sound_effects);

    for index in 0..2 {
        if let Some(snapshot) = engine.player_snapshot(index) {
            info!(
                "snapshot {} -> {}",
                index,
                serde_json::to_string(&snapshot).unwrap_or_default()
            );
        }
    }
}

/// Stand-in for the external physics collaborator: integrates dynamic
/// bodies, keeps them on the floor, and reports proximity contacts for
/// pickups and boxes.
fn step_physics_stand_in(engine: &mut GameEngine, dt: f32) {
    const FLOOR_Y: f32 = 150.0;

    // Integrate dynamic bodies.
    let movers: Vec<(EntityId, Vec2, Vec2, bool)> = engine
        .store()
        .components::<PhysicsComponent>()
        .filter(|(_, body)| body.is_dynamic && !body.pinned)
        .map(|(id, body)| {
            let position = engine
                .store()
                .get::<PositionComponent>(id)
                .map(|p| p.position)
                .unwrap_or(Vec2::ZERO);
            (id, position, body.velocity, body.affected_by_gravity)
        })
        .collect();

    let mut landed: Vec<EntityId> = Vec::new();
    for (id, position, velocity, gravity) in movers {
        let mut new_velocity = velocity;
        if gravity {
            new_velocity.y += GRAVITY * dt;
        }
        let mut new_position = position + new_velocity.scale(dt);
        if gravity && new_position.y <= FLOOR_Y {
            new_position.y = FLOOR_Y;
            if new_velocity.y < 0.0 {
                new_velocity.y = 0.0;
                landed.push(id);
            }
        }
        engine.sync_body(id, new_position, new_velocity);
    }

    // Contact reports.
    let floor = engine.store().entities_of_kind(EntityKind::Floor);
    for id in landed {
        if let Some(floor) = floor.first() {
            let point = engine
                .store()
                .get::<PositionComponent>(id)
                .map(|p| p.position)
                .unwrap_or(Vec2::ZERO);
            engine.handle_contact(id, *floor, point);
        }
    }

    for player in engine.store().player_entities() {
        let Some(player_position) = engine
            .store()
            .get::<PositionComponent>(player)
            .map(|p| p.position)
        else {
            continue;
        };
        let targets: Vec<(EntityId, Vec2)> = engine
            .store()
            .components::<PositionComponent>()
            .filter(|(id, _)| {
                matches!(
                    engine.store().kind_of(*id),
                    Some(EntityKind::Collectible | EntityKind::PowerUpBox)
                )
            })
            .map(|(id, component)| (id, component.position))
            .collect();
        for (target, position) in targets {
            if player_position.distance(position) < 60.0 {
                engine.handle_contact(player, target, position);
            }
        }
    }
}
