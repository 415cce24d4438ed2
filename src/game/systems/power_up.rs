//! Power-Up System
//!
//! Turns power-up-box contacts into PowerUpGranted events, removes the
//! box, and plays the pickup sound. The per-kind systems react to the
//! granted event.

use tracing::debug;

use crate::ecs::component::PowerUpComponent;
use crate::game::events::{EventKind, GameEvent};
use crate::game::systems::{SoundEffect, System, SystemContext};

/// Dispenses power-ups from boxes.
pub struct PowerUpSystem;

impl System for PowerUpSystem {
    fn name(&self) -> &'static str {
        "power_up"
    }

    fn interests(&self) -> &'static [EventKind] {
        &[EventKind::PlayerPowerUpBoxContact]
    }

    fn on_event(&mut self, ctx: &mut SystemContext<'_>, event: &GameEvent) {
        let GameEvent::PlayerPowerUpBoxContact {
            player,
            power_up_box,
        } = event
        else {
            return;
        };

        let Some(kind) = ctx
            .store
            .get::<PowerUpComponent>(*power_up_box)
            .map(|component| component.kind)
        else {
            return;
        };

        debug!(player = ?player, ?kind, "power-up granted");
        ctx.sounds.push(SoundEffect::PowerUp);
        ctx.events.push(GameEvent::PowerUpGranted {
            player: *player,
            kind,
        });
        ctx.events.push(GameEvent::Remove {
            entity: *power_up_box,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::vec2::Vec2;
    use crate::ecs::component::PowerUpKind;
    use crate::ecs::factory::{spawn_player, spawn_power_up_box};
    use crate::ecs::store::EntityStore;
    use crate::game::constants::EngineConfig;
    use crate::game::events::EventQueue;

    #[test]
    fn test_box_contact_grants_and_removes() {
        let mut store = EntityStore::new();
        let config = EngineConfig::default();
        let player = spawn_player(
            &mut store,
            &config.combat,
            &config.movement,
            0,
            Vec2::new(0.0, 150.0),
        );
        let power_up_box = spawn_power_up_box(
            &mut store,
            Vec2::new(50.0, 150.0),
            Vec2::new(50.0, 50.0),
            PowerUpKind::SpeedBoost,
        );

        let mut events = EventQueue::new();
        let mut sounds = Vec::new();
        let mut ctx = SystemContext {
            store: &mut store,
            events: &mut events,
            sounds: &mut sounds,
            config: &config,
        };
        PowerUpSystem.on_event(
            &mut ctx,
            &GameEvent::PlayerPowerUpBoxContact {
                player,
                power_up_box,
            },
        );

        assert_eq!(sounds, vec![SoundEffect::PowerUp]);
        assert_eq!(
            events.pop(),
            Some(GameEvent::PowerUpGranted {
                player,
                kind: PowerUpKind::SpeedBoost
            })
        );
        assert_eq!(events.pop(), Some(GameEvent::Remove { entity: power_up_box }));
    }
}
