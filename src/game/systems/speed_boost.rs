//! Speed-Boost Power-Up System
//!
//! Spawns a speed-boost carrier entity when the boost is granted; the
//! buff system drives the carrier's lifecycle.

use crate::ecs::component::PowerUpKind;
use crate::ecs::factory::spawn_speed_boost;
use crate::game::constants::{SPEED_BOOST_DURATION, SPEED_BOOST_MULTIPLIER};
use crate::game::events::{EventKind, GameEvent};
use crate::game::systems::{System, SystemContext};

/// Materializes granted speed boosts.
pub struct SpeedBoostPowerUpSystem;

impl System for SpeedBoostPowerUpSystem {
    fn name(&self) -> &'static str {
        "speed_boost"
    }

    fn interests(&self) -> &'static [EventKind] {
        &[EventKind::PowerUpGranted]
    }

    fn on_event(&mut self, ctx: &mut SystemContext<'_>, event: &GameEvent) {
        let GameEvent::PowerUpGranted { player, kind } = event else {
            return;
        };
        if *kind != PowerUpKind::SpeedBoost {
            return;
        }

        spawn_speed_boost(ctx.store, *player, SPEED_BOOST_DURATION, SPEED_BOOST_MULTIPLIER);
    }
}
