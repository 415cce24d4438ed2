//! Grapple Hook System
//!
//! The hook lifecycle: shooting → retracting → swinging → releasing.
//! Each tick the system emits one state-named event per live hook; its
//! own handlers advance the geometry within the same flush. Obstacle
//! contacts interrupt the flight, player-obstacle contacts force a
//! release.
//!
//! Geometry: the hook entity's position is the moving endpoint (the
//! anchor once latched); the component's startpoint is the owner-side
//! rope end. Angles are degrees at the API surface, radians inside the
//! trigonometry.

use tracing::debug;

use crate::core::vec2::Vec2;
use crate::ecs::component::{
    GrappleHookComponent, GrappleHookOwnerComponent, HookState, OwnsRopeComponent, PlayerComponent,
};
use crate::ecs::entity::{EntityId, EntityKind};
use crate::ecs::factory::spawn_grapple_hook;
use crate::ecs::store::EntityStore;
use crate::game::constants::HookConfig;
use crate::game::events::{EventKind, GameEvent};
use crate::game::systems::physics::PhysicsSystem;
use crate::game::systems::player::PlayerSystem;
use crate::game::systems::position::PositionSystem;
use crate::game::systems::sprite::SpriteSystem;
use crate::game::systems::{System, SystemContext};

/// Rope sprite/body width.
const ROPE_WIDTH: f32 = 10.0;
/// The rope is drawn short of the hook head at both ends.
const ROPE_LENGTH_INSET: f32 = 20.0;

/// Owns the grapple-hook state machine.
pub struct GrappleHookSystem;

impl GrappleHookSystem {
    // =========================================================================
    // Queries
    // =========================================================================

    /// The hook currently owned by a player, if one is in flight.
    pub fn hook_owned_by(store: &EntityStore, player: EntityId) -> Option<EntityId> {
        store
            .components::<GrappleHookOwnerComponent>()
            .find(|(_, owner)| owner.owner == player)
            .map(|(hook, _)| hook)
    }

    /// Current rope length of a hook.
    pub fn length(store: &EntityStore, hook: EntityId) -> f32 {
        let Some(start) = Self::start_point(store, hook) else {
            return 0.0;
        };
        let Some(end) = Self::end_point(store, hook) else {
            return 0.0;
        };
        start.distance(end)
    }

    /// Current state of a hook.
    pub fn hook_state(store: &EntityStore, hook: EntityId) -> Option<HookState> {
        store
            .get::<GrappleHookComponent>(hook)
            .map(|component| component.state)
    }

    fn set_state(store: &mut EntityStore, hook: EntityId, state: HookState) {
        if let Some(component) = store.get_mut::<GrappleHookComponent>(hook) {
            debug!(hook = ?hook, from = ?component.state, to = ?state, "hook state change");
            component.state = state;
        }
    }

    fn owner_of(store: &EntityStore, hook: EntityId) -> Option<EntityId> {
        store
            .get::<GrappleHookOwnerComponent>(hook)
            .map(|component| component.owner)
    }

    fn rope_of(store: &EntityStore, hook: EntityId) -> Option<EntityId> {
        store
            .get::<OwnsRopeComponent>(hook)
            .map(|component| component.rope)
    }

    fn start_point(store: &EntityStore, hook: EntityId) -> Option<Vec2> {
        store
            .get::<GrappleHookComponent>(hook)
            .map(|component| component.startpoint)
    }

    /// The hook entity's own position is the rope's far end.
    fn end_point(store: &EntityStore, hook: EntityId) -> Option<Vec2> {
        PositionSystem::position_of(store, hook)
    }

    // =========================================================================
    // Geometry steps
    // =========================================================================

    /// One shooting step: push the endpoint outward, pin the start to
    /// the owner.
    fn extend(store: &mut EntityStore, config: &HookConfig, hook: EntityId) {
        let Some(old_end) = Self::end_point(store, hook) else {
            return;
        };
        let Some(is_left) = store
            .get::<GrappleHookComponent>(hook)
            .map(|component| component.is_left)
        else {
            return;
        };
        let Some(owner) = Self::owner_of(store, hook) else {
            return;
        };
        let Some(owner_position) = PositionSystem::position_of(store, owner) else {
            return;
        };

        let new_end = old_end + config.delta(is_left);
        if let Some(component) = store.get_mut::<GrappleHookComponent>(hook) {
            component.startpoint = owner_position;
        }
        PositionSystem::move_to(store, hook, new_end);
    }

    /// One retracting step: pull the owner along the rope direction,
    /// spending the retract budget.
    fn retract(store: &mut EntityStore, config: &HookConfig, hook: EntityId) {
        let Some(owner) = Self::owner_of(store, hook) else {
            return;
        };
        let Some(old_start) = Self::start_point(store, hook) else {
            return;
        };
        let Some(is_left) = store
            .get::<GrappleHookComponent>(hook)
            .map(|component| component.is_left)
        else {
            return;
        };

        let delta = config.delta(is_left);
        let new_start = old_start + delta;
        if let Some(component) = store.get_mut::<GrappleHookComponent>(hook) {
            component.startpoint = new_start;
            component.length_to_retract -= delta.length();
        }
        PositionSystem::move_to(store, owner, new_start);
    }

    /// One swinging step: rotate the owner around the anchor by the
    /// configured angular delta, preserving radius.
    fn swing_step(store: &mut EntityStore, config: &HookConfig, hook: EntityId) {
        let Some(owner) = Self::owner_of(store, hook) else {
            return;
        };
        let Some(end) = Self::end_point(store, hook) else {
            return;
        };
        let Some(start) = Self::start_point(store, hook) else {
            return;
        };
        let Some(is_left) = store
            .get::<GrappleHookComponent>(hook)
            .map(|component| component.is_left)
        else {
            return;
        };

        let radial = start - end;
        let radius = radial.length();
        let angle = radial.angle();
        let delta = config.delta_angle_degrees.to_radians();
        let new_angle = if is_left { angle - delta } else { angle + delta };
        let new_start = Vec2::new(
            end.x + radius * new_angle.cos(),
            end.y + radius * new_angle.sin(),
        );

        if let Some(component) = store.get_mut::<GrappleHookComponent>(hook) {
            component.startpoint = new_start;
            component.angle_to_swing -= config.delta_angle_degrees;
        }
        PositionSystem::move_to(store, owner, new_start);
    }

    /// Seed the swing budget from the anchor, the current owner-side
    /// point, and the fire point projected through the configured swing
    /// arc.
    fn set_swing_angle(store: &mut EntityStore, config: &HookConfig, hook: EntityId) {
        let Some(anchor) = Self::end_point(store, hook) else {
            return;
        };
        let Some(current) = Self::start_point(store, hook) else {
            return;
        };
        let Some((fire_point, is_left)) = store
            .get::<GrappleHookComponent>(hook)
            .map(|component| (component.shoot_point, component.is_left))
        else {
            return;
        };

        let radial = fire_point - anchor;
        let radius = radial.length();
        let angle = radial.angle();
        let arc = config.default_swing_angle_degrees.to_radians();
        let new_angle = if is_left { angle - arc } else { angle + arc };
        let swing_end = Vec2::new(
            anchor.x + radius * new_angle.cos(),
            anchor.y + radius * new_angle.sin(),
        );

        let budget = angle_between_points(anchor, current, swing_end);
        if let Some(component) = store.get_mut::<GrappleHookComponent>(hook) {
            component.angle_to_swing = budget;
        }
    }

    /// Resync the rope's body/sprite size, midpoint, and rotation with
    /// the current rope span.
    fn adjust_rope(store: &mut EntityStore, hook: EntityId) {
        let Some(rope) = Self::rope_of(store, hook) else {
            return;
        };
        let Some(start) = Self::start_point(store, hook) else {
            return;
        };
        let Some(end) = Self::end_point(store, hook) else {
            return;
        };

        let size = Vec2::new(ROPE_WIDTH, Self::length(store, hook) - ROPE_LENGTH_INSET);
        PhysicsSystem::set_size(store, rope, size);
        SpriteSystem::set_size(store, rope, size);

        PositionSystem::move_to(store, rope, start.midpoint(end));

        let span = end - start;
        PositionSystem::rotate_to(store, rope, span.angle() - std::f32::consts::FRAC_PI_2);
    }

    // =========================================================================
    // Event handlers
    // =========================================================================

    fn activate(ctx: &mut SystemContext<'_>, player: EntityId, is_left: bool) {
        let can_hook = ctx
            .store
            .get::<PlayerComponent>(player)
            .map(|component| component.can_hook)
            .unwrap_or(false);
        if !can_hook {
            return;
        }
        let Some(position) = PositionSystem::position_of(ctx.store, player) else {
            return;
        };

        // Control is locked for the whole flight.
        PlayerSystem::lock_capabilities(ctx.store, player);
        let (hook, rope) = spawn_grapple_hook(ctx.store, &ctx.config.hook, player, is_left, position);
        debug!(player = ?player, hook = ?hook, rope = ?rope, is_left, "hook fired");
    }

    fn handle_shoot(ctx: &mut SystemContext<'_>, hook: EntityId) {
        if Self::length(ctx.store, hook) >= ctx.config.hook.max_length {
            Self::set_state(ctx.store, hook, HookState::Releasing);
            return;
        }

        Self::extend(ctx.store, &ctx.config.hook, hook);
        Self::adjust_rope(ctx.store, hook);
    }

    fn handle_retract(ctx: &mut SystemContext<'_>, hook: EntityId) {
        let Some(remaining) = ctx
            .store
            .get::<GrappleHookComponent>(hook)
            .map(|component| component.length_to_retract)
        else {
            return;
        };
        if remaining <= 0.0 {
            Self::set_state(ctx.store, hook, HookState::Swinging);
            return;
        }

        Self::retract(ctx.store, &ctx.config.hook, hook);
        Self::adjust_rope(ctx.store, hook);
    }

    fn handle_swing(ctx: &mut SystemContext<'_>, hook: EntityId) {
        let Some(remaining) = ctx
            .store
            .get::<GrappleHookComponent>(hook)
            .map(|component| component.angle_to_swing)
        else {
            return;
        };
        if remaining <= 0.0 {
            Self::set_state(ctx.store, hook, HookState::Releasing);
            return;
        }

        Self::swing_step(ctx.store, &ctx.config.hook, hook);
        Self::adjust_rope(ctx.store, hook);
    }

    fn handle_release(ctx: &mut SystemContext<'_>, hook: EntityId) {
        let Some(owner) = Self::owner_of(ctx.store, hook) else {
            return;
        };
        let Some(rope) = Self::rope_of(ctx.store, hook) else {
            return;
        };

        PlayerSystem::restore_capabilities(ctx.store, owner);
        debug!(hook = ?hook, owner = ?owner, "hook released");
        ctx.events.push(GameEvent::Remove { entity: rope });
        ctx.events.push(GameEvent::Remove { entity: hook });
    }

    fn handle_player_obstacle(ctx: &mut SystemContext<'_>, player: EntityId) {
        // Slamming into geometry tears the hook off.
        if let Some(hook) = Self::hook_owned_by(ctx.store, player) {
            ctx.events.push(GameEvent::ReleaseHook { hook });
        }
    }

    fn handle_hook_obstacle(ctx: &mut SystemContext<'_>, hook: EntityId) {
        let Some(state) = Self::hook_state(ctx.store, hook) else {
            return;
        };

        Self::set_swing_angle(ctx.store, &ctx.config.hook, hook);

        if state != HookState::Shooting {
            return;
        }

        if Self::length(ctx.store, hook) >= ctx.config.hook.min_length {
            Self::set_state(ctx.store, hook, HookState::Retracting);
        } else {
            // Too short to swing on; give it up.
            ctx.events.push(GameEvent::ReleaseHook { hook });
        }
    }
}

impl System for GrappleHookSystem {
    fn name(&self) -> &'static str {
        "grapple_hook"
    }

    fn interests(&self) -> &'static [EventKind] {
        &[
            EventKind::UseGrappleHook,
            EventKind::ShootHook,
            EventKind::RetractHook,
            EventKind::SwingHook,
            EventKind::ReleaseHook,
            EventKind::PlayerObstacleContact,
            EventKind::HookObstacleContact,
        ]
    }

    fn update(&mut self, ctx: &mut SystemContext<'_>, _delta_time: f32) {
        // One state-named event per live hook, handled at the flush.
        for hook in ctx.store.entities_of_kind(EntityKind::GrappleHook) {
            let Some(state) = Self::hook_state(ctx.store, hook) else {
                continue;
            };
            let event = match state {
                HookState::Shooting => GameEvent::ShootHook { hook },
                HookState::Retracting => GameEvent::RetractHook { hook },
                HookState::Swinging => GameEvent::SwingHook { hook },
                HookState::Releasing => GameEvent::ReleaseHook { hook },
            };
            ctx.events.push(event);
        }
    }

    fn on_event(&mut self, ctx: &mut SystemContext<'_>, event: &GameEvent) {
        match event {
            GameEvent::UseGrappleHook { player, is_left } => {
                Self::activate(ctx, *player, *is_left);
            }
            GameEvent::ShootHook { hook } => Self::handle_shoot(ctx, *hook),
            GameEvent::RetractHook { hook } => Self::handle_retract(ctx, *hook),
            GameEvent::SwingHook { hook } => Self::handle_swing(ctx, *hook),
            GameEvent::ReleaseHook { hook } => Self::handle_release(ctx, *hook),
            GameEvent::PlayerObstacleContact { player, .. } => {
                Self::handle_player_obstacle(ctx, *player);
            }
            GameEvent::HookObstacleContact { hook, .. } => {
                Self::handle_hook_obstacle(ctx, *hook);
            }
            _ => {}
        }
    }
}

/// Angle at `s` between rays to `p` and `e`, in degrees, via the law of
/// cosines. The cosine is clamped against float drift before `acos`.
fn angle_between_points(s: Vec2, p: Vec2, e: Vec2) -> f32 {
    let sp = s.distance(p);
    let se = s.distance(e);
    let pe = p.distance(e);
    if sp == 0.0 || se == 0.0 {
        return 0.0;
    }

    let cos_angle = ((sp * sp + se * se - pe * pe) / (2.0 * sp * se)).clamp(-1.0, 1.0);
    cos_angle.acos().to_degrees()
}
