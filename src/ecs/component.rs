//! Component Types
//!
//! Typed records attached to entities. A component holds data only;
//! systems own all behavior.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;
use crate::ecs::entity::EntityId;

// =============================================================================
// SPATIAL
// =============================================================================

/// Position, rotation, and facing of an entity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PositionComponent {
    /// World position.
    pub position: Vec2,
    /// Rotation in radians.
    pub rotation: f32,
    /// Whether the entity currently faces left.
    pub facing_left: bool,
}

impl PositionComponent {
    /// Create at a position with no rotation, facing right.
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            rotation: 0.0,
            facing_left: false,
        }
    }
}

/// Collision shape of a physics body.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    /// Axis-aligned rectangle of the given size.
    Rectangle {
        /// Width and height.
        size: Vec2,
    },
    /// Circle of the given radius.
    Circle {
        /// Radius.
        radius: f32,
    },
}

/// Facade over the physics collaborator's body state.
///
/// The core reads and writes this record; the external physics engine
/// creates and syncs real bodies from it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhysicsComponent {
    /// Body mass.
    pub mass: f32,
    /// Current velocity.
    pub velocity: Vec2,
    /// Whether the body is pinned in place.
    pub pinned: bool,
    /// Collision shape.
    pub shape: Shape,
    /// Bounciness.
    pub restitution: f32,
    /// Whether the body moves at all.
    pub is_dynamic: bool,
    /// Whether gravity applies.
    pub affected_by_gravity: bool,
    /// Category bitmask of this body.
    pub category_bitmask: u32,
    /// Which categories report contacts with this body.
    pub contact_test_mask: u32,
    /// Which categories this body physically collides with.
    pub collision_bitmask: u32,
    /// Linear damping factor.
    pub linear_damping: f32,
    /// Horizontal speed cap for dynamic bodies.
    pub max_run_speed: f32,
}

impl PhysicsComponent {
    /// Rectangle body with defaults: dynamic, gravity on, unit mass.
    pub fn rectangle(size: Vec2) -> Self {
        Self::with_shape(Shape::Rectangle { size })
    }

    /// Circle body with defaults: dynamic, gravity on, unit mass.
    pub fn circle(radius: f32) -> Self {
        Self::with_shape(Shape::Circle { radius })
    }

    fn with_shape(shape: Shape) -> Self {
        Self {
            mass: 1.0,
            velocity: Vec2::ZERO,
            pinned: false,
            shape,
            restitution: 0.0,
            is_dynamic: true,
            affected_by_gravity: true,
            category_bitmask: 0,
            contact_test_mask: 0,
            collision_bitmask: 0,
            linear_damping: 0.1,
            max_run_speed: f32::INFINITY,
        }
    }

    /// Bounding size of the shape.
    pub fn size(&self) -> Vec2 {
        match self.shape {
            Shape::Rectangle { size } => size,
            Shape::Circle { radius } => Vec2::new(radius * 2.0, radius * 2.0),
        }
    }

    /// Set the initial velocity.
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Set the category bitmask.
    pub fn with_category(mut self, category: u32) -> Self {
        self.category_bitmask = category;
        self
    }

    /// Set the contact-test bitmask.
    pub fn with_contact_test(mut self, mask: u32) -> Self {
        self.contact_test_mask = mask;
        self
    }

    /// Set the collision bitmask.
    pub fn with_collision_mask(mut self, mask: u32) -> Self {
        self.collision_bitmask = mask;
        self
    }

    /// Set whether gravity applies.
    pub fn with_gravity(mut self, affected: bool) -> Self {
        self.affected_by_gravity = affected;
        self
    }

    /// Set the restitution.
    pub fn with_restitution(mut self, restitution: f32) -> Self {
        self.restitution = restitution;
        self
    }

    /// Set whether the body is dynamic.
    pub fn with_dynamic(mut self, is_dynamic: bool) -> Self {
        self.is_dynamic = is_dynamic;
        self
    }

    /// Set the linear damping.
    pub fn with_linear_damping(mut self, damping: f32) -> Self {
        self.linear_damping = damping;
        self
    }

    /// Set the horizontal speed cap.
    pub fn with_max_run_speed(mut self, speed: f32) -> Self {
        self.max_run_speed = speed;
        self
    }
}

// =============================================================================
// GAMEPLAY STATE
// =============================================================================

/// Integer health. May go negative; "alive" means health > 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthComponent {
    /// Current health.
    pub health: i32,
}

impl HealthComponent {
    /// Create with starting health.
    pub fn new(health: i32) -> Self {
        Self { health }
    }
}

/// Integer score, mutated only by the score system.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreComponent {
    /// Accumulated score.
    pub score: i32,
}

impl ScoreComponent {
    /// Create with a starting score.
    pub fn new(score: i32) -> Self {
        Self { score }
    }
}

/// Player index and capability flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerComponent {
    /// Player slot (0..=3).
    pub index: u8,
    /// Whether movement input is honored.
    pub can_move: bool,
    /// Whether jump input is honored.
    pub can_jump: bool,
    /// Whether a grapple hook may be fired.
    pub can_hook: bool,
    /// Set once the player crosses the finish line.
    pub finished: bool,
}

impl PlayerComponent {
    /// Create for a player slot with all capabilities enabled.
    pub fn new(index: u8) -> Self {
        Self {
            index,
            can_move: true,
            can_jump: true,
            can_hook: true,
            finished: false,
        }
    }
}

/// Point value granted when the entity is picked up.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PointsComponent {
    /// Points granted on pickup.
    pub points: i32,
}

impl PointsComponent {
    /// Create with a point value.
    pub fn new(points: i32) -> Self {
        Self { points }
    }
}

/// Rendering facade: image key, animation key, draw size.
///
/// The render collaborator reads this; systems only write animation
/// keys and sizes as gameplay side effects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpriteComponent {
    /// Image set key.
    pub image: String,
    /// Active animation key, if any.
    pub animation: Option<String>,
    /// Draw size.
    pub size: Vec2,
}

impl SpriteComponent {
    /// Create with an image key and size, no animation.
    pub fn new(image: impl Into<String>, size: Vec2) -> Self {
        Self {
            image: image.into(),
            animation: None,
            size,
        }
    }
}

/// Tracks death state and time since death.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct DeathTimerComponent {
    /// Whether the entity is currently dead.
    pub dead: bool,
    /// Seconds elapsed since death.
    pub seconds_since_death: f32,
}

// =============================================================================
// GRAPPLE HOOK
// =============================================================================

/// Lifecycle phase of a grapple hook.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HookState {
    /// Flying outward from the owner.
    Shooting,
    /// Pulling the owner toward the anchor.
    Retracting,
    /// Rotating the owner around the anchor.
    Swinging,
    /// Tearing down hook and rope.
    Releasing,
}

/// State of one grapple hook in flight.
///
/// The hook entity's position component is the moving endpoint;
/// `startpoint` tracks the owner-side end of the rope.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GrappleHookComponent {
    /// Current lifecycle phase.
    pub state: HookState,
    /// Owner-side end of the rope.
    pub startpoint: Vec2,
    /// Where the hook was fired from.
    pub shoot_point: Vec2,
    /// Whether the hook was fired to the left.
    pub is_left: bool,
    /// Remaining length to pull in while retracting.
    pub length_to_retract: f32,
    /// Remaining swing budget in degrees.
    pub angle_to_swing: f32,
}

impl GrappleHookComponent {
    /// Create a hook just fired from `startpoint`.
    pub fn new(startpoint: Vec2, is_left: bool, retract_length: f32) -> Self {
        Self {
            state: HookState::Shooting,
            startpoint,
            shoot_point: startpoint,
            is_left,
            length_to_retract: retract_length,
            angle_to_swing: 0.0,
        }
    }
}

/// Back-reference from a hook to its owning player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrappleHookOwnerComponent {
    /// The firing player's entity id.
    pub owner: EntityId,
}

/// Back-reference from a hook to its visual rope entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnsRopeComponent {
    /// The rope entity id.
    pub rope: EntityId,
}

// =============================================================================
// POWER-UPS
// =============================================================================

/// The closed set of power-up kinds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    /// Temporary run-speed multiplier.
    SpeedBoost,
    /// Launches a homing missile at the player ahead.
    HomingMissile,
}

/// Power-up payload carried by a power-up box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PowerUpComponent {
    /// Which power-up the box grants.
    pub kind: PowerUpKind,
}

/// An active speed boost applied to a target entity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpeedBoostComponent {
    /// The boosted entity.
    pub target: EntityId,
    /// Seconds until the boost expires.
    pub remaining: f32,
    /// Run-speed multiplier.
    pub multiplier: f32,
    /// Whether the multiplier has been applied.
    pub applied: bool,
}

impl SpeedBoostComponent {
    /// Create a boost for a target.
    pub fn new(target: EntityId, duration: f32, multiplier: f32) -> Self {
        Self {
            target,
            remaining: duration,
            multiplier,
            applied: false,
        }
    }
}

/// Guidance state of a homing missile.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HomingMissileComponent {
    /// Acquired target, if any.
    pub target: Option<EntityId>,
    /// The player who launched the missile.
    pub source: EntityId,
    /// Launch impulse applied on target acquisition.
    pub impulse: Vec2,
}

impl HomingMissileComponent {
    /// Create an un-targeted missile.
    pub fn new(source: EntityId, impulse: Vec2) -> Self {
        Self {
            target: None,
            source,
            impulse,
        }
    }
}
