//! Motion body: acceleration, friction, speed cap and axis-separated collision.
//!
//! A [`MotionBody`] is one controllable actor. Each call to
//! [`MotionBody::update`] runs a fixed sequence:
//!
//! 1. **Acceleration**: reset, then set from held directions (left before
//!    right, up before down; the later direction on an axis wins). A
//!    direction only accelerates while the body is below top speed that way.
//! 2. **Friction**: on an axis with neither direction held, or already above
//!    top speed, velocity moves toward zero by a fixed amount and stops at 0.
//! 3. **Speed cap**: each axis is clamped to `max_speed`.
//! 4. **Move X, then Y**: the candidate box (`position + velocity` on that
//!    axis only) is tested against the world's solids. When blocked, the body
//!    pixel-steps one unit at a time to the last free position and the axis
//!    velocity is zeroed. Acceleration is added afterwards, so it shows up in
//!    movement from the next step.
//! 5. **Sync**: the bounding box follows the position.
//! 6. **Fire**: every step fire is held, one [`SpawnRequest`] is emitted from
//!    the body's center toward the input's aim target.
//!
//! # Invariants
//!
//! - After every step, `|velocity| <= max_speed` on each axis.
//! - After every step, the bounding box origin equals the position.
//! - A body never collides with its own registered hitbox.
//! - With [`CollisionResolution::NearestStop`], a body that starts a step
//!   clear of every solid ends it clear of every solid.
//!
//! # Example
//!
//! ```
//! use glam::Vec2;
//! use tilemotion_core::body::MotionBody;
//! use tilemotion_core::config::MotionConfig;
//! use tilemotion_core::geometry::Rect;
//! use tilemotion_core::input::{Controls, InputState};
//! use tilemotion_core::output::SpawnRequest;
//! use tilemotion_core::world::World;
//!
//! let world = World::from_rects([Rect::new(40.0, 0.0, 16.0, 32.0)]).unwrap();
//! let mut body = MotionBody::new(Vec2::ZERO, MotionConfig::default());
//! let mut spawns: Vec<SpawnRequest> = Vec::new();
//!
//! let right = InputState::holding(Controls::RIGHT);
//! for _ in 0..10 {
//!     body.update(&right, &world, &mut spawns);
//! }
//!
//! // Stopped flush against the wall.
//! assert_eq!(body.bounding_box().x + body.bounding_box().width, 40.0);
//! ```

use std::num::NonZeroU32;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::config::{CollisionResolution, MotionConfig};
use crate::geometry::{sign, Axis, Rect};
use crate::input::{Direction, InputSource};
use crate::output::{ProjectileSink, SpawnRequest};
use crate::world::{Solid, SolidId, SolidSource};

/// A single actor's kinematic state.
///
/// Fields are private: state changes only through [`update`](Self::update),
/// [`place_at`](Self::place_at) and the construction-time builders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionBody {
    /// Top-left corner of the bounding box.
    position: Vec2,
    /// Units per step.
    velocity: Vec2,
    /// Recomputed from input every step.
    acceleration: Vec2,
    /// Derived from `position` and `config.size`.
    bounding_box: Rect,
    /// Movement constants and collision policy.
    config: MotionConfig,
    /// Id of this body's own hitbox if registered in the world.
    hitbox_id: Option<SolidId>,
    /// Informational only.
    is_active: bool,
}

impl MotionBody {
    /// Creates a body at rest with its top-left corner at `position`.
    ///
    /// The config is taken as-is; validate it first with
    /// [`MotionConfig::validate`] when it comes from outside.
    #[must_use]
    pub fn new(position: Vec2, config: MotionConfig) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            acceleration: Vec2::ZERO,
            bounding_box: Rect::from_origin_size(position, config.size),
            config,
            hitbox_id: None,
            is_active: false,
        }
    }

    /// Starts the body with an initial velocity.
    ///
    /// A velocity above the cap is brought back within it by the next
    /// [`update`](Self::update).
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vec2) -> Self {
        self.velocity = velocity;
        self
    }

    /// Records the id of this body's hitbox in the world so collision tests
    /// skip it.
    #[must_use]
    pub fn with_hitbox_id(mut self, id: SolidId) -> Self {
        self.hitbox_id = Some(id);
        self
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Top-left corner of the bounding box.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.position
    }

    /// Current velocity in units per step.
    #[must_use]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// Acceleration computed by the last step.
    #[must_use]
    pub fn acceleration(&self) -> Vec2 {
        self.acceleration
    }

    /// Bounding box, always in sync with the position after a step.
    #[must_use]
    pub fn bounding_box(&self) -> Rect {
        self.bounding_box
    }

    /// Fixed extent of the bounding box.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        self.config.size
    }

    /// Center of the bounding box.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.position + self.config.size * 0.5
    }

    /// Movement constants in use.
    #[must_use]
    pub fn config(&self) -> &MotionConfig {
        &self.config
    }

    /// Id of the registered hitbox, if any.
    #[must_use]
    pub fn hitbox_id(&self) -> Option<SolidId> {
        self.hitbox_id
    }

    /// Whether a host has marked this body active. Not read by the update.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.is_active
    }

    /// Marks the body active or inactive.
    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    /// Teleports the body, clearing its motion.
    pub fn place_at(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
        self.acceleration = Vec2::ZERO;
        self.sync_bounding_box();
    }

    // =========================================================================
    // Derived queries
    // =========================================================================

    /// Left edge of the tile containing the body's corner.
    ///
    /// Uses floor division, so negative coordinates round toward negative
    /// infinity: `-5` with 16-unit tiles is tile `-16`.
    #[must_use]
    pub fn tile_x(&self, tile_size: NonZeroU32) -> f32 {
        snap_to_tile(self.position.x, tile_size)
    }

    /// Top edge of the tile containing the body's corner.
    #[must_use]
    pub fn tile_y(&self, tile_size: NonZeroU32) -> f32 {
        snap_to_tile(self.position.y, tile_size)
    }

    /// Tile-aligned position on both axes.
    #[must_use]
    pub fn tile_position(&self, tile_size: NonZeroU32) -> Vec2 {
        Vec2::new(self.tile_x(tile_size), self.tile_y(tile_size))
    }

    /// Euclidean distance from the body's corner to `target`'s corner.
    #[must_use]
    pub fn distance_to(&self, target: &Rect) -> f32 {
        self.position.distance(target.origin())
    }

    /// Whether the body's box placed at `candidate` would overlap `solid`.
    ///
    /// Always `false` for the body's own registered hitbox.
    #[must_use]
    pub fn overlaps_at(&self, solid: &Solid, candidate: Vec2) -> bool {
        if self.hitbox_id == Some(solid.id) {
            return false;
        }
        Rect::from_origin_size(candidate, self.config.size).overlaps(&solid.rect)
    }

    /// Whether the body's box placed at `candidate` would overlap any solid.
    #[must_use]
    pub fn collision_exists_at(&self, solids: &[Solid], candidate: Vec2) -> bool {
        solids.iter().any(|solid| self.overlaps_at(solid, candidate))
    }

    // =========================================================================
    // Step
    // =========================================================================

    /// Advances the body by one step.
    ///
    /// Reads `input` once per control, tests against `solids` in order and
    /// pushes at most one spawn request into `sink`. Never fails.
    pub fn update<I, S, P>(&mut self, input: &I, solids: &S, sink: &mut P)
    where
        I: InputSource + ?Sized,
        S: SolidSource + ?Sized,
        P: ProjectileSink + ?Sized,
    {
        let solids = solids.solids();

        self.accumulate_acceleration(input);
        self.apply_friction(input);
        self.limit_speed();
        for axis in Axis::ALL {
            self.move_axis(axis, solids);
        }
        self.sync_bounding_box();

        if input.is_fire_pressed() {
            let request = SpawnRequest::new(self.center(), input.aim_target());
            debug!(origin = %request.origin, target = %request.target, "spawn requested");
            sink.spawn(request);
        }

        trace!(
            position = %self.position,
            velocity = %self.velocity,
            acceleration = %self.acceleration,
            "body stepped"
        );
    }

    fn accumulate_acceleration<I: InputSource + ?Sized>(&mut self, input: &I) {
        let max = self.config.max_speed;
        let accel = self.config.move_accel;
        let v = self.velocity;

        self.acceleration = Vec2::ZERO;
        if input.is_held(Direction::Left) && v.x > -max.x {
            self.acceleration.x = -accel.x;
        }
        if input.is_held(Direction::Right) && v.x < max.x {
            self.acceleration.x = accel.x;
        }
        if input.is_held(Direction::Up) && v.y > -max.y {
            self.acceleration.y = -accel.y;
        }
        if input.is_held(Direction::Down) && v.y < max.y {
            self.acceleration.y = accel.y;
        }
    }

    fn apply_friction<I: InputSource + ?Sized>(&mut self, input: &I) {
        let held_x = input.is_held(Direction::Left) || input.is_held(Direction::Right);
        let held_y = input.is_held(Direction::Up) || input.is_held(Direction::Down);

        for (axis, held) in [(Axis::X, held_x), (Axis::Y, held_y)] {
            let max = axis.of(self.config.max_speed);
            let friction = axis.of(self.config.friction);
            let v = axis.of_mut(&mut self.velocity);
            if v.abs() > max || !held {
                *v = approach_zero(*v, friction);
            }
        }
    }

    fn limit_speed(&mut self) {
        let max = self.config.max_speed;
        self.velocity.x = clamp_speed(self.velocity.x, max.x);
        self.velocity.y = clamp_speed(self.velocity.y, max.y);
    }

    /// Moves along one axis, resolving collisions, then integrates that
    /// axis' acceleration into its velocity.
    fn move_axis(&mut self, axis: Axis, solids: &[Solid]) {
        let velocity = axis.of(self.velocity);

        let blocked = match self.config.resolution {
            CollisionResolution::NearestStop => self.resolve_nearest(axis, velocity, solids),
            CollisionResolution::LastSolidWins => self.resolve_in_order(axis, velocity, solids),
        };

        let remaining = if blocked {
            0.0
        } else {
            *axis.of_mut(&mut self.position) += velocity;
            velocity
        };

        let max = axis.of(self.config.max_speed);
        *axis.of_mut(&mut self.velocity) =
            clamp_speed(remaining + axis.of(self.acceleration), max);
    }

    /// Blocked if the candidate overlaps any solid; steps while the next unit
    /// is clear of all of them.
    fn resolve_nearest(&mut self, axis: Axis, velocity: f32, solids: &[Solid]) -> bool {
        let candidate = self.position + axis.offset(velocity);
        if !self.collision_exists_at(solids, candidate) {
            return false;
        }
        let steps = self.pixel_step(axis, velocity, solids);
        debug!(%axis, steps, position = %self.position, "movement blocked");
        true
    }

    /// Each solid in order gets its own test and stepping pass against only
    /// itself. Once blocked, velocity is zero, so later solids can only
    /// re-trigger without moving the body.
    fn resolve_in_order(&mut self, axis: Axis, velocity: f32, solids: &[Solid]) -> bool {
        let mut velocity = velocity;
        let mut blocked = false;
        for solid in solids {
            let candidate = self.position + axis.offset(velocity);
            if self.overlaps_at(solid, candidate) {
                let steps = self.pixel_step(axis, velocity, std::slice::from_ref(solid));
                debug!(%axis, steps, solid = %solid.id, position = %self.position, "movement blocked");
                velocity = 0.0;
                blocked = true;
            }
        }
        blocked
    }

    /// Advances one unit at a time toward `sign(velocity)` until the next unit
    /// would overlap one of `obstacles`. Returns the number of units taken.
    ///
    /// Bounded by `ceil(|velocity|)`: a body that started clear always stops
    /// short of that, so reaching it means the body was already embedded.
    /// An embedded body can therefore move up to `ceil(|velocity|)` units in
    /// one step, which exceeds `|velocity|` when the speed is fractional.
    fn pixel_step(&mut self, axis: Axis, velocity: f32, obstacles: &[Solid]) -> u32 {
        let unit = axis.offset(sign(velocity));
        let limit = step_limit(velocity);

        let mut taken = 0;
        while taken < limit && !self.collision_exists_at(obstacles, self.position + unit) {
            self.position += unit;
            taken += 1;
        }

        if limit > 0 && taken == limit {
            warn!(%axis, taken, position = %self.position, "pixel stepping hit its bound; body was embedded");
        }
        taken
    }

    fn sync_bounding_box(&mut self) {
        self.bounding_box = Rect::from_origin_size(self.position, self.config.size);
    }
}

/// Relative slack under which a speed counts as no more than one friction
/// step. Repeated f32 subtraction of a non-dyadic friction (0.4) otherwise
/// leaves a residue of a few ulps on the last step.
const FRICTION_SNAP: f32 = 1e-4;

/// Moves `v` toward zero by `friction`, stopping at exactly zero.
fn approach_zero(v: f32, friction: f32) -> f32 {
    if v.abs() <= friction * (1.0 + FRICTION_SNAP) {
        0.0
    } else {
        v - friction * sign(v)
    }
}

fn clamp_speed(v: f32, max: f32) -> f32 {
    if v.abs() > max {
        max * sign(v)
    } else {
        v
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn step_limit(velocity: f32) -> u32 {
    velocity.abs().ceil() as u32
}

#[allow(clippy::cast_precision_loss)]
fn snap_to_tile(coordinate: f32, tile_size: NonZeroU32) -> f32 {
    let tile = tile_size.get() as f32;
    (coordinate / tile).floor() * tile
}
