//! Input seam between the host application and the motion body.
//!
//! The body never polls a device. Each step it is handed an [`InputSource`]
//! that reports which controls are held and where the pointer aims. Two
//! implementations ship with the crate:
//!
//! - [`InputState`]: a single-frame snapshot (what a game loop builds from its
//!   device layer each tick)
//! - [`ScriptedInput`]: an ordered list of snapshots for replays and tests

use glam::Vec2;
use serde::{Deserialize, Serialize};

bitflags::bitflags! {
    /// Held controls for one step.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct Controls: u8 {
        /// Move toward negative X
        const LEFT = 1 << 0;
        /// Move toward positive X
        const RIGHT = 1 << 1;
        /// Move toward negative Y
        const UP = 1 << 2;
        /// Move toward positive Y
        const DOWN = 1 << 3;
        /// Request a projectile
        const FIRE = 1 << 4;
    }
}

impl Default for Controls {
    fn default() -> Self {
        Self::empty()
    }
}

/// A directional control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Negative X
    Left,
    /// Positive X
    Right,
    /// Negative Y
    Up,
    /// Positive Y
    Down,
}

impl Direction {
    /// All directions in evaluation order.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// The control flag for this direction.
    #[must_use]
    pub const fn control(self) -> Controls {
        match self {
            Direction::Left => Controls::LEFT,
            Direction::Right => Controls::RIGHT,
            Direction::Up => Controls::UP,
            Direction::Down => Controls::DOWN,
        }
    }
}

/// Polled input for one simulation step.
pub trait InputSource {
    /// Returns `true` while the given direction is held.
    fn is_held(&self, direction: Direction) -> bool;

    /// Returns `true` while the fire control is held.
    fn is_fire_pressed(&self) -> bool;

    /// World-space point projectiles are aimed at.
    ///
    /// Callers translate screen coordinates by their camera offset before
    /// exposing them here.
    fn aim_target(&self) -> Vec2;
}

/// Snapshot of the controls and aim point for one step.
///
/// # Example
///
/// ```
/// use glam::Vec2;
/// use tilemotion_core::input::{Controls, Direction, InputSource, InputState};
///
/// let input = InputState::new(Controls::RIGHT | Controls::FIRE, Vec2::new(64.0, 0.0));
/// assert!(input.is_held(Direction::Right));
/// assert!(!input.is_held(Direction::Left));
/// assert!(input.is_fire_pressed());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct InputState {
    /// Held controls
    pub controls: Controls,
    /// Aim point in world coordinates
    pub aim: Vec2,
}

impl InputState {
    /// Creates a snapshot.
    #[must_use]
    pub const fn new(controls: Controls, aim: Vec2) -> Self {
        Self { controls, aim }
    }

    /// No controls held, aiming at the origin.
    #[must_use]
    pub const fn idle() -> Self {
        Self::new(Controls::empty(), Vec2::ZERO)
    }

    /// Only the given controls held, aiming at the origin.
    #[must_use]
    pub const fn holding(controls: Controls) -> Self {
        Self::new(controls, Vec2::ZERO)
    }
}

impl InputSource for InputState {
    fn is_held(&self, direction: Direction) -> bool {
        self.controls.contains(direction.control())
    }

    fn is_fire_pressed(&self) -> bool {
        self.controls.contains(Controls::FIRE)
    }

    fn aim_target(&self) -> Vec2 {
        self.aim
    }
}

impl<T: InputSource + ?Sized> InputSource for &T {
    fn is_held(&self, direction: Direction) -> bool {
        (**self).is_held(direction)
    }

    fn is_fire_pressed(&self) -> bool {
        (**self).is_fire_pressed()
    }

    fn aim_target(&self) -> Vec2 {
        (**self).aim_target()
    }
}

/// A recorded sequence of input frames, one per tick.
///
/// Ticks past the end of the script read as idle input.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScriptedInput {
    frames: Vec<InputState>,
}

impl ScriptedInput {
    /// Creates an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `ticks` copies of `frame`.
    #[must_use]
    pub fn hold(mut self, frame: InputState, ticks: usize) -> Self {
        self.frames.extend(std::iter::repeat(frame).take(ticks));
        self
    }

    /// Appends a single frame.
    pub fn push(&mut self, frame: InputState) {
        self.frames.push(frame);
    }

    /// The frame for a given tick.
    #[must_use]
    pub fn frame(&self, tick: usize) -> InputState {
        self.frames.get(tick).copied().unwrap_or_else(InputState::idle)
    }

    /// Number of recorded frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns `true` if no frames are recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Recorded frames in order.
    #[must_use]
    pub fn frames(&self) -> &[InputState] {
        &self.frames
    }

    /// Iterates recorded frames in order.
    pub fn iter(&self) -> impl Iterator<Item = &InputState> {
        self.frames.iter()
    }
}

impl FromIterator<InputState> for ScriptedInput {
    fn from_iter<I: IntoIterator<Item = InputState>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}
