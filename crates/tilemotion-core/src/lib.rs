//! # Tilemotion Core
//!
//! Axis-separated movement and collision for a controllable actor in a
//! tile-based 2D world.
//!
//! This crate provides the per-step motion model for a single actor:
//! acceleration from held controls, fixed friction, a per-axis speed cap, and
//! collision against static solids resolved one axis at a time by stepping a
//! unit at a time up to the obstruction.
//!
//! ## Architecture
//!
//! - **Body**: [`MotionBody`] owns position, velocity and acceleration and
//!   performs the step
//! - **Collaborators**: [`InputSource`], [`SolidSource`] and
//!   [`ProjectileSink`] are the seams to the host application
//! - **Driver**: [`Simulation`] owns a [`World`] and the player and advances
//!   ticks
//!
//! ## Usage
//!
//! ```
//! use glam::Vec2;
//! use tilemotion_core::{Controls, InputState, MotionConfig, Rect, Simulation, World};
//!
//! let world = World::from_rects([Rect::new(96.0, 0.0, 16.0, 64.0)])?;
//! let mut sim = Simulation::new(world, MotionConfig::default())?;
//! sim.spawn_player(Vec2::ZERO)?;
//!
//! for _ in 0..60 {
//!     sim.step(&InputState::holding(Controls::RIGHT))?;
//! }
//! assert_eq!(sim.player().unwrap().position().x, 64.0);
//! # Ok::<(), tilemotion_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod body;
pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod output;
pub mod simulation;
pub mod world;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use body::MotionBody;
pub use config::{CollisionResolution, MotionConfig};
pub use error::{Error, Result};
pub use geometry::{Axis, Rect};
pub use input::{Controls, Direction, InputSource, InputState, ScriptedInput};
pub use output::{DiscardSink, ProjectileSink, SpawnRequest, StepOutput};
pub use simulation::Simulation;
pub use world::{Solid, SolidId, SolidSource, World};
