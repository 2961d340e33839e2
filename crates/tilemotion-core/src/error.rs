//! Error types for the fallible edges of the crate.
//!
//! The per-step update never fails. Errors only arise when building inputs
//! to the simulation: parsing or validating a [`MotionConfig`](crate::config::MotionConfig),
//! inserting geometry into a [`World`](crate::world::World), or misusing the
//! actor lifecycle on a [`Simulation`](crate::simulation::Simulation).

use thiserror::Error;

use crate::geometry::Rect;
use crate::world::SolidId;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by configuration, world building and simulation lifecycle.
#[derive(Debug, Error)]
pub enum Error {
    /// A configuration value is out of range.
    #[error("invalid config field `{field}`: {reason}")]
    InvalidConfig {
        /// Name of the offending field
        field: &'static str,
        /// Human-readable explanation
        reason: String,
    },

    /// A solid with zero, negative or non-finite extent was rejected.
    #[error("degenerate solid rejected: {rect:?}")]
    DegenerateSolid {
        /// The rejected rectangle
        rect: Rect,
    },

    /// The referenced solid is not present in the world.
    #[error("unknown solid {0}")]
    UnknownSolid(SolidId),

    /// The simulation has no actor to step or despawn.
    #[error("no actor has been spawned")]
    NoActor,

    /// The simulation already owns an actor.
    #[error("an actor is already spawned")]
    ActorAlreadySpawned,

    /// Config JSON could not be parsed.
    #[error("config parse error: {0}")]
    Json(#[from] serde_json::Error),
}
