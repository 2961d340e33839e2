//! World module: ordered storage for static solids.
//!
//! The [`World`] owns every solid rectangle a body can collide with. It
//! provides:
//! - Solid storage with deterministic iteration order (insertion order)
//! - Solid lifecycle management (add/remove/move)
//! - The [`SolidSource`] seam the motion body reads from
//!
//! # Ordering
//!
//! `SolidId`s are handed out monotonically and solids are stored in a `Vec`
//! sorted by id, so iteration order equals insertion order and lookups are a
//! binary search. Removal preserves the relative order of the remaining
//! solids.
//!
//! # Example
//!
//! ```
//! use tilemotion_core::geometry::Rect;
//! use tilemotion_core::world::{SolidSource, World};
//!
//! let mut world = World::new();
//! let floor = world.add_solid(Rect::new(0.0, 96.0, 320.0, 16.0)).unwrap();
//! let wall = world.add_solid(Rect::new(320.0, 0.0, 16.0, 112.0)).unwrap();
//!
//! let ids: Vec<_> = world.solids().iter().map(|s| s.id).collect();
//! assert_eq!(ids, vec![floor, wall]);
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Rect;

/// Unique identifier for a solid within a world.
///
/// Ids are never reused, so a body can remember the id of its own registered
/// hitbox and use it for the self-exclusion check.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SolidId(u64);

impl SolidId {
    /// Creates a `SolidId` from a raw value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for SolidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SolidId({})", self.0)
    }
}

impl fmt::Display for SolidId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A static obstacle: an id plus its rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Solid {
    /// Identity used for self-exclusion
    pub id: SolidId,
    /// Occupied box
    pub rect: Rect,
}

impl Solid {
    /// Creates a solid.
    #[must_use]
    pub const fn new(id: SolidId, rect: Rect) -> Self {
        Self { id, rect }
    }
}

/// Read-only, ordered view of the solids a body collides with.
///
/// The returned slice is treated as a snapshot for the duration of one step.
pub trait SolidSource {
    /// Solids in world order.
    fn solids(&self) -> &[Solid];
}

impl SolidSource for [Solid] {
    fn solids(&self) -> &[Solid] {
        self
    }
}

impl SolidSource for Vec<Solid> {
    fn solids(&self) -> &[Solid] {
        self
    }
}

/// Container for all solids in a level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct World {
    /// Solids sorted by id.
    solids: Vec<Solid>,
    /// Next id to hand out.
    next_id: u64,
}

impl World {
    /// Creates an empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a world from a list of rectangles, in order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateSolid`] for the first malformed rectangle.
    pub fn from_rects<I>(rects: I) -> Result<Self>
    where
        I: IntoIterator<Item = Rect>,
    {
        let mut world = Self::new();
        for rect in rects {
            world.add_solid(rect)?;
        }
        Ok(world)
    }

    /// Inserts a solid at the end of the iteration order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DegenerateSolid`] if the rectangle has a non-positive
    /// or non-finite extent or a non-finite corner.
    pub fn add_solid(&mut self, rect: Rect) -> Result<SolidId> {
        if !rect.is_well_formed() {
            return Err(Error::DegenerateSolid { rect });
        }
        let id = SolidId::new(self.next_id);
        self.next_id += 1;
        self.solids.push(Solid::new(id, rect));
        Ok(id)
    }

    /// Removes a solid, returning its rectangle.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSolid`] if `id` is not in the world.
    pub fn remove_solid(&mut self, id: SolidId) -> Result<Rect> {
        let index = self.index_of(id)?;
        Ok(self.solids.remove(index).rect)
    }

    /// Replaces the rectangle of an existing solid, keeping its position in
    /// the iteration order.
    ///
    /// Used to keep a body's registered hitbox in sync after it moves.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownSolid`] if `id` is not in the world, or
    /// [`Error::DegenerateSolid`] if `rect` is malformed.
    pub fn move_solid(&mut self, id: SolidId, rect: Rect) -> Result<()> {
        if !rect.is_well_formed() {
            return Err(Error::DegenerateSolid { rect });
        }
        let index = self.index_of(id)?;
        self.solids[index].rect = rect;
        Ok(())
    }

    /// Looks up a solid's rectangle.
    #[must_use]
    pub fn get(&self, id: SolidId) -> Option<&Rect> {
        self.index_of(id).ok().map(|index| &self.solids[index].rect)
    }

    /// Returns `true` if the world contains `id`.
    #[must_use]
    pub fn contains(&self, id: SolidId) -> bool {
        self.index_of(id).is_ok()
    }

    /// Number of solids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.solids.len()
    }

    /// Returns `true` if the world holds no solids.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }

    /// Iterates solids in world order.
    pub fn iter(&self) -> impl Iterator<Item = &Solid> {
        self.solids.iter()
    }

    fn index_of(&self, id: SolidId) -> Result<usize> {
        self.solids
            .binary_search_by_key(&id, |solid| solid.id)
            .map_err(|_| Error::UnknownSolid(id))
    }
}

impl SolidSource for World {
    fn solids(&self) -> &[Solid] {
        &self.solids
    }
}
