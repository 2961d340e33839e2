//! Axis-aligned geometry shared by the world and the motion body.
//!
//! - [`Rect`]: immutable box `{x, y, width, height}` with half-open overlap
//! - [`Axis`]: selects one component of a [`Vec2`] for axis-separated movement
//! - [`sign`]: three-valued sign (zero stays zero)

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in world units (pixels).
///
/// `(x, y)` is the top-left corner. Rectangles are treated as half-open, so
/// two boxes that merely share an edge do not overlap.
///
/// # Example
///
/// ```
/// use tilemotion_core::geometry::Rect;
///
/// let a = Rect::new(0.0, 0.0, 32.0, 32.0);
/// let touching = Rect::new(32.0, 0.0, 16.0, 16.0);
/// let inside = Rect::new(31.0, 10.0, 16.0, 16.0);
///
/// assert!(!a.overlaps(&touching));
/// assert!(a.overlaps(&inside));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: f32,
    /// Top edge
    pub y: f32,
    /// Extent along X
    pub width: f32,
    /// Extent along Y
    pub height: f32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and extent.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from a corner and a size vector.
    #[must_use]
    pub fn from_origin_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    /// Top-left corner.
    #[must_use]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Width and height as a vector.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        self.origin() + self.size() * 0.5
    }

    /// Same extent, moved so its top-left corner sits at `origin`.
    #[must_use]
    pub fn at(&self, origin: Vec2) -> Self {
        Self::new(origin.x, origin.y, self.width, self.height)
    }

    /// Half-open overlap test.
    ///
    /// Overlap iff `x1 < x2+w2 && x1+w1 > x2 && y1 < y2+h2 && y1+h1 > y2`.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.x + other.width
            && self.x + self.width > other.x
            && self.y < other.y + other.height
            && self.y + self.height > other.y
    }

    /// Returns `true` if the extent is finite and strictly positive and the
    /// corner is finite.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// One of the two world axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Horizontal axis
    X,
    /// Vertical axis (positive is down)
    Y,
}

impl Axis {
    /// Both axes in resolution order.
    pub const ALL: [Axis; 2] = [Axis::X, Axis::Y];

    /// Reads this axis' component of `v`.
    #[must_use]
    pub fn of(self, v: Vec2) -> f32 {
        match self {
            Axis::X => v.x,
            Axis::Y => v.y,
        }
    }

    /// Mutable access to this axis' component of `v`.
    pub fn of_mut(self, v: &mut Vec2) -> &mut f32 {
        match self {
            Axis::X => &mut v.x,
            Axis::Y => &mut v.y,
        }
    }

    /// A vector of length `amount` along this axis.
    #[must_use]
    pub fn offset(self, amount: f32) -> Vec2 {
        match self {
            Axis::X => Vec2::new(amount, 0.0),
            Axis::Y => Vec2::new(0.0, amount),
        }
    }
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

/// Sign of `v` as `-1.0`, `0.0` or `1.0`.
///
/// Unlike [`f32::signum`], zero (of either sign) maps to `0.0`, so a body at
/// rest never pixel-steps.
#[must_use]
pub fn sign(v: f32) -> f32 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
