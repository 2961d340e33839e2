//! Tuning for the motion body.
//!
//! [`MotionConfig`] carries the per-axis movement constants and the collision
//! resolution policy. The defaults are the classic tile-walker tuning:
//! friction `0.4`, acceleration `2.0`, top speed `2.0` and a 32×32 box.
//!
//! Configs can be loaded from JSON; missing fields fall back to defaults and
//! the result is validated before it is returned.
//!
//! ```
//! use tilemotion_core::config::{CollisionResolution, MotionConfig};
//!
//! let config = MotionConfig::from_json(r#"{ "resolution": "LastSolidWins" }"#).unwrap();
//! assert_eq!(config.resolution, CollisionResolution::LastSolidWins);
//! assert_eq!(config.max_speed.x, 2.0);
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default per-step friction on each axis.
pub const DEFAULT_FRICTION: f32 = 0.4;

/// Default acceleration applied while a direction is held.
pub const DEFAULT_MOVE_ACCEL: f32 = 2.0;

/// Default per-axis speed cap.
pub const DEFAULT_MAX_SPEED: f32 = 2.0;

/// Default bounding box edge length.
pub const DEFAULT_BODY_SIZE: f32 = 32.0;

/// How a blocked axis move picks its stopping point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CollisionResolution {
    /// Step while the next unit is clear of every solid. The body stops at
    /// the nearest obstruction regardless of world order.
    #[default]
    NearestStop,
    /// Resolve each solid independently in world order. A farther solid
    /// listed first can let the body step into a nearer one listed later.
    LastSolidWins,
}

/// Per-axis movement constants and collision policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Velocity removed per step when friction applies
    pub friction: Vec2,
    /// Acceleration while a direction is held
    pub move_accel: Vec2,
    /// Speed cap on each axis
    pub max_speed: Vec2,
    /// Bounding box extent
    pub size: Vec2,
    /// Blocked-move policy
    pub resolution: CollisionResolution,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            friction: Vec2::splat(DEFAULT_FRICTION),
            move_accel: Vec2::splat(DEFAULT_MOVE_ACCEL),
            max_speed: Vec2::splat(DEFAULT_MAX_SPEED),
            size: Vec2::splat(DEFAULT_BODY_SIZE),
            resolution: CollisionResolution::default(),
        }
    }
}

impl MotionConfig {
    /// Default tuning with a different box size.
    #[must_use]
    pub fn with_size(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            ..Default::default()
        }
    }

    /// Default tuning with a different collision policy.
    #[must_use]
    pub fn with_resolution(resolution: CollisionResolution) -> Self {
        Self {
            resolution,
            ..Default::default()
        }
    }

    /// Parses a config from JSON and validates it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Json`] for malformed input or
    /// [`Error::InvalidConfig`] if a value is out of range.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every value is finite, rates are non-negative and the box has
    /// positive extent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        non_negative("friction", self.friction)?;
        non_negative("move_accel", self.move_accel)?;
        non_negative("max_speed", self.max_speed)?;
        non_negative("size", self.size)?;
        if self.size.x <= 0.0 || self.size.y <= 0.0 {
            return Err(Error::InvalidConfig {
                field: "size",
                reason: format!("extent must be positive, got {}", self.size),
            });
        }
        Ok(())
    }
}

fn non_negative(field: &'static str, value: Vec2) -> Result<()> {
    if !value.is_finite() {
        return Err(Error::InvalidConfig {
            field,
            reason: format!("must be finite, got {value}"),
        });
    }
    if value.x < 0.0 || value.y < 0.0 {
        return Err(Error::InvalidConfig {
            field,
            reason: format!("must be non-negative, got {value}"),
        });
    }
    Ok(())
}
