//! Outputs a step can produce.
//!
//! The motion body does not create projectiles itself. When fire is held it
//! hands a [`SpawnRequest`] to a [`ProjectileSink`] and forgets about it; the
//! host decides what a projectile is.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Request to spawn a projectile travelling from `origin` toward `target`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRequest {
    /// Spawn point (the body's center)
    pub origin: Vec2,
    /// Aim point in world coordinates
    pub target: Vec2,
}

impl SpawnRequest {
    /// Creates a spawn request.
    #[must_use]
    pub const fn new(origin: Vec2, target: Vec2) -> Self {
        Self { origin, target }
    }

    /// Unit vector from origin to target, or zero if they coincide.
    #[must_use]
    pub fn direction(&self) -> Vec2 {
        (self.target - self.origin).normalize_or_zero()
    }
}

/// Fire-and-forget receiver of spawn requests.
pub trait ProjectileSink {
    /// Accepts one spawn request.
    fn spawn(&mut self, request: SpawnRequest);
}

impl ProjectileSink for Vec<SpawnRequest> {
    fn spawn(&mut self, request: SpawnRequest) {
        self.push(request);
    }
}

/// Sink that drops every request. Useful for hosts without projectiles.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiscardSink;

impl ProjectileSink for DiscardSink {
    fn spawn(&mut self, _request: SpawnRequest) {}
}

/// Everything one simulation step produced.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StepOutput {
    /// Tick the step ran on
    pub tick: u64,
    /// Spawn requests in emission order
    pub spawns: Vec<SpawnRequest>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sink_collects_in_order() {
        let mut sink: Vec<SpawnRequest> = Vec::new();
        sink.spawn(SpawnRequest::new(Vec2::ZERO, Vec2::X));
        sink.spawn(SpawnRequest::new(Vec2::ZERO, Vec2::Y));
        assert_eq!(sink.len(), 2);
        assert_eq!(sink[1].target, Vec2::Y);
    }

    #[test]
    fn discard_sink_accepts_requests() {
        let mut sink = DiscardSink;
        sink.spawn(SpawnRequest::new(Vec2::ZERO, Vec2::X));
    }

    #[test]
    fn direction_is_normalized() {
        let request = SpawnRequest::new(Vec2::new(16.0, 16.0), Vec2::new(19.0, 20.0));
        let dir = request.direction();
        assert!((dir.x - 0.6).abs() < 1e-6);
        assert!((dir.y - 0.8).abs() < 1e-6);

        let degenerate = SpawnRequest::new(Vec2::ONE, Vec2::ONE);
        assert_eq!(degenerate.direction(), Vec2::ZERO);
    }
}
