//! Test helper functions for setting up levels, simulations and input.
//!
//! This module provides factory functions and setup utilities that make
//! writing tests more ergonomic and consistent.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::MotionConfig;
use crate::geometry::Rect;
use crate::input::{Controls, InputState, ScriptedInput};
use crate::simulation::Simulation;
use crate::world::World;

/// Tile edge used by test levels.
pub const TILE: f32 = 16.0;

// =============================================================================
// Level Builders
// =============================================================================

/// Builds a rectangular room whose border is a ring of tiles.
///
/// The interior spans `(TILE, TILE)` to `((cols - 1) * TILE, (rows - 1) * TILE)`.
/// Tiles are added row by row, top to bottom.
pub fn walled_room(cols: u16, rows: u16) -> World {
    let mut world = World::new();
    for row in 0..rows {
        for col in 0..cols {
            let border = row == 0 || col == 0 || row == rows - 1 || col == cols - 1;
            if border {
                let rect = Rect::new(f32::from(col) * TILE, f32::from(row) * TILE, TILE, TILE);
                world.add_solid(rect).unwrap();
            }
        }
    }
    world
}

/// Builds a horizontal corridor exactly `gap` units tall between two walls.
///
/// The corridor opening starts at `y = 0`.
pub fn corridor(length: f32, gap: f32) -> World {
    World::from_rects([
        Rect::new(0.0, -TILE, length, TILE),
        Rect::new(0.0, gap, length, TILE),
    ])
    .unwrap()
}

/// Creates a simulation over `world` with a player spawned at `position`.
pub fn sim_with_player(world: World, position: Vec2) -> Simulation {
    let mut sim = Simulation::new(world, MotionConfig::default()).unwrap();
    sim.spawn_player(position).unwrap();
    sim
}

// =============================================================================
// Input Scripts
// =============================================================================

/// Holds `controls` for `ticks` steps.
pub fn held(controls: Controls, ticks: usize) -> ScriptedInput {
    ScriptedInput::new().hold(InputState::holding(controls), ticks)
}

/// Generates `len` frames of random controls and aim points from `seed`.
pub fn random_script(seed: u64, len: usize) -> ScriptedInput {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|_| {
            let controls = Controls::from_bits_truncate(rng.gen::<u8>());
            let aim = Vec2::new(rng.gen_range(-512.0..512.0), rng.gen_range(-512.0..512.0));
            InputState::new(controls, aim)
        })
        .collect()
}

// =============================================================================
// Assertions
// =============================================================================

/// Asserts the player is not overlapping any level solid.
pub fn assert_player_clear(sim: &Simulation) {
    let player = sim.player().unwrap();
    let own = player.hitbox_id();
    for solid in sim.world().iter().filter(|s| Some(s.id) != own) {
        assert!(
            !player.bounding_box().overlaps(&solid.rect),
            "player {:?} overlaps solid {} at {:?}",
            player.bounding_box(),
            solid.id,
            solid.rect
        );
    }
}
