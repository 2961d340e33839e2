//! Headless driver for the tilemotion simulation.
//!
//! Runs a scripted walk around a walled room and prints a JSON summary.
//!
//! ```text
//! tilemotion-headless [CONFIG.json] [TICKS]
//! ```
//!
//! Log verbosity follows `RUST_LOG` (for example `RUST_LOG=tilemotion_core=debug`).

use std::path::Path;

use anyhow::{Context, Result};
use glam::Vec2;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tilemotion_core::{Controls, InputState, MotionConfig, Rect, ScriptedInput, Simulation, World};

const TILE: f32 = 16.0;
const ROOM_COLS: u16 = 20;
const ROOM_ROWS: u16 = 15;
const DEFAULT_TICKS: usize = 240;

#[derive(Debug, Serialize)]
struct Summary {
    ticks: u64,
    position: Vec2,
    velocity: Vec2,
    tile: Vec2,
    spawns: usize,
    solids: usize,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let config = match args.next() {
        Some(path) => load_config(Path::new(&path))?,
        None => MotionConfig::default(),
    };
    let ticks = match args.next() {
        Some(raw) => raw
            .parse::<usize>()
            .with_context(|| format!("invalid tick count `{raw}`"))?,
        None => DEFAULT_TICKS,
    };

    let mut sim = Simulation::new(walled_room()?, config).context("building simulation")?;
    sim.spawn_player(Vec2::new(4.0 * TILE, 4.0 * TILE))
        .context("spawning player")?;
    info!(ticks, solids = sim.world().len(), "running");

    let outputs = sim.run(&walk_script(ticks)).context("running script")?;
    let spawns = outputs.iter().map(|o| o.spawns.len()).sum();

    let player = sim.player().context("player vanished")?;
    let tile_size = std::num::NonZeroU32::new(16).context("tile size")?;
    let summary = Summary {
        ticks: sim.tick(),
        position: player.position(),
        velocity: player.velocity(),
        tile: player.tile_position(tile_size),
        spawns,
        solids: sim.world().len(),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn load_config(path: &Path) -> Result<MotionConfig> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    MotionConfig::from_json(&json).with_context(|| format!("loading config {}", path.display()))
}

/// Ring of tiles around a `ROOM_COLS` x `ROOM_ROWS` room.
fn walled_room() -> Result<World> {
    let mut world = World::new();
    for row in 0..ROOM_ROWS {
        for col in 0..ROOM_COLS {
            if row == 0 || col == 0 || row == ROOM_ROWS - 1 || col == ROOM_COLS - 1 {
                world.add_solid(Rect::new(
                    f32::from(col) * TILE,
                    f32::from(row) * TILE,
                    TILE,
                    TILE,
                ))?;
            }
        }
    }
    Ok(world)
}

/// Right, down, left, then up while firing at the room's center.
fn walk_script(ticks: usize) -> ScriptedInput {
    let leg = ticks / 4;
    let center = Vec2::new(f32::from(ROOM_COLS), f32::from(ROOM_ROWS)) * TILE * 0.5;
    ScriptedInput::new()
        .hold(InputState::holding(Controls::RIGHT), leg)
        .hold(InputState::holding(Controls::DOWN), leg)
        .hold(InputState::holding(Controls::LEFT), leg)
        .hold(
            InputState::new(Controls::UP | Controls::FIRE, center),
            ticks - 3 * leg,
        )
}
