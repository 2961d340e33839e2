use criterion::{black_box, criterion_group, criterion_main, Criterion};
use glam::Vec2;
use tilemotion_core::{Controls, InputState, MotionBody, MotionConfig, Rect, Simulation, World};

/// Tile grid with every other cell solid, leaving the body's start clear.
fn checkerboard(cols: u16, rows: u16) -> World {
    let mut world = World::new();
    for row in 0..rows {
        for col in 0..cols {
            if (row + col) % 2 == 0 && !(row < 4 && col < 4) {
                let rect = Rect::new(f32::from(col) * 16.0, f32::from(row) * 16.0, 16.0, 16.0);
                world.add_solid(rect).unwrap();
            }
        }
    }
    world
}

fn bench_body_update_open(c: &mut Criterion) {
    let world = World::new();
    let input = InputState::holding(Controls::RIGHT | Controls::DOWN);

    c.bench_function("body_update_open", |b| {
        let mut body = MotionBody::new(Vec2::ZERO, MotionConfig::default());
        b.iter(|| {
            body.update(black_box(&input), &world, &mut tilemotion_core::DiscardSink);
        })
    });
}

fn bench_body_update_grid(c: &mut Criterion) {
    // 64x64 grid: ~2k solids scanned per axis
    let world = checkerboard(64, 64);
    let input = InputState::holding(Controls::RIGHT | Controls::DOWN);

    c.bench_function("body_update_grid", |b| {
        let mut body = MotionBody::new(Vec2::new(8.0, 8.0), MotionConfig::default());
        b.iter(|| {
            body.update(black_box(&input), &world, &mut tilemotion_core::DiscardSink);
        })
    });
}

fn bench_simulation_step(c: &mut Criterion) {
    let mut sim = Simulation::new(checkerboard(32, 32), MotionConfig::default()).unwrap();
    sim.spawn_player(Vec2::new(8.0, 8.0)).unwrap();
    let input = InputState::new(Controls::RIGHT | Controls::FIRE, Vec2::new(256.0, 256.0));

    c.bench_function("simulation_step", |b| {
        b.iter(|| black_box(sim.step(&input).unwrap()))
    });
}

criterion_group!(benches, bench_body_update_open, bench_body_update_grid, bench_simulation_step);
criterion_main!(benches);
