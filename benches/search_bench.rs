use criterion::{criterion_group, criterion_main, Criterion};
use glam::{Vec2, Vec3};
use std::hint::black_box;
use terrain_pathfinding::{GridConfig, Pathfinder, TerrainGrid, TerrainSample};

/// Rolling hills with a sparse obstacle field, 64x64 cells.
fn rolling_hills(x: f32, z: f32, _clearance: f32) -> Option<TerrainSample> {
    let height = ((x * 0.35).sin() + (z * 0.25).cos()) * 0.8;
    let obstructed = ((x.floor() as i32) * 7 + (z.floor() as i32) * 13) % 11 == 0;
    Some(TerrainSample {
        height,
        normal: Vec3::Y,
        obstructed,
    })
}

fn terrain_bench_single(c: &mut Criterion) {
    let config = GridConfig {
        world_size: Vec2::new(64.0, 64.0),
        max_step_height: 1.0,
        ..GridConfig::default()
    };
    let grid = TerrainGrid::build(config, &rolling_hills).unwrap();
    let finder = Pathfinder::new();
    let corners = [
        (Vec3::new(0.5, 0.0, 0.5), Vec3::new(63.5, 0.0, 63.5)),
        (Vec3::new(63.5, 0.0, 0.5), Vec3::new(0.5, 0.0, 63.5)),
        (Vec3::new(0.5, 0.0, 32.5), Vec3::new(63.5, 0.0, 32.5)),
    ];

    c.bench_function("rolling hills 64x64, corner to corner", |b| {
        b.iter(|| {
            for (start, end) in &corners {
                black_box(finder.find_path(&grid, *start, *end)).ok();
            }
        })
    });

    c.bench_function("rolling hills 64x64, rebuild", |b| {
        b.iter(|| black_box(TerrainGrid::build(config, &rolling_hills)).unwrap())
    });
}

criterion_group!(benches, terrain_bench_single);
criterion_main!(benches);
