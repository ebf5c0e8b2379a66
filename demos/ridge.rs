use glam::{Vec2, Vec3};
use terrain_pathfinding::{GridConfig, Pathfinder, TerrainGrid, TerrainSample};

// A ridge runs across the map. With the default limits the search climbs it,
// paying the vertical penalty; once the step limit is tightened the rims
// become unwalkable and the path swings around the ridge's southern end.
fn main() {
    let sampler = |x: f32, z: f32, _clearance: f32| {
        let on_ridge = (5.0..6.0).contains(&x) && z < 9.0;
        Some(TerrainSample {
            height: if on_ridge { 0.45 } else { 0.0 },
            normal: Vec3::Y,
            obstructed: false,
        })
    };
    let start = Vec3::new(0.5, 0.0, 5.5);
    let goal = Vec3::new(11.5, 0.0, 5.5);
    let finder = Pathfinder::new();

    for max_step_height in [0.5, 0.3] {
        let config = GridConfig {
            world_size: Vec2::new(12.0, 12.0),
            max_step_height,
            ..GridConfig::default()
        };
        let grid = TerrainGrid::build(config, &sampler).unwrap();
        match finder.find_path(&grid, start, goal) {
            Ok(path) => println!(
                "step limit {}: {} cells, cost {}",
                max_step_height,
                path.len(),
                path.cost()
            ),
            Err(e) => println!("step limit {}: {}", max_step_height, e),
        }
    }
}
