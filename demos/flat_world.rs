use glam::{Vec2, Vec3};
use terrain_pathfinding::{GridConfig, Pathfinder, TerrainGrid, TerrainSample};

// In this example a path is found on flat ground with an obstructed block in
// the middle:
//  _____
// |S    |
// | ### |
// | ### |
// | ### |
// |    G|
//  _____
// S marks the start, G the goal, # the obstructed cells.
fn main() {
    let sampler = |x: f32, z: f32, _clearance: f32| {
        Some(TerrainSample {
            height: 0.0,
            normal: Vec3::Y,
            obstructed: (1.0..4.0).contains(&x) && (1.0..4.0).contains(&z),
        })
    };
    let config = GridConfig {
        world_size: Vec2::new(5.0, 5.0),
        ..GridConfig::default()
    };
    let grid = TerrainGrid::build(config, &sampler).unwrap();
    println!("{}", grid);
    let finder = Pathfinder::new();
    match finder.find_path(&grid, Vec3::new(0.5, 0.0, 0.5), Vec3::new(4.5, 0.0, 4.5)) {
        Ok(path) => {
            println!("A path has been found (cost {}):", path.cost());
            for position in path.world_positions() {
                println!("{:?}", position);
            }
        }
        Err(e) => println!("No path: {}", e),
    }
}
