//! Fuzzes the system by checking for many random terrains that a path is
//! found exactly when start and target share a connected component, that the
//! component structure agrees with the materialized neighbour sets, and that
//! returned paths are chains of walkable mutual neighbours.

use glam::{Vec2, Vec3};
use grid_util::point::Point;
use rand::prelude::*;
use terrain_pathfinding::{
    GridConfig, PathError, Pathfinder, TerrainGrid, TerrainSample, TerrainSampler,
};

const N: i32 = 8;
const N_GRIDS: usize = 1000;

/// Random obstruction (40%) and heights in [0, 1.2]; tall enough that some
/// steps violate the default 0.5 limit and the refinement pass kicks in.
fn random_sampler(rng: &mut StdRng) -> impl TerrainSampler {
    let obstructed: Vec<Vec<bool>> = (0..N)
        .map(|_| (0..N).map(|_| rng.gen_bool(0.4)).collect())
        .collect();
    let heights: Vec<Vec<f32>> = (0..N)
        .map(|_| (0..N).map(|_| rng.gen_range(0.0..1.2)).collect())
        .collect();
    move |x: f32, z: f32, _clearance: f32| {
        let (cx, cz) = (x.floor() as usize, z.floor() as usize);
        Some(TerrainSample {
            height: heights[cz][cx],
            normal: Vec3::Y,
            obstructed: obstructed[cz][cx],
        })
    }
}

fn build_random_grid(rng: &mut StdRng) -> TerrainGrid {
    let config = GridConfig {
        world_size: Vec2::new(N as f32, N as f32),
        ..GridConfig::default()
    };
    TerrainGrid::build(config, &random_sampler(rng)).unwrap()
}

fn center(cell: Point) -> Vec3 {
    Vec3::new(cell.x as f32 + 0.5, 0.0, cell.y as f32 + 0.5)
}

#[test]
fn fuzz_search_agrees_with_components() {
    let mut rng = StdRng::seed_from_u64(0);
    let finder = Pathfinder::new();
    let start = Point::new(0, 0);
    let end = Point::new(N - 1, N - 1);
    for _ in 0..N_GRIDS {
        let grid = build_random_grid(&mut rng);
        let result = finder.find_path(&grid, center(start), center(end));
        if !grid.walkable(start) || !grid.walkable(end) {
            assert!(matches!(result, Err(PathError::UnwalkableEndpoint(_))));
            continue;
        }
        let reachable = grid.reachable(start, end);
        // Show the grid if the search and the components disagree
        if result.is_ok() != reachable {
            println!("{}", grid);
        }
        assert!(result.is_ok() == reachable);
        if let Ok(path) = result {
            let mut previous = start;
            for cell in path.cells() {
                assert!(grid.neighbour_cells(previous).contains(&cell));
                assert!(grid.neighbour_cells(cell).contains(&previous));
                assert!(grid.walkable(cell));
                previous = cell;
            }
            assert_eq!(previous, end);
        }
    }
}

#[test]
fn fuzz_neighbour_sets_are_valid() {
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..N_GRIDS {
        let grid = build_random_grid(&mut rng);
        for node in grid.nodes() {
            let neighbours = grid.neighbour_cells(node.cell);
            if !node.walkable {
                assert!(neighbours.is_empty());
            }
            for neighbour in neighbours {
                assert!(grid.in_bounds(neighbour));
                assert!(grid.walkable(neighbour));
                let delta = (neighbour.x - node.cell.x).abs() + (neighbour.y - node.cell.y).abs();
                assert!(delta == 1 || delta == 2);
            }
        }
    }
}

/// An admissible heuristic must reproduce the costs an uninformed search
/// finds.
#[test]
fn fuzz_astar_matches_dijkstra_costs() {
    let mut rng = StdRng::seed_from_u64(2);
    let astar = Pathfinder::new();
    let dijkstra = Pathfinder {
        heuristic_factor: 0.0,
        ..Pathfinder::new()
    };
    let start = Point::new(0, 0);
    let end = Point::new(N - 1, N - 1);
    for _ in 0..N_GRIDS / 4 {
        let grid = build_random_grid(&mut rng);
        let informed = astar.find_path(&grid, center(start), center(end));
        let uninformed = dijkstra.find_path(&grid, center(start), center(end));
        match (informed, uninformed) {
            (Ok(a), Ok(b)) => assert_eq!(a.cost(), b.cost()),
            (a, b) => assert_eq!(a.err(), b.err()),
        }
    }
}
