//! # terrain_pathfinding
//!
//! A terrain-aware grid pathfinding system. Builds a 2D lattice of
//! traversability nodes over a sampled 3D surface and finds lowest-cost paths
//! with [A*](https://en.wikipedia.org/wiki/A*_search_algorithm), charging
//! octile distances for planar movement plus a penalty for vertical traversal.
//! Cells whose surface is too steep, obstructed, or separated from a
//! neighbour by too high a step are marked unwalkable at build time.
//! Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! to avoid flood-filling behaviour if no path exists.
//!
//! The embedding environment stays behind two seams: a [TerrainSampler]
//! provides ground height, surface normal and an obstruction flag for an x/z
//! location, and the returned [Path] is an ordered view of world positions
//! ready for whatever consumes it.
//!
//! ```
//! use glam::{Vec2, Vec3};
//! use terrain_pathfinding::{GridConfig, Pathfinder, TerrainGrid, TerrainSample};
//!
//! let config = GridConfig {
//!     world_size: Vec2::new(8.0, 8.0),
//!     ..GridConfig::default()
//! };
//! let flat = |_x: f32, _z: f32, _clearance: f32| {
//!     Some(TerrainSample {
//!         height: 0.0,
//!         normal: Vec3::Y,
//!         obstructed: false,
//!     })
//! };
//! let grid = TerrainGrid::build(config, &flat).unwrap();
//! let path = Pathfinder::new()
//!     .find_path(&grid, Vec3::new(0.5, 0.0, 0.5), Vec3::new(7.5, 0.0, 7.5))
//!     .unwrap();
//! assert_eq!(path.len(), 7);
//! ```

mod astar;
pub mod error;
pub mod node;
pub mod pathfinder;
pub mod terrain;
pub mod terrain_grid;

pub use error::{Endpoint, GridError, PathError};
pub use node::Node;
pub use pathfinder::{Path, Pathfinder};
pub use terrain::{TerrainSample, TerrainSampler};
pub use terrain_grid::{GridConfig, TerrainGrid};

use grid_util::point::Point;

/// Cost of a cardinal (straight) step.
pub const C: i32 = 10;
/// Cost of a diagonal step.
pub const D: i32 = 14;
/// Auxiliary constant (2C - D) used in the octile distance formula.
pub const E: i32 = 2 * C - D;
/// Cost charged per world unit of height difference along a step.
pub const VERTICAL_COST: i32 = 10;

/// Inline capacity for neighbour lists; one cell has at most 8 successors.
pub const N_SMALLVEC_SIZE: usize = 8;

/// Octile distance between two lattice cells: the cost of a planar path taking
/// the maximal number of diagonal steps before going straight.
pub fn octile_distance(a: &Point, b: &Point) -> i32 {
    let delta_x = (a.x - b.x).abs();
    let delta_y = (a.y - b.y).abs();
    // Formula from https://github.com/riscy/a_star_on_grids to compute
    // C * max(dx, dy) + (D - C) * min(dx, dy) without branching
    (E * (delta_x - delta_y).abs() + D * (delta_x + delta_y)) / 2
}

/// Converts the integer cost to an approximate floating point equivalent where
/// cardinal steps have cost 1.0.
pub fn convert_cost_to_unit_cost_float(cost: i32) -> f64 {
    (cost as f64) / (C as f64)
}
