use glam::Vec3;
use grid_util::point::Point;
use log::{info, warn};

use crate::astar::{astar, SearchOutcome};
use crate::error::{Endpoint, PathError};
use crate::node::Node;
use crate::octile_distance;
use crate::terrain_grid::TerrainGrid;

/// Runs best-first searches over a [TerrainGrid]. Stateless between calls;
/// all search bookkeeping lives inside one [find_path](Pathfinder::find_path)
/// invocation.
#[derive(Clone, Debug)]
pub struct Pathfinder {
    /// Multiplier on the heuristic. 1.0 keeps it admissible; larger values
    /// trade optimality for fewer expansions.
    pub heuristic_factor: f32,
    /// Upper bound on node expansions per search, for callers that need a
    /// response within a frame. [None] searches to exhaustion.
    pub expansion_budget: Option<usize>,
}

impl Pathfinder {
    pub fn new() -> Pathfinder {
        Pathfinder {
            heuristic_factor: 1.0,
            expansion_budget: None,
        }
    }

    /// Octile estimate of the remaining cost, ignoring height. The vertical
    /// penalty is non-negative, so the estimate never overshoots the true
    /// cost while `heuristic_factor` is 1.0.
    pub fn heuristic(&self, cell: &Point, target: &Point) -> i32 {
        (octile_distance(cell, target) as f32 * self.heuristic_factor) as i32
    }

    /// Finds a lowest-cost path between two world positions.
    ///
    /// Both positions resolve to their nearest lattice cell, clamped onto the
    /// grid. The returned [Path] runs from (excluding) the start cell to
    /// (including) the target cell; resolving both to the same cell yields an
    /// empty path without searching. Ties on f-cost fall to the candidate
    /// with the lower heuristic estimate.
    pub fn find_path<'g>(
        &self,
        grid: &'g TerrainGrid,
        start: Vec3,
        target: Vec3,
    ) -> Result<Path<'g>, PathError> {
        let start_cell = grid.cell_from_world(start);
        let target_cell = grid.cell_from_world(target);
        if !grid.walkable(start_cell) {
            return Err(PathError::UnwalkableEndpoint(Endpoint::Start));
        }
        if !grid.walkable(target_cell) {
            return Err(PathError::UnwalkableEndpoint(Endpoint::Target));
        }
        if start_cell == target_cell {
            return Ok(Path::empty());
        }
        // Check if start and target are on the same connected component.
        if grid.unreachable(start_cell, target_cell) {
            info!("{} is not reachable from {}", target_cell, start_cell);
            return Err(PathError::NoPathFound);
        }
        match astar(
            &start_cell,
            |cell| grid.successor_cells(*cell),
            |cell| self.heuristic(cell, &target_cell),
            |cell| *cell == target_cell,
            self.expansion_budget,
        ) {
            SearchOutcome::Found(cells, cost) => Ok(Path::from_search(grid, &cells, cost)),
            SearchOutcome::Exhausted => {
                warn!("reachable target could not be pathed to, is the neighbour graph consistent?");
                Err(PathError::NoPathFound)
            }
            SearchOutcome::OverBudget(limit) => Err(PathError::BudgetExhausted(limit)),
        }
    }
}

impl Default for Pathfinder {
    fn default() -> Pathfinder {
        Pathfinder::new()
    }
}

/// An ordered view of the nodes on a found path, from (excluding) the start
/// cell to (including) the target cell. Borrows the grid, so it stays valid
/// exactly until the next rebuild.
#[derive(Clone, Debug)]
pub struct Path<'g> {
    nodes: Vec<&'g Node>,
    cost: i32,
}

impl<'g> Path<'g> {
    fn empty() -> Path<'g> {
        Path {
            nodes: Vec::new(),
            cost: 0,
        }
    }

    fn from_search(grid: &'g TerrainGrid, cells: &[Point], cost: i32) -> Path<'g> {
        // The search reports the start cell first; the path starts after it.
        Path {
            nodes: cells
                .iter()
                .skip(1)
                .map(|cell| grid.node(*cell).unwrap())
                .collect(),
            cost,
        }
    }

    pub fn nodes(&self) -> &[&'g Node] {
        &self.nodes
    }

    /// Lattice cells in traversal order.
    pub fn cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.nodes.iter().map(|node| node.cell)
    }

    /// World positions in traversal order, ready for a movement or rendering
    /// consumer.
    pub fn world_positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.nodes.iter().map(|node| node.world)
    }

    /// Total accumulated traversal cost of the search that produced this
    /// path.
    pub fn cost(&self) -> i32 {
        self.cost
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
