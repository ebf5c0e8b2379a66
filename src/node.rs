use glam::Vec3;
use grid_util::point::Point;

/// One cell of the pathfinding lattice. Nodes live in a contiguous arena owned
/// by [TerrainGrid](crate::TerrainGrid); neighbour relations are kept as
/// per-cell bitmasks on the grid rather than as references between nodes.
#[derive(Clone, Debug)]
pub struct Node {
    /// Integer lattice coordinates, unique within one grid.
    pub cell: Point,
    /// Cell-center world position; y is the sampled ground height. Only a
    /// full rebuild may change this.
    pub world: Vec3,
    /// Sampled surface normal, [Vec3::Y] for cells without a surface.
    pub normal: Vec3,
    /// Whether the sampler produced a surface for this cell. Surfaceless
    /// cells stay unwalkable and take no part in step checks.
    pub has_surface: bool,
    /// False if the cell is obstructed, its surface is too steep, or a step
    /// to one of its neighbours violates the configured limits.
    pub walkable: bool,
}

impl Node {
    pub(crate) fn surfaceless(cell: Point, world: Vec3) -> Node {
        Node {
            cell,
            world,
            normal: Vec3::Y,
            has_surface: false,
            walkable: false,
        }
    }
}
