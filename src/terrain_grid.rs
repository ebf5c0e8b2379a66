use core::fmt;

use glam::{Vec2, Vec3};
use grid_util::grid::{Grid, SimpleGrid};
use grid_util::point::Point;
use log::{debug, info};
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::error::GridError;
use crate::node::Node;
use crate::terrain::TerrainSampler;
use crate::{octile_distance, N_SMALLVEC_SIZE, VERTICAL_COST};

/// Build-time parameters for a [TerrainGrid]. Distances are world units;
/// `max_slope_angle` is in degrees.
#[derive(Clone, Copy, Debug)]
pub struct GridConfig {
    /// Minimum corner of the covered area. The y component is only used as a
    /// placeholder height for cells without a surface.
    pub origin: Vec3,
    /// Extent of the covered area along world x and z.
    pub world_size: Vec2,
    /// Half the lattice spacing; cells are `2 * node_radius` apart.
    pub node_radius: f32,
    /// Clearance radius handed to the sampler's obstruction test.
    pub obstruction_radius: f32,
    /// Steepest surface and steepest step a path may traverse.
    pub max_slope_angle: f32,
    /// Tallest ledge a single step may climb or drop.
    pub max_step_height: f32,
}

impl GridConfig {
    pub fn node_diameter(&self) -> f32 {
        self.node_radius * 2.0
    }
}

impl Default for GridConfig {
    fn default() -> GridConfig {
        GridConfig {
            origin: Vec3::ZERO,
            world_size: Vec2::new(10.0, 10.0),
            node_radius: 0.5,
            obstruction_radius: 0.5,
            max_slope_angle: 45.0,
            max_step_height: 0.5,
        }
    }
}

/// The node lattice built over a sampled surface. Owns every [Node] in a
/// contiguous arena; neighbour sets are recorded per cell in [u8] format for
/// fast lookups during search, and a [UnionFind] over the finished neighbour
/// edges answers reachability queries without flooding the grid.
///
/// A grid is immutable between [build](TerrainGrid::build),
/// [rebuild](TerrainGrid::rebuild) and
/// [refresh_obstructions](TerrainGrid::refresh_obstructions) calls, all of
/// which leave walkability, neighbour masks and components consistent.
#[derive(Clone, Debug)]
pub struct TerrainGrid {
    pub config: GridConfig,
    size_x: i32,
    size_y: i32,
    nodes: Vec<Node>,
    neighbours: SimpleGrid<u8>,
    components: UnionFind<usize>,
}

impl TerrainGrid {
    /// Samples the terrain over the configured bounds and derives walkability
    /// from the obstruction flag, the surface slope and the step limits.
    ///
    /// Cells the sampler cannot resolve become unwalkable rather than failing
    /// the build; bounds that derive a non-positive lattice are rejected.
    pub fn build<S: TerrainSampler>(config: GridConfig, sampler: &S) -> Result<TerrainGrid, GridError> {
        let diameter = config.node_diameter();
        let (size_x, size_y) = if diameter > 0.0 {
            (
                (config.world_size.x / diameter).round() as i32,
                (config.world_size.y / diameter).round() as i32,
            )
        } else {
            (0, 0)
        };
        if size_x <= 0 || size_y <= 0 {
            return Err(GridError::InvalidBounds { x: size_x, y: size_y });
        }
        info!("building {}x{} terrain grid", size_x, size_y);
        let mut nodes = Vec::with_capacity((size_x * size_y) as usize);
        for y in 0..size_y {
            for x in 0..size_x {
                let cell = Point::new(x, y);
                let world_x = config.origin.x + (x as f32 + 0.5) * diameter;
                let world_z = config.origin.z + (y as f32 + 0.5) * diameter;
                match sampler.sample(world_x, world_z, config.obstruction_radius) {
                    Some(sample) => nodes.push(Node {
                        cell,
                        world: Vec3::new(world_x, sample.height, world_z),
                        normal: sample.normal,
                        has_surface: true,
                        walkable: !sample.obstructed
                            && !surface_too_steep(sample.normal, config.max_slope_angle),
                    }),
                    None => {
                        debug!("no surface under cell {}", cell);
                        nodes.push(Node::surfaceless(
                            cell,
                            Vec3::new(world_x, config.origin.y, world_z),
                        ));
                    }
                }
            }
        }
        let mut grid = TerrainGrid {
            config,
            size_x,
            size_y,
            nodes,
            neighbours: SimpleGrid::new(size_x as usize, size_y as usize, 0),
            components: UnionFind::new((size_x * size_y) as usize),
        };
        grid.finalize_walkability();
        Ok(grid)
    }

    /// Discards every node and reconstructs the grid from the stored config.
    /// Given identical sampler output the result is bit-identical.
    pub fn rebuild<S: TerrainSampler>(&mut self, sampler: &S) -> Result<(), GridError> {
        *self = TerrainGrid::build(self.config, sampler)?;
        Ok(())
    }

    /// Re-queries the obstruction state of every surfaced cell and rederives
    /// walkability, neighbour sets and components. The embedding system calls
    /// this on its own schedule; the grid defines no timer or loop.
    ///
    /// Sampled heights stay fixed until a rebuild. A surface the sampler can
    /// no longer resolve counts as obstructed.
    pub fn refresh_obstructions<S: TerrainSampler>(&mut self, sampler: &S) {
        let clearance = self.config.obstruction_radius;
        let max_slope_angle = self.config.max_slope_angle;
        for node in &mut self.nodes {
            if !node.has_surface {
                continue;
            }
            node.walkable = match sampler.sample(node.world.x, node.world.z, clearance) {
                Some(sample) => {
                    node.normal = sample.normal;
                    !sample.obstructed && !surface_too_steep(sample.normal, max_slope_angle)
                }
                None => false,
            };
        }
        self.finalize_walkability();
    }

    /// Step refinement, neighbour materialization and component generation,
    /// in that order. Refinement decisions depend on sampled heights alone,
    /// never on the walkability of the neighbour under scrutiny, so the
    /// outcome is independent of iteration order.
    fn finalize_walkability(&mut self) {
        let violations: Vec<bool> = self
            .nodes
            .iter()
            .map(|node| {
                node.walkable
                    && (0..8).any(|i| {
                        let neighbour = node.cell.moore_neighbor(i);
                        self.in_bounds(neighbour)
                            && self.nodes[self.get_ix(neighbour)].has_surface
                            && !self.step_allowed(node.cell, neighbour)
                    })
            })
            .collect();
        for (node, violated) in self.nodes.iter_mut().zip(violations) {
            if violated {
                node.walkable = false;
            }
        }
        // Neighbour sets are materialized only after every walkability
        // decision is final.
        let masks: Vec<u8> = self
            .nodes
            .iter()
            .map(|node| {
                if !node.walkable {
                    return 0;
                }
                (0..8).fold(0u8, |mask, i| {
                    let neighbour = node.cell.moore_neighbor(i);
                    if self.in_bounds(neighbour) && self.nodes[self.get_ix(neighbour)].walkable {
                        mask | (1 << i)
                    } else {
                        mask
                    }
                })
            })
            .collect();
        for (ix, mask) in masks.into_iter().enumerate() {
            let cell = self.nodes[ix].cell;
            self.neighbours.set_point(cell, mask);
        }
        self.generate_components();
    }

    /// Generates a new [UnionFind] structure and links up grid neighbours to
    /// the same components.
    fn generate_components(&mut self) {
        info!("generating connected components");
        self.components = UnionFind::new(self.nodes.len());
        for ix in 0..self.nodes.len() {
            let cell = self.nodes[ix].cell;
            let mask = self.neighbours.get_point(cell);
            for i in 0..8 {
                if mask & (1 << i) != 0 {
                    let neighbour_ix = self.get_ix(cell.moore_neighbor(i));
                    self.components.union(ix, neighbour_ix);
                }
            }
        }
    }

    /// Whether a step between two lattice neighbours stays within the height
    /// and slope limits. Both cells must carry a surface.
    pub fn step_allowed(&self, from: Point, to: Point) -> bool {
        let a = &self.nodes[self.get_ix(from)];
        let b = &self.nodes[self.get_ix(to)];
        if !a.has_surface || !b.has_surface {
            return false;
        }
        let height_difference = (a.world.y - b.world.y).abs();
        if height_difference > self.config.max_step_height {
            return false;
        }
        let diagonal = (to.x - from.x).abs() + (to.y - from.y).abs() == 2;
        let planar_distance = if diagonal {
            std::f32::consts::SQRT_2 * self.config.node_diameter()
        } else {
            self.config.node_diameter()
        };
        height_difference.atan2(planar_distance).to_degrees() <= self.config.max_slope_angle
    }

    /// The materialized neighbour set of a cell: in-bounds, independently
    /// walkable neighbours only.
    pub fn neighbour_cells(&self, cell: Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        let mask = self.neighbours.get_point(cell);
        (0..8)
            .filter(|i| mask & (1 << *i) != 0)
            .map(|i| cell.moore_neighbor(i))
            .collect()
    }

    /// Neighbours reachable in one step together with the traversal cost:
    /// octile distance plus the vertical penalty. The step limits are
    /// re-validated here so searches respect walkability changes made after
    /// the masks were built.
    pub fn successor_cells(&self, cell: Point) -> SmallVec<[(Point, i32); N_SMALLVEC_SIZE]> {
        let height = self.nodes[self.get_ix(cell)].world.y;
        self.neighbour_cells(cell)
            .into_iter()
            .filter(|neighbour| self.step_allowed(cell, *neighbour))
            .map(|neighbour| {
                let height_difference = (height - self.nodes[self.get_ix(neighbour)].world.y).abs();
                let climb = (height_difference * VERTICAL_COST as f32).round() as i32;
                (neighbour, octile_distance(&cell, &neighbour) + climb)
            })
            .collect()
    }

    /// Resolves a world position to the nearest lattice cell. Positions off
    /// the covered area clamp to the closest edge cell.
    pub fn cell_from_world(&self, world: Vec3) -> Point {
        let percent_x =
            ((world.x - self.config.origin.x) / self.config.world_size.x).clamp(0.0, 1.0);
        let percent_y =
            ((world.z - self.config.origin.z) / self.config.world_size.y).clamp(0.0, 1.0);
        let x = ((percent_x * self.size_x as f32 - 0.5).round() as i32).clamp(0, self.size_x - 1);
        let y = ((percent_y * self.size_y as f32 - 0.5).round() as i32).clamp(0, self.size_y - 1);
        Point::new(x, y)
    }

    /// Retrieves the component id a given cell belongs to.
    pub fn get_component(&self, cell: Point) -> usize {
        self.components.find(self.get_ix(cell))
    }

    /// Checks if two cells are on the same component.
    pub fn reachable(&self, a: Point, b: Point) -> bool {
        self.in_bounds(a)
            && self.in_bounds(b)
            && self.components.equiv(self.get_ix(a), self.get_ix(b))
    }

    /// Checks if two cells are not on the same component.
    pub fn unreachable(&self, a: Point, b: Point) -> bool {
        !self.reachable(a, b)
    }

    pub fn node(&self, cell: Point) -> Option<&Node> {
        self.in_bounds(cell).then(|| &self.nodes[self.get_ix(cell)])
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn walkable(&self, cell: Point) -> bool {
        self.in_bounds(cell) && self.nodes[self.get_ix(cell)].walkable
    }

    pub fn in_bounds(&self, cell: Point) -> bool {
        cell.x >= 0 && cell.y >= 0 && cell.x < self.size_x && cell.y < self.size_y
    }

    pub fn width(&self) -> i32 {
        self.size_x
    }

    pub fn height(&self) -> i32 {
        self.size_y
    }

    fn get_ix(&self, cell: Point) -> usize {
        (cell.y * self.size_x + cell.x) as usize
    }
}

fn surface_too_steep(normal: Vec3, max_slope_angle: f32) -> bool {
    normal.angle_between(Vec3::Y).to_degrees() > max_slope_angle
}

impl fmt::Display for TerrainGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Walkability:")?;
        for y in 0..self.size_y {
            let values = (0..self.size_x)
                .map(|x| self.nodes[self.get_ix(Point::new(x, y))].walkable as i32)
                .collect::<Vec<i32>>();
            writeln!(f, "{:?}", values)?;
        }
        Ok(())
    }
}
