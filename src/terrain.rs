use glam::Vec3;

/// One surface measurement under an x/z location.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TerrainSample {
    /// Ground height (world y) at the sampled point.
    pub height: f32,
    /// Surface normal at the sampled point.
    pub normal: Vec3,
    /// Whether the clearance volume around the point is blocked.
    pub obstructed: bool,
}

/// The seam between the pathfinding core and whatever owns the world geometry
/// (a physics scene, a heightmap, a noise function).
///
/// `clearance` is the radius around the point that must be free for the
/// obstruction flag; the grid passes its configured obstruction radius here.
/// Returning [None] means no surface exists under that location, which the
/// grid absorbs as a permanently unwalkable cell.
///
/// Implementations must be deterministic for the duration of one build or
/// refresh call.
pub trait TerrainSampler {
    fn sample(&self, x: f32, z: f32, clearance: f32) -> Option<TerrainSample>;
}

impl<F> TerrainSampler for F
where
    F: Fn(f32, f32, f32) -> Option<TerrainSample>,
{
    fn sample(&self, x: f32, z: f32, clearance: f32) -> Option<TerrainSample> {
        self(x, z, clearance)
    }
}
