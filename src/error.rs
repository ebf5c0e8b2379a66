use thiserror::Error;

/// Which end of a path request failed to resolve.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Target,
}

/// Failure to construct a [TerrainGrid](crate::TerrainGrid).
///
/// Per-cell sampling failures are not errors: a cell the sampler cannot
/// resolve becomes unwalkable and the build carries on.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("world bounds and node radius produce a {x} x {y} grid")]
    InvalidBounds { x: i32, y: i32 },
}

/// Failure to produce a path. All variants are expected outcomes of a
/// well-formed request, not faults.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PathError {
    #[error("{0:?} position resolves to an unwalkable cell")]
    UnwalkableEndpoint(Endpoint),
    #[error("no path exists between start and target")]
    NoPathFound,
    #[error("search gave up after expanding {0} nodes")]
    BudgetExhausted(usize),
}
