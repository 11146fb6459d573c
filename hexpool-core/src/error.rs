//! Typed errors for geometry and board operations

use crate::cell::{GridCell, Topology};
use thiserror::Error;

/// Errors from coordinate math and topology dispatch
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeometryError {
    /// Cube coordinate components must sum to zero
    #[error("invalid cube coordinate ({q}, {r}, {s}): components must sum to zero")]
    CoordinateSum { q: i32, r: i32, s: i32 },

    /// No geometry implementation exists for the requested topology
    #[error("no geometry implementation registered for {0:?}")]
    UnsupportedTopology(Topology),

    /// A cell of one topology was handed to another topology's geometry
    #[error("cell {cell:?} does not belong to the {topology:?} topology")]
    TopologyMismatch { topology: Topology, cell: GridCell },
}

/// Errors from board mutation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    /// Cell lies outside the board's generated cell set
    #[error("cell {0:?} is outside the board")]
    OutOfBounds(GridCell),

    /// Cell already holds a tile
    #[error("cell {0:?} already holds a tile")]
    CellOccupied(GridCell),

    /// Cell holds no tile
    #[error("cell {0:?} holds no tile")]
    CellVacant(GridCell),

    /// The empty sentinel kind is not placeable
    #[error("the empty tile kind cannot be placed on a board")]
    EmptyKind,

    #[error(transparent)]
    Geometry(#[from] GeometryError),
}
