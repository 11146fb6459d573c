//! HEXPOOL Core - Hex-grid geometry and pool engine
//!
//! This crate provides the core logic for HEXPOOL:
//! - Cube-coordinate hex math (distance, rings, lines, rotation)
//! - Pixel mapping via pointy-top and flat-top layouts
//! - Topology-dispatched grid geometry behind the GridGeometry trait
//! - Bounded board grids with eager cell enumeration
//! - Tile placement with incremental pool (connected component) maintenance
//! - JSON board snapshots

pub mod board;
pub mod cell;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod hex;
pub mod layout;
pub mod pool;
pub mod snapshot;
pub mod tile;

// Re-exports for convenient access
pub use board::{Board, Placement, Removal};
pub use cell::{GridCell, SquareCoord, Topology};
pub use error::{BoardError, GeometryError};
pub use geometry::{geometry_for, CellMesh, CellOffset, GridGeometry, HexagonGeometry};
pub use grid::Grid;
pub use hex::{opposite_direction, FractionalHex, Hex, HEX_DIRECTIONS};
pub use layout::{Layout, Orientation, Point, FLAT_TOP, POINTY_TOP};
pub use pool::{Pool, PoolId, PoolManager};
pub use snapshot::{BoardSnapshot, TileRecord};
pub use tile::{Tile, TileId, TileKind, TileManager};
