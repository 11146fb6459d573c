//! Topology tags and the cell sum type passed across component boundaries

use crate::hex::Hex;
use serde::{Deserialize, Serialize};

/// Grid topology tag. Only hexagon has a geometry implementation; the other
/// tags exist so a future topology can be added without changing call sites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topology {
    Hexagon,
    Square,
    Triangle,
}

/// Square-grid coordinate. Placeholder payload until a square geometry exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SquareCoord {
    pub x: i32,
    pub y: i32,
}

/// A cell on some grid: topology tag plus topology-specific coordinates.
/// All cross-component APIs pass GridCell, never a raw coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GridCell {
    Hexagon(Hex),
    Square(SquareCoord),
}

impl GridCell {
    /// Convenience constructor for the common case
    pub const fn hex(q: i32, r: i32) -> Self {
        GridCell::Hexagon(Hex::axial(q, r))
    }

    /// Topology this cell belongs to
    pub fn topology(&self) -> Topology {
        match self {
            GridCell::Hexagon(_) => Topology::Hexagon,
            GridCell::Square(_) => Topology::Square,
        }
    }

    /// Hex payload, if this is a hexagon cell
    pub fn as_hex(&self) -> Option<Hex> {
        match self {
            GridCell::Hexagon(h) => Some(*h),
            GridCell::Square(_) => None,
        }
    }
}

impl From<Hex> for GridCell {
    fn from(h: Hex) -> Self {
        GridCell::Hexagon(h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_topology_tag() {
        assert_eq!(GridCell::hex(1, -1).topology(), Topology::Hexagon);
        let sq = GridCell::Square(SquareCoord { x: 2, y: 3 });
        assert_eq!(sq.topology(), Topology::Square);
    }

    #[test]
    fn test_as_hex() {
        assert_eq!(GridCell::hex(2, 0).as_hex(), Some(Hex::axial(2, 0)));
        assert_eq!(GridCell::Square(SquareCoord { x: 0, y: 0 }).as_hex(), None);
    }
}
