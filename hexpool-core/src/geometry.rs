//! Topology-dispatched grid geometry
//!
//! `GridGeometry` is the capability surface every topology must provide:
//! cell/pixel mapping, neighbors, range/ring/line queries, rotation, offsets,
//! cell-set metrics, and render-mesh generation. Callers resolve an
//! implementation once via `geometry_for` and invoke through the trait, so
//! adding a square or triangle topology never touches call sites.

use crate::cell::{GridCell, Topology};
use crate::error::GeometryError;
use crate::hex::{Hex, HEX_DIRECTIONS};
use crate::layout::{Layout, Point};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

/// Displacement between two cells of the same topology
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellOffset {
    Hexagon(Hex),
}

/// Triangle mesh covering a set of cells: one center vertex plus the corner
/// ring per cell, fanned into triangles. Indices refer into `vertices`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CellMesh {
    pub vertices: Vec<Point>,
    pub indices: Vec<u32>,
}

/// Geometry operations for one grid topology
pub trait GridGeometry: Debug {
    /// Topology this implementation serves
    fn topology(&self) -> Topology;

    /// Neighbors per interior cell
    fn neighbor_count(&self) -> usize;

    /// Corners per cell
    fn corner_count(&self) -> usize;

    /// The canonical origin cell
    fn origin(&self) -> GridCell;

    /// Center of a cell in pixel space
    fn to_pixel(&self, layout: &Layout, cell: GridCell) -> Result<Point, GeometryError>;

    /// Cell under a pixel
    fn from_pixel(&self, layout: &Layout, point: Point) -> GridCell;

    /// Neighbor in one direction
    fn neighbor(&self, cell: GridCell, direction: u8) -> Result<GridCell, GeometryError>;

    /// All neighbors, in direction order
    fn neighbors(&self, cell: GridCell) -> Result<Vec<GridCell>, GeometryError>;

    /// Steps between two cells
    fn distance(&self, a: GridCell, b: GridCell) -> Result<u32, GeometryError>;

    /// All cells within `range` steps of `center`, center included
    fn cells_in_range(&self, center: GridCell, range: u32) -> Result<Vec<GridCell>, GeometryError>;

    /// Cells at exactly `radius` steps from `center`
    fn ring(&self, center: GridCell, radius: u32) -> Result<Vec<GridCell>, GeometryError>;

    /// Cells on the line from `a` to `b`, inclusive
    fn line(&self, a: GridCell, b: GridCell) -> Result<Vec<GridCell>, GeometryError>;

    /// Rotate `cell` around `center` by `steps` minimal rotations
    /// (positive = counter-clockwise)
    fn rotate(&self, center: GridCell, cell: GridCell, steps: i32) -> Result<GridCell, GeometryError>;

    /// Corner points of a cell in pixel space
    fn corners(&self, layout: &Layout, cell: GridCell) -> Result<Vec<Point>, GeometryError>;

    /// Displacement from one cell to another
    fn offset_between(&self, from: GridCell, to: GridCell) -> Result<CellOffset, GeometryError>;

    /// Apply a displacement to a cell
    fn apply_offset(&self, cell: GridCell, offset: CellOffset) -> Result<GridCell, GeometryError>;

    /// Largest pairwise distance within a cell set
    fn diameter(&self, cells: &[GridCell]) -> Result<u32, GeometryError>;

    /// Member cell minimizing the worst-case distance to the rest of the
    /// set; earlier members win ties. None for an empty set.
    fn center_of(&self, cells: &[GridCell]) -> Result<Option<GridCell>, GeometryError>;

    /// Adjacent pairs within the set, each pair counted once
    fn internal_edge_count(&self, cells: &[GridCell]) -> Result<usize, GeometryError>;

    /// Neighbor slots along the set's boundary not occupied by the set
    fn external_edge_count(&self, cells: &[GridCell]) -> Result<usize, GeometryError>;

    /// Render mesh for a set of cells
    fn mesh(&self, layout: &Layout, cells: &[GridCell]) -> Result<CellMesh, GeometryError>;
}

/// Resolve the geometry implementation for a topology. Square and triangle
/// have no implementation yet and resolve to None.
pub fn geometry_for(topology: Topology) -> Option<Box<dyn GridGeometry>> {
    match topology {
        Topology::Hexagon => Some(Box::new(HexagonGeometry)),
        Topology::Square | Topology::Triangle => None,
    }
}

// ============================================================================
// HEXAGON IMPLEMENTATION
// ============================================================================

/// Cube-coordinate hexagon geometry
#[derive(Clone, Copy, Debug, Default)]
pub struct HexagonGeometry;

impl HexagonGeometry {
    /// Ring walks start from the corner reached by stepping this direction
    /// `radius` times from the center.
    const RING_START_DIRECTION: usize = 4;

    fn unwrap_hex(&self, cell: GridCell) -> Result<Hex, GeometryError> {
        cell.as_hex().ok_or(GeometryError::TopologyMismatch {
            topology: Topology::Hexagon,
            cell,
        })
    }
}

impl GridGeometry for HexagonGeometry {
    fn topology(&self) -> Topology {
        Topology::Hexagon
    }

    fn neighbor_count(&self) -> usize {
        6
    }

    fn corner_count(&self) -> usize {
        6
    }

    fn origin(&self) -> GridCell {
        GridCell::Hexagon(Hex::ORIGIN)
    }

    fn to_pixel(&self, layout: &Layout, cell: GridCell) -> Result<Point, GeometryError> {
        Ok(layout.hex_to_pixel(self.unwrap_hex(cell)?))
    }

    fn from_pixel(&self, layout: &Layout, point: Point) -> GridCell {
        GridCell::Hexagon(layout.pixel_to_hex(point).round())
    }

    fn neighbor(&self, cell: GridCell, direction: u8) -> Result<GridCell, GeometryError> {
        Ok(GridCell::Hexagon(self.unwrap_hex(cell)?.neighbor(direction)))
    }

    fn neighbors(&self, cell: GridCell) -> Result<Vec<GridCell>, GeometryError> {
        let h = self.unwrap_hex(cell)?;
        Ok((0..6).map(|d| GridCell::Hexagon(h.neighbor(d))).collect())
    }

    fn distance(&self, a: GridCell, b: GridCell) -> Result<u32, GeometryError> {
        Ok(self.unwrap_hex(a)?.distance_to(self.unwrap_hex(b)?))
    }

    fn cells_in_range(&self, center: GridCell, range: u32) -> Result<Vec<GridCell>, GeometryError> {
        let c = self.unwrap_hex(center)?;
        let r = range as i32;
        let mut out = Vec::with_capacity((3 * r * (r + 1) + 1) as usize);
        for dq in -r..=r {
            for dr in (-r).max(-dq - r)..=r.min(-dq + r) {
                out.push(GridCell::Hexagon(c + Hex::axial(dq, dr)));
            }
        }
        Ok(out)
    }

    fn ring(&self, center: GridCell, radius: u32) -> Result<Vec<GridCell>, GeometryError> {
        let c = self.unwrap_hex(center)?;
        if radius == 0 {
            return Ok(vec![center]);
        }

        let mut out = Vec::with_capacity(6 * radius as usize);
        let mut walker = c + HEX_DIRECTIONS[Self::RING_START_DIRECTION] * radius as i32;
        for side in 0..6u8 {
            for _ in 0..radius {
                out.push(GridCell::Hexagon(walker));
                walker = walker.neighbor(side);
            }
        }
        Ok(out)
    }

    fn line(&self, a: GridCell, b: GridCell) -> Result<Vec<GridCell>, GeometryError> {
        let a = self.unwrap_hex(a)?;
        let b = self.unwrap_hex(b)?;
        Ok(a.line_to(b).into_iter().map(GridCell::Hexagon).collect())
    }

    fn rotate(&self, center: GridCell, cell: GridCell, steps: i32) -> Result<GridCell, GeometryError> {
        let c = self.unwrap_hex(center)?;
        let mut vec = self.unwrap_hex(cell)? - c;
        for _ in 0..steps.rem_euclid(6) {
            vec = vec.rotate_left();
        }
        Ok(GridCell::Hexagon(c + vec))
    }

    fn corners(&self, layout: &Layout, cell: GridCell) -> Result<Vec<Point>, GeometryError> {
        Ok(layout.corners(self.unwrap_hex(cell)?).to_vec())
    }

    fn offset_between(&self, from: GridCell, to: GridCell) -> Result<CellOffset, GeometryError> {
        Ok(CellOffset::Hexagon(
            self.unwrap_hex(to)? - self.unwrap_hex(from)?,
        ))
    }

    fn apply_offset(&self, cell: GridCell, offset: CellOffset) -> Result<GridCell, GeometryError> {
        let CellOffset::Hexagon(delta) = offset;
        Ok(GridCell::Hexagon(self.unwrap_hex(cell)? + delta))
    }

    fn diameter(&self, cells: &[GridCell]) -> Result<u32, GeometryError> {
        let mut max = 0;
        for (i, &a) in cells.iter().enumerate() {
            for &b in &cells[i + 1..] {
                max = max.max(self.distance(a, b)?);
            }
        }
        Ok(max)
    }

    fn center_of(&self, cells: &[GridCell]) -> Result<Option<GridCell>, GeometryError> {
        let mut best: Option<(GridCell, u32)> = None;
        for &candidate in cells {
            let mut eccentricity = 0;
            for &other in cells {
                eccentricity = eccentricity.max(self.distance(candidate, other)?);
            }
            if best.map_or(true, |(_, e)| eccentricity < e) {
                best = Some((candidate, eccentricity));
            }
        }
        Ok(best.map(|(cell, _)| cell))
    }

    fn internal_edge_count(&self, cells: &[GridCell]) -> Result<usize, GeometryError> {
        let mut adjacent = 0;
        for &a in cells {
            for &b in cells {
                if a != b && self.distance(a, b)? == 1 {
                    adjacent += 1;
                }
            }
        }
        // Each internal edge is found from both of its cells
        Ok(adjacent / 2)
    }

    fn external_edge_count(&self, cells: &[GridCell]) -> Result<usize, GeometryError> {
        let mut external = 0;
        for &cell in cells {
            for neighbor in self.neighbors(cell)? {
                if !cells.contains(&neighbor) {
                    external += 1;
                }
            }
        }
        Ok(external)
    }

    fn mesh(&self, layout: &Layout, cells: &[GridCell]) -> Result<CellMesh, GeometryError> {
        let mut mesh = CellMesh {
            vertices: Vec::with_capacity(cells.len() * 7),
            indices: Vec::with_capacity(cells.len() * 18),
        };
        for &cell in cells {
            let base = mesh.vertices.len() as u32;
            mesh.vertices.push(self.to_pixel(layout, cell)?);
            mesh.vertices.extend(self.corners(layout, cell)?);
            for corner in 0..6u32 {
                mesh.indices.push(base);
                mesh.indices.push(base + 1 + corner);
                mesh.indices.push(base + 1 + (corner + 1) % 6);
            }
        }
        Ok(mesh)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Layout;

    fn geometry() -> Box<dyn GridGeometry> {
        geometry_for(Topology::Hexagon).unwrap()
    }

    #[test]
    fn test_resolution_by_topology() {
        assert!(geometry_for(Topology::Hexagon).is_some());
        assert!(geometry_for(Topology::Square).is_none());
        assert!(geometry_for(Topology::Triangle).is_none());
        // Resolving twice yields equivalent implementations
        let a = geometry_for(Topology::Hexagon).unwrap();
        let b = geometry_for(Topology::Hexagon).unwrap();
        assert_eq!(a.topology(), b.topology());
        assert_eq!(a.neighbor_count(), b.neighbor_count());
    }

    #[test]
    fn test_topology_mismatch_is_an_error() {
        let g = geometry();
        let alien = GridCell::Square(crate::cell::SquareCoord { x: 0, y: 0 });
        assert!(matches!(
            g.neighbors(alien),
            Err(GeometryError::TopologyMismatch { .. })
        ));
        assert!(matches!(
            g.distance(alien, g.origin()),
            Err(GeometryError::TopologyMismatch { .. })
        ));
    }

    #[test]
    fn test_range_cardinality() {
        let g = geometry();
        for range in 0..=5u32 {
            let cells = g.cells_in_range(g.origin(), range).unwrap();
            let expected = (3 * range * (range + 1) + 1) as usize;
            assert_eq!(cells.len(), expected, "range {}", range);
            for cell in &cells {
                assert!(g.distance(g.origin(), *cell).unwrap() <= range);
            }
        }
    }

    #[test]
    fn test_ring_cardinality_and_distance() {
        let g = geometry();
        let center = GridCell::hex(2, -1);
        assert_eq!(g.ring(center, 0).unwrap(), vec![center]);
        for radius in 1..=4u32 {
            let ring = g.ring(center, radius).unwrap();
            assert_eq!(ring.len(), 6 * radius as usize);
            for cell in &ring {
                assert_eq!(g.distance(center, *cell).unwrap(), radius);
            }
        }
    }

    #[test]
    fn test_ring_cells_are_distinct() {
        let g = geometry();
        let ring = g.ring(g.origin(), 3).unwrap();
        let mut dedup = ring.clone();
        dedup.sort_by_key(|c| {
            let h = c.as_hex().unwrap();
            (h.q, h.r)
        });
        dedup.dedup();
        assert_eq!(dedup.len(), ring.len());
    }

    #[test]
    fn test_line_matches_distance() {
        let g = geometry();
        let a = GridCell::hex(-2, 1);
        let b = GridCell::hex(3, -1);
        let line = g.line(a, b).unwrap();
        assert_eq!(line.len() as u32, g.distance(a, b).unwrap() + 1);
        assert_eq!(line[0], a);
        assert_eq!(*line.last().unwrap(), b);
    }

    #[test]
    fn test_rotate_preserves_distance_from_center() {
        let g = geometry();
        let center = GridCell::hex(1, 1);
        let cell = GridCell::hex(4, -1);
        let d = g.distance(center, cell).unwrap();
        for steps in -6..=6 {
            let rotated = g.rotate(center, cell, steps).unwrap();
            assert_eq!(g.distance(center, rotated).unwrap(), d, "steps {}", steps);
        }
        // A full turn is the identity
        assert_eq!(g.rotate(center, cell, 6).unwrap(), cell);
    }

    #[test]
    fn test_offset_round_trip() {
        let g = geometry();
        let a = GridCell::hex(0, 2);
        let b = GridCell::hex(-3, 1);
        let offset = g.offset_between(a, b).unwrap();
        assert_eq!(g.apply_offset(a, offset).unwrap(), b);
    }

    #[test]
    fn test_edge_counts_for_adjacent_pair() {
        let g = geometry();
        let pair = [GridCell::hex(0, 0), GridCell::hex(1, 0)];
        assert_eq!(g.internal_edge_count(&pair).unwrap(), 1);
        // 12 slots total, 2 consumed by the shared edge
        assert_eq!(g.external_edge_count(&pair).unwrap(), 10);
    }

    #[test]
    fn test_edge_counts_for_filled_disc() {
        let g = geometry();
        let disc = g.cells_in_range(g.origin(), 1).unwrap();
        // 6 spokes + 6 rim edges
        assert_eq!(g.internal_edge_count(&disc).unwrap(), 12);
        // Rim cells expose 3 slots each
        assert_eq!(g.external_edge_count(&disc).unwrap(), 18);
    }

    #[test]
    fn test_diameter_and_center() {
        let g = geometry();
        let line = g.line(GridCell::hex(0, 0), GridCell::hex(4, 0)).unwrap();
        assert_eq!(g.diameter(&line).unwrap(), 4);
        assert_eq!(g.center_of(&line).unwrap(), Some(GridCell::hex(2, 0)));
        assert_eq!(g.diameter(&[]).unwrap(), 0);
        assert_eq!(g.center_of(&[]).unwrap(), None);
    }

    #[test]
    fn test_mesh_counts() {
        let g = geometry();
        let layout = Layout::pointy(Point::new(10.0, 10.0), Point::new(0.0, 0.0));
        let cells = g.cells_in_range(g.origin(), 1).unwrap();
        let mesh = g.mesh(&layout, &cells).unwrap();
        assert_eq!(mesh.vertices.len(), cells.len() * 7);
        assert_eq!(mesh.indices.len(), cells.len() * 18);
        assert!(mesh.indices.iter().all(|&i| (i as usize) < mesh.vertices.len()));
    }

    #[test]
    fn test_pixel_dispatch_round_trip() {
        let g = geometry();
        let layout = Layout::flat(Point::new(7.0, 7.0), Point::new(100.0, -40.0));
        let cell = GridCell::hex(-2, 3);
        let p = g.to_pixel(&layout, cell).unwrap();
        assert_eq!(g.from_pixel(&layout, p), cell);
    }
}
