//! Bounded board grid: resolved geometry + layout + the valid cell set

use crate::cell::{GridCell, Topology};
use crate::error::GeometryError;
use crate::geometry::{geometry_for, GridGeometry};
use crate::layout::{Layout, Point};
use rustc_hash::FxHashSet;

/// The enumerated playing field of a board. Created once with a fixed
/// radius; never changes afterwards.
#[derive(Debug)]
pub struct Grid {
    topology: Topology,
    layout: Layout,
    geometry: Box<dyn GridGeometry>,
    cells: Vec<GridCell>,
    members: FxHashSet<GridCell>,
    radius: u32,
}

impl Grid {
    /// Resolve the geometry for `topology` and generate every cell within
    /// `radius` of the origin. Fails if no geometry implementation is
    /// registered for the topology.
    pub fn new(topology: Topology, layout: Layout, radius: u32) -> Result<Self, GeometryError> {
        let geometry =
            geometry_for(topology).ok_or(GeometryError::UnsupportedTopology(topology))?;
        let cells = geometry.cells_in_range(geometry.origin(), radius)?;
        let members = cells.iter().copied().collect();
        Ok(Self {
            topology,
            layout,
            geometry,
            cells,
            members,
            radius,
        })
    }

    pub fn topology(&self) -> Topology {
        self.topology
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// The active geometry implementation
    pub fn geometry(&self) -> &dyn GridGeometry {
        self.geometry.as_ref()
    }

    /// Every valid cell, in generation order
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    /// Membership test against the generated cell set
    pub fn is_valid_cell(&self, cell: GridCell) -> bool {
        self.members.contains(&cell)
    }

    /// The cell's neighbors in direction order. Results are not bounds
    /// checked; combine with `is_valid_cell`.
    pub fn neighbor_cells(&self, cell: GridCell) -> Result<Vec<GridCell>, GeometryError> {
        self.geometry.neighbors(cell)
    }

    /// Cell under a pixel position
    pub fn from_pixel(&self, point: Point) -> GridCell {
        self.geometry.from_pixel(&self.layout, point)
    }

    /// Pixel center of a cell
    pub fn to_pixel(&self, cell: GridCell) -> Result<Point, GeometryError> {
        self.geometry.to_pixel(&self.layout, cell)
    }

    /// Pixel corners of a cell
    pub fn corners(&self, cell: GridCell) -> Result<Vec<Point>, GeometryError> {
        self.geometry.corners(&self.layout, cell)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_grid(radius: u32) -> Grid {
        let layout = Layout::pointy(Point::new(10.0, 10.0), Point::new(0.0, 0.0));
        Grid::new(Topology::Hexagon, layout, radius).unwrap()
    }

    #[test]
    fn test_cell_count_matches_radius() {
        for radius in 0..=4u32 {
            let grid = test_grid(radius);
            assert_eq!(grid.cells().len() as u32, 3 * radius * (radius + 1) + 1);
        }
    }

    #[test]
    fn test_validity_boundary() {
        let grid = test_grid(3);
        let origin = grid.geometry().origin();
        for &cell in grid.cells() {
            assert!(grid.is_valid_cell(cell));
        }
        // Exactly at the radius: valid
        for cell in grid.geometry().ring(origin, 3).unwrap() {
            assert!(grid.is_valid_cell(cell));
        }
        // One past the radius: invalid
        for cell in grid.geometry().ring(origin, 4).unwrap() {
            assert!(!grid.is_valid_cell(cell));
        }
    }

    #[test]
    fn test_unsupported_topology_rejected() {
        let layout = Layout::pointy(Point::new(10.0, 10.0), Point::new(0.0, 0.0));
        assert_eq!(
            Grid::new(Topology::Square, layout, 2).unwrap_err(),
            GeometryError::UnsupportedTopology(Topology::Square)
        );
        assert_eq!(
            Grid::new(Topology::Triangle, layout, 2).unwrap_err(),
            GeometryError::UnsupportedTopology(Topology::Triangle)
        );
    }

    #[test]
    fn test_neighbors_of_edge_cell_leave_the_grid() {
        let grid = test_grid(2);
        let rim = GridCell::hex(2, 0);
        let neighbors = grid.neighbor_cells(rim).unwrap();
        assert_eq!(neighbors.len(), 6);
        assert!(neighbors.iter().any(|&n| !grid.is_valid_cell(n)));
        assert!(neighbors.iter().any(|&n| grid.is_valid_cell(n)));
    }

    #[test]
    fn test_pixel_queries_round_trip() {
        let grid = test_grid(3);
        for &cell in grid.cells() {
            let p = grid.to_pixel(cell).unwrap();
            assert_eq!(grid.from_pixel(p), cell);
        }
    }
}
