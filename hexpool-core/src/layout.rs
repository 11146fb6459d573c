//! Hex-to-pixel mapping: orientation matrices, layout, corners

use crate::hex::{FractionalHex, Hex};
use serde::{Deserialize, Serialize};

/// 2D pixel-space point
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

const SQRT_3: f64 = 1.732_050_807_568_877_2;

/// Orientation matrix pair: forward (hex to pixel), backward (pixel to hex),
/// and the angle of corner 0 in units of 60 degrees.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Orientation {
    pub forward: [f64; 4],
    pub backward: [f64; 4],
    pub start_angle: f64,
}

/// Pointy-top orientation: corner 0 at 30 degrees
pub const POINTY_TOP: Orientation = Orientation {
    forward: [SQRT_3, SQRT_3 / 2.0, 0.0, 3.0 / 2.0],
    backward: [SQRT_3 / 3.0, -1.0 / 3.0, 0.0, 2.0 / 3.0],
    start_angle: 0.5,
};

/// Flat-top orientation: corner 0 at 0 degrees
pub const FLAT_TOP: Orientation = Orientation {
    forward: [3.0 / 2.0, 0.0, SQRT_3 / 2.0, SQRT_3],
    backward: [2.0 / 3.0, 0.0, -1.0 / 3.0, SQRT_3 / 3.0],
    start_angle: 0.0,
};

/// Affine mapping between hex space and pixel space.
/// Immutable configuration owned by the grid for its lifetime.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Layout {
    pub orientation: Orientation,
    pub size: Point,
    pub origin: Point,
}

impl Layout {
    pub const fn new(orientation: Orientation, size: Point, origin: Point) -> Self {
        Self {
            orientation,
            size,
            origin,
        }
    }

    /// Pointy-top layout
    pub const fn pointy(size: Point, origin: Point) -> Self {
        Self::new(POINTY_TOP, size, origin)
    }

    /// Flat-top layout
    pub const fn flat(size: Point, origin: Point) -> Self {
        Self::new(FLAT_TOP, size, origin)
    }

    /// Center of a hex in pixel space
    pub fn hex_to_pixel(&self, h: Hex) -> Point {
        let m = &self.orientation.forward;
        let x = (m[0] * h.q as f64 + m[1] * h.r as f64) * self.size.x;
        let y = (m[2] * h.q as f64 + m[3] * h.r as f64) * self.size.y;
        Point::new(x + self.origin.x, y + self.origin.y)
    }

    /// Fractional hex under a pixel; callers round to resolve the cell
    pub fn pixel_to_hex(&self, p: Point) -> FractionalHex {
        let m = &self.orientation.backward;
        let pt = Point::new(
            (p.x - self.origin.x) / self.size.x,
            (p.y - self.origin.y) / self.size.y,
        );
        let q = m[0] * pt.x + m[1] * pt.y;
        let r = m[2] * pt.x + m[3] * pt.y;
        FractionalHex::new(q, r, -q - r)
    }

    /// Offset of corner `corner` (0-5) from a hex center
    pub fn corner_offset(&self, corner: usize) -> Point {
        let angle = 2.0 * std::f64::consts::PI * (self.orientation.start_angle - corner as f64) / 6.0;
        Point::new(self.size.x * angle.cos(), self.size.y * angle.sin())
    }

    /// The six corner points of a hex, starting at the orientation's
    /// configured start angle
    pub fn corners(&self, h: Hex) -> [Point; 6] {
        let center = self.hex_to_pixel(h);
        let mut out = [Point::default(); 6];
        for (corner, slot) in out.iter_mut().enumerate() {
            let offset = self.corner_offset(corner);
            *slot = Point::new(center.x + offset.x, center.y + offset.y);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(layout: &Layout, h: Hex) -> Hex {
        layout.pixel_to_hex(layout.hex_to_pixel(h)).round()
    }

    #[test]
    fn test_pixel_round_trip_pointy() {
        let layout = Layout::pointy(Point::new(12.0, 12.0), Point::new(400.0, 300.0));
        for q in -4..=4 {
            for r in -4..=4 {
                let h = Hex::axial(q, r);
                assert_eq!(round_trip(&layout, h), h);
            }
        }
    }

    #[test]
    fn test_pixel_round_trip_flat() {
        let layout = Layout::flat(Point::new(9.5, 7.0), Point::new(-20.0, 5.0));
        for q in -4..=4 {
            for r in -4..=4 {
                let h = Hex::axial(q, r);
                assert_eq!(round_trip(&layout, h), h);
            }
        }
    }

    #[test]
    fn test_origin_maps_to_layout_origin() {
        let layout = Layout::pointy(Point::new(10.0, 10.0), Point::new(50.0, 60.0));
        let p = layout.hex_to_pixel(Hex::ORIGIN);
        assert!((p.x - 50.0).abs() < 1e-9);
        assert!((p.y - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_corners_lie_on_size_circle() {
        let layout = Layout::flat(Point::new(8.0, 8.0), Point::new(0.0, 0.0));
        let h = Hex::axial(1, -1);
        let center = layout.hex_to_pixel(h);
        let corners = layout.corners(h);
        assert_eq!(corners.len(), 6);
        for c in &corners {
            let d = ((c.x - center.x).powi(2) + (c.y - center.y).powi(2)).sqrt();
            assert!((d - 8.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_adjacent_centers_are_distinct() {
        let layout = Layout::pointy(Point::new(5.0, 5.0), Point::new(0.0, 0.0));
        let a = layout.hex_to_pixel(Hex::ORIGIN);
        let b = layout.hex_to_pixel(Hex::axial(1, 0));
        assert!((a.x - b.x).abs() + (a.y - b.y).abs() > 1.0);
    }
}
