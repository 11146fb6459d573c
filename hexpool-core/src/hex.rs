//! Cube-coordinate hex math

use crate::error::GeometryError;
use serde::{Deserialize, Serialize};
use std::ops;

/// Cube hex coordinate with the invariant q + r + s == 0
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hex {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

/// Unit direction vectors in cube coordinates.
/// Index: 0=E, 1=NE, 2=NW, 3=W, 4=SW, 5=SE
pub const HEX_DIRECTIONS: [Hex; 6] = [
    Hex { q: 1, r: 0, s: -1 },  // E
    Hex { q: 1, r: -1, s: 0 },  // NE
    Hex { q: 0, r: -1, s: 1 },  // NW
    Hex { q: -1, r: 0, s: 1 },  // W
    Hex { q: -1, r: 1, s: 0 },  // SW
    Hex { q: 0, r: 1, s: -1 },  // SE
];

/// Direction directly opposite `direction`
pub fn opposite_direction(direction: u8) -> u8 {
    (direction + 3) % 6
}

impl Hex {
    pub const ORIGIN: Hex = Hex { q: 0, r: 0, s: 0 };

    /// Construct from all three components; rejects coordinates off the
    /// q + r + s == 0 plane.
    pub fn new(q: i32, r: i32, s: i32) -> Result<Self, GeometryError> {
        if q + r + s != 0 {
            return Err(GeometryError::CoordinateSum { q, r, s });
        }
        Ok(Self { q, r, s })
    }

    /// Construct from axial coordinates, deriving s
    pub const fn axial(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    /// Number of steps from the origin
    pub fn length(&self) -> u32 {
        ((self.q.abs() + self.r.abs() + self.s.abs()) / 2) as u32
    }

    /// Distance between two hexes
    pub fn distance_to(&self, other: Hex) -> u32 {
        (*self - other).length()
    }

    /// Neighbor in direction (0-5)
    pub fn neighbor(&self, direction: u8) -> Hex {
        *self + HEX_DIRECTIONS[direction as usize % 6]
    }

    /// Rotate 60 degrees counter-clockwise around the origin
    pub fn rotate_left(&self) -> Hex {
        Hex {
            q: -self.s,
            r: -self.q,
            s: -self.r,
        }
    }

    /// Rotate 60 degrees clockwise around the origin
    pub fn rotate_right(&self) -> Hex {
        Hex {
            q: -self.r,
            r: -self.s,
            s: -self.q,
        }
    }

    /// All hexes on the line from self to other (inclusive).
    /// Samples the fractional segment at distance+1 evenly spaced points;
    /// both endpoints are nudged off the zero plane so samples never land
    /// exactly on a cell boundary.
    pub fn line_to(&self, other: Hex) -> Vec<Hex> {
        let n = self.distance_to(other);
        let a = FractionalHex::from(*self).nudge();
        let b = FractionalHex::from(other).nudge();

        let step = 1.0 / n.max(1) as f64;
        let mut results = Vec::with_capacity(n as usize + 1);
        for i in 0..=n {
            results.push(FractionalHex::lerp(a, b, step * i as f64).round());
        }
        results
    }
}

impl ops::Add for Hex {
    type Output = Hex;

    fn add(self, other: Hex) -> Hex {
        Hex {
            q: self.q + other.q,
            r: self.r + other.r,
            s: self.s + other.s,
        }
    }
}

impl ops::Sub for Hex {
    type Output = Hex;

    fn sub(self, other: Hex) -> Hex {
        Hex {
            q: self.q - other.q,
            r: self.r - other.r,
            s: self.s - other.s,
        }
    }
}

impl ops::Mul<i32> for Hex {
    type Output = Hex;

    fn mul(self, k: i32) -> Hex {
        Hex {
            q: self.q * k,
            r: self.r * k,
            s: self.s * k,
        }
    }
}

/// Floating-point hex, the intermediate of pixel-to-hex conversion
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FractionalHex {
    pub q: f64,
    pub r: f64,
    pub s: f64,
}

impl FractionalHex {
    const NUDGE_EPSILON: f64 = 1e-6;

    pub const fn new(q: f64, r: f64, s: f64) -> Self {
        Self { q, r, s }
    }

    /// Offset slightly off the zero plane; breaks ties when a line sample
    /// straddles a cell boundary.
    fn nudge(self) -> Self {
        Self {
            q: self.q + Self::NUDGE_EPSILON,
            r: self.r + Self::NUDGE_EPSILON,
            s: self.s - 2.0 * Self::NUDGE_EPSILON,
        }
    }

    /// Linear interpolation between two fractional hexes
    pub fn lerp(a: FractionalHex, b: FractionalHex, t: f64) -> FractionalHex {
        FractionalHex {
            q: a.q + (b.q - a.q) * t,
            r: a.r + (b.r - a.r) * t,
            s: a.s + (b.s - a.s) * t,
        }
    }

    /// Round to the nearest integer hex. The component with the largest
    /// rounding error is recomputed from the other two, so the result always
    /// satisfies q + r + s == 0.
    pub fn round(self) -> Hex {
        let mut q = self.q.round();
        let mut r = self.r.round();
        let mut s = self.s.round();

        let q_diff = (q - self.q).abs();
        let r_diff = (r - self.r).abs();
        let s_diff = (s - self.s).abs();

        if q_diff > r_diff && q_diff > s_diff {
            q = -r - s;
        } else if r_diff > s_diff {
            r = -q - s;
        } else {
            s = -q - r;
        }

        Hex {
            q: q as i32,
            r: r as i32,
            s: s as i32,
        }
    }
}

impl From<Hex> for FractionalHex {
    fn from(h: Hex) -> Self {
        Self {
            q: h.q as f64,
            r: h.r as f64,
            s: h.s as f64,
        }
    }
}
