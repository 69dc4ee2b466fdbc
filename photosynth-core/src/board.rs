//! Hex board geometry with axial coordinates

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::GeometryError;

/// The only supported board: 37 cells, radius 3
pub const SUPPORTED_NUM_CELLS: usize = 37;
pub const SUPPORTED_MAP_RADIUS: i8 = 3;

/// Axial hex coordinates, offset so the board center sits at (radius, radius)
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Hex {
    pub q: i8,
    pub r: i8,
}

impl Hex {
    pub const fn new(q: i8, r: i8) -> Self {
        Self { q, r }
    }

    /// Component-wise sum, no bounds check
    pub fn add(self, vector: (i8, i8)) -> Hex {
        Hex::new(self.q + vector.0, self.r + vector.1)
    }

    /// Get neighbor in direction (0-5)
    pub fn neighbor(self, direction_id: usize) -> Hex {
        self.add(direction(direction_id))
    }

    /// Cell `steps` away along a direction
    pub fn step(self, direction_id: usize, steps: i8) -> Hex {
        self.add(scale(direction(direction_id), steps))
    }

    pub fn to_cube(self) -> Cube {
        Cube::from(self)
    }

    /// String key in the `q_r` form used by the game protocol tooling
    pub fn to_key(self) -> String {
        format!("{}_{}", self.q, self.r)
    }

    pub fn from_key(key: &str) -> Result<Hex, GeometryError> {
        key.parse()
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.q, self.r)
    }
}

impl FromStr for Hex {
    type Err = GeometryError;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        let invalid = || GeometryError::InvalidKey(key.to_string());
        let (q, r) = key.split_once('_').ok_or_else(invalid)?;
        let q = q.parse().map_err(|_| invalid())?;
        let r = r.parse().map_err(|_| invalid())?;
        Ok(Hex::new(q, r))
    }
}

/// Cube coordinates, `x + y + z == 0`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cube {
    pub x: i8,
    pub y: i8,
    pub z: i8,
}

impl From<Hex> for Cube {
    fn from(hex: Hex) -> Self {
        Cube {
            x: hex.q,
            y: -hex.q - hex.r,
            z: hex.r,
        }
    }
}

impl From<Cube> for Hex {
    fn from(cube: Cube) -> Self {
        Hex::new(cube.x, cube.z)
    }
}

/// Direction vectors in axial coordinates (dq, dr)
///
/// The order is load-bearing: on day `d` the sun casts shadows along
/// `DIRECTIONS[d % 6]`.
pub const DIRECTIONS: [(i8, i8); 6] = [
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, 0),
    (-1, 1),
    (0, 1),
];

/// Order in which the spiral walks each ring when numbering cells
pub const SPIRAL_DIRECTIONS: [usize; 6] = [2, 3, 4, 5, 0, 1];

/// Unit vector for a direction id. Panics on ids outside 0..6.
pub fn direction(id: usize) -> (i8, i8) {
    DIRECTIONS[id]
}

pub fn scale(direction: (i8, i8), k: i8) -> (i8, i8) {
    (direction.0 * k, direction.1 * k)
}

/// Map radius for a cell count; only the 37-cell board is supported
pub fn map_radius(num_cells: usize) -> Result<i8, GeometryError> {
    if num_cells == SUPPORTED_NUM_CELLS {
        Ok(SUPPORTED_MAP_RADIUS)
    } else {
        Err(GeometryError::UnsupportedBoardSize { num_cells })
    }
}

/// Cell index -> hex table, index 0 is the center, then ring by ring
pub fn spiral_cells(radius: i8) -> Vec<Hex> {
    let center = Hex::new(radius, radius);
    let mut cells = vec![center];

    for ring in 1..=radius {
        let mut pointer = center.step(0, ring);
        for &dir in &SPIRAL_DIRECTIONS {
            for _ in 0..ring {
                cells.push(pointer);
                pointer = pointer.neighbor(dir);
            }
        }
    }

    cells
}
