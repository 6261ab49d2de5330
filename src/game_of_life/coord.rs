//! Coordinates, compass offsets and neighbour geometry

use serde::{Deserialize, Serialize};
use std::fmt;

/// A position on the board. `x` grows east, `y` grows south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "[i64; 2]", into = "[i64; 2]")]
pub struct Coord {
    pub x: i64,
    pub y: i64,
}

impl Coord {
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn north(self) -> Self {
        Self::new(self.x, self.y - 1)
    }

    pub fn south(self) -> Self {
        Self::new(self.x, self.y + 1)
    }

    pub fn east(self) -> Self {
        Self::new(self.x + 1, self.y)
    }

    pub fn west(self) -> Self {
        Self::new(self.x - 1, self.y)
    }

    pub fn north_west(self) -> Self {
        self.north().west()
    }

    pub fn north_east(self) -> Self {
        self.north().east()
    }

    pub fn south_west(self) -> Self {
        self.south().west()
    }

    pub fn south_east(self) -> Self {
        self.south().east()
    }

    /// The eight Moore neighbours, starting north-west and going clockwise
    pub fn neighbours(self) -> [Coord; 8] {
        [
            self.north_west(),
            self.north(),
            self.north_east(),
            self.east(),
            self.south_east(),
            self.south(),
            self.south_west(),
            self.west(),
        ]
    }

    /// Translate by `(dx, dy)`
    pub fn offset(self, dx: i64, dy: i64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// Translate by `(dx, dy)`, or `None` on overflow
    pub fn checked_offset(self, dx: i64, dy: i64) -> Option<Self> {
        Some(Self::new(self.x.checked_add(dx)?, self.y.checked_add(dy)?))
    }
}

impl From<[i64; 2]> for Coord {
    fn from([x, y]: [i64; 2]) -> Self {
        Self::new(x, y)
    }
}

impl From<Coord> for [i64; 2] {
    fn from(coord: Coord) -> Self {
        [coord.x, coord.y]
    }
}

impl From<(i64, i64)> for Coord {
    fn from((x, y): (i64, i64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// How neighbour coordinates are mapped before lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Geometry {
    /// Edges are walls; anything past them is out of bounds
    #[default]
    Bounded,
    /// Each axis wraps around, so the board is a torus
    Toroidal,
}

impl Geometry {
    /// Map a coordinate according to the wraparound policy
    pub fn transform(self, coord: Coord, height: usize, width: usize) -> Coord {
        match self {
            Geometry::Bounded => coord,
            Geometry::Toroidal => Coord::new(
                coord.x.rem_euclid(width as i64),
                coord.y.rem_euclid(height as i64),
            ),
        }
    }

    pub fn is_toroidal(self) -> bool {
        matches!(self, Geometry::Toroidal)
    }
}

/// True if `coord` lies in `[0, width) x [0, height)`
#[inline]
pub fn in_bounds(coord: Coord, height: usize, width: usize) -> bool {
    coord.x >= 0
        && coord.y >= 0
        && (coord.x as u64) < width as u64
        && (coord.y as u64) < height as u64
}
