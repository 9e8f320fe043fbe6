use std::fmt;
use std::ops::{Add, Neg, Sub};

use crate::action::CardinalDirection;

/// Discrete grid position expressed in cell coordinates.
///
/// Also doubles as a 2D integer vector: directions and deltas are `Cell`s too.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn step(self, dir: CardinalDirection) -> Self {
        self + dir.as_cell()
    }

    /// The four neighbours in [`CardinalDirection::ALL`] order.
    pub fn neighbors(self) -> [Cell; 4] {
        CardinalDirection::ALL.map(|dir| self.step(dir))
    }

    pub fn manhattan(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn euclidean(self, other: Cell) -> f64 {
        let dx = f64::from(self.x - other.x);
        let dy = f64::from(self.y - other.y);
        dx.hypot(dy)
    }

    pub fn in_bounds(self, grid_size: i32) -> bool {
        self.x >= 0 && self.y >= 0 && self.x < grid_size && self.y < grid_size
    }

    /// Distance to the nearest grid edge; 0 on the border row/column.
    pub fn edge_distance(self, grid_size: i32) -> i32 {
        let last = grid_size - 1;
        self.x.min(self.y).min(last - self.x).min(last - self.y)
    }

    pub fn is_zero(self) -> bool {
        self == Self::ORIGIN
    }
}

impl Default for Cell {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl Add for Cell {
    type Output = Cell;
    fn add(self, rhs: Cell) -> Cell {
        Cell::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Cell {
    type Output = Cell;
    fn sub(self, rhs: Cell) -> Cell {
        Cell::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Cell {
    type Output = Cell;
    fn neg(self) -> Cell {
        Cell::new(-self.x, -self.y)
    }
}

impl From<(i32, i32)> for Cell {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
