use std::collections::HashSet;

use crate::action::Heading;
use crate::state::Cell;

/// Immutable view of the world handed to the search and to observers.
///
/// Owns copies of everything it exposes, so it stays valid while the live
/// [`crate::World`] keeps mutating.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorldSnapshot {
    pub grid_size: i32,
    pub head: Cell,
    /// Body cells, head first.
    pub body: Vec<Cell>,
    pub goal: Cell,
    pub hazard: Cell,
    /// One entry per obstacle cluster.
    pub obstacles: Vec<Vec<Cell>>,
    /// All obstacle cells merged for O(1) lookups.
    pub obstacle_cells: HashSet<Cell>,
    pub heading: Heading,
}

impl WorldSnapshot {
    pub fn in_bounds(&self, cell: Cell) -> bool {
        cell.in_bounds(self.grid_size)
    }

    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.obstacle_cells.contains(&cell)
    }

    /// Out of bounds or inside an obstacle.
    pub fn is_blocked(&self, cell: Cell) -> bool {
        !self.in_bounds(cell) || self.is_obstacle(cell)
    }

    pub fn neck(&self) -> Option<Cell> {
        self.body.get(1).copied()
    }

    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    pub fn cell_count(&self) -> usize {
        (self.grid_size.max(0) as usize).pow(2)
    }
}
