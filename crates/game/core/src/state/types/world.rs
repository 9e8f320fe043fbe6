use std::collections::HashSet;

use super::Cell;

/// Cells currently unavailable for spawning: body, obstacles and food.
///
/// Every component that places or removes something updates the index in the
/// same step, so a lookup never sees a stale entry.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OccupiedIndex {
    cells: HashSet<Cell>,
}

impl OccupiedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Returns false if the cell was already occupied.
    pub fn insert(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    /// Returns false if the cell was not occupied.
    pub fn remove(&mut self, cell: Cell) -> bool {
        self.cells.remove(&cell)
    }

    pub fn extend(&mut self, cells: impl IntoIterator<Item = Cell>) {
        self.cells.extend(cells);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Free cells of an `N × N` grid in row-major order.
    ///
    /// The order is fixed so seeded sampling is reproducible.
    pub fn free_cells(&self, grid_size: i32) -> Vec<Cell> {
        (0..grid_size)
            .flat_map(|y| (0..grid_size).map(move |x| Cell::new(x, y)))
            .filter(|cell| !self.contains(*cell))
            .collect()
    }
}
