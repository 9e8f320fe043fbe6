use std::collections::{HashSet, VecDeque};

use crate::state::Cell;

/// Cells reachable from `target` by 4-directional flood fill.
///
/// The fill never crosses the grid edge, an obstacle or a body cell. The
/// target counts itself; a blocked or off-grid target yields 0.
pub fn open_area(
    target: Cell,
    obstacles: &HashSet<Cell>,
    body: &[Cell],
    grid_size: i32,
) -> usize {
    let body: HashSet<Cell> = body.iter().copied().collect();
    let blocked =
        |cell: Cell| !cell.in_bounds(grid_size) || obstacles.contains(&cell) || body.contains(&cell);

    if blocked(target) {
        return 0;
    }

    let mut seen = HashSet::from([target]);
    let mut queue = VecDeque::from([target]);
    while let Some(cell) = queue.pop_front() {
        for next in cell.neighbors() {
            if !blocked(next) && seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen.len()
}
