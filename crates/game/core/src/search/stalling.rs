use std::collections::HashSet;

use crate::state::{Cell, WorldSnapshot};

/// Greedy escape walk from the head that hugs the middle of the grid.
///
/// Each step moves to the legal neighbour (in bounds, not an obstacle, not yet
/// visited) farthest from every grid edge, ties going to the earliest in
/// expansion order. Only the head starts out visited; the body is not a
/// barrier here, the move policy rejects the neck on the first step. The walk
/// stops once zero or exactly one legal neighbour is left.
///
/// The returned path always starts with the head.
pub fn stalling_path(snapshot: &WorldSnapshot) -> Vec<Cell> {
    let mut visited: HashSet<Cell> = HashSet::from([snapshot.head]);

    let mut path = vec![snapshot.head];
    let mut current = snapshot.head;

    loop {
        let legal: Vec<Cell> = current
            .neighbors()
            .into_iter()
            .filter(|next| !snapshot.is_blocked(*next) && !visited.contains(next))
            .collect();
        if legal.len() <= 1 {
            break;
        }

        // max_by_key keeps the last maximum; fold keeps the first.
        let next = legal[1..].iter().fold(legal[0], |best, &cell| {
            if cell.edge_distance(snapshot.grid_size) > best.edge_distance(snapshot.grid_size) {
                cell
            } else {
                best
            }
        });

        visited.insert(next);
        path.push(next);
        current = next;
    }

    path
}
