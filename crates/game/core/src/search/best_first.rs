use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::state::{Cell, WorldSnapshot};

struct Node {
    cell: Cell,
    parent: Option<usize>,
    g: u32,
}

/// Heap entry ordered so the max-heap pops the lowest `f`, then the oldest.
struct Frontier {
    f: f64,
    seq: u64,
    node: usize,
}

impl PartialEq for Frontier {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Frontier {}

impl PartialOrd for Frontier {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Frontier {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Best-first search from the head to `goal`.
///
/// `f = g + weight × manhattan(cell, goal) − open_area`, with `g` counting
/// steps. Only the grid edge and obstacles block expansion. A neighbour that
/// is already open with a `g` no worse than the new one is not pushed again.
///
/// Returns the path head first and goal last, or `None` once the frontier is
/// exhausted.
pub fn search(
    snapshot: &WorldSnapshot,
    goal: Cell,
    heuristic_weight: f64,
    open_area: usize,
) -> Option<Vec<Cell>> {
    let (nodes, reached) = expand(snapshot, goal, heuristic_weight, open_area);
    reached.map(|index| reconstruct(&nodes, index))
}

/// Runs the search and returns every node pushed, plus the goal node if found.
fn expand(
    snapshot: &WorldSnapshot,
    goal: Cell,
    heuristic_weight: f64,
    open_area: usize,
) -> (Vec<Node>, Option<usize>) {
    let area = open_area as f64;
    let f_of = |cell: Cell, g: u32| f64::from(g) + heuristic_weight * f64::from(cell.manhattan(goal)) - area;

    let mut nodes = vec![Node {
        cell: snapshot.head,
        parent: None,
        g: 0,
    }];
    let mut open: BinaryHeap<Frontier> = BinaryHeap::new();
    let mut open_g: HashMap<Cell, u32> = HashMap::from([(snapshot.head, 0)]);
    let mut closed: HashSet<Cell> = HashSet::new();
    let mut seq = 0u64;

    open.push(Frontier {
        f: f_of(snapshot.head, 0),
        seq,
        node: 0,
    });

    while let Some(Frontier { node: index, .. }) = open.pop() {
        let (cell, g) = (nodes[index].cell, nodes[index].g);
        if !closed.insert(cell) {
            continue;
        }
        if cell == goal {
            return (nodes, Some(index));
        }

        for next in cell.neighbors() {
            if snapshot.is_blocked(next) || closed.contains(&next) {
                continue;
            }
            let next_g = g + 1;
            if open_g.get(&next).is_some_and(|&existing| existing <= next_g) {
                continue;
            }
            open_g.insert(next, next_g);
            nodes.push(Node {
                cell: next,
                parent: Some(index),
                g: next_g,
            });
            seq += 1;
            open.push(Frontier {
                f: f_of(next, next_g),
                seq,
                node: nodes.len() - 1,
            });
        }
    }

    (nodes, None)
}

fn reconstruct(nodes: &[Node], mut index: usize) -> Vec<Cell> {
    let mut path = vec![nodes[index].cell];
    while let Some(parent) = nodes[index].parent {
        path.push(nodes[parent].cell);
        index = parent;
    }
    path.reverse();
    path
}
