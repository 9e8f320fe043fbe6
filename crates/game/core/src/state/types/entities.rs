use std::collections::{HashSet, VecDeque};

use super::Cell;

/// The agent's trail, head first.
///
/// Keeps a set of its own cells alongside the ordered segments so membership
/// checks stay O(1) while the body grows and shrinks.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Body {
    segments: VecDeque<Cell>,
    cells: HashSet<Cell>,
}

impl Body {
    /// Builds a body from head-first segments. Returns `None` when empty.
    pub fn from_segments(segments: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let segments: VecDeque<Cell> = segments.into_iter().collect();
        if segments.is_empty() {
            return None;
        }
        let cells = segments.iter().copied().collect();
        Some(Self { segments, cells })
    }

    /// A straight horizontal body whose head is `head` and whose tail trails
    /// off towards smaller `x`.
    pub fn horizontal(head: Cell, length: usize) -> Option<Self> {
        Self::from_segments((0..length as i32).map(|i| Cell::new(head.x - i, head.y)))
    }

    pub fn head(&self) -> Cell {
        self.segments[0]
    }

    pub fn tail(&self) -> Cell {
        self.segments[self.segments.len() - 1]
    }

    /// The segment right behind the head, if any.
    pub fn neck(&self) -> Option<Cell> {
        self.segments.get(1).copied()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.segments.iter().copied()
    }

    pub fn to_vec(&self) -> Vec<Cell> {
        self.iter().collect()
    }

    /// True when moving the head onto `candidate` (and dropping the tail)
    /// would put two segments on the same cell.
    pub fn collides_after_move(&self, candidate: Cell) -> bool {
        self.contains(candidate) && (self.len() == 1 || candidate != self.tail())
    }

    /// All segments unique, and each 4-adjacent to the next.
    pub fn is_well_formed(&self) -> bool {
        self.cells.len() == self.segments.len()
            && self
                .segments
                .iter()
                .zip(self.segments.iter().skip(1))
                .all(|(a, b)| a.manhattan(*b) == 1)
    }

    pub(crate) fn push_head(&mut self, cell: Cell) {
        self.segments.push_front(cell);
        self.cells.insert(cell);
    }

    /// Ordinary move: drops the tail, then inserts `head`. Returns the vacated
    /// cell, which equals `head` when the body chases its own tail.
    pub(crate) fn slide_to(&mut self, head: Cell) -> Option<Cell> {
        let tail = self.segments.pop_back()?;
        self.cells.remove(&tail);
        self.push_head(head);
        Some(tail)
    }

    /// Pops the tail unless it is the last remaining segment.
    pub(crate) fn pop_tail(&mut self) -> Option<Cell> {
        if self.segments.len() <= 1 {
            return None;
        }
        let tail = self.segments.pop_back()?;
        self.cells.remove(&tail);
        Some(tail)
    }
}

/// A fixed cluster of blocking cells.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Obstacle {
    cells: Vec<Cell>,
}

impl Obstacle {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every pair of cells is connected through 4-adjacent cluster cells.
    pub fn is_connected(&self) -> bool {
        let Some(&start) = self.cells.first() else {
            return true;
        };
        let mut seen = vec![start];
        let mut frontier = vec![start];
        while let Some(cell) = frontier.pop() {
            for next in cell.neighbors() {
                if self.cells.contains(&next) && !seen.contains(&next) {
                    seen.push(next);
                    frontier.push(next);
                }
            }
        }
        seen.len() == self.cells.len()
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum FoodKind {
    /// Grows the body and pays out a positive reward.
    Goal,
    /// Shrinks the body and costs reward; also wanders on a timer.
    Hazard,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Food {
    pub kind: FoodKind,
    pub cell: Cell,
}

impl Food {
    pub fn new(kind: FoodKind, cell: Cell) -> Self {
        Self { kind, cell }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(cells: &[(i32, i32)]) -> Body {
        Body::from_segments(cells.iter().map(|&c| Cell::from(c))).unwrap()
    }

    #[test]
    fn horizontal_body_trails_west() {
        let b = Body::horizontal(Cell::new(5, 5), 3).unwrap();
        assert_eq!(b.to_vec(), vec![Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)]);
        assert_eq!(b.neck(), Some(Cell::new(4, 5)));
        assert!(b.is_well_formed());
    }

    #[test]
    fn empty_body_is_rejected() {
        assert!(Body::from_segments(Vec::new()).is_none());
        assert!(Body::horizontal(Cell::ORIGIN, 0).is_none());
    }

    #[test]
    fn moving_into_departing_tail_is_not_a_collision() {
        // U shape: head at (1,0), tail at (1,1)
        let b = body(&[(1, 0), (0, 0), (0, 1), (1, 1)]);
        assert!(!b.collides_after_move(Cell::new(1, 1)));
        assert!(b.collides_after_move(Cell::new(0, 0)));
        assert!(!b.collides_after_move(Cell::new(2, 0)));
    }

    #[test]
    fn pop_tail_keeps_last_segment() {
        let mut b = body(&[(0, 0), (1, 0)]);
        assert_eq!(b.pop_tail(), Some(Cell::new(1, 0)));
        assert_eq!(b.pop_tail(), None);
        assert_eq!(b.len(), 1);
        assert!(b.contains(Cell::new(0, 0)));
        assert!(!b.contains(Cell::new(1, 0)));
    }

    #[test]
    fn slide_into_departing_tail_keeps_membership() {
        let mut b = body(&[(1, 0), (0, 0), (0, 1), (1, 1)]);
        assert_eq!(b.slide_to(Cell::new(1, 1)), Some(Cell::new(1, 1)));
        assert_eq!(b.head(), Cell::new(1, 1));
        assert_eq!(b.len(), 4);
        assert!(b.contains(Cell::new(1, 1)));
        assert!(b.is_well_formed());
    }

    #[test]
    fn duplicate_segments_are_not_well_formed() {
        let b = body(&[(0, 0), (1, 0), (0, 0)]);
        assert!(!b.is_well_formed());
    }

    #[test]
    fn obstacle_connectivity() {
        let connected = Obstacle::new(vec![Cell::new(0, 0), Cell::new(0, 1), Cell::new(1, 1)]);
        let split = Obstacle::new(vec![Cell::new(0, 0), Cell::new(2, 2)]);
        assert!(connected.is_connected());
        assert!(!split.is_connected());
    }
}
