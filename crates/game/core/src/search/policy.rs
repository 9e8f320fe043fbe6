//! Turning a planned path into a single move.

use arrayvec::ArrayVec;

use crate::action::CardinalDirection;
use crate::state::{Cell, WorldSnapshot};

/// What the agent does this tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Decision {
    Step(CardinalDirection),
    /// No direction leads anywhere legal.
    Trapped,
}

impl Decision {
    pub fn direction(self) -> Option<CardinalDirection> {
        match self {
            Decision::Step(dir) => Some(dir),
            Decision::Trapped => None,
        }
    }
}

/// Directions from the head that stay in bounds, avoid obstacles and do not
/// fold back onto the neck. Listed in [`CardinalDirection::ALL`] order.
pub fn legal_directions(snapshot: &WorldSnapshot) -> ArrayVec<CardinalDirection, 4> {
    let neck = snapshot.neck();
    CardinalDirection::ALL
        .into_iter()
        .filter(|dir| {
            let next = snapshot.head.step(*dir);
            !snapshot.is_blocked(next) && Some(next) != neck
        })
        .collect()
}

/// `path[1] − path[0]` as a direction, when the path has a first step.
pub fn path_direction(path: &[Cell]) -> Option<CardinalDirection> {
    match path {
        [from, to, ..] => CardinalDirection::from_delta(*to - *from),
        _ => None,
    }
}

/// Follows the path when it offers a legal first step, otherwise picks among
/// the legal directions.
///
/// `pick` receives the number of candidates and returns the chosen index; the
/// runtime backs it with its random source.
pub fn decide<F>(snapshot: &WorldSnapshot, path: &[Cell], pick: F) -> Decision
where
    F: FnOnce(usize) -> usize,
{
    let legal = legal_directions(snapshot);
    if let Some(dir) = path_direction(path).filter(|dir| legal.contains(dir)) {
        return Decision::Step(dir);
    }
    if legal.is_empty() {
        return Decision::Trapped;
    }
    let index = pick(legal.len()).min(legal.len() - 1);
    Decision::Step(legal[index])
}
