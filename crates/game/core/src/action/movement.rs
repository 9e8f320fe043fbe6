use crate::error::{ErrorSeverity, GameError};
use crate::state::Cell;

#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoveError {
    #[error("agent is dead; reset the world before advancing")]
    Dead,

    #[error("cannot stand still at {head:?} once the body has started moving")]
    StationaryAfterStart { head: Cell },
}

impl GameError for MoveError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Dead => "MOVE_DEAD",
            Self::StationaryAfterStart { .. } => "MOVE_STATIONARY_AFTER_START",
        }
    }
}

/// One of the four unit steps on the grid.
///
/// Coordinates are screen-style: `y` grows downwards, so `North` is `(0, -1)`.
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
pub enum CardinalDirection {
    North,
    South,
    West,
    East,
}

impl CardinalDirection {
    /// Fixed neighbour expansion order used by every search in the crate.
    ///
    /// Changing it changes which of several equal-cost paths is returned.
    pub const ALL: [CardinalDirection; 4] = [
        CardinalDirection::North,
        CardinalDirection::South,
        CardinalDirection::West,
        CardinalDirection::East,
    ];

    pub fn delta(self) -> (i32, i32) {
        match self {
            CardinalDirection::North => (0, -1),
            CardinalDirection::South => (0, 1),
            CardinalDirection::West => (-1, 0),
            CardinalDirection::East => (1, 0),
        }
    }

    pub fn as_cell(self) -> Cell {
        let (dx, dy) = self.delta();
        Cell::new(dx, dy)
    }

    pub fn opposite(self) -> Self {
        match self {
            CardinalDirection::North => CardinalDirection::South,
            CardinalDirection::South => CardinalDirection::North,
            CardinalDirection::West => CardinalDirection::East,
            CardinalDirection::East => CardinalDirection::West,
        }
    }

    /// Recovers the direction of a unit step, `None` for anything else.
    pub fn from_delta(delta: Cell) -> Option<Self> {
        Self::ALL.into_iter().find(|dir| dir.as_cell() == delta)
    }
}

/// Current steering of the body.
///
/// A freshly spawned body is `Stationary` until the first real move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heading {
    #[default]
    Stationary,
    Moving(CardinalDirection),
}

impl Heading {
    pub fn direction(self) -> Option<CardinalDirection> {
        match self {
            Heading::Stationary => None,
            Heading::Moving(dir) => Some(dir),
        }
    }

    /// The per-tick displacement; zero while stationary.
    pub fn delta(self) -> Cell {
        self.direction()
            .map(CardinalDirection::as_cell)
            .unwrap_or(Cell::ORIGIN)
    }

    pub fn is_stationary(self) -> bool {
        matches!(self, Heading::Stationary)
    }
}

impl From<CardinalDirection> for Heading {
    fn from(dir: CardinalDirection) -> Self {
        Heading::Moving(dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deltas_are_unit_steps() {
        for dir in CardinalDirection::ALL {
            let (dx, dy) = dir.delta();
            assert_eq!(dx.abs() + dy.abs(), 1);
            assert_eq!(dir.as_cell() + dir.opposite().as_cell(), Cell::ORIGIN);
        }
    }

    #[test]
    fn from_delta_round_trips_only_unit_steps() {
        assert_eq!(
            CardinalDirection::from_delta(Cell::new(0, -1)),
            Some(CardinalDirection::North)
        );
        assert_eq!(CardinalDirection::from_delta(Cell::new(1, 1)), None);
        assert_eq!(CardinalDirection::from_delta(Cell::ORIGIN), None);
    }

    #[test]
    fn parses_case_insensitive_names() {
        assert_eq!("EAST".parse::<CardinalDirection>(), Ok(CardinalDirection::East));
        assert_eq!(CardinalDirection::West.to_string(), "west");
        assert!("up".parse::<CardinalDirection>().is_err());
    }

    #[test]
    fn stationary_heading_has_zero_delta() {
        assert_eq!(Heading::Stationary.delta(), Cell::ORIGIN);
        assert_eq!(
            Heading::from(CardinalDirection::South).delta(),
            Cell::new(0, 1)
        );
    }
}
