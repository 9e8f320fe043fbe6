//! World initialization errors.
//!
//! Placement failures while building or resetting a world. They are fatal:
//! the session is aborted rather than retried.

use crate::error::{ErrorSeverity, GameError};
use crate::state::FoodKind;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum InitializationError {
    /// Configuration can never produce a playable world.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),

    /// No seed cell far enough from the existing clusters was found.
    #[error("no position for obstacle {cluster} at least {min_separation} cells from others after {attempts} attempts")]
    ObstacleSeparation {
        cluster: usize,
        min_separation: f64,
        attempts: u32,
    },

    /// A cluster ran out of free adjacent cells before reaching its size.
    #[error("obstacle {cluster} stuck at {placed} of {wanted} blocks")]
    ObstacleGrowth {
        cluster: usize,
        placed: usize,
        wanted: usize,
    },

    /// No straight, collision-free segment of the requested length exists.
    #[error("no free straight segment of length {length} for the body")]
    NoBodySpawn { length: usize },

    /// The grid is full.
    #[error("no free cell for {kind} food")]
    NoFoodSpawn { kind: FoodKind },
}

impl GameError for InitializationError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidConfig(_) => "INIT_INVALID_CONFIG",
            Self::ObstacleSeparation { .. } => "INIT_OBSTACLE_SEPARATION",
            Self::ObstacleGrowth { .. } => "INIT_OBSTACLE_GROWTH",
            Self::NoBodySpawn { .. } => "INIT_NO_BODY_SPAWN",
            Self::NoFoodSpawn { .. } => "INIT_NO_FOOD_SPAWN",
        }
    }
}
