//! Deterministic rules and decision engine for the survival grid world.
//!
//! `game-core` defines the canonical rules (cells, directions, world state,
//! movement) and the pathfinding engine that picks the agent's next step. It
//! exposes pure APIs that the runtime drives one tick at a time. All world
//! mutation flows through [`engine::GameEngine`]; the search only ever reads a
//! [`WorldSnapshot`].
pub mod action;
pub mod config;
pub mod engine;
pub mod env;
pub mod error;
pub mod features;
pub mod search;
pub mod state;

pub use action::{CardinalDirection, Heading, MoveError};
pub use config::GameConfig;
pub use engine::{GameEngine, StepEvent, StepOutcome};
pub use env::{PcgRng, RngOracle, SpawnRng};
pub use error::{ErrorSeverity, GameError};
pub use features::StateFeatures;
pub use search::{Decision, PathKind, SearchConfig, SearchOutcome};
pub use state::{
    Body, Cell, Food, FoodKind, InitializationError, Obstacle, OccupiedIndex, World,
    WorldChanges, WorldParts, WorldSnapshot,
};
