pub mod common;
pub mod entities;
pub mod world;

// Re-export common types
pub use common::Cell;

// Re-export entity types
pub use entities::{Body, Food, FoodKind, Obstacle};

// Re-export spawn bookkeeping
pub use world::OccupiedIndex;
