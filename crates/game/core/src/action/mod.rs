//! Action domain - what the agent can ask the world to do in one tick.
//!
//! The only action is a single-cell move. [`CardinalDirection`] is the closed
//! set of steps, [`Heading`] adds the stationary state a fresh body starts in,
//! and [`MoveError`] covers requests the movement engine refuses outright.
//! Ordinary collisions are not errors; they surface through
//! [`crate::StepOutcome`].

pub mod movement;

pub use movement::{CardinalDirection, Heading, MoveError};
