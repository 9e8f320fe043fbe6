//! Asynchronous abstraction for sourcing the agent's next move.
//!
//! Runtime users plug in [`DirectionProvider`] implementations so the session
//! can run with the search agent, scripted fixtures, or an external policy.
use async_trait::async_trait;
use game_core::{Decision, WorldSnapshot};

use super::errors::Result;

/// Trait for choosing a move from the current world snapshot.
///
/// Different implementations can handle:
/// - The pathfinding agent
/// - Scripted/replayed directions
/// - Testing fixtures
#[async_trait]
pub trait DirectionProvider: Send {
    /// Decide the move for the coming tick.
    ///
    /// Returning [`Decision::Trapped`] makes the runtime concede the episode.
    async fn provide_decision(&mut self, snapshot: &WorldSnapshot) -> Result<Decision>;

    /// Short label for logs and errors.
    fn name(&self) -> &'static str;
}
