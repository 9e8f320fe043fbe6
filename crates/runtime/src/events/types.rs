//! Event types for different topics.

use game_core::{Decision, StepEvent, StepOutcome};
use serde::{Deserialize, Serialize};

/// Published after every processed tick; this is the reward channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TickEvent {
    /// World tick after this step.
    pub tick: u64,
    /// Zero-based episode the tick belongs to.
    pub episode: u64,
    pub decision: Decision,
    pub outcome: StepOutcome,
    pub body_len: usize,
}

/// Published once per finished episode (the agent died).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpisodeEvent {
    pub episode: u64,
    /// Ticks the episode lasted.
    pub ticks: u64,
    /// Sum of rewards over the episode.
    pub reward: f64,
    /// Longest body reached during the episode.
    pub best_length: usize,
    /// What ended it.
    pub cause: StepEvent,
}
