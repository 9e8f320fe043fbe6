//! Topic-based event bus for runtime events.
//!
//! This module provides a flexible event system where events are published to
//! specific topics, and consumers can subscribe only to the topics they need.
//! Tick events carry the reward channel for external learners.

mod bus;
mod types;

pub use bus::{Event, EventBus, Topic};
pub use types::{EpisodeEvent, TickEvent};
