//! Runtime orchestration for the survival grid simulation.
//!
//! This crate wires together the direction provider abstraction, the event bus
//! and the session loop into a cohesive runtime API. Consumers embed
//! [`Runtime`] to drive ticks, subscribe to the reward channel, and run whole
//! sessions with automatic resets.
//!
//! Modules are organized by responsibility:
//! - [`runtime`] hosts the orchestrator and builder
//! - [`api`] exposes the types downstream clients interact with
//! - [`events`] provides topic-based event bus for flexible event routing
//! - [`providers`] holds the stock direction providers
pub mod api;
pub mod events;
pub mod providers;
pub mod runtime;

pub use api::{DirectionProvider, Result, RuntimeError};
pub use events::{EpisodeEvent, Event, EventBus, TickEvent, Topic};
pub use providers::{ScriptedProvider, SearchProvider};
pub use runtime::{Runtime, RuntimeBuilder, RuntimeConfig, SessionStats};
