//! Public runtime API surface.
//!
//! This module gathers the types exposed to consumers of the runtime crate so
//! the orchestrator and providers can stay focused on their own jobs.

pub mod errors;
pub mod providers;

pub use errors::{Result, RuntimeError};
pub use providers::DirectionProvider;
