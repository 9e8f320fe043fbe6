//! Unified error types surfaced by the runtime API.
//!
//! Wraps failures from world initialization, the movement engine and direction
//! providers so clients can bubble them up with consistent context.
use thiserror::Error;

use game_core::{ErrorSeverity, GameError, InitializationError, MoveError};

pub type Result<T> = std::result::Result<T, RuntimeError>;

#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error("{provider} provider has no more directions after {served} ticks")]
    ProviderExhausted { provider: &'static str, served: u64 },

    #[error("failed to initialize the world")]
    Initialization(#[from] InitializationError),

    #[error("movement rejected")]
    Move(#[from] MoveError),
}

impl RuntimeError {
    /// Severity of the underlying failure, for log routing.
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            RuntimeError::ProviderExhausted { .. } => ErrorSeverity::Recoverable,
            RuntimeError::Initialization(err) => err.severity(),
            RuntimeError::Move(err) => err.severity(),
        }
    }
}
