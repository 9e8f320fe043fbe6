//! Direction provider implementations.

pub mod scripted;
pub mod search;

pub use scripted::ScriptedProvider;
pub use search::SearchProvider;
