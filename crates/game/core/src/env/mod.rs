//! Environment services consumed by the world model.
//!
//! The world only needs one external service: a deterministic source of
//! randomness for spawn sampling. Keeping it behind [`RngOracle`] lets tests
//! and replays pin every placement to a seed.
mod rng;

pub use rng::{PcgRng, RngOracle, SpawnRng, compute_seed};
