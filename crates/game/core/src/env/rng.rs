//! RNG oracle for deterministic spawn sampling.
//!
//! Every random placement in the world (obstacle seeds and growth, body spawn,
//! food relocation) draws from a [`SpawnRng`]. Given the same seed the world
//! evolves identically, which is what makes scenario tests and replays work.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Generate a random value in range [min, max] inclusive.
    fn range(&self, seed: u64, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let range = max - min + 1;
        min + (self.next_u32(seed) % range)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// This implementation uses PCG-XSH-RR, which produces 32-bit output from
/// 64-bit state. It is stateless: the caller supplies the state as `seed`.
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    const MULTIPLIER: u64 = 6364136223846793005;
    const INCREMENT: u64 = 1442695040888963407;

    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// XSH-RR output permutation (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Compute a deterministic seed for one draw.
///
/// # Arguments
///
/// * `game_seed` - Base seed fixed when the world is created
/// * `nonce` - Draw sequence number (increments every draw)
/// * `context` - Which subsystem is drawing (see [`SpawnRng`] contexts)
pub fn compute_seed(game_seed: u64, nonce: u64, context: u32) -> u64 {
    // SplitMix64 / FxHash style mixing
    let mut hash = game_seed;
    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

/// Sequenced random source owned by the world.
///
/// Wraps a [`PcgRng`] with the world's seed and a draw counter so callers can
/// ask for "the next index" without threading seeds around.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpawnRng {
    game_seed: u64,
    nonce: u64,
}

impl SpawnRng {
    pub const CONTEXT_OBSTACLE: u32 = 1;
    pub const CONTEXT_BODY: u32 = 2;
    pub const CONTEXT_FOOD: u32 = 3;

    pub fn new(game_seed: u64) -> Self {
        Self {
            game_seed,
            nonce: 0,
        }
    }

    pub fn game_seed(&self) -> u64 {
        self.game_seed
    }

    /// Number of draws made so far.
    pub fn draws(&self) -> u64 {
        self.nonce
    }

    /// Uniform index in `[0, len)`. `len` must be non-zero.
    pub fn index(&mut self, len: usize, context: u32) -> usize {
        debug_assert!(len > 0, "cannot sample from an empty range");
        let seed = compute_seed(self.game_seed, self.nonce, context);
        self.nonce += 1;
        let upper = u32::try_from(len - 1).unwrap_or(u32::MAX);
        PcgRng.range(seed, 0, upper) as usize
    }

    /// Picks one element uniformly, or `None` for an empty slice.
    pub fn choose<'a, T>(&mut self, items: &'a [T], context: u32) -> Option<&'a T> {
        if items.is_empty() {
            return None;
        }
        let index = self.index(items.len(), context);
        items.get(index)
    }
}
