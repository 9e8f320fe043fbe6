//! Pathfinding agent.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use game_core::search;
use game_core::{Decision, SearchConfig, WorldSnapshot};

use crate::api::{DirectionProvider, Result};

/// Plans with [`search::plan`] every tick and follows the first step.
///
/// When the plan has no usable first step the provider picks uniformly among
/// the legal directions from its own seeded random source, and reports
/// [`Decision::Trapped`] when there are none.
#[derive(Debug, Clone)]
pub struct SearchProvider {
    config: SearchConfig,
    rng: StdRng,
}

impl SearchProvider {
    pub fn new(config: SearchConfig, seed: u64) -> Self {
        Self {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

#[async_trait]
impl DirectionProvider for SearchProvider {
    async fn provide_decision(&mut self, snapshot: &WorldSnapshot) -> Result<Decision> {
        let outcome = search::plan(snapshot, &self.config);

        let rng = &mut self.rng;
        let decision = search::decide(snapshot, &outcome.path, |n| rng.gen_range(0..n));

        tracing::debug!(
            head = %snapshot.head,
            goal = %snapshot.goal,
            kind = %outcome.kind,
            open_area = outcome.open_area,
            path_len = outcome.path.len(),
            ?decision,
            "search decision"
        );
        Ok(decision)
    }

    fn name(&self) -> &'static str {
        "search"
    }
}
