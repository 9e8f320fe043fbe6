//! Replays a fixed list of decisions.

use std::collections::VecDeque;

use async_trait::async_trait;

use game_core::{CardinalDirection, Decision, WorldSnapshot};

use crate::api::{DirectionProvider, Result, RuntimeError};

/// Hands out pre-recorded decisions in order, then fails with
/// [`RuntimeError::ProviderExhausted`].
#[derive(Debug, Clone, Default)]
pub struct ScriptedProvider {
    script: VecDeque<Decision>,
    served: u64,
}

impl ScriptedProvider {
    pub fn new(script: impl IntoIterator<Item = Decision>) -> Self {
        Self {
            script: script.into_iter().collect(),
            served: 0,
        }
    }

    pub fn from_directions(directions: impl IntoIterator<Item = CardinalDirection>) -> Self {
        Self::new(directions.into_iter().map(Decision::Step))
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

#[async_trait]
impl DirectionProvider for ScriptedProvider {
    async fn provide_decision(&mut self, _snapshot: &WorldSnapshot) -> Result<Decision> {
        let decision = self
            .script
            .pop_front()
            .ok_or(RuntimeError::ProviderExhausted {
                provider: "scripted",
                served: self.served,
            })?;
        self.served += 1;
        Ok(decision)
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}
