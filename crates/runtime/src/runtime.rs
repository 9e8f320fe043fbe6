//! High-level runtime orchestrator.
//!
//! The runtime owns the world, asks its direction provider for a decision
//! every tick, applies it through the engine and publishes the outcome. A dead
//! world is reset at the start of the following tick, so callers observe the
//! terminal tick before the respawn.

use tokio::sync::broadcast;

use game_core::{Decision, GameConfig, GameEngine, Heading, SearchConfig, StepOutcome, World};

use crate::api::{DirectionProvider, Result, RuntimeError};
use crate::events::{EpisodeEvent, Event, EventBus, TickEvent, Topic};
use crate::providers::SearchProvider;

/// Runtime configuration shared across the orchestrator and providers.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub game_config: GameConfig,
    pub search_config: SearchConfig,
    /// Seeds world generation and the default provider's random fallback.
    pub seed: u64,
    /// Stop [`Runtime::run`] after this many ticks.
    pub max_ticks: Option<u64>,
    /// Stop [`Runtime::run`] after this many finished episodes.
    pub max_episodes: Option<u64>,
    pub event_buffer_size: usize,
}

impl RuntimeConfig {
    /// `run` with neither limit never returns on its own.
    pub fn is_bounded(&self) -> bool {
        self.max_ticks.is_some() || self.max_episodes.is_some()
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            game_config: GameConfig::default(),
            search_config: SearchConfig::default(),
            seed: 0,
            max_ticks: Some(10_000),
            max_episodes: None,
            event_buffer_size: 100,
        }
    }
}

/// Running totals for one session.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionStats {
    /// Ticks processed, idle and terminal ones included.
    pub ticks: u64,
    pub episodes_completed: u64,
    /// Current body length; the on-screen score.
    pub score: usize,
    /// Longest body seen in any episode.
    pub high_score: usize,
    pub goals_eaten: u64,
    pub hazards_eaten: u64,
    pub total_reward: f64,
    episode_ticks: u64,
    episode_reward: f64,
    episode_best: usize,
}

impl SessionStats {
    fn begin_episode(&mut self, body_len: usize) {
        self.episode_ticks = 0;
        self.episode_reward = 0.0;
        self.episode_best = body_len;
        self.score = body_len;
        self.high_score = self.high_score.max(body_len);
    }

    fn record(&mut self, outcome: &StepOutcome, body_len: usize) {
        self.ticks += 1;
        self.episode_ticks += 1;
        self.total_reward += f64::from(outcome.reward);
        self.episode_reward += f64::from(outcome.reward);
        self.score = body_len;
        self.episode_best = self.episode_best.max(body_len);
        self.high_score = self.high_score.max(body_len);
        match outcome.event {
            game_core::StepEvent::AteGoal => self.goals_eaten += 1,
            game_core::StepEvent::AteHazard => self.hazards_eaten += 1,
            _ => {}
        }
    }

    fn finish_episode(&mut self, episode: u64, outcome: &StepOutcome) -> EpisodeEvent {
        self.episodes_completed += 1;
        EpisodeEvent {
            episode,
            ticks: self.episode_ticks,
            reward: self.episode_reward,
            best_length: self.episode_best,
            cause: outcome.event,
        }
    }

    /// Mean reward per processed tick.
    pub fn mean_reward(&self) -> f64 {
        if self.ticks == 0 {
            0.0
        } else {
            self.total_reward / self.ticks as f64
        }
    }
}

/// Main runtime that drives one game session tick by tick.
pub struct Runtime {
    config: RuntimeConfig,
    world: World,
    provider: Box<dyn DirectionProvider>,
    events: EventBus,
    stats: SessionStats,
    episode: u64,
}

impl Runtime {
    /// Create a new runtime builder
    pub fn builder() -> RuntimeBuilder {
        RuntimeBuilder::new()
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Read-only view of the live world, for inspection between ticks.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Zero-based index of the current episode.
    pub fn episode(&self) -> u64 {
        self.episode
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Subscribe to runtime events on one topic
    pub fn subscribe(&self, topic: Topic) -> broadcast::Receiver<Event> {
        self.events.subscribe(topic)
    }

    /// Replace the direction provider
    pub fn set_provider(&mut self, provider: impl DirectionProvider + 'static) {
        self.provider = Box::new(provider);
    }

    /// Execute a single tick: reset if needed, decide, move, publish.
    pub async fn step(&mut self) -> Result<TickEvent> {
        if self.world.is_dead() {
            self.world.reset()?;
            self.episode += 1;
            self.stats.begin_episode(self.world.body().len());
            tracing::info!(
                episode = self.episode,
                head = %self.world.head(),
                "episode started"
            );
        }

        let snapshot = self.world.snapshot();
        let decision = self.provider.provide_decision(&snapshot).await?;

        let mut engine = GameEngine::new(&mut self.world);
        let outcome = match decision {
            Decision::Step(direction) => engine.advance(Heading::Moving(direction))?,
            Decision::Trapped => {
                tracing::warn!(
                    head = %snapshot.head,
                    provider = self.provider.name(),
                    "no safe direction; conceding"
                );
                engine.concede()?
            }
        };

        let body_len = self.world.body().len();
        self.stats.record(&outcome, body_len);

        let tick = TickEvent {
            tick: self.world.tick(),
            episode: self.episode,
            decision,
            outcome,
            body_len,
        };
        self.events.publish(Event::Tick(tick.clone()));

        if outcome.death {
            let finished = self.stats.finish_episode(self.episode, &outcome);
            tracing::info!(
                episode = finished.episode,
                ticks = finished.ticks,
                reward = finished.reward,
                best_length = finished.best_length,
                cause = %finished.cause,
                "episode finished"
            );
            self.events.publish(Event::Episode(finished));
        }

        Ok(tick)
    }

    /// Run until the configured tick or episode limit is reached.
    ///
    /// Without any limit this only returns on error.
    pub async fn run(&mut self) -> Result<SessionStats> {
        let start_ticks = self.stats.ticks;
        let start_episodes = self.stats.episodes_completed;

        loop {
            if let Some(limit) = self.config.max_ticks
                && self.stats.ticks - start_ticks >= limit
            {
                break;
            }
            if let Some(limit) = self.config.max_episodes
                && self.stats.episodes_completed - start_episodes >= limit
            {
                break;
            }
            self.step().await?;
        }

        tracing::info!(
            ticks = self.stats.ticks,
            episodes = self.stats.episodes_completed,
            high_score = self.stats.high_score,
            "run finished"
        );
        Ok(self.stats.clone())
    }
}

/// Builder for [`Runtime`] with flexible configuration.
pub struct RuntimeBuilder {
    config: RuntimeConfig,
    world: Option<World>,
    provider: Option<Box<dyn DirectionProvider>>,
}

impl RuntimeBuilder {
    fn new() -> Self {
        Self {
            config: RuntimeConfig::default(),
            world: None,
            provider: None,
        }
    }

    /// Override runtime configuration
    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Provide an initial world instead of generating one from the seed
    pub fn world(mut self, world: World) -> Self {
        self.world = Some(world);
        self
    }

    /// Set the direction provider (defaults to [`SearchProvider`])
    pub fn provider(mut self, provider: impl DirectionProvider + 'static) -> Self {
        self.provider = Some(Box::new(provider));
        self
    }

    /// Build the runtime, generating the world if none was supplied.
    pub fn build(self) -> Result<Runtime> {
        let RuntimeBuilder {
            config,
            world,
            provider,
        } = self;

        let world = match world {
            Some(world) => world,
            None => World::generate(config.game_config.clone(), config.seed)
                .map_err(RuntimeError::Initialization)?,
        };
        let provider = provider.unwrap_or_else(|| {
            Box::new(SearchProvider::new(
                config.search_config.clone(),
                config.seed,
            ))
        });

        let mut stats = SessionStats::default();
        stats.begin_episode(world.body().len());

        tracing::info!(
            seed = config.seed,
            grid_size = world.grid_size(),
            obstacles = world.obstacles().len(),
            provider = provider.name(),
            "runtime built"
        );

        Ok(Runtime {
            events: EventBus::with_capacity(config.event_buffer_size),
            config,
            world,
            provider,
            stats,
            episode: 0,
        })
    }
}
