//! Headless snake client binary.
//!
//! Loads `.env`, reads [`config::ClientConfig`] from the environment, sets up
//! logging and runs the search agent for the configured number of ticks or
//! episodes, then logs a session summary.
//!
//! # Examples
//!
//! ```bash
//! SNAKE_GRID_SIZE=20 SNAKE_SEED=7 SNAKE_MAX_EPISODES=10 cargo run -p snake-client
//! ```

mod config;
mod logging;

use anyhow::{Context, Result};
use tokio::sync::broadcast::error::TryRecvError;

use config::ClientConfig;
use runtime::{Event, Runtime, Topic};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    // 1. Load configuration from environment
    let config = ClientConfig::from_env();

    // 2. Setup logging
    let session_id = logging::setup_logging(config.session_id.as_deref(), config.log_dir.as_deref())?;

    let seed = config
        .seed
        .unwrap_or_else(|| chrono::Utc::now().timestamp_millis().unsigned_abs());

    tracing::info!("Starting snake client");
    tracing::info!("Session ID: {}", session_id);
    tracing::info!(
        seed,
        grid_size = config.game.grid_size,
        obstacles = config.game.obstacle_count,
        max_ticks = ?config.max_ticks,
        max_episodes = ?config.max_episodes,
        "configuration loaded"
    );

    // 3. Build runtime
    let mut runtime = Runtime::builder()
        .config(config.runtime_config(seed))
        .build()
        .context("failed to build runtime")?;
    if !runtime.config().is_bounded() {
        tracing::warn!("no tick or episode limit set; running until interrupted");
    }
    let mut episodes = runtime.subscribe(Topic::Episode);

    // 4. Run session
    let stats = match runtime.run().await {
        Ok(stats) => stats,
        Err(err) => {
            tracing::error!(
                severity = err.severity().as_str(),
                tick = runtime.world().tick(),
                "session aborted: {err}"
            );
            return Err(err).context("session aborted");
        }
    };

    // 5. Summarize finished episodes
    let mut longest_episode = 0;
    let mut skipped = 0;
    loop {
        match episodes.try_recv() {
            Ok(Event::Episode(episode)) => longest_episode = longest_episode.max(episode.ticks),
            Ok(_) => {}
            Err(TryRecvError::Lagged(n)) => skipped += n,
            Err(_) => break,
        }
    }
    if skipped > 0 {
        tracing::debug!(skipped, "older episode events dropped from the summary");
    }

    tracing::info!(
        ticks = stats.ticks,
        episodes = stats.episodes_completed,
        high_score = stats.high_score,
        goals = stats.goals_eaten,
        hazards = stats.hazards_eaten,
        mean_reward = stats.mean_reward(),
        longest_episode,
        "session complete"
    );
    Ok(())
}
