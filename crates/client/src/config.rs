//! Headless client configuration structures and loaders.
use std::env;
use std::path::PathBuf;

use game_core::{GameConfig, SearchConfig};
use runtime::RuntimeConfig;

/// Configuration required to bootstrap a headless session.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    pub game: GameConfig,
    pub search: SearchConfig,
    /// World seed; a clock-derived seed is used when unset.
    pub seed: Option<u64>,
    /// `None` runs without a tick limit.
    pub max_ticks: Option<u64>,
    pub max_episodes: Option<u64>,
    pub session_id: Option<String>,
    pub log_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            game: GameConfig::default(),
            search: SearchConfig::default(),
            seed: None,
            max_ticks: Some(Self::DEFAULT_MAX_TICKS),
            max_episodes: None,
            session_id: None,
            log_dir: None,
        }
    }
}

impl ClientConfig {
    pub const DEFAULT_MAX_TICKS: u64 = 10_000;

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `SNAKE_GRID_SIZE` - Grid side length (default: 30)
    /// - `SNAKE_SEED` - World seed (default: derived from the clock)
    /// - `SNAKE_MAX_TICKS` - Tick limit, 0 for none (default: 10000)
    /// - `SNAKE_MAX_EPISODES` - Episode limit (default: none)
    /// - `SNAKE_OBSTACLES` - Obstacle cluster count (default: 7)
    /// - `SNAKE_OBSTACLE_BLOCKS` - Cells per cluster (default: 10)
    /// - `SNAKE_HEURISTIC_WEIGHT` - Manhattan weight in the search (default: 1.0)
    /// - `SNAKE_REWARD_SHAPING` - Distance-based reward shaping (default: true)
    /// - `SNAKE_SESSION_ID` - Session identifier for logs (default: timestamped)
    /// - `SNAKE_LOG_DIR` - Log root directory (default: platform cache dir)
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(size) = parse::<i32>(lookup("SNAKE_GRID_SIZE")) {
            config.game.grid_size = size;
        }
        config.seed = parse::<u64>(lookup("SNAKE_SEED"));

        if let Some(ticks) = parse::<u64>(lookup("SNAKE_MAX_TICKS")) {
            config.max_ticks = (ticks > 0).then_some(ticks);
        }
        config.max_episodes = parse::<u64>(lookup("SNAKE_MAX_EPISODES")).filter(|n| *n > 0);

        if let Some(count) = parse::<usize>(lookup("SNAKE_OBSTACLES")) {
            config.game.obstacle_count = count;
        }
        if let Some(blocks) = parse::<usize>(lookup("SNAKE_OBSTACLE_BLOCKS")) {
            config.game.obstacle_blocks = blocks.max(1);
        }
        if let Some(weight) = parse::<f64>(lookup("SNAKE_HEURISTIC_WEIGHT")) {
            config.search = config.search.with_heuristic_weight(weight);
        }
        if let Some(enabled) = parse::<bool>(lookup("SNAKE_REWARD_SHAPING")) {
            config.game.reward_shaping = enabled;
        }

        config.session_id = lookup("SNAKE_SESSION_ID").filter(|id| !id.is_empty());
        config.log_dir = lookup("SNAKE_LOG_DIR").map(PathBuf::from);

        config
    }

    /// Runtime settings for this session.
    pub fn runtime_config(&self, seed: u64) -> RuntimeConfig {
        RuntimeConfig {
            game_config: self.game.clone(),
            search_config: self.search.clone(),
            seed,
            max_ticks: self.max_ticks,
            max_episodes: self.max_episodes,
            ..RuntimeConfig::default()
        }
    }
}

fn parse<T>(value: Option<String>) -> Option<T>
where
    T: std::str::FromStr,
{
    value?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> ClientConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ClientConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_variables() {
        let c = config(&[]);
        assert_eq!(c.game, GameConfig::default());
        assert_eq!(c.max_ticks, Some(ClientConfig::DEFAULT_MAX_TICKS));
        assert_eq!(c.seed, None);
        assert!(c.session_id.is_none());
    }

    #[test]
    fn variables_override_defaults() {
        let c = config(&[
            ("SNAKE_GRID_SIZE", "12"),
            ("SNAKE_SEED", "42"),
            ("SNAKE_MAX_TICKS", "0"),
            ("SNAKE_MAX_EPISODES", "5"),
            ("SNAKE_OBSTACLES", "2"),
            ("SNAKE_OBSTACLE_BLOCKS", "4"),
            ("SNAKE_HEURISTIC_WEIGHT", "1.5"),
            ("SNAKE_REWARD_SHAPING", "false"),
            ("SNAKE_SESSION_ID", "bench"),
        ]);
        assert_eq!(c.game.grid_size, 12);
        assert_eq!(c.seed, Some(42));
        assert_eq!(c.max_ticks, None);
        assert_eq!(c.max_episodes, Some(5));
        assert_eq!(c.game.obstacle_count, 2);
        assert_eq!(c.game.obstacle_blocks, 4);
        assert_eq!(c.search.heuristic_weight, 1.5);
        assert!(!c.game.reward_shaping);
        assert_eq!(c.session_id.as_deref(), Some("bench"));

        let runtime = c.runtime_config(42);
        assert_eq!(runtime.seed, 42);
        assert_eq!(runtime.max_episodes, Some(5));
    }

    #[test]
    fn malformed_values_are_ignored() {
        let c = config(&[("SNAKE_GRID_SIZE", "huge"), ("SNAKE_SEED", "-1")]);
        assert_eq!(c.game.grid_size, GameConfig::DEFAULT_GRID_SIZE);
        assert_eq!(c.seed, None);
    }
}
