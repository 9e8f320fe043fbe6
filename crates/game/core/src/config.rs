use crate::state::InitializationError;

/// Game configuration constants and tunable parameters.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GameConfig {
    /// Side length N of the square grid; cells live in `[0, N)²`.
    pub grid_size: i32,
    /// Number of segments the body spawns with.
    pub body_length: usize,
    /// The agent dies when a move would leave it shorter than this.
    pub min_body_length: usize,
    /// Number of obstacle clusters placed at world creation.
    pub obstacle_count: usize,
    /// Cells per obstacle cluster.
    pub obstacle_blocks: usize,
    /// Minimum Euclidean distance between a new cluster's seed cell and every
    /// cell of the clusters already placed.
    pub obstacle_min_separation: f64,
    /// Seed-cell samples tried per cluster before giving up.
    pub obstacle_attempts: u32,
    /// Ticks after which an uneaten hazard is moved elsewhere.
    pub hazard_relocate_ticks: u64,
    /// Enables the distance-based reward shaping on ordinary moves.
    pub reward_shaping: bool,
}

impl GameConfig {
    // ===== reward channel constants =====
    pub const GOAL_REWARD: f32 = 10.0;
    pub const HAZARD_REWARD: f32 = -10.0;
    pub const DEATH_REWARD: f32 = -100.0;
    pub const MOVE_REWARD: f32 = -1.0;
    pub const APPROACH_GOAL_BONUS: f32 = 3.0;
    pub const RETREAT_GOAL_PENALTY: f32 = -1.5;
    pub const APPROACH_HAZARD_PENALTY: f32 = -0.5;

    // ===== runtime-tunable defaults =====
    pub const DEFAULT_GRID_SIZE: i32 = 30;
    pub const DEFAULT_BODY_LENGTH: usize = 3;
    pub const DEFAULT_MIN_BODY_LENGTH: usize = 3;
    pub const DEFAULT_OBSTACLE_COUNT: usize = 7;
    pub const DEFAULT_OBSTACLE_BLOCKS: usize = 10;
    pub const DEFAULT_OBSTACLE_MIN_SEPARATION: f64 = 6.0;
    pub const DEFAULT_OBSTACLE_ATTEMPTS: u32 = 100;
    /// Twenty seconds at a 105 ms tick.
    pub const DEFAULT_HAZARD_RELOCATE_TICKS: u64 = 190;

    pub fn new() -> Self {
        Self {
            grid_size: Self::DEFAULT_GRID_SIZE,
            body_length: Self::DEFAULT_BODY_LENGTH,
            min_body_length: Self::DEFAULT_MIN_BODY_LENGTH,
            obstacle_count: Self::DEFAULT_OBSTACLE_COUNT,
            obstacle_blocks: Self::DEFAULT_OBSTACLE_BLOCKS,
            obstacle_min_separation: Self::DEFAULT_OBSTACLE_MIN_SEPARATION,
            obstacle_attempts: Self::DEFAULT_OBSTACLE_ATTEMPTS,
            hazard_relocate_ticks: Self::DEFAULT_HAZARD_RELOCATE_TICKS,
            reward_shaping: true,
        }
    }

    /// An empty arena: no obstacles, everything else at defaults.
    pub fn open_arena(grid_size: i32) -> Self {
        Self {
            grid_size,
            obstacle_count: 0,
            ..Self::new()
        }
    }

    pub fn with_grid_size(mut self, grid_size: i32) -> Self {
        self.grid_size = grid_size;
        self
    }

    pub fn with_obstacles(mut self, count: usize, blocks: usize) -> Self {
        self.obstacle_count = count;
        self.obstacle_blocks = blocks;
        self
    }

    pub fn with_reward_shaping(mut self, enabled: bool) -> Self {
        self.reward_shaping = enabled;
        self
    }

    /// Total number of cells on the grid.
    pub fn cell_count(&self) -> usize {
        (self.grid_size.max(0) as usize).pow(2)
    }

    /// Rejects configurations that can never produce a playable world.
    pub fn validate(&self) -> Result<(), InitializationError> {
        if self.grid_size < 2 {
            return Err(InitializationError::InvalidConfig("grid_size must be at least 2"));
        }
        if self.body_length == 0 {
            return Err(InitializationError::InvalidConfig("body_length must be positive"));
        }
        if self.body_length < self.min_body_length {
            return Err(InitializationError::InvalidConfig(
                "body_length must not be below min_body_length",
            ));
        }
        if self.body_length > self.grid_size as usize {
            return Err(InitializationError::InvalidConfig(
                "body_length must fit on a single grid row",
            ));
        }
        if self.obstacle_count > 0 && self.obstacle_blocks == 0 {
            return Err(InitializationError::InvalidConfig(
                "obstacle clusters need at least one block",
            ));
        }
        // Body, two food items and every obstacle cell must fit.
        let required = self.body_length + 2 + self.obstacle_count * self.obstacle_blocks;
        if required > self.cell_count() {
            return Err(InitializationError::InvalidConfig(
                "grid too small for body, food and obstacles",
            ));
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate() {
        assert!(GameConfig::new().validate().is_ok());
        assert!(GameConfig::open_arena(5).validate().is_ok());
    }

    #[test]
    fn body_shorter_than_minimum_is_rejected() {
        let config = GameConfig {
            body_length: 2,
            ..GameConfig::open_arena(10)
        };
        assert!(matches!(
            config.validate(),
            Err(InitializationError::InvalidConfig(_))
        ));

        let config = GameConfig {
            body_length: 2,
            min_body_length: 2,
            ..GameConfig::open_arena(10)
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn crowded_grid_is_rejected() {
        let config = GameConfig::new().with_grid_size(4).with_obstacles(2, 6);
        assert!(config.validate().is_err());
    }
}
