//! Authoritative world state.
//!
//! This module owns the data structures that describe the body, obstacles,
//! food and the occupied-cell index, plus the seeded placement helpers. Runtime
//! layers take [`WorldSnapshot`]s or query predicates, but mutate the world
//! exclusively through the engine.
pub mod delta;
pub mod types;

mod error;
mod snapshot;
mod spawn;

use std::collections::HashSet;

use crate::action::Heading;
use crate::config::GameConfig;
use crate::env::SpawnRng;

pub use delta::WorldChanges;
pub use error::InitializationError;
pub use snapshot::WorldSnapshot;
pub use types::{Body, Cell, Food, FoodKind, Obstacle, OccupiedIndex};

/// Explicit cell layout for building a world without sampling.
///
/// Used by scripted scenarios and tests. Cells are taken as given: food may
/// even sit outside the grid so edge-case priorities can be exercised.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WorldParts {
    /// Body cells, head first.
    pub body: Vec<Cell>,
    pub obstacles: Vec<Vec<Cell>>,
    pub goal: Cell,
    pub hazard: Cell,
    /// Seed for every later relocation and reset.
    pub seed: u64,
}

/// One game session's state. Constructed and owned by the caller.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct World {
    pub(crate) config: GameConfig,
    pub(crate) body: Body,
    pub(crate) heading: Heading,
    pub(crate) obstacles: Vec<Obstacle>,
    pub(crate) obstacle_cells: HashSet<Cell>,
    pub(crate) goal: Food,
    pub(crate) hazard: Food,
    pub(crate) occupied: OccupiedIndex,
    pub(crate) dead: bool,
    pub(crate) last_reward: f32,
    /// Ticks processed since creation, across resets.
    pub(crate) tick: u64,
    /// Non-fatal ticks since the hazard last moved.
    pub(crate) hazard_age: u64,
    pub(crate) rng: SpawnRng,
}

impl World {
    /// Samples a fresh world: obstacles first, then the body, then the goal
    /// and hazard. Any placement failure aborts creation.
    pub fn generate(config: GameConfig, seed: u64) -> Result<Self, InitializationError> {
        config.validate()?;

        let mut rng = SpawnRng::new(seed);
        let mut occupied = OccupiedIndex::new();

        let obstacles = spawn::place_obstacles(&config, &mut occupied, &mut rng)?;
        let body = spawn::spawn_body(config.grid_size, config.body_length, &mut occupied, &mut rng)?;
        let goal = spawn::spawn_food(FoodKind::Goal, config.grid_size, &mut occupied, &mut rng)?;
        let hazard =
            spawn::spawn_food(FoodKind::Hazard, config.grid_size, &mut occupied, &mut rng)?;

        let obstacle_cells = merge_obstacles(&obstacles);

        tracing::debug!(
            seed,
            grid_size = config.grid_size,
            obstacles = obstacles.len(),
            head = %body.head(),
            goal = %goal,
            hazard = %hazard,
            "world generated"
        );

        Ok(Self {
            config,
            body,
            heading: Heading::Stationary,
            obstacles,
            obstacle_cells,
            goal: Food::new(FoodKind::Goal, goal),
            hazard: Food::new(FoodKind::Hazard, hazard),
            occupied,
            dead: false,
            last_reward: 0.0,
            tick: 0,
            hazard_age: 0,
            rng,
        })
    }

    /// Builds a world from explicit cells, registering each one in the
    /// occupied index.
    pub fn from_parts(config: GameConfig, parts: WorldParts) -> Result<Self, InitializationError> {
        let body = Body::from_segments(parts.body).ok_or(InitializationError::InvalidConfig(
            "body must have at least one segment",
        ))?;
        let obstacles: Vec<Obstacle> = parts.obstacles.into_iter().map(Obstacle::new).collect();
        let obstacle_cells = merge_obstacles(&obstacles);

        let mut occupied = OccupiedIndex::new();
        occupied.extend(body.iter());
        occupied.extend(obstacle_cells.iter().copied());
        occupied.insert(parts.goal);
        occupied.insert(parts.hazard);

        Ok(Self {
            config,
            body,
            heading: Heading::Stationary,
            obstacles,
            obstacle_cells,
            goal: Food::new(FoodKind::Goal, parts.goal),
            hazard: Food::new(FoodKind::Hazard, parts.hazard),
            occupied,
            dead: false,
            last_reward: 0.0,
            tick: 0,
            hazard_age: 0,
            rng: SpawnRng::new(parts.seed),
        })
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn grid_size(&self) -> i32 {
        self.config.grid_size
    }

    pub fn body(&self) -> &Body {
        &self.body
    }

    pub fn head(&self) -> Cell {
        self.body.head()
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    pub fn goal(&self) -> Cell {
        self.goal.cell
    }

    pub fn hazard(&self) -> Cell {
        self.hazard.cell
    }

    pub fn food(&self, kind: FoodKind) -> Food {
        match kind {
            FoodKind::Goal => self.goal,
            FoodKind::Hazard => self.hazard,
        }
    }

    pub fn occupied(&self) -> &OccupiedIndex {
        &self.occupied
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn last_reward(&self) -> f32 {
        self.last_reward
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn hazard_age(&self) -> u64 {
        self.hazard_age
    }

    pub fn seed(&self) -> u64 {
        self.rng.game_seed()
    }

    // ========================================================================
    // Predicates
    // ========================================================================

    /// Anything outside `[0, N)²`.
    pub fn is_wall(&self, cell: Cell) -> bool {
        !cell.in_bounds(self.config.grid_size)
    }

    pub fn is_obstacle(&self, cell: Cell) -> bool {
        self.obstacle_cells.contains(&cell)
    }

    pub fn is_body(&self, cell: Cell) -> bool {
        self.body.contains(cell)
    }

    pub fn is_hazard(&self, cell: Cell) -> bool {
        self.hazard.cell == cell
    }

    pub fn is_goal(&self, cell: Cell) -> bool {
        self.goal.cell == cell
    }

    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.occupied.contains(cell)
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        WorldSnapshot {
            grid_size: self.config.grid_size,
            head: self.body.head(),
            body: self.body.to_vec(),
            goal: self.goal.cell,
            hazard: self.hazard.cell,
            obstacles: self.obstacles.iter().map(|o| o.cells().to_vec()).collect(),
            obstacle_cells: self.obstacle_cells.clone(),
            heading: self.heading,
        }
    }

    // ========================================================================
    // Lifecycle
    // ========================================================================

    /// Respawns the body and both food items in place, keeping obstacles.
    ///
    /// Clears death, heading and the hazard timer. The tick counter and RNG
    /// sequence carry on so consecutive episodes differ.
    pub fn reset(&mut self) -> Result<(), InitializationError> {
        // Sample against a scratch index so a failed respawn leaves the world
        // untouched.
        let mut occupied = self.occupied.clone();
        for cell in self.body.iter() {
            occupied.remove(cell);
        }
        occupied.remove(self.goal.cell);
        occupied.remove(self.hazard.cell);

        let grid_size = self.config.grid_size;
        let body = spawn::spawn_body(
            grid_size,
            self.config.body_length,
            &mut occupied,
            &mut self.rng,
        )?;
        let goal = spawn::spawn_food(FoodKind::Goal, grid_size, &mut occupied, &mut self.rng)?;
        let hazard = spawn::spawn_food(FoodKind::Hazard, grid_size, &mut occupied, &mut self.rng)?;

        self.occupied = occupied;
        self.body = body;
        self.goal.cell = goal;
        self.hazard.cell = hazard;
        self.heading = Heading::Stationary;
        self.dead = false;
        self.last_reward = 0.0;
        self.hazard_age = 0;

        tracing::debug!(head = %self.body.head(), goal = %self.goal.cell, "world reset");
        Ok(())
    }

    /// Moves a food item to a random free cell.
    ///
    /// The old cell leaves the occupied index unless the body or an obstacle
    /// still covers it. Returns false, leaving the food where it is, when the
    /// grid has no free cell.
    pub(crate) fn relocate_food(&mut self, kind: FoodKind) -> bool {
        let old = self.food(kind).cell;
        let free = self.occupied.free_cells(self.config.grid_size);
        let Some(&cell) = self.rng.choose(&free, SpawnRng::CONTEXT_FOOD) else {
            tracing::warn!(%kind, cell = %old, "no free cell to relocate food");
            return false;
        };

        self.occupied.insert(cell);
        let other = match kind {
            FoodKind::Goal => self.hazard.cell,
            FoodKind::Hazard => self.goal.cell,
        };
        if !self.body.contains(old) && !self.obstacle_cells.contains(&old) && other != old {
            self.occupied.remove(old);
        }
        match kind {
            FoodKind::Goal => self.goal.cell = cell,
            FoodKind::Hazard => self.hazard.cell = cell,
        }
        true
    }
}

fn merge_obstacles(obstacles: &[Obstacle]) -> HashSet<Cell> {
    obstacles
        .iter()
        .flat_map(|o| o.cells().iter().copied())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index_matches_entities(world: &World) -> bool {
        let mut expected: HashSet<Cell> = world.body.iter().collect();
        expected.extend(world.obstacle_cells.iter().copied());
        expected.insert(world.goal.cell);
        expected.insert(world.hazard.cell);
        expected.len() == world.occupied.len() && expected.iter().all(|c| world.is_occupied(*c))
    }

    #[test]
    fn generated_world_is_consistent() {
        let world = World::generate(GameConfig::new(), 2024).unwrap();
        assert_eq!(world.body().len(), GameConfig::DEFAULT_BODY_LENGTH);
        assert!(world.body().is_well_formed());
        assert_eq!(world.obstacles().len(), GameConfig::DEFAULT_OBSTACLE_COUNT);
        assert_ne!(world.goal(), world.hazard());
        assert!(!world.is_body(world.goal()));
        assert!(!world.is_obstacle(world.goal()));
        assert!(index_matches_entities(&world));
        assert!(world.heading().is_stationary());
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        let a = World::generate(GameConfig::new(), 77).unwrap();
        let b = World::generate(GameConfig::new(), 77).unwrap();
        assert_eq!(a.snapshot(), b.snapshot());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let err = World::generate(GameConfig::open_arena(1), 0).unwrap_err();
        assert!(matches!(err, InitializationError::InvalidConfig(_)));
    }

    #[test]
    fn predicates_follow_parts() {
        let world = World::from_parts(
            GameConfig::open_arena(10),
            WorldParts {
                body: vec![Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)],
                obstacles: vec![vec![Cell::new(0, 0), Cell::new(0, 1)]],
                goal: Cell::new(5, 2),
                hazard: Cell::new(8, 8),
                seed: 1,
            },
        )
        .unwrap();

        assert!(world.is_wall(Cell::new(-1, 3)));
        assert!(world.is_wall(Cell::new(10, 0)));
        assert!(!world.is_wall(Cell::new(9, 9)));
        assert!(world.is_obstacle(Cell::new(0, 1)));
        assert!(world.is_body(Cell::new(4, 5)));
        assert!(world.is_goal(Cell::new(5, 2)));
        assert!(world.is_hazard(Cell::new(8, 8)));
        assert!(index_matches_entities(&world));

        let snapshot = world.snapshot();
        assert_eq!(snapshot.head, Cell::new(5, 5));
        assert_eq!(snapshot.neck(), Some(Cell::new(4, 5)));
        assert!(snapshot.is_blocked(Cell::new(0, 0)));
    }

    #[test]
    fn empty_body_parts_are_rejected() {
        let err = World::from_parts(
            GameConfig::open_arena(5),
            WorldParts {
                body: Vec::new(),
                obstacles: Vec::new(),
                goal: Cell::new(1, 1),
                hazard: Cell::new(2, 2),
                seed: 0,
            },
        )
        .unwrap_err();
        assert!(matches!(err, InitializationError::InvalidConfig(_)));
    }

    #[test]
    fn relocation_moves_food_to_a_free_cell() {
        let mut world = World::generate(GameConfig::open_arena(8), 9).unwrap();
        let old = world.goal();
        assert!(world.relocate_food(FoodKind::Goal));
        assert_ne!(world.goal(), old);
        assert!(!world.is_occupied(old));
        assert!(index_matches_entities(&world));
    }

    #[test]
    fn reset_keeps_obstacles_and_index() {
        let mut world = World::generate(GameConfig::new(), 5).unwrap();
        let obstacles = world.obstacles().to_vec();
        world.dead = true;
        world.heading = Heading::Moving(crate::CardinalDirection::East);
        world.reset().unwrap();

        assert_eq!(world.obstacles(), obstacles.as_slice());
        assert!(!world.is_dead());
        assert!(world.heading().is_stationary());
        assert_eq!(world.body().len(), GameConfig::DEFAULT_BODY_LENGTH);
        assert!(index_matches_entities(&world));
    }

    #[test]
    fn failed_reset_leaves_world_untouched() {
        // A wall down column 2 leaves no free run of three cells, so a
        // full-length body cannot respawn.
        let wall: Vec<Cell> = (0..4).map(|y| Cell::new(2, y)).collect();
        let mut world = World::from_parts(
            GameConfig::open_arena(4),
            WorldParts {
                body: vec![Cell::new(1, 0), Cell::new(0, 0)],
                obstacles: vec![wall],
                goal: Cell::new(0, 2),
                hazard: Cell::new(3, 3),
                seed: 4,
            },
        )
        .unwrap();
        world.dead = true;
        let before = world.snapshot();

        let err = world.reset().unwrap_err();
        assert!(matches!(err, InitializationError::NoBodySpawn { .. }));
        assert_eq!(world.snapshot(), before);
        assert!(world.is_dead());
        assert!(index_matches_entities(&world));
    }
}
