//! Seeded placement of obstacles, body and food.
//!
//! All samplers read free cells from the [`OccupiedIndex`] and register what
//! they place before returning, so consecutive placements never overlap.

use crate::config::GameConfig;
use crate::env::SpawnRng;
use crate::state::{Body, Cell, FoodKind, InitializationError, Obstacle, OccupiedIndex};

/// Places `config.obstacle_count` clusters of `config.obstacle_blocks` cells.
///
/// Each cluster starts from a free cell at least `obstacle_min_separation`
/// (Euclidean) away from every cell of the clusters placed before it, found by
/// rejection sampling with `obstacle_attempts` tries. The cluster then grows by
/// one random free in-bounds cell adjacent to it at a time.
pub fn place_obstacles(
    config: &GameConfig,
    occupied: &mut OccupiedIndex,
    rng: &mut SpawnRng,
) -> Result<Vec<Obstacle>, InitializationError> {
    let mut obstacles: Vec<Obstacle> = Vec::with_capacity(config.obstacle_count);

    for cluster in 0..config.obstacle_count {
        let seed = separated_seed(config, occupied, rng, &obstacles, cluster)?;
        occupied.insert(seed);
        let mut blocks = vec![seed];

        while blocks.len() < config.obstacle_blocks {
            let candidates = adjacent_free_cells(&blocks, occupied, config.grid_size);
            let Some(&next) = rng.choose(&candidates, SpawnRng::CONTEXT_OBSTACLE) else {
                return Err(InitializationError::ObstacleGrowth {
                    cluster,
                    placed: blocks.len(),
                    wanted: config.obstacle_blocks,
                });
            };
            occupied.insert(next);
            blocks.push(next);
        }

        obstacles.push(Obstacle::new(blocks));
    }

    Ok(obstacles)
}

fn separated_seed(
    config: &GameConfig,
    occupied: &OccupiedIndex,
    rng: &mut SpawnRng,
    existing: &[Obstacle],
    cluster: usize,
) -> Result<Cell, InitializationError> {
    let free = occupied.free_cells(config.grid_size);
    for _ in 0..config.obstacle_attempts {
        let Some(&candidate) = rng.choose(&free, SpawnRng::CONTEXT_OBSTACLE) else {
            break;
        };
        let far_enough = existing
            .iter()
            .flat_map(|obstacle| obstacle.cells().iter())
            .all(|block| candidate.euclidean(*block) >= config.obstacle_min_separation);
        if far_enough {
            return Ok(candidate);
        }
    }

    tracing::warn!(
        cluster,
        attempts = config.obstacle_attempts,
        "obstacle separation budget exhausted"
    );
    Err(InitializationError::ObstacleSeparation {
        cluster,
        min_separation: config.obstacle_min_separation,
        attempts: config.obstacle_attempts,
    })
}

/// Free in-bounds cells 4-adjacent to any block, deduplicated, in discovery order.
fn adjacent_free_cells(blocks: &[Cell], occupied: &OccupiedIndex, grid_size: i32) -> Vec<Cell> {
    let mut candidates = Vec::new();
    for block in blocks {
        for next in block.neighbors() {
            if next.in_bounds(grid_size) && !occupied.contains(next) && !candidates.contains(&next)
            {
                candidates.push(next);
            }
        }
    }
    candidates
}

/// Samples a straight horizontal body of `length` cells on free ground.
pub fn spawn_body(
    grid_size: i32,
    length: usize,
    occupied: &mut OccupiedIndex,
    rng: &mut SpawnRng,
) -> Result<Body, InitializationError> {
    let starts: Vec<Cell> = (0..grid_size)
        .flat_map(|y| (0..grid_size).map(move |x| Cell::new(x, y)))
        .filter(|head| {
            (0..length as i32)
                .map(|i| Cell::new(head.x - i, head.y))
                .all(|cell| cell.in_bounds(grid_size) && !occupied.contains(cell))
        })
        .collect();

    let head = *rng
        .choose(&starts, SpawnRng::CONTEXT_BODY)
        .ok_or(InitializationError::NoBodySpawn { length })?;
    let body = Body::horizontal(head, length).ok_or(InitializationError::NoBodySpawn { length })?;
    occupied.extend(body.iter());
    Ok(body)
}

/// Samples one free cell for a food item and registers it.
pub fn spawn_food(
    kind: FoodKind,
    grid_size: i32,
    occupied: &mut OccupiedIndex,
    rng: &mut SpawnRng,
) -> Result<Cell, InitializationError> {
    let free = occupied.free_cells(grid_size);
    let cell = *rng
        .choose(&free, SpawnRng::CONTEXT_FOOD)
        .ok_or(InitializationError::NoFoodSpawn { kind })?;
    occupied.insert(cell);
    Ok(cell)
}
