//! Per-tick movement and reward pipeline.
//!
//! The [`GameEngine`] is the authoritative reducer for [`World`]. It resolves
//! one heading per call in a fixed priority order, applies grow, shrink or
//! slide mechanics, keeps the occupied index in sync and reports the reward
//! channel through [`StepOutcome`].

mod outcome;
mod rules;

pub use outcome::{StepEvent, StepOutcome};

use crate::action::{CardinalDirection, Heading, MoveError};
use crate::config::GameConfig;
use crate::state::{Cell, FoodKind, InitializationError, World, WorldChanges};

use rules::Resolution;

/// Game engine that advances the world one tick at a time.
///
/// Borrowing the world mutably for the engine's lifetime keeps every mutation
/// on this single path.
pub struct GameEngine<'a> {
    world: &'a mut World,
}

impl<'a> GameEngine<'a> {
    /// Creates a new game engine over the given world.
    pub fn new(world: &'a mut World) -> Self {
        Self { world }
    }

    /// Applies one heading.
    ///
    /// `Heading::Stationary` is an idle tick until the body first moves, and
    /// an error afterwards. A dead world rejects every call until reset.
    pub fn advance(&mut self, heading: Heading) -> Result<StepOutcome, MoveError> {
        if self.world.dead {
            return Err(MoveError::Dead);
        }

        let direction = match heading {
            Heading::Moving(direction) => direction,
            Heading::Stationary if self.world.heading.is_stationary() => {
                return Ok(self.idle());
            }
            Heading::Stationary => {
                return Err(MoveError::StationaryAfterStart {
                    head: self.world.head(),
                });
            }
        };

        let head = self.world.head();
        let candidate = head.step(direction);
        self.world.tick += 1;

        let outcome = match rules::classify(self.world, candidate) {
            Resolution::EatGoal => self.eat_goal(candidate),
            Resolution::EatHazard { shrink } => self.eat_hazard(candidate, shrink),
            Resolution::Move => self.slide(head, candidate),
            Resolution::Die(event) => self.die(event),
        };

        let outcome = if outcome.death {
            outcome
        } else {
            self.finish(outcome, direction)
        };

        self.world.last_reward = outcome.reward;
        tracing::trace!(
            tick = self.world.tick,
            %direction,
            event = %outcome.event,
            reward = outcome.reward,
            "tick resolved"
        );
        Ok(outcome)
    }

    /// Gives up: the caller found no safe direction.
    pub fn concede(&mut self) -> Result<StepOutcome, MoveError> {
        if self.world.dead {
            return Err(MoveError::Dead);
        }
        self.world.tick += 1;
        let outcome = self.die(StepEvent::Trapped);
        self.world.last_reward = outcome.reward;
        tracing::debug!(tick = self.world.tick, head = %self.world.head(), "agent conceded");
        Ok(outcome)
    }

    /// Respawns body and food; see [`World::reset`].
    pub fn reset(&mut self) -> Result<(), InitializationError> {
        self.world.reset()
    }

    // ========================================================================
    // Mechanics
    // ========================================================================

    fn idle(&mut self) -> StepOutcome {
        self.world.tick += 1;
        let changes = self.advance_hazard_timer(false);
        self.world.last_reward = 0.0;
        StepOutcome::new(StepEvent::Idle, 0.0, changes)
    }

    /// Growth: new head on the goal cell, tail retained.
    fn eat_goal(&mut self, candidate: Cell) -> StepOutcome {
        self.world.body.push_head(candidate);
        self.world.occupied.insert(candidate);
        self.world.relocate_food(FoodKind::Goal);
        StepOutcome::new(
            StepEvent::AteGoal,
            GameConfig::GOAL_REWARD,
            WorldChanges::BODY | WorldChanges::GOAL,
        )
    }

    /// Shrink: the tail goes and the head stays put. A single segment moves
    /// onto the hazard cell instead.
    fn eat_hazard(&mut self, candidate: Cell, shrink: bool) -> StepOutcome {
        if shrink {
            if let Some(tail) = self.world.body.pop_tail() {
                self.world.occupied.remove(tail);
            }
        } else {
            self.slide_body(candidate);
        }
        self.world.relocate_food(FoodKind::Hazard);
        StepOutcome::new(
            StepEvent::AteHazard,
            GameConfig::HAZARD_REWARD,
            WorldChanges::BODY | WorldChanges::HAZARD,
        )
    }

    fn slide(&mut self, head: Cell, candidate: Cell) -> StepOutcome {
        self.slide_body(candidate);
        let mut reward = GameConfig::MOVE_REWARD;
        if self.world.config.reward_shaping {
            reward += rules::shaping(head, candidate, self.world.goal.cell, self.world.hazard.cell);
        }
        StepOutcome::new(StepEvent::Moved, reward, WorldChanges::BODY)
    }

    fn slide_body(&mut self, candidate: Cell) {
        if let Some(tail) = self.world.body.slide_to(candidate) {
            self.world.occupied.remove(tail);
        }
        self.world.occupied.insert(candidate);
    }

    /// Death leaves the body exactly as it was.
    fn die(&mut self, event: StepEvent) -> StepOutcome {
        self.world.dead = true;
        tracing::debug!(%event, head = %self.world.head(), "agent died");
        StepOutcome::new(event, GameConfig::DEATH_REWARD, WorldChanges::empty())
    }

    /// Records the new heading and runs the hazard timer after a live tick.
    fn finish(&mut self, mut outcome: StepOutcome, direction: CardinalDirection) -> StepOutcome {
        let heading = Heading::Moving(direction);
        if self.world.heading != heading {
            self.world.heading = heading;
            outcome.changes |= WorldChanges::HEADING;
        }
        outcome.changes |= self.advance_hazard_timer(outcome.event == StepEvent::AteHazard);
        outcome
    }

    /// A zero interval disables timed relocation.
    fn advance_hazard_timer(&mut self, eaten: bool) -> WorldChanges {
        if eaten {
            self.world.hazard_age = 0;
            return WorldChanges::empty();
        }
        self.world.hazard_age += 1;
        let interval = self.world.config.hazard_relocate_ticks;
        if interval == 0 || self.world.hazard_age < interval {
            return WorldChanges::empty();
        }
        self.world.hazard_age = 0;
        if self.world.relocate_food(FoodKind::Hazard) {
            tracing::trace!(hazard = %self.world.hazard.cell, "hazard relocated on timer");
            WorldChanges::HAZARD
        } else {
            WorldChanges::empty()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::WorldParts;

    fn world(grid: i32, body: &[(i32, i32)], goal: (i32, i32), hazard: (i32, i32)) -> World {
        world_with(GameConfig::open_arena(grid), body, Vec::new(), goal, hazard)
    }

    fn world_with(
        config: GameConfig,
        body: &[(i32, i32)],
        obstacles: Vec<Vec<Cell>>,
        goal: (i32, i32),
        hazard: (i32, i32),
    ) -> World {
        World::from_parts(
            config,
            WorldParts {
                body: body.iter().map(|&c| Cell::from(c)).collect(),
                obstacles,
                goal: goal.into(),
                hazard: hazard.into(),
                seed: 17,
            },
        )
        .unwrap()
    }

    fn east() -> Heading {
        Heading::Moving(CardinalDirection::East)
    }

    fn index_is_in_sync(world: &World) -> bool {
        let mut cells: Vec<Cell> = world.body().iter().collect();
        cells.extend(world.obstacles().iter().flat_map(|o| o.cells().iter().copied()));
        cells.push(world.goal());
        cells.push(world.hazard());
        cells.sort();
        cells.dedup();
        cells.len() == world.occupied().len() && cells.iter().all(|c| world.is_occupied(*c))
    }

    #[test]
    fn eating_goal_grows_and_relocates() {
        let mut w = world(10, &[(5, 5), (4, 5), (3, 5)], (6, 5), (0, 9));
        let outcome = GameEngine::new(&mut w).advance(east()).unwrap();

        assert_eq!(outcome.event, StepEvent::AteGoal);
        assert_eq!(outcome.reward, GameConfig::GOAL_REWARD);
        assert!(!outcome.death);
        assert!(outcome.changes.contains(WorldChanges::BODY | WorldChanges::GOAL));
        assert_eq!(
            w.body().to_vec(),
            vec![Cell::new(6, 5), Cell::new(5, 5), Cell::new(4, 5), Cell::new(3, 5)]
        );
        assert_ne!(w.goal(), Cell::new(6, 5));
        assert!(!w.is_body(w.goal()));
        assert!(index_is_in_sync(&w));
    }

    #[test]
    fn eating_hazard_shrinks_without_moving_head() {
        let mut w = world(10, &[(5, 5), (4, 5), (3, 5)], (0, 0), (6, 5));
        let outcome = GameEngine::new(&mut w).advance(east()).unwrap();

        assert_eq!(outcome.event, StepEvent::AteHazard);
        assert_eq!(outcome.reward, GameConfig::HAZARD_REWARD);
        assert_eq!(w.body().to_vec(), vec![Cell::new(5, 5), Cell::new(4, 5)]);
        assert!(!w.is_occupied(Cell::new(3, 5)));
        assert_ne!(w.hazard(), Cell::new(6, 5));
        assert!(index_is_in_sync(&w));
    }

    #[test]
    fn single_segment_moves_onto_hazard() {
        let mut w = world(10, &[(5, 5)], (0, 0), (6, 5));
        let outcome = GameEngine::new(&mut w).advance(east()).unwrap();
        assert_eq!(outcome.event, StepEvent::AteHazard);
        assert_eq!(w.body().to_vec(), vec![Cell::new(6, 5)]);
        assert!(index_is_in_sync(&w));
    }

    #[test]
    fn short_body_starves_on_ordinary_move() {
        let mut w = world(10, &[(5, 5), (4, 5)], (0, 0), (9, 9));
        let outcome = GameEngine::new(&mut w).advance(east()).unwrap();
        assert_eq!(outcome.event, StepEvent::Starved);
        assert_eq!(outcome.reward, GameConfig::DEATH_REWARD);
        assert!(outcome.death);
        assert!(outcome.changes.contains(WorldChanges::DEATH));
    }

    #[test]
    fn goal_is_checked_before_bounds() {
        // Goal placed off-grid on purpose.
        let mut w = world(10, &[(9, 5), (8, 5), (7, 5)], (10, 5), (0, 0));
        let outcome = GameEngine::new(&mut w).advance(east()).unwrap();
        assert_eq!(outcome.event, StepEvent::AteGoal);
        assert!(!outcome.death);
        assert_eq!(w.head(), Cell::new(10, 5));
    }

    #[test]
    fn wall_kills_and_leaves_body_untouched() {
        let mut w = world(10, &[(9, 5), (8, 5), (7, 5)], (0, 0), (0, 9));
        let before = w.body().to_vec();
        let outcome = GameEngine::new(&mut w).advance(east()).unwrap();
        assert_eq!(outcome.event, StepEvent::HitWall);
        assert!(w.is_dead());
        assert_eq!(w.body().to_vec(), before);
    }

    #[test]
    fn obstacle_kills() {
        let mut w = world_with(
            GameConfig::open_arena(10),
            &[(5, 5), (4, 5), (3, 5)],
            vec![vec![Cell::new(6, 5), Cell::new(6, 6)]],
            (0, 0),
            (0, 9),
        );
        let outcome = GameEngine::new(&mut w).advance(east()).unwrap();
        assert_eq!(outcome.event, StepEvent::HitObstacle);
    }

    #[test]
    fn reversing_onto_neck_is_self_collision() {
        let mut w = world(10, &[(5, 5), (4, 5), (3, 5)], (0, 0), (9, 9));
        let outcome = GameEngine::new(&mut w)
            .advance(Heading::Moving(CardinalDirection::West))
            .unwrap();
        assert_eq!(outcome.event, StepEvent::SelfCollision);
    }

    #[test]
    fn chasing_own_tail_is_safe() {
        // Square loop: head (1,0) next to tail (1,1).
        let mut w = world(5, &[(1, 0), (0, 0), (0, 1), (1, 1)], (4, 4), (3, 4));
        let outcome = GameEngine::new(&mut w)
            .advance(Heading::Moving(CardinalDirection::South))
            .unwrap();
        assert_eq!(outcome.event, StepEvent::Moved);
        assert_eq!(w.head(), Cell::new(1, 1));
        assert!(w.body().is_well_formed());
        assert!(index_is_in_sync(&w));
    }

    #[test]
    fn ordinary_move_pays_shaped_reward() {
        let mut w = world(10, &[(5, 5), (4, 5), (3, 5)], (9, 5), (0, 0));
        let outcome = GameEngine::new(&mut w).advance(east()).unwrap();
        assert_eq!(outcome.event, StepEvent::Moved);
        assert_eq!(
            outcome.reward,
            GameConfig::MOVE_REWARD + GameConfig::APPROACH_GOAL_BONUS
        );
        assert!(outcome.changes.contains(WorldChanges::HEADING));
        assert_eq!(w.heading(), east());
        assert!(!w.is_occupied(Cell::new(3, 5)));
        assert!(index_is_in_sync(&w));
    }

    #[test]
    fn shaping_can_be_disabled() {
        let mut w = world_with(
            GameConfig::open_arena(10).with_reward_shaping(false),
            &[(5, 5), (4, 5), (3, 5)],
            Vec::new(),
            (9, 5),
            (0, 0),
        );
        let outcome = GameEngine::new(&mut w).advance(east()).unwrap();
        assert_eq!(outcome.reward, GameConfig::MOVE_REWARD);
    }

    #[test]
    fn stationary_only_before_first_move() {
        let mut w = world(10, &[(5, 5), (4, 5), (3, 5)], (9, 0), (0, 0));
        let mut engine = GameEngine::new(&mut w);
        let idle = engine.advance(Heading::Stationary).unwrap();
        assert_eq!(idle.event, StepEvent::Idle);
        assert_eq!(idle.reward, 0.0);

        engine.advance(east()).unwrap();
        let err = engine.advance(Heading::Stationary).unwrap_err();
        assert_eq!(
            err,
            MoveError::StationaryAfterStart {
                head: Cell::new(6, 5)
            }
        );
    }

    #[test]
    fn dead_world_rejects_moves_until_reset() {
        let mut w = world(10, &[(9, 5), (8, 5), (7, 5)], (0, 0), (0, 9));
        let mut engine = GameEngine::new(&mut w);
        engine.advance(east()).unwrap();
        assert_eq!(engine.advance(east()).unwrap_err(), MoveError::Dead);
        assert_eq!(engine.concede().unwrap_err(), MoveError::Dead);

        engine.reset().unwrap();
        assert!(!w.is_dead());
        assert!(index_is_in_sync(&w));
    }

    #[test]
    fn concede_is_a_trapped_death() {
        let mut w = world(10, &[(5, 5), (4, 5), (3, 5)], (0, 0), (9, 9));
        let outcome = GameEngine::new(&mut w).concede().unwrap();
        assert_eq!(outcome.event, StepEvent::Trapped);
        assert_eq!(outcome.reward, GameConfig::DEATH_REWARD);
        assert!(w.is_dead());
        assert_eq!(w.last_reward(), GameConfig::DEATH_REWARD);
    }

    #[test]
    fn hazard_relocates_when_timer_elapses() {
        let config = GameConfig {
            hazard_relocate_ticks: 2,
            ..GameConfig::open_arena(10)
        };
        let mut w = world_with(config, &[(1, 5), (0, 5), (0, 6)], Vec::new(), (9, 0), (9, 9));
        let mut engine = GameEngine::new(&mut w);

        let first = engine.advance(east()).unwrap();
        assert!(!first.changes.contains(WorldChanges::HAZARD));
        let second = engine.advance(east()).unwrap();
        assert!(second.changes.contains(WorldChanges::HAZARD));
        assert_ne!(w.hazard(), Cell::new(9, 9));
        assert_eq!(w.hazard_age(), 0);
        assert!(index_is_in_sync(&w));
    }
}
