//! Candidate-cell classification and reward shaping.
//!
//! Everything here reads the world without mutating it; the engine applies the
//! resulting [`Resolution`].

use crate::config::GameConfig;
use crate::engine::StepEvent;
use crate::state::{Cell, World};

/// What moving the head onto a candidate cell does, before any mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Resolution {
    /// Grow into the goal cell.
    EatGoal,
    /// Consume the hazard. `shrink` is false for a single-segment body,
    /// which makes an ordinary move onto the cell instead.
    EatHazard { shrink: bool },
    Move,
    Die(StepEvent),
}

/// Checks run in a fixed order against the pre-move candidate: goal, hazard,
/// body length and self collision, bounds, obstacles.
pub(crate) fn classify(world: &World, candidate: Cell) -> Resolution {
    if world.is_goal(candidate) {
        return Resolution::EatGoal;
    }
    if world.is_hazard(candidate) {
        return Resolution::EatHazard {
            shrink: world.body().len() > 1,
        };
    }
    // An ordinary move keeps the length unchanged.
    if world.body().len() < world.config().min_body_length {
        return Resolution::Die(StepEvent::Starved);
    }
    if world.body().collides_after_move(candidate) {
        return Resolution::Die(StepEvent::SelfCollision);
    }
    if world.is_wall(candidate) {
        return Resolution::Die(StepEvent::HitWall);
    }
    if world.is_obstacle(candidate) {
        return Resolution::Die(StepEvent::HitObstacle);
    }
    Resolution::Move
}

/// Distance-based adjustment added to [`GameConfig::MOVE_REWARD`].
pub(crate) fn shaping(from: Cell, to: Cell, goal: Cell, hazard: Cell) -> f32 {
    let mut bonus = 0.0;

    let goal_before = from.euclidean(goal);
    let goal_after = to.euclidean(goal);
    if goal_after < goal_before {
        bonus += GameConfig::APPROACH_GOAL_BONUS;
    } else if goal_after > goal_before {
        bonus += GameConfig::RETREAT_GOAL_PENALTY;
    }

    if to.euclidean(hazard) < from.euclidean(hazard) {
        bonus += GameConfig::APPROACH_HAZARD_PENALTY;
    }

    bonus
}
