//! Compact state vector for an external learner.

use crate::action::CardinalDirection;
use crate::state::{Cell, World};

/// Eleven binary features describing the agent's surroundings.
///
/// Layout: danger straight / right / left, heading west / east / north /
/// south, goal lies westwards / eastwards / northwards / southwards.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StateFeatures {
    pub values: [f32; StateFeatures::LEN],
}

impl StateFeatures {
    pub const LEN: usize = 11;

    pub fn from_world(world: &World) -> Self {
        let mut values = [0.0; Self::LEN];
        let head = world.head();

        if let Some(dir) = world.heading().direction() {
            let straight = dir.as_cell();
            let right = Cell::new(straight.y, -straight.x);
            let left = Cell::new(-straight.y, straight.x);
            values[0] = flag(is_danger(world, head + straight));
            values[1] = flag(is_danger(world, head + right));
            values[2] = flag(is_danger(world, head + left));

            let slot = match dir {
                CardinalDirection::West => 3,
                CardinalDirection::East => 4,
                CardinalDirection::North => 5,
                CardinalDirection::South => 6,
            };
            values[slot] = 1.0;
        }

        let to_goal = world.goal() - head;
        if to_goal.x < 0 {
            values[7] = 1.0;
        } else if to_goal.x > 0 {
            values[8] = 1.0;
        }
        if to_goal.y < 0 {
            values[9] = 1.0;
        } else if to_goal.y > 0 {
            values[10] = 1.0;
        }

        Self { values }
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.values
    }

    pub fn danger_straight(&self) -> bool {
        self.values[0] > 0.0
    }
}

fn is_danger(world: &World, cell: Cell) -> bool {
    world.is_wall(cell) || world.is_body(cell) || world.is_obstacle(cell) || world.is_hazard(cell)
}

fn flag(value: bool) -> f32 {
    if value { 1.0 } else { 0.0 }
}
