//! Survivability-aware pathfinding.
//!
//! One call to [`plan`] runs a single search over a [`WorldSnapshot`]:
//!
//! 1. flood-fill the goal's open area once;
//! 2. precompute a stalling walk as the escape route;
//! 3. run best-first search with the distance-minus-open-area heuristic;
//! 4. keep the direct path only when the goal region is roomy enough.
//!
//! The heuristic is deliberately not admissible. Subtracting the open area
//! pulls the frontier toward spacious regions rather than guaranteeing the
//! shortest route, and the open-area override can discard a reachable goal.
//! Nothing persists between calls.

mod best_first;
mod open_area;
mod policy;
mod stalling;

pub use best_first::search;
pub use open_area::open_area;
pub use policy::{Decision, decide, legal_directions, path_direction};
pub use stalling::stalling_path;

use crate::state::{Cell, WorldSnapshot};

/// Tunables for [`plan`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Multiplier on the Manhattan term of the heuristic.
    pub heuristic_weight: f64,
    /// Fraction of the grid the goal's open area must reach before the direct
    /// path is trusted.
    pub open_area_ratio: f64,
}

impl SearchConfig {
    pub const DEFAULT_HEURISTIC_WEIGHT: f64 = 1.0;
    pub const DEFAULT_OPEN_AREA_RATIO: f64 = 0.1;

    pub fn with_heuristic_weight(mut self, weight: f64) -> Self {
        self.heuristic_weight = weight;
        self
    }

    /// Minimum open area for a direct path on an `N × N` grid.
    pub fn open_area_threshold(&self, grid_size: i32) -> f64 {
        let n = f64::from(grid_size);
        self.open_area_ratio * n * n
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            heuristic_weight: Self::DEFAULT_HEURISTIC_WEIGHT,
            open_area_ratio: Self::DEFAULT_OPEN_AREA_RATIO,
        }
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum PathKind {
    /// Head to goal.
    Direct,
    /// The escape walk, used when the goal is unreachable or too cramped.
    Stalling,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOutcome {
    /// Head first.
    pub path: Vec<Cell>,
    pub kind: PathKind,
    /// Open area measured around the goal.
    pub open_area: usize,
}

impl SearchOutcome {
    /// The first step of the path, if it has one.
    pub fn first_step(&self) -> Option<crate::CardinalDirection> {
        path_direction(&self.path)
    }
}

/// Plans the agent's route toward the goal.
pub fn plan(snapshot: &WorldSnapshot, config: &SearchConfig) -> SearchOutcome {
    let area = open_area(
        snapshot.goal,
        &snapshot.obstacle_cells,
        &snapshot.body,
        snapshot.grid_size,
    );
    let stalling = stalling_path(snapshot);

    let outcome = match search(snapshot, snapshot.goal, config.heuristic_weight, area) {
        Some(path) if area as f64 >= config.open_area_threshold(snapshot.grid_size) => {
            SearchOutcome {
                path,
                kind: PathKind::Direct,
                open_area: area,
            }
        }
        _ => SearchOutcome {
            path: stalling,
            kind: PathKind::Stalling,
            open_area: area,
        },
    };

    tracing::trace!(
        kind = %outcome.kind,
        open_area = area,
        len = outcome.path.len(),
        "search finished"
    );
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::CardinalDirection;
    use crate::config::GameConfig;
    use crate::state::{World, WorldParts};

    fn world(grid: i32, body: &[(i32, i32)], obstacles: Vec<Vec<Cell>>, goal: (i32, i32)) -> World {
        World::from_parts(
            GameConfig::open_arena(grid),
            WorldParts {
                body: body.iter().map(|&c| Cell::from(c)).collect(),
                obstacles,
                goal: goal.into(),
                hazard: Cell::new(grid - 1, grid - 1),
                seed: 3,
            },
        )
        .unwrap()
    }

    #[test]
    fn direct_path_on_open_grid() {
        let w = world(10, &[(5, 5), (4, 5), (3, 5)], Vec::new(), (5, 2));
        let outcome = plan(&w.snapshot(), &SearchConfig::default());

        assert_eq!(outcome.kind, PathKind::Direct);
        assert_eq!(
            outcome.path,
            vec![Cell::new(5, 5), Cell::new(5, 4), Cell::new(5, 3), Cell::new(5, 2)]
        );
        assert_eq!(outcome.first_step(), Some(CardinalDirection::North));
    }

    #[test]
    fn direct_path_length_is_manhattan_plus_one() {
        let w = world(12, &[(2, 9), (1, 9), (0, 9)], Vec::new(), (8, 3));
        let snap = w.snapshot();
        let outcome = plan(&snap, &SearchConfig::default());

        assert_eq!(outcome.kind, PathKind::Direct);
        assert_eq!(outcome.path.len() as u32, snap.head.manhattan(snap.goal) + 1);
        for pair in outcome.path.windows(2) {
            assert_eq!(pair[0].manhattan(pair[1]), 1);
        }
    }

    #[test]
    fn cramped_goal_overrides_reachable_path() {
        // Body curls around the corner pocket holding the goal; the head sits
        // at the one-cell gap.
        let w = world(
            10,
            &[(0, 2), (1, 2), (2, 2), (2, 1), (2, 0)],
            Vec::new(),
            (0, 0),
        );
        let snap = w.snapshot();
        assert!(search(&snap, snap.goal, 1.0, 4).is_some());

        let outcome = plan(&snap, &SearchConfig::default());
        assert_eq!(outcome.open_area, 4);
        assert_eq!(outcome.kind, PathKind::Stalling);
        assert_eq!(outcome.path, stalling_path(&snap));
        assert_ne!(outcome.path.last(), Some(&snap.goal));
    }

    #[test]
    fn unreachable_goal_falls_back_to_stalling() {
        let ring = vec![vec![
            Cell::new(7, 6),
            Cell::new(6, 7),
            Cell::new(8, 7),
            Cell::new(7, 8),
        ]];
        let w = world(10, &[(2, 2), (1, 2), (0, 2)], ring, (7, 7));
        let outcome = plan(&w.snapshot(), &SearchConfig::default());
        assert_eq!(outcome.kind, PathKind::Stalling);
        assert_eq!(outcome.path[0], Cell::new(2, 2));
    }

    #[test]
    fn returned_paths_avoid_obstacles_and_walls() {
        let cluster = vec![vec![
            Cell::new(4, 1),
            Cell::new(4, 2),
            Cell::new(4, 3),
            Cell::new(4, 4),
            Cell::new(4, 5),
        ]];
        let w = world(9, &[(2, 3), (1, 3), (0, 3)], cluster, (7, 3));
        let snap = w.snapshot();
        let outcome = plan(&snap, &SearchConfig::default());

        assert_eq!(outcome.kind, PathKind::Direct);
        assert!(outcome.path.iter().all(|c| !snap.is_blocked(*c)));
        assert_eq!(outcome.path.last(), Some(&snap.goal));
    }
}
