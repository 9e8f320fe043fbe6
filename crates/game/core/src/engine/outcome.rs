use crate::state::WorldChanges;

/// How a tick was resolved.
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
pub enum StepEvent {
    /// Head entered the goal cell; body grew.
    AteGoal,
    /// Head reached the hazard cell; body shrank.
    AteHazard,
    /// Ordinary one-cell move.
    Moved,
    /// Stationary tick before the first move.
    Idle,
    SelfCollision,
    HitWall,
    HitObstacle,
    /// Body too short to keep moving.
    Starved,
    /// Agent gave up with no safe direction left.
    Trapped,
}

impl StepEvent {
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            StepEvent::SelfCollision
                | StepEvent::HitWall
                | StepEvent::HitObstacle
                | StepEvent::Starved
                | StepEvent::Trapped
        )
    }
}

/// Result of one accepted tick: the reward channel plus change metadata.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepOutcome {
    pub reward: f32,
    pub death: bool,
    pub event: StepEvent,
    pub changes: WorldChanges,
}

impl StepOutcome {
    pub(crate) fn new(event: StepEvent, reward: f32, changes: WorldChanges) -> Self {
        let death = event.is_terminal();
        let changes = if death {
            changes | WorldChanges::DEATH
        } else {
            changes
        };
        Self {
            reward,
            death,
            event,
            changes,
        }
    }
}
