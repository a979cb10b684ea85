//! Single-step transitions fed to the learner

use serde::{Deserialize, Serialize};

use crate::{Action, ContinuousState, Reward};

/// One observed `S --(action, reward)--> S'` step
///
/// Built by the trainer once per simulation step and consumed right away by
/// [`crate::Agent::observe`]; nothing keeps it around.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// State the action was selected in
    pub state: ContinuousState,
    /// Action taken
    pub action: Action,
    /// State after the environment stepped
    pub next_state: ContinuousState,
    /// Reward received
    pub reward: Reward,
}

impl Transition {
    /// Create a new transition
    #[must_use]
    pub fn new(
        state: ContinuousState,
        action: Action,
        next_state: ContinuousState,
        reward: Reward,
    ) -> Self {
        Self {
            state,
            action,
            next_state,
            reward,
        }
    }
}
