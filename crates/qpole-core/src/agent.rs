//! Agent traits and types

use serde::{Deserialize, Serialize};

use crate::{Action, ContinuousState, PolicyMode, RLError, Reward, Transition};

/// Configuration for agents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentConfig {
    /// Learning rate
    pub learning_rate: f64,
    /// Discount factor
    ///
    /// Only multiplied into the update target when `apply_discount` is set.
    pub gamma: f64,
    /// Exploration rate for [`PolicyMode::Mixed`]
    pub epsilon: f64,
    /// Action-selection mode
    pub policy: PolicyMode,
    /// Track half-length the position buckets are spread over
    ///
    /// Sizes the discretizer only; the environment's failure wall is
    /// configured separately.
    pub track_length: f64,
    /// Seed for the exploration random source; `None` seeds from entropy
    pub seed: Option<u64>,
    /// Use `reward + gamma * best` instead of `reward + best` as target
    pub apply_discount: bool,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            learning_rate: 0.2,
            gamma: 0.9,
            epsilon: 0.005,
            policy: PolicyMode::Mixed,
            track_length: 4.8,
            seed: Some(11),
            apply_discount: false,
        }
    }
}

impl AgentConfig {
    /// Check hyperparameter ranges
    pub fn validate(&self) -> crate::Result<()> {
        if !(self.learning_rate > 0.0 && self.learning_rate.is_finite()) {
            return Err(RLError::config(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        if !(0.0..=1.0).contains(&self.gamma) {
            return Err(RLError::config(format!(
                "gamma must be within [0, 1], got {}",
                self.gamma
            )));
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(RLError::config(format!(
                "epsilon must be within [0, 1], got {}",
                self.epsilon
            )));
        }
        if !(self.track_length > 0.0 && self.track_length.is_finite()) {
            return Err(RLError::config(format!(
                "track_length must be positive, got {}",
                self.track_length
            )));
        }
        Ok(())
    }
}

/// Agent metrics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentMetrics {
    /// Updates applied
    pub total_steps: usize,
    /// Trials observed through [`Agent::reset_episode`]
    pub total_episodes: usize,
    /// Distinct discretized states in the table
    pub visited_states: usize,
}

/// Core agent trait
pub trait Agent: Send {
    /// Select an action for the given state
    fn select_action(&mut self, state: &ContinuousState) -> Action;

    /// Learn from one `prev --(action, reward)--> cur` step
    fn update(
        &mut self,
        prev: &ContinuousState,
        action: Action,
        cur: &ContinuousState,
        reward: Reward,
    ) -> crate::Result<()>;

    /// Process a transition from the environment
    fn observe(&mut self, transition: &Transition) -> crate::Result<()> {
        self.update(
            &transition.state,
            transition.action,
            &transition.next_state,
            transition.reward,
        )
    }

    /// Hook called between trials
    fn reset_episode(&mut self) {}

    /// Get agent metrics
    fn metrics(&self) -> AgentMetrics {
        AgentMetrics::default()
    }
}
