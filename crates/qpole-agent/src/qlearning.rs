//! Tabular Q-learning agent
//!
//! The agent buckets each continuous state with a [`Discretizer`], keeps one
//! estimate per (bucket, action) pair in a [`QTable`] and learns from every
//! step with the one-step rule
//!
//! ```text
//! Q(s, a) <- Q(s, a) + lr * (reward + max_a' Q(s', a') - Q(s, a))
//! ```
//!
//! The configured discount factor is not part of that target unless
//! [`AgentConfig::apply_discount`] is set, in which case the future term
//! becomes `gamma * max_a' Q(s', a')`.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, trace};

use qpole_core::{
    Action, Agent, AgentConfig, AgentMetrics, ContinuousState, PolicyMode, QTable, Result,
    Reward,
};

use crate::discretize::{DiscretizationScales, Discretizer};

/// Q-learning specific configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QLearningConfig {
    /// Base agent configuration
    #[serde(flatten)]
    pub base: AgentConfig,
    /// Discretization granularity
    #[serde(default)]
    pub scales: DiscretizationScales,
}

impl From<AgentConfig> for QLearningConfig {
    fn from(base: AgentConfig) -> Self {
        Self {
            base,
            scales: DiscretizationScales::default(),
        }
    }
}

/// Largest absolute velocities seen in updates
///
/// Useful for choosing discretization scales: a velocity scale of `s` spreads
/// `[-max, max]` over roughly `2 * s * max` buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VelocityExtremes {
    /// Largest `|x_dot|`
    pub max_velocity: f64,
    /// Largest `|theta_dot|`
    pub max_angular_velocity: f64,
}

impl VelocityExtremes {
    fn record(&mut self, state: &ContinuousState) {
        self.max_velocity = self.max_velocity.max(state.x_dot.abs());
        self.max_angular_velocity = self.max_angular_velocity.max(state.theta_dot.abs());
    }
}

/// Tabular Q-learning agent with greedy or epsilon-greedy action selection
pub struct QLearningAgent<R = StdRng> {
    config: QLearningConfig,
    discretizer: Discretizer,
    table: QTable,
    rng: R,
    metrics: AgentMetrics,
    extremes: VelocityExtremes,
}

impl QLearningAgent<StdRng> {
    /// Create an agent whose random source is seeded from the config
    ///
    /// Without a seed the generator is seeded from system entropy.
    pub fn new(config: impl Into<QLearningConfig>) -> Result<Self> {
        let config = config.into();
        let rng = match config.base.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }
}

impl<R: RngCore> QLearningAgent<R> {
    /// Create an agent drawing exploration and tie-breaks from `rng`
    pub fn with_rng(config: impl Into<QLearningConfig>, rng: R) -> Result<Self> {
        let config = config.into();
        config.base.validate()?;
        let discretizer = Discretizer::new(config.base.track_length, config.scales)?;

        debug!(?config, "creating Q-learning agent");
        if !config.base.apply_discount && config.base.gamma < 1.0 {
            info!(
                gamma = config.base.gamma,
                "discount factor is not applied to the update target"
            );
        }

        Ok(Self {
            config,
            discretizer,
            table: QTable::new(),
            rng,
            metrics: AgentMetrics::default(),
            extremes: VelocityExtremes::default(),
        })
    }

    /// Discretizer used for table keys
    pub fn discretizer(&self) -> &Discretizer {
        &self.discretizer
    }

    /// Learned action values
    pub fn table(&self) -> &QTable {
        &self.table
    }

    /// Velocity extremes seen so far
    pub fn velocity_extremes(&self) -> VelocityExtremes {
        self.extremes
    }

    /// Exploit the table, breaking ties uniformly at random
    fn greedy_action(&mut self, state: &ContinuousState) -> Action {
        let key = self.discretizer.discretize(state);
        let record = *self.table.ensure_entry(key);
        record
            .strict_argmax()
            .unwrap_or_else(|| Action::sample(&mut self.rng))
    }

    /// Target value the estimate is moved towards
    fn target(&self, reward: Reward, future: f64) -> f64 {
        if self.config.base.apply_discount {
            reward.value() + self.config.base.gamma * future
        } else {
            reward.value() + future
        }
    }
}

impl<R: RngCore + Send> Agent for QLearningAgent<R> {
    fn select_action(&mut self, state: &ContinuousState) -> Action {
        let base = &self.config.base;
        if base.policy == PolicyMode::Mixed && self.rng.gen::<f64>() < base.epsilon {
            return Action::sample(&mut self.rng);
        }
        self.greedy_action(state)
    }

    fn update(
        &mut self,
        prev: &ContinuousState,
        action: Action,
        cur: &ContinuousState,
        reward: Reward,
    ) -> Result<()> {
        let reward = reward.validate()?;
        self.extremes.record(prev);

        let prev_key = self.discretizer.discretize(prev);
        let cur_key = self.discretizer.discretize(cur);
        self.table.ensure_entry(prev_key);
        self.table.ensure_entry(cur_key);

        let old = self.table.get_value(&prev_key, action);
        let future = self.table.best_value(&cur_key);
        let new = old + self.config.base.learning_rate * (self.target(reward, future) - old);
        self.table.set_value(prev_key, action, new);

        self.metrics.total_steps += 1;
        trace!(?prev_key, %action, old, new, "q update");
        Ok(())
    }

    fn reset_episode(&mut self) {
        self.metrics.total_episodes += 1;
    }

    fn metrics(&self) -> AgentMetrics {
        AgentMetrics {
            visited_states: self.table.len(),
            ..self.metrics.clone()
        }
    }
}
