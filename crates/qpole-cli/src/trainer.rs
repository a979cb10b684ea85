//! Trial loop driving the environment and the learner

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use qpole_agent::QLearningAgent;
use qpole_core::{
    Agent, AgentMetrics, Environment, Episode, RLError, Result, Reward, TrackedEnvironment,
    Transition,
};
use qpole_env::CartPoleEnv;

use crate::config::TrainerConfig;

/// Stopping conditions of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingLimits {
    /// Steps without failure after which the pole counts as balanced
    pub max_steps: usize,
    /// Failed trials after which training gives up
    pub max_trials: usize,
    /// Log a trial summary every this many failures
    pub report_interval: usize,
}

impl TrainingLimits {
    /// Both limits must allow at least one step and one trial
    pub fn validate(&self) -> Result<()> {
        if self.max_steps == 0 {
            return Err(RLError::config("max_steps must be at least 1"));
        }
        if self.max_trials == 0 {
            return Err(RLError::config("max_trials must be at least 1"));
        }
        Ok(())
    }
}

impl From<&TrainerConfig> for TrainingLimits {
    fn from(config: &TrainerConfig) -> Self {
        Self {
            max_steps: config.max_steps,
            max_trials: config.max_trials,
            report_interval: config.report_interval,
        }
    }
}

/// How a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum TrainingOutcome {
    /// A trial reached the step limit
    Balanced {
        /// 1-based number of the successful trial
        trial: usize,
        /// Steps the pole stayed up
        steps: usize,
    },
    /// The trial limit was hit first
    NotBalanced {
        /// Failed trials
        failures: usize,
        /// Longest trial
        best_steps: usize,
        /// Trial that achieved `best_steps`
        best_trial: usize,
    },
}

/// Everything a finished run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingReport {
    /// How the run ended
    pub outcome: TrainingOutcome,
    /// Every trial in order, the last one possibly unfinished
    pub trials: Vec<Episode>,
    /// Learner counters at the end of the run
    pub metrics: AgentMetrics,
}

/// Couples an environment and an agent for a training run
pub struct Trainer<E, A> {
    env: TrackedEnvironment<E>,
    agent: A,
    limits: TrainingLimits,
}

impl<E, A> Trainer<E, A>
where
    E: Environment,
    A: Agent,
{
    /// Create a new trainer
    pub fn new(env: E, agent: A, limits: TrainingLimits) -> Self {
        Self {
            env: TrackedEnvironment::new(env),
            agent,
            limits,
        }
    }

    /// The learner, e.g. to inspect its table after a run
    pub fn agent(&self) -> &A {
        &self.agent
    }

    /// Run trials until one lasts `max_steps` or `max_trials` have failed
    ///
    /// The learner keeps its table across trials; only the environment is
    /// reset after each failure.
    pub fn run(&mut self) -> Result<TrainingReport> {
        let limits = self.limits;
        limits.validate()?;
        let mut steps = 0;
        let mut failures = 0;
        let mut best_steps = 0;
        let mut best_trial = 0;
        let mut trials = Vec::new();

        info!(?limits, "starting training");
        self.env.reset();

        while steps < limits.max_steps && failures < limits.max_trials {
            let state = self.env.state();
            steps += 1;
            let action = self.agent.select_action(&state);
            self.env.step(action.into())?;
            let next_state = self.env.state();

            let failed = self.env.is_failed();
            let transition =
                Transition::new(state, action, next_state, Reward::for_outcome(failed));

            if failed {
                failures += 1;
                if steps > best_steps {
                    best_steps = steps;
                    best_trial = failures;
                }
                if failures % limits.report_interval.max(1) == 0 {
                    info!(trial = failures, steps, best_steps, "trial failed");
                }
                debug!(?next_state, "pole down");

                self.agent.observe(&transition)?;
                self.agent.reset_episode();
                trials.extend(self.env.finish_episode());
                self.env.reset();
                steps = 0;
            } else {
                self.agent.observe(&transition)?;
            }
        }

        let outcome = if failures >= limits.max_trials {
            TrainingOutcome::NotBalanced {
                failures,
                best_steps,
                best_trial,
            }
        } else {
            trials.extend(self.env.finish_episode());
            TrainingOutcome::Balanced {
                trial: failures + 1,
                steps: steps - 1,
            }
        };

        let metrics = self.agent.metrics();
        info!(?outcome, visited_states = metrics.visited_states, "training finished");
        Ok(TrainingReport {
            outcome,
            trials,
            metrics,
        })
    }
}

/// Build the cart-pole environment and Q-learning agent from `config` and
/// train until one of its limits is hit
pub fn train(config: &TrainerConfig) -> Result<TrainingReport> {
    let limits = TrainingLimits::from(config);
    limits.validate()?;
    let env = CartPoleEnv::new(config.env.clone())?;
    let agent = QLearningAgent::new(config.agent.clone())?;
    Trainer::new(env, agent, limits).run()
}
