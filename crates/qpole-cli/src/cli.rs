//! Command-line interface

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use qpole_core::PolicyMode;

use crate::config::TrainerConfig;

#[derive(Debug, Parser)]
#[command(name = "qpole")]
#[command(about = "Tabular Q-learning cart-pole trainer", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Train an agent until the pole stays up or the trial limit is hit
    Train(TrainArgs),
}

#[derive(Debug, Args)]
pub struct TrainArgs {
    /// TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Action-selection mode (greedy, mixed)
    #[arg(short, long)]
    pub policy: Option<PolicyMode>,

    /// Exploration rate for the mixed policy
    #[arg(short, long)]
    pub epsilon: Option<f64>,

    /// Learning rate
    #[arg(long)]
    pub learning_rate: Option<f64>,

    /// Discount factor
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Multiply the discount factor into the update target (true, false)
    #[arg(long, value_name = "BOOL")]
    pub apply_discount: Option<bool>,

    /// Distance from the track center to the wall the cart fails at
    #[arg(long)]
    pub track_length: Option<f64>,

    /// Track half-length the agent spreads its position buckets over
    #[arg(long)]
    pub agent_track_length: Option<f64>,

    /// Seed for exploration and tie-breaking
    #[arg(long)]
    pub seed: Option<u64>,

    /// Steps a trial must last to count as balanced
    #[arg(long)]
    pub max_steps: Option<usize>,

    /// Failed trials before giving up
    #[arg(long)]
    pub max_trials: Option<usize>,

    /// Log every Nth failed trial
    #[arg(long)]
    pub report_interval: Option<usize>,

    /// Write a JSON-lines trial report here
    #[arg(long)]
    pub report: Option<PathBuf>,
}

impl TrainArgs {
    /// Overlay the flags that were given onto `config`
    pub fn apply(&self, config: &mut TrainerConfig) {
        let agent = &mut config.agent.base;
        if let Some(policy) = self.policy {
            agent.policy = policy;
        }
        if let Some(epsilon) = self.epsilon {
            agent.epsilon = epsilon;
        }
        if let Some(learning_rate) = self.learning_rate {
            agent.learning_rate = learning_rate;
        }
        if let Some(gamma) = self.gamma {
            agent.gamma = gamma;
        }
        if let Some(apply_discount) = self.apply_discount {
            agent.apply_discount = apply_discount;
        }
        if let Some(track_length) = self.agent_track_length {
            agent.track_length = track_length;
        }
        if let Some(seed) = self.seed {
            agent.seed = Some(seed);
        }
        if let Some(track_length) = self.track_length {
            config.env.track_length = track_length;
        }
        if let Some(max_steps) = self.max_steps {
            config.max_steps = max_steps;
        }
        if let Some(max_trials) = self.max_trials {
            config.max_trials = max_trials;
        }
        if let Some(report_interval) = self.report_interval {
            config.report_interval = report_interval;
        }
    }
}
