//! Trainer configuration

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use qpole_agent::QLearningConfig;
use qpole_env::{CartPoleConfig, CartPoleEnv};

/// Training run configuration, loadable from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrainerConfig {
    /// Steps without failure after which the pole counts as balanced
    pub max_steps: usize,
    /// Failed trials after which training gives up
    pub max_trials: usize,
    /// Log a trial summary every this many failures
    pub report_interval: usize,
    /// Cart-pole physics and failure bounds
    pub env: CartPoleConfig,
    /// Learner configuration
    pub agent: QLearningConfig,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        Self {
            max_steps: 100_000,
            max_trials: 10_000,
            report_interval: 1,
            env: CartPoleConfig::default(),
            agent: QLearningConfig::default(),
        }
    }
}

impl TrainerConfig {
    /// Parse a TOML document
    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("invalid trainer configuration")
    }

    /// Read and parse a TOML file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("failed to load config file {}", path.display()))
    }

    /// Check limits, physics and learner hyperparameters
    pub fn validate(&self) -> Result<()> {
        ensure!(self.max_steps > 0, "max_steps must be at least 1");
        ensure!(self.max_trials > 0, "max_trials must be at least 1");
        ensure!(self.report_interval > 0, "report_interval must be at least 1");
        CartPoleEnv::new(self.env.clone()).context("invalid [env] section")?;
        self.agent.base.validate().context("invalid [agent] section")?;
        Ok(())
    }
}
