//! Error types for the qpole core library

use thiserror::Error;

/// Core error type for RL operations
#[derive(Error, Debug)]
pub enum RLError {
    /// Action identifier outside the two valid pushes
    #[error("Invalid action: {0}")]
    InvalidAction(String),

    /// Unrecognized or out-of-range configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Reward outside the survival/failure convention
    #[error("Invalid reward: {0} (expected 0 or -1)")]
    InvalidReward(f64),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl RLError {
    /// Shorthand for an [`RLError::InvalidConfig`]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

/// Result type alias for RL operations
pub type Result<T> = std::result::Result<T, RLError>;
