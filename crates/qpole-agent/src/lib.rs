//! Tabular Q-learning for the qpole cart-pole trainer
//!
//! This crate provides:
//! - the state discretizer that turns continuous cart-pole states into
//!   Q-table keys
//! - the Q-learning agent with greedy and epsilon-greedy action selection

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod discretize;
pub mod qlearning;

pub use discretize::{DiscretizationScales, Discretizer, POSITION_BUCKETS};
pub use qlearning::{QLearningAgent, QLearningConfig, VelocityExtremes};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{DiscretizationScales, Discretizer, QLearningAgent, QLearningConfig};
    pub use qpole_core::prelude::*;
}
