//! Core reinforcement learning types for qpole
//!
//! This crate provides the shared vocabulary of the trainer: the
//! continuous cart-pole state, the two push actions, rewards, the sparse
//! Q-table and the traits environments and agents implement.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod action;
pub mod agent;
pub mod environment;
pub mod error;
pub mod policy;
pub mod reward;
pub mod state;
pub mod transition;
pub mod value;

// Re-export core traits and types
pub use action::{Action, DiscreteAction};
pub use agent::{Agent, AgentConfig, AgentMetrics};
pub use environment::{Environment, Episode, TrackedEnvironment};
pub use error::{RLError, Result};
pub use policy::PolicyMode;
pub use reward::Reward;
pub use state::ContinuousState;
pub use transition::Transition;
pub use value::{DiscretizedKey, QRecord, QTable};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Action, Agent, AgentConfig, ContinuousState, DiscreteAction, Environment, PolicyMode,
        Result, Reward, Transition,
    };
}
