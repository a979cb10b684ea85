//! Cart-pole environment for qpole
//!
//! A cart moves along a bounded track with a pole hinged on top. The
//! environment integrates the standard cart-pole equations of motion and
//! reports failure once the pole tips past 12 degrees or the cart leaves
//! the track.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod cartpole;

pub use cartpole::{CartPoleConfig, CartPoleEnv};

// Re-export core types
pub use qpole_core::{ContinuousState, DiscreteAction, Environment, TrackedEnvironment};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{CartPoleConfig, CartPoleEnv};
    pub use qpole_core::prelude::*;
}
