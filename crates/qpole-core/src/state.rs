//! Continuous cart-pole state

use serde::{Deserialize, Serialize};

/// Physical state of the cart and pole
///
/// The environment owns the live instance and hands out copies, so a
/// snapshot taken before a step stays valid after it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ContinuousState {
    /// Cart position in meters, `0` at the track center
    pub x: f64,
    /// Cart velocity
    pub x_dot: f64,
    /// Pole angle in radians, deviation from vertical
    pub theta: f64,
    /// Pole angular velocity
    pub theta_dot: f64,
}

impl ContinuousState {
    /// The all-zero state an episode starts from
    pub const ZERO: Self = Self {
        x: 0.0,
        x_dot: 0.0,
        theta: 0.0,
        theta_dot: 0.0,
    };

    /// Create a state from its four components
    #[must_use]
    pub fn new(x: f64, x_dot: f64, theta: f64, theta_dot: f64) -> Self {
        Self {
            x,
            x_dot,
            theta,
            theta_dot,
        }
    }
}
