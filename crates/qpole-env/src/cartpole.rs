//! Cart-pole dynamics

use serde::{Deserialize, Serialize};
use tracing::trace;

use qpole_core::{Action, ContinuousState, DiscreteAction, Environment, RLError, Result};

/// Physical constants and bounds of the simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartPoleConfig {
    /// Gravitational acceleration
    pub gravity: f64,
    /// Mass of the cart
    pub mass_cart: f64,
    /// Mass of the pole
    pub mass_pole: f64,
    /// Half the pole's length
    pub length: f64,
    /// Magnitude of the force applied by either action
    pub force_mag: f64,
    /// Seconds between state updates
    pub tau: f64,
    /// The `4/3` factor of the pole's moment of inertia, as a fixed literal
    pub four_thirds: f64,
    /// Largest pole deviation from vertical before failure (12 degrees)
    pub theta_threshold: f64,
    /// Distance from the track center to either end
    pub track_length: f64,
}

impl Default for CartPoleConfig {
    fn default() -> Self {
        Self {
            gravity: 9.8,
            mass_cart: 1.0,
            mass_pole: 0.1,
            length: 0.5,
            force_mag: 10.0,
            tau: 0.02,
            four_thirds: 1.333_333_333_333_3,
            theta_threshold: 0.209_438_4,
            track_length: 2.4,
        }
    }
}

impl CartPoleConfig {
    /// Default physics on a track of the given half-length
    #[must_use]
    pub fn with_track_length(track_length: f64) -> Self {
        Self {
            track_length,
            ..Self::default()
        }
    }

    fn total_mass(&self) -> f64 {
        self.mass_pole + self.mass_cart
    }

    fn pole_mass_length(&self) -> f64 {
        self.mass_pole * self.length
    }
}

/// CartPole environment
///
/// The cart starts centered with the pole upright and at rest. Each step
/// applies a force of `±force_mag` and advances the state with one explicit
/// Euler step of size `tau`.
#[derive(Debug, Clone)]
pub struct CartPoleEnv {
    /// Current state
    state: ContinuousState,
    /// Configuration
    config: CartPoleConfig,
}

impl CartPoleEnv {
    /// Create a new CartPole environment
    pub fn new(config: CartPoleConfig) -> Result<Self> {
        if !(config.track_length > 0.0 && config.track_length.is_finite()) {
            return Err(RLError::config(format!(
                "track_length must be positive, got {}",
                config.track_length
            )));
        }
        if !(config.tau > 0.0) {
            return Err(RLError::config(format!(
                "tau must be positive, got {}",
                config.tau
            )));
        }
        Ok(Self {
            state: ContinuousState::ZERO,
            config,
        })
    }

    /// Replace the current state, e.g. to start from a perturbed position
    #[must_use]
    pub fn with_state(mut self, state: ContinuousState) -> Self {
        self.state = state;
        self
    }

    /// Angular and linear acceleration under `force` at the current state
    fn accelerations(&self, force: f64) -> (f64, f64) {
        let c = &self.config;
        let s = &self.state;
        let total_mass = c.total_mass();
        let pole_mass_length = c.pole_mass_length();

        let cos_theta = s.theta.cos();
        let sin_theta = s.theta.sin();

        let temp = (force + pole_mass_length * s.theta_dot * s.theta_dot * sin_theta) / total_mass;
        let theta_acc = (c.gravity * sin_theta - cos_theta * temp)
            / (c.length * (c.four_thirds - c.mass_pole * cos_theta * cos_theta / total_mass));
        let x_acc = temp - pole_mass_length * theta_acc * cos_theta / total_mass;

        (theta_acc, x_acc)
    }
}

impl Environment for CartPoleEnv {
    fn reset(&mut self) {
        self.state = ContinuousState::ZERO;
    }

    fn step(&mut self, action: DiscreteAction) -> Result<()> {
        let action = Action::try_from(action)?;
        let force = action.direction() * self.config.force_mag;
        let (theta_acc, x_acc) = self.accelerations(force);

        // Positions advance with the velocities from before this step
        let tau = self.config.tau;
        let s = &mut self.state;
        s.x += tau * s.x_dot;
        s.x_dot += tau * x_acc;
        s.theta += tau * s.theta_dot;
        s.theta_dot += tau * theta_acc;

        trace!(%action, x = s.x, theta = s.theta, "cart-pole step");
        Ok(())
    }

    fn state(&self) -> ContinuousState {
        self.state
    }

    fn is_failed(&self) -> bool {
        self.state.theta.abs() > self.config.theta_threshold
            || self.state.x.abs() > self.config.track_length
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn env(track_length: f64) -> CartPoleEnv {
        CartPoleEnv::new(CartPoleConfig::with_track_length(track_length)).unwrap()
    }

    #[test]
    fn test_single_forward_push_from_rest() {
        const GRAVITY: f64 = 9.8;
        const MASSCART: f64 = 1.0;
        const MASSPOLE: f64 = 0.1;
        const LENGTH: f64 = 0.5;
        const FORCE_MAG: f64 = 10.0;
        const TAU: f64 = 0.02;
        const FOURTHIRDS: f64 = 1.333_333_333_333_3;
        let total_mass = MASSPOLE + MASSCART;
        let polemass_length = MASSPOLE * LENGTH;

        // At rest and upright: sin = 0, cos = 1
        let temp = (FORCE_MAG + polemass_length * 0.0 * 0.0 * 0.0) / total_mass;
        let thetaacc = (GRAVITY * 0.0 - 1.0 * temp)
            / (LENGTH * (FOURTHIRDS - MASSPOLE * 1.0 * 1.0 / total_mass));
        let xacc = temp - polemass_length * thetaacc * 1.0 / total_mass;

        let mut env = env(2.4);
        env.step(Action::Forward.into()).unwrap();
        let state = env.state();

        assert_eq!(state.x_dot, TAU * xacc);
        assert_eq!(state.theta_dot, TAU * thetaacc);
        assert_eq!(state.x, 0.0);
        assert_eq!(state.theta, 0.0);
        assert!(state.x_dot > 0.0);
        assert!(state.theta_dot < 0.0);
    }

    #[test]
    fn test_backward_push_mirrors_forward() {
        let mut forward = env(2.4);
        let mut backward = env(2.4);
        for _ in 0..5 {
            forward.step(Action::Forward.into()).unwrap();
            backward.step(Action::Backward.into()).unwrap();
        }
        let f = forward.state();
        let b = backward.state();
        assert_relative_eq!(f.x, -b.x);
        assert_relative_eq!(f.x_dot, -b.x_dot);
        assert_relative_eq!(f.theta, -b.theta);
        assert_relative_eq!(f.theta_dot, -b.theta_dot);
    }

    #[test]
    fn test_invalid_action_leaves_state_untouched() {
        let mut env = env(2.4);
        env.step(Action::Forward.into()).unwrap();
        let before = env.state();

        let err = env.step(DiscreteAction(2)).unwrap_err();
        assert!(matches!(err, RLError::InvalidAction(_)));
        assert_eq!(env.state(), before);
    }

    #[test]
    fn test_constant_push_tips_the_pole_over() {
        let mut env = env(2.4);
        let mut angles = Vec::new();
        for _ in 0..10 {
            env.step(Action::Forward.into()).unwrap();
            angles.push(env.state().theta.abs());
        }
        for pair in angles.windows(2) {
            assert!(pair[1] > pair[0], "pole angle should keep growing: {angles:?}");
        }

        let mut env = CartPoleEnv::new(CartPoleConfig::default()).unwrap();
        let steps = (1..=200)
            .find(|_| {
                env.step(Action::Forward.into()).unwrap();
                env.is_failed()
            })
            .expect("a constant push should end the trial");
        assert!(steps < 50, "failed only after {steps} steps");
    }

    #[test]
    fn test_failure_bounds_are_strict() {
        let inside = [
            ContinuousState::new(2.4, 0.0, 0.0, 0.0),
            ContinuousState::new(-2.4, 0.0, 0.0, 0.0),
            ContinuousState::new(0.0, 0.0, -0.2, 0.0),
            ContinuousState::new(0.0, 5.0, 0.0, -5.0),
        ];
        for state in inside {
            assert!(!env(2.4).with_state(state).is_failed(), "{state:?}");
        }

        let outside = [
            ContinuousState::new(2.41, 0.0, 0.0, 0.0),
            ContinuousState::new(-2.41, 0.0, 0.0, 0.0),
            ContinuousState::new(0.0, 0.0, 0.21, 0.0),
            ContinuousState::new(0.0, 0.0, -0.21, 0.0),
        ];
        for state in outside {
            assert!(env(2.4).with_state(state).is_failed(), "{state:?}");
        }
    }

    #[test]
    fn test_track_length_moves_the_wall() {
        let state = ContinuousState::new(3.0, 0.0, 0.0, 0.0);
        assert!(env(2.4).with_state(state).is_failed());
        assert!(!env(4.8).with_state(state).is_failed());
    }

    #[test]
    fn test_reset_returns_to_rest() {
        let mut env = env(2.4);
        for _ in 0..3 {
            env.step(Action::Backward.into()).unwrap();
        }
        assert_ne!(env.state(), ContinuousState::ZERO);
        env.reset();
        assert_eq!(env.state(), ContinuousState::ZERO);
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = CartPoleConfig::with_track_length(-1.0);
        assert!(matches!(
            CartPoleEnv::new(config),
            Err(RLError::InvalidConfig(_))
        ));
    }
}
