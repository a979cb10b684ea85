//! Reward signal

use serde::{Deserialize, Serialize};

use crate::{RLError, Result};

/// Reward signal from the environment
///
/// The trainer only ever emits [`Reward::SURVIVED`] or [`Reward::FAILED`].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Reward(pub f64);

impl Reward {
    /// Reward for a transition that keeps the pole up
    pub const SURVIVED: Reward = Reward(0.0);
    /// Reward for the transition that ends a trial
    pub const FAILED: Reward = Reward(-1.0);

    /// Create a new reward
    #[must_use]
    pub fn new(value: f64) -> Self {
        Self(value)
    }

    /// Get the reward value
    #[must_use]
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Reward for a transition, given whether it ended the trial
    #[must_use]
    pub fn for_outcome(failed: bool) -> Self {
        if failed {
            Self::FAILED
        } else {
            Self::SURVIVED
        }
    }

    /// Reject anything outside the survival/failure convention
    pub fn validate(self) -> Result<Self> {
        if self == Self::SURVIVED || self == Self::FAILED {
            Ok(self)
        } else {
            Err(RLError::InvalidReward(self.0))
        }
    }
}

impl From<f64> for Reward {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convention_values_validate() {
        assert_eq!(Reward::new(0.0).validate().unwrap(), Reward::SURVIVED);
        assert_eq!(Reward::new(-1.0).validate().unwrap(), Reward::FAILED);
        assert_eq!(Reward::for_outcome(true), Reward::FAILED);
        assert_eq!(Reward::for_outcome(false), Reward::SURVIVED);
    }

    #[test]
    fn test_other_values_are_rejected() {
        for value in [1.0, -0.5, f64::NAN] {
            assert!(matches!(
                Reward::from(value).validate(),
                Err(RLError::InvalidReward(_))
            ));
        }
    }
}
