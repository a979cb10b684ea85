//! Action representations for the two-push cart-pole

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::RLError;

/// Raw action identifier as it crosses the environment boundary
///
/// Only `0` (push backward) and `1` (push forward) are valid; anything else
/// is rejected by [`Action::try_from`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DiscreteAction(pub usize);

/// One of the two horizontal force directions applied to the cart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    /// Push towards negative x (identifier `0`)
    Backward,
    /// Push towards positive x (identifier `1`)
    Forward,
}

impl Action {
    /// Both actions, in identifier order
    pub const ALL: [Action; 2] = [Action::Backward, Action::Forward];

    /// Numeric identifier of the action
    #[must_use]
    pub fn id(self) -> usize {
        match self {
            Self::Backward => 0,
            Self::Forward => 1,
        }
    }

    /// Sign of the force this action applies
    #[must_use]
    pub fn direction(self) -> f64 {
        match self {
            Self::Backward => -1.0,
            Self::Forward => 1.0,
        }
    }

    /// Pick one of the two actions uniformly at random
    pub fn sample<R: Rng + ?Sized>(rng: &mut R) -> Self {
        if rng.gen_bool(0.5) {
            Self::Forward
        } else {
            Self::Backward
        }
    }
}

impl TryFrom<DiscreteAction> for Action {
    type Error = RLError;

    fn try_from(action: DiscreteAction) -> Result<Self, Self::Error> {
        match action.0 {
            0 => Ok(Self::Backward),
            1 => Ok(Self::Forward),
            other => Err(RLError::InvalidAction(format!(
                "{other} is not a push direction (expected 0 or 1)"
            ))),
        }
    }
}

impl From<Action> for DiscreteAction {
    fn from(action: Action) -> Self {
        DiscreteAction(action.id())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backward => f.write_str("backward"),
            Self::Forward => f.write_str("forward"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_identifiers_convert_both_ways() {
        for action in Action::ALL {
            let raw: DiscreteAction = action.into();
            assert_eq!(Action::try_from(raw).unwrap(), action);
        }
        assert_eq!(Action::Backward.id(), 0);
        assert_eq!(Action::Forward.id(), 1);
    }

    #[test]
    fn test_third_identifier_is_rejected() {
        let err = Action::try_from(DiscreteAction(2)).unwrap_err();
        assert!(matches!(err, RLError::InvalidAction(_)));
    }

    #[test]
    fn test_sample_hits_both_actions() {
        let mut rng = StdRng::seed_from_u64(7);
        let forward = (0..200)
            .filter(|_| Action::sample(&mut rng) == Action::Forward)
            .count();
        assert!(forward > 0 && forward < 200);
    }
}
