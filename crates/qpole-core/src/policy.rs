//! Action-selection policy modes

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::RLError;

/// How the learner picks actions
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PolicyMode {
    /// Always exploit; break ties uniformly at random
    #[default]
    Greedy,
    /// Epsilon-greedy: explore with probability epsilon, else exploit
    Mixed,
}

impl FromStr for PolicyMode {
    type Err = RLError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "greedy" => Ok(Self::Greedy),
            "mixed" => Ok(Self::Mixed),
            other => Err(RLError::config(format!(
                "unknown policy mode '{other}' (expected 'greedy' or 'mixed')"
            ))),
        }
    }
}

impl TryFrom<String> for PolicyMode {
    type Error = RLError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PolicyMode> for String {
    fn from(mode: PolicyMode) -> Self {
        mode.to_string()
    }
}

impl fmt::Display for PolicyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Greedy => f.write_str("greedy"),
            Self::Mixed => f.write_str("mixed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_modes() {
        assert_eq!("greedy".parse::<PolicyMode>().unwrap(), PolicyMode::Greedy);
        assert_eq!("mixed".parse::<PolicyMode>().unwrap(), PolicyMode::Mixed);
    }

    #[test]
    fn test_unknown_mode_is_a_config_error() {
        let err = "softmax".parse::<PolicyMode>().unwrap_err();
        assert!(matches!(err, RLError::InvalidConfig(_)));
        assert!(serde_json::from_str::<PolicyMode>("\"Greedy\"").is_err());
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&PolicyMode::Mixed).unwrap();
        assert_eq!(json, "\"mixed\"");
        let mode: PolicyMode = serde_json::from_str(&json).unwrap();
        assert_eq!(mode, PolicyMode::Mixed);
    }
}
