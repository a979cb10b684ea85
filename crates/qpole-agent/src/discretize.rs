//! Mapping from continuous cart-pole states to Q-table keys

use serde::{Deserialize, Serialize};

use qpole_core::{ContinuousState, DiscretizedKey, RLError, Result};

/// Number of buckets between the track center and either end
pub const POSITION_BUCKETS: f64 = 7.0;

/// Per-component granularity of the discretization
///
/// Each component is multiplied by its scale and rounded, so a scale of
/// `2.7` gives buckets roughly `0.37` wide. The cart position scale is not
/// listed here; it is derived from the track length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscretizationScales {
    /// Cart velocity scale
    pub velocity: f64,
    /// Pole angle scale
    pub angle: f64,
    /// Pole angular velocity scale
    pub angular_velocity: f64,
}

impl Default for DiscretizationScales {
    fn default() -> Self {
        Self {
            velocity: 2.7,
            angle: 25.0,
            angular_velocity: 2.7,
        }
    }
}

/// Stateless state-to-key mapping
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Discretizer {
    position_scale: f64,
    scales: DiscretizationScales,
}

impl Discretizer {
    /// Create a discretizer for a track of the given half-length
    pub fn new(track_length: f64, scales: DiscretizationScales) -> Result<Self> {
        if !(track_length > 0.0 && track_length.is_finite()) {
            return Err(RLError::config(format!(
                "track_length must be positive, got {track_length}"
            )));
        }
        let all = [scales.velocity, scales.angle, scales.angular_velocity];
        if all.iter().any(|s| !(s.is_finite() && *s > 0.0)) {
            return Err(RLError::config(format!(
                "discretization scales must be positive, got {scales:?}"
            )));
        }
        Ok(Self {
            position_scale: POSITION_BUCKETS / track_length,
            scales,
        })
    }

    /// Scale applied to the cart position
    #[must_use]
    pub fn position_scale(&self) -> f64 {
        self.position_scale
    }

    /// Bucket every component of `state`
    #[must_use]
    pub fn discretize(&self, state: &ContinuousState) -> DiscretizedKey {
        DiscretizedKey([
            bucket(state.x, self.position_scale),
            bucket(state.x_dot, self.scales.velocity),
            bucket(state.theta, self.scales.angle),
            bucket(state.theta_dot, self.scales.angular_velocity),
        ])
    }
}

/// `round(value * scale)` with ties going to the even neighbor
#[allow(clippy::cast_possible_truncation)]
fn bucket(value: f64, scale: f64) -> i64 {
    (value * scale).round_ties_even() as i64
}
