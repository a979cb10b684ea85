//! Tabular action-value store

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::Action;

/// Bucketed state used to address the Q-table
///
/// Components follow `(x, x_dot, theta, theta_dot)` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DiscretizedKey(pub [i64; 4]);

/// Action-value estimates for one discretized state
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct QRecord {
    /// Estimate for [`Action::Backward`]
    pub backward: f64,
    /// Estimate for [`Action::Forward`]
    pub forward: f64,
}

impl QRecord {
    /// Estimate for `action`
    #[must_use]
    pub fn get(&self, action: Action) -> f64 {
        match action {
            Action::Backward => self.backward,
            Action::Forward => self.forward,
        }
    }

    /// Overwrite the estimate for `action`
    pub fn set(&mut self, action: Action, value: f64) {
        match action {
            Action::Backward => self.backward = value,
            Action::Forward => self.forward = value,
        }
    }

    /// Larger of the two estimates
    #[must_use]
    pub fn best(&self) -> f64 {
        self.backward.max(self.forward)
    }

    /// Action with the strictly higher estimate, `None` on a tie
    #[must_use]
    pub fn strict_argmax(&self) -> Option<Action> {
        if self.forward > self.backward {
            Some(Action::Forward)
        } else if self.backward > self.forward {
            Some(Action::Backward)
        } else {
            None
        }
    }
}

/// Sparse Q-table, populated lazily as states are visited
///
/// A key that was never written reads as a zeroed [`QRecord`], so reads never
/// fail; [`QTable::ensure_entry`] materializes the record.
#[derive(Debug, Clone, Default)]
pub struct QTable {
    records: HashMap<DiscretizedKey, QRecord>,
}

impl QTable {
    /// Create an empty table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a zeroed record for `key` unless one exists
    pub fn ensure_entry(&mut self, key: DiscretizedKey) -> &mut QRecord {
        self.records.entry(key).or_default()
    }

    /// Current estimate for `(key, action)`
    #[must_use]
    pub fn get_value(&self, key: &DiscretizedKey, action: Action) -> f64 {
        self.records
            .get(key)
            .map_or(0.0, |record| record.get(action))
    }

    /// Overwrite the estimate for `(key, action)`
    pub fn set_value(&mut self, key: DiscretizedKey, action: Action, value: f64) {
        self.ensure_entry(key).set(action, value);
    }

    /// Maximum estimate over both actions at `key`
    #[must_use]
    pub fn best_value(&self, key: &DiscretizedKey) -> f64 {
        self.records.get(key).map_or(0.0, QRecord::best)
    }

    /// Record stored for `key`, if it was ever visited
    #[must_use]
    pub fn record(&self, key: &DiscretizedKey) -> Option<&QRecord> {
        self.records.get(key)
    }

    /// Whether `key` has a record
    #[must_use]
    pub fn contains(&self, key: &DiscretizedKey) -> bool {
        self.records.contains_key(key)
    }

    /// Number of visited states
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no state was visited yet
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
