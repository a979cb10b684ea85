//! Environment traits and types

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{ContinuousState, DiscreteAction};

/// One trial, from reset until the pole falls or training stops
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Episode ID
    pub id: Uuid,
    /// 1-based trial number
    pub trial: usize,
    /// Number of steps taken so far
    pub steps: usize,
    /// Whether the trial ended in failure
    pub failed: bool,
    /// Start time
    pub start_time: chrono::DateTime<chrono::Utc>,
    /// End time
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,
}

/// Core environment trait
///
/// Stepping is synchronous: one call advances the simulation by exactly one
/// integration step.
pub trait Environment: Send {
    /// Put the environment back into its initial state
    fn reset(&mut self);

    /// Apply `action` for one time step
    ///
    /// Identifiers other than the two valid pushes fail with
    /// [`crate::RLError::InvalidAction`] and leave the state untouched.
    fn step(&mut self, action: DiscreteAction) -> crate::Result<()>;

    /// Snapshot of the current state
    fn state(&self) -> ContinuousState;

    /// Whether the current state is outside the allowed bounds
    fn is_failed(&self) -> bool;

    /// Get current episode info
    fn episode_info(&self) -> Option<Episode> {
        None
    }
}

/// Wrapper for environments that tracks episodes
pub struct TrackedEnvironment<E> {
    /// Inner environment
    pub env: E,
    /// Current episode
    pub episode: Option<Episode>,
    /// Number of episodes started
    pub trials: usize,
}

impl<E> TrackedEnvironment<E> {
    /// Create a new tracked environment
    pub fn new(env: E) -> Self {
        Self {
            env,
            episode: None,
            trials: 0,
        }
    }

    /// Close the current episode and return it
    ///
    /// The end time is only stamped once, so a failed episode keeps the
    /// time it failed at.
    pub fn finish_episode(&mut self) -> Option<Episode> {
        let episode = self.episode.as_mut()?;
        episode.end_time.get_or_insert_with(chrono::Utc::now);
        Some(episode.clone())
    }
}

impl<E> Environment for TrackedEnvironment<E>
where
    E: Environment,
{
    fn reset(&mut self) {
        // End current episode if exists
        if let Some(ref mut episode) = self.episode {
            episode.end_time.get_or_insert_with(chrono::Utc::now);
        }

        self.trials += 1;
        self.episode = Some(Episode {
            id: Uuid::new_v4(),
            trial: self.trials,
            steps: 0,
            failed: false,
            start_time: chrono::Utc::now(),
            end_time: None,
        });

        self.env.reset();
    }

    fn step(&mut self, action: DiscreteAction) -> crate::Result<()> {
        self.env.step(action)?;

        let failed = self.env.is_failed();
        if let Some(ref mut episode) = self.episode {
            episode.steps += 1;
            if failed && !episode.failed {
                episode.failed = true;
                episode.end_time = Some(chrono::Utc::now());
            }
        }

        Ok(())
    }

    fn state(&self) -> ContinuousState {
        self.env.state()
    }

    fn is_failed(&self) -> bool {
        self.env.is_failed()
    }

    fn episode_info(&self) -> Option<Episode> {
        self.episode.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Action, RLError};

    /// Moves one unit per push and fails past `limit`
    struct Track {
        position: f64,
        limit: f64,
    }

    impl Environment for Track {
        fn reset(&mut self) {
            self.position = 0.0;
        }

        fn step(&mut self, action: DiscreteAction) -> crate::Result<()> {
            self.position += Action::try_from(action)?.direction();
            Ok(())
        }

        fn state(&self) -> ContinuousState {
            ContinuousState::new(self.position, 0.0, 0.0, 0.0)
        }

        fn is_failed(&self) -> bool {
            self.position.abs() > self.limit
        }
    }

    #[test]
    fn test_tracked_environment_counts_trials_and_steps() {
        let mut env = TrackedEnvironment::new(Track { position: 0.0, limit: 1.5 });
        assert!(env.episode_info().is_none());

        env.reset();
        env.step(Action::Forward.into()).unwrap();
        let episode = env.episode_info().unwrap();
        assert_eq!((episode.trial, episode.steps, episode.failed), (1, 1, false));

        env.step(Action::Forward.into()).unwrap();
        let episode = env.episode_info().unwrap();
        assert!(episode.failed);
        assert!(episode.end_time.is_some());

        let finished = env.finish_episode().unwrap();
        assert_eq!(finished.end_time, episode.end_time);

        env.reset();
        let episode = env.episode_info().unwrap();
        assert_eq!((episode.trial, episode.steps), (2, 0));
        assert!(episode.end_time.is_none());
        assert_eq!(env.state(), ContinuousState::ZERO);
    }

    #[test]
    fn test_tracked_environment_propagates_invalid_action() {
        let mut env = TrackedEnvironment::new(Track { position: 0.0, limit: 1.5 });
        env.reset();
        let err = env.step(DiscreteAction(5)).unwrap_err();
        assert!(matches!(err, RLError::InvalidAction(_)));
        assert_eq!(env.episode_info().unwrap().steps, 0);
    }
}
