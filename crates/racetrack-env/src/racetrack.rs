use std::path::Path;

use crate::{ActionSet, CrashPolicy, EnvConfig, EnvError, IntRange, TrackMap};

/// Reward for the step that reaches the finish line.
pub const FINISH_REWARD: f64 = 0.0;

/// A loaded track together with the dynamics the car is simulated under.
/// Read-only after construction; cars borrow it.
#[derive(Debug, Clone)]
pub struct Racetrack {
    map: TrackMap,
    actions: ActionSet,
    x_velocity: IntRange,
    y_velocity: IntRange,
    p_transition: f64,
    step_reward: f64,
    crash_policy: CrashPolicy,
    seed: Option<u64>,
}

impl Racetrack {
    pub fn new(map: TrackMap, config: &EnvConfig) -> Result<Self, EnvError> {
        config.validate()?;
        let actions = ActionSet::from_range(config.accel_range)?;

        Ok(Racetrack {
            map,
            actions,
            x_velocity: config.x_velocity_range,
            y_velocity: config.y_velocity_range,
            p_transition: config.p_transition,
            step_reward: config.step_reward,
            crash_policy: config.crash_policy,
            seed: config.seed,
        })
    }

    /// Load the track file at `path` and build the environment.
    pub fn from_path(path: impl AsRef<Path>, config: &EnvConfig) -> Result<Self, EnvError> {
        let map = TrackMap::from_path(path)?;
        Self::new(map, config)
    }

    pub fn map(&self) -> &TrackMap {
        &self.map
    }

    pub fn actions(&self) -> &ActionSet {
        &self.actions
    }

    pub fn x_velocity_range(&self) -> IntRange {
        self.x_velocity
    }

    pub fn y_velocity_range(&self) -> IntRange {
        self.y_velocity
    }

    pub fn p_transition(&self) -> f64 {
        self.p_transition
    }

    pub fn step_reward(&self) -> f64 {
        self.step_reward
    }

    /// Default crash policy for cars built with [`crate::Car::from_racetrack`].
    pub fn crash_policy(&self) -> CrashPolicy {
        self.crash_policy
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Reward observed after a step.
    pub fn reward(&self, finished: bool) -> f64 {
        if finished {
            FINISH_REWARD
        } else {
            self.step_reward
        }
    }
}
