use std::{fmt, fs, path::Path, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{EnvError, IntRange};

const DEFAULT_ENV_CONFIG_YAML: &str = include_str!("../config/env.default.yaml");

/// What happens to the car after it lands on a wall or leaves the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrashPolicy {
    /// Snap to the closest track or start cell and stop.
    #[default]
    Nearest,
    /// Return to a random start cell, exactly like a reset.
    Restart,
}

impl fmt::Display for CrashPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrashPolicy::Nearest => write!(f, "nearest"),
            CrashPolicy::Restart => write!(f, "restart"),
        }
    }
}

impl FromStr for CrashPolicy {
    type Err = EnvError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "nearest" => Ok(CrashPolicy::Nearest),
            "restart" => Ok(CrashPolicy::Restart),
            _ => Err(EnvError::UnknownCrashPolicy {
                value: value.to_string(),
            }),
        }
    }
}

/// Dynamics and reward settings for a racetrack environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvConfig {
    /// Probability that the chosen action is applied instead of a forced idle.
    pub p_transition: f64,
    /// Reward for every step that does not finish.
    pub step_reward: f64,
    pub accel_range: IntRange,
    pub x_velocity_range: IntRange,
    pub y_velocity_range: IntRange,
    pub crash_policy: CrashPolicy,
    /// Seed for start-cell selection. `None` draws from OS entropy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        EnvConfig {
            p_transition: 0.8,
            step_reward: -1.0,
            accel_range: IntRange::new(-1, 1),
            x_velocity_range: IntRange::new(-5, 5),
            y_velocity_range: IntRange::new(-5, 5),
            crash_policy: CrashPolicy::Nearest,
            seed: None,
        }
    }
}

impl EnvConfig {
    /// Parse an environment config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, EnvError> {
        let config: EnvConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse an environment config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, EnvError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_ENV_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, EnvError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    pub fn validate(&self) -> Result<(), EnvError> {
        if !(0.0..=1.0).contains(&self.p_transition) {
            return Err(EnvError::InvalidProbability {
                name: "p_transition",
                value: self.p_transition,
            });
        }
        if !self.step_reward.is_finite() {
            return Err(EnvError::InvalidReward {
                value: self.step_reward,
            });
        }
        self.accel_range.validate("acceleration")?;
        self.x_velocity_range.validate("x velocity")?;
        self.y_velocity_range.validate("y velocity")?;
        Ok(())
    }
}
