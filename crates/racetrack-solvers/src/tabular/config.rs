use std::{fmt, fs, path::Path};

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

const DEFAULT_SOLVER_CONFIG_YAML: &str = include_str!("../../config/solver.default.yaml");

/// Hyperparameters shared by every solver. Each solver reads only the fields it uses.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    pub learning_rate: f64,
    /// Learning-rate decay stops at this floor.
    pub min_learning_rate: f64,
    pub discount_rate: f64,
    /// Multiplier applied to exploration and learning rate after every episode.
    pub decay_rate: f64,
    pub explore_probability: f64,
    /// Value iteration stops once the largest per-sweep change is at or below this.
    pub convergence_threshold: f64,
    /// Cap on value-iteration sweeps.
    pub max_iterations: usize,
    pub episodes: usize,
    pub max_episode_steps: usize,
    pub test_step_cap: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            learning_rate: 0.25,
            min_learning_rate: 0.01,
            discount_rate: 0.95,
            decay_rate: 0.99,
            explore_probability: 0.3,
            convergence_threshold: 0.01,
            max_iterations: 100,
            episodes: 500,
            max_episode_steps: 1000,
            test_step_cap: 500,
            seed: None,
        }
    }
}

impl SolverConfig {
    /// Parse a solver config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, SolverConfigError> {
        let config: SolverConfig = serde_yaml::from_str(yaml).map_err(SolverConfigError::Yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a solver config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, SolverConfigError> {
        let yaml = fs::read_to_string(path).map_err(SolverConfigError::Io)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_SOLVER_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, SolverConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    pub fn validate(&self) -> Result<(), SolverConfigError> {
        let unit = 0.0..=1.0;
        if !(self.learning_rate > 0.0 && self.learning_rate <= 1.0) {
            return Err(SolverConfigError::Invalid(
                "learning_rate must be in (0, 1]".to_string(),
            ));
        }
        if !unit.contains(&self.min_learning_rate) {
            return Err(SolverConfigError::Invalid(
                "min_learning_rate must be in [0, 1]".to_string(),
            ));
        }
        if !unit.contains(&self.discount_rate) {
            return Err(SolverConfigError::Invalid(
                "discount_rate must be in [0, 1]".to_string(),
            ));
        }
        if !(self.decay_rate > 0.0 && self.decay_rate <= 1.0) {
            return Err(SolverConfigError::Invalid(
                "decay_rate must be in (0, 1]".to_string(),
            ));
        }
        if !unit.contains(&self.explore_probability) {
            return Err(SolverConfigError::Invalid(
                "explore_probability must be in [0, 1]".to_string(),
            ));
        }
        if !self.convergence_threshold.is_finite() || self.convergence_threshold < 0.0 {
            return Err(SolverConfigError::Invalid(
                "convergence_threshold must be finite and >= 0".to_string(),
            ));
        }
        if self.max_iterations == 0 {
            return Err(SolverConfigError::Invalid(
                "max_iterations must be greater than 0".to_string(),
            ));
        }
        if self.episodes == 0 {
            return Err(SolverConfigError::Invalid(
                "episodes must be greater than 0".to_string(),
            ));
        }
        if self.max_episode_steps == 0 {
            return Err(SolverConfigError::Invalid(
                "max_episode_steps must be greater than 0".to_string(),
            ));
        }
        if self.test_step_cap == 0 {
            return Err(SolverConfigError::Invalid(
                "test_step_cap must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Solver RNG: seeded when `seed` is set, OS entropy otherwise.
    pub(crate) fn rng(&self) -> ChaCha8Rng {
        match self.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        }
    }
}

/// Error type for loading and validating `SolverConfig`.
#[derive(Debug)]
pub enum SolverConfigError {
    Io(std::io::Error),
    Yaml(serde_yaml::Error),
    Invalid(String),
}

impl fmt::Display for SolverConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolverConfigError::Io(err) => write!(f, "failed to read config file: {err}"),
            SolverConfigError::Yaml(err) => write!(f, "failed to parse config YAML: {err}"),
            SolverConfigError::Invalid(err) => write!(f, "invalid solver config: {err}"),
        }
    }
}

impl std::error::Error for SolverConfigError {}
