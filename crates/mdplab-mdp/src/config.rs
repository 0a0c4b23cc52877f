use std::{fs, path::Path};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Floating point tolerance used when validating probability sums.
pub const PROB_TOLERANCE: f64 = 1e-12;

const DEFAULT_MODEL_CONFIG_YAML: &str = include_str!("../config/model.default.yaml");

/// Numeric settings applied while compiling an MDP.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Allowed deviation of a row total from 1, and allowed overshoot of
    /// explicit probabilities before the `"*"` entry.
    pub tolerance: f64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        ModelConfig {
            tolerance: PROB_TOLERANCE,
        }
    }
}

impl ModelConfig {
    /// Parse a model config from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: ModelConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a model config from a YAML file path.
    pub fn from_yaml_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let yaml = fs::read_to_string(path)?;
        Self::from_yaml_str(&yaml)
    }

    /// Return the default YAML config included with this crate.
    pub fn default_yaml() -> &'static str {
        DEFAULT_MODEL_CONFIG_YAML
    }

    /// Parse the default YAML config included with this crate.
    pub fn from_default_yaml() -> Result<Self, ConfigError> {
        Self::from_yaml_str(Self::default_yaml())
    }

    /// Override the tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "tolerance must be finite and >= 0, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Error type for loading and validating `ModelConfig`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("invalid model config: {0}")]
    Invalid(String),
}
