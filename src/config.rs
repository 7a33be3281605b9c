//! Engine configuration

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Tunables for the knowledge engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Default threshold for similar-project queries
    pub project_similarity_threshold: f64,
    /// Default threshold for similar-pattern queries
    pub pattern_similarity_threshold: f64,
    /// Minimum score for derived `SimilarTo` edges
    pub similarity_edge_threshold: f64,
    /// Derive `SimilarTo` edges when the portfolio carries no pre-scored triples
    pub auto_similarity_edges: bool,
    /// Number of hubs returned when the caller gives no limit
    pub default_hub_limit: usize,
    /// Score candidate pairs on the rayon pool
    pub parallel_scoring: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            project_similarity_threshold: 0.5,
            pattern_similarity_threshold: 0.7,
            similarity_edge_threshold: 0.7,
            auto_similarity_edges: true,
            default_hub_limit: 10,
            parallel_scoring: true,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a YAML document. Missing keys take their defaults.
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        let thresholds = [
            ("project_similarity_threshold", self.project_similarity_threshold),
            ("pattern_similarity_threshold", self.pattern_similarity_threshold),
            ("similarity_edge_threshold", self.similarity_edge_threshold),
        ];
        for (name, value) in thresholds {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }
        if self.default_hub_limit == 0 {
            return Err(ConfigError::Invalid(
                "default_hub_limit must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }
}
