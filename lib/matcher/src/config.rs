//! Matcher configuration

use namesake_core::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Runtime configuration for a match service
///
/// Every field has a default, so an empty JSON object is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchConfig {
    /// Threshold used when a request does not carry its own
    #[serde(default = "default_threshold")]
    pub threshold: f64,

    /// Score search candidates on the rayon pool
    #[serde(default = "default_parallel_search")]
    pub parallel_search: bool,

    /// Path of the persisted model artifact
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_path: Option<PathBuf>,
}

fn default_threshold() -> f64 {
    0.5
}

fn default_parallel_search() -> bool {
    true
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            parallel_search: default_parallel_search(),
            model_path: None,
        }
    }
}

impl MatchConfig {
    /// Load and validate a JSON config file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = std::fs::read(path.as_ref())?;
        let config: MatchConfig = serde_json::from_slice(&data)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_threshold(self.threshold)
    }
}

/// A threshold must be a finite probability
pub fn validate_threshold(threshold: f64) -> Result<()> {
    if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
        return Err(Error::InvalidInput(format!(
            "threshold must be within [0, 1], got {}",
            threshold
        )));
    }
    Ok(())
}
