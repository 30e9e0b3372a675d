//! Persisted model artifact
//!
//! Bundles a trained classifier with the feature contract it was trained
//! against, so a reload can refuse models built for a different feature
//! order or schema version.

use chrono::{DateTime, Utc};
use namesake_core::{feature_names, Error, Result, FEATURE_NAMES, FEATURE_SCHEMA_VERSION};
use namesake_matcher::{ClassifierBackend, ModelMatcher};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelArtifact {
    /// Feature contract version the model was trained on
    pub schema_version: u32,
    /// Feature order the model expects
    pub feature_names: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    pub backend: ClassifierBackend,
}

impl ModelArtifact {
    /// Wrap a backend trained on the current feature contract
    pub fn new(backend: ClassifierBackend) -> Self {
        Self {
            schema_version: FEATURE_SCHEMA_VERSION,
            feature_names: feature_names(),
            created_at: Some(Utc::now()),
            backend,
        }
    }

    /// Check the feature contract and the backend structure
    pub fn validate(&self) -> Result<()> {
        if self.schema_version != FEATURE_SCHEMA_VERSION {
            return Err(Error::SchemaVersion {
                expected: FEATURE_SCHEMA_VERSION,
                actual: self.schema_version,
            });
        }
        if self.feature_names.iter().map(String::as_str).ne(FEATURE_NAMES.iter().copied()) {
            return Err(Error::FeatureMismatch {
                expected: feature_names(),
                actual: self.feature_names.clone(),
            });
        }
        self.backend.validate()
    }

    /// Validate and build a model-backed matcher
    pub fn into_matcher(self) -> Result<ModelMatcher> {
        self.validate()?;
        ModelMatcher::new(Arc::new(self.backend), self.feature_names)
    }
}
