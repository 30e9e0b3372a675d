//! Request and response bodies
//!
//! Requests deserialize leniently (every field may be absent) and are
//! checked by `validate`, so a missing field becomes an
//! [`Error::InvalidInput`] instead of a decode failure.

use namesake_core::{Error, Result};
use namesake_matcher::{
    validate_threshold, FeatureImportance, MatchResult, RankedMatch, SearchStats,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CompareRequest {
    #[serde(default)]
    pub name1: Option<String>,
    #[serde(default)]
    pub name2: Option<String>,
    #[serde(default)]
    pub threshold: Option<f64>,
}

/// A compare request whose names are known to be present
#[derive(Debug, Clone, Copy)]
pub struct ValidCompare<'a> {
    pub name1: &'a str,
    pub name2: &'a str,
    pub threshold: Option<f64>,
}

impl CompareRequest {
    pub fn new(name1: impl Into<String>, name2: impl Into<String>) -> Self {
        Self {
            name1: Some(name1.into()),
            name2: Some(name2.into()),
            threshold: None,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn validate(&self) -> Result<ValidCompare<'_>> {
        let name1 = required_name(&self.name1, "name1")?;
        let name2 = required_name(&self.name2, "name2")?;
        if let Some(t) = self.threshold {
            validate_threshold(t)?;
        }
        Ok(ValidCompare {
            name1,
            name2,
            threshold: self.threshold,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query_name: Option<String>,
    /// Absent is an error; present but empty yields no matches
    #[serde(default)]
    pub candidate_names: Option<Vec<String>>,
    #[serde(default)]
    pub threshold: Option<f64>,
}

#[derive(Debug, Clone, Copy)]
pub struct ValidSearch<'a> {
    pub query_name: &'a str,
    pub candidate_names: &'a [String],
    pub threshold: Option<f64>,
}

impl SearchRequest {
    pub fn new(query_name: impl Into<String>, candidate_names: Vec<String>) -> Self {
        Self {
            query_name: Some(query_name.into()),
            candidate_names: Some(candidate_names),
            threshold: None,
        }
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = Some(threshold);
        self
    }

    pub fn validate(&self) -> Result<ValidSearch<'_>> {
        let query_name = required_name(&self.query_name, "query_name")?;
        let candidate_names = self
            .candidate_names
            .as_deref()
            .ok_or_else(|| Error::InvalidInput("candidate_names is required".to_string()))?;
        if let Some(t) = self.threshold {
            validate_threshold(t)?;
        }
        Ok(ValidSearch {
            query_name,
            candidate_names,
            threshold: self.threshold,
        })
    }
}

fn required_name<'a>(value: &'a Option<String>, field: &str) -> Result<&'a str> {
    match value.as_deref() {
        Some(name) if !name.is_empty() => Ok(name),
        _ => Err(Error::InvalidInput(format!("{} is required", field))),
    }
}

/// `{is_match, confidence, features, model_backed}`
pub type CompareResponse = MatchResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResponse {
    pub matches: Vec<RankedMatch>,
    pub model_backed: bool,
    pub stats: SearchStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureImportanceResponse {
    /// `null` when the model does not expose importances
    pub feature_importance: Option<FeatureImportance>,
    pub model_backed: bool,
}
