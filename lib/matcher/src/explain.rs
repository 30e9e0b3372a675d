//! Match results and their explanations
//!
//! Every decision carries the feature vector it was made from, and search
//! results can be summarized for reporting.

use namesake_core::{Feature, FeatureVector, FEATURE_COUNT, FEATURE_NAMES};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};

/// Outcome of comparing one name pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    /// `confidence >= threshold`
    pub is_match: bool,
    /// Match probability in [0, 1]
    pub confidence: f64,
    /// Feature name to value, in vector order
    pub features: FeatureVector,
    /// False when produced by the degraded edit-ratio heuristic
    pub model_backed: bool,
}

/// A candidate that passed the threshold in a search
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    pub name: String,
    pub confidence: f64,
}

/// Per-feature importance weights aligned to the feature order
///
/// Serializes as a map from feature name to weight, in vector order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureImportance([f64; FEATURE_COUNT]);

impl FeatureImportance {
    pub fn from_array(weights: [f64; FEATURE_COUNT]) -> Self {
        Self(weights)
    }

    /// `None` unless `weights` has exactly one entry per feature
    pub fn from_slice(weights: &[f64]) -> Option<Self> {
        let arr: [f64; FEATURE_COUNT] = weights.try_into().ok()?;
        Some(Self(arr))
    }

    /// All weight on a single feature
    pub fn single(feature: Feature) -> Self {
        let mut arr = [0.0; FEATURE_COUNT];
        arr[feature.index()] = 1.0;
        Self(arr)
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.0[feature.index()]
    }

    pub fn total(&self) -> f64 {
        self.0.iter().sum()
    }

    /// Features sorted by weight, heaviest first; ties keep vector order
    pub fn ranked(&self) -> Vec<(&'static str, f64)> {
        let mut ranked: Vec<(&'static str, f64)> = FEATURE_NAMES
            .iter()
            .copied()
            .zip(self.0.iter().copied())
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

impl Serialize for FeatureImportance {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (name, weight) in FEATURE_NAMES.iter().zip(self.0.iter()) {
            map.serialize_entry(name, weight)?;
        }
        map.end()
    }
}

/// Summary statistics for a search
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchStats {
    /// Number of candidates scored
    pub candidates_count: usize,
    /// Number of candidates at or above the threshold
    pub matches_count: usize,
    /// Confidence of the best match
    pub best_confidence: f64,
    /// Mean confidence over the matches
    pub mean_confidence: f64,
}

impl SearchStats {
    /// Compute stats from ranked matches (sorted best first)
    pub fn compute(matches: &[RankedMatch], candidates_count: usize) -> Self {
        if matches.is_empty() {
            return Self {
                candidates_count,
                matches_count: 0,
                best_confidence: 0.0,
                mean_confidence: 0.0,
            };
        }

        let sum: f64 = matches.iter().map(|m| m.confidence).sum();
        Self {
            candidates_count,
            matches_count: matches.len(),
            best_confidence: matches[0].confidence,
            mean_confidence: sum / matches.len() as f64,
        }
    }
}
