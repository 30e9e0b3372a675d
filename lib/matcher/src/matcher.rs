//! Match engines
//!
//! [`ModelMatcher`] asks a trained [`Classifier`] for a match probability;
//! [`FallbackMatcher`] is the deterministic degraded mode used when no model
//! could be loaded. Both expose the same [`NameMatcher`] interface.

use crate::classifier::{clamp_probability, Classifier};
use crate::explain::{FeatureImportance, MatchResult, RankedMatch};
use namesake_core::{extract, feature_names, Error, Feature, Result, FEATURE_NAMES};
use rayon::prelude::*;
use std::sync::Arc;
use tracing::debug;

/// Pairwise match decisions and ranked search
pub trait NameMatcher: Send + Sync {
    /// Score one pair; `is_match` is `confidence >= threshold`
    fn predict_match(&self, name1: &str, name2: &str, threshold: f64) -> MatchResult;

    /// Importance weights used for reporting
    fn feature_importance(&self) -> Option<FeatureImportance>;

    /// False for heuristic engines not backed by a trained model
    fn is_model_backed(&self) -> bool;

    /// Whether candidate scoring may run on the rayon pool
    fn parallel_search(&self) -> bool {
        true
    }

    /// Score every candidate against `query_name`, keep the matches and
    /// sort them by confidence, highest first
    ///
    /// Duplicate candidates are scored and returned separately. Ties keep
    /// input order.
    fn find_matches(
        &self,
        query_name: &str,
        candidate_names: &[String],
        threshold: f64,
    ) -> Vec<RankedMatch> {
        let score = |candidate: &String| {
            let result = self.predict_match(query_name, candidate, threshold);
            result.is_match.then(|| RankedMatch {
                name: candidate.clone(),
                confidence: result.confidence,
            })
        };

        let mut matches: Vec<RankedMatch> = if self.parallel_search() {
            candidate_names.par_iter().filter_map(score).collect()
        } else {
            candidate_names.iter().filter_map(score).collect()
        };

        matches.sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        debug!(
            query = query_name,
            candidates = candidate_names.len(),
            matches = matches.len(),
            threshold,
            "search complete"
        );
        matches
    }
}

/// Model-backed matcher
///
/// Owns a shared handle to an immutable classifier; the classifier is never
/// updated here.
#[derive(Clone)]
pub struct ModelMatcher {
    classifier: Arc<dyn Classifier>,
    feature_names: Vec<String>,
    parallel: bool,
}

impl ModelMatcher {
    /// Build a matcher around `classifier`
    ///
    /// `names` is the feature order the classifier was trained on; it must
    /// equal the extractor's order exactly. The classifier must pass its own
    /// [`Classifier::validate`].
    pub fn new(classifier: Arc<dyn Classifier>, names: Vec<String>) -> Result<Self> {
        if names.iter().map(String::as_str).ne(FEATURE_NAMES.iter().copied()) {
            return Err(Error::FeatureMismatch {
                expected: feature_names(),
                actual: names,
            });
        }
        classifier.validate()?;
        Ok(Self {
            classifier,
            feature_names: names,
            parallel: true,
        })
    }

    /// Convenience constructor using the extractor's own feature order
    pub fn from_classifier<C: Classifier + 'static>(classifier: C) -> Result<Self> {
        Self::new(Arc::new(classifier), feature_names())
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn feature_names(&self) -> &[String] {
        &self.feature_names
    }

    pub fn classifier(&self) -> &Arc<dyn Classifier> {
        &self.classifier
    }
}

impl NameMatcher for ModelMatcher {
    fn predict_match(&self, name1: &str, name2: &str, threshold: f64) -> MatchResult {
        let features = extract(name1, name2);
        let confidence = clamp_probability(self.classifier.predict_proba(&features));
        debug!(name1, name2, confidence, threshold, "model prediction");
        MatchResult {
            is_match: confidence >= threshold,
            confidence,
            features,
            model_backed: true,
        }
    }

    fn feature_importance(&self) -> Option<FeatureImportance> {
        self.classifier.feature_importances()
    }

    fn is_model_backed(&self) -> bool {
        true
    }

    fn parallel_search(&self) -> bool {
        self.parallel
    }
}

/// Degraded-mode matcher: confidence is the whole-name edit ratio
///
/// Deterministic, with no classifier behind it. Results are flagged
/// `model_backed = false`.
#[derive(Debug, Clone)]
pub struct FallbackMatcher {
    parallel: bool,
}

impl Default for FallbackMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FallbackMatcher {
    pub fn new() -> Self {
        Self { parallel: true }
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }
}

impl NameMatcher for FallbackMatcher {
    fn predict_match(&self, name1: &str, name2: &str, threshold: f64) -> MatchResult {
        let features = extract(name1, name2);
        let confidence = features.get(Feature::LevenshteinRatio);
        debug!(name1, name2, confidence, threshold, "fallback prediction");
        MatchResult {
            is_match: confidence >= threshold,
            confidence,
            features,
            model_backed: false,
        }
    }

    fn feature_importance(&self) -> Option<FeatureImportance> {
        Some(FeatureImportance::single(Feature::LevenshteinRatio))
    }

    fn is_model_backed(&self) -> bool {
        false
    }

    fn parallel_search(&self) -> bool {
        self.parallel
    }
}
