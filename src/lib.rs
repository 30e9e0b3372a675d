//! # Namesake
//!
//! Explainable similarity matching for romanized Hindi personal names.
//!
//! Two name strings become a fixed, ordered vector of 21 orthographic,
//! phonetic and structural features. A trained classifier turns that vector
//! into a match probability; without a model the engine degrades to a
//! deterministic edit-ratio heuristic and flags its answers accordingly.
//!
//! ## Quick Start
//!
//! ### From the command line
//!
//! ```bash
//! namesake compare "Deepak Verma" "Dipak Varma"
//! namesake --model model.bin search "Suresh Kumar" "Sursh Kumaar" "Ramesh Kumar"
//! namesake featurize --input pairs.csv --output matrix.csv
//! ```
//!
//! ### As a Library
//!
//! ```rust
//! use namesake::prelude::*;
//!
//! let matcher = FallbackMatcher::new();
//! let candidates = vec!["Suresh Kumar".to_string(), "Neha Gupta".to_string()];
//! let matches = matcher.find_matches("Suresh Kumar", &candidates, 0.7);
//! assert_eq!(matches[0].name, "Suresh Kumar");
//! ```
//!
//! ## Crate Structure
//!
//! - `namesake-core` - tokenization, similarity primitives, the feature contract
//!   and training-matrix generation
//! - `namesake-matcher` - classifier backends, model-backed and fallback matchers
//! - `namesake-storage` - model artifact persistence
//! - `namesake-api` - request validation, responses and the match service

// Re-export core types
pub use namesake_core::{
    extract, feature_names, featurize_pairs, read_pairs, write_matrix_csv,
    Error, Feature, FeatureExtractor, FeatureVector, LabeledPair, Name, Result,
    TrainingMatrix, FEATURE_COUNT, FEATURE_NAMES, FEATURE_SCHEMA_VERSION,
};

// Re-export matching
pub use namesake_matcher::{
    Classifier, ClassifierBackend, DecisionTree, FallbackMatcher, FeatureImportance,
    LogisticModel, MatchConfig, MatchResult, ModelMatcher, NameMatcher, RankedMatch,
    SearchStats, TreeEnsemble, TreeNode,
};

// Re-export storage
pub use namesake_storage::{import_json, ArtifactDescription, ModelArtifact, ModelStore};

// Re-export API
pub use namesake_api::{
    CompareRequest, CompareResponse, FeatureImportanceResponse, MatchService, SearchRequest,
    SearchResponse,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        extract, Classifier, CompareRequest, Error, FallbackMatcher, Feature, FeatureVector,
        MatchConfig, MatchResult, MatchService, ModelMatcher, ModelStore, NameMatcher,
        RankedMatch, Result, SearchRequest,
    };
}
