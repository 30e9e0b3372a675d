//! # Namesake Matcher
//!
//! Match decisions on top of the feature contract in `namesake-core`.
//!
//! ## Features
//!
//! - **Classifier capability**: any backend that maps a feature vector to a
//!   match probability ([`Classifier`]); tree ensembles and logistic models
//!   ship in-crate
//! - **Pairwise decisions**: [`NameMatcher::predict_match`] with a per-call
//!   threshold
//! - **Ranked search**: [`NameMatcher::find_matches`], optionally parallel
//! - **Degraded mode**: [`FallbackMatcher`] scores by edit ratio alone and
//!   flags its results as not model-backed
//! - **Explainability**: every result carries its feature vector
//!
//! ## Example
//!
//! ```rust
//! use namesake_matcher::{FallbackMatcher, NameMatcher};
//!
//! let matcher = FallbackMatcher::new();
//! let result = matcher.predict_match("Rahul Singh", "Rahul Sing", 0.5);
//! assert!(result.is_match);
//! assert!(!result.model_backed);
//! ```
//!
//! ## Flow
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ name1/name2 │────>│  Extractor  │────>│ Classifier  │
//! │   (raw)     │     │ (21 feats)  │     │ (p(match))  │
//! └─────────────┘     └─────────────┘     └─────────────┘
//!                                                │
//!                                         ┌──────┴──────┐
//!                                         │ MatchResult │
//!                                         └─────────────┘
//! ```

pub mod classifier;
pub mod config;
pub mod explain;
pub mod matcher;

pub use classifier::{
    clamp_probability, Classifier, ClassifierBackend, ClassifierMut, DecisionTree,
    LogisticModel, SerializedClassifier, TreeEnsemble, TreeNode,
};
pub use config::{validate_threshold, MatchConfig};
pub use explain::{FeatureImportance, MatchResult, RankedMatch, SearchStats};
pub use matcher::{FallbackMatcher, ModelMatcher, NameMatcher};
