//! # Namesake Core
//!
//! Feature extraction for romanized Hindi personal names.
//!
//! This crate turns a pair of raw name strings into a fixed-order numeric
//! vector capturing orthographic, phonetic and structural similarity:
//!
//! - [`Name`] / [`NameParts`] - lower-cased tokenization, first/last token view
//! - [`edit`] - edit distance, normalized edit ratio, adjacent transpositions
//! - [`phonetic`] - Soundex, Metaphone and NYSIIS code equality
//! - [`translit`] - ordered transliteration normalization
//! - [`FeatureVector`] - the 21 features in [`Feature::ALL`] order
//! - [`dataset`] - training-matrix generation from labeled pairs
//!
//! ## Example
//!
//! ```rust
//! use namesake_core::{extract, Feature};
//!
//! let features = extract("Suresh Kumar", "Sursh Kumaar");
//! assert_eq!(features.get(Feature::FirstLetterMatch), 1.0);
//! assert_eq!(features.as_slice().len(), 21);
//! ```

pub mod dataset;
pub mod edit;
pub mod error;
pub mod features;
pub mod name;
pub mod ngram;
pub mod phonetic;
pub mod translit;

pub use dataset::{featurize_pairs, read_pairs, write_matrix_csv, LabeledPair, TrainingMatrix};
pub use error::{Error, Result};
pub use features::{
    extract, feature_names, Feature, FeatureExtractor, FeatureVector, FEATURE_COUNT,
    FEATURE_NAMES, FEATURE_SCHEMA_VERSION,
};
pub use name::{Name, NameParts};
pub use phonetic::{PhoneticEncoders, PhoneticScheme};
pub use translit::{normalize_transliteration, TRANSLITERATION_RULES};
