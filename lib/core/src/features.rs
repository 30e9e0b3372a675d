//! Pairwise name features
//!
//! [`extract`] turns two raw names into a [`FeatureVector`] of
//! [`FEATURE_COUNT`] values in the order declared by [`Feature::ALL`]. The
//! same function feeds training-matrix generation and inference; a model is
//! only meaningful against the exact order and semantics it was trained on,
//! which [`FEATURE_SCHEMA_VERSION`] identifies.

use crate::edit::{edit_distance, edit_ratio, has_transposition};
use crate::name::Name;
use crate::ngram::common_ngrams;
use crate::phonetic::{PhoneticEncoders, PhoneticScheme};
use crate::translit::normalize_transliteration;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// Version of the feature contract (order, semantics, transliteration table)
pub const FEATURE_SCHEMA_VERSION: u32 = 1;

/// Number of features produced per name pair
pub const FEATURE_COUNT: usize = 21;

/// A single named feature; the discriminant is its position in the vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Feature {
    LevenshteinDist = 0,
    LevenshteinRatio,
    FirstLevenshteinDist,
    FirstLevenshteinRatio,
    LastLevenshteinDist,
    LastLevenshteinRatio,
    SoundexMatchFirst,
    SoundexMatchLast,
    MetaphoneMatchFirst,
    MetaphoneMatchLast,
    NysiisMatchFirst,
    NysiisMatchLast,
    NormalizedLevenshteinRatio,
    CommonBigrams,
    CommonTrigrams,
    FirstLetterMatch,
    LastFirstLetterMatch,
    LenDiff,
    LenRatio,
    HasFirstTransposition,
    HasLastTransposition,
}

impl Feature {
    /// Every feature in vector order
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::LevenshteinDist,
        Feature::LevenshteinRatio,
        Feature::FirstLevenshteinDist,
        Feature::FirstLevenshteinRatio,
        Feature::LastLevenshteinDist,
        Feature::LastLevenshteinRatio,
        Feature::SoundexMatchFirst,
        Feature::SoundexMatchLast,
        Feature::MetaphoneMatchFirst,
        Feature::MetaphoneMatchLast,
        Feature::NysiisMatchFirst,
        Feature::NysiisMatchLast,
        Feature::NormalizedLevenshteinRatio,
        Feature::CommonBigrams,
        Feature::CommonTrigrams,
        Feature::FirstLetterMatch,
        Feature::LastFirstLetterMatch,
        Feature::LenDiff,
        Feature::LenRatio,
        Feature::HasFirstTransposition,
        Feature::HasLastTransposition,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        FEATURE_NAMES[self.index()]
    }

    pub fn from_name(name: &str) -> Option<Feature> {
        FEATURE_NAMES
            .iter()
            .position(|n| *n == name)
            .map(|i| Feature::ALL[i])
    }

    fn phonetic(scheme: PhoneticScheme) -> (Feature, Feature) {
        match scheme {
            PhoneticScheme::Soundex => (Feature::SoundexMatchFirst, Feature::SoundexMatchLast),
            PhoneticScheme::Metaphone => {
                (Feature::MetaphoneMatchFirst, Feature::MetaphoneMatchLast)
            }
            PhoneticScheme::Nysiis => (Feature::NysiisMatchFirst, Feature::NysiisMatchLast),
        }
    }
}

/// Feature names in vector order
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "levenshtein_dist",
    "levenshtein_ratio",
    "first_levenshtein_dist",
    "first_levenshtein_ratio",
    "last_levenshtein_dist",
    "last_levenshtein_ratio",
    "soundex_match_first",
    "soundex_match_last",
    "metaphone_match_first",
    "metaphone_match_last",
    "nysiis_match_first",
    "nysiis_match_last",
    "normalized_levenshtein_ratio",
    "common_bigrams",
    "common_trigrams",
    "first_letter_match",
    "last_first_letter_match",
    "len_diff",
    "len_ratio",
    "has_first_transposition",
    "has_last_transposition",
];

/// Owned copy of [`FEATURE_NAMES`], the form classifiers and artifacts carry
pub fn feature_names() -> Vec<String> {
    FEATURE_NAMES.iter().map(|s| s.to_string()).collect()
}

/// Fixed-length, fixed-order feature vector for one name pair
///
/// Serializes as a map from feature name to value, in vector order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; FEATURE_COUNT]);

impl FeatureVector {
    pub fn from_array(values: [f64; FEATURE_COUNT]) -> Self {
        Self(values)
    }

    pub fn get(&self, feature: Feature) -> f64 {
        self.0[feature.index()]
    }

    fn set(&mut self, feature: Feature, value: f64) {
        self.0[feature.index()] = value;
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.0.to_vec()
    }

    /// `(name, value)` pairs in vector order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.0.iter().copied())
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self([0.0; FEATURE_COUNT])
    }
}

impl Serialize for FeatureVector {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(FEATURE_COUNT))?;
        for (name, value) in self.iter() {
            map.serialize_entry(name, &value)?;
        }
        map.end()
    }
}

/// Reusable extractor; holds the phonetic encoders
#[derive(Default)]
pub struct FeatureExtractor {
    encoders: PhoneticEncoders,
}

impl FeatureExtractor {
    pub fn new() -> Self {
        Self {
            encoders: PhoneticEncoders::new(),
        }
    }

    /// Compute the feature vector for `name1` against `name2`
    ///
    /// Total: every input, including empty and whitespace-only strings,
    /// produces a vector. Token-position features depend on argument order.
    pub fn extract(&self, name1: &str, name2: &str) -> FeatureVector {
        let n1 = Name::parse(name1);
        let n2 = Name::parse(name2);
        let p1 = n1.name_parts();
        let p2 = n2.name_parts();

        let mut v = FeatureVector::default();

        v.set(Feature::LevenshteinDist, edit_distance(n1.full(), n2.full()) as f64);
        v.set(Feature::LevenshteinRatio, edit_ratio(n1.full(), n2.full()));

        v.set(Feature::FirstLevenshteinDist, edit_distance(p1.first, p2.first) as f64);
        v.set(Feature::FirstLevenshteinRatio, edit_ratio(p1.first, p2.first));

        v.set(Feature::LastLevenshteinDist, edit_distance(p1.last, p2.last) as f64);
        v.set(Feature::LastLevenshteinRatio, edit_ratio(p1.last, p2.last));

        for scheme in PhoneticScheme::ALL {
            let (first, last) = Feature::phonetic(scheme);
            v.set(first, self.encoders.codes_match(scheme, p1.first, p2.first) as f64);
            v.set(last, self.encoders.codes_match(scheme, p1.last, p2.last) as f64);
        }

        let norm1 = normalize_transliteration(n1.full());
        let norm2 = normalize_transliteration(n2.full());
        v.set(Feature::NormalizedLevenshteinRatio, edit_ratio(&norm1, &norm2));

        v.set(Feature::CommonBigrams, common_ngrams(n1.full(), n2.full(), 2) as f64);
        v.set(Feature::CommonTrigrams, common_ngrams(n1.full(), n2.full(), 3) as f64);

        v.set(Feature::FirstLetterMatch, first_letter_match(p1.first, p2.first) as f64);
        v.set(Feature::LastFirstLetterMatch, first_letter_match(p1.last, p2.last) as f64);

        let (len1, len2) = (n1.char_len(), n2.char_len());
        v.set(Feature::LenDiff, len1.abs_diff(len2) as f64);
        v.set(Feature::LenRatio, length_ratio(len1, len2));

        v.set(Feature::HasFirstTransposition, has_transposition(p1.first, p2.first) as f64);
        v.set(Feature::HasLastTransposition, has_transposition(p1.last, p2.last) as f64);

        v
    }
}

/// Compute the feature vector for a name pair
pub fn extract(name1: &str, name2: &str) -> FeatureVector {
    FeatureExtractor::new().extract(name1, name2)
}

/// 1 when both tokens are non-empty and start with the same character
fn first_letter_match(a: &str, b: &str) -> u8 {
    match (a.chars().next(), b.chars().next()) {
        (Some(ca), Some(cb)) if ca == cb => 1,
        _ => 0,
    }
}

/// Shorter length over longer length; 0 when both are empty
fn length_ratio(a: usize, b: usize) -> f64 {
    let longest = a.max(b);
    if longest == 0 {
        0.0
    } else {
        a.min(b) as f64 / longest as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_order_is_consistent() {
        assert_eq!(Feature::ALL.len(), FEATURE_COUNT);
        for (i, feature) in Feature::ALL.iter().enumerate() {
            assert_eq!(feature.index(), i);
            assert_eq!(Feature::from_name(feature.name()), Some(*feature));
        }
        assert_eq!(Feature::LevenshteinDist.name(), "levenshtein_dist");
        assert_eq!(Feature::HasLastTransposition.name(), "has_last_transposition");
        assert_eq!(Feature::from_name("unknown"), None);
    }

    #[test]
    fn test_identical_names() {
        let v = extract("Suresh Kumar", "suresh kumar");
        assert_eq!(v.get(Feature::LevenshteinDist), 0.0);
        assert_eq!(v.get(Feature::LevenshteinRatio), 1.0);
        assert_eq!(v.get(Feature::FirstLevenshteinRatio), 1.0);
        assert_eq!(v.get(Feature::LastLevenshteinRatio), 1.0);
        assert_eq!(v.get(Feature::SoundexMatchFirst), 1.0);
        assert_eq!(v.get(Feature::SoundexMatchLast), 1.0);
        assert_eq!(v.get(Feature::NormalizedLevenshteinRatio), 1.0);
        assert_eq!(v.get(Feature::FirstLetterMatch), 1.0);
        assert_eq!(v.get(Feature::LastFirstLetterMatch), 1.0);
        assert_eq!(v.get(Feature::LenDiff), 0.0);
        assert_eq!(v.get(Feature::LenRatio), 1.0);
        assert_eq!(v.get(Feature::HasFirstTransposition), 0.0);
        assert_eq!(v.get(Feature::HasLastTransposition), 0.0);
    }

    #[test]
    fn test_empty_names() {
        let v = extract("", "");
        assert_eq!(v.get(Feature::LevenshteinDist), 0.0);
        assert_eq!(v.get(Feature::FirstLevenshteinDist), 0.0);
        assert_eq!(v.get(Feature::LastLevenshteinDist), 0.0);
        assert_eq!(v.get(Feature::LenDiff), 0.0);
        assert_eq!(v.get(Feature::LenRatio), 0.0);
        assert_eq!(v.get(Feature::CommonBigrams), 0.0);
        for feature in [
            Feature::SoundexMatchFirst,
            Feature::SoundexMatchLast,
            Feature::MetaphoneMatchFirst,
            Feature::MetaphoneMatchLast,
            Feature::NysiisMatchFirst,
            Feature::NysiisMatchLast,
            Feature::FirstLetterMatch,
            Feature::LastFirstLetterMatch,
        ] {
            assert_eq!(v.get(feature), 0.0, "{}", feature.name());
        }
        assert!(v.as_slice().iter().all(|x| x.is_finite()));
    }

    #[test]
    fn test_single_token_names_force_last_phonetics_to_zero() {
        let v = extract("Ravi", "Ravi");
        assert_eq!(v.get(Feature::SoundexMatchFirst), 1.0);
        assert_eq!(v.get(Feature::SoundexMatchLast), 0.0);
        assert_eq!(v.get(Feature::MetaphoneMatchLast), 0.0);
        assert_eq!(v.get(Feature::NysiisMatchLast), 0.0);
        assert_eq!(v.get(Feature::LastFirstLetterMatch), 0.0);
        assert_eq!(v.get(Feature::LastLevenshteinDist), 0.0);
        assert_eq!(v.get(Feature::HasLastTransposition), 0.0);
    }

    #[test]
    fn test_transliteration_feature() {
        let v = extract("Deepak Verma", "Dipak Werma");
        assert_eq!(v.get(Feature::NormalizedLevenshteinRatio), 1.0);
        assert!(v.get(Feature::LevenshteinRatio) < 1.0);
    }

    #[test]
    fn test_transposition_feature() {
        let v = extract("Suresh Kumar", "Suresh Kumra");
        assert_eq!(v.get(Feature::HasFirstTransposition), 0.0);
        assert_eq!(v.get(Feature::HasLastTransposition), 1.0);
    }

    #[test]
    fn test_lengths() {
        let v = extract("Rahul Singh", "Rahul Sing");
        assert_eq!(v.get(Feature::LenDiff), 1.0);
        assert!((v.get(Feature::LenRatio) - 10.0 / 11.0).abs() < 1e-12);
    }

    #[test]
    fn test_deterministic() {
        let extractor = FeatureExtractor::new();
        let a = extractor.extract("Aditya Sharma", "Aditiya Sharma");
        let b = extract("Aditya Sharma", "Aditiya Sharma");
        assert_eq!(a, b);
        assert_eq!(a.to_vec(), b.to_vec());
    }

    #[test]
    fn test_symmetric_features_are_swap_invariant() {
        let ab = extract("Suresh Kumar", "Sursh Kumaar Singh");
        let ba = extract("Sursh Kumaar Singh", "Suresh Kumar");
        for feature in [
            Feature::LevenshteinDist,
            Feature::LevenshteinRatio,
            Feature::CommonBigrams,
            Feature::CommonTrigrams,
            Feature::LenDiff,
            Feature::LenRatio,
            Feature::NormalizedLevenshteinRatio,
        ] {
            assert_eq!(ab.get(feature), ba.get(feature), "{}", feature.name());
        }
    }

    #[test]
    fn test_unicode_input_does_not_panic() {
        let v = extract("अमित शर्मा", "Amit Sharma");
        assert_eq!(v.as_slice().len(), FEATURE_COUNT);
        assert_eq!(v.get(Feature::SoundexMatchFirst), 0.0);
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let v = extract("Ravi", "Ravi");
        let json = serde_json::to_string(&v).unwrap();
        assert!(json.starts_with("{\"levenshtein_dist\":0.0,\"levenshtein_ratio\":1.0"));
        assert!(json.ends_with("\"has_last_transposition\":0.0}"));
    }
}
