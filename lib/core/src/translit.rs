//! Transliteration normalization
//!
//! Collapses common spelling variants that arise when romanizing the same
//! Hindi sound differently (doubled vowels, aspirated consonant clusters,
//! v/w interchange).

/// Ordered replacement table. Each rule replaces every non-overlapping
/// occurrence, scanning left to right, and rules run strictly in this order:
/// an earlier rule can create or destroy matches for a later one. Changing
/// this table changes feature values and invalidates trained models, so it
/// is part of the versioned feature contract.
pub const TRANSLITERATION_RULES: [(&str, &str); 8] = [
    ("aa", "a"),
    ("ee", "i"),
    ("oo", "u"),
    ("sh", "s"),
    ("ph", "f"),
    ("th", "t"),
    ("kh", "k"),
    ("v", "w"),
];

/// Apply [`TRANSLITERATION_RULES`] once, in order
///
/// Expects lower-cased input; upper-case letters are left untouched.
pub fn normalize_transliteration(text: &str) -> String {
    TRANSLITERATION_RULES
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doubled_vowels_collapse() {
        assert_eq!(normalize_transliteration("kumaar"), "kumar");
        assert_eq!(normalize_transliteration("deepak"), "dipak");
        assert_eq!(normalize_transliteration("pooja"), "puja");
    }

    #[test]
    fn test_clusters_and_v_w() {
        assert_eq!(normalize_transliteration("sharma"), "sarma");
        assert_eq!(normalize_transliteration("vikram"), "wikram");
        assert_eq!(normalize_transliteration("khanna"), "kanna");
        assert_eq!(normalize_transliteration("phoolan"), "fulan");
    }

    #[test]
    fn test_replacements_are_non_overlapping() {
        // "aaa" -> "a" + "a" in a single left-to-right pass
        assert_eq!(normalize_transliteration("aaa"), "aa");
        assert_eq!(normalize_transliteration("aaaa"), "aa");
    }

    #[test]
    fn test_rule_order_matters() {
        // a rule never revisits its own output
        assert_eq!(normalize_transliteration("shh"), "sh");
        assert_eq!(normalize_transliteration("veer"), "wir");
    }

    #[test]
    fn test_empty_and_untouched() {
        assert_eq!(normalize_transliteration(""), "");
        assert_eq!(normalize_transliteration("ravi gupta"), "rawi gupta");
    }
}
