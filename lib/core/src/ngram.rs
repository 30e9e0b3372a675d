//! Character n-gram overlap

use ahash::AHashSet;

/// Distinct character n-grams of `s`, taken over consecutive characters
/// including spaces
fn ngrams(s: &str, n: usize) -> AHashSet<String> {
    let chars: Vec<char> = s.chars().collect();
    if n == 0 || chars.len() < n {
        return AHashSet::new();
    }

    chars.windows(n).map(|w| w.iter().collect::<String>()).collect()
}

/// Number of distinct n-grams shared by `a` and `b`
///
/// Set semantics: an n-gram repeated inside one string counts once.
pub fn common_ngrams(a: &str, b: &str, n: usize) -> usize {
    let grams_a = ngrams(a, n);
    if grams_a.is_empty() {
        return 0;
    }
    let grams_b = ngrams(b, n);
    grams_a.intersection(&grams_b).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_common_bigrams() {
        // ab, bc shared
        assert_eq!(common_ngrams("abc", "abcd", 2), 2);
        assert_eq!(common_ngrams("abc", "xyz", 2), 0);
    }

    #[test]
    fn test_duplicates_count_once() {
        // "aa" appears three times in "aaaa" but only once as a set member
        assert_eq!(common_ngrams("aaaa", "aa", 2), 1);
    }

    #[test]
    fn test_short_strings() {
        assert_eq!(common_ngrams("", "", 2), 0);
        assert_eq!(common_ngrams("a", "a", 2), 0);
        assert_eq!(common_ngrams("ab", "ab", 3), 0);
        assert_eq!(common_ngrams("ab", "ab", 0), 0);
    }

    #[test]
    fn test_spaces_are_part_of_ngrams() {
        // "h k" spans the word boundary
        assert_eq!(common_ngrams("suresh kumar", "ramesh kumar", 3), 7);
    }

    #[test]
    fn test_symmetric() {
        assert_eq!(
            common_ngrams("suresh kumar", "sursh kumaar", 2),
            common_ngrams("sursh kumaar", "suresh kumar", 2)
        );
    }
}
