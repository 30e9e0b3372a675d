//! Edit-distance primitives
//!
//! All functions operate on Unicode scalar values, so multi-byte characters
//! count as one edit.

/// Minimum number of single-character insertions, deletions and
/// substitutions turning `a` into `b`
pub fn edit_distance(a: &str, b: &str) -> usize {
    strsim::levenshtein(a, b)
}

/// Normalized edit similarity in [0.0, 1.0], 1.0 meaning identical
///
/// Computed as `1 - indel(a, b) / (|a| + |b|)` where `indel` only counts
/// insertions and deletions (a substitution costs two). Two empty strings
/// are identical and score 1.0.
pub fn edit_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let lcs = lcs_len(&a, &b);
    (2 * lcs) as f64 / total as f64
}

/// Longest common subsequence length, single-row DP
fn lcs_len(a: &[char], b: &[char]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    let mut row = vec![0usize; b.len() + 1];
    for &ca in a {
        let mut diag = 0;
        for (j, &cb) in b.iter().enumerate() {
            let above = row[j + 1];
            row[j + 1] = if ca == cb {
                diag + 1
            } else {
                above.max(row[j])
            };
            diag = above;
        }
    }
    row[b.len()]
}

/// 1 when swapping one adjacent pair of characters in `a` yields exactly `b`
///
/// Strings of different lengths never match. Swapping two
/// identical characters changes nothing and is not counted, so equal
/// strings return 0.
pub fn has_transposition(a: &str, b: &str) -> u8 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    // a swap preserves length, so any length difference rules it out
    if a.len() != b.len() || a.len() < 2 {
        return 0;
    }

    let mut swapped = a.clone();
    for i in 0..a.len() - 1 {
        if a[i] == a[i + 1] {
            continue;
        }
        swapped.swap(i, i + 1);
        if swapped == b {
            return 1;
        }
        swapped.swap(i, i + 1);
    }
    0
}
