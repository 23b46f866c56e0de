//! String similarity ratios for fuzzy catalogue matching
//!
//! The default metric is the Ratcliff/Obershelp sequence-matching ratio:
//! `2·M / (|a| + |b|)` where `M` is the number of characters covered by
//! matching blocks. Blocks are found by taking the longest common substring
//! (leftmost in `a`, then earliest in `b`) and recursing on both sides.
//!
//! The ratio is not symmetric in general. Callers pass the catalogue
//! candidate as `a` and the user query as `b`.
//!
//! Levenshtein and Jaro-Winkler variants delegate to `strsim`.

use serde::{Deserialize, Serialize};

/// Similarity function used by the fuzzy matcher
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityMetric {
    /// Matching-block ratio (tolerant to reordered and dropped words)
    #[default]
    SequenceRatio,
    /// 1 - edit distance / longer length
    NormalizedLevenshtein,
    /// Prefix-weighted Jaro similarity
    JaroWinkler,
}

impl SimilarityMetric {
    /// Similarity in [0, 1] between a catalogue candidate and a query
    pub fn ratio(&self, candidate: &str, query: &str) -> f64 {
        match self {
            SimilarityMetric::SequenceRatio => sequence_ratio(candidate, query),
            SimilarityMetric::NormalizedLevenshtein => {
                strsim::normalized_levenshtein(candidate, query)
            }
            SimilarityMetric::JaroWinkler => strsim::jaro_winkler(candidate, query),
        }
    }
}

/// Ratcliff/Obershelp similarity ratio
///
/// Two empty strings are identical (1.0).
pub fn sequence_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }

    2.0 * matched_characters(&a, &b) as f64 / total as f64
}

/// Total size of all matching blocks between `a` and `b`
fn matched_characters(a: &[char], b: &[char]) -> usize {
    let mut matched = 0;
    let mut pending = vec![(0, a.len(), 0, b.len())];

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let (i, j, k) = longest_match(a, b, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;

        if alo < i && blo < j {
            pending.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            pending.push((i + k, ahi, j + k, bhi));
        }
    }

    matched
}

/// Longest common substring of `a[alo..ahi]` and `b[blo..bhi]`
///
/// Returns `(i, j, k)` with `a[i..i+k] == b[j..j+k]`. Among maximal blocks
/// the smallest `i` wins, then the smallest `j`.
fn longest_match(
    a: &[char],
    b: &[char],
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_k) = (alo, blo, 0);

    // run[j + 1] = length of the common suffix ending at a[i], b[j]
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];

    for i in alo..ahi {
        for j in blo..bhi {
            let k = if a[i] == b[j] { prev[j] + 1 } else { 0 };
            curr[j + 1] = k;
            if k > best_k {
                best_i = i + 1 - k;
                best_j = j + 1 - k;
                best_k = k;
            }
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    (best_i, best_j, best_k)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sequence_ratio_known_values() {
        assert_relative_eq!(sequence_ratio("abcd", "bcde"), 0.75, epsilon = 1e-12);
        assert_relative_eq!(
            sequence_ratio("pet water bottle", "plastic bottle"),
            0.6,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            sequence_ratio("shampoo bottle", "plastic bottle"),
            8.0 / 14.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(
            sequence_ratio("bubble wrap", "bubble wrp"),
            20.0 / 21.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(sequence_ratio("pizza box", "xyzzy"), 4.0 / 14.0, epsilon = 1e-12);
    }

    #[test]
    fn test_sequence_ratio_edges() {
        assert_relative_eq!(sequence_ratio("", ""), 1.0);
        assert_relative_eq!(sequence_ratio("abc", ""), 0.0);
        assert_relative_eq!(sequence_ratio("", "abc"), 0.0);
        assert_relative_eq!(sequence_ratio("banana peel", "banana peel"), 1.0);
        assert_relative_eq!(sequence_ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn test_sequence_ratio_handles_multibyte() {
        // Character-based, so accents count once
        assert_relative_eq!(sequence_ratio("café", "cafe"), 0.75, epsilon = 1e-12);
    }

    #[test]
    fn test_metric_dispatch_in_unit_range() {
        let pairs = [("pet water bottle", "plastic bottle"), ("", "x"), ("glass", "glass")];
        for metric in [
            SimilarityMetric::SequenceRatio,
            SimilarityMetric::NormalizedLevenshtein,
            SimilarityMetric::JaroWinkler,
        ] {
            for (candidate, query) in pairs {
                let r = metric.ratio(candidate, query);
                assert!((0.0..=1.0).contains(&r), "{:?} gave {}", metric, r);
            }
            assert_relative_eq!(metric.ratio("glass", "glass"), 1.0);
        }
    }
}
