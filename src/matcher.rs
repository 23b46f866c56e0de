//! Fuzzy Matcher
//!
//! Ranks catalogue names against free text by similarity ratio. The cutoff is
//! configuration: the confirmation ("did you mean") flow wants 0.4, the direct
//! closest-match flow accepts 0.3.
//!
//! `FuzzyMatcher::best_match` puts names that contain the query as whole words
//! ahead of the ratio ranking, so partial names such as "jug" or "cup" resolve
//! even though their ratio against a longer name sits below the cutoff.

use crate::error::{RecommendError, Result};
use crate::utils::{normalize_key, SimilarityMetric};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// Cutoff for the "did you mean" confirmation flow
pub const CONFIRMATION_CUTOFF: f64 = 0.4;

/// Cutoff for the direct closest-match flow
pub const CLOSEST_MATCH_CUTOFF: f64 = 0.3;

/// Matcher settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatcherConfig {
    /// Minimum similarity accepted, in (0, 1]
    pub cutoff: f64,
    /// Maximum suggestions returned (≥ 1)
    pub max_results: usize,
    pub metric: SimilarityMetric,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self::confirmation()
    }
}

impl MatcherConfig {
    pub fn confirmation() -> Self {
        Self {
            cutoff: CONFIRMATION_CUTOFF,
            max_results: 1,
            metric: SimilarityMetric::SequenceRatio,
        }
    }

    pub fn closest_match() -> Self {
        Self {
            cutoff: CLOSEST_MATCH_CUTOFF,
            ..Self::confirmation()
        }
    }

    pub fn with_cutoff(mut self, cutoff: f64) -> Self {
        self.cutoff = cutoff;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.cutoff > 0.0 && self.cutoff <= 1.0) {
            return Err(RecommendError::InvalidConfig(format!(
                "cutoff must be in (0, 1], got {}",
                self.cutoff
            )));
        }
        if self.max_results == 0 {
            return Err(RecommendError::InvalidConfig(
                "max_results must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// A candidate name with its similarity to the query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub name: String,
    pub similarity: f64,
    /// Name contains the query as a whole-word run
    pub whole_word: bool,
}

/// Similarity-ratio matcher over catalogue names
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    config: MatcherConfig,
}

impl FuzzyMatcher {
    pub fn new(config: MatcherConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Suggest candidates using the configured cutoff and result limit
    pub fn suggest_names<S: AsRef<str>>(
        &self,
        query: &str,
        candidates: &[S],
    ) -> SmallVec<[Suggestion; 4]> {
        suggest(
            query,
            candidates,
            self.config.max_results,
            self.config.cutoff,
            self.config.metric,
        )
    }

    /// First whole-word match in candidate order, otherwise the best
    /// suggestion that clears the cutoff
    pub fn best_match<S: AsRef<str>>(&self, query: &str, candidates: &[S]) -> Option<Suggestion> {
        whole_word_matches(query, candidates, 1, self.config.metric)
            .into_iter()
            .next()
            .or_else(|| {
                suggest(query, candidates, 1, self.config.cutoff, self.config.metric)
                    .into_iter()
                    .next()
            })
    }
}

/// Rank `candidates` by similarity to `query`
///
/// Returns at most `max_results` candidates whose similarity is ≥ `cutoff`,
/// best first. Equal scores keep candidate order. Both sides are normalized
/// before comparison.
pub fn suggest<S: AsRef<str>>(
    query: &str,
    candidates: &[S],
    max_results: usize,
    cutoff: f64,
    metric: SimilarityMetric,
) -> SmallVec<[Suggestion; 4]> {
    let query = normalize_key(query);
    if query.is_empty() || max_results == 0 {
        return SmallVec::new();
    }

    let mut scored: Vec<(usize, f64)> = candidates
        .iter()
        .enumerate()
        .filter_map(|(position, candidate)| {
            let similarity = metric.ratio(&normalize_key(candidate.as_ref()), &query);
            (similarity >= cutoff).then_some((position, similarity))
        })
        .collect();

    // Stable sort: ties stay in candidate order
    scored.sort_by(|a, b| b.1.total_cmp(&a.1));

    scored
        .into_iter()
        .take(max_results)
        .map(|(position, similarity)| Suggestion {
            name: candidates[position].as_ref().to_string(),
            similarity,
            whole_word: false,
        })
        .collect()
}

/// Candidates whose normalized name contains every query word as one
/// contiguous run, in candidate order
///
/// No cutoff applies; `similarity` is still the metric's ratio. "can" matches
/// "paint can" but not "canister".
pub fn whole_word_matches<S: AsRef<str>>(
    query: &str,
    candidates: &[S],
    max_results: usize,
    metric: SimilarityMetric,
) -> SmallVec<[Suggestion; 4]> {
    let query = normalize_key(query);
    let query_words: Vec<&str> = words(&query).collect();
    if query_words.is_empty() {
        return SmallVec::new();
    }

    candidates
        .iter()
        .filter_map(|candidate| {
            let name = normalize_key(candidate.as_ref());
            let name_words: Vec<&str> = words(&name).collect();
            let contained = name_words
                .windows(query_words.len())
                .any(|window| window == query_words.as_slice());
            contained.then(|| Suggestion {
                similarity: metric.ratio(&name, &query),
                name: candidate.as_ref().to_string(),
                whole_word: true,
            })
        })
        .take(max_results)
        .collect()
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const NAMES: &[&str] = &[
        "pet water bottle",
        "shampoo bottle",
        "banana peel",
        "bubble wrap",
        "pizza box",
        "coffee grounds",
        "smartphone",
    ];

    fn sequence(query: &str, max_results: usize, cutoff: f64) -> Vec<String> {
        suggest(query, NAMES, max_results, cutoff, SimilarityMetric::SequenceRatio)
            .into_iter()
            .map(|s| s.name)
            .collect()
    }

    #[test]
    fn test_suggest_best_first() {
        assert_eq!(sequence("plastic bottle", 1, 0.4), vec!["pet water bottle"]);
        assert_eq!(
            sequence("plastic bottle", 2, 0.4),
            vec!["pet water bottle", "shampoo bottle"]
        );
        assert_eq!(sequence("bubble wrp", 1, 0.4), vec!["bubble wrap"]);
        assert_eq!(sequence("Smart Phone", 1, 0.4), vec!["smartphone"]);
    }

    #[test]
    fn test_suggest_empty_when_nothing_qualifies() {
        assert!(sequence("xyzzy", 3, 0.4).is_empty());
        assert!(sequence("", 3, 0.1).is_empty());
        assert!(sequence("   ", 3, 0.1).is_empty());
        assert!(sequence("banana", 0, 0.1).is_empty());
    }

    #[test]
    fn test_cutoff_monotonicity() {
        let queries = ["plastic bottle", "bottle", "banana", "xyzzy", "box", "coffee cup"];
        let cutoffs = [0.1, 0.2, 0.3, 0.4, 0.5, 0.7, 0.9, 1.0];

        for query in queries {
            for (i, &low) in cutoffs.iter().enumerate() {
                for &high in &cutoffs[i..] {
                    let strict = sequence(query, NAMES.len(), high);
                    let loose = sequence(query, NAMES.len(), low);
                    assert!(
                        strict.iter().all(|name| loose.contains(name)),
                        "{:?} at {} not a subset of {:?} at {}",
                        strict,
                        high,
                        loose,
                        low
                    );
                }
            }
        }
    }

    #[test]
    fn test_ties_keep_candidate_order() {
        let candidates = ["wine bottle", "beer bottle"];
        let result = suggest("bottle", &candidates, 2, 0.3, SimilarityMetric::SequenceRatio);
        assert_eq!(result.len(), 2);
        assert_eq!(result[0].similarity, result[1].similarity);
        assert_eq!(result[0].name, "wine bottle");
    }

    #[test]
    fn test_whole_word_matches_in_candidate_order() {
        let candidates = [
            "hdpe milk jug",
            "styrofoam cup",
            "paint can",
            "aluminum soda can",
            "canister",
        ];
        let names = |query: &str| -> Vec<String> {
            whole_word_matches(query, &candidates, 5, SimilarityMetric::SequenceRatio)
                .into_iter()
                .map(|s| s.name)
                .collect()
        };

        assert_eq!(names("jug"), vec!["hdpe milk jug"]);
        assert_eq!(names(" CUP "), vec!["styrofoam cup"]);
        assert_eq!(names("can"), vec!["paint can", "aluminum soda can"]);
        assert_eq!(names("soda can"), vec!["aluminum soda can"]);
        assert!(names("milk cup").is_empty());
        assert!(names("caniste").is_empty());
        assert!(names("").is_empty());
    }

    #[test]
    fn test_best_match_prefers_whole_word_over_ratio() {
        // "cup" vs "receipt" clears 0.3 on ratio alone; the whole word wins
        let candidates = ["receipt", "styrofoam cup"];
        let matcher = FuzzyMatcher::new(MatcherConfig::closest_match()).unwrap();
        let best = matcher.best_match("cup", &candidates).unwrap();
        assert_eq!(best.name, "styrofoam cup");
        assert!(best.whole_word);
        assert_relative_eq!(best.similarity, 0.375, epsilon = 1e-12);

        let ratio_only = matcher.best_match("receit", &candidates).unwrap();
        assert_eq!(ratio_only.name, "receipt");
        assert!(!ratio_only.whole_word);
    }

    #[test]
    fn test_config_validation() {
        assert!(MatcherConfig::confirmation().validate().is_ok());
        assert!(MatcherConfig::closest_match().validate().is_ok());
        assert!(MatcherConfig::default().with_cutoff(1.0).validate().is_ok());
        assert!(MatcherConfig::default().with_cutoff(0.0).validate().is_err());
        assert!(MatcherConfig::default().with_cutoff(1.5).validate().is_err());
        assert!(MatcherConfig::default().with_cutoff(f64::NAN).validate().is_err());

        let none = MatcherConfig {
            max_results: 0,
            ..MatcherConfig::default()
        };
        assert!(matches!(none.validate(), Err(RecommendError::InvalidConfig(_))));
    }

    #[test]
    fn test_presets() {
        assert_eq!(MatcherConfig::default().cutoff, CONFIRMATION_CUTOFF);
        assert_eq!(MatcherConfig::closest_match().cutoff, CLOSEST_MATCH_CUTOFF);
    }

    #[test]
    fn test_matcher_respects_configured_cutoff() {
        // Best ratio for "soda can" is 1/3 ("smartphone")
        let strict = FuzzyMatcher::new(MatcherConfig::confirmation()).unwrap();
        let loose = FuzzyMatcher::new(MatcherConfig::closest_match()).unwrap();
        assert!(strict.best_match("soda can", NAMES).is_none());
        assert_eq!(loose.best_match("soda can", NAMES).unwrap().name, "smartphone");
        assert!(strict.best_match("xyzzy", NAMES).is_none());
        assert!(FuzzyMatcher::new(MatcherConfig::default().with_cutoff(0.0)).is_err());
    }
}
