//! Recommendation Orchestrator
//!
//! Drives one query through the pipeline:
//!
//! ```text
//! Received → Matching → Matched ─→ Enriching → Scored
//!                    └→ NotFound
//! ```
//!
//! Matching is exact lookup on the normalized query, then whole-word
//! containment, then ratio-based fuzzy suggestion over catalogue names.
//! "Not found" is a normal outcome.
//!
//! `&self` methods hold no scratch state: the catalogue is shared read-only and
//! randomness is either injected or thread-local, so one `Recommender` can
//! serve concurrent callers.

use crate::confidence::ConfidenceEstimator;
use crate::config::RecommenderConfig;
use crate::data::{Catalogue, LoadReport};
use crate::error::{RecommendError, Result};
use crate::facilities::{FacilityDirectory, FallbackDistancePolicy};
use crate::guidance::tips_for;
use crate::matcher::FuzzyMatcher;
use crate::scorer::OptimizationScorer;
use crate::types::{MatchKind, NotFound, QueryOutcome, RecommendationResult, WasteRecord};
use crate::utils::normalize_key;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use std::sync::Arc;

/// Retry hint attached to every not-found outcome
pub const NOT_FOUND_HINT: &str =
    "Try a partial name like: bottle, bag, packet, or a material keyword such as plastic or paper";

/// Stages of a single query, logged as the query advances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryStage {
    Received,
    Matching,
    Matched,
    NotFound,
    Enriching,
    Scored,
}

/// End-to-end recommendation pipeline over one catalogue
#[derive(Debug, Clone)]
pub struct Recommender {
    catalogue: Arc<Catalogue>,
    matcher: FuzzyMatcher,
    facilities: FacilityDirectory,
    fallback: FallbackDistancePolicy,
    estimator: ConfidenceEstimator,
    scorer: OptimizationScorer,
    config: RecommenderConfig,
}

impl Recommender {
    /// Build a recommender, validating the configuration
    pub fn new(catalogue: impl Into<Arc<Catalogue>>, config: RecommenderConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            catalogue: catalogue.into(),
            matcher: FuzzyMatcher::new(config.matcher)?,
            facilities: config.facility_directory()?,
            fallback: config.fallback,
            estimator: ConfidenceEstimator::new(config.confidence)?,
            scorer: OptimizationScorer::new(config.weights),
            config,
        })
    }

    /// Load the configured catalogue and build a recommender over it
    ///
    /// Load failures are fatal to the caller: no recommendation is possible
    /// without data.
    pub fn from_config(config: RecommenderConfig) -> Result<Self> {
        let path = config.catalogue_path.clone().ok_or_else(|| {
            RecommendError::InvalidConfig("catalogue_path is not set".to_string())
        })?;
        let catalogue = Catalogue::load(&path)?;
        Self::new(catalogue, config)
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn facilities(&self) -> &FacilityDirectory {
        &self.facilities
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Recommend using the configured seed, or the thread-local generator
    pub fn recommend(&self, query: &str) -> Result<QueryOutcome> {
        match self.config.seed {
            Some(seed) => self.recommend_with_rng(query, &mut StdRng::seed_from_u64(seed)),
            None => self.recommend_with_rng(query, &mut rand::thread_rng()),
        }
    }

    /// Recommend with an explicit random source for confidence jitter
    pub fn recommend_with_rng<R: Rng + ?Sized>(
        &self,
        query: &str,
        rng: &mut R,
    ) -> Result<QueryOutcome> {
        log_stage(QueryStage::Received, query);

        log_stage(QueryStage::Matching, query);
        let Some((record, match_kind)) = self.resolve(query) else {
            log_stage(QueryStage::NotFound, query);
            return Ok(QueryOutcome::NotFound(NotFound {
                query: query.trim().to_string(),
                hint: NOT_FOUND_HINT.to_string(),
            }));
        };
        log_stage(QueryStage::Matched, &record.item_name);

        log_stage(QueryStage::Enriching, &record.item_name);
        let carbon = record.carbon_impact_score.unwrap_or(0.0);
        let confidence = self.estimator.estimate(carbon, rng);
        let nearest_facility = self.facilities.nearest(record.category).cloned();
        if nearest_facility.is_none() {
            tracing::warn!(
                "No facility registered for {}; scoring with fallback distance {} km",
                record.category,
                self.fallback.distance_km
            );
        }
        let distance_km = self.fallback.resolve(nearest_facility.as_ref());

        let optimization_score = self.scorer.score(
            record.weight_grams.unwrap_or(0.0),
            carbon,
            distance_km,
            confidence,
        )?;
        log_stage(QueryStage::Scored, &record.item_name);

        Ok(QueryOutcome::Recommended(Box::new(RecommendationResult {
            guidance: tips_for(record.category),
            record: record.clone(),
            match_kind,
            confidence,
            nearest_facility,
            distance_km,
            optimization_score,
        })))
    }

    /// Evaluate independent queries in parallel
    ///
    /// With a seed, query `i` draws from `StdRng::seed_from_u64(seed + i)`, so
    /// results do not depend on thread scheduling.
    pub fn recommend_batch<S: AsRef<str> + Sync>(
        &self,
        queries: &[S],
        seed: Option<u64>,
    ) -> Vec<Result<QueryOutcome>> {
        queries
            .par_iter()
            .enumerate()
            .map(|(i, query)| match seed {
                Some(seed) => {
                    let mut rng = StdRng::seed_from_u64(seed.wrapping_add(i as u64));
                    self.recommend_with_rng(query.as_ref(), &mut rng)
                }
                None => self.recommend_with_rng(query.as_ref(), &mut rand::thread_rng()),
            })
            .collect()
    }

    /// Reload the catalogue from the configured path
    ///
    /// I/O failures are retried once, then surfaced as `Transient`. The
    /// current catalogue stays in place on any failure.
    pub fn refresh_catalogue(&mut self) -> Result<LoadReport> {
        let path = self.config.catalogue_path.clone().ok_or_else(|| {
            RecommendError::InvalidConfig("catalogue_path is not set".to_string())
        })?;

        let catalogue = Catalogue::load_with_retry(&path, 1)?;
        let report = catalogue.report().clone();
        self.catalogue = Arc::new(catalogue);
        Ok(report)
    }

    /// Exact lookup, then whole-word containment, then best fuzzy suggestion
    /// above the cutoff
    fn resolve(&self, query: &str) -> Option<(&WasteRecord, MatchKind)> {
        let normalized = normalize_key(query);
        if normalized.is_empty() {
            return None;
        }

        if let Some(record) = self.catalogue.lookup_exact(&normalized) {
            return Some((record, MatchKind::Exact));
        }

        let suggestion = self.matcher.best_match(&normalized, self.catalogue.names())?;
        tracing::debug!(
            "{} match '{}' → '{}' (similarity {:.3})",
            if suggestion.whole_word { "Partial" } else { "Fuzzy" },
            normalized,
            suggestion.name,
            suggestion.similarity
        );

        let match_kind = if suggestion.whole_word {
            MatchKind::Partial {
                similarity: suggestion.similarity,
            }
        } else {
            MatchKind::Fuzzy {
                similarity: suggestion.similarity,
            }
        };
        self.catalogue
            .lookup_exact(&suggestion.name)
            .map(|record| (record, match_kind))
    }
}

fn log_stage(stage: QueryStage, subject: &str) {
    tracing::debug!("query {:?}: {}", stage, subject);
}
