//! Waste Recommender
//!
//! Matches a free-text description of a discarded item against a reference
//! waste catalogue and produces a scored disposal recommendation.
//!
//! Pipeline, leaf-first:
//! - `data`: catalogue loading (Polars CSV) and exact/substring lookup
//! - `matcher`: whole-word and similarity-ratio matching with configurable cutoff
//! - `facilities`: simulated facility registry and fallback distance policy
//! - `confidence`: simulated confidence with injectable randomness
//! - `scorer`: weighted optimization score
//! - `recommender`: the query state machine tying it together
//! - `formatters`: text and JSON presentation
//! - `analytics`: catalogue-level summaries

pub mod error;
pub mod types;
pub mod utils;
pub mod data;
pub mod matcher;
pub mod facilities;
pub mod confidence;
pub mod scorer;
pub mod guidance;
pub mod config;
pub mod recommender;
pub mod formatters;
pub mod analytics;

// Re-export commonly used types
pub use error::{RecommendError, Result};
pub use types::{
    DisposalFacility, MatchKind, NotFound, QueryOutcome, RecommendationResult, WasteCategory,
    WasteRecord, NOT_AVAILABLE,
};
pub use data::{Catalogue, LoadReport};
pub use matcher::{suggest, whole_word_matches, FuzzyMatcher, MatcherConfig, Suggestion};
pub use facilities::{FacilityDirectory, FallbackDistancePolicy};
pub use confidence::{ConfidenceBounds, ConfidenceEstimator};
pub use scorer::{OptimizationScorer, ScoreBreakdown, ScoringWeights};
pub use config::RecommenderConfig;
pub use recommender::{QueryStage, Recommender, NOT_FOUND_HINT};
pub use formatters::{JsonFormatter, TextFormatter};
pub use analytics::CatalogueSummary;
pub use utils::SimilarityMetric;
