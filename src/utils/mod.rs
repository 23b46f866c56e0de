//! Utility modules shared across the pipeline
//!
//! - Normalization: catalogue key cleaning and score rounding
//! - Similarity: string similarity ratios for fuzzy matching

pub mod normalization;
pub mod similarity;

// Re-export commonly used helpers
pub use normalization::{normalize_key, clean_field, round2};
pub use similarity::{sequence_ratio, SimilarityMetric};
