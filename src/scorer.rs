//! Optimization Scorer
//!
//! Combines the signals of one recommendation into a single ranking number:
//!
//! ```text
//! score = weight_grams·w_weight + carbon·w_carbon + (1 / distance_km)·w_proximity + confidence·w_confidence
//! ```
//!
//! rounded to two decimals. Default weights are 0.2 / 0.4 / 20 / 10. They are
//! configuration so the scorer can be recalibrated without touching matching.

use crate::error::Result;
use crate::facilities::check_distance;
use crate::utils::round2;
use serde::{Deserialize, Serialize};

/// Linear weights of the optimization score
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    /// Per gram of item weight
    pub weight: f64,
    /// Per point of carbon impact
    pub carbon: f64,
    /// Multiplier on inverse facility distance (1/km)
    pub proximity: f64,
    /// Per unit of confidence
    pub confidence: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            weight: 0.2,
            carbon: 0.4,
            proximity: 20.0,
            confidence: 10.0,
        }
    }
}

/// Result of scoring with per-term contributions kept for reporting
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub weight_term: f64,
    pub carbon_term: f64,
    pub proximity_term: f64,
    pub confidence_term: f64,
    /// Rounded sum of the terms
    pub total: f64,
}

#[derive(Debug, Clone, Default)]
pub struct OptimizationScorer {
    weights: ScoringWeights,
}

impl OptimizationScorer {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Composite score, rounded to two decimals
    ///
    /// Fails with `InvalidDistance` for zero, negative or non-finite distances.
    pub fn score(
        &self,
        weight_grams: f64,
        carbon_impact_score: f64,
        distance_km: f64,
        confidence: f64,
    ) -> Result<f64> {
        self.breakdown(weight_grams, carbon_impact_score, distance_km, confidence)
            .map(|b| b.total)
    }

    pub fn breakdown(
        &self,
        weight_grams: f64,
        carbon_impact_score: f64,
        distance_km: f64,
        confidence: f64,
    ) -> Result<ScoreBreakdown> {
        check_distance(distance_km)?;

        let weight_term = weight_grams * self.weights.weight;
        let carbon_term = carbon_impact_score * self.weights.carbon;
        let proximity_term = (1.0 / distance_km) * self.weights.proximity;
        let confidence_term = confidence * self.weights.confidence;

        Ok(ScoreBreakdown {
            weight_term,
            carbon_term,
            proximity_term,
            confidence_term,
            total: round2(weight_term + carbon_term + proximity_term + confidence_term),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecommendError;
    use approx::assert_relative_eq;

    #[test]
    fn test_reference_score() {
        // 12·0.2 + 150·0.4 + 20/2.1 + 0.6·10 = 77.9238...
        let scorer = OptimizationScorer::default();
        let score = scorer.score(12.0, 150.0, 2.1, 0.6).unwrap();
        assert_relative_eq!(score, 77.92, epsilon = 1e-9);
    }

    #[test]
    fn test_fallback_distance_score() {
        // 300·0.2 + 180·0.4 + 20/10 + 0.6·10
        let scorer = OptimizationScorer::default();
        assert_relative_eq!(
            scorer.score(300.0, 180.0, 10.0, 0.6).unwrap(),
            140.0,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_negative_carbon_lowers_score() {
        let scorer = OptimizationScorer::default();
        let landfill = scorer.score(10.0, -50.0, 10.0, 0.6).unwrap();
        assert_relative_eq!(landfill, -10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_monotonic_in_confidence_and_carbon() {
        let scorer = OptimizationScorer::default();
        let confidences = [0.6, 0.65, 0.7, 0.8, 0.9, 0.99];
        for pair in confidences.windows(2) {
            let lo = scorer.score(50.0, 200.0, 3.4, pair[0]).unwrap();
            let hi = scorer.score(50.0, 200.0, 3.4, pair[1]).unwrap();
            assert!(hi > lo, "confidence {} → {} not increasing", pair[0], pair[1]);
        }

        let carbons = [-50.0, 0.0, 25.0, 80.0, 150.0, 900.0];
        for pair in carbons.windows(2) {
            let lo = scorer.score(50.0, pair[0], 3.4, 0.7).unwrap();
            let hi = scorer.score(50.0, pair[1], 3.4, 0.7).unwrap();
            assert!(hi > lo, "carbon {} → {} not increasing", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_decreasing_in_distance() {
        let scorer = OptimizationScorer::default();
        let distances = [0.5, 1.0, 2.1, 2.8, 5.0, 10.0];
        for pair in distances.windows(2) {
            let near = scorer.score(50.0, 200.0, pair[0], 0.7).unwrap();
            let far = scorer.score(50.0, 200.0, pair[1], 0.7).unwrap();
            assert!(near > far, "distance {} → {} not decreasing", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_invalid_distance_rejected() {
        let scorer = OptimizationScorer::default();
        for bad in [0.0, -2.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                scorer.score(1.0, 1.0, bad, 0.7),
                Err(RecommendError::InvalidDistance(_))
            ));
        }
    }

    #[test]
    fn test_custom_weights_and_breakdown() {
        let scorer = OptimizationScorer::new(ScoringWeights {
            weight: 0.0,
            carbon: 1.0,
            proximity: 0.0,
            confidence: 0.0,
        });
        assert_relative_eq!(scorer.score(999.0, 42.0, 1.0, 0.9).unwrap(), 42.0);

        let breakdown = OptimizationScorer::default().breakdown(12.0, 150.0, 2.1, 0.6).unwrap();
        assert_relative_eq!(breakdown.weight_term, 2.4, epsilon = 1e-9);
        assert_relative_eq!(breakdown.carbon_term, 60.0, epsilon = 1e-9);
        assert_relative_eq!(breakdown.proximity_term, 20.0 / 2.1, epsilon = 1e-9);
        assert_relative_eq!(breakdown.confidence_term, 6.0, epsilon = 1e-9);
    }
}
