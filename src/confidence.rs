//! Confidence Estimator
//!
//! Simulated classifier confidence derived from an item's carbon impact:
//!
//! ```text
//! base       = min(carbon / scale, 1)
//! confidence = clamp(round2(uniform(base - jitter, base + jitter)), floor, ceiling)
//! ```
//!
//! This is a plausibility proxy, not a calibrated estimate. The random source
//! is injected so callers can seed it.

use crate::error::{RecommendError, Result};
use crate::utils::round2;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Shape of the simulated confidence
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfidenceBounds {
    pub floor: f64,
    pub ceiling: f64,
    /// Half-width of the uniform jitter window
    pub jitter: f64,
    /// Carbon score that maps to a base of 1.0
    pub scale: f64,
}

impl Default for ConfidenceBounds {
    fn default() -> Self {
        Self {
            floor: 0.6,
            ceiling: 0.99,
            jitter: 0.1,
            scale: 500.0,
        }
    }
}

impl ConfidenceBounds {
    pub fn validate(&self) -> Result<()> {
        let finite = [self.floor, self.ceiling, self.jitter, self.scale]
            .iter()
            .all(|v| v.is_finite());
        if !finite || self.floor > self.ceiling || self.jitter < 0.0 || self.scale <= 0.0 {
            return Err(RecommendError::InvalidConfig(format!(
                "confidence bounds {:?} must satisfy floor <= ceiling, jitter >= 0, scale > 0",
                self
            )));
        }
        Ok(())
    }
}

/// Stateless estimator; randomness comes from the caller's generator
#[derive(Debug, Clone, Default)]
pub struct ConfidenceEstimator {
    bounds: ConfidenceBounds,
}

impl ConfidenceEstimator {
    pub fn new(bounds: ConfidenceBounds) -> Result<Self> {
        bounds.validate()?;
        Ok(Self { bounds })
    }

    pub fn bounds(&self) -> &ConfidenceBounds {
        &self.bounds
    }

    /// Confidence for a carbon impact score, always within [floor, ceiling]
    ///
    /// Non-finite scores return the floor without consuming randomness.
    pub fn estimate<R: Rng + ?Sized>(&self, carbon_impact_score: f64, rng: &mut R) -> f64 {
        let ConfidenceBounds {
            floor,
            ceiling,
            jitter,
            scale,
        } = self.bounds;

        if !carbon_impact_score.is_finite() {
            return floor;
        }

        let base = (carbon_impact_score / scale).min(1.0);
        let drawn = if jitter > 0.0 {
            rng.gen_range((base - jitter)..=(base + jitter))
        } else {
            base
        };

        round2(drawn).clamp(floor, ceiling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_estimate_always_in_range() {
        let estimator = ConfidenceEstimator::default();
        let mut rng = StdRng::seed_from_u64(7);

        let inputs = [0.0, 1.0, 80.0, 150.0, 300.0, 450.0, 500.0, 900.0, 1e6, f64::MAX];
        for carbon in inputs {
            for _ in 0..200 {
                let c = estimator.estimate(carbon, &mut rng);
                assert!((0.6..=0.99).contains(&c), "carbon {} gave {}", carbon, c);
            }
        }
    }

    #[test]
    fn test_low_carbon_clamps_to_floor() {
        // base 0.3 → window [0.2, 0.4] always below the floor
        let estimator = ConfidenceEstimator::default();
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            assert_eq!(estimator.estimate(150.0, &mut rng), 0.6);
        }
        assert_eq!(estimator.estimate(-50.0, &mut rng), 0.6);
    }

    #[test]
    fn test_high_carbon_clamps_to_ceiling() {
        // base 1.0 → window [0.9, 1.1]; anything above 0.99 is clamped
        let estimator = ConfidenceEstimator::default();
        let mut rng = StdRng::seed_from_u64(3);
        let draws: Vec<f64> = (0..500).map(|_| estimator.estimate(900.0, &mut rng)).collect();
        assert!(draws.iter().all(|&c| (0.9..=0.99).contains(&c)));
        assert!(draws.iter().any(|&c| c == 0.99));
    }

    #[test]
    fn test_two_decimal_precision() {
        let estimator = ConfidenceEstimator::default();
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..100 {
            let c = estimator.estimate(400.0, &mut rng);
            assert!(((c * 100.0).round() - c * 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_seeded_generator_is_reproducible() {
        let estimator = ConfidenceEstimator::default();
        let mut a = StdRng::seed_from_u64(2024);
        let mut b = StdRng::seed_from_u64(2024);
        let first: Vec<f64> = (0..20).map(|_| estimator.estimate(420.0, &mut a)).collect();
        let second: Vec<f64> = (0..20).map(|_| estimator.estimate(420.0, &mut b)).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_non_finite_returns_floor() {
        let estimator = ConfidenceEstimator::default();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(estimator.estimate(f64::NAN, &mut rng), 0.6);
        assert_eq!(estimator.estimate(f64::INFINITY, &mut rng), 0.6);
    }

    #[test]
    fn test_zero_jitter_is_deterministic() {
        let bounds = ConfidenceBounds {
            jitter: 0.0,
            ..ConfidenceBounds::default()
        };
        let estimator = ConfidenceEstimator::new(bounds).unwrap();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(estimator.estimate(400.0, &mut rng), 0.8);
    }

    #[test]
    fn test_invalid_bounds_rejected() {
        let inverted = ConfidenceBounds {
            floor: 0.9,
            ceiling: 0.5,
            ..ConfidenceBounds::default()
        };
        assert!(ConfidenceEstimator::new(inverted).is_err());

        let zero_scale = ConfidenceBounds {
            scale: 0.0,
            ..ConfidenceBounds::default()
        };
        assert!(ConfidenceEstimator::new(zero_scale).is_err());
    }
}
