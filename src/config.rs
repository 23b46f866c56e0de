//! Recommender configuration
//!
//! Every field is optional in the JSON file; absent fields take the compiled-in
//! defaults. Example:
//!
//! ```json
//! {
//!   "catalogue_path": "data/sample_catalogue.csv",
//!   "matcher": { "cutoff": 0.3, "max_results": 3 },
//!   "weights": { "proximity": 25.0 },
//!   "fallback": { "distance_km": 12.0 },
//!   "facilities": [
//!     { "name": "Bottle Bank", "category": "Glass", "distance_km": 1.5 }
//!   ],
//!   "seed": 42
//! }
//! ```

use crate::confidence::ConfidenceBounds;
use crate::error::{RecommendError, Result};
use crate::facilities::{FacilityDirectory, FallbackDistancePolicy};
use crate::matcher::MatcherConfig;
use crate::scorer::ScoringWeights;
use crate::types::DisposalFacility;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommenderConfig {
    /// Catalogue CSV used by `Recommender::refresh_catalogue`
    pub catalogue_path: Option<PathBuf>,
    pub matcher: MatcherConfig,
    pub weights: ScoringWeights,
    pub confidence: ConfidenceBounds,
    pub fallback: FallbackDistancePolicy,
    /// Replaces the compiled-in facility registry when set
    pub facilities: Option<Vec<DisposalFacility>>,
    /// Seed for reproducible confidence draws
    pub seed: Option<u64>,
}

impl RecommenderConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            RecommendError::InvalidConfig(format!("failed to read {:?}: {}", path, e))
        })?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let config: RecommenderConfig = serde_json::from_str(contents)
            .map_err(|e| RecommendError::InvalidConfig(format!("failed to parse JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.matcher.validate()?;
        self.confidence.validate()?;
        self.fallback.validate()?;
        if let Some(facilities) = &self.facilities {
            FacilityDirectory::new(facilities.clone())?;
        }
        Ok(())
    }

    /// Facility registry: the override if present, otherwise the default
    pub fn facility_directory(&self) -> Result<FacilityDirectory> {
        match &self.facilities {
            Some(facilities) => FacilityDirectory::new(facilities.clone()),
            None => Ok(FacilityDirectory::default()),
        }
    }
}
