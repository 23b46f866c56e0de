//! Facility Directory
//!
//! Static registry of simulated disposal and recycling facilities. Distances
//! are fixed constants, not geolocation.

use crate::error::{RecommendError, Result};
use crate::types::{DisposalFacility, WasteCategory};
use serde::{Deserialize, Serialize};

/// Distance scored when a category has no registered facility
pub const DEFAULT_FALLBACK_DISTANCE_KM: f64 = 10.0;

/// Registry of facilities, validated on construction
#[derive(Debug, Clone)]
pub struct FacilityDirectory {
    facilities: Vec<DisposalFacility>,
}

impl Default for FacilityDirectory {
    /// Compiled-in registry. Glass, Landfill and Mixed have no facility.
    fn default() -> Self {
        Self {
            facilities: vec![
                DisposalFacility::new("GreenCycle Hub", WasteCategory::Plastic, 2.1),
                DisposalFacility::new("PaperLoop Center", WasteCategory::Paper, 3.4),
                DisposalFacility::new("MetalWorks Facility", WasteCategory::Metal, 4.6),
                DisposalFacility::new("Urban Compost Facility", WasteCategory::Organic, 2.8),
                DisposalFacility::new("E-Waste Safe Center", WasteCategory::EWaste, 5.0),
            ],
        }
    }
}

impl FacilityDirectory {
    /// Build a registry, rejecting non-positive or non-finite distances
    pub fn new(facilities: Vec<DisposalFacility>) -> Result<Self> {
        for facility in &facilities {
            check_distance(facility.distance_km)?;
        }
        Ok(Self { facilities })
    }

    /// Closest facility accepting `category` (first registered wins ties)
    pub fn nearest(&self, category: WasteCategory) -> Option<&DisposalFacility> {
        self.facilities
            .iter()
            .filter(|facility| facility.category == category)
            .fold(None, |best: Option<&DisposalFacility>, facility| match best {
                Some(current) if current.distance_km <= facility.distance_km => Some(current),
                _ => Some(facility),
            })
    }

    /// `nearest` for a free-text category label (case-insensitive)
    pub fn nearest_by_name(&self, category: &str) -> Option<&DisposalFacility> {
        category.parse().ok().and_then(|c| self.nearest(c))
    }

    pub fn facilities(&self) -> &[DisposalFacility] {
        &self.facilities
    }
}

/// Distance substituted when no facility serves a category
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FallbackDistancePolicy {
    pub distance_km: f64,
}

impl Default for FallbackDistancePolicy {
    fn default() -> Self {
        Self {
            distance_km: DEFAULT_FALLBACK_DISTANCE_KM,
        }
    }
}

impl FallbackDistancePolicy {
    pub fn new(distance_km: f64) -> Result<Self> {
        check_distance(distance_km)?;
        Ok(Self { distance_km })
    }

    pub fn validate(&self) -> Result<()> {
        check_distance(self.distance_km)
    }

    /// Facility distance, or the policy distance when there is no facility
    pub fn resolve(&self, facility: Option<&DisposalFacility>) -> f64 {
        match facility {
            Some(f) => f.distance_km,
            None => self.distance_km,
        }
    }
}

pub(crate) fn check_distance(distance_km: f64) -> Result<()> {
    if distance_km.is_finite() && distance_km > 0.0 {
        Ok(())
    } else {
        Err(RecommendError::InvalidDistance(distance_km))
    }
}
