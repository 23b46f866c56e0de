//! Core domain types shared across the pipeline

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

/// Display sentinel for absent catalogue values
pub const NOT_AVAILABLE: &str = "Not Available";

/// Waste category. Every catalogue record belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum WasteCategory {
    Plastic,
    Paper,
    Metal,
    Organic,
    EWaste,
    Glass,
    Landfill,
    Mixed,
}

impl WasteCategory {
    pub const ALL: [WasteCategory; 8] = [
        WasteCategory::Plastic,
        WasteCategory::Paper,
        WasteCategory::Metal,
        WasteCategory::Organic,
        WasteCategory::EWaste,
        WasteCategory::Glass,
        WasteCategory::Landfill,
        WasteCategory::Mixed,
    ];

    /// Catalogue spelling of the category
    pub fn as_str(&self) -> &'static str {
        match self {
            WasteCategory::Plastic => "Plastic",
            WasteCategory::Paper => "Paper",
            WasteCategory::Metal => "Metal",
            WasteCategory::Organic => "Organic",
            WasteCategory::EWaste => "E-Waste",
            WasteCategory::Glass => "Glass",
            WasteCategory::Landfill => "Landfill",
            WasteCategory::Mixed => "Mixed",
        }
    }
}

impl fmt::Display for WasteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WasteCategory {
    type Err = String;

    /// Case-insensitive; separators inside "E-Waste" are optional
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '-' | '_' | ' '))
            .flat_map(char::to_lowercase)
            .collect();

        match key.as_str() {
            "plastic" => Ok(WasteCategory::Plastic),
            "paper" => Ok(WasteCategory::Paper),
            "metal" => Ok(WasteCategory::Metal),
            "organic" => Ok(WasteCategory::Organic),
            "ewaste" => Ok(WasteCategory::EWaste),
            "glass" => Ok(WasteCategory::Glass),
            "landfill" => Ok(WasteCategory::Landfill),
            "mixed" => Ok(WasteCategory::Mixed),
            _ => Err(format!("unknown waste category '{}'", s.trim())),
        }
    }
}

impl TryFrom<String> for WasteCategory {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<WasteCategory> for String {
    fn from(category: WasteCategory) -> Self {
        category.as_str().to_string()
    }
}

/// One catalogue entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WasteRecord {
    pub item_name: String,
    pub category: WasteCategory,
    /// None when the catalogue generation has no weight column
    pub weight_grams: Option<f64>,
    /// Sign and scale vary by category (landfill items are negative)
    pub carbon_impact_score: Option<f64>,
    /// Free-text facility/bin label
    pub disposal_type: String,
    /// Free-text flag, e.g. "Yes (Store Drop-off)"
    pub recyclable: String,
}

/// Simulated disposal or recycling location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisposalFacility {
    pub name: String,
    pub category: WasteCategory,
    pub distance_km: f64,
}

impl DisposalFacility {
    pub fn new(name: impl Into<String>, category: WasteCategory, distance_km: f64) -> Self {
        Self {
            name: name.into(),
            category,
            distance_km,
        }
    }
}

/// How the query was resolved to a catalogue record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MatchKind {
    Exact,
    /// Catalogue name contains the query as whole words
    Partial { similarity: f64 },
    Fuzzy { similarity: f64 },
}

/// Recommendation produced for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResult {
    pub record: WasteRecord,
    pub match_kind: MatchKind,
    /// Simulated confidence in [0.6, 0.99]
    pub confidence: f64,
    pub nearest_facility: Option<DisposalFacility>,
    /// Distance fed to the scorer (fallback distance when no facility exists)
    pub distance_km: f64,
    pub optimization_score: f64,
    /// Category-specific tips, empty when none apply
    pub guidance: SmallVec<[String; 4]>,
}

/// Query had no acceptable catalogue match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotFound {
    pub query: String,
    pub hint: String,
}

/// Terminal state of a single query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum QueryOutcome {
    Recommended(Box<RecommendationResult>),
    NotFound(NotFound),
}

impl QueryOutcome {
    pub fn recommendation(&self) -> Option<&RecommendationResult> {
        match self {
            QueryOutcome::Recommended(result) => Some(result),
            QueryOutcome::NotFound(_) => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, QueryOutcome::NotFound(_))
    }
}
