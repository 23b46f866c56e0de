//! Catalogue Analytics
//!
//! Aggregate view of a loaded catalogue: how items spread across categories
//! and what share of them goes to the recycling bin.

use crate::data::Catalogue;
use crate::types::WasteCategory;
use rustc_hash::FxHashMap;
use serde::Serialize;

/// Disposal label counted as recycled
pub const RECYCLING_BIN: &str = "Recycling Bin";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogueSummary {
    pub total_items: usize,
    /// Category counts, most common first (ties in category order)
    pub by_category: Vec<(WasteCategory, usize)>,
    pub most_common: Option<WasteCategory>,
    pub recycled_items: usize,
    /// Percentage of items whose disposal type is the recycling bin
    pub recycling_efficiency_pct: f64,
}

impl CatalogueSummary {
    pub fn from_catalogue(catalogue: &Catalogue) -> Self {
        let records = catalogue.records();

        let mut counts: FxHashMap<WasteCategory, usize> = FxHashMap::default();
        for record in records {
            *counts.entry(record.category).or_insert(0) += 1;
        }

        let mut by_category: Vec<(WasteCategory, usize)> = counts.into_iter().collect();
        by_category.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

        let recycled_items = records
            .iter()
            .filter(|r| r.disposal_type.eq_ignore_ascii_case(RECYCLING_BIN))
            .count();

        let recycling_efficiency_pct = if records.is_empty() {
            0.0
        } else {
            recycled_items as f64 / records.len() as f64 * 100.0
        };

        Self {
            total_items: records.len(),
            most_common: by_category.first().map(|(category, _)| *category),
            by_category,
            recycled_items,
            recycling_efficiency_pct,
        }
    }

    /// Console rendering
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Catalogue items: {}\n", self.total_items));
        if let Some(category) = self.most_common {
            out.push_str(&format!("Most common category: {}\n", category));
        }
        for (category, count) in &self.by_category {
            out.push_str(&format!("  {:<10} {}\n", category.as_str(), count));
        }
        out.push_str(&format!(
            "Recycling efficiency: {:.2}% ({} of {})\n",
            self.recycling_efficiency_pct, self.recycled_items, self.total_items
        ));
        out
    }
}
