//! Category-specific disposal guidance

use crate::types::WasteCategory;
use smallvec::SmallVec;

/// Home composting tips attached to Organic matches
pub const COMPOST_TIPS: &[&str] = &[
    "Separate wet and dry waste",
    "Avoid plastics and metals",
    "Turn compost every 2–3 days",
    "Maintain proper moisture level",
];

/// Guidance for a category; empty when the category has none
pub fn tips_for(category: WasteCategory) -> SmallVec<[String; 4]> {
    match category {
        WasteCategory::Organic => COMPOST_TIPS.iter().map(|tip| tip.to_string()).collect(),
        _ => SmallVec::new(),
    }
}

/// Heading shown above the tips of a category
pub fn heading_for(category: WasteCategory) -> Option<&'static str> {
    match category {
        WasteCategory::Organic => Some("Compost Suggestions"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_organic_gets_compost_tips() {
        let organic = tips_for(WasteCategory::Organic);
        assert_eq!(organic.len(), COMPOST_TIPS.len());
        assert!(organic.iter().any(|tip| tip.contains("compost")));
        assert_eq!(heading_for(WasteCategory::Organic), Some("Compost Suggestions"));

        for category in WasteCategory::ALL {
            if category != WasteCategory::Organic {
                assert!(tips_for(category).is_empty(), "{} has tips", category);
                assert!(heading_for(category).is_none());
            }
        }
    }
}
