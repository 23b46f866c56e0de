use crate::guidance::heading_for;
use crate::types::{MatchKind, NotFound, QueryOutcome, RecommendationResult, NOT_AVAILABLE};

const RULE: &str = "================================================";

/// Plain-text console report
pub struct TextFormatter;

impl TextFormatter {
    /// Format any outcome
    pub fn format_outcome(outcome: &QueryOutcome) -> String {
        match outcome {
            QueryOutcome::Recommended(result) => Self::format(result),
            QueryOutcome::NotFound(not_found) => Self::format_not_found(not_found),
        }
    }

    /// Format a recommendation as an aligned field report
    pub fn format(result: &RecommendationResult) -> String {
        let record = &result.record;
        let mut out = String::with_capacity(1024);

        out.push_str("SMART WASTE RECOMMENDATION\n");
        out.push_str(RULE);
        out.push('\n');

        push_field(&mut out, "Waste Item", &record.item_name);
        match result.match_kind {
            MatchKind::Exact => {}
            MatchKind::Partial { .. } => push_field(&mut out, "Matched By", "partial name"),
            MatchKind::Fuzzy { similarity } => push_field(
                &mut out,
                "Matched By",
                &format!("closest name ({:.2} similarity)", similarity),
            ),
        }
        push_field(&mut out, "Category", record.category.as_str());
        push_field(&mut out, "Recyclable", &record.recyclable);
        push_field(&mut out, "Disposal Method", &record.disposal_type);
        push_field(
            &mut out,
            "Weight",
            &record
                .weight_grams
                .map(|w| format!("{} grams", w))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        );
        push_field(
            &mut out,
            "Carbon Impact Score",
            &record
                .carbon_impact_score
                .map(|c| c.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        );
        push_field(&mut out, "Confidence", &result.confidence.to_string());

        match &result.nearest_facility {
            Some(facility) => {
                push_field(&mut out, "Nearest Center", &facility.name);
                push_field(&mut out, "Distance", &format!("{} km", facility.distance_km));
            }
            None => push_field(&mut out, "Nearest Center", NOT_AVAILABLE),
        }

        if !result.guidance.is_empty() {
            let heading = heading_for(record.category).unwrap_or("Suggestions");
            out.push_str(&format!("\n{}:\n", heading));
            for tip in &result.guidance {
                out.push_str(&format!(" - {}\n", tip));
            }
        }

        out.push('\n');
        push_field(&mut out, "Optimization Score", &format!("{:.2}", result.optimization_score));

        out.push_str("\nDecision Logic:\n");
        out.push_str("Optimized using carbon impact, waste weight,\n");
        out.push_str("confidence, and distance-based scoring.\n");
        out.push_str(RULE);
        out.push('\n');

        out
    }

    /// Format a not-found outcome; reads as guidance, not as a failure
    pub fn format_not_found(not_found: &NotFound) -> String {
        format!(
            "No catalogue item matches \"{}\".\nTip: {}\n",
            not_found.query, not_found.hint
        )
    }
}

fn push_field(out: &mut String, label: &str, value: &str) {
    out.push_str(&format!("{:<24}: {}\n", label, value));
}
