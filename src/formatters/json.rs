use crate::types::QueryOutcome;

/// JSON formatter for query outcomes
pub struct JsonFormatter;

impl JsonFormatter {
    /// Format outcome as pretty-printed JSON
    pub fn format(outcome: &QueryOutcome) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(outcome)
    }

    /// Format outcome as compact JSON (no whitespace)
    pub fn format_compact(outcome: &QueryOutcome) -> Result<String, serde_json::Error> {
        serde_json::to_string(outcome)
    }
}
