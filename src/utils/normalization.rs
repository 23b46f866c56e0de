//! Normalization Utilities
//!
//! Catalogue keys are compared after stripping byte-order markers, trimming
//! whitespace and lowercasing. Exported catalogues frequently carry a UTF-8
//! BOM on the first header cell.

const BOM: char = '\u{feff}';

/// Normalize a catalogue key or user query for comparison
pub fn normalize_key(raw: &str) -> String {
    clean_field(raw).to_lowercase()
}

/// Strip BOMs and surrounding whitespace, preserving case
pub fn clean_field(raw: &str) -> &str {
    raw.trim_matches(|c: char| c == BOM || c.is_whitespace())
}

/// Round to two decimal places (display precision for scores)
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
