//! Error taxonomy for catalogue loading and recommendation
//!
//! An unmatched query is a normal outcome (`QueryOutcome::NotFound`), not an
//! error variant.

use thiserror::Error;

/// Errors raised by the recommendation core
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecommendError {
    /// Catalogue missing, unreadable or structurally malformed. Fatal at startup.
    #[error("dataset unavailable ({source_name}): {reason}")]
    DatasetUnavailable { source_name: String, reason: String },

    /// A single catalogue row failed validation. Skipped during load.
    #[error("malformed record at row {row}: {reason}")]
    MalformedRecord { row: usize, reason: String },

    /// Distance was zero, negative or not a finite number
    #[error("invalid distance: {0} km (must be finite and > 0)")]
    InvalidDistance(f64),

    /// Configuration rejected at construction time
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O failure that persisted after retrying a mid-session reload
    #[error("transient failure after {attempts} attempt(s): {reason}")]
    Transient { attempts: usize, reason: String },
}

impl RecommendError {
    pub(crate) fn dataset(source_name: impl Into<String>, reason: impl Into<String>) -> Self {
        RecommendError::DatasetUnavailable {
            source_name: source_name.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RecommendError>;
