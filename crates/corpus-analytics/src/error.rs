//! Error types for the corpus analytics engine.
//!
//! Uses `thiserror` for structured error handling. The taxonomy is small by
//! design: a run either lacks the data a component needs
//! ([`AnalysisError::InsufficientData`], [`AnalysisError::EmptyVocabulary`])
//! or an individual record is unusable for one step
//! ([`AnalysisError::MalformedRecord`]). Malformed records are logged and
//! skipped per step; they never abort a run.

/// Errors from analysis components.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// The corpus is too small for the requested decomposition.
    #[error("insufficient data: {requested} topics requested but only {available} documents")]
    InsufficientData {
        /// Number of topics requested.
        requested: usize,
        /// Number of usable documents available.
        available: usize,
    },

    /// No terms survived normalization and vocabulary filtering.
    #[error("vocabulary is empty after normalization and filtering")]
    EmptyVocabulary,

    /// A record is missing a field required by a specific step.
    ///
    /// The failing record is skipped for that step only; other steps still
    /// consume it.
    #[error("malformed record '{source_id}': missing {field}")]
    MalformedRecord {
        /// Source identifier of the offending record.
        source_id: String,
        /// Name of the missing field.
        field: String,
    },
}

impl AnalysisError {
    /// Create an insufficient-data error.
    #[must_use]
    pub fn insufficient_data(requested: usize, available: usize) -> Self {
        Self::InsufficientData { requested, available }
    }

    /// Create a malformed-record error.
    #[must_use]
    pub fn malformed(source_id: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MalformedRecord { source_id: source_id.into(), field: field.into() }
    }

    /// Returns true if the error only disqualifies a single record rather
    /// than the whole component.
    #[must_use]
    pub const fn is_record_level(&self) -> bool {
        matches!(self, Self::MalformedRecord { .. })
    }
}

/// Result type alias for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
