//! Shared error type across metrix crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Write targeted a metric that requires a definition.
    UndefinedMetric,
    /// Histogram bucket bounds rejected at definition time.
    InvalidBuckets,
    /// Histogram observation was NaN or infinite.
    InvalidObservation,
    /// Internal failure (render or state corruption).
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::UndefinedMetric => "UNDEFINED_METRIC",
            ClientCode::InvalidBuckets => "INVALID_BUCKETS",
            ClientCode::InvalidObservation => "INVALID_OBSERVATION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Unified error type used by the registry and its callers.
#[derive(Debug, Error)]
pub enum MetricsError {
    #[error("metric {0} is not defined")]
    UndefinedMetric(String),
    #[error("invalid buckets for {name}: {reason}")]
    InvalidBuckets { name: String, reason: String },
    #[error("non-finite observation {value} for {name}")]
    InvalidObservation { name: String, value: f64 },
    #[error("internal: {0}")]
    Internal(String),
}

impl MetricsError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            MetricsError::UndefinedMetric(_) => ClientCode::UndefinedMetric,
            MetricsError::InvalidBuckets { .. } => ClientCode::InvalidBuckets,
            MetricsError::InvalidObservation { .. } => ClientCode::InvalidObservation,
            MetricsError::Internal(_) => ClientCode::Internal,
        }
    }
}
