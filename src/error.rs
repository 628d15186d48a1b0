//! Error types for gradpay
//!
//! Only input-access problems are errors. Data-quality issues (malformed
//! cells, groups too short to fit, undefined correlations) are resolved
//! inside the computations and never surface here.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// gradpay error types
#[derive(Error, Debug)]
pub enum Error {
    /// The input table lacks a column a computation cannot run without
    #[error("input table has no '{column}' column (required by {operation})")]
    MissingColumn {
        /// Column name as it appears in the header
        column: String,
        /// Computation that needed it
        operation: &'static str,
    },

    /// A metric name did not match any known numeric column
    #[error("unknown metric '{0}'")]
    UnknownMetric(String),

    /// Configuration values that cannot drive a computation
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
