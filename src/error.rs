//! Error types for the anofox-synth library.

use thiserror::Error;

/// Result type alias for synthesis operations.
pub type Result<T> = std::result::Result<T, SynthError>;

/// Errors that can occur while building, corrupting, or exporting a dataset.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SynthError {
    /// Input data is empty.
    #[error("empty input data")]
    EmptyData,

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Dimension mismatch between aligned columns.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Timestamp-related error.
    #[error("timestamp error: {0}")]
    TimestampError(String),

    /// Index out of bounds.
    #[error("index out of bounds: {index} (size: {size})")]
    IndexOutOfBounds { index: usize, size: usize },

    /// Filesystem failure while exporting.
    #[error("io error: {0}")]
    Io(String),

    /// Failure while writing the tabular artifact.
    #[error("csv error: {0}")]
    Csv(String),
}

impl From<std::io::Error> for SynthError {
    fn from(err: std::io::Error) -> Self {
        SynthError::Io(err.to_string())
    }
}

impl From<csv::Error> for SynthError {
    fn from(err: csv::Error) -> Self {
        SynthError::Csv(err.to_string())
    }
}
