//! Error types for loading annotation records.

use thiserror::Error;

/// Errors that can occur while turning fetched records into annotations.
///
/// Degenerate geometry (short polygons, malformed boxes) is not an error;
/// it is skipped when rendering.
#[derive(Error, Debug)]
pub enum RecordError {
    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The record parsed but cannot describe an annotation
    #[error("Invalid record: {message}")]
    InvalidRecord {
        /// Description of the problem
        message: String,
    },
}

impl RecordError {
    /// Create an invalid record error with a message.
    pub fn invalid_record(message: impl Into<String>) -> Self {
        Self::InvalidRecord {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, RecordError>;
