//! Error types for the roast pipeline.

use thiserror::Error;

use crate::llm::LlmError;

/// Message shown to the user whenever generation fails, whatever the cause.
pub const GENERIC_FAILURE_MESSAGE: &str = "Failed to generate a roast. Please try again.";

/// Errors surfaced by the roast pipeline.
#[derive(Debug, Error)]
pub enum RoastError {
    /// The request was rejected before any network call.
    #[error("invalid roast request: {0}")]
    Validation(String),

    /// The generator is not configured correctly (e.g. missing credential).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Transport failure, timeout or non-success status.
    #[error("network error: {0}")]
    Network(String),

    /// The upstream answered but produced no usable text.
    #[error("the model returned an empty roast")]
    EmptyCompletion,

    /// A newer submission replaced this request before it resolved.
    #[error("roast request superseded by a newer submission")]
    Superseded,

    /// Saved-roast removal with an index past the end of the collection.
    #[error("saved roast index {index} out of range (len {len})")]
    SavedIndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Collection length at the time of the call.
        len: usize,
    },
}

impl From<LlmError> for RoastError {
    fn from(value: LlmError) -> Self {
        match value {
            err if err.is_config() => Self::Configuration(err.to_string()),
            LlmError::Decode(_) => Self::EmptyCompletion,
            err => Self::Network(err.to_string()),
        }
    }
}

impl RoastError {
    /// Check if a user-initiated resubmission could succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Network(_) | Self::EmptyCompletion)
    }
}

/// Convenience result alias for roast operations.
pub type RoastResult<T> = Result<T, RoastError>;
