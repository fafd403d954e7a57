//! Error types for the completion client.

use thiserror::Error;

/// Errors produced while configuring or calling the completion endpoint.
#[derive(Debug, Error)]
pub enum LlmError {
    /// No credential was configured.
    #[error("missing API credential: set {0}")]
    MissingCredential(&'static str),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The endpoint URL could not be parsed.
    #[error("invalid completions url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Transport-level HTTP failure.
    #[error("http client error: {0}")]
    Http(#[from] reqwest::Error),

    /// The endpoint answered with a non-success status.
    #[error("completion endpoint returned HTTP {0}")]
    Status(u16),

    /// The request exceeded the configured timeout.
    #[error("completion request timed out")]
    Timeout,

    /// The response body was not a JSON completion envelope.
    #[error("malformed completion response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl LlmError {
    /// Classify a transport error, separating timeouts from other failures.
    #[must_use]
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Http(err)
        }
    }

    /// Whether the error stems from local configuration rather than the network.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(
            self,
            Self::MissingCredential(_) | Self::InvalidConfig(_) | Self::InvalidUrl(_)
        )
    }
}
