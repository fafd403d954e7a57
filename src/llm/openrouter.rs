//! Async client for an `OpenAI`-compatible chat-completion endpoint (`OpenRouter` by default).
//!
//! Behaviour:
//! - One `POST` per call, bearer-authenticated.
//! - Non-success statuses and timeouts are errors.
//! - A well-formed envelope without text decodes to `None`; deciding whether
//!   that is a failure is left to the caller.

use reqwest::Client;
use tracing::{debug, info, warn};

use super::config::LlmConfig;
use super::error::LlmError;
use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage, ContentBlock};

/// HTTP client bound to one endpoint, model and credential.
pub struct CompletionClient {
    client: Client,
    config: LlmConfig,
    api_key: String,
}

impl CompletionClient {
    /// Create a client from the given configuration.
    ///
    /// # Errors
    /// Returns an error if no credential is configured, the configuration is
    /// invalid, or the HTTP client cannot be built.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        config.validate()?;
        let api_key = config.require_api_key()?.to_string();

        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// The configuration this client was built from.
    #[must_use]
    pub const fn config(&self) -> &LlmConfig {
        &self.config
    }

    /// Send one user message made of `content` and return the first
    /// completion's text, if the response carries any.
    ///
    /// # Errors
    /// Returns an error on transport failure, timeout, non-success status or
    /// a body that is not JSON.
    pub async fn complete(&self, content: &[ContentBlock]) -> Result<Option<String>, LlmError> {
        let messages = vec![ChatMessage::user(content)];
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages,
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
        };

        info!(
            model = %self.config.model,
            blocks = content.len(),
            image = content.iter().any(ContentBlock::is_image),
            "Sending completion request"
        );

        let response = self
            .client
            .post(&self.config.completions_url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(LlmError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Completion endpoint returned an error status");
            return Err(LlmError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(LlmError::from_transport)?;
        let text = decode_completion(&body)?;
        debug!(has_text = text.is_some(), "Completion response decoded");

        Ok(text)
    }
}

/// Decode a completion envelope and extract the first message text.
///
/// # Errors
/// Returns [`LlmError::Decode`] only when the body is not valid JSON for the
/// envelope; missing choices or content yield `Ok(None)`.
pub fn decode_completion(body: &[u8]) -> Result<Option<String>, LlmError> {
    let envelope: ChatCompletionResponse = serde_json::from_slice(body)?;
    Ok(envelope.into_text())
}
