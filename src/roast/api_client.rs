//! Client for the `POST /api/roast` surface served by this crate.
//!
//! Lets a UI process drive a [`RoastPipeline`](super::RoastPipeline) against a
//! remote roast server instead of calling the model directly.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;
use url::Url;

use super::error::{RoastError, RoastResult};
use super::generator::{RoastGenerator, non_empty};
use super::types::RoastRequest;

#[derive(Debug, Deserialize)]
struct RoastApiResponse {
    #[serde(default)]
    roast: Option<String>,
}

/// HTTP client for a roast server.
pub struct RoastApiClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl RoastApiClient {
    /// Create a client for the server at `base_url`.
    ///
    /// # Errors
    /// Returns [`RoastError::Configuration`] if the URL is invalid or the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> RoastResult<Self> {
        let endpoint = Url::parse(base_url)
            .and_then(|base| base.join("/api/roast"))
            .map_err(|e| RoastError::Configuration(format!("invalid roast server url: {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RoastError::Configuration(format!("http client error: {e}")))?;

        Ok(Self { client, endpoint })
    }

    /// Full URL requests are sent to.
    #[must_use]
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl RoastGenerator for RoastApiClient {
    async fn generate(&self, request: &RoastRequest) -> RoastResult<String> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(request)
            .send()
            .await
            .map_err(|e| RoastError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            warn!(status = status.as_u16(), "Roast server returned an error status");
            return Err(RoastError::Network(format!("roast server returned HTTP {status}")));
        }

        let body: RoastApiResponse = response.json().await.map_err(|_| RoastError::EmptyCompletion)?;
        non_empty(body.roast)
    }

    fn backend(&self) -> &'static str {
        "roast-api"
    }
}
