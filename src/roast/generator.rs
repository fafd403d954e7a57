//! Backend seam for roast generation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use crate::llm::CompletionClient;

use super::error::{RoastError, RoastResult};
use super::payload::assemble_content;
use super::prompt::build_roast_prompt;
use super::types::RoastRequest;

/// Something that can turn a [`RoastRequest`] into roast text.
#[async_trait]
pub trait RoastGenerator: Send + Sync {
    /// Produce roast text for `request`. Never returns an empty string on success.
    ///
    /// # Errors
    /// Returns a [`RoastError`] when the backend fails or produces no usable text.
    async fn generate(&self, request: &RoastRequest) -> RoastResult<String>;

    /// Short backend label for logs and health output.
    fn backend(&self) -> &'static str;
}

#[async_trait]
impl<G: RoastGenerator + ?Sized> RoastGenerator for Arc<G> {
    async fn generate(&self, request: &RoastRequest) -> RoastResult<String> {
        (**self).generate(request).await
    }

    fn backend(&self) -> &'static str {
        (**self).backend()
    }
}

#[async_trait]
impl RoastGenerator for CompletionClient {
    async fn generate(&self, request: &RoastRequest) -> RoastResult<String> {
        let prompt = build_roast_prompt(request.category, &request.name, &request.interests);
        let content = assemble_content(prompt, request.image_url.as_deref());

        info!(
            category = %request.category,
            name_chars = request.name.chars().count(),
            image = content.len() > 1,
            "Generating roast"
        );

        let text = self.complete(&content).await?;
        non_empty(text)
    }

    fn backend(&self) -> &'static str {
        "openrouter"
    }
}

/// Turn an optional completion into roast text, treating blank output as a failure.
///
/// # Errors
/// Returns [`RoastError::EmptyCompletion`] when `text` is absent or blank.
pub fn non_empty(text: Option<String>) -> RoastResult<String> {
    match text {
        Some(text) if !text.trim().is_empty() => Ok(text.trim().to_string()),
        _ => Err(RoastError::EmptyCompletion),
    }
}
