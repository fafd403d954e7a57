//! Application state shared across all request handlers.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::{AppConfig, RoastBackend};
use crate::llm::CompletionClient;
use crate::roast::{FallbackGenerator, RoastError, RoastGenerator, SavedRoasts};

/// Shared application state.
pub struct AppState {
    /// Generator behind `POST /api/roast`.
    pub generator: Arc<dyn RoastGenerator>,
    /// Saved roasts for this process.
    pub saved: RwLock<SavedRoasts>,
    /// Site used to build challenge links.
    pub challenge_base_url: String,
}

impl AppState {
    /// Create the application state for the configured backend.
    ///
    /// # Errors
    /// Returns an error if the completion client cannot be created, most
    /// commonly because no credential is configured.
    pub fn new(config: &AppConfig) -> Result<Arc<Self>, RoastError> {
        let generator: Arc<dyn RoastGenerator> = match config.backend {
            RoastBackend::OpenRouter => Arc::new(CompletionClient::new(config.llm.clone())?),
            RoastBackend::Fallback => Arc::new(FallbackGenerator),
        };

        tracing::info!(backend = generator.backend(), "Roast generator ready");

        Ok(Self::with_generator(generator, config.challenge_base_url.clone()))
    }

    /// Create state around an existing generator.
    #[must_use]
    pub fn with_generator(
        generator: Arc<dyn RoastGenerator>,
        challenge_base_url: impl Into<String>,
    ) -> Arc<Self> {
        Arc::new(Self {
            generator,
            saved: RwLock::new(SavedRoasts::new()),
            challenge_base_url: challenge_base_url.into(),
        })
    }
}
