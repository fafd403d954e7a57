//! Process configuration for the roast server.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::llm::{LlmConfig, LlmError};
use crate::roast::share::DEFAULT_CHALLENGE_BASE_URL;

/// Default server port.
pub const DEFAULT_PORT: u16 = 3000;

/// Environment variable selecting the generator backend.
pub const BACKEND_ENV: &str = "ROASTBOT_BACKEND";
/// Environment variable overriding the listen port.
pub const PORT_ENV: &str = "ROASTBOT_PORT";
/// Environment variable overriding the challenge link site.
pub const CHALLENGE_BASE_URL_ENV: &str = "ROASTBOT_CHALLENGE_BASE_URL";

/// Which generator serves `POST /api/roast`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoastBackend {
    /// Hosted chat-completion model.
    #[default]
    OpenRouter,
    /// Offline template table.
    Fallback,
}

impl RoastBackend {
    /// Stable string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OpenRouter => "openrouter",
            Self::Fallback => "fallback",
        }
    }
}

impl fmt::Display for RoastBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoastBackend {
    type Err = LlmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "openrouter" | "remote" => Ok(Self::OpenRouter),
            "fallback" | "mock" | "offline" => Ok(Self::Fallback),
            other => Err(LlmError::InvalidConfig(format!(
                "{BACKEND_ENV} must be openrouter or fallback, got {other:?}"
            ))),
        }
    }
}

/// Top-level server configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Generator backend.
    pub backend: RoastBackend,
    /// Completion client settings.
    pub llm: LlmConfig,
    /// Listen port.
    pub port: u16,
    /// Site used to build challenge links.
    pub challenge_base_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            backend: RoastBackend::default(),
            llm: LlmConfig::default(),
            port: DEFAULT_PORT,
            challenge_base_url: DEFAULT_CHALLENGE_BASE_URL.to_string(),
        }
    }
}

impl AppConfig {
    /// Build a config from the process environment.
    ///
    /// # Errors
    /// Returns an error if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// # Errors
    /// Returns an error if the backend or port is invalid, or the LLM
    /// settings fail validation.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LlmError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let llm = LlmConfig::from_lookup(&lookup)?;

        let backend = lookup(BACKEND_ENV)
            .filter(|b| !b.trim().is_empty())
            .map_or(Ok(RoastBackend::default()), |raw| RoastBackend::from_str(&raw))?;

        let port = lookup(PORT_ENV)
            .filter(|p| !p.trim().is_empty())
            .map_or(Ok(DEFAULT_PORT), |raw| {
                raw.trim().parse().map_err(|_| {
                    LlmError::InvalidConfig(format!("{PORT_ENV} must be a port number, got {raw:?}"))
                })
            })?;

        let challenge_base_url = lookup(CHALLENGE_BASE_URL_ENV)
            .map(|u| u.trim().to_string())
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| DEFAULT_CHALLENGE_BASE_URL.to_string());
        url::Url::parse(&challenge_base_url)?;

        Ok(Self {
            backend,
            llm,
            port,
            challenge_base_url,
        })
    }
}
