//! Configuration for the completion client.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use super::error::LlmError;

/// Environment variable holding the bearer credential.
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";
/// Environment variable overriding the model identifier.
pub const MODEL_ENV: &str = "ROASTBOT_MODEL";
/// Environment variable overriding the completions endpoint.
pub const COMPLETIONS_URL_ENV: &str = "ROASTBOT_COMPLETIONS_URL";
/// Environment variable overriding the request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "ROASTBOT_TIMEOUT_SECS";

/// Default hosted multimodal model.
pub const DEFAULT_MODEL: &str = "mistralai/mistral-small-3.1-24b-instruct:free";
/// Default chat-completion endpoint.
pub const DEFAULT_COMPLETIONS_URL: &str = "https://openrouter.ai/api/v1/chat/completions";
/// Sampling temperature, tuned for creative output.
pub const DEFAULT_TEMPERATURE: f32 = 0.9;
/// Token cap, sized for a single roast of at most 45 words.
pub const DEFAULT_MAX_TOKENS: u32 = 100;

/// Settings for the chat-completion endpoint.
#[derive(Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Full URL of the chat-completion endpoint.
    pub completions_url: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Bearer credential. Never serialized.
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Response length cap in tokens.
    pub max_tokens: u32,
    /// Whole-request timeout.
    #[serde(rename = "request_timeout_ms", with = "duration_ms")]
    pub request_timeout: Duration,
    /// Connection timeout.
    #[serde(rename = "connect_timeout_ms", with = "duration_ms")]
    pub connect_timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            completions_url: DEFAULT_COMPLETIONS_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            request_timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("completions_url", &self.completions_url)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("request_timeout", &self.request_timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

impl LlmConfig {
    /// Create a new config with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a config from the process environment.
    ///
    /// # Errors
    /// Returns an error if a variable is set to an unusable value.
    pub fn from_env() -> Result<Self, LlmError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from an arbitrary variable lookup.
    ///
    /// A missing credential is not an error here; it is reported when the
    /// client is constructed.
    ///
    /// # Errors
    /// Returns an error if the timeout is not a positive integer or the
    /// resulting config fails validation.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, LlmError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(key) = lookup(API_KEY_ENV).filter(|k| !k.trim().is_empty()) {
            config.api_key = Some(key.trim().to_string());
        }
        if let Some(model) = lookup(MODEL_ENV).filter(|m| !m.trim().is_empty()) {
            config.model = model.trim().to_string();
        }
        if let Some(url) = lookup(COMPLETIONS_URL_ENV).filter(|u| !u.trim().is_empty()) {
            config.completions_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(TIMEOUT_ENV).filter(|t| !t.trim().is_empty()) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                LlmError::InvalidConfig(format!("{TIMEOUT_ENV} must be a number of seconds, got {raw:?}"))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    /// Set the bearer credential.
    #[must_use]
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the completions endpoint.
    #[must_use]
    pub fn with_completions_url(mut self, url: impl Into<String>) -> Self {
        self.completions_url = url.into();
        self
    }

    /// Set the whole-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Return the credential, or a configuration error if none is set.
    ///
    /// # Errors
    /// Returns [`LlmError::MissingCredential`] when the key is absent or blank.
    pub fn require_api_key(&self) -> Result<&str, LlmError> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(LlmError::MissingCredential(API_KEY_ENV))
    }

    /// Validate configuration invariants.
    ///
    /// # Errors
    /// Returns an error if any value is out of range or the URL is unusable.
    pub fn validate(&self) -> Result<(), LlmError> {
        let url = Url::parse(&self.completions_url)?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(LlmError::InvalidConfig(format!(
                "completions_url must be http(s), got {}",
                url.scheme()
            )));
        }

        if self.model.trim().is_empty() {
            return Err(LlmError::InvalidConfig("model must not be empty".to_string()));
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(LlmError::InvalidConfig(
                "temperature must be within 0.0..=2.0".to_string(),
            ));
        }

        if self.max_tokens == 0 {
            return Err(LlmError::InvalidConfig("max_tokens must be > 0".to_string()));
        }

        if self.request_timeout.is_zero() {
            return Err(LlmError::InvalidConfig(
                "request_timeout must be > 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Serde module for Duration serialization, in whole milliseconds.
mod duration_ms {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        u64::try_from(duration.as_millis())
            .unwrap_or(u64::MAX)
            .serialize(serializer)
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let millis = u64::deserialize(deserializer)?;
        Ok(Duration::from_millis(millis))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = LlmConfig::default();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.max_tokens, 100);
        assert!((config.temperature - 0.9).abs() < f32::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_lookup_reads_overrides() {
        let config = LlmConfig::from_lookup(lookup_from(&[
            (API_KEY_ENV, "sk-test"),
            (MODEL_ENV, "vision/model"),
            (TIMEOUT_ENV, "15"),
        ]));
        assert!(config.is_ok());
        let config = config.unwrap_or_default();
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
        assert_eq!(config.model, "vision/model");
        assert_eq!(config.request_timeout, Duration::from_secs(15));
    }

    #[test]
    fn test_missing_key_is_reported_on_demand() {
        let config = LlmConfig::from_lookup(lookup_from(&[])).unwrap_or_default();
        assert!(matches!(
            config.require_api_key(),
            Err(LlmError::MissingCredential(API_KEY_ENV))
        ));

        let blank = LlmConfig::new().with_api_key("   ");
        assert!(blank.require_api_key().is_err());
    }

    #[test]
    fn test_bad_timeout_rejected() {
        let result = LlmConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV, "soon")]));
        assert!(matches!(result, Err(LlmError::InvalidConfig(_))));
    }

    #[test]
    fn test_non_http_endpoint_rejected() {
        let config = LlmConfig::new().with_completions_url("ftp://example.com/v1");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_credential() {
        let config = LlmConfig::new().with_api_key("sk-super-secret");
        let rendered = format!("{config:?}");
        assert!(!rendered.contains("sk-super-secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn test_serialization_skips_credential() {
        let config = LlmConfig::new().with_api_key("sk-super-secret");
        let json = serde_json::to_string(&config).unwrap_or_default();
        assert!(!json.contains("sk-super-secret"));
        assert!(json.contains("\"request_timeout_ms\":30000"));
    }

    #[test]
    fn test_sub_second_timeout_survives_serialization() {
        let config = LlmConfig::new().with_timeout(Duration::from_millis(500));
        let json = serde_json::to_string(&config).unwrap_or_default();
        let restored: Result<LlmConfig, _> = serde_json::from_str(&json);
        assert!(restored.is_ok_and(|c| {
            c.request_timeout == Duration::from_millis(500) && c.validate().is_ok()
        }));
    }

    #[test]
    fn test_blank_timeout_uses_default() {
        let config = LlmConfig::from_lookup(lookup_from(&[(TIMEOUT_ENV, "  ")]));
        assert!(config.is_ok_and(|c| c.request_timeout == Duration::from_secs(30)));
    }
}
