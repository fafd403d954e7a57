//! Chat-completion client for the hosted multimodal LLM.
//!
//! - `config`: endpoint, model, sampling parameters and credential
//! - `types`: wire schema for requests, content blocks and responses
//! - `openrouter`: the HTTP client and response decoding

pub mod config;
pub mod error;
pub mod openrouter;
pub mod types;

pub use config::LlmConfig;
pub use error::LlmError;
pub use openrouter::{CompletionClient, decode_completion};
pub use types::{ContentBlock, ImageUrl};
