//! Wire schema for the chat-completion endpoint.

use serde::{Deserialize, Serialize};

/// One block of multimodal message content.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text.
    Text {
        /// The text itself.
        text: String,
    },
    /// Reference to an already-hosted image.
    ImageUrl {
        /// Image location.
        image_url: ImageUrl,
    },
}

/// Location of a hosted image.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageUrl {
    /// Absolute http(s) URL.
    pub url: String,
}

impl ContentBlock {
    /// Build a text block.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Build an image block.
    #[must_use]
    pub fn image_url(url: impl Into<String>) -> Self {
        Self::ImageUrl {
            image_url: ImageUrl { url: url.into() },
        }
    }

    /// Whether this block references an image.
    #[must_use]
    pub const fn is_image(&self) -> bool {
        matches!(self, Self::ImageUrl { .. })
    }
}

/// Request body for `POST /chat/completions`.
#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub temperature: f32,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a [ContentBlock],
}

impl<'a> ChatMessage<'a> {
    pub(crate) const fn user(content: &'a [ContentBlock]) -> Self {
        Self {
            role: "user",
            content,
        }
    }
}

/// Response envelope. Every level is optional so a well-formed but empty
/// response decodes instead of failing.
#[derive(Debug, Default, Deserialize)]
pub struct ChatCompletionResponse {
    /// Completion candidates.
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// One completion candidate.
#[derive(Debug, Default, Deserialize)]
pub struct Choice {
    /// The generated message.
    #[serde(default)]
    pub message: Option<ChoiceMessage>,
}

/// Generated message.
#[derive(Debug, Default, Deserialize)]
pub struct ChoiceMessage {
    /// Message text.
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatCompletionResponse {
    /// Text of the first candidate, if any.
    #[must_use]
    pub fn into_text(self) -> Option<String> {
        self.choices.into_iter().next()?.message?.content
    }
}
