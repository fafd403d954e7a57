//! Roast request and response types.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::error::{RoastError, RoastResult};

/// Maximum characters accepted for a name.
pub const MAX_NAME_CHARS: usize = 30;
/// Maximum characters accepted for the interests field.
pub const MAX_INTERESTS_CHARS: usize = 100;

/// Roast intensity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoastCategory {
    /// Light teasing, wholesome tone.
    Mild,
    /// Cheeky roast, sharper jabs allowed (still clean).
    Spicy,
    /// Roast battle mode: clever, biting, but never cruel.
    Savage,
}

impl RoastCategory {
    /// Every category, mildest first.
    pub const ALL: [Self; 3] = [Self::Mild, Self::Spicy, Self::Savage];

    /// Stable string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Mild => "mild",
            Self::Spicy => "spicy",
            Self::Savage => "savage",
        }
    }

    /// Tone calibration given to the model for this intensity.
    #[must_use]
    pub const fn calibration(self) -> &'static str {
        match self {
            Self::Mild => "light teasing, wholesome tone.",
            Self::Spicy => "cheeky roast, sharper jabs allowed (still clean).",
            Self::Savage => "roast battle mode, clever, biting, but never cruel.",
        }
    }
}

impl fmt::Display for RoastCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoastCategory {
    type Err = RoastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        Self::ALL
            .into_iter()
            .find(|category| raw.eq_ignore_ascii_case(category.as_str()))
            .ok_or_else(|| {
                RoastError::Validation(format!(
                    "unknown roast category {raw:?}; expected mild, spicy or savage"
                ))
            })
    }
}

/// One user request for a roast. Doubles as the `POST /api/roast` body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoastRequest {
    /// Intensity.
    pub category: RoastCategory,
    /// Person being roasted.
    pub name: String,
    /// Free-form interests, possibly empty.
    #[serde(default)]
    pub interests: String,
    /// Selfie location. Only hosted http(s) images reach the model.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl RoastRequest {
    /// Create a request without an image.
    #[must_use]
    pub fn new(category: RoastCategory, name: impl Into<String>, interests: impl Into<String>) -> Self {
        Self {
            category,
            name: name.into(),
            interests: interests.into(),
            image_url: None,
        }
    }

    /// Attach a selfie reference.
    #[must_use]
    pub fn with_image_url(mut self, url: impl Into<String>) -> Self {
        self.image_url = Some(url.into());
        self
    }

    /// Validate name and interests.
    ///
    /// # Errors
    /// Returns [`RoastError::Validation`] if the name is blank or a field is too long.
    pub fn validate_details(&self) -> RoastResult<()> {
        if self.name.trim().is_empty() {
            return Err(RoastError::Validation(
                "Please enter your name to get a personalized roast.".to_string(),
            ));
        }

        if self.name.chars().count() > MAX_NAME_CHARS {
            return Err(RoastError::Validation(format!(
                "name must be at most {MAX_NAME_CHARS} characters"
            )));
        }

        if self.interests.chars().count() > MAX_INTERESTS_CHARS {
            return Err(RoastError::Validation(format!(
                "interests must be at most {MAX_INTERESTS_CHARS} characters"
            )));
        }

        Ok(())
    }

    /// Full submission check: details plus a selfie reference.
    ///
    /// # Errors
    /// Returns [`RoastError::Validation`] if the image is missing or
    /// [`Self::validate_details`] fails.
    pub fn validate(&self) -> RoastResult<()> {
        let has_image = self
            .image_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty());
        if !has_image {
            return Err(RoastError::Validation(
                "Please upload a selfie to get roasted.".to_string(),
            ));
        }

        self.validate_details()
    }
}

/// A generated roast and the request that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoastResponse {
    /// Roast text, never empty.
    pub text: String,
    /// Originating request.
    pub request: Arc<RoastRequest>,
}
