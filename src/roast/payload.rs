//! Multimodal payload assembly.
//!
//! Only images already hosted behind an http(s) URL are forwarded. Device-local
//! references (`file://`, `content://`, `ph://`, bare paths) are dropped and the
//! roast degrades to text-only without an error.

use tracing::debug;
use url::Url;

use crate::llm::ContentBlock;

/// Whether `reference` points at a network-hosted image the model can fetch.
#[must_use]
pub fn is_hosted_image_url(reference: &str) -> bool {
    Url::parse(reference.trim())
        .is_ok_and(|url| matches!(url.scheme(), "http" | "https") && url.host().is_some())
}

/// Build the ordered content blocks: the prompt, then the image if usable.
#[must_use]
pub fn assemble_content(prompt: String, image_url: Option<&str>) -> Vec<ContentBlock> {
    let mut blocks = Vec::with_capacity(2);
    blocks.push(ContentBlock::text(prompt));

    match image_url {
        Some(url) if is_hosted_image_url(url) => blocks.push(ContentBlock::image_url(url.trim())),
        Some(_) => debug!("Image reference is not a hosted URL, roasting text-only"),
        None => {}
    }

    blocks
}
