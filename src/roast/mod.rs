//! Roast request/response pipeline.
//!
//! - `types`: categories, requests and responses
//! - `prompt`: deterministic prompt construction
//! - `payload`: multimodal content assembly with image-scheme gating
//! - `generator`: backend seam, implemented for the completion client
//! - `fallback`: offline template generator
//! - `pipeline`: per-session state machine with stale-response discard
//! - `saved`: ordered saved-roast collection
//! - `share`: share texts and challenge links
//! - `api_client`: client for this crate's HTTP surface

pub mod api_client;
pub mod error;
pub mod fallback;
pub mod generator;
pub mod payload;
pub mod pipeline;
pub mod prompt;
pub mod saved;
pub mod share;
pub mod types;

pub use api_client::RoastApiClient;
pub use error::{GENERIC_FAILURE_MESSAGE, RoastError, RoastResult};
pub use fallback::FallbackGenerator;
pub use generator::RoastGenerator;
pub use payload::assemble_content;
pub use pipeline::{PipelineState, RoastPipeline};
pub use prompt::build_roast_prompt;
pub use saved::{SavedRoast, SavedRoasts};
pub use types::{RoastCategory, RoastRequest, RoastResponse};
