//! Per-session roast request state machine.
//!
//! `Idle -> Generating -> (Succeeded | Failed) -> Generating -> ...`
//!
//! A submission made while another is still generating supersedes it: every
//! submission bumps an epoch, and an outcome is only applied if its epoch is
//! still current. The superseded caller gets [`RoastError::Superseded`].
//!
//! A `submit` future dropped before it resolves (an aborted task, an outer
//! timeout) moves its request to `Failed` if it is still the current one.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info, warn};

use super::error::{RoastError, RoastResult};
use super::generator::RoastGenerator;
use super::types::{RoastRequest, RoastResponse};

/// Failure reason recorded when a request is abandoned mid-flight.
pub const CANCELLED_REASON: &str = "roast request cancelled before completion";

/// Observable pipeline state.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum PipelineState {
    /// Nothing submitted yet, or reset.
    #[default]
    Idle,
    /// Waiting on the generator for this request.
    Generating(Arc<RoastRequest>),
    /// Last request produced a roast.
    Succeeded(RoastResponse),
    /// Last request failed; human-readable reason.
    Failed(String),
}

impl PipelineState {
    /// Stable label for logs and serialization.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Generating(_) => "generating",
            Self::Succeeded(_) => "succeeded",
            Self::Failed(_) => "failed",
        }
    }

    /// Whether a request is in flight.
    #[must_use]
    pub const fn is_generating(&self) -> bool {
        matches!(self, Self::Generating(_))
    }

    /// The roast text, if the last request succeeded.
    #[must_use]
    pub fn roast_text(&self) -> Option<&str> {
        match self {
            Self::Succeeded(response) => Some(&response.text),
            _ => None,
        }
    }
}

struct Inner {
    epoch: u64,
    state: PipelineState,
}

// Held only for short synchronous sections, never across an await.
fn lock(inner: &Mutex<Inner>) -> MutexGuard<'_, Inner> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Settles the pipeline if the owning `submit` future is dropped early.
struct InFlight<'a> {
    inner: &'a Mutex<Inner>,
    epoch: u64,
    resolved: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.resolved {
            return;
        }

        let mut inner = lock(self.inner);
        if inner.epoch == self.epoch {
            inner.state = PipelineState::Failed(CANCELLED_REASON.to_string());
            drop(inner);
            warn!(epoch = self.epoch, "Roast request dropped before completion");
        }
    }
}

/// Owns one [`PipelineState`] and drives it through a [`RoastGenerator`].
pub struct RoastPipeline<G> {
    generator: G,
    inner: Mutex<Inner>,
}

impl<G: RoastGenerator> RoastPipeline<G> {
    /// Create an idle pipeline.
    #[must_use]
    pub const fn new(generator: G) -> Self {
        Self {
            generator,
            inner: Mutex::new(Inner {
                epoch: 0,
                state: PipelineState::Idle,
            }),
        }
    }

    /// Snapshot of the current state.
    #[must_use]
    pub fn state(&self) -> PipelineState {
        lock(&self.inner).state.clone()
    }

    /// Number of submissions accepted so far (plus resets).
    #[must_use]
    pub fn epoch(&self) -> u64 {
        lock(&self.inner).epoch
    }

    /// Return to `Idle`. Any outstanding request will be discarded when it resolves.
    pub fn reset(&self) {
        let mut inner = lock(&self.inner);
        inner.epoch += 1;
        inner.state = PipelineState::Idle;
    }

    /// Validate and run one request.
    ///
    /// Validation failures return immediately and leave the state untouched.
    ///
    /// # Errors
    /// Returns the validation or generation error, or
    /// [`RoastError::Superseded`] if a newer request was submitted meanwhile.
    pub async fn submit(&self, request: RoastRequest) -> RoastResult<RoastResponse> {
        request.validate()?;
        let request = Arc::new(request);

        let (epoch, superseding) = self.begin(&request);
        if superseding {
            debug!(epoch, "Superseding in-flight roast request");
        }
        let mut in_flight = InFlight {
            inner: &self.inner,
            epoch,
            resolved: false,
        };

        info!(
            epoch,
            backend = self.generator.backend(),
            category = %request.category,
            "Roast request submitted"
        );

        let outcome = self
            .generator
            .generate(&request)
            .await
            .map(|text| RoastResponse {
                text,
                request: Arc::clone(&request),
            });
        in_flight.resolved = true;

        if !self.settle(epoch, &outcome) {
            debug!(epoch, "Discarding stale roast outcome");
            return Err(RoastError::Superseded);
        }

        if let Err(err) = &outcome {
            warn!(epoch, error = %err, "Roast request failed");
        }
        outcome
    }

    /// Enter `Generating` under a fresh epoch. Also reports whether another
    /// request was still in flight.
    fn begin(&self, request: &Arc<RoastRequest>) -> (u64, bool) {
        let mut inner = lock(&self.inner);
        let superseding = inner.state.is_generating();
        inner.epoch += 1;
        inner.state = PipelineState::Generating(Arc::clone(request));
        (inner.epoch, superseding)
    }

    /// Apply `outcome` if `epoch` is still current.
    fn settle(&self, epoch: u64, outcome: &RoastResult<RoastResponse>) -> bool {
        let mut inner = lock(&self.inner);
        if inner.epoch != epoch {
            return false;
        }
        inner.state = match outcome {
            Ok(response) => PipelineState::Succeeded(response.clone()),
            Err(err) => PipelineState::Failed(err.to_string()),
        };
        drop(inner);
        true
    }
}
