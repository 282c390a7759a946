//! The fallback coordinator: an explicit tier state machine.
//!
//! Tiers are attempted in strict order until one produces markup or all
//! are exhausted. Each attempt — including tiers known to be
//! unconfigured — is recorded, so the diagnostic chain always shows what
//! was tried. A successful tier's markup is validated and
//! transparency-patched here, in one place, regardless of which tier
//! produced it.
//!
//! The [`EngineTier`] trait is the injection seam: tests drive the state
//! machine with fakes instead of real subprocess or network execution.

use async_trait::async_trait;

use keyline_export::VectorDocument;
use keyline_trace::{RgbaImage, TraceOptions};

use crate::error::{EngineAttempt, EngineError, EngineId, TierError};

/// One vectorization job: an exclusively owned raster plus the original
/// upload bytes.
///
/// The local tier traces `raster` (already keyed when keying is
/// enabled); the CLI and remote tiers re-export `input_bytes`, the
/// untouched upload, since those tools do their own preprocessing.
/// Nothing here is shared across concurrent jobs.
#[derive(Debug, Clone)]
pub struct Job {
    /// Decoded (and optionally keyed) pixel buffer.
    pub raster: RgbaImage,
    /// Original upload bytes for the external tiers.
    pub input_bytes: Vec<u8>,
    /// Per-job trace options.
    pub options: TraceOptions,
}

/// A single vectorization strategy.
#[async_trait]
pub trait EngineTier: Send + Sync {
    /// Identifier used in attempt records and logs.
    fn id(&self) -> EngineId;

    /// Produce SVG markup for the job, or a tier failure.
    async fn vectorize(&self, job: &Job) -> Result<String, TierError>;
}

/// Result of a successful coordinator run.
#[derive(Debug, Clone)]
pub struct VectorizeOutcome {
    /// The validated, transparency-patched document.
    pub document: VectorDocument,
    /// Every attempt made, in order, ending with the successful one.
    pub attempts: Vec<EngineAttempt>,
}

/// Drives the tier list for one job at a time.
pub struct Coordinator {
    tiers: Vec<Box<dyn EngineTier>>,
}

impl Coordinator {
    /// Build a coordinator over an explicit tier list.
    ///
    /// Order is significant: tiers are attempted front to back.
    #[must_use]
    pub fn new(tiers: Vec<Box<dyn EngineTier>>) -> Self {
        Self { tiers }
    }

    /// Run the job through the tiers until one succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::AllTiersFailed`] with the ordered attempt
    /// chain when every tier fails, or [`EngineError::InvalidOutput`]
    /// when the succeeding tier's markup fails the sanity check (fatal,
    /// no further fallback).
    pub async fn run(&self, job: &Job) -> Result<VectorizeOutcome, EngineError> {
        let mut attempts = Vec::with_capacity(self.tiers.len());

        for tier in &self.tiers {
            match tier.vectorize(job).await {
                Ok(markup) => {
                    tracing::debug!(engine = %tier.id(), "engine tier produced markup");
                    attempts.push(EngineAttempt::success(tier.id()));

                    let document = VectorDocument::new(markup)?.with_transparency();
                    return Ok(VectorizeOutcome {
                        document,
                        attempts,
                    });
                }
                Err(error) => {
                    tracing::warn!(
                        engine = %tier.id(),
                        error = %error,
                        "engine tier failed, falling back",
                    );
                    attempts.push(EngineAttempt::failure(tier.id(), &error));
                }
            }
        }

        Err(EngineError::AllTiersFailed { attempts })
    }
}
