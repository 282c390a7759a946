//! Tiered raster-to-vector engine.
//!
//! One entry point, [`vectorize`], takes uploaded image bytes and a
//! configuration and drives three vectorization strategies in strict
//! order:
//!
//! 1. the in-process trace engine ([`LocalTier`]),
//! 2. an external vector export tool ([`CliTier`]),
//! 3. a remote vectorization HTTP API ([`RemoteTier`]).
//!
//! The first tier to produce markup wins; its output is validated and
//! transparency-patched centrally before being encoded into the
//! response envelope. Every attempt, successful or not, is recorded so
//! failures carry a complete diagnostic chain.
//!
//! Input validation (size cap, decodability) happens before any tier
//! runs and is fatal: undecodable or oversized input never enters the
//! fallback chain.

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod local;
pub mod remote;
pub mod response;

pub use cli::CliTier;
pub use config::{EngineConfig, RemoteConfig, DEFAULT_CLI_TOOL, DEFAULT_MAX_UPLOAD_BYTES};
pub use coordinator::{Coordinator, EngineTier, Job, VectorizeOutcome};
pub use error::{EngineAttempt, EngineError, EngineId, TierError};
pub use local::LocalTier;
pub use remote::{RemoteTier, REMOTE_TIMEOUT};
pub use response::{error_body, error_status, ErrorBody, VectorizeResponse};

use keyline_trace::keying;

/// Vectorize uploaded image bytes through the full tier chain.
///
/// # Errors
///
/// Returns [`EngineError::PayloadTooLarge`] when the upload exceeds the
/// configured cap, [`EngineError::Decode`] when the bytes are not a
/// decodable image, [`EngineError::InvalidOutput`] when a tier produces
/// markup that fails the sanity check, and
/// [`EngineError::AllTiersFailed`] when every tier fails.
pub async fn vectorize(
    image_bytes: &[u8],
    config: &EngineConfig,
) -> Result<VectorizeResponse, EngineError> {
    if image_bytes.len() > config.max_upload_bytes {
        return Err(EngineError::PayloadTooLarge {
            size: image_bytes.len(),
            limit: config.max_upload_bytes,
        });
    }

    let mut raster = keying::decode(image_bytes)?;
    if config.key_dark_background {
        keying::key_dark_background(&mut raster);
    }

    let job = Job {
        raster,
        input_bytes: image_bytes.to_vec(),
        options: config.trace.clone(),
    };

    let coordinator = Coordinator::new(vec![
        Box::new(LocalTier),
        Box::new(CliTier::new(config.cli_tool.clone())),
        Box::new(RemoteTier::new(config.remote.clone())),
    ]);

    let outcome = coordinator.run(&job).await?;
    tracing::info!(
        attempts = outcome.attempts.len(),
        paths = outcome.document.path_count(),
        "vectorization complete",
    );
    Ok(VectorizeResponse::from(&outcome))
}
