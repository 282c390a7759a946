//! Error taxonomy and attempt records for the tiered engine.
//!
//! Tier-level failures ([`TierError`]) drive the fallback state machine
//! and are never surfaced directly; the caller sees [`EngineError`],
//! which for exhausted fallback carries the full attempt chain for
//! diagnostics.

use serde::Serialize;

use keyline_export::ExportError;
use keyline_trace::TraceError;

/// Identifier of one engine tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineId {
    /// In-process trace engine.
    Local,
    /// External vector export tool.
    Cli,
    /// Remote vectorization HTTP API.
    Remote,
}

impl std::fmt::Display for EngineId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Local => "local",
            Self::Cli => "cli",
            Self::Remote => "remote",
        };
        f.write_str(name)
    }
}

/// Record of one attempted engine tier.
///
/// Ephemeral: used for fallback decisions and the diagnostic summary in
/// error responses, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct EngineAttempt {
    /// Which tier was attempted.
    pub engine: EngineId,
    /// Whether the tier produced markup.
    pub succeeded: bool,
    /// Whether the failure was a timeout (drives the 504 mapping).
    pub timed_out: bool,
    /// Failure description, absent on success.
    pub error_detail: Option<String>,
}

impl EngineAttempt {
    /// Record a successful attempt.
    #[must_use]
    pub const fn success(engine: EngineId) -> Self {
        Self {
            engine,
            succeeded: true,
            timed_out: false,
            error_detail: None,
        }
    }

    /// Record a failed attempt.
    #[must_use]
    pub fn failure(engine: EngineId, error: &TierError) -> Self {
        Self {
            engine,
            succeeded: false,
            timed_out: matches!(error, TierError::RemoteTimeout),
            error_detail: Some(error.to_string()),
        }
    }
}

/// Failure of a single engine tier.
///
/// Every variant triggers a transition to the next tier; only the
/// accumulated record surfaces to the caller.
#[derive(Debug, thiserror::Error)]
pub enum TierError {
    /// The in-process trace engine failed.
    #[error("trace failed: {0}")]
    Trace(String),

    /// The external tool is not installed or not executable.
    #[error("external tool unavailable: {0}")]
    ToolUnavailable(String),

    /// The external tool ran but produced no usable output under any
    /// invocation syntax.
    #[error("external tool failed: {0}")]
    ToolFailed(String),

    /// The remote service did not answer within the hard timeout.
    #[error("remote vectorization timed out")]
    RemoteTimeout,

    /// The remote service answered with an error.
    #[error("remote vectorization failed: {0}")]
    RemoteApi(String),

    /// The tier has no configuration (e.g. missing credentials). Still
    /// recorded as an attempt — tiers are never skipped silently.
    #[error("not configured: {0}")]
    NotConfigured(String),

    /// Filesystem error while staging temp artifacts.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

/// Caller-visible engine failure.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The input image could not be decoded. Fatal: no tier is
    /// attempted on undecodable input.
    #[error("failed to decode input image: {0}")]
    Decode(#[from] TraceError),

    /// The input exceeds the configured size cap.
    #[error("input image is too large: {size} bytes (limit {limit})")]
    PayloadTooLarge {
        /// Received payload size.
        size: usize,
        /// Configured cap.
        limit: usize,
    },

    /// A tier produced markup that fails the minimal sanity check.
    /// Fatal: garbage output does not trigger further fallback.
    #[error(transparent)]
    InvalidOutput(#[from] ExportError),

    /// Every tier failed. Carries the ordered attempt chain.
    #[error("vectorization failed after {} engine attempt(s)", attempts.len())]
    AllTiersFailed {
        /// Attempts in the order they were made.
        attempts: Vec<EngineAttempt>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_id_display() {
        assert_eq!(EngineId::Local.to_string(), "local");
        assert_eq!(EngineId::Cli.to_string(), "cli");
        assert_eq!(EngineId::Remote.to_string(), "remote");
    }

    #[test]
    fn failure_attempt_captures_timeout_flag() {
        let attempt = EngineAttempt::failure(EngineId::Remote, &TierError::RemoteTimeout);
        assert!(attempt.timed_out);
        assert!(!attempt.succeeded);

        let attempt =
            EngineAttempt::failure(EngineId::Cli, &TierError::ToolFailed("boom".to_owned()));
        assert!(!attempt.timed_out);
    }

    #[test]
    fn success_attempt_has_no_detail() {
        let attempt = EngineAttempt::success(EngineId::Local);
        assert!(attempt.succeeded);
        assert!(attempt.error_detail.is_none());
    }

    #[test]
    fn all_tiers_failed_display_counts_attempts() {
        let err = EngineError::AllTiersFailed {
            attempts: vec![
                EngineAttempt::failure(EngineId::Local, &TierError::Trace("x".to_owned())),
                EngineAttempt::failure(EngineId::Remote, &TierError::RemoteTimeout),
            ],
        };
        assert_eq!(
            err.to_string(),
            "vectorization failed after 2 engine attempt(s)"
        );
    }
}
