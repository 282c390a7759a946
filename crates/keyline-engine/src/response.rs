//! Caller-facing JSON envelopes and HTTP status mapping.
//!
//! The engine itself is transport-agnostic; this module shapes its
//! results the way the serving layer expects them: a success envelope
//! with the data URL plus raw markup, or an error envelope with a
//! human-readable message and a tier-attempt summary that distinguishes
//! "image problem" from "service problem" without leaking internal
//! paths or credentials.

use serde::{Deserialize, Serialize};

use crate::coordinator::VectorizeOutcome;
use crate::error::{EngineAttempt, EngineError};

/// Success envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VectorizeResponse {
    /// Base64 data URL of the final document.
    pub svg_url: String,
    /// Raw vector markup.
    pub svg_data: String,
}

impl From<&VectorizeOutcome> for VectorizeResponse {
    fn from(outcome: &VectorizeOutcome) -> Self {
        Self {
            svg_url: outcome.document.to_data_url(),
            svg_data: outcome.document.markup().to_owned(),
        }
    }
}

/// Error envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Human-readable failure message.
    pub error: String,
    /// Diagnostic detail, e.g. the tier-attempt summary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// HTTP status for an engine failure.
///
/// 400 for undecodable input, 413 for oversized input, 504 when the
/// terminal failure was a remote timeout, 500 otherwise.
#[must_use]
pub fn error_status(error: &EngineError) -> u16 {
    match error {
        EngineError::Decode(_) => 400,
        EngineError::PayloadTooLarge { .. } => 413,
        EngineError::AllTiersFailed { attempts } => {
            if attempts.last().is_some_and(|a| a.timed_out) {
                504
            } else {
                500
            }
        }
        EngineError::InvalidOutput(_) => 500,
    }
}

/// Build the error envelope for an engine failure.
#[must_use]
pub fn error_body(error: &EngineError) -> ErrorBody {
    let details = match error {
        EngineError::AllTiersFailed { attempts } => Some(attempts_summary(attempts)),
        EngineError::Decode(_) | EngineError::PayloadTooLarge { .. } => None,
        EngineError::InvalidOutput(inner) => Some(inner.to_string()),
    };

    ErrorBody {
        error: error.to_string(),
        details,
    }
}

/// One-line summary of the attempt chain, in order.
fn attempts_summary(attempts: &[EngineAttempt]) -> String {
    attempts
        .iter()
        .map(|attempt| {
            let outcome = attempt
                .error_detail
                .as_deref()
                .unwrap_or(if attempt.succeeded { "ok" } else { "failed" });
            format!("{}: {outcome}", attempt.engine)
        })
        .collect::<Vec<_>>()
        .join("; ")
}
