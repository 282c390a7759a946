//! Engine configuration.
//!
//! Every empirical knob is configuration rather than a constant: the
//! production defaults (threshold 180, speckle 5, curve tolerance 0.2,
//! remote simplify 0.3) were chosen by eye, and nothing in the pipeline
//! assumes they are optimal for all inputs.

use std::fmt;

use serde::{Deserialize, Serialize};

use keyline_trace::TraceOptions;

/// Default input size cap in bytes (10 MB).
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Default external vector export tool.
pub const DEFAULT_CLI_TOOL: &str = "inkscape";

/// Configuration for the tiered vectorization engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Options for the local trace tier.
    pub trace: TraceOptions,

    /// Whether to key near-black pixels to transparency before tracing.
    pub key_dark_background: bool,

    /// Maximum accepted input size in bytes.
    pub max_upload_bytes: usize,

    /// Name (or path) of the external vector export tool for the CLI
    /// tier.
    pub cli_tool: String,

    /// Remote vectorization service for the final tier. `None` means
    /// the tier is attempted and recorded as unavailable.
    pub remote: Option<RemoteConfig>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            trace: TraceOptions::default(),
            key_dark_background: true,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            cli_tool: DEFAULT_CLI_TOOL.to_owned(),
            remote: None,
        }
    }
}

/// Credentials and parameters for the remote vectorization service.
///
/// `Debug` redacts the secret so configs can be logged safely.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// HTTPS endpoint accepting a multipart image upload.
    pub endpoint: String,

    /// Basic-auth user.
    pub api_id: String,

    /// Basic-auth password.
    pub api_secret: String,

    /// Server-side path simplification parameter.
    #[serde(default = "default_simplify")]
    pub simplify: f64,
}

const fn default_simplify() -> f64 {
    0.3
}

impl fmt::Debug for RemoteConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RemoteConfig")
            .field("endpoint", &self.endpoint)
            .field("api_id", &self.api_id)
            .field("api_secret", &"<redacted>")
            .field("simplify", &self.simplify)
            .finish()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_values() {
        let config = EngineConfig::default();
        assert!(config.key_dark_background);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.cli_tool, "inkscape");
        assert!(config.remote.is_none());
        assert_eq!(config.trace.threshold, 180);
    }

    #[test]
    fn remote_simplify_defaults_when_missing() {
        let json = r#"{"endpoint": "https://api.example/vectorize", "api_id": "id", "api_secret": "s"}"#;
        let remote: RemoteConfig = serde_json::from_str(json).unwrap();
        assert!((remote.simplify - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn debug_redacts_secret() {
        let remote = RemoteConfig {
            endpoint: "https://api.example/vectorize".to_owned(),
            api_id: "id".to_owned(),
            api_secret: "super-secret".to_owned(),
            simplify: 0.3,
        };
        let debug = format!("{remote:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn config_serde_round_trip() {
        let config = EngineConfig {
            cli_tool: "vector-export".to_owned(),
            ..EngineConfig::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        let deserialized: EngineConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, deserialized);
    }
}
