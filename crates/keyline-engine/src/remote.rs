//! Tier 3: remote vectorization HTTP API.
//!
//! Last resort: the original upload is posted as a multipart form with
//! a server-side simplification parameter, authenticated with basic
//! auth. The call is bounded by a hard timeout; a timeout is a failure,
//! never retried. The response body is taken as the vector markup
//! directly — no local tracing happens on this tier.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::RemoteConfig;
use crate::coordinator::{EngineTier, Job};
use crate::error::{EngineId, TierError};

/// Hard ceiling on the remote call, including the body read.
pub const REMOTE_TIMEOUT: Duration = Duration::from_secs(30);

/// The remote vectorization tier.
///
/// Constructed with `None` when no credentials are configured; the tier
/// is still attempted and recorded, keeping the diagnostic chain
/// complete.
#[derive(Debug, Clone)]
pub struct RemoteTier {
    config: Option<RemoteConfig>,
}

impl RemoteTier {
    /// Create the tier from optional remote configuration.
    #[must_use]
    pub const fn new(config: Option<RemoteConfig>) -> Self {
        Self { config }
    }

    async fn post(&self, config: &RemoteConfig, image_bytes: Vec<u8>) -> Result<String, TierError> {
        let client = reqwest::Client::builder()
            .timeout(REMOTE_TIMEOUT)
            .build()
            .map_err(|error| TierError::RemoteApi(error.to_string()))?;

        let part = reqwest::multipart::Part::bytes(image_bytes)
            .file_name("input.png")
            .mime_str("image/png")
            .map_err(|error| TierError::RemoteApi(error.to_string()))?;
        let form = reqwest::multipart::Form::new()
            .part("image", part)
            .text("simplify", config.simplify.to_string());

        let response = client
            .post(&config.endpoint)
            .basic_auth(&config.api_id, Some(&config.api_secret))
            .multipart(form)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(TierError::RemoteApi(format!("HTTP {status}")));
        }

        response.text().await.map_err(classify)
    }
}

/// Map a transport error onto the tier taxonomy, keeping timeouts
/// distinguishable for the 504 mapping.
fn classify(error: reqwest::Error) -> TierError {
    if error.is_timeout() {
        TierError::RemoteTimeout
    } else {
        TierError::RemoteApi(error.to_string())
    }
}

#[async_trait]
impl EngineTier for RemoteTier {
    fn id(&self) -> EngineId {
        EngineId::Remote
    }

    async fn vectorize(&self, job: &Job) -> Result<String, TierError> {
        let Some(config) = &self.config else {
            return Err(TierError::NotConfigured(
                "remote vectorization credentials are not set".to_owned(),
            ));
        };
        self.post(config, job.input_bytes.clone()).await
    }
}
