//! Tier 1: the in-process trace engine.
//!
//! No network, no subprocess, no temp files — the job's owned raster is
//! traced and rendered directly. Always attempted first.

use async_trait::async_trait;

use keyline_export::render_svg;
use keyline_trace::trace_image;

use crate::coordinator::{EngineTier, Job};
use crate::error::{EngineId, TierError};

/// The local tracing tier.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalTier;

#[async_trait]
impl EngineTier for LocalTier {
    fn id(&self) -> EngineId {
        EngineId::Local
    }

    async fn vectorize(&self, job: &Job) -> Result<String, TierError> {
        let result = trace_image(&job.raster, &job.options);
        Ok(render_svg(&result.paths, result.dimensions, &job.options))
    }
}
