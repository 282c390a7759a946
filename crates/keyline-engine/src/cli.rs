//! Tier 2: external vector export tool.
//!
//! The tool is invoked as a subprocess inside a freshly created,
//! job-scoped temporary working directory that is removed (recursively,
//! best effort) on every exit path. Two incompatible invocation
//! syntaxes exist in the wild, so invocations are driven by a
//! prioritized table of strategies rather than hardcoded branches;
//! adding a future syntax means adding a table row.
//!
//! Success is judged by the output artifact existing and being
//! non-empty, not by exit code alone — this class of tool is known to
//! exit zero without writing, and vice versa.

use std::path::Path;
use std::process::Command;

use async_trait::async_trait;

use crate::coordinator::{EngineTier, Job};
use crate::error::{EngineId, TierError};

/// One invocation syntax: a pure data record of argument templates.
///
/// `{input}` and `{output}` placeholders are substituted with the
/// job-scoped temp paths before execution.
#[derive(Debug, Clone, Copy)]
pub struct InvocationStrategy {
    /// Name used in logs and failure details.
    pub id: &'static str,
    /// Argument templates in order.
    pub args: &'static [&'static str],
}

/// Invocation syntaxes in priority order: modern flag-based first,
/// legacy positional second.
pub const INVOCATION_STRATEGIES: &[InvocationStrategy] = &[
    InvocationStrategy {
        id: "modern",
        args: &[
            "--export-filename={output}",
            "--export-type=svg",
            "--export-plain-svg",
            "{input}",
        ],
    },
    InvocationStrategy {
        id: "legacy",
        args: &["-f", "{input}", "-l", "{output}", "--export-plain-svg"],
    },
];

/// Substitute the `{input}`/`{output}` placeholders in one template.
fn substitute(template: &str, input: &Path, output: &Path) -> String {
    template
        .replace("{input}", &input.display().to_string())
        .replace("{output}", &output.display().to_string())
}

/// Run one strategy and apply the artifact success predicate.
fn run_strategy(
    tool: &Path,
    strategy: &InvocationStrategy,
    input: &Path,
    output: &Path,
) -> Result<String, TierError> {
    let args: Vec<String> = strategy
        .args
        .iter()
        .map(|template| substitute(template, input, output))
        .collect();

    let result = Command::new(tool).args(&args).output()?;

    if !result.status.success() {
        tracing::debug!(
            strategy = strategy.id,
            status = %result.status,
            stderr = %String::from_utf8_lossy(&result.stderr),
            "export tool exited non-zero",
        );
    }

    // The artifact is the success predicate; exit status only feeds the
    // failure detail.
    match std::fs::read_to_string(output) {
        Ok(markup) if !markup.trim().is_empty() => Ok(markup),
        Ok(_) => Err(TierError::ToolFailed(format!(
            "empty output artifact (exit status {})",
            result.status,
        ))),
        Err(_) => Err(TierError::ToolFailed(format!(
            "no output artifact (exit status {})",
            result.status,
        ))),
    }
}

/// Export the image through the external tool, trying each invocation
/// strategy in order inside a job-scoped temp directory under
/// `temp_root`.
///
/// The directory is deleted when this function returns, on success and
/// failure alike.
fn export_with_tool(tool: &str, image_bytes: &[u8], temp_root: &Path) -> Result<String, TierError> {
    let tool_path = which::which(tool)
        .map_err(|error| TierError::ToolUnavailable(format!("{tool}: {error}")))?;

    let workdir = tempfile::Builder::new()
        .prefix("keyline-job-")
        .tempdir_in(temp_root)?;
    let input = workdir.path().join("input.png");
    let output = workdir.path().join("output.svg");
    std::fs::write(&input, image_bytes)?;

    let mut failures = Vec::with_capacity(INVOCATION_STRATEGIES.len());
    for strategy in INVOCATION_STRATEGIES {
        match run_strategy(&tool_path, strategy, &input, &output) {
            Ok(markup) => return Ok(markup),
            Err(error) => {
                tracing::warn!(
                    strategy = strategy.id,
                    error = %error,
                    "invocation strategy failed",
                );
                failures.push(format!("{}: {error}", strategy.id));
            }
        }
        // A failed strategy may leave a stale artifact behind; the next
        // strategy's predicate must not see it.
        let _ = std::fs::remove_file(&output);
    }

    Err(TierError::ToolFailed(failures.join("; ")))
}

/// The external-tool tier.
#[derive(Debug, Clone)]
pub struct CliTier {
    tool: String,
}

impl CliTier {
    /// Create a tier invoking the named tool (a bare name resolved via
    /// `PATH`, or an absolute path).
    #[must_use]
    pub const fn new(tool: String) -> Self {
        Self { tool }
    }
}

#[async_trait]
impl EngineTier for CliTier {
    fn id(&self) -> EngineId {
        EngineId::Cli
    }

    async fn vectorize(&self, job: &Job) -> Result<String, TierError> {
        let tool = self.tool.clone();
        let bytes = job.input_bytes.clone();
        let temp_root = std::env::temp_dir();

        // Subprocess execution blocks; run it on the blocking pool so
        // concurrent jobs are not serialized behind one export.
        tokio::task::spawn_blocking(move || export_with_tool(&tool, &bytes, &temp_root))
            .await
            .map_err(|error| TierError::ToolFailed(format!("export worker failed: {error}")))?
    }
}
