//! External analyzer invocation
//!
//! golangci-lint exits non-zero both when it found issues and when it failed
//! to run, so every non-zero exit is treated as "try to parse the report".

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::config::LinterCommand;
use crate::lint::error::AnalyzerError;
use crate::lint::types::AnalysisResult;

/// Result of a completed analyzer run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Zero exit status: nothing to report
    Clean,
    /// Non-zero exit status with a parseable report
    Issues(AnalysisResult),
}

/// Runs the external analyzer
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Runs the analyzer in `working_dir`, restricted to `target` when given.
    ///
    /// The call suspends until the process exits and its output is captured.
    async fn run(
        &self,
        working_dir: PathBuf,
        target: Option<PathBuf>,
    ) -> Result<Outcome, AnalyzerError>;
}

/// `golangci-lint` subprocess analyzer
#[derive(Debug, Clone, Default)]
pub struct GolangciLint {
    command: LinterCommand,
}

impl GolangciLint {
    pub fn new(command: LinterCommand) -> Self {
        Self { command }
    }

    fn build_command(&self, working_dir: &Path, target: Option<&Path>) -> Command {
        let mut cmd = Command::new(&self.command.program);
        cmd.args(&self.command.args);
        if let Some(target) = target {
            cmd.arg(target);
        }
        cmd.current_dir(working_dir).kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl Analyzer for GolangciLint {
    async fn run(
        &self,
        working_dir: PathBuf,
        target: Option<PathBuf>,
    ) -> Result<Outcome, AnalyzerError> {
        let mut cmd = self.build_command(&working_dir, target.as_deref());
        info!(
            "Running command: {} {} {} (dir: {:?})",
            self.command.program,
            self.command.args.join(" "),
            target
                .as_ref()
                .map(|t| t.display().to_string())
                .unwrap_or_default(),
            working_dir
        );

        let output = cmd.output().await.map_err(|source| AnalyzerError::Spawn {
            program: self.command.program.clone(),
            source,
        })?;

        if output.status.success() {
            debug!("Analyzer exited cleanly");
            return Ok(Outcome::Clean);
        }

        if !output.stderr.is_empty() {
            debug!(
                "Analyzer stderr ({}): {}",
                output.status,
                String::from_utf8_lossy(&output.stderr)
            );
        }

        parse_report(&output.stdout).map(Outcome::Issues)
    }
}

/// Parses a captured JSON report, logging the tool's own warnings.
pub fn parse_report(stdout: &[u8]) -> Result<AnalysisResult, AnalyzerError> {
    let result: AnalysisResult = serde_json::from_slice(stdout)?;

    for warning in &result.report.warnings {
        warn!("golangci-lint warning [{}]: {}", warning.tag, warning.text);
    }
    if let Some(error) = &result.report.error {
        warn!("golangci-lint reported an error: {}", error);
    }

    debug!(
        "golangci-lint result: {} issues, enabled linters: {:?}",
        result.issues.len(),
        result.enabled_linters().collect::<Vec<_>>()
    );

    Ok(result)
}
