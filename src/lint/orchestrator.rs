//! Lint event loop
//!
//! One task consumes file events in arrival order. For every event it tries
//! to start a whole-project run in the background (at most one in flight)
//! and then lints the event's directory inline, so directory runs are
//! strictly serialized while project runs are not.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::lint::analyzer::{Analyzer, Outcome};
use crate::lint::diagnostics::{DiagnosticBatch, to_batch};
use crate::lint::error::LintError;
use crate::lint::uri::uri_to_path;
use crate::lsp::publisher::DiagnosticsPublisher;

/// A document was opened or saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEvent {
    pub uri: String,
}

impl FileEvent {
    pub fn new(uri: impl Into<String>) -> Self {
        Self { uri: uri.into() }
    }
}

/// Holds the single-flight flag for the lifetime of a project run.
struct ProjectRunGuard(Arc<AtomicBool>);

impl ProjectRunGuard {
    fn try_acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag.clone()))
    }
}

impl Drop for ProjectRunGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Lint state for one workspace
#[derive(Clone)]
pub struct Orchestrator {
    root_uri: String,
    root_path: PathBuf,
    analyzer: Arc<dyn Analyzer>,
    publisher: Arc<dyn DiagnosticsPublisher>,
    project_running: Arc<AtomicBool>,
}

impl Orchestrator {
    pub fn new(
        root_uri: impl Into<String>,
        analyzer: Arc<dyn Analyzer>,
        publisher: Arc<dyn DiagnosticsPublisher>,
    ) -> Self {
        let root_uri = root_uri.into();
        let root_path = uri_to_path(&root_uri);
        Self {
            root_uri,
            root_path,
            analyzer,
            publisher,
            project_running: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn root_uri(&self) -> &str {
        &self.root_uri
    }

    /// Returns true while a whole-project run holds the single-flight flag
    pub fn is_project_running(&self) -> bool {
        self.project_running.load(Ordering::Acquire)
    }

    /// Consumes events until the queue is closed.
    ///
    /// An event outside the workspace root stops the loop; events still
    /// queued behind it are never processed.
    pub async fn run(self, mut events: mpsc::Receiver<FileEvent>) -> Result<(), LintError> {
        info!("Lint loop started for {}", self.root_uri);

        while let Some(event) = events.recv().await {
            if !event.uri.starts_with(&self.root_uri) {
                error!("File outside root: {:?}", event.uri);
                return Err(LintError::OutsideRoot {
                    uri: event.uri,
                    root: self.root_uri,
                });
            }

            self.spawn_project_lint();
            self.lint_file(&event.uri).await;
        }

        info!("Lint loop stopped: event queue closed");
        Ok(())
    }

    /// Starts a whole-project run in the background unless one is in flight.
    pub fn spawn_project_lint(&self) -> Option<JoinHandle<()>> {
        let Some(guard) = ProjectRunGuard::try_acquire(&self.project_running) else {
            debug!("Project lint already running, skipping");
            return None;
        };

        let this = self.clone();
        Some(tokio::spawn(async move {
            let _guard = guard;
            this.lint_project().await;
        }))
    }

    /// Lints the whole workspace and publishes every document with issues.
    ///
    /// Documents without issues get no update, so diagnostics they had from
    /// an earlier run stay until a run names them again.
    pub async fn lint_project(&self) {
        let outcome = self.analyzer.run(self.root_path.clone(), None).await;

        match outcome {
            Ok(Outcome::Clean) => debug!("Project lint found no issues"),
            Ok(Outcome::Issues(result)) => {
                let batch = to_batch(&result, &self.root_uri);
                self.publish_batch(batch).await;
            }
            Err(e) => error!("Project lint failed: {}", e),
        }
    }

    /// Lints the directory containing `uri`.
    ///
    /// The triggering document always receives a publish on success, an
    /// empty one when the analyzer reported nothing for it.
    pub async fn lint_file(&self, uri: &str) {
        let target = uri_to_path(uri)
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.root_path.clone());

        let outcome = self
            .analyzer
            .run(self.root_path.clone(), Some(target))
            .await;

        match outcome {
            Ok(Outcome::Clean) => {
                self.publisher.publish(uri.to_string(), Vec::new()).await;
            }
            Ok(Outcome::Issues(result)) => {
                let mut batch = to_batch(&result, &self.root_uri);
                batch.entry(uri.to_string()).or_default();
                self.publish_batch(batch).await;
            }
            Err(e) => error!("Lint failed for {}: {}", uri, e),
        }
    }

    async fn publish_batch(&self, batch: DiagnosticBatch) {
        for (uri, diagnostics) in batch {
            self.publisher.publish(uri, diagnostics).await;
        }
    }
}
