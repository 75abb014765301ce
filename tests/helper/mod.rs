//! Shared utilities for E2E tests

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use serde_json::json;
use tokio::sync::mpsc;
use tower_lsp::ClientSocket;
use tower_lsp::jsonrpc::Request;

use golangci_lsp::lint::analyzer::{Analyzer, Outcome};
use golangci_lsp::lint::error::AnalyzerError;
use golangci_lsp::lint::types::{AnalysisResult, Issue, IssuePosition};

/// Analyzer returning fixed outcomes for project and directory runs
pub struct ScriptedAnalyzer {
    project: Outcome,
    directory: Outcome,
    calls: Mutex<Vec<Option<PathBuf>>>,
}

impl ScriptedAnalyzer {
    pub fn new(project: Outcome, directory: Outcome) -> Self {
        Self {
            project,
            directory,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Targets of every run so far (`None` for whole-project runs)
    pub fn calls(&self) -> Vec<Option<PathBuf>> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Analyzer for ScriptedAnalyzer {
    async fn run(
        &self,
        _working_dir: PathBuf,
        target: Option<PathBuf>,
    ) -> Result<Outcome, AnalyzerError> {
        let outcome = if target.is_some() {
            self.directory.clone()
        } else {
            self.project.clone()
        };
        self.calls.lock().unwrap().push(target);
        Ok(outcome)
    }
}

pub fn issue(linter: &str, text: &str, filename: &str, line: u32, column: u32) -> Issue {
    Issue {
        from_linter: linter.to_string(),
        text: text.to_string(),
        source_lines: Vec::new(),
        pos: IssuePosition {
            filename: filename.to_string(),
            offset: 0,
            line,
            column,
        },
        line_range: None,
    }
}

pub fn issues(issues: Vec<Issue>) -> Outcome {
    Outcome::Issues(AnalysisResult {
        issues,
        ..Default::default()
    })
}

pub fn create_initialize_request(id: i64, root_uri: Option<&str>) -> Request {
    Request::build("initialize")
        .params(json!({
            "capabilities": {},
            "rootUri": root_uri,
        }))
        .id(id)
        .finish()
}

pub fn create_initialized_notification() -> Request {
    Request::build("initialized").params(json!({})).finish()
}

pub fn create_did_open_notification(uri: &str, text: &str) -> Request {
    Request::build("textDocument/didOpen")
        .params(json!({
            "textDocument": {
                "uri": uri,
                "languageId": "go",
                "version": 1,
                "text": text,
            }
        }))
        .finish()
}

pub fn create_did_save_notification(uri: &str) -> Request {
    Request::build("textDocument/didSave")
        .params(json!({
            "textDocument": { "uri": uri }
        }))
        .finish()
}

/// Forwards every server-to-client message to a channel
pub fn spawn_notification_collector(mut socket: ClientSocket) -> mpsc::UnboundedReceiver<Request> {
    let (tx, rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        while let Some(request) = socket.next().await {
            if tx.send(request).is_err() {
                break;
            }
        }
    });
    rx
}

/// Waits up to two seconds for the next message with the given method
pub async fn wait_for_notification(
    rx: &mut mpsc::UnboundedReceiver<Request>,
    method: &str,
) -> Option<Request> {
    wait_for_notification_within(rx, method, Duration::from_secs(2)).await
}

pub async fn wait_for_notification_within(
    rx: &mut mpsc::UnboundedReceiver<Request>,
    method: &str,
    timeout: Duration,
) -> Option<Request> {
    tokio::time::timeout(timeout, async {
        while let Some(request) = rx.recv().await {
            if request.method() == method {
                return Some(request);
            }
        }
        None
    })
    .await
    .ok()
    .flatten()
}
