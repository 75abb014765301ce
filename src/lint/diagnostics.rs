//! Mapping of analyzer issues to LSP diagnostics

use indexmap::IndexMap;
use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, Position, Range};

use crate::lint::types::{AnalysisResult, Issue};
use crate::lint::uri::join_uri;

/// Diagnostics per document identifier, in the order the analyzer reported them.
///
/// Only documents with at least one issue are present.
pub type DiagnosticBatch = IndexMap<String, Vec<Diagnostic>>;

/// Groups the result's issues by document, resolving filenames against `root`.
pub fn to_batch(result: &AnalysisResult, root: &str) -> DiagnosticBatch {
    let mut batch = DiagnosticBatch::new();

    for issue in &result.issues {
        let uri = join_uri(root, &issue.pos.filename);
        batch.entry(uri).or_default().push(to_diagnostic(issue));
    }

    batch
}

/// Zero-width warning at the issue's position
pub fn to_diagnostic(issue: &Issue) -> Diagnostic {
    let position = Position::new(
        issue.pos.line.saturating_sub(1),
        issue.pos.column.saturating_sub(1),
    );

    Diagnostic {
        range: Range::new(position, position),
        severity: Some(DiagnosticSeverity::WARNING),
        source: Some(issue.from_linter.clone()),
        message: diagnostic_message(issue),
        ..Default::default()
    }
}

fn diagnostic_message(issue: &Issue) -> String {
    format!("{}: {}", issue.from_linter, issue.text)
}
