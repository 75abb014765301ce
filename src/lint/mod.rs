//! Lint orchestration layer
//! - uri.rs: document identifier <-> filesystem path translation
//! - types.rs: golangci-lint JSON report model
//! - error.rs: analyzer and orchestrator errors
//! - analyzer.rs: external analyzer invocation
//! - diagnostics.rs: issue -> LSP diagnostic mapping
//! - orchestrator.rs: event loop and single-flight project runs

pub mod analyzer;
pub mod diagnostics;
pub mod error;
pub mod orchestrator;
pub mod types;
pub mod uri;

pub use analyzer::{Analyzer, GolangciLint, Outcome};
pub use diagnostics::{DiagnosticBatch, to_batch};
pub use error::{AnalyzerError, LintError};
pub use orchestrator::{FileEvent, Orchestrator};
pub use types::{AnalysisResult, Issue};
