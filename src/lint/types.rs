//! golangci-lint JSON report model
//!
//! Field names follow the report emitted by `golangci-lint run --out-format json`.

use serde::{Deserialize, Deserializer};

/// One finding reported by the analyzer
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Issue {
    /// Name of the checker that produced the finding (e.g. "errcheck")
    pub from_linter: String,
    pub text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source_lines: Vec<String>,
    pub pos: IssuePosition,
    #[serde(default)]
    pub line_range: Option<LineRange>,
}

/// 1-based source position; `filename` is relative to the working directory
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct IssuePosition {
    pub filename: String,
    #[serde(default)]
    pub offset: u32,
    pub line: u32,
    #[serde(default)]
    pub column: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LineRange {
    pub from: u32,
    pub to: u32,
}

/// Complete output of one analyzer invocation
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalysisResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub issues: Vec<Issue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub report: Report,
}

/// Tool metadata attached to a result
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Report {
    #[serde(default, deserialize_with = "null_as_default")]
    pub linters: Vec<LinterStatus>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub warnings: Vec<ReportWarning>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LinterStatus {
    pub name: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub enabled_by_default: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ReportWarning {
    #[serde(default)]
    pub tag: String,
    pub text: String,
}

impl AnalysisResult {
    /// Names of the checkers the tool ran with
    pub fn enabled_linters(&self) -> impl Iterator<Item = &str> {
        self.report
            .linters
            .iter()
            .filter(|linter| linter.enabled)
            .map(|linter| linter.name.as_str())
    }
}

/// golangci-lint writes `null` for empty lists
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
