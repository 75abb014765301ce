use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse analyzer output: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum LintError {
    #[error("File outside root: {uri:?} (root: {root:?})")]
    OutsideRoot { uri: String, root: String },
}
