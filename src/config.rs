use std::path::PathBuf;

/// Name reported to the client in `initialize`
pub const SERVER_NAME: &str = "golangci";

/// Number of file events that may wait for the lint loop before senders block
pub const EVENT_QUEUE_CAPACITY: usize = 5;

const LOG_FILE_NAME: &str = "golangci-lsp.log";

/// Default analyzer program
pub const DEFAULT_LINTER_PROGRAM: &str = "golangci-lint";

/// Default analyzer arguments, requesting the JSON report on stdout
pub const DEFAULT_LINTER_ARGS: [&str; 3] = ["run", "--out-format", "json"];

/// The external analyzer invocation: program plus fixed base arguments.
///
/// A target directory is appended after `args` for directory-scoped runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinterCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl LinterCommand {
    /// Builds a command from CLI overrides.
    /// Empty `args` keeps the default JSON-report arguments.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        let args = if args.is_empty() {
            DEFAULT_LINTER_ARGS.iter().map(|a| a.to_string()).collect()
        } else {
            args
        };

        Self {
            program: program.into(),
            args,
        }
    }
}

impl Default for LinterCommand {
    fn default() -> Self {
        Self::new(DEFAULT_LINTER_PROGRAM, Vec::new())
    }
}

/// Returns the path to the data directory for golangci-lsp.
/// Uses $XDG_DATA_HOME/golangci-lsp if XDG_DATA_HOME is set,
/// otherwise falls back to ~/.local/share/golangci-lsp,
/// or ./golangci-lsp if neither is available.
pub fn data_dir() -> PathBuf {
    data_dir_with_env(std::env::var("XDG_DATA_HOME").ok(), dirs::home_dir())
}

/// Returns the path to the log file.
pub fn log_path() -> PathBuf {
    data_dir().join(LOG_FILE_NAME)
}

fn data_dir_with_env(xdg_data_home: Option<String>, home_dir: Option<PathBuf>) -> PathBuf {
    let data_dir = xdg_data_home
        .map(PathBuf::from)
        .or_else(|| home_dir.map(|home| home.join(".local/share")))
        .unwrap_or_else(|| PathBuf::from("."));

    data_dir.join("golangci-lsp")
}
