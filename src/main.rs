use clap::Parser;

use golangci_lsp::config::{DEFAULT_LINTER_PROGRAM, LinterCommand};
use golangci_lsp::lsp::server::run_server;

/// Language server publishing golangci-lint findings as diagnostics
#[derive(Debug, Parser)]
#[command(name = "golangci-lsp", version, about)]
struct Cli {
    /// golangci-lint executable
    #[arg(long, value_name = "PROGRAM", default_value = DEFAULT_LINTER_PROGRAM)]
    linter: String,

    /// Replaces the default `run --out-format json` arguments (repeatable)
    #[arg(long = "linter-arg", value_name = "ARG", allow_hyphen_values = true)]
    linter_args: Vec<String>,

    /// Log at debug level unless RUST_LOG is set
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let command = LinterCommand::new(cli.linter, cli.linter_args);

    run_server(command, cli.verbose).await
}
