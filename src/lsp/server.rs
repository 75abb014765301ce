use crate::config::LinterCommand;
use crate::log::init;
use tower_lsp::{LspService, Server};
use tracing::info;

use crate::lsp::backend::Backend;

pub async fn run_server(command: LinterCommand, verbose: bool) -> anyhow::Result<()> {
    let _log_guard = init(verbose)?;

    info!("Starting golangci-lsp server (linter: {})", command.program);

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = LspService::new(move |client| Backend::new(client, command));
    Server::new(stdin, stdout, socket).serve(service).await;

    info!("golangci-lsp server stopped");
    Ok(())
}
