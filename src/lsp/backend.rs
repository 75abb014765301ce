use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;
use tower_lsp::jsonrpc::{Error, Result};
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::{error, info, warn};

use crate::config::{EVENT_QUEUE_CAPACITY, LinterCommand, SERVER_NAME};
use crate::lint::analyzer::{Analyzer, GolangciLint};
use crate::lint::orchestrator::{FileEvent, Orchestrator};
use crate::lsp::publisher::DiagnosticsPublisher;

pub struct Backend {
    client: Client,
    analyzer: Arc<dyn Analyzer>,
    /// Producer side of the event queue; `None` once the queue is closed
    events: Mutex<Option<mpsc::Sender<FileEvent>>>,
    /// Consumer side, handed to the lint loop on `initialize`
    pending_receiver: Mutex<Option<mpsc::Receiver<FileEvent>>>,
}

impl Backend {
    pub fn new(client: Client, command: LinterCommand) -> Self {
        Self::build(client, Arc::new(GolangciLint::new(command)))
    }

    /// Creates a backend with a custom analyzer (for testing)
    pub fn build(client: Client, analyzer: Arc<dyn Analyzer>) -> Self {
        let (sender, receiver) = mpsc::channel(EVENT_QUEUE_CAPACITY);
        Self {
            client,
            analyzer,
            events: Mutex::new(Some(sender)),
            pending_receiver: Mutex::new(Some(receiver)),
        }
    }

    pub fn server_capabilities() -> ServerCapabilities {
        ServerCapabilities {
            text_document_sync: Some(TextDocumentSyncCapability::Options(
                TextDocumentSyncOptions {
                    open_close: Some(true),
                    save: Some(TextDocumentSyncSaveOptions::Supported(true)),
                    ..Default::default()
                },
            )),
            ..Default::default()
        }
    }

    /// `rootUri`, falling back to the first workspace folder
    fn root_uri(params: &InitializeParams) -> Option<String> {
        #[allow(deprecated)]
        let root_uri = params.root_uri.as_ref();

        root_uri
            .or_else(|| {
                params
                    .workspace_folders
                    .as_ref()
                    .and_then(|folders| folders.first())
                    .map(|folder| &folder.uri)
            })
            .map(|uri| uri.as_str().trim_end_matches('/').to_string())
    }

    fn spawn_lint_loop(&self, root_uri: String) {
        let Some(receiver) = self.pending_receiver.lock().unwrap().take() else {
            warn!("Lint loop already started, ignoring root {}", root_uri);
            return;
        };

        let publisher: Arc<dyn DiagnosticsPublisher> = Arc::new(self.client.clone());
        let orchestrator = Orchestrator::new(root_uri, self.analyzer.clone(), publisher);

        tokio::spawn(async move {
            if let Err(e) = orchestrator.run(receiver).await {
                error!("Lint loop terminated: {}", e);
            }
        });
    }

    async fn enqueue(&self, uri: &Url) {
        let Some(sender) = self.events.lock().unwrap().clone() else {
            warn!("Event queue closed, dropping {}", uri);
            return;
        };

        if sender.send(FileEvent::new(uri.as_str())).await.is_err() {
            warn!("Lint loop is not running, dropping {}", uri);
        }
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        self.client
            .log_message(MessageType::INFO, "LSP server initializing")
            .await;

        let Some(root_uri) = Self::root_uri(&params) else {
            error!("initialize request without rootUri");
            return Err(Error::invalid_params("No rootURI"));
        };

        info!("Workspace root: {}", root_uri);
        self.spawn_lint_loop(root_uri);

        Ok(InitializeResult {
            capabilities: Self::server_capabilities(),
            server_info: Some(ServerInfo {
                name: SERVER_NAME.to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "LSP server initialized")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        self.client
            .log_message(MessageType::INFO, "LSP server shutting down")
            .await;
        // Dropping the last sender closes the queue; the lint loop drains and exits
        self.events.lock().unwrap().take();
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = &params.text_document.uri;
        self.client
            .log_message(MessageType::LOG, format!("Document opened: {}", uri))
            .await;
        self.enqueue(uri).await;
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        let uri = &params.text_document.uri;
        self.client
            .log_message(MessageType::LOG, format!("Document saved: {}", uri))
            .await;
        self.enqueue(uri).await;
    }
}
