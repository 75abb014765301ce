//! Outbound diagnostics channel

use async_trait::async_trait;
use tower_lsp::Client;
use tower_lsp::lsp_types::{Diagnostic, Url};
use tracing::{debug, error};

/// Pushes diagnostics for one document to the editor.
///
/// Fire-and-forget: failures are logged by the implementation and never
/// reach the caller. An empty list clears the document's diagnostics.
#[async_trait]
pub trait DiagnosticsPublisher: Send + Sync {
    async fn publish(&self, uri: String, diagnostics: Vec<Diagnostic>);
}

#[async_trait]
impl DiagnosticsPublisher for Client {
    async fn publish(&self, uri: String, diagnostics: Vec<Diagnostic>) {
        let url = match Url::parse(&uri) {
            Ok(url) => url,
            Err(e) => {
                error!("Cannot publish diagnostics for {:?}: {}", uri, e);
                return;
            }
        };

        debug!("Publishing {} diagnostics for {}", diagnostics.len(), url);
        self.publish_diagnostics(url, diagnostics, None).await;
    }
}
