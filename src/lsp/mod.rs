// LSP protocol layer
// - server.rs: stdio server entry point
// - backend.rs: LanguageServer trait implementation
// - publisher.rs: diagnostics notification channel
pub mod backend;
pub mod publisher;
pub mod server;
