use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};

use crate::lsp::document::DocumentState;
use crate::validation::engine::LanguageId;
use crate::validation::marker::{Severity, ValidationMarker, ValidationOptions};
use crate::validation::session::ValidationSession;
use crate::Config;

/// The main LSP backend that holds state and implements the Language Server Protocol
pub struct Backend {
    pub client: Client,
    pub documents: Arc<Mutex<HashMap<Url, DocumentState>>>,
    pub config: Config,
}

impl Backend {
    pub fn new(client: Client, config: Config) -> Self {
        Self {
            client,
            documents: Arc::new(Mutex::new(HashMap::new())),
            config,
        }
    }

    fn validation_options(&self) -> ValidationOptions {
        ValidationOptions {
            dialect: Some(self.config.dialect),
            ..Default::default()
        }
    }

    /// Build the per-document session. Applied results are pushed back to
    /// the client as published diagnostics; stale results never are.
    fn make_session(&self, uri: Url, language: LanguageId) -> ValidationSession {
        let client = self.client.clone();
        ValidationSession::new(language, self.validation_options(), self.config.debounce)
            .with_result_handler(Arc::new(move |result| {
                let diagnostics: Vec<Diagnostic> =
                    result.markers.iter().map(to_lsp_diagnostic).collect();
                let client = client.clone();
                let uri = uri.clone();
                tokio::spawn(async move {
                    client.publish_diagnostics(uri, diagnostics, None).await;
                });
            }))
    }
}

fn to_lsp_diagnostic(marker: &ValidationMarker) -> Diagnostic {
    let severity = match marker.severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
        Severity::Info => DiagnosticSeverity::INFORMATION,
        Severity::Hint => DiagnosticSeverity::HINT,
    };
    Diagnostic {
        range: Range::new(
            Position::new(
                marker.start_line.saturating_sub(1) as u32,
                marker.start_col.saturating_sub(1) as u32,
            ),
            Position::new(
                marker.end_line.saturating_sub(1) as u32,
                marker.end_col.saturating_sub(1) as u32,
            ),
        ),
        severity: Some(severity),
        code: marker.code.clone().map(NumberOrString::String),
        source: Some(marker.source.clone()),
        message: marker.message.clone(),
        ..Default::default()
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(
        &self,
        _: InitializeParams,
    ) -> tower_lsp::jsonrpc::Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "sqllab-language-server initialized")
            .await;
    }

    async fn shutdown(&self) -> tower_lsp::jsonrpc::Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri.clone();
        let language = LanguageId::from_name(&params.text_document.language_id);
        let session = Arc::new(self.make_session(uri.clone(), language));
        session.on_content_changed(&params.text_document.text).await;

        let mut docs = self.documents.lock().await;
        docs.insert(uri, DocumentState { language, session });
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        if let Some(change) = params.content_changes.into_iter().last() {
            let docs = self.documents.lock().await;
            if let Some(doc) = docs.get(&uri) {
                doc.session.on_content_changed(&change.text).await;
            }
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        let removed = self.documents.lock().await.remove(&uri);
        if let Some(doc) = removed {
            doc.session.cancel().await;
        }
        // Clear any published diagnostics for the closed document.
        self.client.publish_diagnostics(uri, Vec::new(), None).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn markers_convert_to_zero_based_lsp_ranges() {
        let marker = ValidationMarker::error(2, 7, 2, 12, "bad", "sql-grammar").with_code("SQL001");
        let diagnostic = to_lsp_diagnostic(&marker);
        assert_eq!(diagnostic.range.start.line, 1);
        assert_eq!(diagnostic.range.start.character, 6);
        assert_eq!(diagnostic.range.end.character, 11);
        assert_eq!(diagnostic.severity, Some(DiagnosticSeverity::ERROR));
        assert_eq!(diagnostic.source.as_deref(), Some("sql-grammar"));
        assert_eq!(
            diagnostic.code,
            Some(NumberOrString::String("SQL001".to_string()))
        );
    }

    #[test]
    fn every_severity_maps_to_a_distinct_lsp_severity() {
        let cases = [
            (Severity::Error, DiagnosticSeverity::ERROR),
            (Severity::Warning, DiagnosticSeverity::WARNING),
            (Severity::Info, DiagnosticSeverity::INFORMATION),
            (Severity::Hint, DiagnosticSeverity::HINT),
        ];
        for (severity, expected) in cases {
            let marker = ValidationMarker::new(severity, 1, 1, 1, 2, "m", "s");
            assert_eq!(to_lsp_diagnostic(&marker).severity, Some(expected));
        }
    }
}
