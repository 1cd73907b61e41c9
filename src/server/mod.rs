pub mod config;
pub mod error;
pub mod handlers;
pub mod state;
pub mod util;

pub use error::LspError;

use crate::constants::{CONFIG_FILE_NAME, STYLE_EXTENSIONS};
use crate::error_ext::ResultExt;
use crate::server::state::ServerState;
use std::path::{Path, PathBuf};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer};
use tracing::info;

pub struct LspServer {
    pub client: Client,
    pub state: ServerState,
}

impl LspServer {
    pub fn new(client: Client) -> Self {
        Self::new_with_state(client, ServerState::with_defaults())
    }

    pub fn new_with_state(client: Client, state: ServerState) -> Self {
        Self { client, state }
    }

    pub async fn register_watched_files(&self) {
        let mut watchers = vec![FileSystemWatcher {
            glob_pattern: GlobPattern::String(format!("**/{}", CONFIG_FILE_NAME)),
            kind: None,
        }];

        for ext in STYLE_EXTENSIONS {
            watchers.push(FileSystemWatcher {
                glob_pattern: GlobPattern::String(format!("**/*.{}", ext)),
                kind: None,
            });
        }

        let Some(register_options) =
            serde_json::to_value(DidChangeWatchedFilesRegistrationOptions { watchers })
                .ok_logged("watcher registration options")
        else {
            return;
        };

        let registration = Registration {
            id: "css-modules-file-watcher".to_string(),
            method: "workspace/didChangeWatchedFiles".to_string(),
            register_options: Some(register_options),
        };
        if let Err(e) = self.client.register_capability(vec![registration]).await {
            self.client
                .log_message(
                    MessageType::ERROR,
                    format!("Failed to register watcher: {}", e),
                )
                .await;
        }
    }

    async fn publish_diagnostics(&self, uri: Url) {
        let diagnostics = handlers::compute_diagnostics(&uri, &self.state).await;
        self.client.publish_diagnostics(uri, diagnostics, None).await;
    }

    /// Stylesheet exports feed every open source document.
    async fn republish_all(&self) {
        for uri in self.state.document_manager.all_uris() {
            if self.state.document_manager.is_source_document(&uri) {
                self.publish_diagnostics(uri).await;
            }
        }
    }

    async fn reload_config(&self) {
        match self.state.config.reload().await {
            Ok(_) => {
                self.client
                    .log_message(MessageType::INFO, "Reloaded configuration")
                    .await;
            }
            Err(e) => {
                self.client
                    .log_message(MessageType::WARNING, e.to_string())
                    .await;
            }
        }
    }
}

fn is_stylesheet(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| STYLE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
}

#[allow(deprecated)]
fn workspace_root(params: &InitializeParams) -> Option<PathBuf> {
    params
        .workspace_folders
        .as_ref()
        .and_then(|folders| folders.first())
        .and_then(|folder| folder.uri.to_file_path().ok())
        .or_else(|| params.root_uri.as_ref()?.to_file_path().ok())
}

#[tower_lsp::async_trait]
impl LanguageServer for LspServer {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        if let Some(root) = workspace_root(&params) {
            self.state.config.set_workspace_root(root).await;
        }
        self.state
            .config
            .set_init_settings(params.initialization_options)
            .await;

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                position_encoding: Some(PositionEncodingKind::UTF16),
                completion_provider: Some(CompletionOptions {
                    trigger_characters: Some(self.state.languages.completion_trigger_characters()),
                    ..Default::default()
                }),
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: env!("CARGO_PKG_NAME").to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _params: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "css-modules-lsp initialized!")
            .await;

        match self.state.config.reload().await {
            Ok(_) => {
                let root = self.state.config.workspace_root().await;
                info!(root = ?root, "Loaded configuration");
            }
            Err(e) => {
                self.client
                    .log_message(MessageType::WARNING, e.to_string())
                    .await;
            }
        }

        self.register_watched_files().await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let uri = params.text_document.uri;
        self.state.document_manager.open(
            uri.clone(),
            params.text_document.language_id,
            params.text_document.text,
            params.text_document.version,
        );

        if self.state.document_manager.is_source_document(&uri) {
            self.publish_diagnostics(uri).await;
        }
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        self.state.document_manager.change(
            &uri,
            params.content_changes,
            params.text_document.version,
        );

        if self.state.document_manager.is_source_document(&uri) {
            self.publish_diagnostics(uri).await;
        } else if uri.to_file_path().is_ok_and(|path| is_stylesheet(&path)) {
            self.republish_all().await;
        }
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        let uri = params.text_document.uri;
        let was_stylesheet = !self.state.document_manager.is_source_document(&uri)
            && uri.to_file_path().is_ok_and(|path| is_stylesheet(&path));

        self.state.document_manager.close(&uri);
        self.client.publish_diagnostics(uri, Vec::new(), None).await;

        // Unsaved edits are gone; the file on disk applies again.
        if was_stylesheet {
            self.republish_all().await;
        }
    }

    async fn did_change_configuration(&self, params: DidChangeConfigurationParams) {
        self.state
            .config
            .set_init_settings(Some(params.settings))
            .await;
        self.reload_config().await;
        self.republish_all().await;
    }

    async fn did_change_watched_files(&self, params: DidChangeWatchedFilesParams) {
        let mut stylesheets_changed = false;
        let mut config_changed = false;

        for change in params.changes {
            let Ok(path) = change.uri.to_file_path() else {
                continue;
            };

            if self.state.config.is_config_file(&path).await {
                config_changed = true;
            } else if is_stylesheet(&path) {
                stylesheets_changed = true;
            }
        }

        if config_changed {
            self.reload_config().await;
        }
        if config_changed || stylesheets_changed {
            self.republish_all().await;
        }
    }

    async fn completion(&self, params: CompletionParams) -> Result<Option<CompletionResponse>> {
        match handlers::handle_completion(params, &self.state).await {
            Some(items) => Ok(Some(CompletionResponse::Array(items))),
            None => Ok(None),
        }
    }
}
