//! Server state shared by the handlers.

use crate::analysis::{DocumentManager, FsStylesheetResolver, QueryEngine};
use crate::languages::LanguageRegistry;
use crate::server::config::ConfigManager;
use std::sync::Arc;

#[derive(Clone)]
pub struct ServerState {
    /// Open editor buffers; also the file reader for stylesheets.
    pub document_manager: Arc<DocumentManager>,
    /// Language registry for all supported languages.
    pub languages: Arc<LanguageRegistry>,
    pub config: Arc<ConfigManager>,
}

impl ServerState {
    pub fn new(
        document_manager: Arc<DocumentManager>,
        languages: Arc<LanguageRegistry>,
        config: Arc<ConfigManager>,
    ) -> Self {
        Self {
            document_manager,
            languages,
            config,
        }
    }

    /// State with the default languages and configuration.
    pub fn with_defaults() -> Self {
        let languages = Arc::new(LanguageRegistry::with_defaults());
        let document_manager = Arc::new(DocumentManager::new(
            Arc::new(QueryEngine::new()),
            Arc::clone(&languages),
        ));

        Self::new(document_manager, languages, Arc::new(ConfigManager::new()))
    }

    /// A resolver for the current style settings that reads through open buffers.
    pub async fn stylesheet_resolver(&self) -> FsStylesheetResolver<Arc<DocumentManager>> {
        let styles = self.config.snapshot().await.styles;
        FsStylesheetResolver::new(
            Arc::clone(&self.document_manager),
            &styles.patterns,
            styles.class_name_transform,
        )
    }
}
