use crate::analysis::resolver::FileReader;
use crate::analysis::syntax::SourceFile;
use crate::analysis::QueryEngine;
use crate::languages::{LanguageRegistry, LanguageSupport};
use crate::types::DocumentState;
use compact_str::CompactString;
use dashmap::DashMap;
use std::path::Path;
use std::sync::Arc;
use tower_lsp::lsp_types::{TextDocumentContentChangeEvent, Url};

/// Open editor buffers, keyed by URI.
///
/// Every opened document is tracked, including stylesheets; only documents
/// in a registered language get a syntax tree.
pub struct DocumentManager {
    documents: DashMap<Url, DocumentState>,
    query_engine: Arc<QueryEngine>,
    languages: Arc<LanguageRegistry>,
}

impl DocumentManager {
    pub fn new(query_engine: Arc<QueryEngine>, languages: Arc<LanguageRegistry>) -> Self {
        Self {
            documents: DashMap::new(),
            query_engine,
            languages,
        }
    }

    pub fn open(&self, uri: Url, language_id: String, content: String, version: i32) {
        let mut doc = DocumentState::new(
            uri.clone(),
            CompactString::from(&language_id),
            content,
            version,
        );

        if let Some(lang) = self.language_for(&uri, &doc.language_id) {
            doc.tree = self.query_engine.parse(lang.as_ref(), &doc.content);
        }

        self.documents.insert(uri, doc);
    }

    /// Apply full-content changes. Ranged changes are not expected with full sync.
    ///
    /// The new text is parsed before it is stored; content, tree and version
    /// are replaced together so a reader never pairs a buffer with a tree
    /// parsed from different text.
    pub fn change(&self, uri: &Url, changes: Vec<TextDocumentContentChangeEvent>, version: i32) {
        let (mut content, language_id) = {
            let Some(entry) = self.documents.get(uri) else {
                return;
            };
            (entry.content.clone(), entry.language_id.clone())
        };

        for change in changes {
            if change.range.is_none() {
                content = Arc::new(change.text);
            }
        }

        let tree = self
            .language_for(uri, &language_id)
            .and_then(|lang| self.query_engine.parse(lang.as_ref(), &content));

        let Some(mut entry) = self.documents.get_mut(uri) else {
            return;
        };
        // A newer change may have landed while parsing.
        if entry.version > version {
            return;
        }
        entry.content = content;
        entry.tree = tree;
        entry.version = version;
    }

    pub fn close(&self, uri: &Url) {
        self.documents.remove(uri);
    }

    pub fn get(&self, uri: &Url) -> Option<dashmap::mapref::one::Ref<'_, Url, DocumentState>> {
        self.documents.get(uri)
    }

    pub fn all_uris(&self) -> Vec<Url> {
        self.documents.iter().map(|entry| entry.key().clone()).collect()
    }

    /// Returns the number of open documents.
    pub fn document_count(&self) -> usize {
        self.documents.len()
    }

    /// Whether `uri` is an open document in a registered language.
    pub fn is_source_document(&self, uri: &Url) -> bool {
        self.documents
            .get(uri)
            .is_some_and(|doc| self.language_for(uri, &doc.language_id).is_some())
    }

    /// Snapshot of an open, parsed, file-backed document.
    ///
    /// `None` for unknown URIs, non-file schemes and unsupported languages.
    pub fn source_file(&self, uri: &Url) -> Option<SourceFile> {
        let path = uri.to_file_path().ok()?;
        let (content, tree, language_id) = {
            let entry = self.documents.get(uri)?;
            (entry.content.clone(), entry.tree.clone()?, entry.language_id.clone())
        };
        let lang = self.language_for(uri, &language_id)?;

        Some(SourceFile::new(
            path,
            content,
            tree,
            lang,
            Arc::clone(&self.query_engine),
        ))
    }

    fn language_for(&self, uri: &Url, language_id: &str) -> Option<Arc<dyn LanguageSupport>> {
        self.languages
            .get_by_language_id(language_id)
            .or_else(|| self.languages.get_for_uri(uri))
    }
}

/// Unsaved buffers win over the file on disk.
impl FileReader for DocumentManager {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        let open = Url::from_file_path(path)
            .ok()
            .and_then(|uri| self.documents.get(&uri).map(|doc| doc.content.to_string()));

        match open {
            Some(content) => Ok(content),
            None => std::fs::read_to_string(path),
        }
    }
}
