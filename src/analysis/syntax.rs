//! The view of a parsed source file that assignment extraction works against.
//!
//! Extraction never touches tree-sitter directly; it only needs imports and
//! destructuring patterns as plain data. `SourceFile` is the tree-sitter
//! backed implementation used by the server.

use crate::analysis::QueryEngine;
use crate::languages::LanguageSupport;
use crate::types::{DestructurePattern, ImportBinding};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tree_sitter::Tree;

pub trait ParsedSource {
    /// Absolute path of the file, used to resolve relative specifiers.
    fn file_path(&self) -> &Path;

    /// Default and namespace imports, in source order.
    fn imports(&self) -> Vec<ImportBinding>;

    /// Object destructuring patterns with an identifier or `require()` initializer,
    /// in source order.
    fn destructures(&self) -> Vec<DestructurePattern>;
}

/// A snapshot of an open document: content plus the tree parsed from it.
#[derive(Clone)]
pub struct SourceFile {
    path: PathBuf,
    content: Arc<String>,
    tree: Tree,
    language: Arc<dyn LanguageSupport>,
    engine: Arc<QueryEngine>,
}

impl SourceFile {
    pub fn new(
        path: PathBuf,
        content: Arc<String>,
        tree: Tree,
        language: Arc<dyn LanguageSupport>,
        engine: Arc<QueryEngine>,
    ) -> Self {
        Self {
            path,
            content,
            tree,
            language,
            engine,
        }
    }

    /// Parse `content` from scratch. Returns `None` if the parser cannot be set up.
    pub fn parse(
        path: PathBuf,
        content: impl Into<Arc<String>>,
        language: Arc<dyn LanguageSupport>,
        engine: Arc<QueryEngine>,
    ) -> Option<Self> {
        let content = content.into();
        let tree = engine.parse(language.as_ref(), &content)?;
        Some(Self::new(path, content, tree, language, engine))
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn shared_content(&self) -> Arc<String> {
        Arc::clone(&self.content)
    }

    pub fn language_id(&self) -> &'static str {
        self.language.id()
    }
}

impl ParsedSource for SourceFile {
    fn file_path(&self) -> &Path {
        &self.path
    }

    fn imports(&self) -> Vec<ImportBinding> {
        self.engine
            .extract_imports(self.language.as_ref(), &self.tree, self.content.as_bytes())
    }

    fn destructures(&self) -> Vec<DestructurePattern> {
        self.engine
            .extract_destructures(self.language.as_ref(), &self.tree, self.content.as_bytes())
    }
}

impl std::fmt::Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("language", &self.language.id())
            .field("len", &self.content.len())
            .finish()
    }
}
