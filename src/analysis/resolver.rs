//! Resolution of a style import to the class names its stylesheet exports.

use crate::analysis::module_resolver::resolve_specifier;
use crate::analysis::stylesheet::{extract_class_names, ClassNameTransform};
use crate::error_ext::ResultExt;
use crate::types::Identifier;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StyleError {
    #[error("Not a style module: {specifier}")]
    NotStyleModule { specifier: String },

    #[error("Cannot resolve non-relative specifier: {specifier}")]
    Unresolvable { specifier: String },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Where stylesheet content comes from.
pub trait FileReader {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String>;
}

/// Reads straight from disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskReader;

impl FileReader for DiskReader {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        std::fs::read_to_string(path)
    }
}

impl<R: FileReader + ?Sized> FileReader for Arc<R> {
    fn read_to_string(&self, path: &Path) -> std::io::Result<String> {
        (**self).read_to_string(path)
    }
}

/// Answers "which classes does this style import export?".
///
/// Implementations never fail: anything that cannot be resolved exports nothing.
pub trait StylesheetResolver {
    /// Whether `specifier` names a style module at all.
    fn is_style_module(&self, specifier: &str) -> bool;

    /// Exported class names in stylesheet order, or empty on any failure.
    fn exported_identifiers(&self, specifier: &str, containing_file: &Path) -> Vec<Identifier>;
}

/// Resolves relative style imports and scans the file for class names.
pub struct FsStylesheetResolver<R> {
    reader: R,
    patterns: Vec<glob::Pattern>,
    transform: ClassNameTransform,
}

impl<R: FileReader> FsStylesheetResolver<R> {
    /// Invalid glob patterns are logged and skipped.
    pub fn new(reader: R, patterns: &[String], transform: ClassNameTransform) -> Self {
        let patterns = patterns
            .iter()
            .filter_map(|pattern| glob::Pattern::new(pattern).ok_warn("style module pattern"))
            .collect();

        Self {
            reader,
            patterns,
            transform,
        }
    }

    pub fn try_exported_identifiers(
        &self,
        specifier: &str,
        containing_file: &Path,
    ) -> Result<Vec<Identifier>, StyleError> {
        if !self.is_style_module(specifier) {
            return Err(StyleError::NotStyleModule {
                specifier: specifier.to_string(),
            });
        }

        let path = resolve_specifier(specifier, containing_file).ok_or_else(|| {
            StyleError::Unresolvable {
                specifier: specifier.to_string(),
            }
        })?;

        let content = self
            .reader
            .read_to_string(&path)
            .map_err(|source| StyleError::Read {
                path: path.clone(),
                source,
            })?;

        let names = self.transform.apply(extract_class_names(&content));
        tracing::debug!(path = %path.display(), classes = names.len(), "Resolved stylesheet");

        Ok(names.into_iter().map(Identifier::available).collect())
    }
}

impl<R: FileReader> StylesheetResolver for FsStylesheetResolver<R> {
    fn is_style_module(&self, specifier: &str) -> bool {
        let path = specifier.split(['?', '#']).next().unwrap_or(specifier);
        let file_name = path.rsplit('/').next().unwrap_or(path);
        self.patterns.iter().any(|pattern| pattern.matches(file_name))
    }

    fn exported_identifiers(&self, specifier: &str, containing_file: &Path) -> Vec<Identifier> {
        self.try_exported_identifiers(specifier, containing_file)
            .or_default_warn("stylesheet resolution")
    }
}
