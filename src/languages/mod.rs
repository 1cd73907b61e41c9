use crate::types::{Identifier, TextRange};
use compact_str::CompactString;
use tracing::error;
use tree_sitter::{Language, Node, Query};

pub mod javascript;
pub mod registry;
pub mod typescript;

pub use registry::LanguageRegistry;

/// Per-language knowledge needed to find style module destructures.
///
/// The analysis only ever asks two questions of a syntax tree: which imports
/// bind a module to a local name, and which object patterns destructure a
/// value. The queries answer the first half of each; the `extract_*` methods
/// turn captured nodes into plain data.
pub trait LanguageSupport: Send + Sync {
    fn id(&self) -> &'static str;

    fn extensions(&self) -> &'static [&'static str];

    fn language_ids(&self) -> &'static [&'static str];

    fn grammar(&self) -> Language;

    /// Captures: `@import_stmt`, `@local_name`, `@import_path`.
    fn import_query(&self) -> &Query;

    /// Captures: `@pattern`, and either `@source_name` or
    /// `@require_fn` + `@require_path`.
    fn destructure_query(&self) -> &Query;

    fn strip_quotes<'a>(&self, text: &'a str) -> &'a str {
        text.trim_matches(|c| c == '"' || c == '\'')
    }

    /// Enumerate the keys bound by an object pattern, each with its own span.
    fn extract_pattern_elements(&self, pattern: Node, source: &[u8]) -> Vec<Identifier>;

    fn completion_trigger_characters(&self) -> &'static [&'static str] {
        &[]
    }
}

/// Compiles a tree-sitter query, logging and falling back to an empty query on failure.
pub(crate) fn compile_query(grammar: &Language, source: &str, lang_id: &str, query_name: &str) -> Query {
    match Query::new(grammar, source) {
        Ok(query) => query,
        Err(e) => {
            error!(
                language = lang_id,
                query = query_name,
                error = %e,
                "Failed to compile query, using empty fallback"
            );
            Query::new(grammar, "").unwrap_or_else(|_| {
                panic!(
                    "Failed to create empty fallback query for {} {}",
                    lang_id, query_name
                )
            })
        }
    }
}

/// Builds a requested identifier from a node whose whole text is the name.
pub(crate) fn identifier_from_node(node: Node, source: &[u8]) -> Option<Identifier> {
    let text = node.utf8_text(source).ok()?;
    if text.is_empty() {
        return None;
    }
    Some(Identifier::requested(
        CompactString::from(text),
        TextRange::from_node(node),
    ))
}
