use crate::languages::LanguageSupport;
use crate::types::{DestructurePattern, DestructureSource, ImportBinding, TextRange};
use compact_str::CompactString;
use parking_lot::Mutex;
use std::collections::HashMap;
use streaming_iterator::StreamingIterator;
use tree_sitter::{Parser, Query, QueryCursor, QueryMatch, Tree};

/// Pool of parsers to reuse allocations
#[derive(Default)]
pub struct ParserPool {
    parsers: HashMap<&'static str, Vec<Parser>>,
}

impl ParserPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn acquire(&mut self, language: &dyn LanguageSupport) -> Option<Parser> {
        if let Some(parser) = self
            .parsers
            .get_mut(language.id())
            .and_then(|parsers| parsers.pop())
        {
            return Some(parser);
        }

        let mut parser = Parser::new();
        if let Err(e) = parser.set_language(&language.grammar()) {
            tracing::error!(language = language.id(), error = %e, "Failed to set parser language");
            return None;
        }
        Some(parser)
    }

    pub fn release(&mut self, language_id: &'static str, mut parser: Parser) {
        parser.reset();
        self.parsers.entry(language_id).or_default().push(parser);
    }
}

/// Executes tree-sitter queries and extracts structured data
#[derive(Default)]
pub struct QueryEngine {
    parser_pool: Mutex<ParserPool>,

    /// Query cursor pool to reduce allocations
    cursor_pool: Mutex<Vec<QueryCursor>>,
}

impl QueryEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn parse(&self, language: &dyn LanguageSupport, content: &str) -> Option<Tree> {
        let mut parser = self.parser_pool.lock().acquire(language)?;
        let tree = parser.parse(content, None);
        self.parser_pool.lock().release(language.id(), parser);
        tree
    }

    pub fn execute_query<'a, F, T>(
        &self,
        query: &Query,
        tree: &'a Tree,
        source: &'a [u8],
        mut extractor: F,
    ) -> Vec<T>
    where
        F: FnMut(&QueryMatch<'_, 'a>, &[u8]) -> Option<T>,
    {
        let mut cursor = self.cursor_pool.lock().pop().unwrap_or_else(QueryCursor::new);

        let mut results = Vec::new();
        {
            let mut matches = cursor.matches(query, tree.root_node(), source);
            while let Some(m) = matches.next() {
                if let Some(item) = extractor(m, source) {
                    results.push(item);
                }
            }
        }

        self.cursor_pool.lock().push(cursor);
        results
    }

    /// Default and namespace imports, in source order.
    pub fn extract_imports(
        &self,
        language: &dyn LanguageSupport,
        tree: &Tree,
        source: &[u8],
    ) -> Vec<ImportBinding> {
        let query = language.import_query();

        let idx_import_stmt = query.capture_index_for_name("import_stmt");
        let idx_local_name = query.capture_index_for_name("local_name");
        let idx_import_path = query.capture_index_for_name("import_path");

        let mut imports = self.execute_query(query, tree, source, |m, src| {
            let mut local_name = None;
            let mut specifier = None;
            let mut range = None;

            for capture in m.captures {
                let idx = Some(capture.index);
                if idx == idx_local_name {
                    local_name = capture.node.utf8_text(src).ok().map(CompactString::from);
                } else if idx == idx_import_path {
                    specifier = capture
                        .node
                        .utf8_text(src)
                        .ok()
                        .map(|s| CompactString::from(language.strip_quotes(s)));
                } else if idx == idx_import_stmt {
                    range = Some(TextRange::from_node(capture.node));
                }
            }

            Some(ImportBinding {
                local_name: local_name?,
                specifier: specifier.filter(|s| !s.is_empty())?,
                range: range?,
            })
        });

        imports.sort_by_key(|import| import.range.from);
        imports
    }

    /// Object patterns assigned from an identifier or a `require()` call, in source order.
    pub fn extract_destructures(
        &self,
        language: &dyn LanguageSupport,
        tree: &Tree,
        source: &[u8],
    ) -> Vec<DestructurePattern> {
        let query = language.destructure_query();

        let idx_pattern = query.capture_index_for_name("pattern");
        let idx_source_name = query.capture_index_for_name("source_name");
        let idx_require_fn = query.capture_index_for_name("require_fn");
        let idx_require_path = query.capture_index_for_name("require_path");

        let mut patterns = self.execute_query(query, tree, source, |m, src| {
            let mut pattern = None;
            let mut source_name = None;
            let mut require_fn = None;
            let mut require_path = None;

            for capture in m.captures {
                let idx = Some(capture.index);
                if idx == idx_pattern {
                    pattern = Some(capture.node);
                } else if idx == idx_source_name {
                    source_name = capture.node.utf8_text(src).ok();
                } else if idx == idx_require_fn {
                    require_fn = capture.node.utf8_text(src).ok();
                } else if idx == idx_require_path {
                    require_path = capture.node.utf8_text(src).ok();
                }
            }

            let pattern = pattern?;
            let origin = match (source_name, require_fn, require_path) {
                (Some(name), _, _) => DestructureSource::Identifier(name.into()),
                (None, Some("require"), Some(path)) => {
                    let path = language.strip_quotes(path);
                    if path.is_empty() {
                        return None;
                    }
                    DestructureSource::Require(path.into())
                }
                _ => return None,
            };

            Some(DestructurePattern {
                range: TextRange::from_node(pattern),
                source: origin,
                elements: language.extract_pattern_elements(pattern, src),
            })
        });

        patterns.sort_by_key(|pattern| pattern.range.from);
        patterns
    }
}
