use crate::languages::javascript::object_pattern_elements;
use crate::languages::{compile_query, LanguageSupport};
use crate::types::Identifier;
use std::sync::OnceLock;
use tree_sitter::{Language, Node, Query};

pub struct TypeScript;
pub struct TypeScriptReact;

static TS_IMPORT_QUERY: OnceLock<Query> = OnceLock::new();
static TS_DESTRUCTURE_QUERY: OnceLock<Query> = OnceLock::new();
static TSX_IMPORT_QUERY: OnceLock<Query> = OnceLock::new();
static TSX_DESTRUCTURE_QUERY: OnceLock<Query> = OnceLock::new();

/// TypeScript and TypeScriptReact differ only in id, extensions, grammar and
/// the statics their queries are cached in.
macro_rules! impl_typescript_language {
    (
        $struct_name:ty,
        id: $id:literal,
        language_ids: $lang_ids:expr,
        extensions: $extensions:expr,
        grammar: $grammar:expr,
        queries: {
            import: $import_query:ident,
            destructure: $destruct_query:ident
        }
    ) => {
        impl LanguageSupport for $struct_name {
            fn id(&self) -> &'static str {
                $id
            }

            fn extensions(&self) -> &'static [&'static str] {
                $extensions
            }

            fn language_ids(&self) -> &'static [&'static str] {
                $lang_ids
            }

            fn grammar(&self) -> Language {
                $grammar.into()
            }

            fn import_query(&self) -> &Query {
                $import_query.get_or_init(|| {
                    compile_query(
                        &self.grammar(),
                        include_str!("../../queries/typescript/imports.scm"),
                        $id,
                        "imports",
                    )
                })
            }

            fn destructure_query(&self) -> &Query {
                $destruct_query.get_or_init(|| {
                    compile_query(
                        &self.grammar(),
                        include_str!("../../queries/typescript/destructures.scm"),
                        $id,
                        "destructures",
                    )
                })
            }

            fn strip_quotes<'a>(&self, text: &'a str) -> &'a str {
                text.trim_matches(|c| c == '"' || c == '\'' || c == '`')
            }

            fn extract_pattern_elements(&self, pattern: Node, source: &[u8]) -> Vec<Identifier> {
                object_pattern_elements(pattern, source)
            }

            fn completion_trigger_characters(&self) -> &'static [&'static str] {
                &["{", ","]
            }
        }
    };
}

impl_typescript_language!(
    TypeScript,
    id: "typescript",
    language_ids: &["typescript"],
    extensions: &["ts", "mts", "cts"],
    grammar: tree_sitter_typescript::LANGUAGE_TYPESCRIPT,
    queries: {
        import: TS_IMPORT_QUERY,
        destructure: TS_DESTRUCTURE_QUERY
    }
);

impl_typescript_language!(
    TypeScriptReact,
    id: "typescriptreact",
    language_ids: &["typescriptreact"],
    extensions: &["tsx"],
    grammar: tree_sitter_typescript::LANGUAGE_TSX,
    queries: {
        import: TSX_IMPORT_QUERY,
        destructure: TSX_DESTRUCTURE_QUERY
    }
);
