use crate::languages::{compile_query, identifier_from_node, LanguageSupport};
use crate::types::{Identifier, TextRange};
use compact_str::CompactString;
use std::sync::OnceLock;
use tree_sitter::{Language, Node, Query};

pub struct JavaScript;

static IMPORT_QUERY: OnceLock<Query> = OnceLock::new();
static DESTRUCTURE_QUERY: OnceLock<Query> = OnceLock::new();

impl LanguageSupport for JavaScript {
    fn id(&self) -> &'static str {
        "javascript"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["js", "jsx", "mjs", "cjs"]
    }

    fn language_ids(&self) -> &'static [&'static str] {
        &["javascript", "javascriptreact"]
    }

    fn grammar(&self) -> Language {
        tree_sitter_javascript::LANGUAGE.into()
    }

    fn import_query(&self) -> &Query {
        IMPORT_QUERY.get_or_init(|| {
            compile_query(
                &self.grammar(),
                include_str!("../../queries/javascript/imports.scm"),
                self.id(),
                "imports",
            )
        })
    }

    fn destructure_query(&self) -> &Query {
        DESTRUCTURE_QUERY.get_or_init(|| {
            compile_query(
                &self.grammar(),
                include_str!("../../queries/javascript/destructures.scm"),
                self.id(),
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

/// Shared by every ECMAScript grammar: the pattern node kinds are identical.
///
/// `{ a }`, `{ a = x }` and `{ a: b }` request `a`; `{ "a-b": c }` requests
/// `a-b`. Rest elements and computed keys request nothing.
pub(crate) fn object_pattern_elements(pattern: Node, source: &[u8]) -> Vec<Identifier> {
    let mut cursor = pattern.walk();
    pattern
        .named_children(&mut cursor)
        .filter_map(|child| match child.kind() {
            "shorthand_property_identifier_pattern" => identifier_from_node(child, source),
            "object_assignment_pattern" => child
                .child_by_field_name("left")
                .filter(|left| left.kind() == "shorthand_property_identifier_pattern")
                .and_then(|left| identifier_from_node(left, source)),
            "pair_pattern" => child
                .child_by_field_name("key")
                .and_then(|key| property_key(key, source)),
            _ => None,
        })
        .collect()
}

fn property_key(key: Node, source: &[u8]) -> Option<Identifier> {
    match key.kind() {
        "property_identifier" => identifier_from_node(key, source),
        "string" => {
            // The span excludes the quotes so a diagnostic underlines the name.
            let (from, to) = (key.start_byte() + 1, key.end_byte().checked_sub(1)?);
            if from >= to {
                return None;
            }
            let name = std::str::from_utf8(source.get(from..to)?).ok()?;
            Some(Identifier::requested(
                CompactString::from(name),
                TextRange::new(from, to),
            ))
        }
        _ => None,
    }
}
