use compact_str::CompactString;
use std::sync::Arc;
use tower_lsp::lsp_types::Url;
use tree_sitter::Tree;

/// A span over a source file, as UTF-8 byte offsets.
///
/// `from` is always `<= to`. Whether the end is inclusive depends on the caller:
/// identifier spans are half-open, binding spans are queried inclusively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextRange {
    pub from: usize,
    pub to: usize,
}

impl TextRange {
    pub fn new(from: usize, to: usize) -> Self {
        debug_assert!(from <= to, "TextRange from must not exceed to");
        Self { from, to }
    }

    pub fn from_node(node: tree_sitter::Node) -> Self {
        Self::new(node.start_byte(), node.end_byte())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.to - self.from
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.from == self.to
    }

    /// Inclusive on both ends.
    #[inline]
    pub fn contains_inclusive(&self, offset: usize) -> bool {
        self.from <= offset && offset <= self.to
    }
}

/// A class name, either requested in code or exported by a stylesheet.
///
/// Matching between identifiers is by exact `name` only; `range` is where a
/// requested identifier was written and is `None` for stylesheet exports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: CompactString,
    pub range: Option<TextRange>,
}

impl Identifier {
    pub fn requested(name: impl Into<CompactString>, range: TextRange) -> Self {
        Self {
            name: name.into(),
            range: Some(range),
        }
    }

    pub fn available(name: impl Into<CompactString>) -> Self {
        Self {
            name: name.into(),
            range: None,
        }
    }
}

/// One destructuring binding sourced from a style module import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentMetadata {
    /// Span of the object pattern, e.g. `{ container, title }`.
    pub binding: TextRange,

    /// The module specifier the binding was resolved from.
    pub specifier: CompactString,

    /// Names written inside the pattern, with their own spans.
    pub requested_identifiers: Vec<Identifier>,

    /// Names exported by the resolved stylesheet, in stylesheet order.
    pub available_identifiers: Vec<Identifier>,
}

impl AssignmentMetadata {
    #[inline]
    pub fn binding_from(&self) -> usize {
        self.binding.from
    }

    #[inline]
    pub fn binding_to(&self) -> usize {
        self.binding.to
    }
}

/// A requested identifier with no counterpart in the stylesheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingIdentifier {
    pub name: CompactString,
    pub range: TextRange,
}

/// An exported class name not yet requested at a destructuring site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletionCandidate {
    pub name: CompactString,
}

/// A default or namespace import, e.g. `import styles from "./a.module.css"`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    /// The local name the module is bound to (`styles`)
    pub local_name: CompactString,

    /// The module specifier with quotes stripped (`./a.module.css`)
    pub specifier: CompactString,

    /// Range of the whole import statement
    pub range: TextRange,
}

/// Where a destructuring pattern takes its value from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestructureSource {
    /// `const { a } = styles`
    Identifier(CompactString),
    /// `const { a } = require("./a.module.css")`
    Require(CompactString),
}

/// An object destructuring pattern found in a variable declarator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DestructurePattern {
    /// Range of the object pattern syntax
    pub range: TextRange,

    pub source: DestructureSource,

    /// Bound keys in the order they were written
    pub elements: Vec<Identifier>,
}

/// An open editor document.
#[derive(Debug, Clone)]
pub struct DocumentState {
    pub uri: Url,
    pub language_id: CompactString,
    pub content: Arc<String>,
    pub version: i32,
    pub tree: Option<Tree>,
}

impl DocumentState {
    pub fn new(uri: Url, language_id: CompactString, content: String, version: i32) -> Self {
        Self {
            uri,
            language_id,
            content: Arc::new(content),
            version,
            tree: None,
        }
    }
}
