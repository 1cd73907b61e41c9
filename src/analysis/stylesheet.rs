//! Class name extraction for CSS, SCSS and Less modules.
//!
//! Selector preludes are told apart from declarations and at-rule preludes
//! by the `{`, `}` and `;` around them; `.class` tokens are then matched in
//! each selector. Invalid stylesheets still produce whatever classes are readable.

use crate::error_ext::ResultExt;
use compact_str::CompactString;
use regex::{Captures, Regex};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// How exported class names are derived from the names written in the stylesheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClassNameTransform {
    /// Export names exactly as written.
    #[default]
    AsIs,
    /// Export the original and a camelCased form (`card-title` → `cardTitle`).
    CamelCase,
    /// Export only the camelCased form.
    CamelCaseOnly,
    /// Like `CamelCase`, but only dashes are collapsed.
    Dashes,
    /// Like `CamelCaseOnly`, but only dashes are collapsed.
    DashesOnly,
}

impl ClassNameTransform {
    pub fn apply(self, names: Vec<CompactString>) -> Vec<CompactString> {
        let convert: fn(&str) -> CompactString = match self {
            Self::AsIs => return names,
            Self::CamelCase | Self::CamelCaseOnly => |name| camelize(name, &['-', '_']),
            Self::Dashes | Self::DashesOnly => |name| camelize(name, &['-']),
        };
        let keep_original = matches!(self, Self::CamelCase | Self::Dashes);

        let mut seen = FxHashSet::default();
        let mut out = Vec::with_capacity(names.len());
        for name in names {
            let converted = convert(&name);
            if keep_original && seen.insert(name.clone()) {
                out.push(name);
            }
            if seen.insert(converted.clone()) {
                out.push(converted);
            }
        }
        out
    }
}

fn camelize(name: &str, separators: &[char]) -> CompactString {
    let mut out = CompactString::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if separators.contains(&c) {
            upper_next = !out.is_empty();
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Stand-in for `#{...}` interpolation; never part of an identifier.
const INTERPOLATION: &str = "\u{1}";

fn regex(pattern: &str) -> Option<Regex> {
    Regex::new(pattern).ok_logged("compile stylesheet regex")
}

/// Comments, strings, `url(...)` and `#{...}` interpolation, in one alternation
/// so that whichever starts first wins (`url(http://x)` is not a comment).
fn regex_lexical() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        regex(
            r#"(?s)(?P<comment>/\*.*?\*/|//[^\n]*)|(?P<string>"(?:\\.|[^"\\\n])*"?|'(?:\\.|[^'\\\n])*'?)|(?P<url>(?i:url)\([^)]*\))|(?P<interp>#\{[^}]*\})"#,
        )
    })
    .as_ref()
}

/// Tokens of a selector list that decide which classes are exported.
fn regex_selector() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| {
        regex(
            r"(?i)(?P<global_fn>:global\([^)]*\))|(?P<global>:global\b)|(?P<local>:local\b)|(?P<attr>\[[^\]]*\])|(?P<comma>,)|\.(?P<class>(?:--|-?(?:[_a-z]|[^\x00-\x7F]|\\[^\n]))(?:[-_a-z0-9]|[^\x00-\x7F]|\\[^\n])*)",
        )
    })
    .as_ref()
}

/// Stylesheet text with comments removed and strings, urls and
/// interpolations reduced to placeholders that contain no selector syntax.
fn strip_lexical(css: &str, re: &Regex) -> String {
    re.replace_all(css, |caps: &Captures| {
        if caps.name("comment").is_some() {
            " "
        } else if caps.name("string").is_some() {
            "\"\""
        } else if caps.name("url").is_some() {
            "url()"
        } else {
            INTERPOLATION
        }
    })
    .into_owned()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    /// `@keyframes` body: its preludes are percentages, not selectors.
    Keyframes,
    Other,
}

/// Class names defined by a stylesheet, in first-occurrence order, without duplicates.
pub fn extract_class_names(css: &str) -> Vec<CompactString> {
    let (Some(lexical), Some(selector_re)) = (regex_lexical(), regex_selector()) else {
        return Vec::new();
    };
    let cleaned = strip_lexical(css, lexical);

    let mut seen = FxHashSet::default();
    let mut names = Vec::new();
    let mut blocks: Vec<Block> = Vec::new();
    let mut prelude_start = 0;

    for (at, delim) in cleaned.match_indices(&['{', '}', ';'][..]) {
        let prelude = cleaned[prelude_start..at].trim();
        prelude_start = at + delim.len();

        if delim != "{" {
            if delim == "}" {
                blocks.pop();
            }
            continue;
        }

        let in_keyframes = blocks.last() == Some(&Block::Keyframes);
        let selector = match prelude.strip_prefix('@') {
            Some(at_rule) => {
                let (name, rest) = at_rule
                    .split_once(char::is_whitespace)
                    .unwrap_or((at_rule, ""));
                let name = name.to_ascii_lowercase();
                if name.ends_with("keyframes") {
                    blocks.push(Block::Keyframes);
                    continue;
                }
                blocks.push(Block::Other);
                if name != "at-root" {
                    continue;
                }
                rest
            }
            None => {
                blocks.push(Block::Other);
                prelude
            }
        };

        if in_keyframes {
            continue;
        }
        for name in selector_class_names(selector, selector_re) {
            if seen.insert(name.clone()) {
                names.push(name);
            }
        }
    }

    names
}

/// Class names in one selector list, skipping anything under `:global`.
///
/// Names glued to an interpolation are skipped, since their real value is unknown.
fn selector_class_names(selector: &str, re: &Regex) -> Vec<CompactString> {
    let mut names = Vec::new();
    let mut global = false;

    for caps in re.captures_iter(selector) {
        if caps.name("global").is_some() {
            global = true;
        } else if caps.name("local").is_some() || caps.name("comma").is_some() {
            global = false;
        } else if let Some(class) = caps.name("class") {
            let glued = selector[class.end()..].starts_with(INTERPOLATION);
            if !global && !glued {
                names.push(unescape(class.as_str()));
            }
        }
    }

    names
}

fn unescape(raw: &str) -> CompactString {
    let mut out = CompactString::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.extend(chars.next()),
            c => out.push(c),
        }
    }
    out
}
