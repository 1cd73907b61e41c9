//! Extraction of `AssignmentMetadata` from a parsed source file.

use crate::analysis::resolver::StylesheetResolver;
use crate::analysis::syntax::ParsedSource;
use crate::types::{AssignmentMetadata, DestructureSource, Identifier};
use compact_str::CompactString;
use rustc_hash::FxHashMap;

/// One record per destructuring binding sourced from a style module, in source order.
///
/// `None` stands for a file that could not be found or parsed and yields nothing.
/// Each stylesheet is resolved at most once per call.
pub fn extract_assignments(
    source: Option<&dyn ParsedSource>,
    resolver: &dyn StylesheetResolver,
) -> Vec<AssignmentMetadata> {
    let Some(source) = source else {
        return Vec::new();
    };

    // A later import of the same local name shadows an earlier one.
    let style_imports: FxHashMap<CompactString, CompactString> = source
        .imports()
        .into_iter()
        .filter(|import| resolver.is_style_module(&import.specifier))
        .map(|import| (import.local_name, import.specifier))
        .collect();

    let mut resolved: FxHashMap<CompactString, Vec<Identifier>> = FxHashMap::default();
    let mut assignments = Vec::new();

    for pattern in source.destructures() {
        let specifier = match pattern.source {
            DestructureSource::Identifier(name) => match style_imports.get(&name) {
                Some(specifier) => specifier.clone(),
                None => continue,
            },
            DestructureSource::Require(specifier) => {
                if !resolver.is_style_module(&specifier) {
                    continue;
                }
                specifier
            }
        };

        let available = resolved
            .entry(specifier.clone())
            .or_insert_with(|| resolver.exported_identifiers(&specifier, source.file_path()))
            .clone();

        assignments.push(AssignmentMetadata {
            binding: pattern.range,
            specifier,
            requested_identifiers: pattern.elements,
            available_identifiers: available,
        });
    }

    tracing::debug!(
        path = %source.file_path().display(),
        count = assignments.len(),
        "Extracted style assignments"
    );

    assignments
}
