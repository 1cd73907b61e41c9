use crate::analysis::{extract_assignments, ParsedSource};
use crate::server::state::ServerState;
use crate::types::AssignmentMetadata;
use std::sync::Arc;
use tower_lsp::lsp_types::Url;

/// Document content plus the style assignments found in it.
///
/// `None` for unknown, unparsed and non-file documents.
pub(crate) async fn document_assignments(
    uri: &Url,
    state: &ServerState,
) -> Option<(Arc<String>, Vec<AssignmentMetadata>)> {
    let source = state.document_manager.source_file(uri)?;
    let resolver = state.stylesheet_resolver().await;

    let assignments = extract_assignments(Some(&source as &dyn ParsedSource), &resolver);
    Some((source.shared_content(), assignments))
}
