use crate::analysis::completion_candidates;
use crate::server::error::LspError;
use crate::server::handlers::util::document_assignments;
use crate::server::state::ServerState;
use crate::server::util::position_to_offset;
use crate::types::CompletionCandidate;
use std::time::Instant;
use tower_lsp::lsp_types::{CompletionItem, CompletionItemKind, CompletionParams};

pub async fn handle_completion(
    params: CompletionParams,
    state: &ServerState,
) -> Option<Vec<CompletionItem>> {
    let uri = &params.text_document_position.text_document.uri;
    let position = params.text_document_position.position;
    tracing::debug!(
        "[HANDLE_COMPLETION_ENTER] uri={} pos={}:{}",
        uri,
        position.line,
        position.character
    );
    let start = Instant::now();

    let enabled = {
        let config = state.config.get_config();
        let config = config.read().await;
        config.features.completion
    };
    if !enabled {
        LspError::feature_disabled("completion").log_debug();
        tracing::debug!(
            "[HANDLE_COMPLETION_EXIT] disabled elapsed_ms={}",
            start.elapsed().as_millis()
        );
        return None;
    }

    let Some((content, assignments)) = document_assignments(uri, state).await else {
        LspError::document_not_found(uri).log_debug();
        tracing::debug!(
            "[HANDLE_COMPLETION_EXIT] no source elapsed_ms={}",
            start.elapsed().as_millis()
        );
        return None;
    };

    let Some(offset) = position_to_offset(&content, position) else {
        LspError::invalid_position(uri, position).log_debug();
        tracing::debug!(
            "[HANDLE_COMPLETION_EXIT] position out of range elapsed_ms={}",
            start.elapsed().as_millis()
        );
        return None;
    };

    let candidates = completion_candidates(&assignments, offset);
    let items = merge_completion_items(Vec::new(), &candidates);

    tracing::debug!(
        "[HANDLE_COMPLETION_EXIT] count={} elapsed_ms={}",
        items.len(),
        start.elapsed().as_millis()
    );

    if items.is_empty() {
        None
    } else {
        Some(items)
    }
}

/// `base` followed by one preselected field entry per candidate.
///
/// Existing entries are neither removed nor reordered.
pub fn merge_completion_items(
    base: Vec<CompletionItem>,
    candidates: &[CompletionCandidate],
) -> Vec<CompletionItem> {
    let mut items = base;
    items.reserve(candidates.len());
    items.extend(candidates.iter().map(candidate_to_item));
    items
}

fn candidate_to_item(candidate: &CompletionCandidate) -> CompletionItem {
    let name = candidate.name.to_string();
    CompletionItem {
        label: name.clone(),
        kind: Some(CompletionItemKind::FIELD),
        sort_text: Some(name.clone()),
        insert_text: Some(name),
        preselect: Some(true),
        ..Default::default()
    }
}
