use crate::analysis::all_missing_identifiers;
use crate::constants::{DIAGNOSTIC_SOURCE, MISSING_IDENTIFIER_CODE};
use crate::server::error::LspError;
use crate::server::handlers::util::document_assignments;
use crate::server::state::ServerState;
use crate::server::util::text_range_to_range;
use crate::types::MissingIdentifier;
use std::time::Instant;
use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, NumberOrString, Url};

pub async fn compute_diagnostics(uri: &Url, state: &ServerState) -> Vec<Diagnostic> {
    tracing::debug!("[COMPUTE_DIAGNOSTICS_ENTER] uri={}", uri);
    let start = Instant::now();

    {
        let config = state.config.get_config();
        let config = config.read().await;
        if !config.features.diagnostics {
            tracing::debug!(
                "[COMPUTE_DIAGNOSTICS_EXIT] disabled elapsed_ms={}",
                start.elapsed().as_millis()
            );
            return vec![];
        }
    }

    let Some((content, assignments)) = document_assignments(uri, state).await else {
        LspError::document_not_found(uri).log_debug();
        return vec![];
    };

    let missing = all_missing_identifiers(&assignments);
    let diagnostics = merge_diagnostics(Vec::new(), &missing, &content);

    tracing::debug!(
        "[COMPUTE_DIAGNOSTICS_EXIT] count={} elapsed_ms={}",
        diagnostics.len(),
        start.elapsed().as_millis()
    );
    diagnostics
}

/// `base` followed by one error per missing identifier, spanning the identifier.
pub fn merge_diagnostics(
    base: Vec<Diagnostic>,
    missing: &[MissingIdentifier],
    content: &str,
) -> Vec<Diagnostic> {
    let mut diagnostics = base;
    diagnostics.reserve(missing.len());
    diagnostics.extend(missing.iter().map(|m| Diagnostic {
        range: text_range_to_range(content, m.range),
        severity: Some(DiagnosticSeverity::ERROR),
        code: Some(NumberOrString::Number(MISSING_IDENTIFIER_CODE)),
        source: Some(DIAGNOSTIC_SOURCE.to_string()),
        message: format!("Identifier \"{}\" is missing in corresponding CSS.", m.name),
        ..Default::default()
    }));
    diagnostics
}
