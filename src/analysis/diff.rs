//! Name-set comparisons between requested and available identifiers.
//!
//! A name counts as present when at least one identifier on the other side
//! carries it. Neither side is deduplicated and order is always preserved.

use crate::types::{AssignmentMetadata, CompletionCandidate, Identifier, MissingIdentifier};
use rustc_hash::FxHashSet;

fn name_set(identifiers: &[Identifier]) -> FxHashSet<&str> {
    identifiers.iter().map(|id| id.name.as_str()).collect()
}

/// Requested identifiers the stylesheet does not export, placed on their own spans.
///
/// Identifiers without a recorded span have nowhere to be reported and are skipped.
pub fn missing_identifiers(metadata: &AssignmentMetadata) -> Vec<MissingIdentifier> {
    let available = name_set(&metadata.available_identifiers);

    metadata
        .requested_identifiers
        .iter()
        .filter(|id| !available.contains(id.name.as_str()))
        .filter_map(|id| {
            Some(MissingIdentifier {
                name: id.name.clone(),
                range: id.range?,
            })
        })
        .collect()
}

/// Exported identifiers not yet requested, if `position` lies within the binding.
///
/// Both ends of the binding span count as inside.
pub fn unused_identifiers(metadata: &AssignmentMetadata, position: usize) -> Vec<CompletionCandidate> {
    if !metadata.binding.contains_inclusive(position) {
        return Vec::new();
    }

    let requested = name_set(&metadata.requested_identifiers);

    metadata
        .available_identifiers
        .iter()
        .filter(|id| !requested.contains(id.name.as_str()))
        .map(|id| CompletionCandidate {
            name: id.name.clone(),
        })
        .collect()
}

/// Candidates from every binding containing `position`, in binding order.
pub fn completion_candidates(
    assignments: &[AssignmentMetadata],
    position: usize,
) -> Vec<CompletionCandidate> {
    assignments
        .iter()
        .flat_map(|metadata| unused_identifiers(metadata, position))
        .collect()
}

/// Missing identifiers across all bindings, in binding order.
pub fn all_missing_identifiers(assignments: &[AssignmentMetadata]) -> Vec<MissingIdentifier> {
    assignments.iter().flat_map(missing_identifiers).collect()
}
