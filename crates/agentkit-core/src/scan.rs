use crate::paths;
use crate::types::Phase;
use std::path::Path;

/// Whether the signal document for `phase` exists under `root`. Always
/// false for the terminal phase.
pub fn document_exists(root: &Path, phase: Phase) -> bool {
    phase
        .document()
        .is_some_and(|doc| paths::document_path(root, doc).exists())
}

/// Phases whose signal documents are present, in workflow order.
pub fn documents_present(root: &Path) -> Vec<Phase> {
    Phase::all()
        .iter()
        .copied()
        .filter(|&phase| document_exists(root, phase))
        .collect()
}

/// Derive the phase a project should be in from its documents alone.
///
/// Scans backward from the most advanced phase with a document; the first
/// document found marks its phase complete and the project sits in the phase
/// after it. A missing earlier document does not pull the result back past
/// a later one that exists.
pub fn detect_phase(root: &Path) -> Phase {
    Phase::all()
        .iter()
        .rev()
        .copied()
        .find(|&phase| document_exists(root, phase))
        .map(|done| done.next().unwrap_or(done))
        .unwrap_or_else(Phase::first)
}
