//! Self-healing sync: documents on disk are trusted over the stored state.

use crate::scan::detect_phase;
use crate::state::WorkflowState;
use crate::types::{Phase, PhaseStatus};
use chrono::Utc;
use std::path::Path;

/// Correct `state` so it agrees with the documents under `root`.
///
/// Advances when documents are ahead of the state and rolls back when the
/// state claims phases whose documents have gone. When the detected phase
/// already matches, `state` is returned untouched.
pub fn reconcile(root: &Path, mut state: WorkflowState) -> WorkflowState {
    let detected = detect_phase(root);
    let previous = state.current_phase;
    if detected == previous {
        return state;
    }

    tracing::debug!(from = %previous, to = %detected, "reconciling workflow state with documents");
    let now = Utc::now();
    state.current_phase = detected;

    for &phase in Phase::all().iter().take_while(|&&p| p < detected) {
        let record = state.phase_mut(phase);
        record.status = PhaseStatus::Completed;
        record.completed_at.get_or_insert(now);
    }

    state.phase_mut(detected).start(now);

    if detected < previous {
        for &phase in Phase::all().iter().filter(|&&p| p > detected) {
            state.phase_mut(phase).reset();
        }
    }

    state
}
