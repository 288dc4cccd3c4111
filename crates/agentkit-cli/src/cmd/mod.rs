pub mod advance;
pub mod doc;
pub mod init;
pub mod phase;
pub mod status;
pub mod sync;
pub mod upgrade;

use agentkit_core::{reconcile::reconcile, state::WorkflowState, types::Phase};
use std::path::Path;

/// What reconciliation did to a freshly loaded state.
pub struct SyncReport {
    pub from: Phase,
    pub to: Phase,
    /// The state file was unreadable and the state was rebuilt from defaults.
    pub recovered: bool,
}

impl SyncReport {
    pub fn changed(&self) -> bool {
        self.from != self.to
    }

    /// True when the file on disk no longer matches the reconciled state.
    pub fn needs_save(&self) -> bool {
        self.changed() || self.recovered
    }
}

/// Load the workflow state (or an unsaved default) and reconcile it with
/// the documents under `root`.
pub fn load_reconciled(root: &Path) -> (WorkflowState, SyncReport) {
    let (state, recovered) = WorkflowState::load_with_recovery(root)
        .unwrap_or_else(|| (WorkflowState::unsaved(root), false));
    let from = state.current_phase;
    let state = reconcile(root, state);
    let report = SyncReport {
        from,
        to: state.current_phase,
        recovered,
    };
    (state, report)
}
