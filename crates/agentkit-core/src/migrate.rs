//! Upgrade of projects created before workflow state existed.

use crate::error::Result;
use crate::io;
use crate::paths;
use crate::state::{project_name_for, WorkflowState, STATE_VERSION};
use crate::transition::bootstrap_from_documents;
use std::path::Path;

/// Version assumed for projects that predate the state file.
pub const LEGACY_VERSION: &str = "0.2.0";

/// Result of [`check_version`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionCheck {
    pub current: String,
    pub needs_upgrade: bool,
}

/// Work out which layout a project uses.
///
/// A state file tagged with the current version, or a non-empty
/// `.agentkit/phases/` directory, means the project is up to date.
pub fn check_version(root: &Path) -> VersionCheck {
    if stored_version(root).as_deref() == Some(STATE_VERSION) || has_phase_files(root) {
        return VersionCheck {
            current: STATE_VERSION.to_string(),
            needs_upgrade: false,
        };
    }
    VersionCheck {
        current: LEGACY_VERSION.to_string(),
        needs_upgrade: true,
    }
}

fn stored_version(root: &Path) -> Option<String> {
    let data = std::fs::read_to_string(paths::state_path(root)).ok()?;
    let value: serde_yaml::Value = serde_yaml::from_str(&data).ok()?;
    value.get("version")?.as_str().map(str::to_string)
}

fn has_phase_files(root: &Path) -> bool {
    std::fs::read_dir(paths::phases_dir(root))
        .map(|mut entries| entries.next().is_some())
        .unwrap_or(false)
}

/// Bring an older project up to the current layout.
///
/// Creates `.agentkit/phases/` and writes a workflow state inferred from the
/// documents already present. Existing documents are never touched.
pub fn upgrade(root: &Path) -> Result<WorkflowState> {
    io::ensure_dir(&paths::phases_dir(root))?;
    let state = bootstrap_from_documents(root, &project_name_for(root), None)?;
    tracing::info!(
        root = %root.display(),
        phase = %state.current_phase,
        "upgraded project to workflow state {STATE_VERSION}"
    );
    Ok(state)
}
