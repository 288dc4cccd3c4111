use crate::output::print_json;
use agentkit_core::{migrate, paths, AgentkitError};
use std::path::Path;

/// `agentkit upgrade`: move an older project onto tracked workflow state.
///
/// Existing documents are preserved; only `.agentkit/phases/` and the state
/// file are created.
pub fn run(root: &Path, force: bool, json: bool) -> anyhow::Result<()> {
    if !paths::is_agentkit_project(root) {
        return Err(AgentkitError::NotInitialized.into());
    }

    let check = migrate::check_version(root);
    if !check.needs_upgrade && !force {
        if json {
            return print_json(&serde_json::json!({
                "version": check.current,
                "upgraded": false,
            }));
        }
        println!("Project is already at v{}", check.current);
        println!("Use --force to re-run upgrade anyway.");
        return Ok(());
    }

    let state = migrate::upgrade(root)?;

    if json {
        return print_json(&serde_json::json!({
            "previous_version": check.current,
            "version": state.version,
            "upgraded": true,
            "current_phase": state.current_phase,
        }));
    }

    println!("Upgraded: v{} → v{}", check.current, state.version);
    println!("Current phase: {}", state.current_phase);
    if !state.session.docs_read.is_empty() {
        println!("Found documents for: {}", state.session.docs_read.join(", "));
    }
    Ok(())
}
