use super::load_reconciled;
use crate::output::print_json;
use anyhow::Context;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let (mut state, report) = load_reconciled(root);
    state.save(root).context("failed to write workflow state")?;

    if json {
        return print_json(&serde_json::json!({
            "from": report.from,
            "to": report.to,
            "changed": report.changed(),
        }));
    }

    if report.changed() {
        println!("State synced: {} → {}", report.from, report.to);
    } else {
        println!("State matches documents (phase: {})", report.to);
    }
    Ok(())
}
