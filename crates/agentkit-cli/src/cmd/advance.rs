use super::load_reconciled;
use crate::output::print_json;
use agentkit_core::transition::advance;
use anyhow::Context;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let (state, _) = load_reconciled(root);
    let from = state.current_phase;
    let mut state = advance(state);
    state.save(root).context("failed to write workflow state")?;

    if json {
        return print_json(&serde_json::json!({
            "from": from,
            "to": state.current_phase,
            "status": state.current().status,
        }));
    }

    if from == state.current_phase {
        println!("Completed final phase: {from}");
    } else {
        println!("Advanced: {} → {}", from, state.current_phase);
    }
    Ok(())
}
