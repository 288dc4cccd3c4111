use crate::output::print_json;
use agentkit_core::transition::mark_doc_read;
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum DocSubcommand {
    /// Record a document as read in the current session
    Read { name: String },
}

pub fn run(root: &Path, subcmd: DocSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        DocSubcommand::Read { name } => read(root, &name, json),
    }
}

fn read(root: &Path, name: &str, json: bool) -> anyhow::Result<()> {
    let state = mark_doc_read(root, name).context("failed to record document read")?;

    if json {
        return print_json(&serde_json::json!({ "docs_read": state.session.docs_read }));
    }
    println!("Docs read this session: {}", state.session.docs_read.join(", "));
    Ok(())
}
