use crate::output::print_json;
use agentkit_core::{
    config::{AgentKind, Config, ScriptKind},
    io, paths, scan,
    state::project_name_for,
    transition::{bootstrap, bootstrap_from_documents},
};
use anyhow::Context;
use std::path::Path;

pub struct InitOptions {
    pub name: Option<String>,
    pub domain: Option<String>,
    pub ai: Option<String>,
    pub script: Option<String>,
}

pub fn run(root: &Path, opts: InitOptions, json: bool) -> anyhow::Result<()> {
    let ai: Option<AgentKind> = opts.ai.as_deref().map(str::parse).transpose()?;
    let script: Option<ScriptKind> = opts.script.as_deref().map(str::parse).transpose()?;
    let project_name = opts.name.unwrap_or_else(|| project_name_for(root));

    if !json {
        println!("Initializing agentkit in: {}", root.display());
    }

    // 1. Write config.json if missing
    let config_path = paths::config_path(root);
    let config = if config_path.exists() {
        report(json, "exists: ", paths::CONFIG_FILE);
        if !json && (ai.is_some() || script.is_some()) {
            println!("  config.json already exists, --ai/--script ignored");
        }
        Config::load(root)
    } else {
        let cfg = Config {
            ai_agent: Some(ai.unwrap_or_default()),
            script_type: Some(script.unwrap_or_default()),
        };
        cfg.save(root).context("failed to write config.json")?;
        report(json, "created:", paths::CONFIG_FILE);
        cfg
    };

    // 2. Create the project directory tree
    let dirs = [
        root.join(paths::MEMORY_DIR),
        root.join(paths::IDEAS_DIR),
        root.join(paths::TEMPLATES_DIR),
        paths::phases_dir(root),
        config.scripts_dir(root),
        config.command_dir(root),
        root.join(paths::DELIVERABLES_DIR),
        root.join(paths::NOTES_DIR),
    ];
    for dir in &dirs {
        io::ensure_dir(dir).with_context(|| format!("failed to create {}", dir.display()))?;
    }

    // 3. Write workflow-state.yaml if missing, picking up any existing documents
    let state_path = paths::state_path(root);
    let created_state = !state_path.exists();
    if created_state {
        let domain = opts.domain.as_deref();
        let state = if scan::documents_present(root).is_empty() {
            bootstrap(root, &project_name, domain)
        } else {
            bootstrap_from_documents(root, &project_name, domain)
        }
        .context("failed to write workflow-state.yaml")?;
        report(json, "created:", paths::STATE_FILE);
        tracing::debug!(phase = %state.current_phase, "bootstrapped workflow state");
    } else {
        report(json, "exists: ", paths::STATE_FILE);
    }

    if json {
        return print_json(&serde_json::json!({
            "root": root,
            "project": project_name,
            "agent": config.agent(),
            "script": config.script(),
            "created_state": created_state,
        }));
    }

    println!(
        "\nagentkit initialized for {} ({} scripts).",
        config.agent().display_name(),
        config.script()
    );
    println!("Next: start the constitution phase with your agent, then run: agentkit status");
    Ok(())
}

fn report(json: bool, verb: &str, path: &str) {
    if !json {
        println!("  {verb} {path}");
    }
}
