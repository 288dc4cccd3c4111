mod cmd;
mod output;
mod root;

use clap::{Parser, Subcommand};
use cmd::{doc::DocSubcommand, phase::PhaseSubcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "agentkit",
    about = "Document-driven project workflow: constitution, spec, plan, tasks, implement",
    version,
    propagate_version = true
)]
struct Cli {
    /// Project root (default: auto-detect from .agentkit/)
    #[arg(long, global = true, env = "AGENTKIT_ROOT")]
    root: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize an agentkit project in the root directory
    Init {
        /// Project name (default: root directory name)
        #[arg(long)]
        name: Option<String>,

        /// Project domain, e.g. "education" or "retail"
        #[arg(long)]
        domain: Option<String>,

        /// AI agent to configure for (claude, copilot, cursor, gemini)
        #[arg(long)]
        ai: Option<String>,

        /// Script type (bash, powershell)
        #[arg(long)]
        script: Option<String>,
    },

    /// Show workflow progress, repairing state from documents first
    Status,

    /// Reconcile workflow state with the documents on disk
    Sync,

    /// Complete the current phase and move to the next
    Advance,

    /// Update a single phase
    Phase {
        #[command(subcommand)]
        subcommand: PhaseSubcommand,
    },

    /// Session document bookkeeping
    Doc {
        #[command(subcommand)]
        subcommand: DocSubcommand,
    },

    /// Upgrade a project created by an older agentkit
    Upgrade {
        /// Re-run the upgrade even if the project looks current
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let root = root::resolve_root(cli.root.as_deref());

    let result = match cli.command {
        Commands::Init {
            name,
            domain,
            ai,
            script,
        } => cmd::init::run(
            &root,
            cmd::init::InitOptions {
                name,
                domain,
                ai,
                script,
            },
            cli.json,
        ),
        Commands::Status => cmd::status::run(&root, cli.json),
        Commands::Sync => cmd::sync::run(&root, cli.json),
        Commands::Advance => cmd::advance::run(&root, cli.json),
        Commands::Phase { subcommand } => cmd::phase::run(&root, subcommand, cli.json),
        Commands::Doc { subcommand } => cmd::doc::run(&root, subcommand, cli.json),
        Commands::Upgrade { force } => cmd::upgrade::run(&root, force, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
