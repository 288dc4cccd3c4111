use crate::output::print_json;
use agentkit_core::{
    state::WorkflowState,
    transition::{complete_phase, PhaseUpdate},
    types::{Phase, PhaseStatus},
};
use anyhow::Context;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum PhaseSubcommand {
    /// Set a phase's status and progress counters
    Set {
        /// Phase name (constitution, specify, plan, task, implement)
        phase: String,
        /// New status (pending, in_progress, completed)
        status: String,
        #[arg(long)]
        questions_total: Option<u32>,
        #[arg(long)]
        questions_answered: Option<u32>,
        #[arg(long)]
        last_batch: Option<u32>,
        #[arg(long)]
        tasks_total: Option<u32>,
        #[arg(long)]
        tasks_completed: Option<u32>,
        /// Append a note to the phase
        #[arg(long)]
        note: Option<String>,
    },
    /// Show one phase record
    Show { phase: String },
}

pub fn run(root: &Path, subcmd: PhaseSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        PhaseSubcommand::Set {
            phase,
            status,
            questions_total,
            questions_answered,
            last_batch,
            tasks_total,
            tasks_completed,
            note,
        } => {
            let status: PhaseStatus = status.parse()?;
            let update = PhaseUpdate {
                questions_total: questions_total.map(i64::from),
                questions_answered: questions_answered.map(i64::from),
                last_batch: last_batch.map(i64::from),
                tasks_total: tasks_total.map(i64::from),
                tasks_completed: tasks_completed.map(i64::from),
                note,
            };
            set(root, &phase, status, &update, json)
        }
        PhaseSubcommand::Show { phase } => show(root, &phase, json),
    }
}

fn set(
    root: &Path,
    phase: &str,
    status: PhaseStatus,
    update: &PhaseUpdate,
    json: bool,
) -> anyhow::Result<()> {
    let state = complete_phase(root, phase, status, update)
        .with_context(|| format!("failed to update phase '{phase}'"))?;

    if json {
        return print_json(&serde_json::json!({
            "phase": phase,
            "status": status,
            "current_phase": state.current_phase,
        }));
    }

    println!("Phase {phase}: {status}");
    println!("Current phase: {}", state.current_phase);
    Ok(())
}

fn show(root: &Path, phase: &str, json: bool) -> anyhow::Result<()> {
    let phase: Phase = phase.parse()?;
    let state = WorkflowState::get_or_create(root);
    let record = state.phase(phase);

    if json {
        return print_json(record);
    }

    println!("Phase:     {phase}");
    println!("Status:    {}", record.status);
    if let Some(ts) = record.started_at {
        println!("Started:   {}", ts.format("%Y-%m-%d %H:%M UTC"));
    }
    if let Some(ts) = record.completed_at {
        println!("Completed: {}", ts.format("%Y-%m-%d %H:%M UTC"));
    }
    if record.questions_total > 0 {
        println!(
            "Questions: {}/{} (batch {})",
            record.questions_answered, record.questions_total, record.last_batch
        );
    }
    if record.tasks_total > 0 {
        println!("Tasks:     {}/{}", record.tasks_completed, record.tasks_total);
    }
    for note in &record.notes {
        println!("  - {note}");
    }
    Ok(())
}
