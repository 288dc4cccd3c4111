use super::load_reconciled;
use crate::output::{print_json, print_table};
use agentkit_core::{scan, state::WorkflowState, types::Phase};
use anyhow::Context;
use std::path::Path;

pub fn run(root: &Path, json: bool) -> anyhow::Result<()> {
    let (mut state, report) = load_reconciled(root);
    if report.needs_save() {
        state.save(root).context("failed to write workflow state")?;
    }

    if json {
        #[derive(serde::Serialize)]
        struct PhaseRow<'a> {
            phase: Phase,
            #[serde(flatten)]
            record: &'a agentkit_core::state::PhaseRecord,
            document: Option<&'static str>,
            document_present: bool,
        }

        #[derive(serde::Serialize)]
        struct StatusOutput<'a> {
            project: &'a str,
            domain: Option<&'a str>,
            progress: agentkit_core::state::PhaseProgress,
            repaired_from: Option<Phase>,
            recovered: bool,
            phases: Vec<PhaseRow<'a>>,
        }

        let phases = state
            .phases
            .iter()
            .map(|(phase, record)| PhaseRow {
                phase,
                record,
                document: phase.document(),
                document_present: scan::document_exists(root, phase),
            })
            .collect();

        let output = StatusOutput {
            project: &state.project.name,
            domain: state.project.domain.as_deref(),
            progress: state.progress(),
            repaired_from: report.changed().then_some(report.from),
            recovered: report.recovered,
            phases,
        };
        return print_json(&output);
    }

    // -- Human-readable output ------------------------------------------------

    print_summary(&state);

    if report.recovered {
        println!("\nRepaired: state file was unreadable and has been rewritten");
    }
    if report.changed() {
        println!(
            "\nRepaired: state said {}, documents say {}",
            report.from, report.to
        );
    }

    println!();
    let rows: Vec<Vec<String>> = state
        .phases
        .iter()
        .map(|(phase, record)| {
            let marker = if phase == state.current_phase { "▶" } else { "" };
            let document = match phase.document() {
                Some(doc) if scan::document_exists(root, phase) => doc.to_string(),
                Some(doc) => format!("{doc} (missing)"),
                None => "-".to_string(),
            };
            vec![
                marker.to_string(),
                phase.to_string(),
                record.status.to_string(),
                document,
            ]
        })
        .collect();
    print_table(&["", "PHASE", "STATUS", "DOCUMENT"], rows);

    Ok(())
}

fn print_summary(state: &WorkflowState) {
    let progress = state.progress();
    let name = if state.project.name.is_empty() {
        "(unnamed)"
    } else {
        state.project.name.as_str()
    };
    println!("Project: {name}");
    if let Some(domain) = &state.project.domain {
        println!("Domain:  {domain}");
    }
    println!(
        "Phase:   {} ({})   {}/{} phases complete",
        progress.current_phase,
        progress.current_status,
        progress.phases_completed,
        progress.phases_total
    );
    if let Some(q) = &progress.questions_progress {
        println!("Questions answered: {q}");
    }
    if let Some(t) = &progress.tasks_progress {
        println!("Tasks completed: {t}");
    }
}
