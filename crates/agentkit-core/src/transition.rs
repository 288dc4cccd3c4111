use crate::error::Result;
use crate::reconcile::reconcile;
use crate::scan::documents_present;
use crate::state::WorkflowState;
use crate::types::{Phase, PhaseStatus};
use chrono::{DateTime, Utc};
use std::path::Path;

// ---------------------------------------------------------------------------
// In-memory transitions
// ---------------------------------------------------------------------------

/// Complete the current phase and move to the next one.
///
/// At the terminal phase the phase is marked completed but `current_phase`
/// stays where it is.
pub fn advance(mut state: WorkflowState) -> WorkflowState {
    let current = state.current_phase;
    advance_from(&mut state, current, Utc::now());
    state
}

/// Mark `phase` completed without moving `current_phase`.
pub fn mark_phase_complete(mut state: WorkflowState, phase: Phase) -> WorkflowState {
    state.phase_mut(phase).complete(Utc::now());
    state
}

fn advance_from(state: &mut WorkflowState, phase: Phase, now: DateTime<Utc>) {
    state.phase_mut(phase).complete(now);
    if let Some(next) = phase.next() {
        state.current_phase = next;
        let record = state.phase_mut(next);
        record.status = PhaseStatus::InProgress;
        record.completed_at = None;
        record.started_at = Some(now);
    }
}

// ---------------------------------------------------------------------------
// PhaseUpdate
// ---------------------------------------------------------------------------

/// Telemetry to merge onto a phase record. `None` fields are left alone.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseUpdate {
    pub questions_total: Option<i64>,
    pub questions_answered: Option<i64>,
    pub last_batch: Option<i64>,
    pub tasks_total: Option<i64>,
    pub tasks_completed: Option<i64>,
    pub note: Option<String>,
}

impl PhaseUpdate {
    fn apply(&self, state: &mut WorkflowState, phase: Phase) {
        let record = state.phase_mut(phase);
        let fields = [
            (self.questions_total, &mut record.questions_total),
            (self.questions_answered, &mut record.questions_answered),
            (self.last_batch, &mut record.last_batch),
            (self.tasks_total, &mut record.tasks_total),
            (self.tasks_completed, &mut record.tasks_completed),
        ];
        for (value, slot) in fields {
            if let Some(v) = value {
                *slot = v;
            }
        }
        if let Some(note) = &self.note {
            record.notes.push(note.clone());
        }
        if let Some(batch) = self.last_batch {
            state.session.last_question_batch = batch;
        }
    }
}

// ---------------------------------------------------------------------------
// Persisted transitions
// ---------------------------------------------------------------------------

/// Set the status of `phase_name` and merge telemetry, then save.
///
/// An unknown phase name is rejected before anything is read or written.
/// Completing a phase stamps `completed_at` and moves the workflow to the
/// phase after it.
pub fn complete_phase(
    root: &Path,
    phase_name: &str,
    status: PhaseStatus,
    update: &PhaseUpdate,
) -> Result<WorkflowState> {
    let phase: Phase = phase_name.parse()?;
    let mut state = WorkflowState::get_or_create(root);

    update.apply(&mut state, phase);

    let now = Utc::now();
    match status {
        PhaseStatus::Completed => advance_from(&mut state, phase, now),
        PhaseStatus::InProgress => state.phase_mut(phase).start(now),
        PhaseStatus::Pending => state.phase_mut(phase).reset(),
    }

    state.save(root)?;
    Ok(state)
}

/// Create and save the initial state for a brand-new project.
pub fn bootstrap(
    root: &Path,
    project_name: &str,
    domain: Option<&str>,
) -> Result<WorkflowState> {
    let mut state = fresh_state(project_name, domain);
    state.save(root)?;
    Ok(state)
}

/// Create and save the initial state for a project that already has
/// documents, placing it in the phase its documents indicate.
pub fn bootstrap_from_documents(
    root: &Path,
    project_name: &str,
    domain: Option<&str>,
) -> Result<WorkflowState> {
    let mut state = reconcile(root, fresh_state(project_name, domain));
    for phase in documents_present(root) {
        state.session.touch_doc(phase.as_str());
    }
    state.save(root)?;
    Ok(state)
}

fn fresh_state(project_name: &str, domain: Option<&str>) -> WorkflowState {
    let now = Utc::now();
    let mut state = WorkflowState::new(project_name);
    state.project.created = Some(now);
    state.project.domain = domain.map(str::to_string);
    state.current_phase = Phase::first();
    state.phase_mut(Phase::first()).start(now);
    state
}

/// Record `doc` as read in the current session and save.
pub fn mark_doc_read(root: &Path, doc: &str) -> Result<WorkflowState> {
    let mut state = WorkflowState::get_or_create(root);
    state.session.touch_doc(doc);
    state.save(root)?;
    Ok(state)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
