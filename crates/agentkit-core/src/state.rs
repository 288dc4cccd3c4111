use crate::error::{AgentkitError, Result};
use crate::paths;
use crate::types::{Phase, PhaseStatus};
use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::ops::{Index, IndexMut};
use std::path::Path;

/// Format tag written into every state file.
pub const STATE_VERSION: &str = "0.3.0";

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

/// Nullable ISO-8601 timestamps.
///
/// Written as RFC 3339 in UTC. Older state files carry naive local
/// timestamps with no offset (`2025-01-01T12:00:00.123456`); those are
/// accepted and read as UTC.
mod timestamp {
    use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<DateTime<Utc>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(ts) => serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<DateTime<Utc>>, D::Error> {
        let Some(raw) = Option::<String>::deserialize(deserializer)? else {
            return Ok(None);
        };
        parse(&raw)
            .map(Some)
            .ok_or_else(|| D::Error::custom(format!("invalid timestamp: {raw}")))
    }

    pub fn parse(raw: &str) -> Option<DateTime<Utc>> {
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .ok()
            .map(|naive| naive.and_utc())
    }
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhaseRecord {
    pub status: PhaseStatus,
    #[serde(with = "timestamp")]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(with = "timestamp")]
    pub completed_at: Option<DateTime<Utc>>,
    pub questions_total: i64,
    pub questions_answered: i64,
    pub last_batch: i64,
    pub tasks_total: i64,
    pub tasks_completed: i64,
    pub notes: Vec<String>,
}

impl PhaseRecord {
    pub fn is_completed(&self) -> bool {
        self.status == PhaseStatus::Completed
    }

    /// Mark in progress. `started_at` is kept if already set.
    pub fn start(&mut self, now: DateTime<Utc>) {
        self.status = PhaseStatus::InProgress;
        self.completed_at = None;
        self.started_at.get_or_insert(now);
    }

    /// Mark completed, stamping `completed_at` with `now`.
    pub fn complete(&mut self, now: DateTime<Utc>) {
        self.status = PhaseStatus::Completed;
        self.completed_at = Some(now);
    }

    /// Back to pending. Telemetry, notes and `started_at` survive.
    pub fn reset(&mut self) {
        self.status = PhaseStatus::Pending;
        self.completed_at = None;
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionRecord {
    #[serde(with = "timestamp")]
    pub last_active: Option<DateTime<Utc>>,
    pub docs_read: Vec<String>,
    pub last_question_batch: i64,
    pub context_summary: Option<String>,
}

impl SessionRecord {
    /// Record a document as read this session. Returns false if it was
    /// already listed.
    pub fn touch_doc(&mut self, doc: &str) -> bool {
        if self.docs_read.iter().any(|d| d == doc) {
            return false;
        }
        self.docs_read.push(doc.to_string());
        true
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProjectRecord {
    pub name: String,
    #[serde(with = "timestamp")]
    pub created: Option<DateTime<Utc>>,
    pub domain: Option<String>,
}

// ---------------------------------------------------------------------------
// PhaseTable
// ---------------------------------------------------------------------------

/// One record per phase, indexed by [`Phase`].
///
/// Serialized as a map in workflow order. On read, unknown phase names are
/// ignored and missing phases keep their defaults.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PhaseTable([PhaseRecord; Phase::COUNT]);

impl PhaseTable {
    pub fn iter(&self) -> impl Iterator<Item = (Phase, &PhaseRecord)> {
        Phase::all().iter().copied().zip(self.0.iter())
    }

    pub fn completed_count(&self) -> usize {
        self.0.iter().filter(|r| r.is_completed()).count()
    }
}

impl Index<Phase> for PhaseTable {
    type Output = PhaseRecord;

    fn index(&self, phase: Phase) -> &PhaseRecord {
        &self.0[phase.index()]
    }
}

impl IndexMut<Phase> for PhaseTable {
    fn index_mut(&mut self, phase: Phase) -> &mut PhaseRecord {
        &mut self.0[phase.index()]
    }
}

impl Serialize for PhaseTable {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Phase::COUNT))?;
        for (phase, record) in self.iter() {
            map.serialize_entry(phase.as_str(), record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for PhaseTable {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Option::<BTreeMap<String, serde_yaml::Value>>::deserialize(deserializer)?
            .unwrap_or_default();
        let mut table = PhaseTable::default();
        for (name, value) in raw {
            let Ok(phase) = name.parse::<Phase>() else {
                continue;
            };
            if value.is_null() {
                continue;
            }
            table[phase] = serde_yaml::from_value(value).map_err(D::Error::custom)?;
        }
        Ok(table)
    }
}

// ---------------------------------------------------------------------------
// WorkflowState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowState {
    pub version: String,
    pub project: ProjectRecord,
    pub current_phase: Phase,
    pub session: SessionRecord,
    pub phases: PhaseTable,
}

impl Default for WorkflowState {
    fn default() -> Self {
        Self {
            version: STATE_VERSION.to_string(),
            project: ProjectRecord::default(),
            current_phase: Phase::first(),
            session: SessionRecord::default(),
            phases: PhaseTable::default(),
        }
    }
}

/// Summary of where a project stands, for status output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PhaseProgress {
    pub current_phase: Phase,
    pub phases_completed: usize,
    pub phases_total: usize,
    pub current_status: PhaseStatus,
    pub questions_progress: Option<String>,
    pub tasks_progress: Option<String>,
}

impl WorkflowState {
    pub fn new(project_name: impl Into<String>) -> Self {
        let mut state = Self::default();
        state.project.name = project_name.into();
        state
    }

    pub fn phase(&self, phase: Phase) -> &PhaseRecord {
        &self.phases[phase]
    }

    pub fn phase_mut(&mut self, phase: Phase) -> &mut PhaseRecord {
        &mut self.phases[phase]
    }

    pub fn current(&self) -> &PhaseRecord {
        &self.phases[self.current_phase]
    }

    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    /// Load the state file.
    ///
    /// `None` means no state file exists yet. A file that exists but cannot
    /// be read or parsed yields a default state; reconciliation against the
    /// documents repairs it on the next cycle.
    pub fn load(root: &Path) -> Option<Self> {
        Self::load_with_recovery(root).map(|(state, _)| state)
    }

    /// Like [`load`](Self::load), also reporting whether the file on disk was
    /// unusable and the returned state is a fallback default. Callers should
    /// save a recovered state even when nothing else changed, so the bad file
    /// does not outlive the next cycle.
    pub fn load_with_recovery(root: &Path) -> Option<(Self, bool)> {
        let path = paths::state_path(root);
        if !path.exists() {
            return None;
        }
        let parsed = std::fs::read_to_string(&path)
            .map_err(AgentkitError::from)
            .and_then(|data| Self::parse(&data));
        match parsed {
            Ok(state) => Some((state, false)),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    error = %e,
                    "unreadable workflow state, falling back to defaults"
                );
                Some((Self::default(), true))
            }
        }
    }

    /// Load the state file, or build an unsaved default named after the
    /// project directory.
    pub fn get_or_create(root: &Path) -> Self {
        Self::load(root).unwrap_or_else(|| Self::unsaved(root))
    }

    /// Fresh state for a project with no state file. Not written to disk.
    pub fn unsaved(root: &Path) -> Self {
        let mut state = Self::new(project_name_for(root));
        state.project.created = Some(Utc::now());
        state
    }

    fn parse(data: &str) -> Result<Self> {
        if data.trim().is_empty() {
            return Ok(Self::default());
        }
        let state: Option<Self> = serde_yaml::from_str(data)?;
        Ok(state.unwrap_or_default())
    }

    /// Write the state file, refreshing `session.last_active` first.
    pub fn save(&mut self, root: &Path) -> Result<()> {
        self.session.last_active = Some(Utc::now());
        let path = paths::state_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())?;
        tracing::debug!(path = %path.display(), phase = %self.current_phase, "saved workflow state");
        Ok(())
    }

    // ---------------------------------------------------------------------------
    // Queries
    // ---------------------------------------------------------------------------

    pub fn progress(&self) -> PhaseProgress {
        let current = self.current();
        PhaseProgress {
            current_phase: self.current_phase,
            phases_completed: self.phases.completed_count(),
            phases_total: Phase::COUNT,
            current_status: current.status,
            questions_progress: (current.questions_total > 0).then(|| {
                format!("{}/{}", current.questions_answered, current.questions_total)
            }),
            tasks_progress: (current.tasks_total > 0)
                .then(|| format!("{}/{}", current.tasks_completed, current.tasks_total)),
        }
    }
}

/// Default project name: the final component of the project root.
pub fn project_name_for(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "project".to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
