use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Phase
// ---------------------------------------------------------------------------

/// One stage of the five-step workflow. Declaration order is workflow order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Constitution,
    Specify,
    Plan,
    Task,
    Implement,
}

impl Phase {
    pub const COUNT: usize = 5;

    pub fn all() -> &'static [Phase] {
        &[
            Phase::Constitution,
            Phase::Specify,
            Phase::Plan,
            Phase::Task,
            Phase::Implement,
        ]
    }

    pub fn first() -> Phase {
        Phase::Constitution
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn next(self) -> Option<Phase> {
        Phase::all().get(self.index() + 1).copied()
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// The document whose existence marks this phase complete. The terminal
    /// phase has none; its completion is only ever set explicitly.
    pub fn document(self) -> Option<&'static str> {
        match self {
            Phase::Constitution => Some("constitution.md"),
            Phase::Specify => Some("spec.md"),
            Phase::Plan => Some("plan.md"),
            Phase::Task => Some("tasks.md"),
            Phase::Implement => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Phase::Constitution => "constitution",
            Phase::Specify => "specify",
            Phase::Plan => "plan",
            Phase::Task => "task",
            Phase::Implement => "implement",
        }
    }
}

impl Default for Phase {
    fn default() -> Self {
        Phase::first()
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Phase {
    type Err = crate::error::AgentkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "constitution" => Ok(Phase::Constitution),
            "specify" => Ok(Phase::Specify),
            "plan" => Ok(Phase::Plan),
            "task" => Ok(Phase::Task),
            "implement" => Ok(Phase::Implement),
            _ => Err(crate::error::AgentkitError::InvalidPhase(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// PhaseStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PhaseStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl PhaseStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            PhaseStatus::Pending => "pending",
            PhaseStatus::InProgress => "in_progress",
            PhaseStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for PhaseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PhaseStatus {
    type Err = crate::error::AgentkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PhaseStatus::Pending),
            "in_progress" => Ok(PhaseStatus::InProgress),
            "completed" => Ok(PhaseStatus::Completed),
            _ => Err(crate::error::AgentkitError::InvalidStatus(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
