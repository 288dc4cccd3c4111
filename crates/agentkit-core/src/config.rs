use crate::error::{AgentkitError, Result};
use crate::paths;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// AgentKind
// ---------------------------------------------------------------------------

/// Coding agent a project is set up for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    #[default]
    Claude,
    Copilot,
    Cursor,
    Gemini,
}

impl AgentKind {
    pub fn all() -> &'static [AgentKind] {
        &[
            AgentKind::Claude,
            AgentKind::Copilot,
            AgentKind::Cursor,
            AgentKind::Gemini,
        ]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AgentKind::Claude => "claude",
            AgentKind::Copilot => "copilot",
            AgentKind::Cursor => "cursor",
            AgentKind::Gemini => "gemini",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AgentKind::Claude => "Claude Code",
            AgentKind::Copilot => "GitHub Copilot",
            AgentKind::Cursor => "Cursor",
            AgentKind::Gemini => "Gemini CLI",
        }
    }

    /// Project-relative directory the agent reads slash commands from.
    pub fn command_dir(self) -> &'static str {
        match self {
            AgentKind::Claude => ".claude/commands",
            AgentKind::Copilot => ".github/prompts",
            AgentKind::Cursor => ".cursor/commands",
            AgentKind::Gemini => ".gemini/commands",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AgentKind {
    type Err = AgentkitError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        AgentKind::all()
            .iter()
            .copied()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| AgentkitError::InvalidAgent(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// ScriptKind
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScriptKind {
    #[default]
    Bash,
    Powershell,
}

impl ScriptKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ScriptKind::Bash => "bash",
            ScriptKind::Powershell => "powershell",
        }
    }
}

impl fmt::Display for ScriptKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ScriptKind {
    type Err = AgentkitError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "bash" | "sh" => Ok(ScriptKind::Bash),
            "powershell" | "ps" => Ok(ScriptKind::Powershell),
            _ => Err(AgentkitError::InvalidScript(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Project settings stored in `.agentkit/config.json`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_agent: Option<AgentKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script_type: Option<ScriptKind>,
}

impl Config {
    /// Load the project config. A missing or unreadable file yields an
    /// empty config.
    pub fn load(root: &Path) -> Self {
        let path = paths::config_path(root);
        let Ok(data) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        serde_json::from_str(&data).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unreadable config");
            Self::default()
        })
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_json::to_string_pretty(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    pub fn agent(&self) -> AgentKind {
        self.ai_agent.unwrap_or_default()
    }

    pub fn script(&self) -> ScriptKind {
        self.script_type.unwrap_or_default()
    }

    pub fn command_dir(&self, root: &Path) -> PathBuf {
        root.join(self.agent().command_dir())
    }

    pub fn scripts_dir(&self, root: &Path) -> PathBuf {
        paths::scripts_dir(root, self.script().as_str())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
