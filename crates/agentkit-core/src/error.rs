use thiserror::Error;

#[derive(Debug, Error)]
pub enum AgentkitError {
    #[error("not an agentkit project: run 'agentkit init'")]
    NotInitialized,

    #[error("invalid phase: {0}")]
    InvalidPhase(String),

    #[error("invalid phase status '{0}': expected pending, in_progress or completed")]
    InvalidStatus(String),

    #[error("unknown AI agent: {0}")]
    InvalidAgent(String),

    #[error("unknown script type: {0}")]
    InvalidScript(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, AgentkitError>;
