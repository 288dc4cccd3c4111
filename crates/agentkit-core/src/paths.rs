use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const AGENTKIT_DIR: &str = ".agentkit";
pub const MEMORY_DIR: &str = ".agentkit/memory";
pub const IDEAS_DIR: &str = ".agentkit/ideas";
pub const TEMPLATES_DIR: &str = ".agentkit/templates";
pub const SCRIPTS_DIR: &str = ".agentkit/scripts";
pub const PHASES_DIR: &str = ".agentkit/phases";

pub const CONFIG_FILE: &str = ".agentkit/config.json";
pub const STATE_FILE: &str = ".agentkit/workflow-state.yaml";

pub const DELIVERABLES_DIR: &str = "deliverables";
pub const NOTES_DIR: &str = "notes";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn state_path(root: &Path) -> PathBuf {
    root.join(STATE_FILE)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn phases_dir(root: &Path) -> PathBuf {
    root.join(PHASES_DIR)
}

pub fn scripts_dir(root: &Path, script_dir: &str) -> PathBuf {
    root.join(SCRIPTS_DIR).join(script_dir)
}

/// Signal documents live directly under the project root.
pub fn document_path(root: &Path, filename: &str) -> PathBuf {
    root.join(filename)
}

// ---------------------------------------------------------------------------
// Project discovery
// ---------------------------------------------------------------------------

/// A directory is an agentkit project when both `.agentkit/` and
/// `.agentkit/memory/` exist.
pub fn is_agentkit_project(dir: &Path) -> bool {
    dir.join(AGENTKIT_DIR).is_dir() && dir.join(MEMORY_DIR).is_dir()
}

/// Walk upward from `start` looking for an agentkit project root.
pub fn find_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| is_agentkit_project(dir))
        .map(Path::to_path_buf)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn path_helpers() {
        let root = Path::new("/tmp/proj");
        assert_eq!(
            state_path(root),
            PathBuf::from("/tmp/proj/.agentkit/workflow-state.yaml")
        );
        assert_eq!(
            config_path(root),
            PathBuf::from("/tmp/proj/.agentkit/config.json")
        );
        assert_eq!(
            scripts_dir(root, "bash"),
            PathBuf::from("/tmp/proj/.agentkit/scripts/bash")
        );
        assert_eq!(
            document_path(root, "spec.md"),
            PathBuf::from("/tmp/proj/spec.md")
        );
    }

    #[test]
    fn project_requires_memory_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(AGENTKIT_DIR)).unwrap();
        assert!(!is_agentkit_project(dir.path()));

        std::fs::create_dir_all(dir.path().join(MEMORY_DIR)).unwrap();
        assert!(is_agentkit_project(dir.path()));
    }

    #[test]
    fn find_root_walks_upward() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(MEMORY_DIR)).unwrap();
        let nested = dir.path().join("notes/deep");
        std::fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_root(&nested), Some(dir.path().to_path_buf()));
    }

    #[test]
    fn find_root_none_outside_project() {
        let dir = TempDir::new().unwrap();
        assert_eq!(find_root(dir.path()), None);
    }
}
