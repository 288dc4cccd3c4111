use agentkit_core::paths;
use std::path::{Path, PathBuf};

/// Resolve the project root directory.
///
/// Priority:
/// 1. `--root` flag / `AGENTKIT_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` to the nearest agentkit project
/// 3. Fall back to `cwd`
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    if let Some(p) = explicit {
        return p.to_path_buf();
    }

    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_from(&cwd)
}

fn resolve_from(cwd: &Path) -> PathBuf {
    paths::find_root(cwd).unwrap_or_else(|| cwd.to_path_buf())
}
