#![allow(deprecated)]
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn agentkit(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("agentkit").unwrap();
    cmd.current_dir(dir.path()).env("AGENTKIT_ROOT", dir.path());
    cmd
}

fn init_project(dir: &TempDir) {
    agentkit(dir)
        .args(["init", "--name", "Acme"])
        .assert()
        .success();
}

fn touch(dir: &TempDir, names: &[&str]) {
    for name in names {
        std::fs::write(dir.path().join(name), "# doc\n").unwrap();
    }
}

fn read_state(dir: &TempDir) -> serde_yaml::Value {
    let data = std::fs::read_to_string(dir.path().join(".agentkit/workflow-state.yaml")).unwrap();
    serde_yaml::from_str(&data).unwrap()
}

fn phase_status(state: &serde_yaml::Value, phase: &str) -> String {
    state["phases"][phase]["status"]
        .as_str()
        .unwrap()
        .to_string()
}

// ---------------------------------------------------------------------------
// agentkit init
// ---------------------------------------------------------------------------

#[test]
fn init_creates_directory_tree() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    for sub in [
        ".agentkit/memory",
        ".agentkit/ideas",
        ".agentkit/templates",
        ".agentkit/phases",
        ".agentkit/scripts/bash",
        ".claude/commands",
        "deliverables",
        "notes",
    ] {
        assert!(dir.path().join(sub).is_dir(), "missing directory {sub}");
    }
    assert!(dir.path().join(".agentkit/config.json").exists());

    let state = read_state(&dir);
    assert_eq!(state["project"]["name"].as_str(), Some("Acme"));
    assert_eq!(state["current_phase"].as_str(), Some("constitution"));
    assert_eq!(phase_status(&state, "constitution"), "in_progress");
}

#[test]
fn init_is_idempotent() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    agentkit(&dir)
        .args(["init", "--name", "Other"])
        .assert()
        .success()
        .stdout(predicate::str::contains("exists:"));

    let state = read_state(&dir);
    assert_eq!(state["project"]["name"].as_str(), Some("Acme"));
}

#[test]
fn init_with_agent_and_script() {
    let dir = TempDir::new().unwrap();
    agentkit(&dir)
        .args(["init", "--ai", "gemini", "--script", "powershell"])
        .assert()
        .success();

    assert!(dir.path().join(".gemini/commands").is_dir());
    assert!(dir.path().join(".agentkit/scripts/powershell").is_dir());
    let config = std::fs::read_to_string(dir.path().join(".agentkit/config.json")).unwrap();
    assert!(config.contains("\"gemini\""));
}

#[test]
fn init_reports_ignored_flags_when_config_exists() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    agentkit(&dir)
        .args(["init", "--ai", "cursor"])
        .assert()
        .success()
        .stdout(predicate::str::contains("--ai/--script ignored"));

    let config = std::fs::read_to_string(dir.path().join(".agentkit/config.json")).unwrap();
    assert!(config.contains("\"claude\""));
}

#[test]
fn init_rejects_unknown_agent() {
    let dir = TempDir::new().unwrap();
    agentkit(&dir)
        .args(["init", "--ai", "notepad"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown AI agent"));
}

#[test]
fn init_picks_up_existing_documents() {
    let dir = TempDir::new().unwrap();
    touch(&dir, &["constitution.md", "spec.md"]);
    init_project(&dir);

    let state = read_state(&dir);
    assert_eq!(state["current_phase"].as_str(), Some("plan"));
    assert_eq!(phase_status(&state, "specify"), "completed");
}

// ---------------------------------------------------------------------------
// agentkit status / sync
// ---------------------------------------------------------------------------

#[test]
fn status_shows_current_phase() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    agentkit(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Project: Acme"))
        .stdout(predicate::str::contains("constitution (in_progress)"));
}

#[test]
fn status_repairs_state_from_documents() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    touch(&dir, &["constitution.md"]);

    agentkit(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("Repaired"));

    let state = read_state(&dir);
    assert_eq!(state["current_phase"].as_str(), Some("specify"));
    assert_eq!(phase_status(&state, "constitution"), "completed");
}

#[test]
fn status_json() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    touch(&dir, &["constitution.md"]);

    let output = agentkit(&dir).args(["status", "--json"]).output().unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["project"], "Acme");
    assert_eq!(json["progress"]["current_phase"], "specify");
    assert_eq!(json["progress"]["phases_total"], 5);
    assert_eq!(json["repaired_from"], "constitution");
    assert_eq!(json["phases"][0]["document_present"], true);
    assert_eq!(json["phases"].as_array().unwrap().len(), 5);
}

#[test]
fn sync_rolls_back_when_document_deleted() {
    let dir = TempDir::new().unwrap();
    touch(&dir, &["constitution.md", "spec.md"]);
    init_project(&dir);
    std::fs::remove_file(dir.path().join("spec.md")).unwrap();

    agentkit(&dir)
        .arg("sync")
        .assert()
        .success()
        .stdout(predicate::str::contains("plan → specify"));

    let state = read_state(&dir);
    assert_eq!(state["current_phase"].as_str(), Some("specify"));
    assert_eq!(phase_status(&state, "specify"), "in_progress");
    assert_eq!(phase_status(&state, "plan"), "pending");
    assert!(state["phases"]["plan"]["completed_at"].is_null());
}

#[test]
fn corrupt_state_file_does_not_block() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    touch(&dir, &["constitution.md", "spec.md", "plan.md"]);
    std::fs::write(
        dir.path().join(".agentkit/workflow-state.yaml"),
        "{{{ this is not yaml",
    )
    .unwrap();

    agentkit(&dir).arg("sync").assert().success();

    let state = read_state(&dir);
    assert_eq!(state["current_phase"].as_str(), Some("task"));
    assert_eq!(state["version"].as_str(), Some("0.3.0"));
}

#[test]
fn status_rewrites_corrupt_state_without_documents() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    std::fs::write(
        dir.path().join(".agentkit/workflow-state.yaml"),
        "{{{ junk",
    )
    .unwrap();

    agentkit(&dir)
        .arg("status")
        .assert()
        .success()
        .stdout(predicate::str::contains("state file was unreadable"));

    let state = read_state(&dir);
    assert_eq!(state["version"].as_str(), Some("0.3.0"));
    assert_eq!(state["current_phase"].as_str(), Some("constitution"));

    agentkit(&dir)
        .arg("upgrade")
        .assert()
        .success()
        .stdout(predicate::str::contains("already at v0.3.0"));
}

// ---------------------------------------------------------------------------
// agentkit advance / phase / doc
// ---------------------------------------------------------------------------

#[test]
fn advance_moves_to_next_phase() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    agentkit(&dir)
        .arg("advance")
        .assert()
        .success()
        .stdout(predicate::str::contains("constitution → specify"));

    let state = read_state(&dir);
    assert_eq!(state["current_phase"].as_str(), Some("specify"));
    assert!(!state["phases"]["specify"]["started_at"].is_null());
}

#[test]
fn phase_set_walks_workflow() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    agentkit(&dir)
        .args(["phase", "set", "constitution", "completed"])
        .assert()
        .success();
    agentkit(&dir)
        .args([
            "phase",
            "set",
            "specify",
            "completed",
            "--questions-total",
            "10",
            "--questions-answered",
            "10",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Current phase: plan"));

    let state = read_state(&dir);
    assert_eq!(state["current_phase"].as_str(), Some("plan"));
    assert_eq!(phase_status(&state, "constitution"), "completed");
    assert_eq!(phase_status(&state, "specify"), "completed");
    assert!(!state["phases"]["specify"]["completed_at"].is_null());
    assert_eq!(state["phases"]["specify"]["questions_total"].as_u64(), Some(10));
}

#[test]
fn phase_set_rejects_unknown_phase() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    let before = std::fs::read_to_string(dir.path().join(".agentkit/workflow-state.yaml")).unwrap();

    agentkit(&dir)
        .args(["phase", "set", "research", "completed"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid phase: research"));

    let after = std::fs::read_to_string(dir.path().join(".agentkit/workflow-state.yaml")).unwrap();
    assert_eq!(before, after);
}

#[test]
fn phase_set_rejects_unknown_status() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    agentkit(&dir)
        .args(["phase", "set", "plan", "done"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid phase status"));
}

#[test]
fn phase_show_json() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);
    agentkit(&dir)
        .args(["phase", "set", "implement", "in_progress", "--tasks-total", "8", "--note", "kickoff"])
        .assert()
        .success();

    let output = agentkit(&dir)
        .args(["phase", "show", "implement", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["status"], "in_progress");
    assert_eq!(json["tasks_total"], 8);
    assert_eq!(json["notes"][0], "kickoff");
}

#[test]
fn doc_read_records_once() {
    let dir = TempDir::new().unwrap();
    init_project(&dir);

    agentkit(&dir).args(["doc", "read", "constitution"]).assert().success();
    agentkit(&dir)
        .args(["doc", "read", "constitution"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Docs read this session: constitution"));

    let state = read_state(&dir);
    assert_eq!(state["session"]["docs_read"].as_sequence().unwrap().len(), 1);
}

// ---------------------------------------------------------------------------
// agentkit upgrade
// ---------------------------------------------------------------------------

#[test]
fn upgrade_requires_project() {
    let dir = TempDir::new().unwrap();
    agentkit(&dir)
        .arg("upgrade")
        .assert()
        .failure()
        .stderr(predicate::str::contains("not an agentkit project"));
}

#[test]
fn upgrade_legacy_project() {
    let dir = TempDir::new().unwrap();
    std::fs::create_dir_all(dir.path().join(".agentkit/memory")).unwrap();
    touch(&dir, &["constitution.md", "spec.md", "plan.md"]);

    agentkit(&dir)
        .arg("upgrade")
        .assert()
        .success()
        .stdout(predicate::str::contains("v0.2.0 → v0.3.0"));

    assert!(dir.path().join(".agentkit/phases").is_dir());
    let state = read_state(&dir);
    assert_eq!(state["current_phase"].as_str(), Some("task"));

    agentkit(&dir)
        .arg("upgrade")
        .assert()
        .success()
        .stdout(predicate::str::contains("already at v0.3.0"));
}
