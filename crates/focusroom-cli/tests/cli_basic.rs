//! Basic CLI E2E tests.
//!
//! Tests invoke the built binary against a throwaway data directory and
//! verify outputs.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use chrono::Utc;
use focusroom_core::{Database, Session, SessionStore};

/// Run a CLI command with its data directory pointed at `data_dir`.
fn run_cli(data_dir: &Path, args: &[&str]) -> (i32, String, String) {
    run_cli_with_stdin(data_dir, args, "")
}

fn run_cli_with_stdin(data_dir: &Path, args: &[&str], stdin: &str) -> (i32, String, String) {
    let mut child = Command::new(env!("CARGO_BIN_EXE_focusroom"))
        .args(args)
        .env("FOCUSROOM_DATA_DIR", data_dir)
        .env_remove("RUST_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to execute CLI command");

    child
        .stdin
        .take()
        .expect("stdin is piped")
        .write_all(stdin.as_bytes())
        .expect("Failed to write stdin");

    let output = child.wait_with_output().expect("Failed to wait for CLI");
    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    (output.status.code().unwrap_or(-1), stdout, stderr)
}

fn seed_sessions(data_dir: &Path, sessions: &[Session]) {
    let store = SessionStore::new(Database::open_at(data_dir.join("focusroom.db")).unwrap());
    store.save_all(sessions).unwrap();
}

#[test]
fn test_sessions_list_empty() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["sessions", "list"]);
    assert_eq!(code, 0, "Sessions list failed");
    assert!(stdout.contains("No sessions recorded yet."));
}

#[test]
fn test_sessions_list_json() {
    let dir = tempfile::tempdir().unwrap();
    seed_sessions(
        dir.path(),
        &[
            Session::new("Study", 1500, Utc::now(), 1),
            Session::new("Work", 300, Utc::now(), 0),
        ],
    );
    let (code, stdout, _) = run_cli(dir.path(), &["sessions", "list", "--json", "--limit", "1"]);
    assert_eq!(code, 0, "Sessions list JSON failed");
    let parsed: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    let sessions = parsed.as_array().unwrap();
    assert_eq!(sessions.len(), 1);
    assert_eq!(sessions[0]["category"], "Work");
    assert_eq!(sessions[0]["durationSeconds"], 300);
}

#[test]
fn test_stats_report() {
    let dir = tempfile::tempdir().unwrap();
    seed_sessions(
        dir.path(),
        &[
            Session::new("Exam", 600, Utc::now(), 2),
            Session::new("", 120, Utc::now() - chrono::Duration::days(40), 0),
        ],
    );
    let (code, stdout, _) = run_cli(dir.path(), &["stats", "report"]);
    assert_eq!(code, 0, "Stats report failed");
    let report: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(report["total_seconds"], 720);
    assert_eq!(report["total_distractions"], 2);
    assert_eq!(report["categories"]["Other"], 120);
    assert_eq!(report["last_7_days"].as_array().unwrap().len(), 7);
}

#[test]
fn test_stats_week_without_data() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["stats", "week"]);
    assert_eq!(code, 0, "Stats week failed");
    let series: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(series.as_array().unwrap().len(), 7);
}

#[test]
fn test_config_get_set() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["config", "get", "timer.default_minutes"]);
    assert_eq!(code, 0, "Config get failed");
    assert_eq!(stdout.trim(), "25");

    let (code, _, _) = run_cli(dir.path(), &["config", "set", "timer.default_minutes", "50"]);
    assert_eq!(code, 0, "Config set failed");

    let (_, stdout, _) = run_cli(dir.path(), &["config", "get", "timer.default_minutes"]);
    assert_eq!(stdout.trim(), "50");
}

#[test]
fn test_config_set_rejects_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let (code, _, stderr) = run_cli(dir.path(), &["config", "set", "timer.default_minutes", "120"]);
    assert_ne!(code, 0);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_timer_categories() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli(dir.path(), &["timer", "categories"]);
    assert_eq!(code, 0, "Timer categories failed");
    assert!(stdout.contains("Study"));
    assert!(stdout.contains("Personal"));
}

#[test]
fn test_timer_run_quit_immediately_records_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli_with_stdin(
        dir.path(),
        &["timer", "run", "--minutes", "1", "--category", "exam"],
        "q\n",
    );
    assert_eq!(code, 0, "Timer run failed");
    assert!(stdout.contains("Started Exam focus at 01:00"));

    let (_, stdout, _) = run_cli(dir.path(), &["sessions", "list", "--json"]);
    let sessions: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert!(sessions.as_array().unwrap().is_empty());
}

#[test]
fn test_timer_run_status_prints_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let (code, stdout, _) = run_cli_with_stdin(
        dir.path(),
        &["timer", "run", "--minutes", "1"],
        "t\nq\n",
    );
    assert_eq!(code, 0, "Timer run failed");
    assert!(stdout.contains("Running: Study"));
    assert!(stdout.contains("left of 1 min (distractions: 0)"));
}
