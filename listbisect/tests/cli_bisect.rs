//! CLI tests for `listbisect`.
//!
//! Spawns the binary once per command, as a user would, and verifies output
//! and exit codes across invocations sharing one state file.

use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use listbisect::exit_codes;
use listbisect::test_support::TestWorkspace;

const VERSIONS: &[&str] = &[
    "4.3.8", "4.3.7", "4.3.6", "4.3.5", "4.3.4", "4.3.3", "4.3.1", "4.3.0", "4.2.1", "4.2.0",
    "4.1.1", "4.1.0", "4.0.1", "4.0.0", "3.12.6", "3.12.5",
];

fn listbisect(workspace: &TestWorkspace, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_listbisect"))
        .current_dir(workspace.path())
        .arg("--file")
        .arg(workspace.source_path())
        .args(args)
        .output()
        .expect("run listbisect")
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn mark(workspace: &TestWorkspace, command: &str, line: &str) {
    let output = listbisect(workspace, &[command, "--line", line]);
    assert_eq!(
        output.status.code(),
        Some(exit_codes::OK),
        "{command} {line}: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn next_line(workspace: &TestWorkspace) -> String {
    let output = listbisect(workspace, &["next-line"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    stdout(&output).trim().to_string()
}

/// Replays a full session across separate invocations down to the verdict.
#[test]
fn session_across_invocations_finds_first_bad_version() {
    let workspace = TestWorkspace::with_lines(VERSIONS).expect("workspace");

    mark(&workspace, "mark-good", "4.3.8");
    mark(&workspace, "mark-bad", "3.12.5");
    assert_eq!(next_line(&workspace), "4.3.0");
    mark(&workspace, "mark-bad", "4.3.0");
    assert_eq!(next_line(&workspace), "4.3.5");
    mark(&workspace, "mark-good", "4.3.5");
    assert_eq!(next_line(&workspace), "4.3.3");
    mark(&workspace, "mark-bad", "4.3.3");
    assert_eq!(next_line(&workspace), "4.3.4");
    mark(&workspace, "mark-bad", "4.3.4");

    let output = listbisect(&workspace, &["next-line"]);
    assert_eq!(output.status.code(), Some(exit_codes::COMPLETE));
    let text = stdout(&output);
    let mut lines = text.lines();
    assert_eq!(
        lines.next(),
        Some("Bisect complete, first bad version is: 4.3.4")
    );
    assert_eq!(lines.next(), Some("Bisect Summary:"));
    let summary: Vec<&str> = lines.collect();
    assert_eq!(summary.len(), VERSIONS.len());
    assert_eq!(summary[0], "4.3.8 good");
    assert_eq!(summary[1], "4.3.7");
    assert_eq!(summary[4], "4.3.4 bad");
    assert_eq!(summary[15], "3.12.5 bad");
}

#[test]
fn next_line_without_markings_fails() {
    let workspace = TestWorkspace::with_lines(VERSIONS).expect("workspace");
    mark(&workspace, "mark-good", "4.3.8");

    let output = listbisect(&workspace, &["next-line"]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("at least one good and one bad"), "{stderr}");
}

#[test]
fn mark_unknown_line_fails_with_label() {
    let workspace = TestWorkspace::with_lines(VERSIONS).expect("workspace");
    let output = listbisect(&workspace, &["mark-bad", "--line", "9.9.9"]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stderr).contains("9.9.9"));
}

#[test]
fn mark_accepts_padded_line() {
    let workspace = TestWorkspace::with_lines(VERSIONS).expect("workspace");
    mark(&workspace, "mark-bad", " 4.3.0 ");
    let state = workspace.read_state().expect("state");
    assert!(state.contains("\"status\": \"bad\""));
}

#[test]
fn init_is_idempotent() {
    let workspace = TestWorkspace::with_lines(VERSIONS).expect("workspace");
    let first = listbisect(&workspace, &["init"]);
    assert_eq!(stdout(&first), "initialized 16 lines\n");
    mark(&workspace, "mark-good", "4.3.8");
    let before = workspace.read_state().expect("state");

    let second = listbisect(&workspace, &["init"]);
    assert_eq!(stdout(&second), "resumed 16 lines (good: 1, bad: 0)\n");
    assert_eq!(workspace.read_state().expect("state"), before);
}

#[test]
fn missing_source_creates_no_state() {
    let workspace = TestWorkspace::with_lines(VERSIONS).expect("workspace");
    let missing = workspace.path().join("missing.txt");
    let output = Command::new(env!("CARGO_BIN_EXE_listbisect"))
        .current_dir(workspace.path())
        .arg("--file")
        .arg(&missing)
        .arg("init")
        .output()
        .expect("run listbisect");
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(!Path::new(&format!("{}.bisect_state", missing.display())).exists());
}

#[test]
fn corrupt_state_is_left_untouched() {
    let workspace = TestWorkspace::with_lines(VERSIONS).expect("workspace");
    let state_path = workspace.paths().state_path;
    fs::write(&state_path, "[{\"position\": 0}]").expect("write corrupt state");

    let output = listbisect(&workspace, &["mark-good", "--line", "4.3.8"]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    assert!(String::from_utf8_lossy(&output.stderr).contains("corrupt"));
    assert_eq!(
        fs::read_to_string(&state_path).expect("read"),
        "[{\"position\": 0}]"
    );
}

#[test]
fn config_file_changes_state_suffix() {
    let workspace = TestWorkspace::with_lines(VERSIONS).expect("workspace");
    fs::write(
        workspace.path().join(".listbisect.toml"),
        "state_suffix = \"bisect.json\"\n",
    )
    .expect("write config");

    mark(&workspace, "mark-good", "4.3.8");
    let custom = format!("{}.bisect.json", workspace.source_path().display());
    assert!(Path::new(&custom).is_file());
    assert!(!workspace.paths().state_path.exists());
}

#[test]
fn summary_lists_markings_without_probing() {
    let workspace = TestWorkspace::with_lines(&["a", "b", "c"]).expect("workspace");
    mark(&workspace, "mark-bad", "c");
    let output = listbisect(&workspace, &["summary"]);
    assert_eq!(output.status.code(), Some(exit_codes::OK));
    assert_eq!(stdout(&output), "Bisect Summary:\na\nb\nc bad\n");
}

#[test]
fn missing_explicit_config_fails() {
    let workspace = TestWorkspace::with_lines(VERSIONS).expect("workspace");
    let output = listbisect(&workspace, &["--config", "absent.toml", "init"]);
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("config file absent.toml not found"), "{stderr}");
    assert!(!workspace.paths().state_path.exists());
}

#[test]
fn locked_init_with_missing_source_leaves_no_files() {
    let workspace = TestWorkspace::with_lines(VERSIONS).expect("workspace");
    let missing = workspace.path().join("missing.txt");
    let output = Command::new(env!("CARGO_BIN_EXE_listbisect"))
        .current_dir(workspace.path())
        .arg("--file")
        .arg(&missing)
        .args(["--lock", "init"])
        .output()
        .expect("run listbisect");
    assert_eq!(output.status.code(), Some(exit_codes::INVALID));
    let state = format!("{}.bisect_state", missing.display());
    assert!(!Path::new(&state).exists());
    assert!(!Path::new(&format!("{state}.lock")).exists());
}
