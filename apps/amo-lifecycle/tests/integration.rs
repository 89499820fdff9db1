//! Integration tests for the amo-lifecycle CLI

use std::io::Write;
use std::process::Command;

fn lifecycle() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_amo-lifecycle"));
    // Keep the user's config and environment out of the tests
    command
        .env_remove("AMO_OUTPUT")
        .env_remove("AMO_COLOR")
        .env_remove("AMO_EMIT_EVENTS")
        .env("AMO_USAGE_ERRORS", "log");
    command
}

fn action_log(lines: &[&str]) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    for line in lines {
        writeln!(file, "{line}").expect("write action");
    }
    file
}

#[test]
fn test_cli_help() {
    let output = lifecycle().arg("--help").output().expect("run amo-lifecycle");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("replay"));
    assert!(stdout.contains("explain"));
}

#[test]
fn test_explain_known_code() {
    let output = lifecycle()
        .args(["explain", "ERROR_CORRUPT_FILE", "--color", "never"])
        .output()
        .expect("run amo-lifecycle");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Installation aborted because the add-on appears to be corrupt."));
}

#[test]
fn test_replay_json() {
    let log = action_log(&[
        r#"{"type":"INSTALL_STATE","guid":"ext-1","status":"UNINSTALLED"}"#,
        r#"{"type":"START_DOWNLOAD","guid":"ext-1"}"#,
        r#"{"type":"DOWNLOAD_PROGRESS","guid":"ext-1","downloadProgress":42}"#,
        r#"{"type":"INSTALL_COMPLETE","guid":"ext-unknown"}"#,
    ]);

    let output = lifecycle()
        .arg("--json")
        .arg("replay")
        .arg(log.path())
        .output()
        .expect("run amo-lifecycle");

    assert!(output.status.success());
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("replay prints JSON");
    assert_eq!(report["kind"], "replay");
    assert_eq!(report["applied"], 3);
    assert_eq!(report["failures"][0]["line"], 4);
    assert_eq!(report["addons"][0]["status"], "DOWNLOADING");
    assert_eq!(report["addons"][0]["progress"]["value"], 42);
}

#[test]
fn test_replay_missing_file() {
    let output = lifecycle()
        .args(["replay", "/definitely/not/here.jsonl"])
        .output()
        .expect("run amo-lifecycle");

    assert!(!output.status.success());
}

#[test]
fn test_replay_without_home_uses_default_config() {
    let log = action_log(&[r#"{"type":"INSTALL_STATE","guid":"ext-1","status":"INSTALLED"}"#]);

    let output = lifecycle()
        .env_remove("HOME")
        .env_remove("XDG_CONFIG_HOME")
        .arg("--json")
        .arg("replay")
        .arg(log.path())
        .output()
        .expect("run amo-lifecycle");

    assert!(output.status.success());
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("replay prints JSON");
    assert_eq!(report["applied"], 1);
}

#[test]
fn test_replay_late_progress_is_reported_not_fatal() {
    let log = action_log(&[
        r#"{"type":"INSTALL_STATE","guid":"ext-1","status":"UNINSTALLED"}"#,
        r#"{"type":"START_DOWNLOAD","guid":"ext-1"}"#,
        r#"{"type":"INSTALL_COMPLETE","guid":"ext-1"}"#,
        r#"{"type":"DOWNLOAD_PROGRESS","guid":"ext-1","downloadProgress":90}"#,
    ]);

    let output = lifecycle()
        .env("AMO_USAGE_ERRORS", "panic")
        .arg("--json")
        .arg("replay")
        .arg(log.path())
        .output()
        .expect("run amo-lifecycle");

    assert!(output.status.success());
    let report: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("replay prints JSON");
    assert_eq!(report["applied"], 3);
    assert_eq!(report["failures"][0]["line"], 4);
    assert_eq!(report["addons"][0]["status"], "INSTALLED");
}
