//! Integration tests for the `steelssh` binary.
//!
//! These cover argument parsing, help output, completions, config
//! commands, and error reporting, all without a live realm.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a command for the `steelssh` binary with env isolation.
///
/// Clears all `STEELSSH_*` env vars and points config directories at a
/// nonexistent path so tests never touch the user's real configuration.
fn steelssh_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("steelssh");
    cmd.env("HOME", "/tmp/steelssh-cli-test-nonexistent")
        .env("XDG_CONFIG_HOME", "/tmp/steelssh-cli-test-nonexistent")
        .env_remove("STEELSSH_CONFIG")
        .env_remove("STEELSSH_REALM")
        .env_remove("STEELSSH_USERNAME")
        .env_remove("STEELSSH_PASSWORD")
        .env_remove("STEELSSH_TIMEOUT")
        .env_remove("STEELSSH_OUTPUT")
        .env_remove("RUST_LOG");
    cmd
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    steelssh_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("SteelConnect")
            .and(predicate::str::contains("connect"))
            .and(predicate::str::contains("list"))
            .and(predicate::str::contains("--realm")),
    );
}

#[test]
fn test_version_flag() {
    steelssh_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("steelssh"));
}

#[test]
fn test_invalid_subcommand() {
    let output = steelssh_cmd().arg("foobar").output().unwrap();
    assert!(
        !output.status.success(),
        "Expected failure for invalid subcommand"
    );
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_invalid_output_format() {
    let output = steelssh_cmd()
        .args(["list", "-o", "xml"])
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert!(combined_output(&output).contains("xml"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    steelssh_cmd()
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    steelssh_cmd()
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Config commands ─────────────────────────────────────────────────

#[test]
fn test_config_path_honours_override() {
    steelssh_cmd()
        .args(["config", "path", "--config", "/tmp/steelssh-elsewhere/config.toml"])
        .assert()
        .success()
        .stdout(predicate::str::contains("/tmp/steelssh-elsewhere/config.toml"));
}

#[test]
fn test_config_path_default_location() {
    steelssh_cmd()
        .args(["config", "path"])
        .assert()
        .success()
        .stdout(predicate::str::contains("config.toml"));
}

#[test]
fn test_config_show_redacts_password() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        "realm = \"acme.riverbed.cc\"\nusername = \"ops\"\npassword = \"hunter2\"\n",
    )
    .unwrap();

    steelssh_cmd()
        .args(["config", "show", "--config"])
        .arg(&path)
        .assert()
        .success()
        .stdout(
            predicate::str::contains("realm = \"acme.riverbed.cc\"")
                .and(predicate::str::contains("****"))
                .and(predicate::str::contains("hunter2").not()),
        );
}

// ── Error reporting ─────────────────────────────────────────────────

#[test]
fn test_list_unreachable_realm_exits_zero_with_message() {
    steelssh_cmd()
        .args(["list", "--realm", "127.0.0.1:9", "--username", "ops", "--timeout", "5"])
        .env("STEELSSH_PASSWORD", "secret")
        .assert()
        .success()
        .stderr(predicate::str::contains(
            "can't connect to SCM at 127.0.0.1:9. Please verify the config file or network connectivity.",
        ));
}

#[test]
fn test_verbose_error_shows_diagnostic_code() {
    let output = steelssh_cmd()
        .args(["list", "-v", "--realm", "127.0.0.1:9", "--username", "ops", "--timeout", "5"])
        .env("STEELSSH_PASSWORD", "secret")
        .output()
        .unwrap();

    assert!(output.status.success());
    let text = combined_output(&output);
    assert!(
        text.contains("steelssh::connection_failed"),
        "Expected diagnostic code in output:\n{text}"
    );
}

#[test]
fn test_invalid_realm_is_reported() {
    steelssh_cmd()
        .args(["list", "--realm", "https://acme.riverbed.cc/some/path", "--username", "ops"])
        .env("STEELSSH_PASSWORD", "secret")
        .assert()
        .success()
        .stderr(predicate::str::contains("Invalid value for realm"));
}
