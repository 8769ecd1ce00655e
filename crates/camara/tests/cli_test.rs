//! Integration tests for the `camara` CLI binary.
//!
//! These tests validate argument parsing, help output, shell completions,
//! config handling and error exit codes. API calls go to a wiremock server.
#![allow(clippy::unwrap_used)]

use std::path::Path;

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `camara` binary with env isolation.
///
/// Clears all `CAMARA_*` env vars and points the config file at
/// `config_path` so tests never touch the user's real configuration.
fn camara_cmd(config_path: &Path) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("camara");
    cmd.env("CAMARA_CONFIG", config_path)
        .env_remove("CAMARA_PROFILE")
        .env_remove("CAMARA_BASE_URL")
        .env_remove("CAMARA_TOKEN")
        .env_remove("CAMARA_OUTPUT")
        .env_remove("CAMARA_INSECURE")
        .env_remove("CAMARA_TIMEOUT")
        .env_remove("RUST_LOG");
    cmd
}

fn config_dir() -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    (dir, path)
}

/// Run a command off the async runtime so the mock server keeps serving.
async fn run(mut cmd: assert_cmd::Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().unwrap())
        .await
        .unwrap()
}

/// Concatenate stdout + stderr from a command output for flexible matching.
fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_no_args_shows_help() {
    let (_dir, cfg) = config_dir();
    let output = camara_cmd(&cfg).output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected exit code 2");
    let text = combined_output(&output);
    assert!(text.contains("Usage"), "Expected 'Usage' in output:\n{text}");
}

#[test]
fn test_help_flag() {
    let (_dir, cfg) = config_dir();
    camara_cmd(&cfg).arg("--help").assert().success().stdout(
        predicate::str::contains("CAMARA")
            .and(predicate::str::contains("sim-swap"))
            .and(predicate::str::contains("qod"))
            .and(predicate::str::contains("subscriptions")),
    );
}

#[test]
fn test_version_flag() {
    let (_dir, cfg) = config_dir();
    camara_cmd(&cfg)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("camara"));
}

// ── Shell completions ───────────────────────────────────────────────

#[test]
fn test_completions_bash() {
    let (_dir, cfg) = config_dir();
    camara_cmd(&cfg)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty().not());
}

#[test]
fn test_completions_zsh() {
    let (_dir, cfg) = config_dir();
    camara_cmd(&cfg)
        .args(["completions", "zsh"])
        .assert()
        .success()
        .stdout(predicate::str::contains("#compdef"));
}

// ── Error cases ─────────────────────────────────────────────────────

#[test]
fn test_invalid_subcommand() {
    let (_dir, cfg) = config_dir();
    let output = camara_cmd(&cfg).arg("foobar").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
    let text = combined_output(&output);
    assert!(
        text.contains("unrecognized") || text.contains("foobar"),
        "Expected error mentioning invalid subcommand:\n{text}"
    );
}

#[test]
fn test_missing_config_exits_with_config_code() {
    let (_dir, cfg) = config_dir();
    camara_cmd(&cfg)
        .args(["sim-swap", "check", "--phone", "+34600000000"])
        .assert()
        .code(8)
        .stderr(predicate::str::contains("No API base URL configured"));
}

#[test]
fn test_base_url_without_token_is_an_auth_error() {
    let (_dir, cfg) = config_dir();
    camara_cmd(&cfg)
        .args(["--base-url", "http://127.0.0.1:9", "sim-swap", "check"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("No credentials"));
}

#[test]
fn test_unknown_profile() {
    let (_dir, cfg) = config_dir();
    camara_cmd(&cfg)
        .args(["--profile", "prod", "qos-profiles", "list"])
        .assert()
        .code(8)
        .stderr(predicate::str::contains("prod"));
}

#[test]
fn test_malformed_config_is_reported() {
    let (_dir, cfg) = config_dir();
    std::fs::write(&cfg, "default_profile = [\n").unwrap();
    camara_cmd(&cfg)
        .args(["--token", "t", "qos-profiles", "list"])
        .assert()
        .code(8)
        .stderr(predicate::str::contains("config loading failed"));
}

#[test]
fn test_otp_message_without_placeholder_is_rejected_locally() {
    let (_dir, cfg) = config_dir();
    camara_cmd(&cfg)
        .args([
            "--base-url",
            "http://127.0.0.1:9",
            "--token",
            "t",
            "otp",
            "send",
            "--phone",
            "+34600000000",
            "--message",
            "your code",
        ])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("{{code}}"));
}

#[test]
fn test_unreachable_server_is_a_connection_error() {
    let (_dir, cfg) = config_dir();
    camara_cmd(&cfg)
        .args([
            "--base-url",
            "http://127.0.0.1:9",
            "--token",
            "t",
            "--timeout",
            "2",
            "qod",
            "get",
            "abc",
        ])
        .assert()
        .code(7);
}

// ── Config ──────────────────────────────────────────────────────────

#[test]
fn test_config_init_profiles_and_show() {
    let (_dir, cfg) = config_dir();
    camara_cmd(&cfg)
        .args([
            "config",
            "init",
            "--name",
            "sandbox",
            "--url",
            "https://sandbox.example.com/camara",
        ])
        .assert()
        .success();
    assert!(cfg.exists());

    camara_cmd(&cfg)
        .args(["config", "profiles"])
        .assert()
        .success()
        .stdout(predicate::str::contains("sandbox *"));

    camara_cmd(&cfg)
        .args(["config", "set", "timeout", "5"])
        .assert()
        .success();

    camara_cmd(&cfg)
        .args(["config", "show", "-o", "json-compact"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains(r#""default_profile":"sandbox""#)
                .and(predicate::str::contains(r#""timeout":5"#)),
        );
}

#[test]
fn test_config_init_rejects_bad_url() {
    let (_dir, cfg) = config_dir();
    camara_cmd(&cfg)
        .args(["config", "init", "--url", "ftp://example.com"])
        .assert()
        .code(2);
    assert!(!cfg.exists());
}

// ── API calls ───────────────────────────────────────────────────────

#[tokio::test(flavor = "multi_thread")]
async fn test_sim_swap_check_prints_json() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/camara/sim-swap/v1/check"))
        .and(header("authorization", "Bearer test-token"))
        .and(header("x-correlator", "run-42"))
        .and(body_json(json!({ "phoneNumber": "+34600000000", "maxAge": 120 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "swapped": true })))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, cfg) = config_dir();
    let mut cmd = camara_cmd(&cfg);
    cmd.args([
        "--base-url",
        &format!("{}/camara", server.uri()),
        "--token",
        "test-token",
        "--correlator",
        "run-42",
        "-o",
        "json-compact",
        "sim-swap",
        "check",
        "--phone",
        "+34600000000",
        "--max-age",
        "120",
    ]);

    let output = run(cmd).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        r#"{"swapped":true}"#
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_profile_from_config_file_is_used() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/camara/qos-profiles/v1/retrieve-qos-profiles"))
        .and(body_json(json!({ "status": "ACTIVE" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "QOS_E", "status": "ACTIVE" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, cfg) = config_dir();
    std::fs::write(
        &cfg,
        format!(
            "default_profile = \"mock\"\n\n[profiles.mock]\nbase_url = \"{}/camara\"\n",
            server.uri()
        ),
    )
    .unwrap();

    let mut cmd = camara_cmd(&cfg);
    cmd.args(["--token", "t", "-o", "yaml", "qos-profiles", "list", "--status", "active"]);

    let output = run(cmd).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("name: QOS_E"), "{stdout}");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_api_not_found_exit_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/quality-on-demand/v1/sessions/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "status": 404,
            "code": "NOT_FOUND",
            "message": "The specified resource is not found."
        })))
        .mount(&server)
        .await;

    let (_dir, cfg) = config_dir();
    let mut cmd = camara_cmd(&cfg);
    cmd.args([
        "--base-url",
        &server.uri(),
        "--token",
        "t",
        "qod",
        "get",
        "missing",
    ]);

    let output = run(cmd).await;
    assert_eq!(output.status.code(), Some(4), "{}", combined_output(&output));
    assert!(combined_output(&output).contains("The specified resource is not found."));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_delete_reports_on_stderr() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/quality-on-demand/v1/sessions/s-1"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    let (_dir, cfg) = config_dir();
    let mut cmd = camara_cmd(&cfg);
    cmd.args([
        "--base-url",
        &server.uri(),
        "--token",
        "t",
        "qod",
        "delete",
        "s-1",
    ]);

    let output = run(cmd).await;
    assert!(output.status.success(), "{}", combined_output(&output));
    assert!(output.stdout.is_empty());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Session s-1 deleted"));
}
