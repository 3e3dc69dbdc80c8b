//! Binary-level tests for the chatwidget CLI.

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

use common::{mount_fresh_session, temp_config_file};

fn chatwidget() -> Command {
    let mut cmd = Command::cargo_bin("chatwidget").unwrap();
    cmd.env_remove("CHATWIDGET_SERVER_URL")
        .env_remove("CHATWIDGET_TIMEOUT_SECONDS")
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_help_lists_commands() {
    chatwidget()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("chat"))
        .stdout(predicate::str::contains("send"))
        .stdout(predicate::str::contains("quick"));
}

#[test]
fn test_invalid_server_url_is_rejected() {
    let (_dir, config_path) = temp_config_file("server:\n  base_url: \"ftp://example.com\"\n");

    chatwidget()
        .arg("--config")
        .arg(&config_path)
        .args(["send", "hello"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("http or https"));
}

#[test]
fn test_malformed_config_is_rejected() {
    let (_dir, config_path) = temp_config_file("server: [not, a, mapping\n");

    chatwidget()
        .arg("--config")
        .arg(&config_path)
        .arg("stats")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to parse config"));
}

#[test]
fn test_send_to_unreachable_server_fails_with_fallback() {
    let (_dir, config_path) =
        temp_config_file("server:\n  base_url: \"http://127.0.0.1:1\"\n  timeout_seconds: 2\n");

    chatwidget()
        .arg("--config")
        .arg(&config_path)
        .args(["--no-color", "send", "hello"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "Sorry, I encountered an error. Please try again.",
        ));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_send_prints_exchange() {
    let server = MockServer::start().await;
    mount_fresh_session(&server).await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({ "message": "hello" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "**Hi** there"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        chatwidget()
            .args(["--server", &uri, "--no-color", "send", "hello"])
            .assert()
            .success()
            .stdout(predicate::str::contains("  hello"))
            .stdout(predicate::str::contains("  Hi there"));
    })
    .await
    .unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_stats_json_output_parseable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_conversations": 3,
            "user_messages": 3,
            "username": "Ann",
            "since": "2024-01-01T09:00:00"
        })))
        .mount(&server)
        .await;

    let uri = server.uri();
    let output = tokio::task::spawn_blocking(move || {
        chatwidget()
            .args(["--server", &uri, "stats", "--json"])
            .output()
            .unwrap()
    })
    .await
    .unwrap();

    assert!(output.status.success());
    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["total_conversations"], 3);
    assert_eq!(parsed["username"], "Ann");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_quick_rejects_failed_action() {
    let server = MockServer::start().await;
    mount_fresh_session(&server).await;
    Mock::given(method("POST"))
        .and(path("/quick_actions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let uri = server.uri();
    tokio::task::spawn_blocking(move || {
        chatwidget()
            .args(["--server", &uri, "quick", "weather"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Quick action failed"));
    })
    .await
    .unwrap();
}
