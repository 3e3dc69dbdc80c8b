use std::fs;
use std::path::PathBuf;

use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use chatwidget::config::ServerConfig;
use chatwidget::gateway::HttpGateway;

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// Gateway pointed at a mock server
#[allow(dead_code)]
pub fn gateway_for(server: &MockServer) -> HttpGateway {
    let config = ServerConfig {
        base_url: server.uri(),
        timeout_seconds: 5,
    };
    HttpGateway::new(&config).expect("failed to build gateway")
}

/// Mount the endpoints a fresh session touches on startup
#[allow(dead_code)]
pub async fn mount_fresh_session(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_conversations": 0,
            "user_messages": 0,
            "username": null,
            "since": "Unknown"
        })))
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "history": [] })))
        .mount(server)
        .await;
}
