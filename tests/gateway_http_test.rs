//! Wire-level tests for `HttpGateway` against a mock chatbot server.

mod common;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use chatwidget::gateway::{ChatGateway, HistoryEntry};

use common::gateway_for;

#[tokio::test]
async fn test_send_chat_message_posts_message_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .and(body_json(json!({ "message": "Hello" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "Hi there!",
            "username": "Ann"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = gateway_for(&server)
        .send_chat_message("Hello")
        .await
        .unwrap();

    assert_eq!(reply.response.as_deref(), Some("Hi there!"));
    assert_eq!(reply.username.as_deref(), Some("Ann"));
    assert!(reply.error.is_none());
}

#[tokio::test]
async fn test_chat_error_field_is_returned_not_raised() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "Please enter a message",
            "response": "I didn't catch that."
        })))
        .mount(&server)
        .await;

    let reply = gateway_for(&server).send_chat_message(" ").await.unwrap();

    assert_eq!(reply.error.as_deref(), Some("Please enter a message"));
}

#[tokio::test]
async fn test_non_success_status_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let err = gateway_for(&server)
        .send_chat_message("Hello")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_unparseable_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    assert!(gateway_for(&server).fetch_history().await.is_err());
}

#[tokio::test]
async fn test_quick_action_posts_action_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/quick_actions"))
        .and(body_json(json!({ "action": "joke" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "response": "Why did the robot go on vacation?"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let reply = gateway_for(&server).send_quick_action("joke").await.unwrap();

    assert_eq!(reply.response, "Why did the robot go on vacation?");
}

#[tokio::test]
async fn test_fetch_history_reads_turns_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "history": [
                { "user": "a", "bot": "b", "timestamp": "10:00", "time": "2024-01-01T10:00:00" },
                { "user": "c", "bot": "d", "timestamp": "10:01", "time": "2024-01-01T10:01:00" }
            ]
        })))
        .mount(&server)
        .await;

    let reply = gateway_for(&server).fetch_history().await.unwrap();

    let mut first = HistoryEntry::new("a", "b");
    first.timestamp = Some("10:00".to_string());
    assert_eq!(reply.history.len(), 2);
    assert_eq!(reply.history[0], first);
    assert_eq!(reply.history[1].user, "c");
}

#[tokio::test]
async fn test_clear_history_reports_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/clear"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/clear"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    assert!(gateway.clear_history().await.unwrap());
    assert!(!gateway.clear_history().await.unwrap());
}

#[tokio::test]
async fn test_update_username_success_and_rejection() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/update_username"))
        .and(body_json(json!({ "username": "Ann" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "username": "Ann",
            "response": "Nice to meet you, Ann!"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/update_username"))
        .and(body_json(json!({ "username": "x" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": "Username too short"
        })))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);

    let ok = gateway.update_username("Ann").await.unwrap();
    assert!(ok.success);
    assert_eq!(ok.response.as_deref(), Some("Nice to meet you, Ann!"));

    let rejected = gateway.update_username("x").await.unwrap();
    assert!(!rejected.success);
    assert_eq!(rejected.error.as_deref(), Some("Username too short"));
}

#[tokio::test]
async fn test_update_username_reads_error_body_on_client_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/update_username"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "error": "Name too long"
        })))
        .mount(&server)
        .await;

    let reply = gateway_for(&server)
        .update_username("Ann")
        .await
        .unwrap();

    assert!(!reply.success);
    assert_eq!(reply.error.as_deref(), Some("Name too long"));
}

#[tokio::test]
async fn test_update_username_without_json_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/update_username"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    let err = gateway_for(&server)
        .update_username("Ann")
        .await
        .unwrap_err();

    assert!(err.to_string().contains("502"));
}

#[tokio::test]
async fn test_fetch_stats_and_search() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "total_conversations": 4,
            "user_messages": 4,
            "username": "Ann",
            "since": "2024-01-01T09:00:00"
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/search"))
        .and(body_json(json!({ "topic": "python" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "response": "Python is a programming language."
        })))
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);

    let stats = gateway.fetch_stats().await.unwrap();
    assert_eq!(stats.total_conversations, 4);
    assert_eq!(stats.username.as_deref(), Some("Ann"));

    let found = gateway.search_topic("python").await.unwrap();
    assert!(found.success);
    assert_eq!(
        found.response.as_deref(),
        Some("Python is a programming language.")
    );
}

#[tokio::test]
async fn test_session_cookie_is_replayed() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("set-cookie", "session=abc123; Path=/")
                .set_body_string("<html></html>"),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .and(header("cookie", "session=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "history": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway_for(&server);
    gateway.open_session().await.unwrap();
    let reply = gateway.fetch_history().await.unwrap();

    assert!(reply.history.is_empty());
}

#[tokio::test]
async fn test_unreachable_server_is_an_error() {
    let server = MockServer::start().await;
    let gateway = gateway_for(&server);
    drop(server);

    assert!(gateway.open_session().await.is_err());
    assert!(gateway.send_chat_message("Hello").await.is_err());
}
