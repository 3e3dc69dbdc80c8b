//! Remote gateway to the chatbot server
//!
//! Every operation is one HTTP round trip with a JSON body. There are no
//! retries and no timeout beyond the HTTP client's configured default.
//!
//! [`ChatGateway`] is the seam the controller talks to. [`HttpGateway`]
//! implements it with `reqwest`; [`fake::FakeGateway`] implements it in
//! memory for tests.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub mod fake;
pub mod http;

pub use fake::FakeGateway;
pub use http::HttpGateway;

/// Page that assigns the server-side session cookie
pub const ENDPOINT_HOME: &str = "";
/// Free-text chat
pub const ENDPOINT_CHAT: &str = "chat";
/// Predefined quick actions
pub const ENDPOINT_QUICK_ACTIONS: &str = "quick_actions";
/// Stored chat history
pub const ENDPOINT_HISTORY: &str = "history";
/// History reset
pub const ENDPOINT_CLEAR: &str = "clear";
/// Username update
pub const ENDPOINT_UPDATE_USERNAME: &str = "update_username";
/// Session statistics
pub const ENDPOINT_STATS: &str = "stats";
/// Direct topic lookup
pub const ENDPOINT_SEARCH: &str = "search";

/// Quick action identifiers the server understands
pub const QUICK_ACTIONS: [&str; 5] = ["time", "date", "joke", "weather", "help"];

/// Body of `POST /chat`
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest<'a> {
    pub message: &'a str,
}

/// Reply of `POST /chat`
///
/// The server may send `error` alongside a `response`; the presence of
/// `error` is what marks the reply as failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ChatReply {
    /// Successful reply carrying `text`
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            response: Some(text.into()),
            ..Self::default()
        }
    }

    /// Application-level failure
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Self::default()
        }
    }

    /// Attach the username the server detected
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }
}

/// Body of `POST /quick_actions`
#[derive(Debug, Clone, Serialize)]
pub struct QuickActionRequest<'a> {
    pub action: &'a str,
}

/// Reply of `POST /quick_actions`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickActionReply {
    pub response: String,
}

/// One stored conversation turn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub user: String,
    pub bot: String,
    /// Server-side `HH:MM` stamp, when the server recorded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl HistoryEntry {
    pub fn new(user: impl Into<String>, bot: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            bot: bot.into(),
            timestamp: None,
        }
    }
}

/// Reply of `GET /history`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryReply {
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

/// Body of `POST /update_username`
#[derive(Debug, Clone, Serialize)]
pub struct UsernameRequest<'a> {
    pub username: &'a str,
}

/// Reply of `POST /update_username`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsernameReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Reply of `GET /stats`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsReply {
    #[serde(default)]
    pub total_conversations: usize,
    #[serde(default)]
    pub user_messages: usize,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub since: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Body of `POST /search`
#[derive(Debug, Clone, Serialize)]
pub struct SearchRequest<'a> {
    pub topic: &'a str,
}

/// Reply of `POST /search`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchReply {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Request/response operations offered by the chatbot server
///
/// Implementations report transport problems (connect failure, non-success
/// status, unparseable body) as errors and return application-level
/// failures inside the reply types.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    /// Establish the server-side session
    async fn open_session(&self) -> Result<()>;

    /// Send free text to `/chat`
    async fn send_chat_message(&self, text: &str) -> Result<ChatReply>;

    /// Trigger a predefined quick action
    async fn send_quick_action(&self, action: &str) -> Result<QuickActionReply>;

    /// Fetch the stored conversation
    async fn fetch_history(&self) -> Result<HistoryReply>;

    /// Ask the server to drop the stored conversation
    ///
    /// Returns whether the server answered with a success status.
    async fn clear_history(&self) -> Result<bool>;

    /// Change the username
    async fn update_username(&self, name: &str) -> Result<UsernameReply>;

    /// Fetch session statistics
    async fn fetch_stats(&self) -> Result<StatsReply>;

    /// Look a topic up directly
    async fn search_topic(&self, topic: &str) -> Result<SearchReply>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_chat_reply_with_error_and_response() {
        let reply: ChatReply = serde_json::from_value(json!({
            "error": "Internal server error",
            "response": "Sorry, I encountered an error. Please try again! 😊"
        }))
        .unwrap();
        assert_eq!(reply.error.as_deref(), Some("Internal server error"));
        assert!(reply.response.is_some());
    }

    #[test]
    fn test_chat_reply_null_username() {
        let reply: ChatReply =
            serde_json::from_value(json!({"response": "hi", "username": null})).unwrap();
        assert_eq!(reply, ChatReply::text("hi"));
    }

    #[test]
    fn test_history_entry_ignores_extra_fields() {
        let reply: HistoryReply = serde_json::from_value(json!({
            "history": [{
                "timestamp": "10:15",
                "user": "hi",
                "bot": "hello",
                "time": "2024-01-01 10:15:00"
            }]
        }))
        .unwrap();
        assert_eq!(reply.history.len(), 1);
        assert_eq!(reply.history[0].user, "hi");
        assert_eq!(reply.history[0].timestamp.as_deref(), Some("10:15"));
    }

    #[test]
    fn test_history_missing_field_defaults_empty() {
        let reply: HistoryReply = serde_json::from_value(json!({})).unwrap();
        assert!(reply.history.is_empty());
    }

    #[test]
    fn test_username_reply_failure() {
        let reply: UsernameReply =
            serde_json::from_value(json!({"success": false, "error": "Invalid username"}))
                .unwrap();
        assert!(!reply.success);
        assert_eq!(reply.error.as_deref(), Some("Invalid username"));
    }

    #[test]
    fn test_quick_action_reply_requires_response() {
        assert!(serde_json::from_value::<QuickActionReply>(json!({})).is_err());
    }

    #[test]
    fn test_request_bodies_serialize() {
        assert_eq!(
            serde_json::to_value(ChatRequest { message: "hi" }).unwrap(),
            json!({"message": "hi"})
        );
        assert_eq!(
            serde_json::to_value(QuickActionRequest { action: "joke" }).unwrap(),
            json!({"action": "joke"})
        );
        assert_eq!(
            serde_json::to_value(UsernameRequest { username: "Ann" }).unwrap(),
            json!({"username": "Ann"})
        );
    }
}
