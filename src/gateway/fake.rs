//! In-process fake gateway for unit and integration tests
//!
//! [`FakeGateway`] replays scripted replies per endpoint and records every
//! call it receives, so tests can drive the controller without a server.
//!
//! Scripted entries are `Ok(reply)` or `Err(message)`; an `Err` is reported
//! as a transport failure. When an endpoint's script runs dry, `open_session`
//! succeeds, `fetch_history` and `fetch_stats` return empty replies and the
//! remaining operations fail.
//!
//! # Example
//!
//! ```
//! use chatwidget::gateway::fake::{FakeGateway, GatewayCall};
//! use chatwidget::gateway::{ChatGateway, ChatReply};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let gateway = FakeGateway::new().with_chat(Ok(ChatReply::text("hello")));
//!
//! let reply = gateway.send_chat_message("hi").await.unwrap();
//! assert_eq!(reply.response.as_deref(), Some("hello"));
//! assert_eq!(gateway.calls().await, vec![GatewayCall::Chat("hi".to_string())]);
//! # }
//! ```

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{ChatWidgetError, Result};
use crate::gateway::{
    ChatGateway, ChatReply, HistoryReply, QuickActionReply, SearchReply, StatsReply,
    UsernameReply,
};

/// Scripted outcome for one call
pub type Scripted<T> = std::result::Result<T, String>;

/// A call observed by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    OpenSession,
    Chat(String),
    QuickAction(String),
    History,
    Clear,
    UpdateUsername(String),
    Stats,
    Search(String),
}

/// Scripted in-memory [`ChatGateway`]
#[derive(Debug, Default)]
pub struct FakeGateway {
    calls: Mutex<Vec<GatewayCall>>,
    open_session: Mutex<VecDeque<Scripted<()>>>,
    chat: Mutex<VecDeque<Scripted<ChatReply>>>,
    quick_actions: Mutex<VecDeque<Scripted<QuickActionReply>>>,
    history: Mutex<VecDeque<Scripted<HistoryReply>>>,
    clear: Mutex<VecDeque<Scripted<bool>>>,
    update_username: Mutex<VecDeque<Scripted<UsernameReply>>>,
    stats: Mutex<VecDeque<Scripted<StatsReply>>>,
    search: Mutex<VecDeque<Scripted<SearchReply>>>,
}

impl FakeGateway {
    /// Create a fake with empty scripts
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_open_session(mut self, outcome: Scripted<()>) -> Self {
        self.open_session.get_mut().push_back(outcome);
        self
    }

    pub fn with_chat(mut self, outcome: Scripted<ChatReply>) -> Self {
        self.chat.get_mut().push_back(outcome);
        self
    }

    pub fn with_quick_action(mut self, outcome: Scripted<QuickActionReply>) -> Self {
        self.quick_actions.get_mut().push_back(outcome);
        self
    }

    pub fn with_history(mut self, outcome: Scripted<HistoryReply>) -> Self {
        self.history.get_mut().push_back(outcome);
        self
    }

    pub fn with_clear(mut self, outcome: Scripted<bool>) -> Self {
        self.clear.get_mut().push_back(outcome);
        self
    }

    pub fn with_update_username(mut self, outcome: Scripted<UsernameReply>) -> Self {
        self.update_username.get_mut().push_back(outcome);
        self
    }

    pub fn with_stats(mut self, outcome: Scripted<StatsReply>) -> Self {
        self.stats.get_mut().push_back(outcome);
        self
    }

    pub fn with_search(mut self, outcome: Scripted<SearchReply>) -> Self {
        self.search.get_mut().push_back(outcome);
        self
    }

    /// Every call received so far, in order
    pub async fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().await.clone()
    }

    async fn record(&self, call: GatewayCall) {
        self.calls.lock().await.push(call);
    }
}

async fn next<T>(script: &Mutex<VecDeque<Scripted<T>>>, endpoint: &str) -> Option<Result<T>> {
    let outcome = script.lock().await.pop_front()?;
    Some(outcome.map_err(|message| {
        anyhow::Error::from(ChatWidgetError::Transport(format!(
            "/{}: {}",
            endpoint, message
        )))
    }))
}

fn exhausted<T>(endpoint: &str) -> Result<T> {
    Err(ChatWidgetError::Transport(format!("no scripted reply for /{}", endpoint)).into())
}

#[async_trait]
impl ChatGateway for FakeGateway {
    async fn open_session(&self) -> Result<()> {
        self.record(GatewayCall::OpenSession).await;
        next(&self.open_session, "").await.unwrap_or(Ok(()))
    }

    async fn send_chat_message(&self, text: &str) -> Result<ChatReply> {
        self.record(GatewayCall::Chat(text.to_string())).await;
        next(&self.chat, "chat")
            .await
            .unwrap_or_else(|| exhausted("chat"))
    }

    async fn send_quick_action(&self, action: &str) -> Result<QuickActionReply> {
        self.record(GatewayCall::QuickAction(action.to_string()))
            .await;
        next(&self.quick_actions, "quick_actions")
            .await
            .unwrap_or_else(|| exhausted("quick_actions"))
    }

    async fn fetch_history(&self) -> Result<HistoryReply> {
        self.record(GatewayCall::History).await;
        next(&self.history, "history")
            .await
            .unwrap_or_else(|| Ok(HistoryReply::default()))
    }

    async fn clear_history(&self) -> Result<bool> {
        self.record(GatewayCall::Clear).await;
        next(&self.clear, "clear")
            .await
            .unwrap_or_else(|| exhausted("clear"))
    }

    async fn update_username(&self, name: &str) -> Result<UsernameReply> {
        self.record(GatewayCall::UpdateUsername(name.to_string()))
            .await;
        next(&self.update_username, "update_username")
            .await
            .unwrap_or_else(|| exhausted("update_username"))
    }

    async fn fetch_stats(&self) -> Result<StatsReply> {
        self.record(GatewayCall::Stats).await;
        next(&self.stats, "stats")
            .await
            .unwrap_or_else(|| Ok(StatsReply::default()))
    }

    async fn search_topic(&self, topic: &str) -> Result<SearchReply> {
        self.record(GatewayCall::Search(topic.to_string())).await;
        next(&self.search, "search")
            .await
            .unwrap_or_else(|| exhausted("search"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_scripted_replies_are_consumed_in_order() {
        let gateway = FakeGateway::new()
            .with_chat(Ok(ChatReply::text("one")))
            .with_chat(Ok(ChatReply::text("two")));

        let first = gateway.send_chat_message("a").await.unwrap();
        let second = gateway.send_chat_message("b").await.unwrap();
        assert_eq!(first.response.as_deref(), Some("one"));
        assert_eq!(second.response.as_deref(), Some("two"));
        assert!(gateway.send_chat_message("c").await.is_err());
    }

    #[tokio::test]
    async fn test_scripted_error_is_transport_failure() {
        let gateway = FakeGateway::new().with_clear(Err("connection reset".to_string()));
        let err = gateway.clear_history().await.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ChatWidgetError>(),
            Some(ChatWidgetError::Transport(_))
        ));
    }

    #[tokio::test]
    async fn test_defaults_when_unscripted() {
        let gateway = FakeGateway::new();
        assert!(gateway.open_session().await.is_ok());
        assert!(gateway.fetch_history().await.unwrap().history.is_empty());
        assert_eq!(gateway.fetch_stats().await.unwrap(), StatsReply::default());
        assert!(gateway.update_username("x").await.is_err());
    }

    #[tokio::test]
    async fn test_calls_are_recorded() {
        let gateway = FakeGateway::new();
        let _ = gateway.send_quick_action("joke").await;
        let _ = gateway.fetch_history().await;
        assert_eq!(
            gateway.calls().await,
            vec![
                GatewayCall::QuickAction("joke".to_string()),
                GatewayCall::History
            ]
        );
    }
}
