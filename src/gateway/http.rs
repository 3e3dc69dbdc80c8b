//! `reqwest`-backed gateway
//!
//! The client keeps a cookie store: the server identifies the user through
//! its session cookie, which is issued by `GET /` and must accompany every
//! later request.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use url::Url;

use crate::config::ServerConfig;
use crate::error::{ChatWidgetError, Result};
use crate::gateway::{
    ChatGateway, ChatReply, ChatRequest, HistoryReply, QuickActionReply, QuickActionRequest,
    SearchReply, SearchRequest, StatsReply, UsernameReply, UsernameRequest, ENDPOINT_CHAT,
    ENDPOINT_CLEAR, ENDPOINT_HISTORY, ENDPOINT_HOME, ENDPOINT_QUICK_ACTIONS, ENDPOINT_SEARCH,
    ENDPOINT_STATS, ENDPOINT_UPDATE_USERNAME,
};

/// HTTP gateway to the chatbot server
///
/// # Examples
///
/// ```
/// use chatwidget::config::ServerConfig;
/// use chatwidget::gateway::HttpGateway;
///
/// let gateway = HttpGateway::new(&ServerConfig::default()).unwrap();
/// assert_eq!(gateway.base_url().as_str(), "http://localhost:5000/");
/// ```
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
}

impl HttpGateway {
    /// Create a gateway for the configured server
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or the HTTP client cannot be
    /// built
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let mut base_url = Url::parse(&config.base_url).map_err(|e| {
            ChatWidgetError::Config(format!("Invalid server URL '{}': {}", config.base_url, e))
        })?;
        // Endpoint paths are joined relative to the base, so it must end in '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .cookie_store(true)
            .user_agent(concat!("chatwidget/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                ChatWidgetError::Transport(format!("Failed to create HTTP client: {}", e))
            })?;

        tracing::info!("Initialized HTTP gateway: base_url={}", base_url);

        Ok(Self { client, base_url })
    }

    /// Base URL endpoint paths are resolved against
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url.join(path).map_err(|e| {
            ChatWidgetError::Config(format!("Invalid endpoint path '{}': {}", path, e)).into()
        })
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!("GET {}", url);
        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("GET /{} failed: {}", path, e);
            ChatWidgetError::Transport(format!("GET /{} failed: {}", path, e))
        })?;
        read_json(response, path).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("POST /{} failed: {}", path, e);
                ChatWidgetError::Transport(format!("POST /{} failed: {}", path, e))
            })?;
        read_json(response, path).await
    }
}

async fn read_json<T: DeserializeOwned>(response: Response, path: &str) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let error_text = response.text().await.unwrap_or_default();
        tracing::error!("/{} returned {}: {}", path, status, error_text);
        return Err(ChatWidgetError::Transport(format!(
            "/{} returned {}: {}",
            path, status, error_text
        ))
        .into());
    }

    response.json().await.map_err(|e| {
        tracing::error!("Failed to parse /{} response: {}", path, e);
        ChatWidgetError::Transport(format!("Failed to parse /{} response: {}", path, e)).into()
    })
}

#[async_trait]
impl ChatGateway for HttpGateway {
    async fn open_session(&self) -> Result<()> {
        let url = self.endpoint(ENDPOINT_HOME)?;
        let response = self.client.get(url).send().await.map_err(|e| {
            tracing::error!("Opening server session failed: {}", e);
            ChatWidgetError::Transport(format!("Opening server session failed: {}", e))
        })?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChatWidgetError::Transport(format!(
                "Opening server session returned {}",
                status
            ))
            .into());
        }
        tracing::debug!("Server session opened");
        Ok(())
    }

    async fn send_chat_message(&self, text: &str) -> Result<ChatReply> {
        self.post_json(ENDPOINT_CHAT, &ChatRequest { message: text })
            .await
    }

    async fn send_quick_action(&self, action: &str) -> Result<QuickActionReply> {
        self.post_json(ENDPOINT_QUICK_ACTIONS, &QuickActionRequest { action })
            .await
    }

    async fn fetch_history(&self) -> Result<HistoryReply> {
        self.get_json(ENDPOINT_HISTORY).await
    }

    async fn clear_history(&self) -> Result<bool> {
        let url = self.endpoint(ENDPOINT_CLEAR)?;
        let response = self.client.post(url).send().await.map_err(|e| {
            tracing::error!("POST /{} failed: {}", ENDPOINT_CLEAR, e);
            ChatWidgetError::Transport(format!("POST /{} failed: {}", ENDPOINT_CLEAR, e))
        })?;
        let ok = response.status().is_success();
        if !ok {
            tracing::warn!("/{} returned {}", ENDPOINT_CLEAR, response.status());
        }
        Ok(ok)
    }

    async fn update_username(&self, name: &str) -> Result<UsernameReply> {
        let url = self.endpoint(ENDPOINT_UPDATE_USERNAME)?;
        tracing::debug!("POST {}", url);
        let response = self
            .client
            .post(url)
            .json(&UsernameRequest { username: name })
            .send()
            .await
            .map_err(|e| {
                tracing::error!("POST /{} failed: {}", ENDPOINT_UPDATE_USERNAME, e);
                ChatWidgetError::Transport(format!(
                    "POST /{} failed: {}",
                    ENDPOINT_UPDATE_USERNAME, e
                ))
            })?;

        // Rejections arrive with an error status and a JSON body naming the reason
        let status = response.status();
        if status.is_success() {
            return read_json(response, ENDPOINT_UPDATE_USERNAME).await;
        }
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<UsernameReply>(&body) {
            Ok(reply) => {
                tracing::warn!("/{} returned {}", ENDPOINT_UPDATE_USERNAME, status);
                Ok(reply)
            }
            Err(_) => {
                tracing::error!("/{} returned {}: {}", ENDPOINT_UPDATE_USERNAME, status, body);
                Err(ChatWidgetError::Transport(format!(
                    "/{} returned {}: {}",
                    ENDPOINT_UPDATE_USERNAME, status, body
                ))
                .into())
            }
        }
    }

    async fn fetch_stats(&self) -> Result<StatsReply> {
        self.get_json(ENDPOINT_STATS).await
    }

    async fn search_topic(&self, topic: &str) -> Result<SearchReply> {
        self.post_json(ENDPOINT_SEARCH, &SearchRequest { topic })
            .await
    }
}
