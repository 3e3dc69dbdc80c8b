//! Chat client controller
//!
//! [`ChatController`] owns the session state, the message log and the
//! gateway, and turns [`Intent`]s into requests and rendered feedback.
//!
//! Nothing raised by the gateway escapes this module. Chat failures become a
//! fixed fallback bot message, username failures become an alert, and the
//! remaining failures are logged. Every path ends back in
//! [`SessionPhase::Idle`].
//!
//! Handlers take `&mut self`, so intents are handled strictly one after
//! another: at most one request is outstanding per controller and the typing
//! placeholder always belongs to that request.

use crate::config::UiConfig;
use crate::gateway::{ChatGateway, HistoryEntry};
use crate::intent::Intent;
use crate::renderer::{MessageRenderer, Origin, WELCOME_MESSAGE};
use crate::session::{Session, SessionPhase, UiState};
use crate::surface::Surface;

/// Bot message shown when a chat request fails for any reason
pub const ERROR_FALLBACK: &str = "Sorry, I encountered an error. Please try again.";

/// Question asked before the conversation is cleared
pub const CLEAR_CONFIRMATION: &str = "Are you sure you want to clear all chat messages?";

/// Alert for an empty username
pub const EMPTY_NAME_ALERT: &str = "Please enter a name";

/// Alert when the server gave no specific reason for rejecting a username
pub const NAME_SAVE_FAILED: &str = "Failed to save name";

/// What became of a handled intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing was sent (empty input, declined confirmation, local-only intent)
    Ignored,
    /// The server answered and the answer was rendered
    Delivered,
    /// The request failed; fallback feedback was shown or logged
    Failed,
}

/// Controller for one chat session
pub struct ChatController<G: ChatGateway, S: Surface> {
    gateway: G,
    renderer: MessageRenderer<S>,
    session: Session,
    ui: UiState,
    phase: SessionPhase,
    user_label: String,
    bot_label: String,
}

impl<G: ChatGateway, S: Surface> ChatController<G, S> {
    /// Create a controller using the default sender labels
    pub fn new(gateway: G, surface: S) -> Self {
        Self::from_config(gateway, surface, &UiConfig::default())
    }

    /// Create a controller using the configured sender labels
    pub fn from_config(gateway: G, surface: S, ui: &UiConfig) -> Self {
        Self {
            gateway,
            renderer: MessageRenderer::new(surface),
            session: Session::new(),
            ui: UiState::default(),
            phase: SessionPhase::Loading,
            user_label: ui.user_label.clone(),
            bot_label: ui.bot_label.clone(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn ui(&self) -> &UiState {
        &self.ui
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn renderer(&self) -> &MessageRenderer<S> {
        &self.renderer
    }

    pub fn surface(&self) -> &S {
        self.renderer.surface()
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.renderer.surface_mut()
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn bot_label(&self) -> &str {
        &self.bot_label
    }

    /// Bring the session up: open the server session, show the welcome
    /// placeholder, sync the username and replay stored history
    ///
    /// Failures along the way are logged and leave the placeholder in place.
    pub async fn start(&mut self) {
        self.phase = SessionPhase::Loading;
        tracing::info!("Starting chat session");

        if let Err(e) = self.gateway.open_session().await {
            tracing::warn!("Could not open server session: {:#}", e);
        }

        let bot = self.bot_label.clone();
        self.renderer.append(WELCOME_MESSAGE, &bot, Origin::Bot);

        self.sync_username().await;
        self.load_chat_history().await;
        self.phase = SessionPhase::Idle;
    }

    /// Adopt the username the server already knows, if any
    pub async fn sync_username(&mut self) {
        match self.gateway.fetch_stats().await {
            Ok(stats) => {
                if let Some(name) = stats.username.filter(|n| !n.trim().is_empty()) {
                    tracing::debug!("Server knows user as {}", name);
                    self.display_username(&name);
                }
            }
            Err(e) => tracing::warn!("Could not fetch session stats: {:#}", e),
        }
    }

    /// Replace the log with the server's stored history
    ///
    /// An empty history keeps whatever is displayed. Returns the number of
    /// turns replayed.
    pub async fn load_chat_history(&mut self) -> usize {
        let history = match self.gateway.fetch_history().await {
            Ok(reply) => reply.history,
            Err(e) => {
                tracing::error!("Error loading history: {:#}", e);
                return 0;
            }
        };

        if history.is_empty() {
            tracing::debug!("No stored history");
            return 0;
        }

        self.hydrate(&history);
        self.phase = SessionPhase::Hydrated;
        tracing::info!("Restored {} conversation turns", history.len());
        history.len()
    }

    fn hydrate(&mut self, history: &[HistoryEntry]) {
        self.renderer.clear();
        self.session.reset_count();
        for turn in history {
            self.add_message(&turn.user, Origin::User);
            self.add_message(&turn.bot, Origin::Bot);
        }
        let count = self.session.message_count;
        self.renderer.surface_mut().set_message_count(count);
    }

    /// Route one intent to its handler
    pub async fn dispatch(&mut self, intent: Intent) -> Outcome {
        tracing::debug!("Dispatching {:?}", intent);
        match intent {
            Intent::Input(text) => {
                self.ui.draft = text;
                Outcome::Ignored
            }
            Intent::Send => self.send_message().await,
            Intent::QuickAction(action) => self.send_quick_action(&action).await,
            Intent::Clear => self.clear_chat().await,
            Intent::OpenNameModal => {
                self.set_name_modal(true);
                Outcome::Ignored
            }
            Intent::NameInput(name) => {
                self.ui.name_input = name;
                Outcome::Ignored
            }
            Intent::SetName => self.save_user_name().await,
            Intent::CloseNameModal => {
                self.set_name_modal(false);
                Outcome::Ignored
            }
            Intent::ToggleEmoji => {
                let open = self.ui.toggle_emoji_picker();
                self.renderer.surface_mut().set_emoji_picker(open);
                Outcome::Ignored
            }
            Intent::PickEmoji(index) => {
                if self.ui.pick_emoji(index).is_none() {
                    tracing::debug!("No emoji at palette index {}", index);
                }
                self.close_emoji_picker();
                Outcome::Ignored
            }
            Intent::DismissOverlays => {
                self.close_emoji_picker();
                Outcome::Ignored
            }
            Intent::Search(topic) => self.search_topic(&topic).await,
        }
    }

    /// Send the current draft as a chat message
    ///
    /// The user's message is rendered before the request goes out, and the
    /// typing placeholder is shown for as long as the request is pending.
    /// Whitespace-only drafts are ignored without contacting the server.
    pub async fn send_message(&mut self) -> Outcome {
        let message = self.ui.draft.trim().to_string();
        if message.is_empty() {
            return Outcome::Ignored;
        }

        self.add_message(&message, Origin::User);
        self.ui.draft.clear();

        self.phase = SessionPhase::Sending;
        let bot = self.bot_label.clone();
        self.renderer.show_typing(&bot);

        let result = self.gateway.send_chat_message(&message).await;
        self.renderer.hide_typing();

        let outcome = match result {
            Ok(reply) => match (reply.error, reply.response) {
                (None, Some(response)) => {
                    self.add_message(&response, Origin::Bot);
                    if let Some(name) = reply.username.filter(|n| !n.trim().is_empty()) {
                        if !self.session.has_username() {
                            self.display_username(&name);
                        }
                    }
                    Outcome::Delivered
                }
                (Some(error), _) => {
                    tracing::warn!("Chat request rejected by server: {}", error);
                    self.add_message(ERROR_FALLBACK, Origin::Bot);
                    Outcome::Failed
                }
                (None, None) => {
                    tracing::warn!("Chat reply carried no response");
                    self.add_message(ERROR_FALLBACK, Origin::Bot);
                    Outcome::Failed
                }
            },
            Err(e) => {
                tracing::error!("Chat request failed: {:#}", e);
                self.add_message(ERROR_FALLBACK, Origin::Bot);
                Outcome::Failed
            }
        };

        self.phase = SessionPhase::Idle;
        outcome
    }

    /// Trigger a quick action and render its response
    ///
    /// No user entry or typing placeholder is shown; failures are only logged.
    pub async fn send_quick_action(&mut self, action: &str) -> Outcome {
        self.phase = SessionPhase::Sending;
        let outcome = match self.gateway.send_quick_action(action).await {
            Ok(reply) => {
                self.add_message(&reply.response, Origin::Bot);
                Outcome::Delivered
            }
            Err(e) => {
                tracing::error!("Quick action '{}' failed: {:#}", action, e);
                Outcome::Failed
            }
        };
        self.phase = SessionPhase::Idle;
        outcome
    }

    /// Ask for confirmation, then clear the conversation
    pub async fn clear_chat(&mut self) -> Outcome {
        if !self.renderer.surface_mut().confirm(CLEAR_CONFIRMATION) {
            tracing::debug!("Clear declined");
            return Outcome::Ignored;
        }
        self.clear_confirmed().await
    }

    /// Clear the conversation without asking
    ///
    /// On success the log is wiped, the counter zeroed and the welcome text
    /// shown. On failure the log is left as it was.
    pub async fn clear_confirmed(&mut self) -> Outcome {
        match self.gateway.clear_history().await {
            Ok(true) => {
                let bot = self.bot_label.clone();
                self.session.reset_count();
                self.renderer.reset(&bot);
                self.phase = SessionPhase::Cleared;
                tracing::info!("Chat cleared");
                self.phase = SessionPhase::Idle;
                Outcome::Delivered
            }
            Ok(false) => {
                tracing::warn!("Server refused to clear chat");
                Outcome::Failed
            }
            Err(e) => {
                tracing::error!("Error clearing chat: {:#}", e);
                Outcome::Failed
            }
        }
    }

    /// Save the name in the modal's input
    ///
    /// An empty name is rejected with an alert before any request. On
    /// success the modal closes, its input is cleared, the new name is
    /// displayed and the server's confirmation is rendered. On failure the
    /// prior state is untouched and the error is alerted.
    pub async fn save_user_name(&mut self) -> Outcome {
        let name = self.ui.name_input.trim().to_string();
        if name.is_empty() {
            self.renderer.surface_mut().alert(EMPTY_NAME_ALERT);
            return Outcome::Ignored;
        }

        match self.gateway.update_username(&name).await {
            Ok(reply) if reply.success => {
                self.set_name_modal(false);
                self.ui.name_input.clear();
                self.display_username(&name);
                if let Some(response) = reply.response {
                    self.add_message(&response, Origin::Bot);
                }
                Outcome::Delivered
            }
            Ok(reply) => {
                let error = reply.error.unwrap_or_else(|| NAME_SAVE_FAILED.to_string());
                tracing::warn!("Username rejected: {}", error);
                self.renderer.surface_mut().alert(&error);
                Outcome::Failed
            }
            Err(e) => {
                tracing::error!("Error saving username: {:#}", e);
                self.renderer.surface_mut().alert(NAME_SAVE_FAILED);
                Outcome::Failed
            }
        }
    }

    /// Look a topic up and render the answer like a chat exchange
    pub async fn search_topic(&mut self, topic: &str) -> Outcome {
        let topic = topic.trim();
        if topic.is_empty() {
            return Outcome::Ignored;
        }

        self.add_message(topic, Origin::User);
        self.phase = SessionPhase::Sending;
        let bot = self.bot_label.clone();
        self.renderer.show_typing(&bot);

        let result = self.gateway.search_topic(topic).await;
        self.renderer.hide_typing();

        let outcome = match result {
            Ok(reply) if reply.success && reply.error.is_none() => match reply.response {
                Some(response) => {
                    self.add_message(&response, Origin::Bot);
                    Outcome::Delivered
                }
                None => {
                    self.add_message(ERROR_FALLBACK, Origin::Bot);
                    Outcome::Failed
                }
            },
            Ok(reply) => {
                tracing::warn!(
                    "Search rejected by server: {}",
                    reply.error.as_deref().unwrap_or("unknown error")
                );
                self.add_message(ERROR_FALLBACK, Origin::Bot);
                Outcome::Failed
            }
            Err(e) => {
                tracing::error!("Search failed: {:#}", e);
                self.add_message(ERROR_FALLBACK, Origin::Bot);
                Outcome::Failed
            }
        };

        self.phase = SessionPhase::Idle;
        outcome
    }

    fn add_message(&mut self, text: &str, origin: Origin) {
        let sender = match origin {
            Origin::User => self.user_label.clone(),
            Origin::Bot => self.bot_label.clone(),
        };
        self.renderer.append(text, &sender, origin);
        if origin == Origin::User {
            let count = self.session.record_user_message();
            self.renderer.surface_mut().set_message_count(count);
        }
    }

    fn display_username(&mut self, name: &str) {
        self.session.username = Some(name.to_string());
        self.renderer.surface_mut().set_username(name);
    }

    fn set_name_modal(&mut self, open: bool) {
        if self.ui.name_modal_open != open {
            self.ui.name_modal_open = open;
            self.renderer.surface_mut().set_name_modal(open);
        }
    }

    fn close_emoji_picker(&mut self) {
        if self.ui.emoji_picker_open {
            self.ui.emoji_picker_open = false;
            self.renderer.surface_mut().set_emoji_picker(false);
        }
    }
}
