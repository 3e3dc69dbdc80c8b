//! Message log and rendering
//!
//! [`MessageRenderer`] owns the append-only message log and the surface it
//! is drawn on. Entries are only ever appended; the log shrinks only through
//! [`MessageRenderer::reset`], [`MessageRenderer::clear`] or removal of the
//! typing placeholder.

use chrono::Local;
use serde::{Deserialize, Serialize};

use crate::formatter::format_message;
use crate::surface::Surface;

/// Shown after the history is cleared
pub const WELCOME_MESSAGE: &str = "🎉 Welcome to AI ChatBot! 🎉\n\n\
I'm your intelligent AI assistant ready to help you with:\n\
• Time and date information ⏰📅\n\
• Funny jokes and humor 😂\n\
• General conversation and questions 💬\n\n\
You can type your message below or use the quick action buttons! 😊\n\n\
What would you like to do today?";

/// Who authored a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    User,
    Bot,
}

impl Origin {
    pub fn is_bot(&self) -> bool {
        matches!(self, Self::Bot)
    }
}

/// A rendered chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub sender: String,
    pub text: String,
    /// Local wall-clock time of rendering, `HH:MM`
    pub timestamp: String,
    pub origin: Origin,
}

impl Message {
    /// Build a message stamped with the current local time
    pub fn now(text: impl Into<String>, sender: impl Into<String>, origin: Origin) -> Self {
        Self {
            sender: sender.into(),
            text: text.into(),
            timestamp: clock_label(),
            origin,
        }
    }
}

/// Current local time as `HH:MM`
pub fn clock_label() -> String {
    Local::now().format("%H:%M").to_string()
}

/// One row of the log
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEntry {
    Message(Message),
    Typing { sender: String },
}

/// Append-only message log bound to a [`Surface`]
#[derive(Debug)]
pub struct MessageRenderer<S: Surface> {
    entries: Vec<LogEntry>,
    surface: S,
}

impl<S: Surface> MessageRenderer<S> {
    pub fn new(surface: S) -> Self {
        Self {
            entries: Vec::new(),
            surface,
        }
    }

    /// Append a message to the end of the log and show it
    ///
    /// Counting user messages is the caller's job; the renderer only draws.
    pub fn append(&mut self, text: &str, sender: &str, origin: Origin) -> Message {
        let message = Message::now(text, sender, origin);
        let markup = format_message(&message.text);
        self.surface.show_message(&message, &markup);
        self.entries.push(LogEntry::Message(message.clone()));
        message
    }

    /// Insert the typing placeholder
    ///
    /// Returns `false` without touching anything when one is already shown.
    pub fn show_typing(&mut self, sender: &str) -> bool {
        if self.is_typing() {
            return false;
        }
        self.entries.push(LogEntry::Typing {
            sender: sender.to_string(),
        });
        self.surface.show_typing(sender);
        true
    }

    /// Remove the typing placeholder; a no-op when none is shown
    pub fn hide_typing(&mut self) -> bool {
        let Some(pos) = self
            .entries
            .iter()
            .position(|e| matches!(e, LogEntry::Typing { .. }))
        else {
            return false;
        };
        self.entries.remove(pos);
        self.surface.hide_typing();
        true
    }

    pub fn is_typing(&self) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e, LogEntry::Typing { .. }))
    }

    /// Drop every entry without adding anything back
    pub fn clear(&mut self) {
        self.entries.clear();
        self.surface.clear();
    }

    /// Drop every entry, zero the visible counter and show the welcome text
    pub fn reset(&mut self, bot_sender: &str) {
        self.clear();
        self.surface.set_message_count(0);
        self.append(WELCOME_MESSAGE, bot_sender, Origin::Bot);
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Rendered messages in order, excluding the placeholder
    pub fn messages(&self) -> impl Iterator<Item = &Message> {
        self.entries.iter().filter_map(|e| match e {
            LogEntry::Message(message) => Some(message),
            LogEntry::Typing { .. } => None,
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }
}
