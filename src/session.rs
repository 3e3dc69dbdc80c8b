//! Session and UI state owned by the controller
//!
//! [`Session`] is the part of the client state that mirrors the server
//! (username, user message count). [`UiState`] holds the purely local bits:
//! the input draft, the emoji palette and the username modal.

use std::fmt;

/// Emoji offered by the picker, in display order
pub const EMOJI_PALETTE: [&str; 30] = [
    "😊", "😂", "🤣", "😍", "🥰", "😎", "🤔", "😴", "👍", "👋", "❤️", "🎉", "🔥", "⭐", "🌈",
    "🐱", "🐶", "🦄", "🍕", "☕", "🎯", "✨", "💡", "🚀", "📚", "🎨", "🎵", "🏆", "💪", "🙏",
];

/// Lifecycle phase of the chat session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Startup: server session and history are being fetched
    Loading,
    /// History was replayed into the log
    Hydrated,
    /// Waiting for input
    Idle,
    /// A request is outstanding
    Sending,
    /// The log was wiped after a confirmed clear
    Cleared,
}

impl fmt::Display for SessionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Loading => write!(f, "LOADING"),
            Self::Hydrated => write!(f, "HYDRATED"),
            Self::Idle => write!(f, "IDLE"),
            Self::Sending => write!(f, "SENDING"),
            Self::Cleared => write!(f, "CLEARED"),
        }
    }
}

/// Server-mirrored session state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    /// Name the server knows the user by, once detected or set
    pub username: Option<String>,
    /// Number of user-authored messages rendered since the last clear
    pub message_count: usize,
}

impl Session {
    /// Create an empty session
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one more user-authored message and return the new total
    pub fn record_user_message(&mut self) -> usize {
        self.message_count += 1;
        self.message_count
    }

    /// Reset the counter after the log was cleared
    pub fn reset_count(&mut self) {
        self.message_count = 0;
    }

    /// Whether a username is currently displayed
    pub fn has_username(&self) -> bool {
        self.username.is_some()
    }
}

/// Local, non-persistent UI state
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UiState {
    /// Text currently in the message input
    pub draft: String,
    /// Emoji palette visibility
    pub emoji_picker_open: bool,
    /// Username modal visibility
    pub name_modal_open: bool,
    /// Text currently in the modal's name input
    pub name_input: String,
}

impl UiState {
    /// Flip the emoji palette and return the new visibility
    pub fn toggle_emoji_picker(&mut self) -> bool {
        self.emoji_picker_open = !self.emoji_picker_open;
        self.emoji_picker_open
    }

    /// Append the palette entry at `index` to the draft
    ///
    /// Returns the emoji, or `None` when the index is outside the palette.
    pub fn pick_emoji(&mut self, index: usize) -> Option<&'static str> {
        let emoji = EMOJI_PALETTE.get(index).copied()?;
        self.draft.push_str(emoji);
        Some(emoji)
    }
}
