//! Output side of the chat UI
//!
//! The controller never prints directly. Everything the user sees goes
//! through a [`Surface`]: the terminal implementation lives in
//! [`crate::terminal`], and [`RecordingSurface`] keeps an ordered event log
//! for tests.

use std::collections::VecDeque;

use crate::renderer::{Message, Origin};

/// Display target for the chat log and its surrounding widgets
pub trait Surface: Send {
    /// Show a newly appended message and bring it into view
    fn show_message(&mut self, message: &Message, markup: &str);

    /// Show the "assistant is composing" placeholder
    fn show_typing(&mut self, sender: &str);

    /// Remove the placeholder
    fn hide_typing(&mut self);

    /// Remove every rendered entry
    fn clear(&mut self);

    /// Update the visible user message counter
    fn set_message_count(&mut self, count: usize);

    /// Update the displayed username
    fn set_username(&mut self, name: &str);

    /// Show or hide the emoji palette
    fn set_emoji_picker(&mut self, open: bool);

    /// Show or hide the username modal
    fn set_name_modal(&mut self, open: bool);

    /// Blocking notice the user must acknowledge
    fn alert(&mut self, text: &str);

    /// Blocking yes/no question; `true` means the user agreed
    fn confirm(&mut self, question: &str) -> bool;
}

/// Something a [`RecordingSurface`] was asked to display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Message {
        sender: String,
        text: String,
        origin: Origin,
        markup: String,
    },
    TypingShown,
    TypingHidden,
    Cleared,
    Count(usize),
    Username(String),
    EmojiPicker(bool),
    NameModal(bool),
    Alert(String),
    Confirm(String),
}

/// In-memory surface that records every call in order
///
/// Confirmation prompts are answered from a queue; once it is empty every
/// prompt is declined.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    events: Vec<SurfaceEvent>,
    confirm_answers: VecDeque<bool>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer to the next confirmation prompt
    pub fn answer_confirm(mut self, answer: bool) -> Self {
        self.confirm_answers.push_back(answer);
        self
    }

    /// Every recorded event, oldest first
    pub fn events(&self) -> &[SurfaceEvent] {
        &self.events
    }

    /// Only the message events
    pub fn messages(&self) -> Vec<&SurfaceEvent> {
        self.events
            .iter()
            .filter(|e| matches!(e, SurfaceEvent::Message { .. }))
            .collect()
    }

    /// Texts of all alerts raised
    pub fn alerts(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SurfaceEvent::Alert(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Forget what was recorded so far
    pub fn reset_events(&mut self) {
        self.events.clear();
    }
}

impl Surface for RecordingSurface {
    fn show_message(&mut self, message: &Message, markup: &str) {
        self.events.push(SurfaceEvent::Message {
            sender: message.sender.clone(),
            text: message.text.clone(),
            origin: message.origin,
            markup: markup.to_string(),
        });
    }

    fn show_typing(&mut self, _sender: &str) {
        self.events.push(SurfaceEvent::TypingShown);
    }

    fn hide_typing(&mut self) {
        self.events.push(SurfaceEvent::TypingHidden);
    }

    fn clear(&mut self) {
        self.events.push(SurfaceEvent::Cleared);
    }

    fn set_message_count(&mut self, count: usize) {
        self.events.push(SurfaceEvent::Count(count));
    }

    fn set_username(&mut self, name: &str) {
        self.events.push(SurfaceEvent::Username(name.to_string()));
    }

    fn set_emoji_picker(&mut self, open: bool) {
        self.events.push(SurfaceEvent::EmojiPicker(open));
    }

    fn set_name_modal(&mut self, open: bool) {
        self.events.push(SurfaceEvent::NameModal(open));
    }

    fn alert(&mut self, text: &str) {
        self.events.push(SurfaceEvent::Alert(text.to_string()));
    }

    fn confirm(&mut self, question: &str) -> bool {
        self.events.push(SurfaceEvent::Confirm(question.to_string()));
        self.confirm_answers.pop_front().unwrap_or(false)
    }
}
