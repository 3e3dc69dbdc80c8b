//! Terminal surface
//!
//! Prints the chat log to stdout with `colored` styling. The typing
//! placeholder is a single unterminated line that is erased in place when the
//! reply arrives.

use std::io::Write;

use colored::Colorize;
use rustyline::DefaultEditor;

use crate::formatter::markup_to_terminal;
use crate::renderer::{Message, Origin};
use crate::session::EMOJI_PALETTE;
use crate::surface::Surface;

/// [`Surface`] that writes to the terminal
#[derive(Debug, Default)]
pub struct TerminalSurface {
    message_count: usize,
    username: Option<String>,
    typing: bool,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prompt shown in front of the input line
    ///
    /// # Examples
    ///
    /// ```
    /// use chatwidget::terminal::TerminalSurface;
    ///
    /// colored::control::set_override(false);
    /// let surface = TerminalSurface::new();
    /// assert_eq!(surface.prompt("09:41"), "[09:41] [0] >>> ");
    /// ```
    pub fn prompt(&self, clock: &str) -> String {
        let who = match &self.username {
            Some(name) => format!("{} ", name.cyan()),
            None => String::new(),
        };
        format!(
            "[{}] [{}] {}>>> ",
            clock.dimmed(),
            self.message_count.to_string().yellow(),
            who
        )
    }

    fn erase_typing_line(&mut self) {
        if self.typing {
            print!("\r\x1b[2K");
            let _ = std::io::stdout().flush();
            self.typing = false;
        }
    }
}

/// Render one message the way the terminal log shows it
pub fn render_message(message: &Message, markup: &str) -> String {
    let sender = match message.origin {
        Origin::User => message.sender.cyan().bold(),
        Origin::Bot => message.sender.green().bold(),
    };
    let body = markup_to_terminal(markup);
    let mut out = format!("{} {}\n", sender, message.timestamp.dimmed());
    for line in body.lines() {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }
    out
}

impl Surface for TerminalSurface {
    fn show_message(&mut self, message: &Message, markup: &str) {
        self.erase_typing_line();
        println!("{}", render_message(message, markup));
    }

    fn show_typing(&mut self, sender: &str) {
        print!("{} {}", sender.green().bold(), "is typing...".dimmed());
        let _ = std::io::stdout().flush();
        self.typing = true;
    }

    fn hide_typing(&mut self) {
        self.erase_typing_line();
    }

    fn clear(&mut self) {
        self.erase_typing_line();
        print!("\x1b[2J\x1b[H");
        let _ = std::io::stdout().flush();
    }

    fn set_message_count(&mut self, count: usize) {
        self.message_count = count;
    }

    fn set_username(&mut self, name: &str) {
        self.username = Some(name.to_string());
        println!("Welcome, {}!\n", name.bold());
    }

    fn set_emoji_picker(&mut self, open: bool) {
        if !open {
            return;
        }
        let palette: Vec<String> = EMOJI_PALETTE
            .iter()
            .enumerate()
            .map(|(i, emoji)| format!("{:>2} {}", i + 1, emoji))
            .collect();
        println!();
        for row in palette.chunks(10) {
            println!("  {}", row.join("  "));
        }
        println!("{}\n", "Pick one with /emoji <n>".dimmed());
    }

    fn set_name_modal(&mut self, open: bool) {
        if open {
            println!("{}", "Set your name (leave blank to cancel)".bold());
        }
    }

    fn alert(&mut self, text: &str) {
        self.erase_typing_line();
        println!("{} {}\n", "!".yellow().bold(), text.yellow());
    }

    fn confirm(&mut self, question: &str) -> bool {
        self.erase_typing_line();
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(e) => {
                tracing::error!("Cannot open confirmation prompt: {}", e);
                return false;
            }
        };
        match editor.readline(&format!("{} [y/N] ", question)) {
            Ok(answer) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_message_strips_markup() {
        colored::control::set_override(false);
        let message = Message {
            sender: "AI Assistant".to_string(),
            text: "**hi**\nthere".to_string(),
            timestamp: "10:30".to_string(),
            origin: Origin::Bot,
        };
        let out = render_message(&message, "<strong>hi</strong><br>there");
        assert_eq!(out, "AI Assistant 10:30\n  hi\n  there\n");
    }

    #[test]
    fn test_prompt_tracks_count_and_username() {
        colored::control::set_override(false);
        let mut surface = TerminalSurface::new();
        surface.set_message_count(3);
        surface.username = Some("Ann".to_string());
        assert_eq!(surface.prompt("12:00"), "[12:00] [3] Ann >>> ");
    }
}
