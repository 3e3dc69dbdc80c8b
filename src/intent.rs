//! User intents and the interactive command parser
//!
//! Every user action ends up as an [`Intent`] routed through
//! `ChatController::dispatch`. In the terminal, a typed line is first parsed
//! into an [`InputCommand`], which expands into one or more intents (or is
//! handled by the loop itself, like `/status` and `exit`).
//!
//! Commands are prefixed with `/` and are case-insensitive. Any other line is
//! chat text.

use thiserror::Error;

use crate::gateway::QUICK_ACTIONS;
use crate::session::EMOJI_PALETTE;

/// Something the user asked the chat UI to do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    /// Replace the message input with this text
    Input(String),
    /// Send the message input
    Send,
    /// Trigger a predefined quick action
    QuickAction(String),
    /// Clear the conversation (asks for confirmation)
    Clear,
    /// Open the username modal
    OpenNameModal,
    /// Replace the modal's name input with this text
    NameInput(String),
    /// Save the name currently in the modal
    SetName,
    /// Close the username modal without saving
    CloseNameModal,
    /// Show or hide the emoji palette
    ToggleEmoji,
    /// Append the palette entry at this index to the message input
    PickEmoji(usize),
    /// Close floating widgets (the emoji palette)
    DismissOverlays,
    /// Look a topic up directly
    Search(String),
}

/// Errors that can occur when parsing interactive commands
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// Unknown command was entered
    #[error("Unknown command: {0}\n\nType '/commands' to see available commands")]
    UnknownCommand(String),

    /// Command was given an unsupported argument
    #[error("Unsupported argument for {command}: {arg}\n\nType '/commands' to see valid usage")]
    UnsupportedArgument { command: String, arg: String },

    /// Command requires an argument but none was provided
    #[error("Command {command} requires an argument\n\nUsage: {usage}")]
    MissingArgument { command: String, usage: String },
}

/// A parsed line of interactive input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Plain chat text
    Chat(String),
    /// Quick action by id
    Quick(String),
    /// Clear the conversation
    Clear,
    /// `/name` opens the modal; `/name <n>` saves directly
    Name(Option<String>),
    /// `/emoji` toggles the palette; `/emoji <n>` picks the n-th (1-based)
    Emoji(Option<usize>),
    /// Topic lookup
    Search(String),
    /// Show session status
    Status,
    /// Show the command list
    Commands,
    /// Leave the session
    Exit,
}

impl InputCommand {
    /// Intents this command expands to
    ///
    /// `Status`, `Commands` and `Exit` are handled by the interactive loop and
    /// expand to nothing.
    pub fn into_intents(self) -> Vec<Intent> {
        match self {
            Self::Chat(text) => vec![Intent::Input(text), Intent::Send],
            Self::Quick(action) => vec![Intent::QuickAction(action)],
            Self::Clear => vec![Intent::Clear],
            Self::Name(Some(name)) => vec![
                Intent::OpenNameModal,
                Intent::NameInput(name),
                Intent::SetName,
            ],
            Self::Name(None) => vec![Intent::OpenNameModal],
            Self::Emoji(None) => vec![Intent::ToggleEmoji],
            Self::Emoji(Some(n)) => vec![Intent::PickEmoji(n - 1)],
            Self::Search(topic) => vec![Intent::Search(topic)],
            Self::Status | Self::Commands | Self::Exit => Vec::new(),
        }
    }
}

/// Parse one line of interactive input
///
/// # Errors
///
/// Returns [`CommandError`] for unknown commands and bad arguments.
///
/// # Examples
///
/// ```
/// use chatwidget::intent::{parse_input, InputCommand};
///
/// assert_eq!(parse_input("/joke").unwrap(), InputCommand::Quick("joke".to_string()));
/// assert_eq!(parse_input("hello").unwrap(), InputCommand::Chat("hello".to_string()));
/// assert!(parse_input("/nope").is_err());
/// ```
pub fn parse_input(input: &str) -> Result<InputCommand, CommandError> {
    let trimmed = input.trim();
    let lower = trimmed.to_lowercase();

    if lower == "exit" || lower == "quit" {
        return Ok(InputCommand::Exit);
    }
    if !trimmed.starts_with('/') {
        return Ok(InputCommand::Chat(trimmed.to_string()));
    }

    let (head, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((head, rest)) => (head.to_lowercase(), rest.trim()),
        None => (lower.clone(), ""),
    };

    match head.as_str() {
        "/time" | "/date" | "/joke" | "/weather" | "/help" if rest.is_empty() => {
            Ok(InputCommand::Quick(head[1..].to_string()))
        }
        "/quick" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "/quick".to_string(),
                    usage: format!("/quick <{}>", QUICK_ACTIONS.join("|")),
                });
            }
            Ok(InputCommand::Quick(rest.to_lowercase()))
        }
        "/clear" if rest.is_empty() => Ok(InputCommand::Clear),
        "/name" => Ok(InputCommand::Name(
            (!rest.is_empty()).then(|| rest.to_string()),
        )),
        "/emoji" => {
            if rest.is_empty() {
                return Ok(InputCommand::Emoji(None));
            }
            match rest.parse::<usize>() {
                Ok(n) if (1..=EMOJI_PALETTE.len()).contains(&n) => Ok(InputCommand::Emoji(Some(n))),
                _ => Err(CommandError::UnsupportedArgument {
                    command: "/emoji".to_string(),
                    arg: rest.to_string(),
                }),
            }
        }
        "/search" => {
            if rest.is_empty() {
                return Err(CommandError::MissingArgument {
                    command: "/search".to_string(),
                    usage: "/search <topic>".to_string(),
                });
            }
            Ok(InputCommand::Search(rest.to_string()))
        }
        "/status" if rest.is_empty() => Ok(InputCommand::Status),
        "/commands" | "/?" if rest.is_empty() => Ok(InputCommand::Commands),
        "/time" | "/date" | "/joke" | "/weather" | "/help" | "/clear" | "/status"
        | "/commands" | "/?" => Err(CommandError::UnsupportedArgument {
            command: head.clone(),
            arg: rest.to_string(),
        }),
        _ => Err(CommandError::UnknownCommand(trimmed.to_string())),
    }
}

/// Print the interactive command reference
pub fn print_commands() {
    println!(
        r#"
Interactive Commands
====================

QUICK ACTIONS:
  /time           - Current time
  /date           - Today's date
  /joke           - Joke of the day
  /weather        - Weather small talk
  /help           - What the bot can do
  /quick <id>     - Any quick action by id

CONVERSATION:
  /search <topic> - Look a topic up directly
  /clear          - Clear all chat messages (asks first)

PROFILE:
  /name           - Open the name prompt
  /name <name>    - Set your name directly

EMOJI:
  /emoji          - Show or hide the emoji palette
  /emoji <n>      - Add the n-th emoji to your next message

SESSION:
  /status         - Show session status
  /commands       - Show this list
  /?              - Same as /commands
  exit            - Leave the chat
  quit            - Same as exit

Anything else is sent to the bot as a chat message.
"#
    );
}
