//! Command-line interface definition for chatwidget
//!
//! This module defines the CLI structure using clap's derive API. The
//! `chat` command runs the interactive client; the other commands perform a
//! single round trip against the server and print the outcome.

use clap::{Parser, Subcommand};

/// chatwidget - terminal client for a JSON-over-HTTP chatbot server
#[derive(Parser, Debug, Clone)]
#[command(name = "chatwidget")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/config.yaml")]
    pub config: Option<String>,

    /// Override the server base URL from config
    #[arg(short, long)]
    pub server: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Disable ANSI colors
    #[arg(long)]
    pub no_color: bool,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands for chatwidget
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Start an interactive chat session
    Chat,

    /// Send one chat message and print the reply
    Send {
        /// Message text
        message: String,
    },

    /// Trigger a quick action (time, date, joke, weather, help)
    Quick {
        /// Quick action identifier
        action: String,
    },

    /// Print the server-side chat history
    History {
        /// Print raw JSON instead of formatted turns
        #[arg(long)]
        json: bool,
    },

    /// Clear the server-side chat history
    Clear {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Set the username the bot addresses you by
    Name {
        /// New username
        username: String,
    },

    /// Show server statistics for this session
    Stats {
        /// Print raw JSON
        #[arg(long)]
        json: bool,
    },

    /// Look up a topic directly
    Search {
        /// Topic to search for
        topic: String,
    },
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_chat_command() {
        let cli = Cli::try_parse_from(["chatwidget", "chat"]).unwrap();
        assert_eq!(cli.command, Commands::Chat);
        assert_eq!(cli.config, Some("config/config.yaml".to_string()));
        assert!(!cli.verbose);
    }

    #[test]
    fn test_cli_parse_send() {
        let cli = Cli::try_parse_from(["chatwidget", "send", "hello there"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::Send {
                message: "hello there".to_string()
            }
        );
    }

    #[test]
    fn test_cli_parse_server_override() {
        let cli =
            Cli::try_parse_from(["chatwidget", "--server", "http://h:1", "quick", "joke"]).unwrap();
        assert_eq!(cli.server, Some("http://h:1".to_string()));
        assert_eq!(
            cli.command,
            Commands::Quick {
                action: "joke".to_string()
            }
        );
    }

    #[test]
    fn test_cli_parse_clear_yes() {
        let cli = Cli::try_parse_from(["chatwidget", "clear", "--yes"]).unwrap();
        assert_eq!(cli.command, Commands::Clear { yes: true });

        let cli = Cli::try_parse_from(["chatwidget", "clear"]).unwrap();
        assert_eq!(cli.command, Commands::Clear { yes: false });
    }

    #[test]
    fn test_cli_parse_history_json() {
        let cli = Cli::try_parse_from(["chatwidget", "history", "--json"]).unwrap();
        assert_eq!(cli.command, Commands::History { json: true });
    }

    #[test]
    fn test_cli_parse_name_requires_argument() {
        assert!(Cli::try_parse_from(["chatwidget", "name"]).is_err());
    }

    #[test]
    fn test_cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["chatwidget"]).is_err());
    }
}
