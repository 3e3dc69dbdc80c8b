/*!
Command handlers for the CLI

This module provides the handlers invoked by the CLI entrypoint:

- `chat`: interactive session
- `oneshot`: single round trips (`send`, `quick`, `history`, `clear`,
  `name`, `stats`, `search`)

Each invocation talks to its own server session: the session cookie lives
only as long as the process.
*/

use std::time::Duration;

use crate::clock::Clock;
use crate::config::Config;
use crate::controller::{ChatController, Outcome};
use crate::error::{ChatWidgetError, Result};
use crate::gateway::{ChatGateway, HttpGateway};
use crate::intent::{parse_input, print_commands, InputCommand, Intent};
use crate::terminal::TerminalSurface;

// Interactive chat command handler
pub mod chat {
    //! Interactive chat mode handler.
    //!
    //! Starts the controller (session, username, history), then runs a
    //! readline loop that turns each line into intents.

    use super::*;
    use colored::Colorize;
    use rustyline::error::ReadlineError;
    use rustyline::DefaultEditor;

    /// Start interactive chat mode
    ///
    /// # Errors
    ///
    /// Returns error if the gateway or line editor cannot be created
    pub async fn run_chat(config: Config) -> Result<()> {
        tracing::info!("Starting interactive chat mode");

        let gateway = HttpGateway::new(&config.server)?;
        let mut controller =
            ChatController::from_config(gateway, TerminalSurface::new(), &config.ui);
        let mut rl = DefaultEditor::new().map_err(ChatWidgetError::from)?;

        print_welcome_banner(&config);
        controller.start().await;

        let clock = Clock::spawn(Duration::from_secs(config.ui.clock_interval_seconds));

        loop {
            let prompt = controller.surface().prompt(&clock.label());
            let draft = controller.ui().draft.clone();
            let line = if draft.is_empty() {
                rl.readline(&prompt)
            } else {
                rl.readline_with_initial(&prompt, (draft.as_str(), ""))
            };

            match line {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(trimmed);

                    match parse_input(trimmed) {
                        Ok(InputCommand::Exit) => break,
                        Ok(InputCommand::Status) => print_status_display(&controller),
                        Ok(InputCommand::Commands) => print_commands(),
                        Ok(command) => {
                            handle_command(&mut controller, &mut rl, command).await;
                        }
                        Err(e) => eprintln!("{}\n", e.to_string().red()),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("CTRL-C");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("CTRL-D");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {:?}", err);
                    break;
                }
            }
        }

        println!("Goodbye!");
        Ok(())
    }

    async fn handle_command(
        controller: &mut ChatController<HttpGateway, TerminalSurface>,
        rl: &mut DefaultEditor,
        command: InputCommand,
    ) {
        let keeps_draft = matches!(command, InputCommand::Emoji(_) | InputCommand::Chat(_));
        if !keeps_draft {
            // The typed line replaced whatever was prefilled
            controller.dispatch(Intent::Input(String::new())).await;
            controller.dispatch(Intent::DismissOverlays).await;
        }

        for intent in command.into_intents() {
            controller.dispatch(intent).await;
        }

        while controller.ui().name_modal_open {
            match rl.readline("Name: ") {
                Ok(name) if !name.trim().is_empty() => {
                    controller.dispatch(Intent::NameInput(name)).await;
                    controller.dispatch(Intent::SetName).await;
                }
                _ => {
                    controller.dispatch(Intent::CloseNameModal).await;
                }
            }
        }
    }

    fn print_welcome_banner(config: &Config) {
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                  Chatwidget - Welcome!                       ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!("Server: {}", config.server.base_url.cyan());
        println!("Type '/commands' for available commands, 'exit' to quit\n");
    }

    fn print_status_display(controller: &ChatController<HttpGateway, TerminalSurface>) {
        let session = controller.session();
        println!("\n╔══════════════════════════════════════════════════════════════╗");
        println!("║                    Chatwidget Session Status                 ║");
        println!("╚══════════════════════════════════════════════════════════════╝\n");
        println!(
            "Username:          {}",
            session.username.as_deref().unwrap_or("(not set)")
        );
        println!("Messages Sent:     {}", session.message_count);
        println!(
            "Entries Shown:     {}",
            controller.renderer().messages().count()
        );
        println!("Server:            {}", controller.gateway().base_url());
        println!("Phase:             {}", controller.phase());
        println!();
    }
}

// Single round-trip command handlers
pub mod oneshot {
    //! Non-interactive commands.
    //!
    //! Each handler opens a server session, performs one operation through
    //! the controller and reports failure through the exit status.

    use super::*;

    async fn connect(config: &Config) -> Result<ChatController<HttpGateway, TerminalSurface>> {
        let gateway = HttpGateway::new(&config.server)?;
        if let Err(e) = gateway.open_session().await {
            tracing::warn!("Could not open server session: {:#}", e);
        }
        Ok(ChatController::from_config(
            gateway,
            TerminalSurface::new(),
            &config.ui,
        ))
    }

    fn check(outcome: Outcome, what: &str) -> Result<()> {
        match outcome {
            Outcome::Failed => Err(ChatWidgetError::Transport(format!("{} failed", what)).into()),
            Outcome::Ignored => {
                Err(ChatWidgetError::Validation(format!("{}: nothing to send", what)).into())
            }
            Outcome::Delivered => Ok(()),
        }
    }

    /// Send one chat message and print the exchange
    pub async fn send(config: Config, message: String) -> Result<()> {
        let mut controller = connect(&config).await?;
        controller.dispatch(Intent::Input(message)).await;
        let outcome = controller.dispatch(Intent::Send).await;
        check(outcome, "Chat message")
    }

    /// Trigger a quick action and print the reply
    pub async fn quick(config: Config, action: String) -> Result<()> {
        let mut controller = connect(&config).await?;
        let outcome = controller.dispatch(Intent::QuickAction(action)).await;
        check(outcome, "Quick action")
    }

    /// Look a topic up and print the reply
    pub async fn search(config: Config, topic: String) -> Result<()> {
        let mut controller = connect(&config).await?;
        let outcome = controller.dispatch(Intent::Search(topic)).await;
        check(outcome, "Search")
    }

    /// Print the stored history of this session
    pub async fn history(config: Config, json: bool) -> Result<()> {
        let controller = connect(&config).await?;
        let reply = controller.gateway().fetch_history().await?;

        if json {
            println!("{}", serde_json::to_string_pretty(&reply)?);
            return Ok(());
        }

        if reply.history.is_empty() {
            println!("No conversation history");
            return Ok(());
        }
        for turn in &reply.history {
            let when = turn.timestamp.as_deref().unwrap_or("");
            println!("[{}] {}: {}", when, config.ui.user_label, turn.user);
            println!("[{}] {}: {}\n", when, config.ui.bot_label, turn.bot);
        }
        Ok(())
    }

    /// Clear the stored history, asking first unless `yes` is set
    pub async fn clear(config: Config, yes: bool) -> Result<()> {
        let mut controller = connect(&config).await?;
        let outcome = if yes {
            controller.clear_confirmed().await
        } else {
            controller.clear_chat().await
        };
        match outcome {
            Outcome::Ignored => {
                println!("Clear cancelled");
                Ok(())
            }
            other => check(other, "Clear"),
        }
    }

    /// Set the username for this session
    pub async fn name(config: Config, username: String) -> Result<()> {
        let mut controller = connect(&config).await?;
        controller.dispatch(Intent::NameInput(username)).await;
        let outcome = controller.dispatch(Intent::SetName).await;
        check(outcome, "Username update")
    }

    /// Print session statistics
    pub async fn stats(config: Config, json: bool) -> Result<()> {
        let controller = connect(&config).await?;
        let stats = controller.gateway().fetch_stats().await?;
        if let Some(error) = stats.error {
            return Err(ChatWidgetError::Server(error).into());
        }

        if json {
            println!("{}", serde_json::to_string_pretty(&stats)?);
        } else {
            println!("Total conversations: {}", stats.total_conversations);
            println!("User messages:       {}", stats.user_messages);
            println!(
                "Username:            {}",
                stats.username.as_deref().unwrap_or("(not set)")
            );
            println!(
                "Since:               {}",
                stats.since.as_deref().unwrap_or("Unknown")
            );
        }
        Ok(())
    }
}
