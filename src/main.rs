//! chatwidget - terminal chat client
//!
#![doc = "chatwidget - terminal chat client"]
#![doc = "Main entry point for the chatwidget application."]

use anyhow::Result;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use chatwidget::cli::{Cli, Commands};
use chatwidget::commands;
use chatwidget::config::Config;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let cli = Cli::parse_args();

    // Load configuration
    let config_path = cli.config.as_deref().unwrap_or("config/config.yaml");
    let config = Config::load(config_path, &cli)?;

    // Initialize tracing once we know the requested output format
    init_tracing(cli.verbose, config.logging.json);

    // Validate configuration
    config.validate()?;

    if !config.ui.color {
        colored::control::set_override(false);
    }

    // Execute command
    match cli.command {
        Commands::Chat => {
            commands::chat::run_chat(config).await?;
            Ok(())
        }
        Commands::Send { message } => {
            tracing::info!("Sending one chat message");
            commands::oneshot::send(config, message).await?;
            Ok(())
        }
        Commands::Quick { action } => {
            tracing::info!("Triggering quick action: {}", action);
            commands::oneshot::quick(config, action).await?;
            Ok(())
        }
        Commands::History { json } => {
            commands::oneshot::history(config, json).await?;
            Ok(())
        }
        Commands::Clear { yes } => {
            commands::oneshot::clear(config, yes).await?;
            Ok(())
        }
        Commands::Name { username } => {
            commands::oneshot::name(config, username).await?;
            Ok(())
        }
        Commands::Stats { json } => {
            commands::oneshot::stats(config, json).await?;
            Ok(())
        }
        Commands::Search { topic } => {
            tracing::info!("Searching topic: {}", topic);
            commands::oneshot::search(config, topic).await?;
            Ok(())
        }
    }
}

/// Initialize tracing/logging
///
/// `RUST_LOG` takes precedence over `--verbose`. Logs go to stderr so they
/// never interleave with the chat log on stdout.
fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose {
        "chatwidget=debug"
    } else {
        "chatwidget=warn"
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
