//! chatwidget - terminal client for a JSON-over-HTTP chatbot server
//!
//! This library provides the client side of a small chatbot: the HTTP
//! gateway to the server, the session controller that turns user intents
//! into requests and rendered feedback, and the terminal front end.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//!
//! - `gateway`: Server endpoints, wire types and the `ChatGateway` trait
//! - `controller`: Session lifecycle, message sending and username handling
//! - `renderer`: Ordered message log and the typing placeholder
//! - `formatter`: Lightweight markdown-to-markup conversion
//! - `surface` / `terminal`: Display targets for the chat log
//! - `config`: Configuration management and validation
//! - `error`: Error types and result aliases
//! - `cli` / `commands`: Command-line interface and its handlers
//!
//! # Example
//!
//! ```no_run
//! use chatwidget::{ChatController, Config, HttpGateway};
//! use chatwidget::intent::Intent;
//! use chatwidget::terminal::TerminalSurface;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     let gateway = HttpGateway::new(&config.server)?;
//!     let mut controller = ChatController::new(gateway, TerminalSurface::new());
//!     controller.start().await;
//!     controller.dispatch(Intent::Input("Hello".to_string())).await;
//!     controller.dispatch(Intent::Send).await;
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod clock;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod formatter;
pub mod gateway;
pub mod intent;
pub mod renderer;
pub mod session;
pub mod surface;
pub mod terminal;

// Re-export commonly used types
pub use config::Config;
pub use controller::{ChatController, Outcome};
pub use error::{ChatWidgetError, Result};
pub use formatter::format_message;
pub use gateway::{ChatGateway, FakeGateway, HttpGateway};
pub use renderer::{Message, MessageRenderer, Origin};
pub use session::{Session, SessionPhase};
pub use surface::{RecordingSurface, Surface};
