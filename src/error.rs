//! Error types for chatwidget
//!
//! This module defines the error types used throughout the client,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for chatwidget operations
///
/// Transport and server errors never escape the controller: they are turned
/// into fallback messages or alerts there. The remaining variants surface
/// from configuration loading and the CLI entrypoint.
#[derive(Error, Debug)]
pub enum ChatWidgetError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// The request never produced a usable reply (connect failure,
    /// non-success status, unparseable body)
    #[error("Transport error: {0}")]
    Transport(String),

    /// A well-formed reply that carried an `error` field
    #[error("Server error: {0}")]
    Server(String),

    /// Input rejected before any request was made
    #[error("Validation error: {0}")]
    Validation(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Line editor errors
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
}

/// Result type alias for chatwidget operations
///
/// Uses `anyhow::Error` so callers can attach context while still being
/// able to downcast to [`ChatWidgetError`].
pub type Result<T> = anyhow::Result<T>;
