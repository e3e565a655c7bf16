//! Error types for calendar tool operations.

use std::path::PathBuf;

use thiserror::Error;

use fncal_config::ConfigError;

/// Result type for calendar tool operations.
pub type ToolResult<T> = Result<T, ToolError>;

/// Errors that can occur while constructing or using the calendar tool.
///
/// Every error surfaces to the immediate caller unmodified: there is no
/// retry or local recovery anywhere in this crate. Construction-time errors
/// abort adapter creation entirely; per-operation errors abort only that
/// operation and leave the adapter reusable.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Settings could not be loaded or queried.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Neither an inline credential nor a credential path is configured.
    #[error("no credentials configured for tool '{0}'")]
    NoCredentials(String),

    /// A credential file was configured but could not be read or parsed.
    #[error("failed to load credential file {}: {message}", path.display())]
    CredentialFile { path: PathBuf, message: String },

    /// A timestamp argument could not be parsed.
    #[error("could not parse '{input}' as a timestamp (expected RFC 3339 or YYYY-MM-DD HH:MM[:SS])")]
    TimeParse { input: String },

    /// The backend reported no event with the given identifier.
    #[error("event '{0}' not found")]
    NotFound(String),

    /// The request never produced a backend response (timeout, DNS,
    /// connection failure).
    #[error("calendar backend unreachable: {0}")]
    Network(String),

    /// The backend answered with a non-success status, auth failures
    /// included.
    #[error("calendar backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// The backend answered 2xx but the body did not have the expected
    /// shape.
    #[error("unexpected response from calendar backend: {0}")]
    InvalidResponse(String),

    /// A tool call named a function that is not in the schema table.
    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    /// A tool call's argument payload did not match the function's schema.
    #[error("invalid arguments for '{function}': {message}")]
    InvalidArguments { function: String, message: String },
}

impl ToolError {
    /// Wraps a transport-level reqwest failure.
    pub(crate) fn from_transport(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Network("request timeout".to_string())
        } else if e.is_connect() {
            Self::Network(format!("connection failed: {e}"))
        } else {
            Self::Network(format!("request failed: {e}"))
        }
    }
}
