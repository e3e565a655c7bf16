//! CLI error types.

use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors surfaced to the terminal.
#[derive(Debug, Error)]
pub enum CliError {
    /// An adapter operation failed. Configuration problems surface here
    /// too, wrapped by the adapter.
    #[error(transparent)]
    Tool(#[from] fncal_google::ToolError),

    /// Result could not be rendered as JSON.
    #[error("failed to render output: {0}")]
    Output(#[from] serde_json::Error),
}
