//! Configuration error types.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while loading or querying settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file does not exist.
    #[error("configuration file not found at {}", path.display())]
    NotFound { path: PathBuf },

    /// The settings file exists but could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid YAML.
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// No entry for the requested tool in the `tools` mapping.
    #[error("configuration for tool '{0}' not found")]
    UnknownTool(String),

    /// An inline credential was configured but is not valid JSON.
    #[error("inline credential for tool '{name}' is not valid JSON: {source}")]
    CredentialParse {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    /// The mandatory default calendar id is missing for the tool.
    #[error("default calendar id not specified for tool '{0}'")]
    MissingDefault(String),
}
