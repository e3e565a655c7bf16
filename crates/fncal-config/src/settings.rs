//! Typed settings tree and per-tool accessors.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::error::{ConfigError, ConfigResult};
use crate::interpolate::interpolate;

/// Time zone attached to event timestamps when the tool does not configure one.
pub const DEFAULT_TIME_ZONE: &str = "UTC";

/// The full settings tree: one entry per configured tool.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Tool name → tool configuration.
    pub tools: HashMap<String, ToolSettings>,
}

/// Configuration for a single tool (one calendar account).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ToolSettings {
    /// Where the credential lives. Optional at parse time; the adapter
    /// rejects tools with neither source configured.
    pub credential: Option<CredentialSettings>,

    /// Per-tool defaults.
    pub default: Option<DefaultSettings>,
}

/// Credential source: a token file path or an inline JSON-encoded string.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CredentialSettings {
    /// Path to a serialized token file.
    pub path: Option<PathBuf>,

    /// The same token material, JSON-encoded inline.
    pub value: Option<String>,
}

/// Per-tool defaults applied to every operation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DefaultSettings {
    /// Target calendar for all operations. Mandatory: every operation needs
    /// an implicit calendar, so a missing value is an error at access time.
    pub calendar_id: Option<String>,

    /// IANA time zone attached to created/updated event timestamps.
    pub time_zone: Option<String>,
}

impl Settings {
    /// Loads settings from a YAML file, expanding environment references in
    /// every string value.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ConfigError::NotFound {
                path: path.to_path_buf(),
            },
            _ => ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            },
        })?;

        let settings = Self::from_yaml(&content)?;
        debug!(
            path = %path.display(),
            tools = settings.tools.len(),
            "loaded settings"
        );
        Ok(settings)
    }

    /// Parses settings from a YAML string. Interpolation happens on the raw
    /// value tree, before typed deserialization, so references inside any
    /// string leaf are expanded.
    pub fn from_yaml(content: &str) -> ConfigResult<Self> {
        let raw: serde_yaml::Value = serde_yaml::from_str(content)?;
        let expanded = interpolate(&raw);
        Ok(serde_yaml::from_value(expanded)?)
    }

    /// Returns the configuration for `name`, or `UnknownTool` if absent.
    pub fn tool(&self, name: &str) -> ConfigResult<&ToolSettings> {
        self.tools
            .get(name)
            .ok_or_else(|| ConfigError::UnknownTool(name.to_string()))
    }

    /// Returns the configured credential file path, or `None` when the tool
    /// uses an inline credential. Absence is not an error.
    pub fn credential_path(&self, name: &str) -> ConfigResult<Option<&Path>> {
        let tool = self.tool(name)?;
        Ok(tool
            .credential
            .as_ref()
            .and_then(|c| c.path.as_deref())
            .filter(|p| !p.as_os_str().is_empty()))
    }

    /// Parses the inline credential JSON, or returns `None` when the tool is
    /// configured with a file path instead. Absence is not an error; a
    /// present-but-malformed value is.
    pub fn credential_value(&self, name: &str) -> ConfigResult<Option<serde_json::Value>> {
        let tool = self.tool(name)?;
        let Some(raw) = tool
            .credential
            .as_ref()
            .and_then(|c| c.value.as_deref())
            .filter(|v| !v.is_empty())
        else {
            return Ok(None);
        };

        let parsed = serde_json::from_str(raw).map_err(|e| ConfigError::CredentialParse {
            name: name.to_string(),
            source: e,
        })?;
        Ok(Some(parsed))
    }

    /// Returns the mandatory default calendar id for the tool.
    pub fn default_calendar_id(&self, name: &str) -> ConfigResult<&str> {
        let tool = self.tool(name)?;
        tool.default
            .as_ref()
            .and_then(|d| d.calendar_id.as_deref())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| ConfigError::MissingDefault(name.to_string()))
    }

    /// Returns the configured time zone, or [`DEFAULT_TIME_ZONE`].
    pub fn time_zone(&self, name: &str) -> ConfigResult<&str> {
        let tool = self.tool(name)?;
        Ok(tool
            .default
            .as_ref()
            .and_then(|d| d.time_zone.as_deref())
            .unwrap_or(DEFAULT_TIME_ZONE))
    }
}
