//! Per-tool settings for calendar adapters.
//!
//! A settings file is a YAML document with a top-level `tools` mapping. Each
//! entry names one calendar account: where its credential lives (a file path
//! or an inline JSON blob) and which calendar it targets by default.
//!
//! ```yaml
//! tools:
//!   google-calendar:
//!     credential:
//!       value: "${GCAL_TOKEN_JSON}"
//!     default:
//!       calendar_id: primary
//!       time_zone: Europe/Paris
//! ```
//!
//! String values anywhere in the tree may reference environment variables
//! (`$VAR` or `${VAR}`); references are expanded once at load time and
//! unresolved ones are left as literal text.

pub mod error;
pub mod interpolate;
pub mod settings;

pub use error::{ConfigError, ConfigResult};
pub use interpolate::interpolate;
pub use settings::{CredentialSettings, DefaultSettings, Settings, ToolSettings};
