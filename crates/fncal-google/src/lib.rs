//! Google Calendar adapter for LLM tool-calling.
//!
//! This crate turns one configured calendar account into a set of callable
//! functions with machine-readable schemas:
//!
//! - [`CalendarTool`] - the adapter: construction from settings, the five
//!   event operations, and dispatch of tool calls by schema name
//! - [`schemas`] - the static function-schema table (OpenAI tools envelope)
//! - [`GoogleCalendarClient`] - the low-level blocking HTTP client
//! - [`ToolError`] - error types for adapter operations
//!
//! Everything is synchronous and stateless between calls: each operation is
//! one round trip into the backend, there is no caching and no retry, and
//! the adapter holds nothing mutable after construction.
//!
//! # Example
//!
//! ```ignore
//! use fncal_google::CalendarTool;
//!
//! let tool = CalendarTool::from_settings_file("tools.yaml", "google-calendar")?;
//! let tools_array = tool.schemas();
//! // ... hand tools_array to the model, then:
//! let result = tool.invoke("google_calendar_get_event", r#"{"event_id": "abc"}"#)?;
//! ```

pub mod adapter;
pub mod client;
pub mod credentials;
pub mod error;
pub mod event;
pub mod schema;
pub mod time;

pub use adapter::{CalendarTool, EventChanges};
pub use client::{CalendarInfo, GoogleCalendarClient};
pub use credentials::AuthorizedUser;
pub use error::{ToolError, ToolResult};
pub use event::{Event, EventTime};
pub use schema::{FunctionSchema, ParameterSchema, PropertySchema, ToolFunction, schemas};
pub use time::{parse_utc, to_event_time};
