//! The calendar tool adapter.
//!
//! [`CalendarTool`] owns one authenticated client for one configured tool
//! entry and exposes the five operations an LLM tool-calling loop can invoke,
//! plus [`CalendarTool::invoke`] to dispatch a call by schema name.
//!
//! Construction resolves configuration, loads the credential, obtains a
//! bearer token and validates it with one calendars.get round trip. Any
//! failure aborts construction; after that the adapter is read-only and a
//! failed operation leaves it usable for the next one.

use std::path::Path;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_json::json;
use tracing::{debug, info};

use fncal_config::{ConfigError, Settings};

use crate::client::GoogleCalendarClient;
use crate::credentials::AuthorizedUser;
use crate::error::{ToolError, ToolResult};
use crate::event::Event;
use crate::schema::{
    self, CreateEventArgs, EventIdArgs, ListEventsArgs, ToolFunction, UpdateEventArgs,
};
use crate::time::{parse_utc, to_event_time};

/// Timeout applied to every backend round trip.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// An authenticated adapter for one tool entry.
#[derive(Debug)]
pub struct CalendarTool {
    tool_name: String,
    calendar_id: String,
    time_zone: String,
    client: GoogleCalendarClient,
}

impl CalendarTool {
    /// Loads settings from `path` and constructs the adapter for `tool_name`.
    pub fn from_settings_file(path: impl AsRef<Path>, tool_name: &str) -> ToolResult<Self> {
        let settings = Settings::load(path)?;
        Self::from_settings(&settings, tool_name)
    }

    /// Constructs the adapter from already-loaded settings.
    pub fn from_settings(settings: &Settings, tool_name: &str) -> ToolResult<Self> {
        // Configuration errors surface before any network traffic.
        let calendar_id = settings.default_calendar_id(tool_name)?.to_string();
        let time_zone = settings.time_zone(tool_name)?.to_string();
        let credentials = load_credentials(settings, tool_name)?;

        let http_client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ToolError::Network(format!("failed to create HTTP client: {e}")))?;

        let token = credentials.bearer_token(&http_client, tool_name)?;
        let client = GoogleCalendarClient::new(http_client, token);

        // One authentication handshake: validates the token and the
        // configured calendar in a single round trip.
        let info = client.get_calendar(&calendar_id)?;
        info!(
            tool = tool_name,
            calendar = %calendar_id,
            calendar_summary = info.summary.as_deref().unwrap_or(""),
            "calendar tool ready"
        );

        Ok(Self {
            tool_name: tool_name.to_string(),
            calendar_id,
            time_zone,
            client,
        })
    }

    /// The tool entry this adapter was built for.
    pub fn tool_name(&self) -> &str {
        &self.tool_name
    }

    /// The calendar every operation targets.
    pub fn calendar_id(&self) -> &str {
        &self.calendar_id
    }

    /// The time zone attached to created and updated timestamps.
    pub fn time_zone(&self) -> &str {
        &self.time_zone
    }

    /// Creates an event and returns the backend-assigned id.
    pub fn create_event(
        &self,
        summary: &str,
        start_time: &str,
        end_time: &str,
        description: Option<&str>,
        location: Option<&str>,
    ) -> ToolResult<String> {
        let event = Event {
            summary: Some(summary.to_string()),
            description: description.map(str::to_string),
            location: location.map(str::to_string),
            start: Some(to_event_time(start_time, &self.time_zone)?),
            end: Some(to_event_time(end_time, &self.time_zone)?),
            ..Default::default()
        };

        let created = self.client.insert_event(&self.calendar_id, &event)?;
        created
            .id
            .ok_or_else(|| ToolError::InvalidResponse("created event has no id".to_string()))
    }

    /// Lists events starting in `[from, to)`, recurring instances expanded,
    /// ordered by start time. An empty window yields an empty vec.
    pub fn list_events(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> ToolResult<Vec<Event>> {
        self.client.list_events(&self.calendar_id, from, to)
    }

    /// Fetches one event by id.
    pub fn get_event(&self, event_id: &str) -> ToolResult<Event> {
        self.client.get_event(&self.calendar_id, event_id)
    }

    /// Read-modify-write update: fetches the current event, overwrites only
    /// the fields present in `changes` and submits the merged representation.
    /// Not atomic; a concurrent external modification between the read and
    /// the write is lost.
    pub fn update_event(&self, event_id: &str, changes: &EventChanges) -> ToolResult<Event> {
        let mut event = self.client.get_event(&self.calendar_id, event_id)?;
        changes.apply_to(&mut event, &self.time_zone)?;
        debug!(id = event_id, "submitting merged event");
        self.client.update_event(&self.calendar_id, event_id, &event)
    }

    /// Deletes one event by id.
    pub fn delete_event(&self, event_id: &str) -> ToolResult<()> {
        self.client.delete_event(&self.calendar_id, event_id)
    }

    /// The schema table for this adapter's operations, rebuilt on each call.
    pub fn schemas(&self) -> Vec<ToolFunction> {
        schema::schemas()
    }

    /// Dispatches a tool call by schema name with the model-produced JSON
    /// argument string, returning the operation result as a JSON value.
    pub fn invoke(&self, name: &str, arguments: &str) -> ToolResult<serde_json::Value> {
        debug!(function = name, "dispatching tool call");
        match name {
            schema::CREATE_EVENT => {
                let args: CreateEventArgs = parse_args(name, arguments)?;
                let id = self.create_event(
                    &args.summary,
                    &args.start_time,
                    &args.end_time,
                    args.description.as_deref(),
                    args.location.as_deref(),
                )?;
                Ok(json!({ "event_id": id }))
            }
            schema::LIST_EVENTS => {
                let args: ListEventsArgs = parse_args(name, arguments)?;
                let events =
                    self.list_events(parse_utc(&args.time_min)?, parse_utc(&args.time_max)?)?;
                to_json(events)
            }
            schema::GET_EVENT => {
                let args: EventIdArgs = parse_args(name, arguments)?;
                to_json(self.get_event(&args.event_id)?)
            }
            schema::UPDATE_EVENT => {
                let args: UpdateEventArgs = parse_args(name, arguments)?;
                let changes = EventChanges {
                    summary: args.summary,
                    start_time: args.start_time,
                    end_time: args.end_time,
                    description: args.description,
                    location: args.location,
                };
                to_json(self.update_event(&args.event_id, &changes)?)
            }
            schema::DELETE_EVENT => {
                let args: EventIdArgs = parse_args(name, arguments)?;
                self.delete_event(&args.event_id)?;
                Ok(json!({ "deleted": args.event_id }))
            }
            other => Err(ToolError::UnknownFunction(other.to_string())),
        }
    }
}

/// Field-level changes for an update.
///
/// `None` leaves a field untouched; `Some` overwrites it, so `Some("")`
/// explicitly clears a text field to empty. This is the presence marker that
/// replaces the old falsy-means-unset convention, under which a field could
/// never be cleared.
#[derive(Debug, Clone, Default)]
pub struct EventChanges {
    pub summary: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

impl EventChanges {
    /// Merges these changes into a fetched event. Untouched fields, including
    /// ones this adapter does not model, keep their exact prior value.
    pub fn apply_to(&self, event: &mut Event, time_zone: &str) -> ToolResult<()> {
        if let Some(ref summary) = self.summary {
            event.summary = Some(summary.clone());
        }
        if let Some(ref start) = self.start_time {
            event.start = Some(to_event_time(start, time_zone)?);
        }
        if let Some(ref end) = self.end_time {
            event.end = Some(to_event_time(end, time_zone)?);
        }
        if let Some(ref description) = self.description {
            event.description = Some(description.clone());
        }
        if let Some(ref location) = self.location {
            event.location = Some(location.clone());
        }
        Ok(())
    }
}

fn load_credentials(settings: &Settings, tool_name: &str) -> ToolResult<AuthorizedUser> {
    // Inline material wins when both sources are configured.
    if let Some(value) = settings.credential_value(tool_name)? {
        debug!(tool = tool_name, "using inline credential");
        return AuthorizedUser::from_value(value).map_err(|e| {
            ToolError::Config(ConfigError::CredentialParse {
                name: tool_name.to_string(),
                source: e,
            })
        });
    }

    if let Some(path) = settings.credential_path(tool_name)? {
        debug!(tool = tool_name, path = %path.display(), "using credential file");
        return AuthorizedUser::from_file(path);
    }

    Err(ToolError::NoCredentials(tool_name.to_string()))
}

fn parse_args<T: serde::de::DeserializeOwned>(function: &str, raw: &str) -> ToolResult<T> {
    serde_json::from_str(raw).map_err(|e| ToolError::InvalidArguments {
        function: function.to_string(),
        message: e.to_string(),
    })
}

fn to_json<T: serde::Serialize>(value: T) -> ToolResult<serde_json::Value> {
    serde_json::to_value(value)
        .map_err(|e| ToolError::InvalidResponse(format!("failed to serialize result: {e}")))
}
