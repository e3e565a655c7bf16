//! Google Calendar API client.
//!
//! A low-level blocking HTTP client for the Google Calendar API v3 events
//! resource: request building, bearer auth, pagination, and status-to-error
//! mapping. One method, one round trip (list follows page tokens).

use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use crate::error::{ToolError, ToolResult};
use crate::event::Event;

/// Base URL for Google Calendar API v3.
const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Google Calendar API client.
#[derive(Debug)]
pub struct GoogleCalendarClient {
    http_client: reqwest::blocking::Client,
    access_token: String,
}

impl GoogleCalendarClient {
    /// Creates a client over an existing HTTP client and bearer token.
    pub fn new(http_client: reqwest::blocking::Client, access_token: impl Into<String>) -> Self {
        Self {
            http_client,
            access_token: access_token.into(),
        }
    }

    /// Fetches calendar metadata. Used at construction time to validate both
    /// the bearer token and the configured calendar id in one round trip.
    pub fn get_calendar(&self, calendar_id: &str) -> ToolResult<CalendarInfo> {
        let url = format!(
            "{}/calendars/{}",
            CALENDAR_API_BASE,
            urlencoding::encode(calendar_id)
        );

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.access_token)
            .send()
            .map_err(ToolError::from_transport)?;

        let (status, body) = read_body(response)?;
        if !status.is_success() {
            return Err(status_error(status, body, None));
        }
        parse_json(&body)
    }

    /// Inserts a new event and returns the backend's representation of it.
    pub fn insert_event(&self, calendar_id: &str, event: &Event) -> ToolResult<Event> {
        let url = format!(
            "{}/calendars/{}/events",
            CALENDAR_API_BASE,
            urlencoding::encode(calendar_id)
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.access_token)
            .json(event)
            .send()
            .map_err(ToolError::from_transport)?;

        let (status, body) = read_body(response)?;
        if !status.is_success() {
            return Err(status_error(status, body, None));
        }

        let created: Event = parse_json(&body)?;
        debug!(calendar = calendar_id, id = ?created.id, "inserted event");
        Ok(created)
    }

    /// Lists events with a start time in `[time_min, time_max)`, recurring
    /// instances expanded, ordered by start time ascending. Follows page
    /// tokens until the window is exhausted.
    pub fn list_events(
        &self,
        calendar_id: &str,
        time_min: DateTime<Utc>,
        time_max: DateTime<Utc>,
    ) -> ToolResult<Vec<Event>> {
        let url = format!(
            "{}/calendars/{}/events",
            CALENDAR_API_BASE,
            urlencoding::encode(calendar_id)
        );

        let mut all_events = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let query = list_query(time_min, time_max, page_token.as_deref());
            let response = self
                .http_client
                .get(&url)
                .bearer_auth(&self.access_token)
                .query(&query)
                .send()
                .map_err(ToolError::from_transport)?;

            let (status, body) = read_body(response)?;
            if !status.is_success() {
                return Err(status_error(status, body, None));
            }

            let page: EventsPage = parse_json(&body)?;
            all_events.extend(page.items);

            match page.next_page_token {
                Some(token) => page_token = Some(token),
                None => break,
            }
        }

        debug!(
            calendar = calendar_id,
            count = all_events.len(),
            "fetched events"
        );
        Ok(all_events)
    }

    /// Fetches a single event by id.
    pub fn get_event(&self, calendar_id: &str, event_id: &str) -> ToolResult<Event> {
        let response = self
            .http_client
            .get(self.event_url(calendar_id, event_id))
            .bearer_auth(&self.access_token)
            .send()
            .map_err(ToolError::from_transport)?;

        let (status, body) = read_body(response)?;
        if !status.is_success() {
            return Err(status_error(status, body, Some(event_id)));
        }
        parse_json(&body)
    }

    /// Replaces an event with the given representation.
    pub fn update_event(
        &self,
        calendar_id: &str,
        event_id: &str,
        event: &Event,
    ) -> ToolResult<Event> {
        let response = self
            .http_client
            .put(self.event_url(calendar_id, event_id))
            .bearer_auth(&self.access_token)
            .json(event)
            .send()
            .map_err(ToolError::from_transport)?;

        let (status, body) = read_body(response)?;
        if !status.is_success() {
            return Err(status_error(status, body, Some(event_id)));
        }
        parse_json(&body)
    }

    /// Deletes an event by id.
    pub fn delete_event(&self, calendar_id: &str, event_id: &str) -> ToolResult<()> {
        let response = self
            .http_client
            .delete(self.event_url(calendar_id, event_id))
            .bearer_auth(&self.access_token)
            .send()
            .map_err(ToolError::from_transport)?;

        let (status, body) = read_body(response)?;
        if !status.is_success() {
            return Err(status_error(status, body, Some(event_id)));
        }
        debug!(calendar = calendar_id, id = event_id, "deleted event");
        Ok(())
    }

    fn event_url(&self, calendar_id: &str, event_id: &str) -> String {
        format!(
            "{}/calendars/{}/events/{}",
            CALENDAR_API_BASE,
            urlencoding::encode(calendar_id),
            urlencoding::encode(event_id)
        )
    }
}

/// Builds the query for the events.list endpoint. `timeMin` is inclusive and
/// `timeMax` exclusive on the backend; `singleEvents` materializes recurring
/// instances and is required for `orderBy=startTime`.
fn list_query(
    time_min: DateTime<Utc>,
    time_max: DateTime<Utc>,
    page_token: Option<&str>,
) -> Vec<(&'static str, String)> {
    let mut query = vec![
        ("timeMin", time_min.to_rfc3339()),
        ("timeMax", time_max.to_rfc3339()),
        ("singleEvents", "true".to_string()),
        ("orderBy", "startTime".to_string()),
    ];
    if let Some(token) = page_token {
        query.push(("pageToken", token.to_string()));
    }
    query
}

fn read_body(response: reqwest::blocking::Response) -> ToolResult<(reqwest::StatusCode, String)> {
    let status = response.status();
    let body = response
        .text()
        .map_err(|e| ToolError::Network(format!("failed to read response: {e}")))?;
    Ok((status, body))
}

fn parse_json<T: serde::de::DeserializeOwned>(body: &str) -> ToolResult<T> {
    serde_json::from_str(body)
        .map_err(|e| ToolError::InvalidResponse(format!("failed to parse response: {e}")))
}

/// Maps a non-success status to an error. 404/410 on an addressed event
/// becomes `NotFound`; everything else surfaces as a backend error with the
/// response body attached.
fn status_error(status: reqwest::StatusCode, body: String, event_id: Option<&str>) -> ToolError {
    use reqwest::StatusCode;

    if let Some(id) = event_id {
        if status == StatusCode::NOT_FOUND || status == StatusCode::GONE {
            return ToolError::NotFound(id.to_string());
        }
    }
    ToolError::Backend {
        status: status.as_u16(),
        message: body,
    }
}

/// Calendar metadata from the calendars.get endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarInfo {
    /// The calendar id.
    pub id: String,
    /// The calendar title.
    pub summary: Option<String>,
    /// The calendar's own time zone.
    pub time_zone: Option<String>,
}

/// Response from the events.list endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EventsPage {
    #[serde(default)]
    items: Vec<Event>,
    next_page_token: Option<String>,
}
