//! Event wire types for the Google Calendar API.

use serde::{Deserialize, Serialize};

/// A calendar event, as sent to and received from the API.
///
/// Only the fields this adapter manipulates are modeled; everything else the
/// backend returns (attendees, reminders, etag, ...) lands in `extra` and
/// round-trips untouched through read-modify-write updates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Event {
    /// Backend-assigned identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Event title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Free-text description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Free-text location.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    /// Start of the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<EventTime>,

    /// End of the event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end: Option<EventTime>,

    /// Fields this adapter does not interpret.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Start or end of an event: either a timed instant or an all-day date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventTime {
    /// Timed events: a combined date-time value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_time: Option<String>,

    /// All-day events: a plain `YYYY-MM-DD` date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// IANA time zone the date-time is interpreted in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
}
