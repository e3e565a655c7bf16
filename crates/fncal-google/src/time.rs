//! Parsing of model-produced timestamp strings.
//!
//! Tool-call arguments come out of an LLM, so the accepted formats are
//! deliberately lenient: full RFC 3339, or a naive date-time with `T` or a
//! space separator, with or without seconds.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{ToolError, ToolResult};
use crate::event::EventTime;

/// Naive formats tried after RFC 3339, in order.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Converts a timestamp argument into an API event time carrying `time_zone`.
///
/// An explicit UTC offset in the input is preserved (the zone then only
/// matters for recurrence expansion); naive inputs are taken as wall-clock
/// time in the configured zone.
pub fn to_event_time(input: &str, time_zone: &str) -> ToolResult<EventTime> {
    let input = input.trim();

    let date_time = if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        dt.to_rfc3339()
    } else {
        parse_naive(input)?.format("%Y-%m-%dT%H:%M:%S").to_string()
    };

    Ok(EventTime {
        date_time: Some(date_time),
        date: None,
        time_zone: Some(time_zone.to_string()),
    })
}

/// Parses a timestamp argument as a UTC instant (list-window bounds).
/// Naive inputs are taken as UTC.
pub fn parse_utc(input: &str) -> ToolResult<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(dt.with_timezone(&Utc));
    }
    Ok(parse_naive(input)?.and_utc())
}

fn parse_naive(input: &str) -> ToolResult<NaiveDateTime> {
    NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .ok_or_else(|| ToolError::TimeParse {
            input: input.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn naive_input_gets_configured_zone() {
        let t = to_event_time("2024-03-15T10:00:00", "Europe/Paris").unwrap();
        assert_eq!(t.date_time.as_deref(), Some("2024-03-15T10:00:00"));
        assert_eq!(t.time_zone.as_deref(), Some("Europe/Paris"));
        assert!(t.date.is_none());
    }

    #[test]
    fn space_separator_and_minute_precision() {
        let t = to_event_time("2024-03-15 10:00", "UTC").unwrap();
        assert_eq!(t.date_time.as_deref(), Some("2024-03-15T10:00:00"));
    }

    #[test]
    fn rfc3339_offset_is_preserved() {
        let t = to_event_time("2024-03-15T10:00:00+01:00", "Europe/Paris").unwrap();
        assert_eq!(t.date_time.as_deref(), Some("2024-03-15T10:00:00+01:00"));
        assert_eq!(t.time_zone.as_deref(), Some("Europe/Paris"));
    }

    #[test]
    fn garbage_is_a_time_parse_error() {
        let err = to_event_time("next tuesday-ish", "UTC").unwrap_err();
        assert!(matches!(err, ToolError::TimeParse { ref input } if input == "next tuesday-ish"));
    }

    #[test]
    fn parse_utc_accepts_offset_and_naive() {
        let a = parse_utc("2024-01-01T00:00:00Z").unwrap();
        let b = parse_utc("2024-01-01 00:00:00").unwrap();
        assert_eq!(a, b);

        let c = parse_utc("2024-01-01T01:00:00+01:00").unwrap();
        assert_eq!(a, c);
    }

    #[test]
    fn parse_utc_rejects_bare_dates() {
        assert!(parse_utc("2024-01-01").is_err());
    }
}
