//! Function schemas for LLM tool-calling.
//!
//! The schema table is declared statically, one entry per adapter operation,
//! so the published contract and the implementation cannot drift apart the
//! way reflection-derived schemas can. [`schemas`] rebuilds the table on
//! every call; entries carry no identity across calls.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Schema name of the create-event operation.
pub const CREATE_EVENT: &str = "google_calendar_create_event";
/// Schema name of the list-events operation.
pub const LIST_EVENTS: &str = "google_calendar_list_events";
/// Schema name of the get-event operation.
pub const GET_EVENT: &str = "google_calendar_get_event";
/// Schema name of the update-event operation.
pub const UPDATE_EVENT: &str = "google_calendar_update_event";
/// Schema name of the delete-event operation.
pub const DELETE_EVENT: &str = "google_calendar_delete_event";

/// One entry in the tools array, in the OpenAI tool-calling envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ToolFunction {
    /// Always `"function"`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    /// The function descriptor itself.
    pub function: FunctionSchema,
}

/// A callable function: name, description, parameter shapes.
#[derive(Debug, Clone, Serialize)]
pub struct FunctionSchema {
    pub name: &'static str,
    pub description: &'static str,
    pub parameters: ParameterSchema,
}

/// JSON-schema object describing a function's parameters.
#[derive(Debug, Clone, Serialize)]
pub struct ParameterSchema {
    /// Always `"object"`.
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub properties: BTreeMap<&'static str, PropertySchema>,
    pub required: Vec<&'static str>,
}

/// A single named parameter.
#[derive(Debug, Clone, Serialize)]
pub struct PropertySchema {
    /// JSON primitive type; every parameter of this adapter is a string.
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub description: &'static str,
}

fn string(description: &'static str) -> PropertySchema {
    PropertySchema {
        kind: "string",
        description,
    }
}

fn function(
    name: &'static str,
    description: &'static str,
    properties: Vec<(&'static str, PropertySchema)>,
    required: Vec<&'static str>,
) -> ToolFunction {
    ToolFunction {
        kind: "function",
        function: FunctionSchema {
            name,
            description,
            parameters: ParameterSchema {
                kind: "object",
                properties: properties.into_iter().collect(),
                required,
            },
        },
    }
}

/// Returns the full schema table, rebuilt fresh on each call.
pub fn schemas() -> Vec<ToolFunction> {
    vec![
        function(
            CREATE_EVENT,
            "Create a new event in the configured calendar and return its id.",
            vec![
                ("summary", string("Title of the event.")),
                (
                    "start_time",
                    string("Start of the event, e.g. 2024-03-15T10:00:00."),
                ),
                (
                    "end_time",
                    string("End of the event, e.g. 2024-03-15T11:00:00."),
                ),
                ("description", string("Free-text description of the event.")),
                ("location", string("Where the event takes place.")),
            ],
            vec!["summary", "start_time", "end_time"],
        ),
        function(
            LIST_EVENTS,
            "List events starting within a time window. The lower bound is \
             inclusive, the upper bound exclusive; recurring events are \
             expanded into instances, ordered by start time.",
            vec![
                (
                    "time_min",
                    string("Lower bound (inclusive), e.g. 2024-01-01T00:00:00Z."),
                ),
                (
                    "time_max",
                    string("Upper bound (exclusive), e.g. 2024-01-02T00:00:00Z."),
                ),
            ],
            vec!["time_min", "time_max"],
        ),
        function(
            GET_EVENT,
            "Fetch a single event by its id.",
            vec![("event_id", string("Identifier of the event."))],
            vec!["event_id"],
        ),
        function(
            UPDATE_EVENT,
            "Update an existing event. Only the supplied fields are changed; \
             passing an empty string clears a text field.",
            vec![
                ("event_id", string("Identifier of the event to update.")),
                ("summary", string("New title of the event.")),
                ("start_time", string("New start of the event.")),
                ("end_time", string("New end of the event.")),
                ("description", string("New description of the event.")),
                ("location", string("New location of the event.")),
            ],
            vec!["event_id"],
        ),
        function(
            DELETE_EVENT,
            "Delete an event by its id.",
            vec![("event_id", string("Identifier of the event to delete."))],
            vec!["event_id"],
        ),
    ]
}

// ---------------------------------------------------------------------------
// Argument payloads, one per schema entry
// ---------------------------------------------------------------------------

/// Arguments for [`CREATE_EVENT`].
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateEventArgs {
    pub summary: String,
    pub start_time: String,
    pub end_time: String,
    pub description: Option<String>,
    pub location: Option<String>,
}

/// Arguments for [`LIST_EVENTS`].
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ListEventsArgs {
    pub time_min: String,
    pub time_max: String,
}

/// Arguments for [`GET_EVENT`] and [`DELETE_EVENT`].
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EventIdArgs {
    pub event_id: String,
}

/// Arguments for [`UPDATE_EVENT`].
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateEventArgs {
    pub event_id: String,
    pub summary: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_entry_carries_the_function_envelope() {
        for tool in schemas() {
            let value = serde_json::to_value(&tool).unwrap();
            assert_eq!(value["type"], "function");
            assert!(value["function"]["name"].is_string());
            assert!(value["function"]["description"].is_string());

            let params = &value["function"]["parameters"];
            assert_eq!(params["type"], "object");
            assert!(params["properties"].is_object());
            assert!(params["required"].is_array());
        }
    }

    #[test]
    fn required_names_exist_in_properties() {
        for tool in schemas() {
            let params = &tool.function.parameters;
            for name in &params.required {
                assert!(
                    params.properties.contains_key(name),
                    "{}: required '{}' missing from properties",
                    tool.function.name,
                    name
                );
            }
        }
    }

    #[test]
    fn all_parameters_are_strings() {
        for tool in schemas() {
            for (name, prop) in &tool.function.parameters.properties {
                assert_eq!(prop.kind, "string", "{}.{}", tool.function.name, name);
            }
        }
    }

    #[test]
    fn table_covers_the_five_operations() {
        let names: Vec<_> = schemas().iter().map(|t| t.function.name).collect();
        assert_eq!(
            names,
            vec![CREATE_EVENT, LIST_EVENTS, GET_EVENT, UPDATE_EVENT, DELETE_EVENT]
        );
    }

    #[test]
    fn create_event_required_fields() {
        let tool = schemas()
            .into_iter()
            .find(|t| t.function.name == CREATE_EVENT)
            .unwrap();
        assert_eq!(
            tool.function.parameters.required,
            vec!["summary", "start_time", "end_time"]
        );
        assert_eq!(tool.function.parameters.properties.len(), 5);
    }

    #[test]
    fn create_args_parse_from_model_output() {
        let args: CreateEventArgs = serde_json::from_str(
            r#"{"summary": "Test Event", "start_time": "2023-12-28T09:00:00", "end_time": "2023-12-28T10:00:00"}"#,
        )
        .unwrap();
        assert_eq!(args.summary, "Test Event");
        assert!(args.description.is_none());
    }

    #[test]
    fn unknown_argument_is_rejected() {
        let result: Result<CreateEventArgs, _> =
            serde_json::from_str(r#"{"invalid_arg": "value"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn update_args_presence_is_tracked() {
        let args: UpdateEventArgs =
            serde_json::from_str(r#"{"event_id": "evt-1", "description": ""}"#).unwrap();
        assert_eq!(args.event_id, "evt-1");
        // Explicit empty string is present, not absent.
        assert_eq!(args.description.as_deref(), Some(""));
        assert!(args.summary.is_none());
    }
}
