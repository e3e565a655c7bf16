//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// fncal - calendar CRUD as LLM-callable functions
#[derive(Debug, Parser)]
#[command(name = "fncal")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to the tools settings file
    #[arg(long, short, env = "FNCAL_CONFIG", default_value = "tools.yaml")]
    pub config: PathBuf,

    /// Name of the tool entry in the settings file
    #[arg(long, short, env = "FNCAL_TOOL", default_value = "google-calendar")]
    pub tool: String,

    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the function-schema table (no network access)
    Schemas,

    /// Create an event and print its id
    Create {
        /// Title of the event
        #[arg(long)]
        summary: String,

        /// Start of the event, e.g. 2024-03-15T10:00:00
        #[arg(long)]
        start: String,

        /// End of the event
        #[arg(long)]
        end: String,

        /// Free-text description
        #[arg(long)]
        description: Option<String>,

        /// Where the event takes place
        #[arg(long)]
        location: Option<String>,
    },

    /// List events starting within a window
    List {
        /// Lower bound (inclusive), e.g. 2024-01-01T00:00:00Z
        #[arg(long)]
        from: String,

        /// Upper bound (exclusive)
        #[arg(long)]
        to: String,
    },

    /// Fetch one event by id
    Get {
        /// Identifier of the event
        event_id: String,
    },

    /// Update fields of an existing event
    Update {
        /// Identifier of the event
        event_id: String,

        /// New title
        #[arg(long)]
        summary: Option<String>,

        /// New start time
        #[arg(long)]
        start: Option<String>,

        /// New end time
        #[arg(long)]
        end: Option<String>,

        /// New description (empty string clears it)
        #[arg(long)]
        description: Option<String>,

        /// New location (empty string clears it)
        #[arg(long)]
        location: Option<String>,
    },

    /// Delete an event by id
    Delete {
        /// Identifier of the event
        event_id: String,
    },
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_update_with_empty_clear() {
        let cli = Cli::parse_from([
            "fncal",
            "--tool",
            "cal",
            "update",
            "evt-1",
            "--summary",
            "New title",
            "--description",
            "",
        ]);
        match cli.command {
            Command::Update {
                event_id,
                summary,
                description,
                ..
            } => {
                assert_eq!(event_id, "evt-1");
                assert_eq!(summary.as_deref(), Some("New title"));
                assert_eq!(description.as_deref(), Some(""));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn schemas_needs_no_extra_arguments() {
        let cli = Cli::parse_from(["fncal", "schemas"]);
        assert!(matches!(cli.command, Command::Schemas));
        assert_eq!(cli.tool, "google-calendar");
    }
}
