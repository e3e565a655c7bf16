//! fncal CLI entry point.

mod cli;
mod error;

use std::process::ExitCode;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use fncal_google::{CalendarTool, EventChanges, parse_utc, schemas};

use crate::cli::{Cli, Command};
use crate::error::CliResult;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.debug {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(Level::WARN.to_string()))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    let Cli {
        config,
        tool: tool_name,
        command,
        ..
    } = cli;
    // Only the commands that talk to the backend construct an adapter; the
    // schema table is static and needs neither settings nor network.
    let adapter = || CalendarTool::from_settings_file(&config, &tool_name);

    match command {
        Command::Schemas => print_json(&schemas()),
        Command::Create {
            summary,
            start,
            end,
            description,
            location,
        } => {
            let id = adapter()?.create_event(
                &summary,
                &start,
                &end,
                description.as_deref(),
                location.as_deref(),
            )?;
            print_json(&serde_json::json!({ "event_id": id }))
        }
        Command::List { from, to } => {
            let events = adapter()?.list_events(parse_utc(&from)?, parse_utc(&to)?)?;
            print_json(&events)
        }
        Command::Get { event_id } => print_json(&adapter()?.get_event(&event_id)?),
        Command::Update {
            event_id,
            summary,
            start,
            end,
            description,
            location,
        } => {
            let changes = EventChanges {
                summary,
                start_time: start,
                end_time: end,
                description,
                location,
            };
            print_json(&adapter()?.update_event(&event_id, &changes)?)
        }
        Command::Delete { event_id } => {
            adapter()?.delete_event(&event_id)?;
            print_json(&serde_json::json!({ "deleted": event_id }))
        }
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> CliResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
