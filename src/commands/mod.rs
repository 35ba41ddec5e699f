//! Command handlers

pub mod deploy;
pub mod describe;
pub mod download;
pub mod list;

use std::sync::Arc;

use anyhow::Result;
use crossterm::style::Stylize;
use is_terminal::IsTerminal;

use stackctl::domain::ports::StackEventSink;
use stackctl::infrastructure::config::{load_client_profile, ClientProfile};
use stackctl::infrastructure::{ConsoleEventSink, JsonEventSink};

/// Event sink for `--json` / `-v`
pub fn event_sink(json: bool, verbose: u8) -> Arc<dyn StackEventSink> {
    if json {
        Arc::new(JsonEventSink::stdout())
    } else {
        Arc::new(ConsoleEventSink::stdout(verbose > 0))
    }
}

/// Resolve the client profile, reporting unknown config keys on stderr
pub fn client_profile(profile: &str, json: bool) -> Result<ClientProfile> {
    let (resolved, warnings) = load_client_profile(profile)?;
    if !json {
        for warning in warnings {
            eprintln!("{} {}", warn_marker(), warning);
        }
    }
    Ok(resolved)
}

fn warn_marker() -> String {
    if std::io::stderr().is_terminal() && std::env::var_os("NO_COLOR").is_none() {
        "warning:".yellow().to_string()
    } else {
        "warning:".to_string()
    }
}

/// Print a single JSON value on its own line
pub fn emit_json(value: serde_json::Value) {
    println!("{}", value);
}
