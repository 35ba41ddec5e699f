//! Console Event Sink
//!
//! Human-readable progress lines. Properties and deploy outputs are only
//! printed in verbose mode.

use std::io::{self, Write};
use std::sync::Mutex;

use crossterm::style::Stylize;
use is_terminal::IsTerminal;

use crate::domain::ports::{StackCommand, StackEvent, StackEventSink};

pub struct ConsoleEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
    color: bool,
    verbose: bool,
}

impl ConsoleEventSink {
    /// Progress on stdout; colored when stdout is a terminal and
    /// `NO_COLOR` is unset
    pub fn stdout(verbose: bool) -> Self {
        let color = io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none();
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
            color,
            verbose,
        }
    }

    pub fn with_writer<W: Write + Send + 'static>(writer: W, verbose: bool) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
            color: false,
            verbose,
        }
    }
}

fn pretty(value: &impl serde::Serialize) -> String {
    serde_json::to_string_pretty(value).unwrap_or_default()
}

fn indent(text: &str) -> String {
    text.lines()
        .map(|line| format!("    {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render one event, or `None` when it has nothing to say at this verbosity
pub(crate) fn render_event(event: &StackEvent, color: bool, verbose: bool) -> Option<String> {
    let ok = |s: &str| if color { s.green().to_string() } else { s.to_string() };
    let bad = |s: &str| if color { s.red().to_string() } else { s.to_string() };
    let warn = |s: &str| if color { s.yellow().to_string() } else { s.to_string() };
    let dim = |s: &str| if color { s.dim().to_string() } else { s.to_string() };

    let line = match event {
        StackEvent::Started {
            command,
            stack,
            resource_count,
        } => {
            let verb = match command {
                StackCommand::Deploy => "Deploying",
                StackCommand::Download => "Downloading",
            };
            format!("{} stack {} ({} resources)", verb, stack, resource_count)
        }
        StackEvent::ResourceStarted {
            id,
            service,
            properties,
            ..
        } => {
            let mut line = format!("{} {} [{}]", dim("→"), id, service);
            if verbose {
                line.push('\n');
                line.push_str(&indent(&pretty(properties)));
            }
            line
        }
        StackEvent::ResourceDeployed {
            id,
            action,
            physical_id,
            output,
            ..
        } => {
            let mut line = format!(
                "  {} {} {} ({})",
                ok("✓"),
                action.as_str(),
                id,
                physical_id
            );
            if verbose && !output.is_null() {
                line.push('\n');
                line.push_str(&indent(&pretty(output)));
            }
            line
        }
        StackEvent::ResourceDownloaded { id, written, .. } => {
            let mut line = format!("  {} downloaded {} ({} files)", ok("✓"), id, written.len());
            if verbose {
                for path in written {
                    line.push_str(&format!("\n    {}", path.display()));
                }
            }
            line
        }
        StackEvent::ResourceSkipped { id, reason, .. } => {
            format!("  {} skipped {}: {}", dim("-"), id, reason)
        }
        StackEvent::Warning { message, .. } => format!("  {} {}", warn("!"), message),
        StackEvent::ResourceFailed { id, error, .. } => {
            format!("  {} {} failed: {}", bad("✗"), id, error)
        }
        StackEvent::StatusSaved { path } => {
            if !verbose {
                return None;
            }
            format!("Status saved to {}", path.display())
        }
        StackEvent::StatusCopyFailed { path, error } => format!(
            "{} could not write status copy to {}: {}",
            warn("!"),
            path.display(),
            error
        ),
        StackEvent::Completed {
            succeeded,
            failed,
            skipped,
            ..
        } => {
            let summary = format!(
                "{} succeeded, {} failed, {} skipped",
                succeeded, failed, skipped
            );
            if *failed > 0 {
                bad(&summary)
            } else {
                ok(&summary)
            }
        }
    };
    Some(line)
}

impl StackEventSink for ConsoleEventSink {
    fn on_event(&self, event: StackEvent) {
        let Some(line) = render_event(&event, self.color, self.verbose) else {
            return;
        };
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
    }
}
