//! Output Rendering
//!
//! Plain-text views for `list` and `describe`. Colors are applied by the
//! caller; these functions only lay text out.

use std::fmt::Write;

use crate::application::StackSummary;
use crate::domain::entities::StackStatus;

/// Per-resource table of a stored status
pub fn render_status(status: &StackStatus) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Stack: {}", status.name);
    if !status.cli_version.is_empty() {
        let _ = writeln!(out, "Deployed with: stackctl {}", status.cli_version);
    }
    let configured = status.resources.len();
    let _ = writeln!(
        out,
        "Resources: {} configured, {} recorded",
        configured,
        status.deployed.len()
    );

    for entry in &status.deployed {
        let still_configured = status
            .resources
            .iter()
            .any(|r| r.key() == entry.key());
        let state = if entry.success { "ok" } else { "failed" };
        let _ = writeln!(out);
        let _ = writeln!(out, "{} [{}] {}", entry.id, entry.service, state);
        let _ = writeln!(out, "  physical id: {}", entry.physical_id);
        let _ = writeln!(
            out,
            "  deployed at: {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
        );
        if let Some(error) = &entry.error_message {
            let _ = writeln!(out, "  error: {}", error);
        }
        if !still_configured {
            let _ = writeln!(out, "  (no longer in the stack config)");
        }
    }
    out
}

pub fn render_stack_list(stacks: &[StackSummary]) -> String {
    if stacks.is_empty() {
        return "No stacks deployed yet.\n".to_string();
    }
    let width = stacks.iter().map(|s| s.name.len()).max().unwrap_or(0);
    let mut out = String::new();
    for stack in stacks {
        let _ = write!(out, "{:<width$}  {} resources", stack.name, stack.resources);
        if stack.failed > 0 {
            let _ = write!(out, ", {} failed", stack.failed);
        }
        out.push('\n');
    }
    out
}
