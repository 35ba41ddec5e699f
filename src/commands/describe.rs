//! Describe command handler

use anyhow::{anyhow, Result};
use serde_json::json;

use stackctl::presentation::factory;
use stackctl::presentation::output::render_status;

use super::emit_json;

pub fn cmd_describe(name: &str, json: bool) -> Result<()> {
    let status = factory::create_stacks_query()?
        .describe(name)?
        .ok_or_else(|| anyhow!("no deploy status found for stack '{}'", name))?;

    if json {
        emit_json(json!({
            "event": "data",
            "command": "describe",
            "status": status,
        }));
        return Ok(());
    }

    print!("{}", render_status(&status));
    Ok(())
}
