//! List command handler

use anyhow::Result;
use serde_json::json;

use stackctl::presentation::factory;
use stackctl::presentation::output::render_stack_list;

use super::emit_json;

pub fn cmd_list(json: bool) -> Result<()> {
    let stacks = factory::create_stacks_query()?.list()?;

    if json {
        emit_json(json!({
            "event": "data",
            "command": "list",
            "stacks": stacks
                .iter()
                .map(|s| json!({
                    "name": s.name,
                    "resources": s.resources,
                    "failed": s.failed,
                }))
                .collect::<Vec<_>>(),
        }));
        return Ok(());
    }

    print!("{}", render_stack_list(&stacks));
    Ok(())
}
