//! Download command handler

use std::path::Path;

use anyhow::{bail, Context, Result};

use stackctl::application::DownloadOptions;
use stackctl::infrastructure::load_stack_definition;
use stackctl::presentation::factory;

use super::{client_profile, event_sink};

pub fn cmd_download(
    config: &Path,
    overwrite: bool,
    profile: &str,
    json: bool,
    verbose: u8,
) -> Result<()> {
    let definition = load_stack_definition(config)?;
    let profile = client_profile(profile, json)?;
    let use_case = factory::create_download_use_case(&profile)?;

    let options = DownloadOptions::new(&definition.base_dir).with_overwrite(overwrite);
    let result = use_case
        .execute_with_events(&definition.config, &options, event_sink(json, verbose))
        .with_context(|| format!("failed to download stack '{}'", definition.config.name))?;

    if !result.is_success() {
        bail!("{} resource(s) failed to download", result.errors.len());
    }
    Ok(())
}
