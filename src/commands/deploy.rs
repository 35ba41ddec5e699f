//! Deploy command handler

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use stackctl::application::DeployOptions;
use stackctl::infrastructure::load_stack_definition;
use stackctl::presentation::factory;

use super::{client_profile, event_sink};

pub fn cmd_deploy(
    configs: &[PathBuf],
    overwrite: bool,
    save_status: Option<&Path>,
    profile: &str,
    json: bool,
    verbose: u8,
) -> Result<()> {
    if save_status.is_some() && configs.len() > 1 {
        bail!("--save-status takes a single stack config; got {}", configs.len());
    }

    // Every config is validated before anything touches the remote side.
    let definitions = configs
        .iter()
        .map(|path| load_stack_definition(path))
        .collect::<Result<Vec<_>, _>>()?;

    let profile = client_profile(profile, json)?;
    let use_case = factory::create_deploy_use_case(&profile)?;
    let sink = event_sink(json, verbose);

    let mut failed = 0;
    for definition in &definitions {
        let options = DeployOptions::new(&definition.base_dir)
            .with_overwrite(overwrite)
            .with_save_status(save_status.map(Path::to_path_buf));
        let result = use_case
            .execute_with_events(&definition.config, &options, sink.clone())
            .with_context(|| format!("failed to deploy stack '{}'", definition.config.name))?;
        failed += result.failed;
    }

    if failed > 0 {
        bail!("{} resource(s) failed to deploy", failed);
    }
    Ok(())
}
