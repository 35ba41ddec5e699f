//! stackctl CLI
//!
//! Usage: stackctl [--json] [-v] [--profile NAME] <COMMAND>
//!
//! Commands:
//!   deploy    Deploy one or more stack configs
//!   download  Download workspace and filesystem resources
//!   list      List stacks with a stored deploy status
//!   describe  Show the stored deploy status of a stack

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Deploy {
            configs,
            overwrite,
            save_status,
        } => commands::deploy::cmd_deploy(
            &configs,
            overwrite,
            save_status.as_deref(),
            &cli.profile,
            cli.json,
            cli.verbose,
        ),
        Commands::Download { config, overwrite } => commands::download::cmd_download(
            &config,
            overwrite,
            &cli.profile,
            cli.json,
            cli.verbose,
        ),
        Commands::List => commands::list::cmd_list(cli.json),
        Commands::Describe { name } => commands::describe::cmd_describe(&name, cli.json),
    }
}
