use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// stackctl - declarative stack deployment
#[derive(Parser, Debug)]
#[command(name = "stackctl")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Emit NDJSON events instead of progress lines
    #[arg(long, global = true)]
    pub json: bool,

    /// Print resource properties and deploy outputs
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Client profile from ~/.stackctl/config.toml
    #[arg(long, global = true, default_value = "default")]
    pub profile: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Deploy one or more stack configs
    Deploy {
        /// Stack config file, or a directory containing config.json
        #[arg(required = true)]
        configs: Vec<PathBuf>,

        /// Replace remote notebooks and files that already exist
        #[arg(short, long)]
        overwrite: bool,

        /// Also write the deploy status to this path
        #[arg(long, value_name = "PATH")]
        save_status: Option<PathBuf>,
    },

    /// Download workspace and filesystem resources to their local paths
    Download {
        /// Stack config file, or a directory containing config.json
        config: PathBuf,

        /// Replace local files that already exist
        #[arg(short, long)]
        overwrite: bool,
    },

    /// List stacks with a stored deploy status
    List,

    /// Show the stored deploy status of a stack
    Describe {
        /// Stack name
        name: String,
    },
}
