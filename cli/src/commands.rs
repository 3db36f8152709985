pub mod discover;
pub mod watch;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "lanid")]
#[command(about = "Identifies devices on the local network.")]
pub struct CommandLine {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run one discovery cycle and print the result
    #[command(alias = "d")]
    Discover {
        /// Read this file instead of the system hosts file
        #[arg(long)]
        hosts_path: Option<PathBuf>,
    },
    /// Keep discovering in the background until interrupted
    #[command(alias = "w")]
    Watch {
        /// Seconds between refresh cycles
        #[arg(long, default_value_t = 3600)]
        interval: u64,
        /// Do not start the refresher (lookups against loaded clients only)
        #[arg(long)]
        offline: bool,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
