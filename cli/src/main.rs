mod commands;
mod terminal;

use commands::{CommandLine, Commands, discover, watch};
use terminal::print;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    terminal::logging::init();

    match commands.command {
        Commands::Discover { hosts_path } => {
            print::header("running one discovery cycle");
            discover::discover(hosts_path).await
        }
        Commands::Watch { interval, offline } => {
            print::header("watching the network");
            watch::watch(interval, offline).await
        }
    }
}
