// Meditation Calendar
// Command line entry point

mod cli;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    env_logger::init();

    let args = cli::Cli::parse();
    log::debug!("Starting Meditation Calendar");

    cli::run(args)
}
