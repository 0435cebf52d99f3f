mod platform;

use anyhow::Result;
use clap::Parser;

use platform::config::{Cli, Command};

fn main() -> Result<()> {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    platform::init_logging(&cli);

    let settings = cli.fetch_settings();
    match &cli.command {
        Command::Serve { bind } => platform::server::run(*bind, settings),
        Command::Scan(args) => platform::scan::run(args, settings),
    }
}
