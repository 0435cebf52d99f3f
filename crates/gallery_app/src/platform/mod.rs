pub mod config;
pub mod effects;
pub mod scan;
pub mod server;

use gallery_logging::LogDestination;

use config::Cli;

pub fn init_logging(cli: &Cli) {
    let destination = match &cli.log_file {
        Some(path) => LogDestination::Both(path.clone()),
        None => LogDestination::Terminal,
    };
    gallery_logging::initialize(destination, gallery_logging::parse_level(&cli.log_level));
}
