//! Command-line and environment configuration.
//!
//! Every flag can also be set through the environment (or a `.env` file).

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use gallery_core::DEFAULT_WINDOW_SIZE;
use gallery_engine::FetchSettings;

#[derive(Debug, Parser)]
#[command(name = "gallery", version, about = "Extract and browse the images of a web page")]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace).
    #[arg(long, env = "GALLERY_LOG", default_value = "info", global = true)]
    pub log_level: String,

    /// Also write logs to this file.
    #[arg(long, env = "GALLERY_LOG_FILE", global = true)]
    pub log_file: Option<PathBuf>,

    /// Total time allowed for fetching one page.
    #[arg(long, env = "GALLERY_REQUEST_TIMEOUT_SECS", default_value_t = 30, global = true)]
    pub request_timeout_secs: u64,

    /// Largest page body accepted, in bytes.
    #[arg(long, env = "GALLERY_MAX_BYTES", default_value_t = 5 * 1024 * 1024, global = true)]
    pub max_bytes: u64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Serve the extraction endpoint over HTTP.
    Serve {
        #[arg(long, env = "GALLERY_BIND", default_value = "127.0.0.1:8888")]
        bind: SocketAddr,
    },
    /// Run a gallery session against one URL and print what it reveals.
    Scan(ScanArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ScanArgs {
    /// Page to scan.
    pub url: String,

    /// Follow the site's pagination instead of windowing one page.
    #[arg(long)]
    pub remote: bool,

    /// Images revealed per step when windowing one page.
    #[arg(long, default_value_t = DEFAULT_WINDOW_SIZE)]
    pub window: usize,

    /// Maximum number of growth steps after the first response.
    #[arg(long, default_value_t = 10)]
    pub max_rounds: usize,

    /// Only show these extensions (comma separated, e.g. jpg,png).
    #[arg(long, value_delimiter = ',')]
    pub only: Vec<String>,
}

impl Cli {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn fetch_settings(&self) -> FetchSettings {
        FetchSettings {
            request_timeout: self.request_timeout(),
            max_bytes: self.max_bytes,
            ..FetchSettings::default()
        }
    }
}
