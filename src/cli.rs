//! Command-line interface definitions using clap

use clap::Parser;
use std::path::PathBuf;

/// ipinfo - IP geolocation service
#[derive(Debug, Parser)]
#[command(name = "ipinfo")]
#[command(about = "Shows the caller's IP address and location", long_about = None)]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Print version, revision and build date, then exit
    #[arg(long, short = 'v')]
    pub version: bool,

    /// JSON configuration file (overrides IPINFO_CONFIG)
    #[arg(long, short = 'c')]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Environment lookup with `--config` taking the place of `IPINFO_CONFIG`.
    pub fn env_var(&self, key: &str) -> Option<String> {
        match (&self.config, key) {
            (Some(path), "IPINFO_CONFIG") => Some(path.to_string_lossy().into_owned()),
            _ => std::env::var(key).ok(),
        }
    }
}
