use std::path::PathBuf;

use clap::Parser;

use super::config::{AppConfig, DEFAULT_CONFIG_FILE};

/// Describe a website, get a generated preview.
#[derive(Debug, Parser)]
#[command(name = "sitecraft", version)]
pub struct Cli {
    /// RON config file; missing means defaults.
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Origin of the generation API, e.g. http://localhost:5000.
    #[arg(long)]
    pub base_url: Option<String>,

    /// Client-side request timeout in seconds (default: none).
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Where logs go: file, terminal or both.
    #[arg(long)]
    pub log: Option<String>,

    /// Log file path (default ./sitecraft.log).
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Log at debug level.
    #[arg(short, long)]
    pub verbose: bool,

    /// Print the effective config as RON and exit.
    #[arg(long)]
    pub print_config: bool,
}

impl Cli {
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(timeout) = self.timeout {
            config.request_timeout_secs = Some(timeout);
        }
        if let Some(log) = &self.log {
            config.log_destination = log.clone();
        }
    }
}
