mod app;
mod cli;
mod clipboard;
mod config;
mod effects;
mod ui;

use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use sitecraft_logging::{site_info, site_warn};

use cli::Cli;
use config::{load_config, AppConfig};

pub fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let (mut config, config_error) = match load_config(&cli.config) {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };
    cli.apply_overrides(&mut config);

    if cli.print_config {
        println!("{}", config.to_ron().context("serializing config")?);
        return Ok(());
    }

    let destination = config.log_destination()?;
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    sitecraft_logging::initialize(destination, level, cli.log_file.as_deref());

    if let Some(err) = config_error {
        site_warn!("{}; using defaults", err);
        eprintln!("Warning: {err}; using defaults");
    }
    site_info!(
        "Starting with endpoint {} (timeout {:?})",
        config.generate_settings().endpoint(),
        config.request_timeout_secs
    );

    app::run_app(config)
}
