use anyhow::Result;
use clap::Parser;
use std::fs::{self, OpenOptions};
use wardbook::{cli, util, Config};

fn main() -> Result<()> {
    let args = cli::Cli::parse();
    util::init_data_dir(args.data_dir.clone());

    // Initialize logging to file (~/.wardbook/logs/wardbook.log)
    fs::create_dir_all(util::logs_dir())?;

    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(util::log_file_path())?;

    let config = Config::load();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_filter)),
        )
        .with_writer(log_file)
        .with_ansi(false) // Disable ANSI colors in log file
        .init();

    cli::run(args.command, &config)
}
