//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `certhost` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - Exit status and the final summary on stderr
//!
//! All core functionality is implemented in the library crate. Stdout carries
//! only result records.

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::process;

use certhost::config::Opt;
use certhost::initialization::init_logger_with;
use certhost::{run_lookup, Config};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("certhost error: {:#}", e);
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let config = Config::from(Opt::parse());

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    let report = run_lookup(config).await?;
    info!("{report}");
    Ok(())
}
