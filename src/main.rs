//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `jsmapfinder` library that handles:
//! - Command-line argument parsing
//! - Logger initialization
//! - User-facing report output
//!
//! All core functionality is implemented in the library crate.

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::error;

use jsmapfinder::initialization::init_logger_with;
use jsmapfinder::{print_report, run_scan, Config};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    init_logger_with(config.effective_log_level(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    match run_scan(config).await {
        Ok(report) => {
            print_report(&report);
            Ok(())
        }
        Err(e) => {
            error!("jsmapfinder error: {e:#}");
            process::exit(1);
        }
    }
}
