//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{ArgGroup, Parser, ValueEnum};
use thiserror::Error;

use crate::config::constants::{
    CONTENT_FETCH_TIMEOUT_SECS, DEFAULT_MAX_CONCURRENCY, DEFAULT_USER_AGENT, PROBE_TIMEOUT_SECS,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Scan configuration.
///
/// Parsed from the command line by the binary, or constructed directly by
/// library users (start from `Config::default()` and set `url` or `file`).
///
/// # Examples
///
/// ```no_run
/// use jsmapfinder::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     url: Some("https://example.com".to_string()),
///     output: Some(PathBuf::from("results")),
///     beautify: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "jsmapfinder",
    version,
    about = "Discover exposed JavaScript source maps and extract their embedded sources"
)]
#[command(group(ArgGroup::new("input").required(true).args(["url", "file"])))]
pub struct Config {
    /// Target page URL to scan
    #[arg(short = 'u', long)]
    pub url: Option<String>,

    /// File containing one target URL per line (blank lines ignored)
    #[arg(short = 'f', long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Extra request header, repeatable (e.g. -H "Cookie: session=abc")
    #[arg(short = 'H', long = "header", value_name = "KEY: VALUE")]
    pub headers: Vec<String>,

    /// Verbose output (per-asset diagnostics)
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Reformat extracted JavaScript/TypeScript sources
    #[arg(short = 'b', long)]
    pub beautify: bool,

    /// Directory to save source maps and extracted sources into
    #[arg(short = 'o', long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Maximum number of targets scanned concurrently
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// Timeout in seconds for page, script and map fetches
    #[arg(long, default_value_t = CONTENT_FETCH_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Timeout in seconds for `.map` existence probes
    #[arg(long, default_value_t = PROBE_TIMEOUT_SECS)]
    pub probe_timeout_seconds: u64,

    /// Default User-Agent header (a `-H User-Agent:` override wins)
    #[arg(long, default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Write the full scan report as JSON to this path
    #[arg(long, value_name = "PATH")]
    pub json_report: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            url: None,
            file: None,
            headers: Vec::new(),
            verbose: false,
            beautify: false,
            output: None,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            timeout_seconds: CONTENT_FETCH_TIMEOUT_SECS,
            probe_timeout_seconds: PROBE_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            json_report: None,
        }
    }
}

/// A configuration value that cannot be used for a scan.
#[derive(Error, Debug)]
#[error("invalid value for {field}: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong and what is expected instead
    pub message: String,
}

impl Config {
    /// Log level actually applied: `--verbose` raises it to at least Debug.
    pub fn effective_log_level(&self) -> log::LevelFilter {
        let level = log::LevelFilter::from(self.log_level.clone());
        if self.verbose {
            level.max(log::LevelFilter::Debug)
        } else {
            level
        }
    }

    /// Timeout for content fetches.
    pub fn content_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    /// Timeout for existence probes.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_seconds)
    }

    /// Checks values that clap cannot constrain on its own.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.max_concurrency == 0 {
            return Err(ConfigValidationError {
                field: "max_concurrency",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigValidationError {
                field: "timeout_seconds",
                message: "must be greater than 0".to_string(),
            });
        }
        if self.probe_timeout_seconds == 0 {
            return Err(ConfigValidationError {
                field: "probe_timeout_seconds",
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}
