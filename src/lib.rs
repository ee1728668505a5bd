//! jsmapfinder library: source map discovery and extraction
//!
//! Given a target page, this library locates the scripts it references,
//! finds each script's source map (via a `sourceMappingURL` directive or the
//! conventional `<script>.map` sibling), validates it, and optionally writes
//! the map plus every embedded original source file to disk.
//!
//! # Example
//!
//! ```no_run
//! use jsmapfinder::{run_scan, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     file: Some(std::path::PathBuf::from("targets.txt")),
//!     output: Some(std::path::PathBuf::from("loot")),
//!     beautify: true,
//!     ..Default::default()
//! };
//!
//! let report = run_scan(config).await?;
//! println!(
//!     "{} of {} targets expose source maps ({} maps)",
//!     report.summary.targets_with_maps,
//!     report.summary.targets_scanned,
//!     report.summary.total_maps
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime. Use `#[tokio::main]` in your application
//! or ensure you're calling library functions within an async context.

#![warn(missing_docs)]

mod app;
pub mod assets;
pub mod config;
pub mod error_handling;
pub mod extract;
pub mod fetch;
pub mod initialization;
pub mod models;
mod run;
pub mod sourcemap;
mod utils;

// Re-export public API
pub use app::{
    parse_target_list, print_report, read_target_list, validate_and_normalize_url,
    write_json_report, write_report,
};
pub use config::{Config, LogFormat, LogLevel};
pub use error_handling::{FetchError, ProcessingStats, ScanError};
pub use models::{AssetReference, DiscoveryMethod, MapCandidate, MapFinding, ScanResult, Target};
pub use run::{run_scan, scan_target, ScanContext, ScanReport, ScanSummary, TargetOutcome};
