//! Scan orchestration.
//!
//! Targets are scanned concurrently, at most `max_concurrency` at a time.
//! Each scan owns its intermediate state and statistics; results are
//! collected here in completion order.

mod target;

use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context, Result};
use futures::stream::FuturesUnordered;
use futures::StreamExt;
use log::{info, warn};
use serde::Serialize;

use crate::app::{log_progress, print_error_statistics, read_target_list, write_json_report};
use crate::config::Config;
use crate::error_handling::ProcessingStats;
use crate::extract::Extractor;
use crate::fetch::Fetcher;
use crate::initialization::init_semaphore;
use crate::models::{ScanResult, Target};

pub use target::{scan_target, ScanContext, TargetOutcome};

/// Totals over every target of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// Targets attempted, including rejected and failed ones
    pub targets_scanned: usize,
    /// Targets with at least one validated map
    pub targets_with_maps: usize,
    /// Validated maps
    pub total_maps: usize,
    /// `sources` entries across all maps
    pub total_sources: usize,
    /// `sources` entries of maps that embed content
    pub sources_with_content: usize,
}

impl ScanSummary {
    /// Computes the totals for `results`.
    pub fn from_results(results: &[ScanResult]) -> Self {
        results.iter().fold(Self::default(), |mut acc, result| {
            acc.targets_scanned += 1;
            if !result.findings.is_empty() {
                acc.targets_with_maps += 1;
            }
            acc.total_maps += result.findings.len();
            acc.total_sources += result.total_sources();
            acc.sources_with_content += result.sources_with_content();
            acc
        })
    }
}

/// Results of a scan run.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    /// Totals
    pub summary: ScanSummary,
    /// Absolute output directory, when persistence was enabled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_dir: Option<PathBuf>,
    /// Elapsed time in seconds
    pub elapsed_seconds: f64,
    /// One entry per target, in completion order
    pub results: Vec<ScanResult>,
}

/// Runs a scan with the provided configuration.
///
/// Reads the target (`url`) or target list (`file`), scans every target
/// and returns the aggregated report. Per-target and per-asset failures are
/// logged and recorded in the report, never returned.
///
/// # Errors
///
/// - The configuration is invalid
/// - Neither a target nor a target list is configured
/// - The target list is missing or unreadable
/// - The HTTP client cannot be built
///
/// # Example
///
/// ```no_run
/// use jsmapfinder::{run_scan, Config};
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config {
///     url: Some("https://example.com".to_string()),
///     output: Some("loot".into()),
///     ..Default::default()
/// };
/// let report = run_scan(config).await?;
/// println!("{} maps", report.summary.total_maps);
/// # Ok(())
/// # }
/// ```
pub async fn run_scan(config: Config) -> Result<ScanReport> {
    config.validate().context("Invalid configuration")?;
    let start_time = Instant::now();

    let raw_targets = if let Some(url) = &config.url {
        vec![url.clone()]
    } else if let Some(file) = &config.file {
        read_target_list(file).await?
    } else {
        bail!("No target given: set a URL or a target list file");
    };

    let fetcher = Fetcher::from_config(&config).context("Failed to initialize HTTP client")?;
    let extractor = match Extractor::from_config(&config) {
        Some(extractor) => {
            if let Err(e) = extractor.layout().prepare().await {
                warn!("{e}; extracted files will not be written");
            }
            Some(Arc::new(extractor))
        }
        None => None,
    };
    let output_dir = match &extractor {
        Some(extractor) => {
            let root = extractor.layout().root();
            Some(
                tokio::fs::canonicalize(root)
                    .await
                    .unwrap_or_else(|_| root.to_path_buf()),
            )
        }
        None => None,
    };

    let mut results = Vec::new();
    let mut seen = HashSet::new();
    let mut targets = Vec::new();
    for raw in raw_targets {
        match Target::parse(&raw) {
            Some(target) if seen.insert(target.clone()) => targets.push(target),
            Some(target) => info!("Skipping duplicate target {target}"),
            None => results.push(ScanResult::failed(raw, "invalid target URL")),
        }
    }

    info!(
        "Scanning {} target(s), {} at a time",
        targets.len(),
        config.max_concurrency
    );

    let ctx = Arc::new(ScanContext { fetcher, extractor });
    let semaphore = init_semaphore(config.max_concurrency);
    let mut tasks = FuturesUnordered::new();

    for target in targets {
        let label = target.to_string();
        let ctx = Arc::clone(&ctx);
        let semaphore = Arc::clone(&semaphore);
        let handle = tokio::spawn(async move {
            // The semaphore is never closed
            let _permit = semaphore.acquire_owned().await.ok();
            scan_target(&ctx, &target).await
        });
        tasks.push(async move { (label, handle.await) });
    }

    let total = tasks.len();
    let stats = ProcessingStats::new();
    let mut completed = 0;
    while let Some((label, joined)) = tasks.next().await {
        completed += 1;
        match joined {
            Ok(outcome) => {
                stats.absorb(&outcome.stats);
                results.push(outcome.result);
            }
            Err(e) => {
                warn!("Scan of {label} aborted: {e}");
                results.push(ScanResult::failed(label, e));
            }
        }
        log_progress(start_time, completed, total);
    }

    print_error_statistics(&stats);

    let report = ScanReport {
        summary: ScanSummary::from_results(&results),
        output_dir,
        elapsed_seconds: start_time.elapsed().as_secs_f64(),
        results,
    };

    if let Some(path) = &config.json_report {
        match write_json_report(&report, path).await {
            Ok(()) => info!("JSON report written to {}", path.display()),
            Err(e) => warn!("Failed to write JSON report: {e:#}"),
        }
    }

    Ok(report)
}
