//! Human-readable and JSON reports.

use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result};
use colored::*;

use crate::run::ScanReport;

/// Writes the per-target findings and the final summary.
pub fn write_report<W: Write>(out: &mut W, report: &ScanReport) -> io::Result<()> {
    for result in &report.results {
        if let Some(error) = &result.error {
            writeln!(out, "{} {}: {}", "[!]".red(), result.target, error)?;
            continue;
        }
        if result.findings.is_empty() {
            writeln!(out, "{} {}: no source maps found", "[-]".dimmed(), result.target)?;
            continue;
        }
        writeln!(out, "{} {}", "[+]".green().bold(), result.target)?;
        for finding in &result.findings {
            writeln!(out, "    map:     {}", finding.map_url.cyan())?;
            writeln!(out, "    asset:   {} ({})", finding.asset_url, finding.method)?;
            write!(
                out,
                "    sources: {}, embedded content: {}",
                finding.sources_count,
                if finding.has_content { "yes" } else { "no" }
            )?;
            if report.output_dir.is_some() {
                write!(out, ", files written: {}", finding.extracted_files)?;
            }
            writeln!(out)?;
        }
    }

    let summary = &report.summary;
    writeln!(out)?;
    writeln!(out, "{}", "Summary".bold())?;
    writeln!(out, "  Targets scanned:        {}", summary.targets_scanned)?;
    writeln!(out, "  Targets with maps:      {}", summary.targets_with_maps)?;
    writeln!(out, "  Source maps found:      {}", summary.total_maps)?;
    writeln!(out, "  Source entries:         {}", summary.total_sources)?;
    writeln!(out, "  Entries with content:   {}", summary.sources_with_content)?;
    if let Some(dir) = &report.output_dir {
        writeln!(out, "  Output directory:       {}", dir.display())?;
    }
    writeln!(out, "  Elapsed:                {:.1}s", report.elapsed_seconds)
}

/// Prints the report to stdout.
pub fn print_report(report: &ScanReport) {
    let stdout = io::stdout();
    let mut lock = stdout.lock();
    // A closed stdout (e.g. piped into `head`) is not worth failing over
    let _ = write_report(&mut lock, report);
}

/// Serializes the full report as pretty JSON to `path`.
pub async fn write_json_report(report: &ScanReport, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
    tokio::fs::write(path, json)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))
}
