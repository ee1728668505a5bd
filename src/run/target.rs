//! Single-target scan: assets, then per asset resolve, validate, extract.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::assets::locate_assets;
use crate::error_handling::{update_error_stats, InfoType, ProcessingStats, WarningType};
use crate::extract::{naming_seed, Extractor};
use crate::fetch::Fetcher;
use crate::models::{AssetReference, DiscoveryMethod, MapFinding, ScanResult, Target};
use crate::sourcemap::{resolve_map, validate_map};

/// Resources shared by every target scan of a run.
pub struct ScanContext {
    /// HTTP access; its connection pool is shared across workers
    pub fetcher: Fetcher,
    /// Present only when persistence is enabled
    pub extractor: Option<Arc<Extractor>>,
}

/// What one target scan produced.
pub struct TargetOutcome {
    /// Findings for the target
    pub result: ScanResult,
    /// Counters owned by this scan, merged by the orchestrator
    pub stats: ProcessingStats,
}

/// Scans one target to completion.
///
/// Never fails: a page that cannot be fetched yields a result with no
/// findings and the error recorded, and any failure while handling one
/// asset only drops that asset.
pub async fn scan_target(ctx: &ScanContext, target: &Target) -> TargetOutcome {
    let stats = ProcessingStats::new();

    let located = match locate_assets(&ctx.fetcher, target.as_str()).await {
        Ok(located) => located,
        Err(e) => {
            warn!("Failed to scan {target}: {e}");
            update_error_stats(&stats, &e);
            return TargetOutcome {
                result: ScanResult::failed(target.as_str(), e),
                stats,
            };
        }
    };

    if located.assets.is_empty() {
        debug!("No script assets on {}", located.final_url);
        stats.increment_warning(WarningType::NoScriptAssets);
    }

    let host = target.host_label();
    let mut findings = Vec::new();
    // Sorted set, so the index (and the file names derived from it) is stable
    for (index, url) in located.assets.into_iter().enumerate() {
        let asset = AssetReference {
            url,
            target: target.clone(),
        };
        if let Some(finding) = scan_asset(ctx, &asset, &naming_seed(index, &host), &stats).await {
            findings.push(finding);
        }
    }

    if !findings.is_empty() {
        info!("{target}: {} source map(s) found", findings.len());
    }

    TargetOutcome {
        result: ScanResult {
            target: target.to_string(),
            findings,
            error: None,
        },
        stats,
    }
}

async fn scan_asset(
    ctx: &ScanContext,
    asset: &AssetReference,
    seed: &str,
    stats: &ProcessingStats,
) -> Option<MapFinding> {
    let candidate = match resolve_map(&ctx.fetcher, &asset.url).await {
        Ok(Some(candidate)) => candidate,
        Ok(None) => {
            debug!("No source map for {}", asset.url);
            return None;
        }
        Err(e) => {
            debug!("Skipping asset {} of {}: {e}", asset.url, asset.target);
            update_error_stats(stats, &e);
            return None;
        }
    };

    let document = match validate_map(&ctx.fetcher, &candidate.url).await {
        Ok(document) => document,
        Err(e) => {
            debug!("Discarding candidate {}: {e}", candidate.url);
            update_error_stats(stats, &e);
            return None;
        }
    };

    stats.increment_info(match candidate.method {
        DiscoveryMethod::Directive => InfoType::DirectiveMatch,
        DiscoveryMethod::ConventionalSuffix => InfoType::ConventionalSuffixMatch,
    });
    if !document.has_embedded_text() {
        stats.increment_warning(WarningType::MissingSourcesContent);
    }

    let mut finding = MapFinding::new(&asset.url, candidate, &document);
    info!(
        "Found source map {} ({}, {} sources, content: {})",
        finding.map_url, finding.method, finding.sources_count, finding.has_content
    );

    if let Some(extractor) = &ctx.extractor {
        match extractor.extract(&document, seed, stats).await {
            Ok(summary) => {
                finding.extracted_files = summary.sources.len();
                info!(
                    "Extracted {} file(s) from {} into {}",
                    summary.sources.len(),
                    finding.map_url,
                    extractor.layout().root().display()
                );
            }
            Err(e) => {
                warn!("Failed to persist {}: {e}", finding.map_url);
                update_error_stats(stats, &e);
            }
        }
    }

    Some(finding)
}
