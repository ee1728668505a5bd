//! Scan data model: targets, candidates, findings and per-target results.

use std::fmt;

use serde::Serialize;

use crate::sourcemap::SourceMapDocument;

/// A page URL to scan, normalized (scheme added, syntax checked).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Target(String);

impl Target {
    /// Normalizes raw input into a target, or `None` if it is not a usable
    /// http(s) URL. Rejections are logged.
    pub fn parse(raw: &str) -> Option<Self> {
        crate::app::validate_and_normalize_url(raw.trim()).map(Target)
    }

    /// The normalized URL.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `host[:port]` of the target, with `:` replaced so the value is safe
    /// inside file names. Empty if the URL has no host.
    pub fn host_label(&self) -> String {
        url::Url::parse(&self.0)
            .ok()
            .and_then(|u| {
                let host = u.host_str()?.to_string();
                Some(match u.port() {
                    Some(port) => format!("{host}_{port}"),
                    None => host,
                })
            })
            .unwrap_or_default()
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A script asset referenced by a target page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetReference {
    /// Absolute asset URL
    pub url: String,
    /// Page that referenced it
    pub target: Target,
}

/// How a map URL was discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiscoveryMethod {
    /// A `sourceMappingURL` comment in the asset
    Directive,
    /// A successful probe of `<asset>.map`
    ConventionalSuffix,
}

impl fmt::Display for DiscoveryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DiscoveryMethod::Directive => "directive",
            DiscoveryMethod::ConventionalSuffix => "conventional-suffix",
        })
    }
}

/// A possible map location for one script asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapCandidate {
    /// Absolute map URL
    pub url: String,
    /// How it was found
    pub method: DiscoveryMethod,
}

/// A validated source map and the asset that led to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MapFinding {
    /// Map URL
    pub map_url: String,
    /// Script asset the map belongs to
    pub asset_url: String,
    /// How the map was discovered
    pub method: DiscoveryMethod,
    /// Number of `sources` entries
    pub sources_count: usize,
    /// Whether any source text is embedded
    pub has_content: bool,
    /// Files written for this map (0 when persistence is disabled)
    pub extracted_files: usize,
}

impl MapFinding {
    /// Summarizes a validated document.
    pub fn new(asset_url: &str, candidate: MapCandidate, document: &SourceMapDocument) -> Self {
        Self {
            map_url: candidate.url,
            asset_url: asset_url.to_string(),
            method: candidate.method,
            sources_count: document.sources_count(),
            has_content: document.has_content(),
            extracted_files: 0,
        }
    }
}

/// Everything found for one target.
#[derive(Debug, Clone, Serialize)]
pub struct ScanResult {
    /// Target as scanned (normalized), or the raw input if it was rejected
    pub target: String,
    /// Findings in asset order
    pub findings: Vec<MapFinding>,
    /// Why the target produced no findings, when it failed before asset
    /// resolution
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScanResult {
    /// A result with no findings and a recorded failure.
    pub fn failed(target: impl Into<String>, error: impl fmt::Display) -> Self {
        Self {
            target: target.into(),
            findings: Vec::new(),
            error: Some(error.to_string()),
        }
    }

    /// Total `sources` entries across this target's maps.
    pub fn total_sources(&self) -> usize {
        self.findings.iter().map(|f| f.sources_count).sum()
    }

    /// `sources` entries of maps that embed content.
    pub fn sources_with_content(&self) -> usize {
        self.findings
            .iter()
            .filter(|f| f.has_content)
            .map(|f| f.sources_count)
            .sum()
    }
}
