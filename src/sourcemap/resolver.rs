//! Per-asset source map resolution.

use log::debug;
use url::Url;

use crate::config::{MAP_SUFFIX, SCRIPT_SUFFIX};
use crate::error_handling::ScanError;
use crate::fetch::Fetcher;
use crate::models::{DiscoveryMethod, MapCandidate};

use super::directive::find_directive;

/// Determines the source map URL for one script asset, if it has one.
///
/// In order, first match wins:
/// 1. a `sourceMappingURL` directive in the asset's content, resolved
///    against the asset URL;
/// 2. for assets whose path ends in `.js`, a HEAD probe of the same URL with
///    `.map` appended to the path, accepted only on HTTP 200.
///
/// `Ok(None)` means the asset has no map, which is the common case.
///
/// # Errors
///
/// Returns [`ScanError::Transport`] when the asset itself cannot be fetched
/// (no probe is attempted then), or [`ScanError::Parse`] when the directive's
/// reference cannot be turned into a URL. Callers treat both as "no map" for
/// this asset only.
pub async fn resolve_map(
    fetcher: &Fetcher,
    asset_url: &str,
) -> Result<Option<MapCandidate>, ScanError> {
    let response = fetcher.get(asset_url).await?.require_success(asset_url)?;

    if let Some(reference) = find_directive(&response.body) {
        let url = resolve_reference(asset_url, reference)?;
        debug!("Directive in {asset_url} points to {url}");
        return Ok(Some(MapCandidate {
            url,
            method: DiscoveryMethod::Directive,
        }));
    }

    let Some(probe_url) = conventional_map_url(asset_url) else {
        return Ok(None);
    };
    if map_exists(fetcher, &probe_url).await {
        debug!("Found {probe_url} by suffix probe");
        return Ok(Some(MapCandidate {
            url: probe_url,
            method: DiscoveryMethod::ConventionalSuffix,
        }));
    }

    Ok(None)
}

/// Resolves a directive's reference relative to the asset that declared it.
pub fn resolve_reference(asset_url: &str, reference: &str) -> Result<String, ScanError> {
    let parse_error = |message: String| ScanError::Parse {
        url: asset_url.to_string(),
        what: "map reference",
        message,
    };
    let base = Url::parse(asset_url).map_err(|e| parse_error(e.to_string()))?;
    base.join(reference)
        .map(|url| url.to_string())
        .map_err(|e| parse_error(format!("{reference:?}: {e}")))
}

/// The conventional sibling map URL of a script asset.
///
/// Only assets whose URL path ends in `.js` qualify (`.mjs`/`.cjs` do not).
/// `.map` is appended to the path; the query string is kept and any fragment
/// is dropped.
pub fn conventional_map_url(asset_url: &str) -> Option<String> {
    let mut url = Url::parse(asset_url).ok()?;
    if !url.path().ends_with(SCRIPT_SUFFIX) {
        return None;
    }
    let path = format!("{}{}", url.path(), MAP_SUFFIX);
    url.set_path(&path);
    url.set_fragment(None);
    Some(url.to_string())
}

/// Existence check: only HTTP 200 counts; other statuses and transport
/// failures mean "does not exist".
async fn map_exists(fetcher: &Fetcher, url: &str) -> bool {
    match fetcher.head(url).await {
        Ok(status) => status == 200,
        Err(e) => {
            debug!("Probe failed: {e}");
            false
        }
    }
}
