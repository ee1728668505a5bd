//! Script asset discovery.
//!
//! Fetches a target page and collects the URLs of every `<script src>` it
//! references, resolved against the page's final URL (after redirects).

use std::collections::BTreeSet;
use std::sync::LazyLock;

use log::debug;
use scraper::{Html, Selector};
use url::Url;

use crate::error_handling::ScanError;
use crate::fetch::Fetcher;
use crate::utils::parse_selector_unsafe;

static SCRIPT_SRC_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_selector_unsafe("script[src]", "script asset discovery"));

/// Script assets referenced by one page.
#[derive(Debug, Clone)]
pub struct LocatedAssets {
    /// Page URL after redirects; the base every `src` was resolved against
    pub final_url: String,
    /// Absolute script URLs, deduplicated and sorted
    pub assets: BTreeSet<String>,
}

/// Extracts absolute script URLs from an HTML document.
///
/// Relative, root-relative, protocol-relative and absolute `src` values are
/// all resolved against `base_url`. Values that cannot be resolved are
/// skipped. Returns an empty set when `base_url` itself is not a URL.
///
/// The set is ordered so that callers iterating it see the same sequence on
/// every run.
pub fn extract_script_urls(html: &str, base_url: &str) -> BTreeSet<String> {
    let mut urls = BTreeSet::new();
    let base = match Url::parse(base_url) {
        Ok(base) => base,
        Err(e) => {
            debug!("Cannot resolve script sources against {base_url}: {e}");
            return urls;
        }
    };

    let document = Html::parse_document(html);
    for element in document.select(&SCRIPT_SRC_SELECTOR) {
        let Some(src) = element.value().attr("src") else {
            continue;
        };
        match base.join(src) {
            Ok(resolved) => {
                urls.insert(resolved.to_string());
            }
            Err(e) => debug!("Skipping unresolvable script src {src:?} on {base_url}: {e}"),
        }
    }

    urls
}

/// Fetches `target` and returns the script assets it references.
///
/// # Errors
///
/// A transport failure or non-2xx status on the page itself is returned as
/// [`ScanError::Transport`]; the caller reports it for this target only.
/// A page without scripts is not an error.
pub async fn locate_assets(fetcher: &Fetcher, target: &str) -> Result<LocatedAssets, ScanError> {
    let response = fetcher.get(target).await?.require_success(target)?;
    let assets = extract_script_urls(&response.body, &response.final_url);
    debug!(
        "Found {} script asset(s) on {}",
        assets.len(),
        response.final_url
    );
    Ok(LocatedAssets {
        final_url: response.final_url,
        assets,
    })
}
