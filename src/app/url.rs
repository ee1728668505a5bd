//! Target URL normalization.

use log::warn;

/// Longest target accepted, before and after scheme defaulting.
const MAX_URL_LENGTH: usize = 2048;

/// Normalizes one target as given on the command line or in an input list.
///
/// A missing scheme becomes `https://`. The result must parse as a URL with
/// an `http`/`https` scheme and a host, and must not exceed
/// `MAX_URL_LENGTH` characters. Rejections are logged and yield `None`.
pub fn validate_and_normalize_url(url: &str) -> Option<String> {
    if url.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping target exceeding maximum length ({} > {MAX_URL_LENGTH}): {}...",
            url.len(),
            truncate(url)
        );
        return None;
    }

    let normalized = if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{url}")
    };

    if normalized.len() > MAX_URL_LENGTH {
        warn!(
            "Skipping normalized target exceeding maximum length ({} > {MAX_URL_LENGTH}): {}...",
            normalized.len(),
            truncate(&normalized)
        );
        return None;
    }

    match url::Url::parse(&normalized) {
        Ok(parsed) if !matches!(parsed.scheme(), "http" | "https") => {
            warn!("Skipping unsupported scheme for target: {url}");
            None
        }
        Ok(parsed) if parsed.host_str().map_or(true, str::is_empty) => {
            warn!("Skipping target without host: {url}");
            None
        }
        Ok(_) => Some(normalized),
        Err(e) => {
            warn!("Skipping invalid target {url:?}: {e}");
            None
        }
    }
}

fn truncate(s: &str) -> &str {
    let end = s
        .char_indices()
        .nth(50)
        .map(|(i, _)| i)
        .unwrap_or(s.len());
    &s[..end]
}
