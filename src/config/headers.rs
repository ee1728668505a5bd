//! Request header set construction.
//!
//! Every request carries the same header set: built-in defaults first, then
//! the user's `Key: Value` overrides applied in order. Header names are
//! case-insensitive, so a later override of the same key replaces both the
//! default and any earlier override.

use log::warn;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, USER_AGENT};

/// Splits a raw `Key: Value` header override into its trimmed parts.
///
/// Only the first `:` separates key from value, so values such as
/// `Referer: https://example.com/` survive intact. Returns `None` when there
/// is no separator or the key is empty.
pub fn parse_header_line(line: &str) -> Option<(String, String)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), value.trim().to_string()))
}

/// Builds the header set injected into every request.
///
/// # Arguments
///
/// * `user_agent` - Default `User-Agent` value
/// * `overrides` - Raw `Key: Value` pairs from the command line, in order
///
/// Malformed pairs and names/values that are not valid HTTP tokens are
/// skipped with a warning rather than failing the run.
pub fn build_header_map(user_agent: &str, overrides: &[String]) -> HeaderMap {
    let mut headers = HeaderMap::new();
    match HeaderValue::from_str(user_agent) {
        Ok(value) => {
            headers.insert(USER_AGENT, value);
        }
        Err(_) => warn!("Ignoring invalid User-Agent value: {user_agent:?}"),
    }

    for raw in overrides {
        let Some((key, value)) = parse_header_line(raw) else {
            warn!("Ignoring malformed header (expected `Key: Value`): {raw:?}");
            continue;
        };
        match (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            (Ok(name), Ok(value)) => {
                // insert() replaces existing values for the same name
                headers.insert(name, value);
            }
            _ => warn!("Ignoring invalid header: {raw:?}"),
        }
    }

    headers
}
