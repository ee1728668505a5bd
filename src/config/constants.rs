//! Configuration constants.
//!
//! This module defines the constants used throughout the application,
//! including timeouts, naming conventions for persisted artifacts, and
//! the suffixes used when looking for source maps.

/// Default number of targets scanned at the same time.
pub const DEFAULT_MAX_CONCURRENCY: usize = 5;

/// Timeout for content fetches (pages, scripts, map documents) in seconds.
pub const CONTENT_FETCH_TIMEOUT_SECS: u64 = 10;
/// Timeout for existence checks (HEAD probes) in seconds.
pub const PROBE_TIMEOUT_SECS: u64 = 5;

/// Maximum number of redirect hops to follow.
/// Prevents infinite redirect loops and excessive request chains
pub const MAX_REDIRECT_HOPS: usize = 10;

/// Default User-Agent string for HTTP requests.
///
/// A plausible desktop browser string. Users can override it via
/// `--user-agent` or an explicit `-H "User-Agent: ..."` header.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Suffix of script assets eligible for the conventional `.map` probe.
pub const SCRIPT_SUFFIX: &str = ".js";
/// Suffix appended to a script path when probing for a sibling map.
pub const MAP_SUFFIX: &str = ".map";

/// Subdirectory of the output directory holding persisted map documents.
pub const SOURCEMAPS_DIR: &str = "sourcemaps";
/// Subdirectory of the output directory holding extracted sources.
pub const SOURCES_DIR: &str = "sources";

/// Extensions of extracted files that are passed through the reformatter.
pub const REFORMATTABLE_EXTENSIONS: &[&str] = &[".js", ".jsx", ".ts"];
