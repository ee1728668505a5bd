//! File naming for extracted maps and sources.

/// Character substituted for path separators and parent-directory markers.
const PLACEHOLDER: &str = "_";

/// Per-map namespace: `map_<n>_<host>`, numbered from 1.
///
/// `index` is the 0-based position of the asset in the target's sorted asset
/// set, so the seed is stable across runs against unchanged content. Any `:`
/// left in `host` (IPv6 literals) is replaced.
pub fn naming_seed(index: usize, host: &str) -> String {
    format!("map_{}_{}", index + 1, host.replace(':', PLACEHOLDER))
}

/// Flattens a `sources[i]` path into a single filename component.
///
/// `/`, `\` and `..` are replaced, so the result can never escape the output
/// directory or create subdirectories.
pub fn sanitize_source_name(source: &str) -> String {
    source
        .replace('/', PLACEHOLDER)
        .replace('\\', PLACEHOLDER)
        .replace("..", PLACEHOLDER)
}

/// Name used for `sourcesContent[index]` when `sources[index]` is missing or
/// not a string.
pub fn fallback_source_name(index: usize) -> String {
    format!("source_{index}")
}
