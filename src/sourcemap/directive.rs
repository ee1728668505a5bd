//! `sourceMappingURL` directive scanning.

use std::sync::LazyLock;

use regex::Regex;

/// `//# sourceMappingURL=...` (and the legacy `//@` form).
static LINE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"//[@#]\s*sourceMappingURL=(.+?)(?:\s|$)")
        .expect("line directive pattern is valid")
});

/// `/*# sourceMappingURL=... */` (and the legacy `/*@` form).
static BLOCK_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/\*[@#]\s*sourceMappingURL=(.+?)\s*\*/")
        .expect("block directive pattern is valid")
});

/// Finds the map reference declared by a `sourceMappingURL` comment.
///
/// The line-comment form is searched over the whole text first, then the
/// block-comment form. Within each form the first occurrence in document
/// order wins, so a later duplicate directive is never consulted. The
/// reference is returned unresolved and trimmed.
pub fn find_directive(content: &str) -> Option<&str> {
    [&*LINE_DIRECTIVE, &*BLOCK_DIRECTIVE]
        .into_iter()
        .filter_map(|pattern| pattern.captures(content))
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
        .find(|reference| !reference.is_empty())
}
