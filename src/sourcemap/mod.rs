//! Source map discovery and validation.
//!
//! This module provides:
//! - `sourceMappingURL` directive scanning
//! - Per-asset map resolution (directive first, `.map` suffix probe second)
//! - Candidate validation into a typed [`SourceMapDocument`]

mod directive;
mod document;
mod resolver;
mod validator;

pub use directive::find_directive;
pub use document::SourceMapDocument;
pub use resolver::{conventional_map_url, resolve_map, resolve_reference};
pub use validator::validate_map;
