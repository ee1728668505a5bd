//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, naming, suffixes)
//! - Request header set construction
//! - CLI option types and parsing

mod constants;
mod headers;
mod types;

// Re-export all constants
pub use constants::*;
pub use headers::{build_header_map, parse_header_line};
pub use types::{Config, ConfigValidationError, LogFormat, LogLevel};
