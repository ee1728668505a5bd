//! Application-level helpers around the scan pipeline.
//!
//! This module provides target normalization, target list reading,
//! progress logging, and the end-of-run statistics and reports.

pub mod input;
pub mod logging;
pub mod report;
pub mod statistics;
pub mod url;

// Re-export public API
pub use input::{parse_target_list, read_target_list};
pub use logging::log_progress;
pub use report::{print_report, write_json_report, write_report};
pub use statistics::print_error_statistics;
pub use url::validate_and_normalize_url;
