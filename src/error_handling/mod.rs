//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (initialization, fetch, and pipeline errors)
//! - Processing statistics tracking (errors, warnings, info metrics)
//! - Error categorization for statistics
//!
//! Error types are categorized into:
//! - **Errors**: Failures that lose a finding (transport, invalid maps, writes)
//! - **Warnings**: Degraded results that lose nothing essential
//! - **Info**: Informational metrics (discovery method, extracted files)

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, categorize_status, update_error_stats};
pub use stats::ProcessingStats;
pub use types::{
    ErrorType, FetchError, InfoType, InitializationError, ScanError, WarningType,
};

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_processing_stats_initialization() {
        let stats = ProcessingStats::new();
        for error_type in ErrorType::iter() {
            assert_eq!(stats.get_error_count(error_type), 0);
        }
        for warning_type in WarningType::iter() {
            assert_eq!(stats.get_warning_count(warning_type), 0);
        }
        for info_type in InfoType::iter() {
            assert_eq!(stats.get_info_count(info_type), 0);
        }
    }

    #[test]
    fn test_processing_stats_increment() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::HttpRequestTimeoutError);
        assert_eq!(stats.get_error_count(ErrorType::HttpRequestTimeoutError), 1);

        stats.increment_warning(WarningType::ReformatFailed);
        assert_eq!(stats.get_warning_count(WarningType::ReformatFailed), 1);

        stats.increment_info(InfoType::DirectiveMatch);
        assert_eq!(stats.get_info_count(InfoType::DirectiveMatch), 1);
    }

    #[test]
    fn test_processing_stats_totals() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::MapValidationError);
        stats.increment_error(ErrorType::HttpRequestNotFound);
        stats.increment_warning(WarningType::NoScriptAssets);
        stats.increment_info(InfoType::SourceFileExtracted);

        assert_eq!(stats.total_errors(), 2);
        assert_eq!(stats.total_warnings(), 1);
        assert_eq!(stats.total_info(), 1);
    }

    #[test]
    fn test_processing_stats_absorb() {
        let total = ProcessingStats::new();
        total.increment_info(InfoType::SourceFileExtracted);

        let per_target = ProcessingStats::new();
        per_target.increment_info(InfoType::SourceFileExtracted);
        per_target.increment_info(InfoType::SourceFileExtracted);
        per_target.increment_error(ErrorType::FileWriteError);
        per_target.increment_warning(WarningType::MissingSourcesContent);

        total.absorb(&per_target);
        assert_eq!(total.get_info_count(InfoType::SourceFileExtracted), 3);
        assert_eq!(total.get_error_count(ErrorType::FileWriteError), 1);
        assert_eq!(
            total.get_warning_count(WarningType::MissingSourcesContent),
            1
        );
        // The source tracker is untouched
        assert_eq!(per_target.total_info(), 2);
    }
}
