//! Error categorization.
//!
//! Maps transport errors, HTTP statuses and pipeline errors onto the
//! [`ErrorType`] counters.

use super::stats::ProcessingStats;
use super::types::{ErrorType, FetchError, ScanError};

/// Categorizes a `reqwest::Error` into an `ErrorType`.
///
/// # Arguments
///
/// * `error` - The `reqwest::Error` to categorize
///
/// # Returns
///
/// The appropriate `ErrorType` for the error.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if let Some(status) = error.status() {
        return categorize_status(status.as_u16());
    }

    if error.is_builder() {
        ErrorType::HttpRequestBuilderError
    } else if error.is_redirect() {
        ErrorType::HttpRequestRedirectError
    } else if error.is_timeout() {
        ErrorType::HttpRequestTimeoutError
    } else if error.is_connect() {
        ErrorType::HttpRequestConnectError
    } else if error.is_request() {
        ErrorType::HttpRequestRequestError
    } else if error.is_body() {
        ErrorType::HttpRequestBodyError
    } else if error.is_decode() {
        ErrorType::HttpRequestDecodeError
    } else {
        ErrorType::HttpRequestOtherError
    }
}

/// Categorizes an unacceptable HTTP status code.
pub fn categorize_status(status: u16) -> ErrorType {
    match status {
        403 => ErrorType::HttpRequestBotDetectionError,
        404 => ErrorType::HttpRequestNotFound,
        429 => ErrorType::HttpRequestTooManyRequests,
        500..=599 => ErrorType::HttpRequestServerError,
        _ => ErrorType::HttpRequestStatusError,
    }
}

impl FetchError {
    /// Counter category for this failure.
    pub fn error_type(&self) -> ErrorType {
        match self {
            FetchError::Request { kind, .. } => *kind,
            FetchError::Status { status, .. } => categorize_status(*status),
        }
    }
}

impl ScanError {
    /// Counter category for this failure.
    pub fn error_type(&self) -> ErrorType {
        match self {
            ScanError::Transport(e) => e.error_type(),
            ScanError::Parse { what, .. } if *what == "source map" => ErrorType::MapJsonParseError,
            ScanError::Parse { .. } => ErrorType::InvalidUrl,
            ScanError::Validation { .. } => ErrorType::MapValidationError,
            ScanError::Filesystem { .. } => ErrorType::FileWriteError,
            ScanError::Input { .. } => ErrorType::InputFileError,
        }
    }
}

/// Records a pipeline error in the statistics tracker.
pub fn update_error_stats(stats: &ProcessingStats, error: &ScanError) {
    stats.increment_error(error.error_type());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_categorize_status_codes() {
        assert_eq!(categorize_status(403), ErrorType::HttpRequestBotDetectionError);
        assert_eq!(categorize_status(404), ErrorType::HttpRequestNotFound);
        assert_eq!(categorize_status(429), ErrorType::HttpRequestTooManyRequests);
        assert_eq!(categorize_status(500), ErrorType::HttpRequestServerError);
        assert_eq!(categorize_status(503), ErrorType::HttpRequestServerError);
        assert_eq!(categorize_status(410), ErrorType::HttpRequestStatusError);
        assert_eq!(categorize_status(304), ErrorType::HttpRequestStatusError);
    }

    #[test]
    fn test_scan_error_types() {
        let status = ScanError::from(FetchError::Status {
            url: "https://example.com/app.js".to_string(),
            status: 404,
        });
        assert_eq!(status.error_type(), ErrorType::HttpRequestNotFound);

        let json = ScanError::Parse {
            url: "https://example.com/app.js.map".to_string(),
            what: "source map",
            message: "expected value at line 1 column 1".to_string(),
        };
        assert_eq!(json.error_type(), ErrorType::MapJsonParseError);

        let url = ScanError::Parse {
            url: "https://example.com/app.js".to_string(),
            what: "map reference",
            message: "relative URL without a base".to_string(),
        };
        assert_eq!(url.error_type(), ErrorType::InvalidUrl);

        let invalid = ScanError::Validation {
            url: "https://example.com/app.js.map".to_string(),
            missing: "version",
        };
        assert_eq!(invalid.error_type(), ErrorType::MapValidationError);
    }

    #[test]
    fn test_only_input_failure_is_fatal() {
        let input = ScanError::Input {
            path: PathBuf::from("missing.txt"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "not found"),
        };
        assert!(input.is_fatal());
        assert_eq!(input.error_type(), ErrorType::InputFileError);

        let write = ScanError::Filesystem {
            path: PathBuf::from("out/sources/x.js"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(!write.is_fatal());
        assert_eq!(write.error_type(), ErrorType::FileWriteError);
    }

    #[test]
    fn test_update_error_stats_counts() {
        let stats = ProcessingStats::new();
        let err = ScanError::Validation {
            url: "https://example.com/a.map".to_string(),
            missing: "sources",
        };
        update_error_stats(&stats, &err);
        update_error_stats(&stats, &err);
        assert_eq!(stats.get_error_count(ErrorType::MapValidationError), 2);
        assert_eq!(stats.total_errors(), 2);
    }
}
