//! Error type definitions.
//!
//! This module defines the error taxonomy of the scan pipeline plus the
//! error, warning, and info categories counted during a run.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// A failed network retrieval.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request never produced a response (timeout, DNS, refused, body read...).
    #[error("request to {url} failed ({kind}): {source}")]
    Request {
        /// Requested URL
        url: String,
        /// Failure category
        kind: ErrorType,
        /// Underlying client error
        #[source]
        source: ReqwestError,
    },

    /// A response arrived but its status is not acceptable to the caller.
    #[error("{url} returned HTTP {status}")]
    Status {
        /// Requested URL
        url: String,
        /// HTTP status code received
        status: u16,
    },
}

/// Errors produced by the discovery-and-extraction pipeline.
///
/// Only [`ScanError::Input`] is fatal to a run; every other kind is caught by
/// the orchestrator and degrades the affected unit of work to "nothing found".
#[derive(Error, Debug)]
pub enum ScanError {
    /// Network failure, or a status the operation requires to be a success.
    #[error(transparent)]
    Transport(#[from] FetchError),

    /// Malformed input data: JSON that does not parse, an unusable URL.
    #[error("failed to parse {what} from {url}: {message}")]
    Parse {
        /// URL the data came from
        url: String,
        /// What was being parsed
        what: &'static str,
        /// Parser message
        message: String,
    },

    /// Well-formed JSON that is not a source map.
    #[error("{url} is not a source map: missing `{missing}` key")]
    Validation {
        /// Map URL
        url: String,
        /// First required key that is absent
        missing: &'static str,
    },

    /// Failed to create or write a file.
    #[error("failed to write {path}: {source}")]
    Filesystem {
        /// Path being written
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The target list is missing or unreadable.
    #[error("cannot read target list {path}: {source}")]
    Input {
        /// Path of the target list
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
}

impl ScanError {
    /// Whether this error must terminate the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, ScanError::Input { .. })
    }
}

/// Types of errors that can occur while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // HTTP/Network errors
    HttpRequestBuilderError,
    HttpRequestRedirectError,
    HttpRequestTimeoutError,
    HttpRequestConnectError,
    HttpRequestRequestError,
    HttpRequestBodyError,
    HttpRequestDecodeError,
    HttpRequestOtherError,
    // Unacceptable HTTP status codes
    HttpRequestBotDetectionError, // 403 Forbidden - typically bot detection
    HttpRequestNotFound,          // 404 Not Found
    HttpRequestTooManyRequests,   // 429 Too Many Requests
    HttpRequestServerError,       // any 5xx
    HttpRequestStatusError,       // any other non-success status
    // Data errors
    InvalidUrl,
    MapJsonParseError,
    MapValidationError,
    // Local errors
    FileWriteError,
    InputFileError,
}

/// Types of warnings that can occur while scanning.
///
/// Warnings do not lose any finding but are worth surfacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum WarningType {
    NoScriptAssets,        // Page references no external scripts
    MissingSourcesContent, // Map has no embedded sources to extract
    ReformatFailed,        // Reformatter rejected a source, original kept
}

/// Types of informational metrics counted while scanning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    DirectiveMatch,          // Map located via sourceMappingURL comment
    ConventionalSuffixMatch, // Map located via `<asset>.map` probe
    SourceFileExtracted,
    SourceFileReformatted,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::HttpRequestBuilderError => "HTTP request builder error",
            ErrorType::HttpRequestRedirectError => "HTTP request redirect error",
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestRequestError => "HTTP request error",
            ErrorType::HttpRequestBodyError => "HTTP request body error",
            ErrorType::HttpRequestDecodeError => "HTTP request decode error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
            ErrorType::HttpRequestBotDetectionError => "Bot detection (403 Forbidden)",
            ErrorType::HttpRequestNotFound => "Not Found (404)",
            ErrorType::HttpRequestTooManyRequests => "Too many requests (429)",
            ErrorType::HttpRequestServerError => "Server error (5xx)",
            ErrorType::HttpRequestStatusError => "Unexpected HTTP status",
            ErrorType::InvalidUrl => "Invalid URL",
            ErrorType::MapJsonParseError => "Source map is not valid JSON",
            ErrorType::MapValidationError => "Source map missing required keys",
            ErrorType::FileWriteError => "File write error",
            ErrorType::InputFileError => "Target list read error",
        }
    }
}

impl WarningType {
    /// Returns a human-readable string representation of the warning type.
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningType::NoScriptAssets => "No script assets on page",
            WarningType::MissingSourcesContent => "Source map without embedded sources",
            WarningType::ReformatFailed => "Reformat failed (original kept)",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::DirectiveMatch => "Map found via sourceMappingURL directive",
            InfoType::ConventionalSuffixMatch => "Map found via .map suffix probe",
            InfoType::SourceFileExtracted => "Source files extracted",
            InfoType::SourceFileReformatted => "Source files reformatted",
        }
    }
}
