//! Candidate map validation.

use crate::error_handling::{FetchError, ScanError};
use crate::fetch::Fetcher;

use super::document::SourceMapDocument;

/// Fetches a candidate map and confirms it is a structurally valid source map.
///
/// Anything but HTTP 200 is rejected, as is a body that is not JSON or lacks
/// the `version`/`sources` keys. A malformed body is an ordinary negative
/// result for the caller to log, never a fault.
pub async fn validate_map(fetcher: &Fetcher, map_url: &str) -> Result<SourceMapDocument, ScanError> {
    let response = fetcher.get(map_url).await?;
    if response.status != 200 {
        return Err(FetchError::Status {
            url: map_url.to_string(),
            status: response.status,
        }
        .into());
    }
    SourceMapDocument::parse(map_url, &response.body)
}
