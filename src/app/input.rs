//! Target list input.

use std::collections::HashSet;
use std::path::Path;

use log::info;

use crate::error_handling::ScanError;

/// Splits a newline-delimited target list into targets.
///
/// Lines are trimmed and blank lines ignored. There is no comment syntax:
/// every other line is a target. Exact duplicates are dropped, first
/// occurrence kept.
pub fn parse_target_list(text: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| seen.insert(*line))
        .map(str::to_string)
        .collect()
}

/// Reads and parses the target list at `path`.
///
/// # Errors
///
/// [`ScanError::Input`] if the file is missing or unreadable. This is the
/// only error that ends a run.
pub async fn read_target_list(path: &Path) -> Result<Vec<String>, ScanError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ScanError::Input {
            path: path.to_path_buf(),
            source,
        })?;
    let targets = parse_target_list(&text);
    info!("Total targets in {}: {}", path.display(), targets.len());
    Ok(targets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_blank_lines_ignored() {
        let targets = parse_target_list("a.com\n\n   \nb.com\r\n  c.com  \n");
        assert_eq!(targets, vec!["a.com", "b.com", "c.com"]);
    }

    #[test]
    fn test_no_comment_syntax() {
        let targets = parse_target_list("# not a comment\na.com");
        assert_eq!(targets, vec!["# not a comment", "a.com"]);
    }

    #[test]
    fn test_duplicates_dropped_in_order() {
        let targets = parse_target_list("b.com\na.com\nb.com\n a.com\n");
        assert_eq!(targets, vec!["b.com", "a.com"]);
    }

    #[tokio::test]
    async fn test_read_target_list() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "https://example.com\n\nexample.org").unwrap();
        let targets = read_target_list(file.path()).await.unwrap();
        assert_eq!(targets, vec!["https://example.com", "example.org"]);
    }

    #[tokio::test]
    async fn test_missing_file_is_input_error() {
        let err = read_target_list(Path::new("/nonexistent/targets.txt"))
            .await
            .unwrap_err();
        assert!(err.is_fatal());
        assert!(matches!(err, ScanError::Input { .. }));
    }
}
