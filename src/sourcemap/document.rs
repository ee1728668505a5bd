//! Typed source map document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::error_handling::ScanError;

/// The fields the pipeline reads from a map.
///
/// Every field is lenient: a value of an unexpected type reads as absent
/// instead of rejecting the map, since validation is by key presence only.
#[derive(Debug, Default, Deserialize)]
struct MapFields {
    #[serde(default, deserialize_with = "lenient")]
    version: Option<i64>,
    #[serde(default, deserialize_with = "lenient")]
    sources: Option<Vec<Entry>>,
    #[serde(rename = "sourcesContent", default, deserialize_with = "lenient")]
    sources_content: Option<Vec<Entry>>,
}

/// A `sources` or `sourcesContent` entry; anything but a string is `None`,
/// so indices stay aligned.
#[derive(Debug)]
struct Entry(Option<String>);

impl<'de> Deserialize<'de> for Entry {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(text) => Entry(Some(text)),
            _ => Entry(None),
        })
    }
}

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(T::deserialize(value).ok())
}

fn into_strings(entries: Vec<Entry>) -> Vec<Option<String>> {
    entries.into_iter().map(|Entry(text)| text).collect()
}

/// A source map that passed structural validation.
///
/// Validation only requires the `version` and `sources` keys to be present;
/// the typed accessors are lenient about the values so that odd but
/// parseable maps are still counted and extracted. The received JSON is kept
/// for verbatim output.
#[derive(Debug, Clone)]
pub struct SourceMapDocument {
    /// `version` when it is an integer
    pub version: Option<i64>,
    /// `sources`; non-string entries are kept as `None` to preserve indices
    pub sources: Vec<Option<String>>,
    /// `sourcesContent` if the key is present and holds an array
    pub sources_content: Option<Vec<Option<String>>>,
    raw: Value,
}

impl SourceMapDocument {
    /// Parses and validates a map body fetched from `url`.
    ///
    /// # Errors
    ///
    /// - [`ScanError::Parse`] if `body` is not JSON
    /// - [`ScanError::Validation`] if the JSON lacks `version` or `sources`
    pub fn parse(url: &str, body: &str) -> Result<Self, ScanError> {
        let raw: Value = serde_json::from_str(body).map_err(|e| ScanError::Parse {
            url: url.to_string(),
            what: "source map",
            message: e.to_string(),
        })?;
        Self::from_value(url, raw)
    }

    /// Validates an already parsed JSON value.
    pub fn from_value(url: &str, raw: Value) -> Result<Self, ScanError> {
        for key in ["version", "sources"] {
            if raw.get(key).is_none() {
                return Err(ScanError::Validation {
                    url: url.to_string(),
                    missing: key,
                });
            }
        }

        // Only objects get here, and every field tolerates any value
        let fields = MapFields::deserialize(&raw).unwrap_or_default();

        Ok(Self {
            version: fields.version,
            sources: fields.sources.map(into_strings).unwrap_or_default(),
            sources_content: fields.sources_content.map(into_strings),
            raw,
        })
    }

    /// Number of entries in `sources`.
    pub fn sources_count(&self) -> usize {
        self.sources.len()
    }

    /// Whether the map carries a `sourcesContent` key, whatever its value.
    ///
    /// This is what findings and the summary report; see
    /// [`SourceMapDocument::has_embedded_text`] for whether anything can
    /// actually be extracted.
    pub fn has_content(&self) -> bool {
        self.raw.get("sourcesContent").is_some()
    }

    /// Whether at least one source has its text embedded.
    pub fn has_embedded_text(&self) -> bool {
        self.sources_content
            .as_ref()
            .is_some_and(|contents| contents.iter().any(Option::is_some))
    }

    /// Index-aligned `(index, source path, embedded text)` triples for every
    /// non-null `sourcesContent` entry.
    pub fn embedded_sources(&self) -> impl Iterator<Item = (usize, Option<&str>, &str)> {
        self.sources_content
            .iter()
            .flatten()
            .enumerate()
            .filter_map(|(i, content)| {
                let content = content.as_deref()?;
                let path = self.sources.get(i).and_then(|p| p.as_deref());
                Some((i, path, content))
            })
    }

    /// The document as received, pretty-printed with 2-space indentation.
    /// Key order is preserved.
    pub fn to_pretty_json(&self) -> String {
        // Serializing a Value cannot fail
        serde_json::to_string_pretty(&self.raw).unwrap_or_default()
    }
}
