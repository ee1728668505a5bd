//! Persistence of validated maps and their embedded sources.
//!
//! This module provides:
//! - The two-tier output layout (`sourcemaps/` and `sources/`)
//! - Collision-safe file naming
//! - The [`Extractor`], which writes a map and decomposes its
//!   `sourcesContent` into individual files, optionally reformatted

mod naming;
mod reformat;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use log::{debug, warn};

use crate::config::{Config, MAP_SUFFIX, REFORMATTABLE_EXTENSIONS, SOURCEMAPS_DIR, SOURCES_DIR};
use crate::error_handling::{ErrorType, InfoType, ProcessingStats, ScanError, WarningType};
use crate::sourcemap::SourceMapDocument;

pub use naming::{fallback_source_name, naming_seed, sanitize_source_name};
pub use reformat::{JsBeautifier, ReformatError, Reformatter};

/// Where extracted artifacts go under the output directory.
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
}

impl OutputLayout {
    /// Layout rooted at the output directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The output directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding `<seed>.map` files.
    pub fn maps_dir(&self) -> PathBuf {
        self.root.join(SOURCEMAPS_DIR)
    }

    /// Directory holding `<seed>_<name>` source files.
    pub fn sources_dir(&self) -> PathBuf {
        self.root.join(SOURCES_DIR)
    }

    /// `sourcemaps/<seed>.map`
    pub fn map_path(&self, seed: &str) -> PathBuf {
        self.maps_dir().join(format!("{seed}{MAP_SUFFIX}"))
    }

    /// `sources/<seed>_<name>`
    pub fn source_path(&self, seed: &str, name: &str) -> PathBuf {
        self.sources_dir().join(format!("{seed}_{name}"))
    }

    /// Creates both subdirectories (and the root) if missing.
    pub async fn prepare(&self) -> Result<(), ScanError> {
        for dir in [self.maps_dir(), self.sources_dir()] {
            tokio::fs::create_dir_all(&dir)
                .await
                .map_err(|source| ScanError::Filesystem { path: dir, source })?;
        }
        Ok(())
    }
}

/// One written-out original file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedSource {
    /// Sanitized name, without the seed prefix
    pub name: String,
    /// Full path written
    pub path: PathBuf,
    /// Whether the reformatter output was written
    pub reformatted: bool,
    /// Size of the written content in bytes
    pub bytes: usize,
}

/// What one [`Extractor::extract`] call wrote.
#[derive(Debug, Clone)]
pub struct ExtractionSummary {
    /// Where the map document was written
    pub map_path: PathBuf,
    /// Sources written, in `sourcesContent` order
    pub sources: Vec<ExtractedSource>,
    /// Sources whose write failed
    pub failed: usize,
}

/// Writes validated maps and their embedded sources to disk.
///
/// Only constructed when persistence is enabled.
pub struct Extractor {
    layout: OutputLayout,
    reformatter: Option<Arc<dyn Reformatter>>,
}

impl Extractor {
    /// Extractor writing under `layout`, reformatting script-family sources
    /// with `reformatter` when one is given.
    pub fn new(layout: OutputLayout, reformatter: Option<Arc<dyn Reformatter>>) -> Self {
        Self {
            layout,
            reformatter,
        }
    }

    /// Extractor for `--output`, with the built-in beautifier when
    /// `--beautify` is set. `None` when no output directory is configured.
    pub fn from_config(config: &Config) -> Option<Self> {
        let root = config.output.as_ref()?;
        let reformatter: Option<Arc<dyn Reformatter>> = if config.beautify {
            Some(Arc::new(JsBeautifier::default()))
        } else {
            None
        };
        Some(Self::new(OutputLayout::new(root), reformatter))
    }

    /// Output layout in use.
    pub fn layout(&self) -> &OutputLayout {
        &self.layout
    }

    /// Writes `document` as `<seed>.map`, then one file per non-null
    /// `sourcesContent` entry.
    ///
    /// # Errors
    ///
    /// Only a failure to write the map itself is returned. A failed source
    /// write is logged, counted, and skipped; a failed reformat falls back to
    /// the original text.
    pub async fn extract(
        &self,
        document: &SourceMapDocument,
        seed: &str,
        stats: &ProcessingStats,
    ) -> Result<ExtractionSummary, ScanError> {
        let map_path = self.layout.map_path(seed);
        tokio::fs::write(&map_path, document.to_pretty_json())
            .await
            .map_err(|source| ScanError::Filesystem {
                path: map_path.clone(),
                source,
            })?;

        let mut summary = ExtractionSummary {
            map_path,
            sources: Vec::new(),
            failed: 0,
        };
        let mut used_names = HashSet::new();

        for (index, source, content) in document.embedded_sources() {
            let mut name = source
                .map(sanitize_source_name)
                .unwrap_or_else(|| fallback_source_name(index));
            if !used_names.insert(name.clone()) {
                name = format!("{index}_{name}");
                used_names.insert(name.clone());
            }

            let (text, reformatted) = self.maybe_reformat(&name, content, stats);
            let path = self.layout.source_path(seed, &name);
            match tokio::fs::write(&path, text.as_bytes()).await {
                Ok(()) => {
                    debug!("Wrote {}", path.display());
                    stats.increment_info(InfoType::SourceFileExtracted);
                    if reformatted {
                        stats.increment_info(InfoType::SourceFileReformatted);
                    }
                    summary.sources.push(ExtractedSource {
                        name,
                        path,
                        reformatted,
                        bytes: text.len(),
                    });
                }
                Err(e) => {
                    warn!("Failed to write {}: {e}", path.display());
                    stats.increment_error(ErrorType::FileWriteError);
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }

    fn maybe_reformat<'c>(
        &self,
        name: &str,
        content: &'c str,
        stats: &ProcessingStats,
    ) -> (std::borrow::Cow<'c, str>, bool) {
        let Some(reformatter) = &self.reformatter else {
            return (content.into(), false);
        };
        if !is_reformattable(name) {
            return (content.into(), false);
        }
        match reformatter.reformat(content) {
            Ok(formatted) => (formatted.into(), true),
            Err(e) => {
                warn!("Could not reformat {name}, keeping original: {e}");
                stats.increment_warning(WarningType::ReformatFailed);
                (content.into(), false)
            }
        }
    }
}

fn is_reformattable(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    REFORMATTABLE_EXTENSIONS
        .iter()
        .any(|ext| lower.ends_with(ext))
}
