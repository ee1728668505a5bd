//! Processing statistics tracking.
//!
//! This module provides thread-safe statistics tracking for errors, warnings,
//! and informational metrics during a scan.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use strum::IntoEnumIterator;

use super::types::{ErrorType, InfoType, WarningType};

/// Thread-safe processing statistics tracker.
///
/// Tracks errors, warnings, and informational metrics using atomic counters.
/// All types are initialized to zero on creation.
///
/// Each target scan owns one tracker; the orchestrator folds them together
/// with [`ProcessingStats::absorb`] once the target has been collected.
pub struct ProcessingStats {
    errors: HashMap<ErrorType, AtomicUsize>,
    warnings: HashMap<WarningType, AtomicUsize>,
    info: HashMap<InfoType, AtomicUsize>,
}

impl ProcessingStats {
    pub fn new() -> Self {
        let mut errors = HashMap::new();
        for error in ErrorType::iter() {
            errors.insert(error, AtomicUsize::new(0));
        }

        let mut warnings = HashMap::new();
        for warning in WarningType::iter() {
            warnings.insert(warning, AtomicUsize::new(0));
        }

        let mut info = HashMap::new();
        for info_type in InfoType::iter() {
            info.insert(info_type, AtomicUsize::new(0));
        }

        ProcessingStats {
            errors,
            warnings,
            info,
        }
    }

    /// Increment an error counter.
    pub fn increment_error(&self, error: ErrorType) {
        self.add_error(error, 1);
    }

    /// Increment a warning counter.
    pub fn increment_warning(&self, warning: WarningType) {
        self.add_warning(warning, 1);
    }

    /// Increment an info counter.
    pub fn increment_info(&self, info_type: InfoType) {
        self.add_info(info_type, 1);
    }

    fn add_error(&self, error: ErrorType, n: usize) {
        if let Some(counter) = self.errors.get(&error) {
            counter.fetch_add(n, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment error counter for {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                error
            );
        }
    }

    fn add_warning(&self, warning: WarningType, n: usize) {
        if let Some(counter) = self.warnings.get(&warning) {
            counter.fetch_add(n, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment warning counter for {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                warning
            );
        }
    }

    fn add_info(&self, info_type: InfoType, n: usize) {
        if let Some(counter) = self.info.get(&info_type) {
            counter.fetch_add(n, Ordering::Relaxed);
        } else {
            log::error!(
                "Attempted to increment info counter for {:?} which is not in the map. \
                 This indicates a bug in ProcessingStats initialization.",
                info_type
            );
        }
    }

    pub fn get_error_count(&self, error: ErrorType) -> usize {
        self.errors
            .get(&error)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    pub fn get_warning_count(&self, warning: WarningType) -> usize {
        self.warnings
            .get(&warning)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    pub fn get_info_count(&self, info_type: InfoType) -> usize {
        self.info
            .get(&info_type)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    pub fn total_errors(&self) -> usize {
        self.errors.values().map(|c| c.load(Ordering::Relaxed)).sum()
    }

    pub fn total_warnings(&self) -> usize {
        self.warnings
            .values()
            .map(|c| c.load(Ordering::Relaxed))
            .sum()
    }

    pub fn total_info(&self) -> usize {
        self.info.values().map(|c| c.load(Ordering::Relaxed)).sum()
    }

    /// Adds every counter of `other` into this tracker.
    pub fn absorb(&self, other: &ProcessingStats) {
        for error in ErrorType::iter() {
            self.add_error(error, other.get_error_count(error));
        }
        for warning in WarningType::iter() {
            self.add_warning(warning, other.get_warning_count(warning));
        }
        for info_type in InfoType::iter() {
            self.add_info(info_type, other.get_info_count(info_type));
        }
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}
