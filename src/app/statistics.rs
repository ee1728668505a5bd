//! End-of-run statistics.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, InfoType, ProcessingStats, WarningType};

/// Logs every non-zero error, warning and info counter.
pub fn print_error_statistics(stats: &ProcessingStats) {
    for line in statistics_lines(stats) {
        info!("{line}");
    }
}

/// One heading per non-empty category, followed by its non-zero counters.
fn statistics_lines(stats: &ProcessingStats) -> Vec<String> {
    let mut lines = Vec::new();
    push_section(
        &mut lines,
        "Error",
        stats.total_errors(),
        ErrorType::iter().map(|t| (t.as_str(), stats.get_error_count(t))),
    );
    push_section(
        &mut lines,
        "Warning",
        stats.total_warnings(),
        WarningType::iter().map(|t| (t.as_str(), stats.get_warning_count(t))),
    );
    push_section(
        &mut lines,
        "Info",
        stats.total_info(),
        InfoType::iter().map(|t| (t.as_str(), stats.get_info_count(t))),
    );
    lines
}

fn push_section(
    lines: &mut Vec<String>,
    heading: &str,
    total: usize,
    counts: impl Iterator<Item = (&'static str, usize)>,
) {
    if total == 0 {
        return;
    }
    lines.push(format!("{heading} Counts ({total} total):"));
    lines.extend(
        counts
            .filter(|(_, count)| *count > 0)
            .map(|(label, count)| format!("   {label}: {count}")),
    );
}
