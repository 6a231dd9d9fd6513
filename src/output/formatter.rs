//! Report formatting trait and the plain text implementation
//!
//! Column layout is fixed so reports from different runs line up and can be
//! diffed byte for byte.

use crate::models::ProbeResult;
use std::time::Duration;

/// Width of the resource name column in the paired report
pub const NAME_WIDTH: usize = 12;
/// Width of each timing column header in the paired report
pub const PAIRED_COLUMN_WIDTH: usize = 20;
/// Width of the numeric part of a paired timing cell
pub const PAIRED_TIME_WIDTH: usize = 18;
/// Width of the label column in the iteration report
pub const ITERATION_LABEL_WIDTH: usize = 10;
/// Width of the time column in the iteration report
pub const ITERATION_TIME_WIDTH: usize = 10;
/// Decimal places for every printed time
pub const TIME_PRECISION: usize = 5;

pub const PAIRED_HEADERS: [&str; 3] = ["File", "Miss (1st request)", "Hit (2nd request)"];
pub const ITERATION_HEADERS: [&str; 2] = ["Iteration", "Time (s)"];
pub const TOTAL_LABEL: &str = "Total";

/// Renders report lines (without trailing newlines)
pub trait ReportFormatter: Send + Sync {
    /// Column headers printed once before the paired rows
    fn paired_header(&self) -> String;

    /// One resource: miss timing and status, then hit timing and status
    fn paired_row(&self, name: &str, miss: &ProbeResult, hit: &ProbeResult) -> String;

    /// Column headers printed once before the iteration rows
    fn iteration_header(&self) -> String;

    /// Wall-clock time of one 1-indexed iteration
    fn iteration_row(&self, index: u32, elapsed: Duration) -> String;

    /// Wall-clock time of the whole random run
    fn total_row(&self, total: Duration) -> String;
}

/// Plain text formatter implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl PlainFormatter {
    pub fn new() -> Self {
        Self
    }

    /// `"{elapsed:>18.5}s ({status})"`
    pub fn timing_cell(result: &ProbeResult) -> String {
        format!(
            "{:>width$.prec$}s ({})",
            result.elapsed,
            result.status,
            width = PAIRED_TIME_WIDTH,
            prec = TIME_PRECISION
        )
    }

    pub fn seconds_cell(elapsed: Duration) -> String {
        format!(
            "{:>width$.prec$}",
            elapsed.as_secs_f64(),
            width = ITERATION_TIME_WIDTH,
            prec = TIME_PRECISION
        )
    }
}

impl ReportFormatter for PlainFormatter {
    fn paired_header(&self) -> String {
        format!(
            "{:<name$} {:>col$} {:>col$}",
            PAIRED_HEADERS[0],
            PAIRED_HEADERS[1],
            PAIRED_HEADERS[2],
            name = NAME_WIDTH,
            col = PAIRED_COLUMN_WIDTH
        )
    }

    fn paired_row(&self, name: &str, miss: &ProbeResult, hit: &ProbeResult) -> String {
        format!(
            "{:<width$} {} {}",
            name,
            Self::timing_cell(miss),
            Self::timing_cell(hit),
            width = NAME_WIDTH
        )
    }

    fn iteration_header(&self) -> String {
        format!(
            "{:<label$} {:>time$}",
            ITERATION_HEADERS[0],
            ITERATION_HEADERS[1],
            label = ITERATION_LABEL_WIDTH,
            time = ITERATION_TIME_WIDTH
        )
    }

    fn iteration_row(&self, index: u32, elapsed: Duration) -> String {
        format!(
            "{:<label$} {}",
            index,
            Self::seconds_cell(elapsed),
            label = ITERATION_LABEL_WIDTH
        )
    }

    fn total_row(&self, total: Duration) -> String {
        format!(
            "{:<label$} {}",
            TOTAL_LABEL,
            Self::seconds_cell(total),
            label = ITERATION_LABEL_WIDTH
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paired_header_layout() {
        let header = PlainFormatter.paired_header();
        assert_eq!(header, "File           Miss (1st request)    Hit (2nd request)");
        assert_eq!(header.len(), NAME_WIDTH + 1 + PAIRED_COLUMN_WIDTH + 1 + PAIRED_COLUMN_WIDTH);
    }

    #[test]
    fn test_paired_row_layout() {
        let miss = ProbeResult::success(Duration::from_millis(12), 200);
        let hit = ProbeResult::success(Duration::from_micros(1500), 200);
        let row = PlainFormatter.paired_row("a01.smi", &miss, &hit);
        assert_eq!(
            row,
            "a01.smi                 0.01200s (200)            0.00150s (200)"
        );
    }

    #[test]
    fn test_paired_row_with_failure() {
        let miss = ProbeResult::failed_with("connection refused");
        let hit = ProbeResult::success(Duration::ZERO, 404);
        let row = PlainFormatter.paired_row("x.smi", &miss, &hit);
        assert!(row.starts_with("x.smi        "));
        assert!(row.contains("-1.00000s (ERR(connection refused))"));
        assert!(row.ends_with("0.00000s (404)"));
    }

    #[test]
    fn test_iteration_lines() {
        assert_eq!(PlainFormatter.iteration_header(), "Iteration    Time (s)");
        assert_eq!(
            PlainFormatter.iteration_row(3, Duration::from_millis(1250)),
            "3             1.25000"
        );
        assert_eq!(
            PlainFormatter.total_row(Duration::from_secs(12)),
            "Total        12.00000"
        );
    }

    #[test]
    fn test_long_names_are_not_truncated() {
        let result = ProbeResult::success(Duration::ZERO, 200);
        let row = PlainFormatter.paired_row("a-very-long-resource-name.smi", &result, &result);
        assert!(row.starts_with("a-very-long-resource-name.smi "));
    }
}
