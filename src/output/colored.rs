//! Colored formatter implementation with terminal color support
//!
//! Colors wrap already padded cells, so column alignment is identical to
//! the plain formatter.

use super::formatter::{
    PlainFormatter, ReportFormatter, ITERATION_LABEL_WIDTH, NAME_WIDTH, TOTAL_LABEL,
};
use crate::models::{ProbeResult, ProbeStatus};
use crate::types::StatusClass;
use colored::*;
use std::time::Duration;

/// Color scheme configuration
#[derive(Debug, Clone)]
pub struct ColorScheme {
    pub header: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub timing: Color,
    pub muted: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self {
            header: Color::Blue,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            timing: Color::Cyan,
            muted: Color::BrightBlack,
        }
    }
}

/// Colored formatter implementation
pub struct ColoredFormatter {
    plain: PlainFormatter,
    color_scheme: ColorScheme,
}

impl ColoredFormatter {
    pub fn new() -> Self {
        Self::with_color_scheme(ColorScheme::default())
    }

    pub fn with_color_scheme(color_scheme: ColorScheme) -> Self {
        Self {
            plain: PlainFormatter::new(),
            color_scheme,
        }
    }

    /// Color for a probe status
    pub fn status_color(&self, status: &ProbeStatus) -> Color {
        match status.class() {
            Some(StatusClass::Ok) => self.color_scheme.success,
            Some(StatusClass::ClientError) => self.color_scheme.warning,
            Some(StatusClass::ServerError) | None => self.color_scheme.error,
        }
    }

    fn timing_cell(&self, result: &ProbeResult) -> String {
        let plain = PlainFormatter::timing_cell(result);
        // Split "<padded time>s (<status>)" so each half gets its own color
        let (time, status) = plain.split_once("s (").unwrap_or((plain.as_str(), ""));
        let time_color = if result.is_failure() {
            self.color_scheme.error
        } else {
            self.color_scheme.timing
        };
        let status = status.strip_suffix(')').unwrap_or(status);

        format!(
            "{}s ({})",
            time.color(time_color),
            status.color(self.status_color(&result.status))
        )
    }
}

impl Default for ColoredFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportFormatter for ColoredFormatter {
    fn paired_header(&self) -> String {
        self.plain
            .paired_header()
            .color(self.color_scheme.header)
            .bold()
            .to_string()
    }

    fn paired_row(&self, name: &str, miss: &ProbeResult, hit: &ProbeResult) -> String {
        format!(
            "{} {} {}",
            format!("{:<width$}", name, width = NAME_WIDTH).bold(),
            self.timing_cell(miss),
            self.timing_cell(hit)
        )
    }

    fn iteration_header(&self) -> String {
        self.plain
            .iteration_header()
            .color(self.color_scheme.header)
            .bold()
            .to_string()
    }

    fn iteration_row(&self, index: u32, elapsed: Duration) -> String {
        format!(
            "{} {}",
            format!("{:<width$}", index, width = ITERATION_LABEL_WIDTH).color(self.color_scheme.muted),
            PlainFormatter::seconds_cell(elapsed).color(self.color_scheme.timing)
        )
    }

    fn total_row(&self, total: Duration) -> String {
        format!(
            "{} {}",
            format!("{:<width$}", TOTAL_LABEL, width = ITERATION_LABEL_WIDTH).bold(),
            PlainFormatter::seconds_cell(total).color(self.color_scheme.timing).bold()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Strip ANSI escape sequences
    fn strip_ansi(text: &str) -> String {
        let pattern = regex::Regex::new(r"\x1b\[[0-9;]*m").unwrap();
        pattern.replace_all(text, "").into_owned()
    }

    #[test]
    fn test_status_colors() {
        let formatter = ColoredFormatter::new();
        assert_eq!(formatter.status_color(&ProbeStatus::Http(200)), Color::Green);
        assert_eq!(formatter.status_color(&ProbeStatus::Http(304)), Color::Green);
        assert_eq!(formatter.status_color(&ProbeStatus::Http(404)), Color::Yellow);
        assert_eq!(formatter.status_color(&ProbeStatus::Http(502)), Color::Red);
        assert_eq!(formatter.status_color(&ProbeStatus::Error("x".into())), Color::Red);
    }

    #[test]
    fn test_colored_rows_match_plain_layout() {
        let colored = ColoredFormatter::new();
        let plain = PlainFormatter::new();
        let miss = ProbeResult::success(Duration::from_millis(7), 200);
        let hit = ProbeResult::failed_with("reset by peer");

        assert_eq!(
            strip_ansi(&colored.paired_row("t42.smi", &miss, &hit)),
            plain.paired_row("t42.smi", &miss, &hit)
        );
        assert_eq!(strip_ansi(&colored.paired_header()), plain.paired_header());
        assert_eq!(strip_ansi(&colored.iteration_header()), plain.iteration_header());
        assert_eq!(
            strip_ansi(&colored.iteration_row(10, Duration::from_millis(333))),
            plain.iteration_row(10, Duration::from_millis(333))
        );
        assert_eq!(
            strip_ansi(&colored.total_row(Duration::from_secs(3))),
            plain.total_row(Duration::from_secs(3))
        );
    }

    #[test]
    fn test_custom_color_scheme() {
        let scheme = ColorScheme {
            warning: Color::Magenta,
            ..Default::default()
        };
        let formatter = ColoredFormatter::with_color_scheme(scheme);
        assert_eq!(formatter.status_color(&ProbeStatus::Http(404)), Color::Magenta);
    }
}
