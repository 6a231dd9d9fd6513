//! Report formatting for benchmark runs
//!
//! Reports go to stdout through a [`ReportFormatter`]; the plain and colored
//! implementations share one column layout.

mod colored;
mod formatter;

pub use colored::{ColorScheme, ColoredFormatter};
pub use formatter::{PlainFormatter, ReportFormatter};

/// Output formatting factory for creating appropriate formatters
pub struct FormatterFactory;

impl FormatterFactory {
    /// Create a formatter based on color preference
    pub fn create_formatter(enable_color: bool) -> Box<dyn ReportFormatter> {
        if enable_color {
            Box::new(ColoredFormatter::new())
        } else {
            Box::new(PlainFormatter::new())
        }
    }

    /// Create a plain text formatter for scripts/logs
    pub fn create_plain_formatter() -> Box<dyn ReportFormatter> {
        Self::create_formatter(false)
    }

    pub fn from_config(config: &crate::models::Config) -> Box<dyn ReportFormatter> {
        Self::create_formatter(config.enable_color)
    }
}
