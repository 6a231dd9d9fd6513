//! Command-line interface

use crate::{config::EnvManager, types::BenchmarkMode};
use clap::Parser;
use std::io::IsTerminal;

/// Latency benchmark for HTTP caching proxies
///
/// Paired mode requests every corpus file twice (expected miss, then hit);
/// random mode issues bursts of uniformly sampled requests and times each burst.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "plb")]
#[command(version, about, long_about = None)]
#[command(after_help = EnvManager::display_env_help())]
pub struct Cli {
    /// Proxy base URL (used for both http and https)
    #[arg(short, long, value_name = "URL")]
    pub proxy: Option<String>,

    /// Origin base URL serving the corpus files
    #[arg(short, long, value_name = "URL")]
    pub origin: Option<String>,

    /// Benchmark to run
    #[arg(short, long, value_enum)]
    pub mode: Option<BenchmarkMode>,

    /// Number of iterations in random mode
    #[arg(short = 'n', long)]
    pub iterations: Option<u32>,

    /// Requests per iteration in random mode
    #[arg(short, long)]
    pub requests: Option<u32>,

    /// Request timeout in seconds (unbounded when omitted)
    #[arg(short, long, value_parser = parse_timeout)]
    pub timeout: Option<u64>,

    /// Seed for random sampling, for reproducible request sequences
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Force colored output
    #[arg(long)]
    pub color: bool,

    /// Disable colored output
    #[arg(long)]
    pub no_color: bool,

    /// Enable verbose output
    #[arg(long)]
    pub verbose: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,

    /// Print an example .env file and exit
    #[arg(long)]
    pub print_env_example: bool,
}

impl Cli {
    /// Validate CLI arguments for conflicts
    pub fn validate(&self) -> Result<(), String> {
        if self.color && self.no_color {
            return Err("Cannot specify both --color and --no-color".to_string());
        }

        if let (Some(proxy), Some(origin)) = (&self.proxy, &self.origin) {
            if proxy.trim_end_matches('/') == origin.trim_end_matches('/') {
                return Err("--proxy and --origin must differ".to_string());
            }
        }

        Ok(())
    }

    /// Explicit color choice from the command line, if any
    pub fn color_override(&self) -> Option<bool> {
        if self.color {
            Some(true)
        } else if self.no_color {
            Some(false)
        } else {
            None
        }
    }

    /// Check if colors should be enabled, given the configured preference
    pub fn use_colors(&self, configured: bool) -> bool {
        self.color_override()
            .unwrap_or_else(|| configured && supports_color())
    }
}

/// Parse a timeout in whole seconds
fn parse_timeout(s: &str) -> Result<u64, String> {
    if s.starts_with('+') || s.starts_with("0x") || s.starts_with("0X") {
        return Err(format!("Invalid timeout: {}", s));
    }

    s.parse::<u64>()
        .map_err(|_| format!("Invalid timeout: {}", s))
        .and_then(|secs| {
            if secs == 0 {
                Err("Timeout must be greater than 0".to_string())
            } else if secs > crate::defaults::MAX_TIMEOUT_SECONDS {
                Err(format!(
                    "Timeout cannot exceed {} seconds",
                    crate::defaults::MAX_TIMEOUT_SECONDS
                ))
            } else {
                Ok(secs)
            }
        })
}

/// Check if stdout is a color-capable terminal
pub fn supports_color() -> bool {
    if let Ok(term) = std::env::var("TERM") {
        if term == "dumb" {
            return false;
        }
    }

    if std::env::var_os("NO_COLOR").is_some() {
        return false;
    }

    if std::env::var_os("FORCE_COLOR").is_some() {
        return true;
    }

    std::io::stdout().is_terminal()
}
