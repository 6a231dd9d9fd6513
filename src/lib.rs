//! Proxy Latency Bench
//!
//! A latency harness for HTTP caching proxies. Requests for a fixed corpus of
//! files are sent through the proxy to an origin server, either as miss/hit
//! pairs or as timed bursts of randomly sampled requests.

pub mod app;
pub mod cli;
pub mod client;
pub mod clock;
pub mod config;
pub mod corpus;
pub mod error;
pub mod logging;
pub mod models;
pub mod output;
pub mod probe;
pub mod types;
pub mod workload;

// Re-export commonly used types
pub use app::{App, RunSummary};
pub use client::{ProxiedTransport, ProxyClient, TransportResponse};
pub use clock::{Clock, ManualClock, MonotonicClock};
pub use corpus::Corpus;
pub use error::{AppError, Result};
pub use models::{Config, ProbeResult, ProbeStatus};
pub use output::{ColoredFormatter, FormatterFactory, PlainFormatter, ReportFormatter};
pub use probe::RequestProbe;
pub use types::BenchmarkMode;
pub use workload::{IterationStats, PairedReport, RandomPlan, RandomReport, Workload};

/// Application version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

/// Default configuration values
pub mod defaults {
    pub const DEFAULT_PROXY_URL: &str = "http://localhost:49877";
    pub const DEFAULT_ORIGIN_URL: &str = "http://localhost:49876";
    pub const DEFAULT_ITERATIONS: u32 = 10;
    pub const DEFAULT_REQUESTS_PER_ITERATION: u32 = 50;
    pub const DEFAULT_ENABLE_COLOR: bool = true;

    pub const MAX_ITERATIONS: u32 = 10_000;
    pub const MAX_REQUESTS_PER_ITERATION: u32 = 100_000;
    pub const MAX_TIMEOUT_SECONDS: u64 = 300;

    /// Corpus families, in report order
    pub const CORPUS_PREFIXES: &[&str] = &["a", "t"];
    /// Each family is numbered 1..=CORPUS_MAX_INDEX
    pub const CORPUS_MAX_INDEX: u32 = 99;
    pub const CORPUS_SUFFIX: &str = ".smi";
}
