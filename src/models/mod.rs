//! Data models and structures for the proxy latency bench

pub mod config;
pub mod probe;

// Re-export main model types
pub use config::Config;
pub use probe::{ProbeResult, ProbeStatus, FAILED_ELAPSED};
