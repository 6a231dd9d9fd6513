//! Type definitions and aliases

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// Re-export commonly used types
pub use crate::error::{AppError, Result};

/// Which workload the harness runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BenchmarkMode {
    /// Two consecutive probes per corpus entry (expected miss, then hit)
    #[default]
    Paired,
    /// Uniformly random probes grouped into timed iterations
    Random,
    /// Paired mode followed by random mode
    All,
}

impl BenchmarkMode {
    /// Whether this mode includes the paired miss/hit pass
    pub fn runs_paired(&self) -> bool {
        matches!(self, Self::Paired | Self::All)
    }

    /// Whether this mode includes the randomized iteration pass
    pub fn runs_random(&self) -> bool {
        matches!(self, Self::Random | Self::All)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paired => "paired",
            Self::Random => "random",
            Self::All => "all",
        }
    }
}

impl fmt::Display for BenchmarkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BenchmarkMode {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "paired" => Ok(Self::Paired),
            "random" => Ok(Self::Random),
            "all" | "both" => Ok(Self::All),
            _ => Err(AppError::parse(format!("Invalid benchmark mode: {}", s))),
        }
    }
}

/// Status class of an HTTP response, used for coloring and log levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 1xx-3xx
    Ok,
    /// 4xx
    ClientError,
    /// 5xx and anything out of range
    ServerError,
}

impl StatusClass {
    pub fn from_code(code: u16) -> Self {
        match code {
            100..=399 => Self::Ok,
            400..=499 => Self::ClientError,
            _ => Self::ServerError,
        }
    }
}
