//! Probe outcome data model

use crate::error::AppError;
use crate::types::StatusClass;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Elapsed value reported for a probe whose exchange failed
pub const FAILED_ELAPSED: f64 = -1.0;

/// What a single probe observed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProbeStatus {
    /// Numeric status code returned through the proxy
    Http(u16),
    /// Transport failure, carrying the full error description
    Error(String),
}

impl ProbeStatus {
    /// Exactly HTTP 404
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Http(404))
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn code(&self) -> Option<u16> {
        match self {
            Self::Http(code) => Some(*code),
            Self::Error(_) => None,
        }
    }

    pub fn class(&self) -> Option<StatusClass> {
        self.code().map(StatusClass::from_code)
    }
}

impl fmt::Display for ProbeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(code) => write!(f, "{}", code),
            Self::Error(description) => write!(f, "ERR({})", description),
        }
    }
}

/// Outcome of one measured GET: elapsed seconds plus status
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbeResult {
    /// Seconds, or [`FAILED_ELAPSED`] when the exchange failed
    pub elapsed: f64,
    pub status: ProbeStatus,
}

impl ProbeResult {
    /// A completed exchange
    pub fn success(elapsed: Duration, status_code: u16) -> Self {
        Self {
            elapsed: elapsed.as_secs_f64(),
            status: ProbeStatus::Http(status_code),
        }
    }

    /// A transport failure. The timing is discarded in favor of the sentinel.
    pub fn failed(error: &AppError) -> Self {
        Self::failed_with(error.to_string())
    }

    pub fn failed_with<S: Into<String>>(description: S) -> Self {
        Self {
            elapsed: FAILED_ELAPSED,
            status: ProbeStatus::Error(description.into()),
        }
    }

    pub fn is_failure(&self) -> bool {
        self.status.is_error()
    }

    /// Measured duration; `None` for failures
    pub fn elapsed_duration(&self) -> Option<Duration> {
        if self.is_failure() {
            return None;
        }
        Duration::try_from_secs_f64(self.elapsed).ok()
    }

    pub fn elapsed_ms(&self) -> Option<f64> {
        self.elapsed_duration().map(|d| d.as_secs_f64() * 1000.0)
    }
}
