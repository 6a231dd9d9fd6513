//! Soft configuration checks
//!
//! [`Config::validate`] rejects unusable settings; the checks here only flag
//! settings that are valid but likely to skew the measurements.

use crate::{
    client::HttpUtils,
    error::Result,
    models::Config,
};

/// Above this many random-mode probes a run is flagged as long
pub const LARGE_RUN_PROBES: u64 = 100_000;

/// Configuration validator with advisory rules
pub struct ConfigValidator;

impl ConfigValidator {
    /// Run [`Config::validate`] and collect advisory warnings
    pub fn validate_comprehensive(config: &Config) -> Result<Vec<ValidationWarning>> {
        config.validate()?;

        let mut warnings = Vec::new();
        warnings.extend(Self::validate_endpoints(config));
        warnings.extend(Self::validate_run_size(config));
        Ok(warnings)
    }

    fn validate_endpoints(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if config.proxy_url.trim_end_matches('/') == config.origin_url {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Error,
                format!(
                    "Proxy and origin are the same address ({}); requests will not exercise a cache",
                    config.origin_url
                ),
            ));
        }

        if !HttpUtils::is_loopback(&config.proxy_url) {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                format!(
                    "Proxy {} is not on the loopback interface; network latency will be included in every timing",
                    config.proxy_url
                ),
            ));
        }

        if HttpUtils::is_https(&config.origin_url) {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Origin {} uses HTTPS; the proxy will tunnel these requests and cannot cache them",
                    config.origin_url
                ),
            ));
        }

        warnings
    }

    fn validate_run_size(config: &Config) -> Vec<ValidationWarning> {
        let mut warnings = Vec::new();

        if config.timeout_seconds.is_none() {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Info,
                "No request timeout set; a stalled proxy will block the run".to_string(),
            ));
        }

        if config.mode.runs_random() && config.total_random_probes() > LARGE_RUN_PROBES {
            warnings.push(ValidationWarning::new(
                ValidationLevel::Warning,
                format!(
                    "Random mode will issue {} sequential requests",
                    config.total_random_probes()
                ),
            ));
        }

        warnings
    }
}

/// Validation warning level
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ValidationLevel {
    Info,
    Warning,
    Error,
}

impl ValidationLevel {
    /// Get display string for level
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

/// Configuration validation warning
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationWarning {
    pub level: ValidationLevel,
    pub message: String,
}

impl ValidationWarning {
    /// Create a new validation warning
    pub fn new(level: ValidationLevel, message: String) -> Self {
        Self { level, message }
    }

    /// Format warning for display
    pub fn format(&self) -> String {
        format!("[{}] {}", self.level.as_str(), self.message)
    }
}

/// Convenience function for comprehensive configuration validation
pub fn validate_config(config: &Config) -> Result<Vec<ValidationWarning>> {
    ConfigValidator::validate_comprehensive(config)
}
