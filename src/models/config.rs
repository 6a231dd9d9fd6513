//! Configuration data model and validation

use crate::types::{AppError, BenchmarkMode, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Main application configuration
///
/// Built once at startup by [`crate::config::ConfigParser`] and passed by
/// reference into every workload; nothing mutates it afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Caching proxy under test, used for both `http` and `https`
    #[serde(default = "default_proxy_url")]
    pub proxy_url: String,

    /// Origin server that serves the corpus at `/<name>`
    #[serde(default = "default_origin_url")]
    pub origin_url: String,

    /// Which workload(s) to run
    #[serde(default)]
    pub mode: BenchmarkMode,

    /// Number of timed iterations in random mode
    #[serde(default = "default_iterations")]
    pub iterations: u32,

    /// Probes per iteration in random mode
    #[serde(default = "default_requests_per_iteration")]
    pub requests_per_iteration: u32,

    /// Request timeout; `None` leaves requests unbounded
    #[serde(default)]
    pub timeout_seconds: Option<u64>,

    /// Seed for corpus sampling; `None` seeds from the thread RNG
    #[serde(default)]
    pub seed: Option<u64>,

    /// Enable colored terminal output
    #[serde(default = "default_enable_color")]
    pub enable_color: bool,

    /// Enable verbose output
    #[serde(default)]
    pub verbose: bool,

    /// Enable debug output
    #[serde(default)]
    pub debug: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            proxy_url: default_proxy_url(),
            origin_url: default_origin_url(),
            mode: BenchmarkMode::default(),
            iterations: default_iterations(),
            requests_per_iteration: default_requests_per_iteration(),
            timeout_seconds: None,
            seed: None,
            enable_color: default_enable_color(),
            verbose: false,
            debug: false,
        }
    }
}

impl Config {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Get timeout as Duration, if one is configured
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_seconds.map(Duration::from_secs)
    }

    /// Total number of probes random mode will issue
    pub fn total_random_probes(&self) -> u64 {
        self.iterations as u64 * self.requests_per_iteration as u64
    }

    /// Strip trailing slashes so `origin + "/" + name` yields a single separator
    pub fn normalize(&mut self) {
        while self.origin_url.len() > 1 && self.origin_url.ends_with('/') {
            self.origin_url.pop();
        }
    }

    /// Validate the configuration and return any errors
    pub fn validate(&self) -> Result<()> {
        validate_base_url("Proxy URL", &self.proxy_url)?;
        validate_base_url("Origin URL", &self.origin_url)?;

        if self.iterations == 0 {
            return Err(AppError::config("Iteration count must be greater than 0"));
        }

        if self.iterations > crate::defaults::MAX_ITERATIONS {
            return Err(AppError::config(format!(
                "Iteration count cannot exceed {}",
                crate::defaults::MAX_ITERATIONS
            )));
        }

        if self.requests_per_iteration == 0 {
            return Err(AppError::config("Requests per iteration must be greater than 0"));
        }

        if self.requests_per_iteration > crate::defaults::MAX_REQUESTS_PER_ITERATION {
            return Err(AppError::config(format!(
                "Requests per iteration cannot exceed {}",
                crate::defaults::MAX_REQUESTS_PER_ITERATION
            )));
        }

        if let Some(timeout) = self.timeout_seconds {
            if timeout == 0 {
                return Err(AppError::config("Timeout must be greater than 0"));
            }

            if timeout > crate::defaults::MAX_TIMEOUT_SECONDS {
                return Err(AppError::config(format!(
                    "Timeout cannot exceed {} seconds",
                    crate::defaults::MAX_TIMEOUT_SECONDS
                )));
            }
        }

        Ok(())
    }

    /// Merge environment variables into this configuration
    pub fn merge_from_env(&mut self) -> Result<()> {
        self.merge_from_lookup(|key| std::env::var(key).ok())
    }

    /// Merge values from an arbitrary key lookup (the process environment in production)
    pub fn merge_from_lookup<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(proxy_url) = lookup("PROXY_URL") {
            self.proxy_url = proxy_url.trim().to_string();
        }

        if let Some(origin_url) = lookup("ORIGIN_URL") {
            self.origin_url = origin_url.trim().to_string();
        }

        if let Some(mode) = lookup("BENCH_MODE") {
            self.mode = mode.parse()
                .map_err(|_| AppError::config(format!("Invalid BENCH_MODE value '{}'", mode)))?;
        }

        if let Some(iterations) = lookup("NUM_ITERATIONS") {
            self.iterations = iterations.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid NUM_ITERATIONS value '{}': {}", iterations, e)))?;
        }

        if let Some(requests) = lookup("REQUESTS_PER_ITER") {
            self.requests_per_iteration = requests.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid REQUESTS_PER_ITER value '{}': {}", requests, e)))?;
        }

        if let Some(timeout) = lookup("TIMEOUT_SECONDS") {
            let timeout = timeout.trim();
            self.timeout_seconds = if timeout.is_empty() {
                None
            } else {
                Some(timeout.parse()
                    .map_err(|e| AppError::config(format!("Invalid TIMEOUT_SECONDS value '{}': {}", timeout, e)))?)
            };
        }

        if let Some(seed) = lookup("RANDOM_SEED") {
            self.seed = Some(seed.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid RANDOM_SEED value '{}': {}", seed, e)))?);
        }

        if let Some(enable_color) = lookup("ENABLE_COLOR") {
            self.enable_color = enable_color.trim().parse()
                .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", enable_color, e)))?;
        }

        Ok(())
    }
}

fn validate_base_url(label: &str, value: &str) -> Result<()> {
    if value.is_empty() {
        return Err(AppError::config(format!("{} cannot be empty", label)));
    }

    let parsed = url::Url::parse(value)
        .map_err(|e| AppError::config(format!("Invalid {} '{}': {}", label, value, e)))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(AppError::config(format!(
                "{} must use http or https, got '{}': {}",
                label, scheme, value
            )))
        }
    }

    if parsed.host_str().is_none() {
        return Err(AppError::config(format!("{} must have a host: {}", label, value)));
    }

    Ok(())
}

// Default value functions for serde
fn default_proxy_url() -> String {
    crate::defaults::DEFAULT_PROXY_URL.to_string()
}

fn default_origin_url() -> String {
    crate::defaults::DEFAULT_ORIGIN_URL.to_string()
}

fn default_iterations() -> u32 {
    crate::defaults::DEFAULT_ITERATIONS
}

fn default_requests_per_iteration() -> u32 {
    crate::defaults::DEFAULT_REQUESTS_PER_ITERATION
}

fn default_enable_color() -> bool {
    crate::defaults::DEFAULT_ENABLE_COLOR
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config_matches_reference_constants() {
        let config = Config::default();
        assert_eq!(config.proxy_url, "http://localhost:49877");
        assert_eq!(config.origin_url, "http://localhost:49876");
        assert_eq!(config.iterations, 10);
        assert_eq!(config.requests_per_iteration, 50);
        assert_eq!(config.timeout(), None);
        assert_eq!(config.mode, BenchmarkMode::Paired);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_proxy_url_invalid() {
        let mut config = Config::default();
        config.proxy_url = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_invalid_origin_url_format() {
        let mut config = Config::default();
        config.origin_url = "not-a-url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_non_http_scheme_invalid() {
        let mut config = Config::default();
        config.proxy_url = "socks5://localhost:1080".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_counts_invalid() {
        let mut config = Config::default();
        config.iterations = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.requests_per_iteration = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_timeout_bounds() {
        let mut config = Config::default();
        config.timeout_seconds = Some(0);
        assert!(config.validate().is_err());

        config.timeout_seconds = Some(301);
        assert!(config.validate().is_err());

        config.timeout_seconds = Some(5);
        assert!(config.validate().is_ok());
        assert_eq!(config.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_normalize_trims_trailing_slashes() {
        let mut config = Config::default();
        config.origin_url = "http://localhost:49876//".to_string();
        config.normalize();
        assert_eq!(config.origin_url, "http://localhost:49876");
    }

    #[test]
    fn test_total_random_probes() {
        let config = Config::default();
        assert_eq!(config.total_random_probes(), 500);
    }

    #[test]
    fn test_merge_from_lookup() {
        let mut config = Config::default();
        config.merge_from_lookup(lookup_from(&[
            ("PROXY_URL", "http://127.0.0.1:8080"),
            ("ORIGIN_URL", " http://127.0.0.1:9090 "),
            ("BENCH_MODE", "random"),
            ("NUM_ITERATIONS", "3"),
            ("REQUESTS_PER_ITER", "7"),
            ("TIMEOUT_SECONDS", "4"),
            ("RANDOM_SEED", "42"),
            ("ENABLE_COLOR", "false"),
        ])).unwrap();

        assert_eq!(config.proxy_url, "http://127.0.0.1:8080");
        assert_eq!(config.origin_url, "http://127.0.0.1:9090");
        assert_eq!(config.mode, BenchmarkMode::Random);
        assert_eq!(config.iterations, 3);
        assert_eq!(config.requests_per_iteration, 7);
        assert_eq!(config.timeout_seconds, Some(4));
        assert_eq!(config.seed, Some(42));
        assert!(!config.enable_color);
    }

    #[test]
    fn test_merge_from_lookup_empty_leaves_defaults() {
        let mut config = Config::default();
        config.merge_from_lookup(|_| None).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_merge_from_lookup_rejects_bad_numbers() {
        let mut config = Config::default();
        assert!(config.merge_from_lookup(lookup_from(&[("NUM_ITERATIONS", "ten")])).is_err());

        let mut config = Config::default();
        assert!(config.merge_from_lookup(lookup_from(&[("BENCH_MODE", "sequential")])).is_err());
    }

    #[test]
    fn test_config_serde_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }
}
