//! Environment variable handling and .env file management

use crate::error::{AppError, Result};
use std::path::Path;

/// Environment variable configuration manager
pub struct EnvManager;

impl EnvManager {
    /// Load an env file if it exists; `Ok(false)` when it does not
    ///
    /// Variables already present in the process environment win over the file.
    pub fn load_env_file_from(path: &Path) -> Result<bool> {
        if !path.exists() {
            return Ok(false);
        }

        dotenv::from_path(path).map_err(|e| {
            AppError::config(format!("Failed to load {}: {}", path.display(), e))
        })?;
        Ok(true)
    }

    /// Create example .env file content
    pub fn create_example_env_content() -> String {
        let mut content = String::from(
            "# Proxy Latency Bench Configuration\n\
             #\n\
             # Values here are used as defaults and can be overridden by real\n\
             # environment variables and command-line arguments.\n\n",
        );

        for (var, description, example) in Self::get_supported_env_vars() {
            content.push_str(&format!("# {}\n# {}={}\n\n", description, var, example));
        }

        content
    }

    /// Validate environment variable format before parsing
    pub fn validate_env_var(key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "PROXY_URL" | "ORIGIN_URL" => {
                let parsed = url::Url::parse(value)
                    .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", key, value, e)))?;
                if !matches!(parsed.scheme(), "http" | "https") {
                    return Err(AppError::config(format!("{} must use http or https: {}", key, value)));
                }
            }
            "BENCH_MODE" => {
                value.parse::<crate::types::BenchmarkMode>()
                    .map_err(|e| AppError::config(format!("Invalid BENCH_MODE value '{}': {}", value, e)))?;
            }
            "NUM_ITERATIONS" => {
                Self::validate_range(key, value, crate::defaults::MAX_ITERATIONS as u64)?;
            }
            "REQUESTS_PER_ITER" => {
                Self::validate_range(key, value, crate::defaults::MAX_REQUESTS_PER_ITERATION as u64)?;
            }
            "TIMEOUT_SECONDS" => {
                if !value.is_empty() {
                    Self::validate_range(key, value, crate::defaults::MAX_TIMEOUT_SECONDS)?;
                }
            }
            "RANDOM_SEED" => {
                value.parse::<u64>()
                    .map_err(|e| AppError::config(format!("Invalid RANDOM_SEED value '{}': {}", value, e)))?;
            }
            "ENABLE_COLOR" => {
                value.parse::<bool>()
                    .map_err(|e| AppError::config(format!("Invalid ENABLE_COLOR value '{}': {}", value, e)))?;
            }
            _ => {
                // Unknown environment variable, ignore
            }
        }

        Ok(())
    }

    fn validate_range(key: &str, value: &str, max: u64) -> Result<()> {
        let parsed: u64 = value.parse()
            .map_err(|e| AppError::config(format!("Invalid {} value '{}': {}", key, value, e)))?;
        if parsed == 0 || parsed > max {
            return Err(AppError::config(format!("{} must be between 1 and {}, got: {}", key, max, parsed)));
        }
        Ok(())
    }

    /// Supported environment variables: name, description, example value
    pub fn get_supported_env_vars() -> Vec<(&'static str, &'static str, &'static str)> {
        vec![
            ("PROXY_URL", "Caching proxy under test", crate::defaults::DEFAULT_PROXY_URL),
            ("ORIGIN_URL", "Origin server serving the corpus", crate::defaults::DEFAULT_ORIGIN_URL),
            ("BENCH_MODE", "Benchmark to run (paired, random, all)", "paired"),
            ("NUM_ITERATIONS", "Iterations in random mode (1-10000)", "10"),
            ("REQUESTS_PER_ITER", "Requests per iteration in random mode (1-100000)", "50"),
            ("TIMEOUT_SECONDS", "Request timeout in seconds (1-300, unset for none)", "30"),
            ("RANDOM_SEED", "Seed for reproducible random sampling", "42"),
            ("ENABLE_COLOR", "Enable colored output", "true"),
        ]
    }

    /// Display environment variable help
    pub fn display_env_help() -> String {
        let mut help = String::new();
        help.push_str("Supported Environment Variables:\n\n");

        for (var, description, example) in Self::get_supported_env_vars() {
            help.push_str(&format!("  {:<18} {}\n", var, description));
            help.push_str(&format!("  {:<18} Example: {}\n\n", "", example));
        }

        help.push_str("Configuration Priority (highest to lowest):\n");
        help.push_str("  1. Command-line arguments\n");
        help.push_str("  2. Environment variables\n");
        help.push_str("  3. .env file values\n");
        help.push_str("  4. Default values\n");

        help
    }

    /// Validate an env file without loading it; `None` if the file is absent
    pub fn check_env_file(path: &Path) -> Result<Option<Vec<String>>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| AppError::config(format!("Failed to read {}: {}", path.display(), e)))?;

        let mut warnings = Vec::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                if let Err(e) = Self::validate_env_var(key.trim(), value) {
                    warnings.push(format!("Line '{}': {}", line, e));
                }
            }
        }

        Ok(Some(warnings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_example_content_lists_every_variable() {
        let content = EnvManager::create_example_env_content();

        assert!(content.contains("Proxy Latency Bench Configuration"));
        for (var, _, _) in EnvManager::get_supported_env_vars() {
            assert!(content.contains(&format!("# {}=", var)), "missing {}", var);
        }
    }

    #[test]
    fn test_validate_env_var() {
        assert!(EnvManager::validate_env_var("PROXY_URL", "http://localhost:3128").is_ok());
        assert!(EnvManager::validate_env_var("ORIGIN_URL", "https://origin.example").is_ok());
        assert!(EnvManager::validate_env_var("BENCH_MODE", "all").is_ok());
        assert!(EnvManager::validate_env_var("NUM_ITERATIONS", "10").is_ok());
        assert!(EnvManager::validate_env_var("REQUESTS_PER_ITER", " 50 ").is_ok());
        assert!(EnvManager::validate_env_var("TIMEOUT_SECONDS", "").is_ok());
        assert!(EnvManager::validate_env_var("TIMEOUT_SECONDS", "300").is_ok());
        assert!(EnvManager::validate_env_var("RANDOM_SEED", "18446744073709551615").is_ok());
        assert!(EnvManager::validate_env_var("ENABLE_COLOR", "false").is_ok());
        assert!(EnvManager::validate_env_var("SOMETHING_ELSE", "whatever").is_ok());

        assert!(EnvManager::validate_env_var("PROXY_URL", "localhost:3128").is_err());
        assert!(EnvManager::validate_env_var("ORIGIN_URL", "ftp://origin").is_err());
        assert!(EnvManager::validate_env_var("BENCH_MODE", "burst").is_err());
        assert!(EnvManager::validate_env_var("NUM_ITERATIONS", "0").is_err());
        assert!(EnvManager::validate_env_var("NUM_ITERATIONS", "10001").is_err());
        assert!(EnvManager::validate_env_var("REQUESTS_PER_ITER", "-1").is_err());
        assert!(EnvManager::validate_env_var("TIMEOUT_SECONDS", "301").is_err());
        assert!(EnvManager::validate_env_var("RANDOM_SEED", "abc").is_err());
        assert!(EnvManager::validate_env_var("ENABLE_COLOR", "maybe").is_err());
    }

    #[test]
    fn test_display_env_help() {
        let help = EnvManager::display_env_help();

        assert!(help.contains("Supported Environment Variables:"));
        assert!(help.contains("REQUESTS_PER_ITER"));
        assert!(help.contains("Configuration Priority"));
    }

    #[test]
    fn test_missing_env_file_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");

        assert!(!EnvManager::load_env_file_from(&path).unwrap());
        assert!(EnvManager::check_env_file(&path).unwrap().is_none());
    }

    #[test]
    fn test_check_env_file_reports_bad_lines() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(".env");
        std::fs::write(
            &path,
            "# comment\nPROXY_URL=http://localhost:3128\nNUM_ITERATIONS=zero\n\nENABLE_COLOR=true\n",
        )
        .unwrap();

        let warnings = EnvManager::check_env_file(&path).unwrap().unwrap();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("NUM_ITERATIONS"));
    }
}
