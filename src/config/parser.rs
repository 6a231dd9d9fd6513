//! Configuration parsing from CLI arguments and environment variables

use crate::{
    cli::Cli,
    config::env::EnvManager,
    error::Result,
    models::Config,
};
use std::path::PathBuf;

/// Configuration parser that layers defaults, `.env`, the environment and CLI arguments
pub struct ConfigParser {
    cli: Cli,
    env_file: Option<PathBuf>,
}

impl ConfigParser {
    /// Create a new configuration parser reading `./.env`
    pub fn new(cli: Cli) -> Self {
        Self {
            cli,
            env_file: Some(PathBuf::from(".env")),
        }
    }

    /// Use a different env file, or none
    pub fn with_env_file(mut self, env_file: Option<PathBuf>) -> Self {
        self.env_file = env_file;
        self
    }

    /// Parse and build the complete configuration from the process environment
    pub fn parse(&self) -> Result<Config> {
        if let Some(path) = &self.env_file {
            EnvManager::load_env_file_from(path)?;
        }

        self.parse_with_lookup(|key| std::env::var(key).ok())
    }

    /// Lines of the env file that fail validation
    ///
    /// Such a line only survives [`parse`](Self::parse) when a real environment
    /// variable shadows it, so these are reported as warnings.
    pub fn env_file_warnings(&self) -> Result<Vec<String>> {
        match &self.env_file {
            Some(path) => Ok(EnvManager::check_env_file(path)?.unwrap_or_default()),
            None => Ok(Vec::new()),
        }
    }

    /// Same as [`parse`](Self::parse) with an explicit variable lookup and no env file
    pub fn parse_with_lookup<F>(&self, lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();
        config.merge_from_lookup(lookup)?;
        self.apply_cli_overrides(&mut config);
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(&self, config: &mut Config) {
        if let Some(proxy) = &self.cli.proxy {
            config.proxy_url = proxy.trim().to_string();
        }

        if let Some(origin) = &self.cli.origin {
            config.origin_url = origin.trim().to_string();
        }

        if let Some(mode) = self.cli.mode {
            config.mode = mode;
        }

        if let Some(iterations) = self.cli.iterations {
            config.iterations = iterations;
        }

        if let Some(requests) = self.cli.requests {
            config.requests_per_iteration = requests;
        }

        if self.cli.timeout.is_some() {
            config.timeout_seconds = self.cli.timeout;
        }

        if self.cli.seed.is_some() {
            config.seed = self.cli.seed;
        }

        config.enable_color = self.cli.use_colors(config.enable_color);

        // CLI-only flags
        config.verbose = self.cli.verbose || self.cli.debug;
        config.debug = self.cli.debug;
    }
}

/// Display configuration summary for debug purposes
pub fn display_config_summary(config: &Config) -> String {
    let timeout = config
        .timeout_seconds
        .map(|secs| format!("{}s", secs))
        .unwrap_or_else(|| "none".to_string());
    let seed = config
        .seed
        .map(|seed| seed.to_string())
        .unwrap_or_else(|| "random".to_string());

    [
        format!("Proxy: {}", config.proxy_url),
        format!("Origin: {}", config.origin_url),
        format!("Mode: {}", config.mode),
        format!("Iterations: {}", config.iterations),
        format!("Requests per iteration: {}", config.requests_per_iteration),
        format!("Timeout: {}", timeout),
        format!("Seed: {}", seed),
        format!("Color Output: {}", config.enable_color),
        format!("Verbose: {}", config.verbose),
        format!("Debug: {}", config.debug),
    ]
    .join("\n")
}
