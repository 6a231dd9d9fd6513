//! Structured logging for the proxy latency bench
//!
//! The benchmark report owns stdout, so every log line goes to stderr. This
//! module provides:
//! - Leveled console, JSON and compact output
//! - Session and correlation IDs for a whole run
//! - A probe logger (`NET`) with one entry per request
//! - A run logger (`RUN`) with iteration and run summaries

use crate::error::{AppError, Result};
use crate::models::{Config, ProbeResult};
use crate::workload::{IterationStats, PairedReport};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::io::{self, IsTerminal, Write};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Log level enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LogLevel {
    /// Trace level - most detailed
    Trace = 0,
    /// Debug level - one line per probe
    Debug = 1,
    /// Info level - iteration and run summaries
    Info = 2,
    /// Warning level - transport failures, configuration warnings
    Warn = 3,
    /// Error level - errors that end the run
    Error = 4,
    /// Fatal level
    Fatal = 5,
}

impl LogLevel {
    /// Get log level name as string
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "TRACE",
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Fatal => "FATAL",
        }
    }

    /// Get ANSI color code for console output
    pub fn color_code(&self) -> &'static str {
        match self {
            LogLevel::Trace => "\x1b[37m",    // White
            LogLevel::Debug => "\x1b[36m",    // Cyan
            LogLevel::Info => "\x1b[32m",     // Green
            LogLevel::Warn => "\x1b[33m",     // Yellow
            LogLevel::Error => "\x1b[31m",    // Red
            LogLevel::Fatal => "\x1b[35m",    // Magenta
        }
    }

    /// Reset ANSI color code
    pub fn reset_code() -> &'static str {
        "\x1b[0m"
    }
}

impl std::str::FromStr for LogLevel {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "TRACE" => Ok(LogLevel::Trace),
            "DEBUG" => Ok(LogLevel::Debug),
            "INFO" => Ok(LogLevel::Info),
            "WARN" | "WARNING" => Ok(LogLevel::Warn),
            "ERROR" => Ok(LogLevel::Error),
            "FATAL" => Ok(LogLevel::Fatal),
            _ => Err(AppError::parse(format!("Invalid log level: {}", s))),
        }
    }
}

/// Log entry structure for structured logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    /// Timestamp when log entry was created
    pub timestamp: DateTime<Utc>,
    pub level: LogLevel,
    pub message: String,
    /// Logger name/component
    pub logger: String,
    /// Correlation ID for tracking related events
    pub correlation_id: Option<String>,
    /// Additional structured fields
    pub fields: HashMap<String, serde_json::Value>,
}

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    /// Human-readable console format
    Console,
    /// JSON format for structured logging
    Json,
    /// Compact single-line format
    Compact,
}

/// Shared logging context for correlation and session tracking
#[derive(Debug, Default)]
struct LogContext {
    session_id: Option<String>,
    current_correlation_id: Option<String>,
    context_fields: HashMap<String, serde_json::Value>,
}

/// Logger implementation with multiple output formats
pub struct Logger {
    min_level: LogLevel,
    use_color: bool,
    format: LogFormat,
    name: String,
    context: Arc<RwLock<LogContext>>,
}

impl Logger {
    /// Create a new logger
    pub fn new(name: String) -> Self {
        Self {
            min_level: LogLevel::Info,
            use_color: true,
            format: LogFormat::Console,
            name,
            context: Arc::new(RwLock::new(LogContext::default())),
        }
    }

    /// Create a logger with specific configuration
    pub fn with_config(name: String, config: &Config) -> Self {
        let min_level = if config.debug {
            LogLevel::Debug
        } else if config.verbose {
            LogLevel::Info
        } else {
            LogLevel::Warn
        };

        Self {
            min_level,
            use_color: config.enable_color && io::stderr().is_terminal(),
            format: if config.debug { LogFormat::Json } else { LogFormat::Console },
            name,
            context: Arc::new(RwLock::new(LogContext::default())),
        }
    }

    pub fn set_level(&mut self, level: LogLevel) {
        self.min_level = level;
    }

    pub fn set_format(&mut self, format: LogFormat) {
        self.format = format;
    }

    pub fn set_color(&mut self, use_color: bool) {
        self.use_color = use_color;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set session correlation ID
    pub async fn set_session_id(&self, session_id: String) {
        let mut context = self.context.write().await;
        context.session_id = Some(session_id);
    }

    /// Add context field for all subsequent log entries
    pub async fn add_context_field<T: Serialize>(&self, key: String, value: T) {
        if let Ok(json_value) = serde_json::to_value(value) {
            let mut context = self.context.write().await;
            context.context_fields.insert(key, json_value);
        }
    }

    /// Start a correlated operation
    pub async fn start_operation(&self, operation_name: &str) -> String {
        let correlation_id = Uuid::new_v4().to_string();
        {
            let mut context = self.context.write().await;
            context.current_correlation_id = Some(correlation_id.clone());
        }

        self.info(&format!("Started operation: {}", operation_name))
            .correlation_id(&correlation_id)
            .field("operation", operation_name)
            .field("operation_type", "start")
            .log()
            .await;

        correlation_id
    }

    /// End a correlated operation
    pub async fn end_operation(&self, correlation_id: &str, operation_name: &str, success: bool) {
        self.info(&format!("Completed operation: {} (success: {})", operation_name, success))
            .correlation_id(correlation_id)
            .field("operation", operation_name)
            .field("operation_type", "end")
            .field("success", success)
            .log()
            .await;

        let mut context = self.context.write().await;
        if context.current_correlation_id.as_deref() == Some(correlation_id) {
            context.current_correlation_id = None;
        }
    }

    /// Create a log entry builder
    pub fn log(&self, level: LogLevel, message: &str) -> LogEntryBuilder<'_> {
        LogEntryBuilder::new(self, level, message.to_string())
    }

    pub fn debug(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Debug, message)
    }

    pub fn info(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Info, message)
    }

    pub fn warn(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Warn, message)
    }

    pub fn error(&self, message: &str) -> LogEntryBuilder<'_> {
        self.log(LogLevel::Error, message)
    }

    /// Check if a log level would be output
    pub fn would_log(&self, level: LogLevel) -> bool {
        level >= self.min_level
    }

    async fn write_entry(&self, mut entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }

        let context = self.context.read().await;
        if let Some(session_id) = &context.session_id {
            entry.fields.insert("session_id".to_string(), serde_json::Value::String(session_id.clone()));
        }
        if entry.correlation_id.is_none() {
            entry.correlation_id = context.current_correlation_id.clone();
        }
        for (key, value) in &context.context_fields {
            entry.fields.insert(key.clone(), value.clone());
        }
        drop(context);

        let output = self.format_entry(&entry);
        let _ = writeln!(io::stderr(), "{}", output);
    }

    /// Render an entry in this logger's format
    pub fn format_entry(&self, entry: &LogEntry) -> String {
        match self.format {
            LogFormat::Console => self.format_console(entry),
            LogFormat::Json => self.format_json(entry),
            LogFormat::Compact => self.format_compact(entry),
        }
    }

    fn format_console(&self, entry: &LogEntry) -> String {
        let timestamp = entry.timestamp.format("%Y-%m-%d %H:%M:%S%.3f");
        let level_str = entry.level.as_str();

        let formatted_level = if self.use_color {
            format!("{}{:>5}{}", entry.level.color_code(), level_str, LogLevel::reset_code())
        } else {
            format!("{:>5}", level_str)
        };

        let mut output = format!("{} {} [{}] {}",
            timestamp,
            formatted_level,
            entry.logger,
            entry.message
        );

        if let Some(correlation_id) = &entry.correlation_id {
            let short = correlation_id.get(..8).unwrap_or(correlation_id);
            output.push_str(&format!(" [{}]", short));
        }

        if !entry.fields.is_empty() {
            let mut fields_str: Vec<String> = entry.fields.iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            fields_str.sort();
            output.push_str(&format!(" {{{}}}", fields_str.join(", ")));
        }

        output
    }

    fn format_json(&self, entry: &LogEntry) -> String {
        match serde_json::to_string(entry) {
            Ok(json) => json,
            Err(_) => format!("{{\"error\": \"Failed to serialize log entry\", \"message\": \"{}\"}}", entry.message),
        }
    }

    fn format_compact(&self, entry: &LogEntry) -> String {
        let timestamp = entry.timestamp.format("%H:%M:%S");
        format!("{} {} {}: {}",
            timestamp,
            entry.level.as_str().chars().next().unwrap_or('?'),
            entry.logger,
            entry.message
        )
    }
}

/// Builder pattern for creating log entries
pub struct LogEntryBuilder<'a> {
    logger: &'a Logger,
    entry: LogEntry,
}

impl<'a> LogEntryBuilder<'a> {
    fn new(logger: &'a Logger, level: LogLevel, message: String) -> Self {
        Self {
            logger,
            entry: LogEntry {
                timestamp: Utc::now(),
                level,
                message,
                logger: logger.name.clone(),
                correlation_id: None,
                fields: HashMap::new(),
            },
        }
    }

    pub fn correlation_id(mut self, id: &str) -> Self {
        self.entry.correlation_id = Some(id.to_string());
        self
    }

    /// Add a structured field
    pub fn field<T: Serialize>(mut self, key: &str, value: T) -> Self {
        if let Ok(json_value) = serde_json::to_value(value) {
            self.entry.fields.insert(key.to_string(), json_value);
        }
        self
    }

    /// Add the outcome of a probe
    pub fn probe(self, result: &ProbeResult) -> Self {
        self.field("elapsed_s", result.elapsed)
            .field("status_code", result.status.code())
            .field("status", result.status.to_string())
            .field("failed", result.is_failure())
    }

    /// Add error information
    pub fn error_info(self, error: &AppError) -> Self {
        self.field("error_category", error.category())
            .field("error_recoverable", error.is_recoverable())
            .field("error_exit_code", error.exit_code())
    }

    pub fn entry(&self) -> &LogEntry {
        &self.entry
    }

    /// Finalize and write the log entry
    pub async fn log(self) {
        self.logger.write_entry(self.entry).await;
    }
}

/// Per-request logger
pub struct ProbeLogger {
    logger: Logger,
}

impl ProbeLogger {
    pub fn new(config: &Config) -> Self {
        Self {
            logger: Logger::with_config("NET".to_string(), config),
        }
    }

    fn with_logger(logger: Logger) -> Self {
        Self { logger }
    }

    /// Debug for answered requests, warn for transport failures
    pub async fn log_probe(&self, url: &str, result: &ProbeResult) {
        let level = if result.is_failure() { LogLevel::Warn } else { LogLevel::Debug };
        if !self.logger.would_log(level) {
            return;
        }

        let message = match result.elapsed_ms() {
            Some(ms) => format!("GET {} -> {} in {:.1}ms", url, result.status, ms),
            None => format!("GET {} -> {}", url, result.status),
        };

        self.logger.log(level, &message)
            .field("url", url)
            .field("method", "GET")
            .probe(result)
            .log()
            .await;
    }
}

/// Run-level logger: run boundaries and iteration summaries
pub struct RunLogger {
    logger: Logger,
}

impl RunLogger {
    pub fn new(config: &Config) -> Self {
        Self {
            logger: Logger::with_config("RUN".to_string(), config),
        }
    }

    fn with_logger(logger: Logger) -> Self {
        Self { logger }
    }

    /// Start a run and return its correlation id
    pub async fn start_run(&self, mode: &str, corpus_size: usize) -> String {
        self.logger.add_context_field("mode".to_string(), mode).await;
        self.logger.add_context_field("corpus_size".to_string(), corpus_size).await;
        self.logger.start_operation(&format!("{} benchmark", mode)).await
    }

    pub async fn end_run(&self, correlation_id: &str, mode: &str, total: Duration) {
        self.logger.info(&format!("{} benchmark finished in {:.5}s", mode, total.as_secs_f64()))
            .field("total_seconds", total.as_secs_f64())
            .log()
            .await;
        self.logger.end_operation(correlation_id, &format!("{} benchmark", mode), true).await;
    }

    /// Miss/hit pair for one resource
    pub async fn log_pair(&self, name: &str, miss: &ProbeResult, hit: &ProbeResult) {
        if !self.logger.would_log(LogLevel::Debug) {
            return;
        }

        let speedup = match (miss.elapsed_duration(), hit.elapsed_duration()) {
            (Some(miss), Some(hit)) if hit > Duration::ZERO => Some(miss.as_secs_f64() / hit.as_secs_f64()),
            _ => None,
        };

        self.logger.debug(&format!("{}: miss {} / hit {}", name, miss.status, hit.status))
            .field("resource", name)
            .field("miss_s", miss.elapsed)
            .field("hit_s", hit.elapsed)
            .field("speedup", speedup)
            .log()
            .await;
    }

    /// Totals for a finished paired run
    pub async fn log_paired_summary(&self, report: &PairedReport) {
        self.logger.info(&format!(
            "{} resources paired, hit faster than miss for {}, {} failed probes",
            report.len(),
            report.faster_hits(),
            report.failures()
        ))
            .field("resources", report.len())
            .field("faster_hits", report.faster_hits())
            .field("failures", report.failures())
            .log()
            .await;
    }

    /// Summary of one random-mode iteration
    pub async fn log_iteration(&self, index: u32, elapsed: Duration, stats: &IterationStats) {
        let mut builder = self.logger.info(&format!(
            "Iteration {}: {} probes in {:.5}s ({} counted, {} not found, {} failed)",
            index,
            stats.issued,
            elapsed.as_secs_f64(),
            stats.counted,
            stats.skipped_not_found,
            stats.failures
        ))
            .field("iteration", index)
            .field("elapsed_s", elapsed.as_secs_f64())
            .field("issued", stats.issued)
            .field("counted", stats.counted)
            .field("skipped_not_found", stats.skipped_not_found)
            .field("failures", stats.failures);

        if let Some(mean) = stats.mean_counted_latency() {
            builder = builder.field("mean_counted_latency_ms", mean.as_secs_f64() * 1000.0);
        }

        builder.log().await;
    }

    pub async fn log_info(&self, message: &str) {
        self.logger.info(message).log().await;
    }

    /// Configuration warnings found before the run
    pub async fn log_warning(&self, message: &str) {
        self.logger.warn(message).log().await;
    }

    /// An error that ends the run
    pub async fn log_error(&self, error: &AppError, context: &str) {
        self.logger.error(&format!("{}: {}", context, error))
            .error_info(error)
            .field("context", context)
            .log()
            .await;
    }
}

/// Logger factory sharing one session id across loggers
pub struct LoggerFactory {
    config: Config,
    session_id: String,
}

impl LoggerFactory {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            session_id: Uuid::new_v4().to_string(),
        }
    }

    /// Create a logger with a specific name
    pub async fn create_logger(&self, name: &str) -> Logger {
        let logger = Logger::with_config(name.to_string(), &self.config);
        logger.set_session_id(self.session_id.clone()).await;
        logger
    }

    pub async fn create_probe_logger(&self) -> ProbeLogger {
        ProbeLogger::with_logger(self.create_logger("NET").await)
    }

    pub async fn create_run_logger(&self) -> RunLogger {
        RunLogger::with_logger(self.create_logger("RUN").await)
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}
