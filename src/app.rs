//! Main application orchestration and execution

use crate::{
    client::{ProxiedTransport, ProxyClient},
    clock::{Clock, MonotonicClock},
    config::{display_config_summary, validate_config, ValidationLevel},
    corpus::Corpus,
    error::Result,
    logging::LoggerFactory,
    models::Config,
    output::FormatterFactory,
    probe::RequestProbe,
    types::BenchmarkMode,
    workload::{PairedReport, RandomPlan, RandomReport, Workload},
};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::io::{self, Write};
use std::sync::Arc;

/// Reports from whichever modes ran
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub paired: Option<PairedReport>,
    pub random: Option<RandomReport>,
    /// Seed actually used for random sampling
    pub seed: Option<u64>,
}

/// Main application struct that coordinates all components
pub struct App {
    config: Config,
    loggers: LoggerFactory,
    corpus: Corpus,
    env_file_warnings: Vec<String>,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            loggers: LoggerFactory::new(config.clone()),
            config,
            corpus: Corpus::standard(),
            env_file_warnings: Vec::new(),
        }
    }

    /// Env file lines to report as warnings before the run starts
    pub fn with_env_file_warnings(mut self, warnings: Vec<String>) -> Self {
        self.env_file_warnings = warnings;
        self
    }

    pub fn with_corpus(mut self, corpus: Corpus) -> Self {
        self.corpus = corpus;
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run the configured modes against the real proxy, reporting to stdout
    pub async fn run(&self) -> Result<RunSummary> {
        let transport = Arc::new(ProxyClient::from_config(&self.config)?);
        let mut stdout = io::stdout();
        self.run_with(transport, Arc::new(MonotonicClock), &mut stdout).await
    }

    /// Run the configured modes with an explicit transport, clock and output
    pub async fn run_with<W: Write>(
        &self,
        transport: Arc<dyn ProxiedTransport>,
        clock: Arc<dyn Clock>,
        out: &mut W,
    ) -> Result<RunSummary> {
        let run_logger = self.loggers.create_run_logger().await;

        for warning in &self.env_file_warnings {
            run_logger.log_warning(&format!("Ignored .env entry: {}", warning)).await;
        }

        for warning in validate_config(&self.config)? {
            match warning.level {
                ValidationLevel::Info => run_logger.log_info(&warning.message).await,
                _ => run_logger.log_warning(&warning.format()).await,
            }
        }

        if self.config.debug {
            for line in display_config_summary(&self.config).lines() {
                run_logger.log_info(line).await;
            }
        }

        let probe = RequestProbe::new(
            transport,
            clock.clone(),
            self.config.origin_url.clone(),
            self.loggers.create_probe_logger().await,
        );
        let workload = Workload::new(
            probe,
            self.corpus.clone(),
            FormatterFactory::from_config(&self.config),
            clock,
            run_logger,
        );

        let mut summary = RunSummary::default();

        if self.config.mode.runs_paired() {
            match workload.run_paired(out).await {
                Ok(report) => summary.paired = Some(report),
                Err(e) => {
                    workload.run_logger().log_error(&e, "Paired benchmark aborted").await;
                    return Err(e);
                }
            }
        }

        if self.config.mode == BenchmarkMode::All {
            writeln!(out)?;
        }

        if self.config.mode.runs_random() {
            let seed = sampling_seed(self.config.seed);
            workload
                .run_logger()
                .log_info(&format!("Sampling seed: {}", seed))
                .await;

            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let plan = RandomPlan::from_config(&self.config);
            match workload.run_random(plan, &mut rng, out).await {
                Ok(report) => summary.random = Some(report),
                Err(e) => {
                    workload.run_logger().log_error(&e, "Random benchmark aborted").await;
                    return Err(e);
                }
            }
            summary.seed = Some(seed);
        }

        Ok(summary)
    }
}

/// The configured seed, or a fresh one from the thread RNG
pub fn sampling_seed(configured: Option<u64>) -> u64 {
    configured.unwrap_or_else(|| rand::rng().random())
}
