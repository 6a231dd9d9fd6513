//! Benchmark workloads driving [`RequestProbe`] over the corpus
//!
//! Both modes are strictly sequential: every probe completes before the next
//! one starts, and report lines are written as soon as they are known.

mod paired;
mod random;

pub use paired::{PairedReport, PairedRow};
pub use random::{IterationReport, IterationStats, RandomPlan, RandomReport};

use crate::{
    client::ProxiedTransport,
    clock::Clock,
    corpus::Corpus,
    logging::RunLogger,
    models::Config,
    output::{FormatterFactory, ReportFormatter},
    probe::RequestProbe,
};
use std::sync::Arc;

/// Shared state for the paired and random workloads
pub struct Workload {
    probe: RequestProbe,
    corpus: Corpus,
    formatter: Box<dyn ReportFormatter>,
    clock: Arc<dyn Clock>,
    run_logger: RunLogger,
}

impl Workload {
    pub fn new(
        probe: RequestProbe,
        corpus: Corpus,
        formatter: Box<dyn ReportFormatter>,
        clock: Arc<dyn Clock>,
        run_logger: RunLogger,
    ) -> Self {
        Self {
            probe,
            corpus,
            formatter,
            clock,
            run_logger,
        }
    }

    /// Standard corpus, formatter and loggers derived from `config`
    pub fn from_config(
        config: &Config,
        transport: Arc<dyn ProxiedTransport>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self::new(
            RequestProbe::from_config(config, transport, clock.clone()),
            Corpus::standard(),
            FormatterFactory::from_config(config),
            clock,
            RunLogger::new(config),
        )
    }

    /// Replace the corpus
    pub fn with_corpus(mut self, corpus: Corpus) -> Self {
        self.corpus = corpus;
        self
    }

    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    pub fn run_logger(&self) -> &RunLogger {
        &self.run_logger
    }
}
