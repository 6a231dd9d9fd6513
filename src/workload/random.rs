//! Randomized iteration mode

use super::Workload;
use crate::{
    error::{AppError, Result},
    models::{Config, ProbeResult},
    types::BenchmarkMode,
};
use rand::Rng;
use std::io::Write;
use std::time::Duration;

/// Shape of a random run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RandomPlan {
    pub iterations: u32,
    pub requests_per_iteration: u32,
}

impl RandomPlan {
    pub fn new(iterations: u32, requests_per_iteration: u32) -> Self {
        Self {
            iterations,
            requests_per_iteration,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.iterations, config.requests_per_iteration)
    }

    pub fn total_probes(&self) -> u64 {
        self.iterations as u64 * self.requests_per_iteration as u64
    }
}

/// Per-iteration probe accounting
///
/// A 404 is issued and timed like any other probe but is kept out of
/// `counted` and `counted_latency`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IterationStats {
    pub issued: u32,
    pub counted: u32,
    pub skipped_not_found: u32,
    pub failures: u32,
    pub counted_latency: Duration,
}

impl IterationStats {
    /// Add a probe that was not skipped
    pub fn record(&mut self, result: &ProbeResult) {
        match result.elapsed_duration() {
            Some(elapsed) => {
                self.counted += 1;
                self.counted_latency += elapsed;
            }
            None => self.failures += 1,
        }
    }

    pub fn mean_counted_latency(&self) -> Option<Duration> {
        if self.counted == 0 {
            None
        } else {
            Some(self.counted_latency / self.counted)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IterationReport {
    /// 1-based
    pub index: u32,
    pub elapsed: Duration,
    pub stats: IterationStats,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RandomReport {
    pub iterations: Vec<IterationReport>,
    pub total: Duration,
}

impl RandomReport {
    pub fn total_issued(&self) -> u64 {
        self.iterations.iter().map(|it| it.stats.issued as u64).sum()
    }

    pub fn total_failures(&self) -> u64 {
        self.iterations.iter().map(|it| it.stats.failures as u64).sum()
    }

    pub fn total_skipped_not_found(&self) -> u64 {
        self.iterations
            .iter()
            .map(|it| it.stats.skipped_not_found as u64)
            .sum()
    }
}

impl Workload {
    /// Issue `plan.requests_per_iteration` uniformly sampled probes per
    /// iteration and print each iteration's wall-clock time plus the total
    pub async fn run_random<R: Rng, W: Write>(
        &self,
        plan: RandomPlan,
        rng: &mut R,
        out: &mut W,
    ) -> Result<RandomReport> {
        if self.corpus.is_empty() {
            return Err(AppError::validation("Cannot sample from an empty corpus"));
        }

        let mode = BenchmarkMode::Random.as_str();
        let correlation_id = self.run_logger.start_run(mode, self.corpus.len()).await;

        writeln!(out, "{}", self.formatter.iteration_header())?;

        let mut iterations = Vec::with_capacity(plan.iterations as usize);
        let run_start = self.clock.now();

        for index in 1..=plan.iterations {
            let mut stats = IterationStats::default();
            let iteration_start = self.clock.now();

            for _ in 0..plan.requests_per_iteration {
                let name = self
                    .corpus
                    .sample(rng)
                    .ok_or_else(|| AppError::internal("Corpus sample returned nothing"))?;
                let result = self.probe.probe(name).await;
                stats.issued += 1;

                if result.status.is_not_found() {
                    stats.skipped_not_found += 1;
                    continue;
                }
                stats.record(&result);
            }

            let elapsed = self.clock.since(iteration_start);
            writeln!(out, "{}", self.formatter.iteration_row(index, elapsed))?;
            out.flush()?;
            self.run_logger.log_iteration(index, elapsed, &stats).await;

            iterations.push(IterationReport { index, elapsed, stats });
        }

        let total = self.clock.since(run_start);
        writeln!(out)?;
        writeln!(out, "{}", self.formatter.total_row(total))?;
        out.flush()?;
        self.run_logger.end_run(&correlation_id, mode, total).await;

        Ok(RandomReport { iterations, total })
    }
}
