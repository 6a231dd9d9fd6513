//! Paired miss/hit mode

use super::Workload;
use crate::{error::Result, models::ProbeResult, types::BenchmarkMode};
use std::io::Write;
use std::time::Duration;

/// Both probes for one resource, in issue order
#[derive(Debug, Clone, PartialEq)]
pub struct PairedRow {
    pub name: String,
    /// First request, expected to miss the cache
    pub miss: ProbeResult,
    /// Second request, expected to hit
    pub hit: ProbeResult,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PairedReport {
    pub rows: Vec<PairedRow>,
    pub total: Duration,
}

impl PairedReport {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of probes (miss or hit) that ended in a transport failure
    pub fn failures(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.miss.is_failure() as usize + row.hit.is_failure() as usize)
            .sum()
    }

    /// Rows where the hit was answered faster than the miss
    pub fn faster_hits(&self) -> usize {
        self.rows
            .iter()
            .filter(|row| match (row.miss.elapsed_duration(), row.hit.elapsed_duration()) {
                (Some(miss), Some(hit)) => hit < miss,
                _ => false,
            })
            .count()
    }
}

impl Workload {
    /// Probe every resource twice in corpus order and print one row per resource
    ///
    /// Whether the second request really was a cache hit is not checked.
    pub async fn run_paired<W: Write>(&self, out: &mut W) -> Result<PairedReport> {
        let mode = BenchmarkMode::Paired.as_str();
        let correlation_id = self.run_logger.start_run(mode, self.corpus.len()).await;
        let start = self.clock.now();

        writeln!(out, "{}", self.formatter.paired_header())?;

        let mut rows = Vec::with_capacity(self.corpus.len());
        for name in self.corpus.iter() {
            let miss = self.probe.probe(name).await;
            let hit = self.probe.probe(name).await;

            writeln!(out, "{}", self.formatter.paired_row(name, &miss, &hit))?;
            out.flush()?;
            self.run_logger.log_pair(name, &miss, &hit).await;

            rows.push(PairedRow {
                name: name.to_string(),
                miss,
                hit,
            });
        }

        let report = PairedReport {
            rows,
            total: self.clock.since(start),
        };
        self.run_logger.log_paired_summary(&report).await;
        self.run_logger.end_run(&correlation_id, mode, report.total).await;

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{scripted_workload, ORIGIN};
    use crate::clock::ManualClock;
    use crate::corpus::Corpus;
    use crate::models::ProbeStatus;
    use crate::probe::fakes::ScriptedTransport;
    use std::sync::Arc;
    use std::time::Duration;

    const LATENCY: Duration = Duration::from_millis(25);

    fn three_names() -> Corpus {
        Corpus::from_names(["a01.smi", "a02.smi", "t01.smi"])
    }

    async fn run_once(corpus: Corpus) -> (String, Arc<ScriptedTransport>) {
        let clock = Arc::new(ManualClock::new());
        let transport = Arc::new(ScriptedTransport::new(clock.clone(), LATENCY));
        let workload = scripted_workload(transport.clone(), clock, corpus);

        let mut out = Vec::new();
        workload.run_paired(&mut out).await.unwrap();
        (String::from_utf8(out).unwrap(), transport)
    }

    #[tokio::test]
    async fn test_one_row_per_resource_with_constant_timings() {
        let (text, transport) = run_once(three_names()).await;
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 4, "header plus three rows:\n{}", text);
        assert!(lines[0].starts_with("File"));
        for (line, name) in lines[1..].iter().zip(["a01.smi", "a02.smi", "t01.smi"]) {
            assert!(line.starts_with(name));
            assert_eq!(line.matches("0.02500s (200)").count(), 2, "{}", line);
        }
        assert_eq!(transport.call_count(), 6);
    }

    #[tokio::test]
    async fn test_miss_then_hit_in_corpus_order() {
        let (_, transport) = run_once(three_names()).await;
        assert_eq!(
            transport.calls(),
            vec![
                format!("{}/a01.smi", ORIGIN),
                format!("{}/a01.smi", ORIGIN),
                format!("{}/a02.smi", ORIGIN),
                format!("{}/a02.smi", ORIGIN),
                format!("{}/t01.smi", ORIGIN),
                format!("{}/t01.smi", ORIGIN),
            ]
        );
    }

    #[tokio::test]
    async fn test_output_is_byte_identical_across_runs() {
        let (first, _) = run_once(three_names()).await;
        let (second, _) = run_once(three_names()).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_same_workload_reruns_identically() {
        let clock = Arc::new(ManualClock::new());
        let transport = Arc::new(ScriptedTransport::new(clock.clone(), LATENCY));
        let workload = scripted_workload(transport, clock, three_names());

        let mut first = Vec::new();
        let mut second = Vec::new();
        workload.run_paired(&mut first).await.unwrap();
        workload.run_paired(&mut second).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_report_captures_failures_and_status_codes() {
        let clock = Arc::new(ManualClock::new());
        let transport = Arc::new(
            ScriptedTransport::new(clock.clone(), LATENCY)
                .with_failure("x.smi", "connection refused")
                .with_status("a02.smi", 404),
        );
        let workload = scripted_workload(transport, clock, Corpus::from_names(["a01.smi", "x.smi", "a02.smi"]));

        let mut out = Vec::new();
        let report = workload.run_paired(&mut out).await.unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(report.len(), 3);
        assert_eq!(report.failures(), 2);
        assert_eq!(report.faster_hits(), 0);
        assert_eq!(report.rows[0].miss.status, ProbeStatus::Http(200));
        assert_eq!(report.rows[1].hit.elapsed, -1.0);
        assert_eq!(report.rows[2].hit.status, ProbeStatus::Http(404));
        assert_eq!(report.total, LATENCY * 6);

        let x_line = text.lines().find(|line| line.starts_with("x.smi")).unwrap();
        assert_eq!(x_line.matches("-1.00000s (ERR(").count(), 2);
        assert!(x_line.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_empty_corpus_prints_only_header() {
        let (text, transport) = run_once(Corpus::from_names(Vec::<String>::new())).await;
        assert_eq!(text.lines().count(), 1);
        assert_eq!(transport.call_count(), 0);
    }
}
