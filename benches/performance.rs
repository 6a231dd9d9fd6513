//! Performance benchmarks for the harness itself
//!
//! The harness must add as little as possible on top of the proxy's own
//! latency, so these measure the per-probe bookkeeping in isolation.

use async_trait::async_trait;
use clap::Parser;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use proxy_latency_bench::{
    cli::Cli,
    config::ConfigParser,
    models::{Config, ProbeResult},
    output::{ColoredFormatter, PlainFormatter, ReportFormatter},
    Corpus, ManualClock, ProxiedTransport, RandomPlan, RequestProbe,
    TransportResponse, Workload,
};
use proxy_latency_bench::logging::{ProbeLogger, RunLogger};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::hint::black_box;
use std::io;
use std::sync::Arc;
use std::time::Duration;

/// Transport answering every request instantly
struct InstantTransport;

#[async_trait]
impl ProxiedTransport for InstantTransport {
    async fn get(&self, _url: &str) -> proxy_latency_bench::Result<TransportResponse> {
        Ok(TransportResponse::new(200, 0))
    }
}

fn quiet_config() -> Config {
    Config {
        enable_color: false,
        ..Config::default()
    }
}

fn benchmark_corpus(c: &mut Criterion) {
    let mut group = c.benchmark_group("corpus");

    group.bench_function("standard", |b| b.iter(|| black_box(Corpus::standard())));

    let corpus = Corpus::standard();
    group.bench_function("sample", |b| {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        b.iter(|| black_box(corpus.sample(&mut rng)))
    });

    for max_index in [99u32, 999, 9_999] {
        group.bench_with_input(BenchmarkId::new("generate", max_index), &max_index, |b, &max| {
            b.iter(|| black_box(Corpus::generate(&["a", "t"], max, ".smi")))
        });
    }

    group.finish();
}

fn benchmark_formatting(c: &mut Criterion) {
    let miss = ProbeResult::success(Duration::from_micros(12_345), 200);
    let hit = ProbeResult::success(Duration::from_micros(321), 200);
    let failed = ProbeResult::failed_with("connection refused");

    let formatters: Vec<(&str, Box<dyn ReportFormatter>)> = vec![
        ("plain", Box::new(PlainFormatter::new())),
        ("colored", Box::new(ColoredFormatter::new())),
    ];

    let mut group = c.benchmark_group("formatting");
    for (name, formatter) in &formatters {
        group.bench_function(BenchmarkId::new("paired_row", name), |b| {
            b.iter(|| black_box(formatter.paired_row("a01.smi", &miss, &hit)))
        });
        group.bench_function(BenchmarkId::new("paired_row_failed", name), |b| {
            b.iter(|| black_box(formatter.paired_row("a01.smi", &failed, &hit)))
        });
        group.bench_function(BenchmarkId::new("iteration_row", name), |b| {
            b.iter(|| black_box(formatter.iteration_row(7, Duration::from_millis(1234))))
        });
    }
    group.finish();
}

fn benchmark_config_parsing(c: &mut Criterion) {
    c.bench_function("config_parse", |b| {
        b.iter(|| {
            let cli = Cli::parse_from(["plb", "--mode", "all", "-n", "5", "--no-color"]);
            black_box(
                ConfigParser::new(cli)
                    .with_env_file(None)
                    .parse_with_lookup(|_| None),
            )
        })
    });
}

fn benchmark_workload_overhead(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap();
    let config = quiet_config();

    let build = || {
        let clock = Arc::new(ManualClock::new());
        let probe = RequestProbe::new(
            Arc::new(InstantTransport),
            clock.clone(),
            "http://origin.test",
            ProbeLogger::new(&config),
        );
        Workload::new(
            probe,
            Corpus::standard(),
            Box::new(PlainFormatter::new()),
            clock,
            RunLogger::new(&config),
        )
    };

    let mut group = c.benchmark_group("workload");
    group.bench_function("paired_standard_corpus", |b| {
        let workload = build();
        b.iter(|| runtime.block_on(workload.run_paired(&mut io::sink())))
    });
    group.bench_function("random_10x50", |b| {
        let workload = build();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        b.iter(|| {
            runtime.block_on(workload.run_random(RandomPlan::new(10, 50), &mut rng, &mut io::sink()))
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    benchmark_corpus,
    benchmark_formatting,
    benchmark_config_parsing,
    benchmark_workload_overhead,
);

criterion_main!(benches);
