//! Similarity benchmarks
//!
//! Measures the O(n²) letter classifier (sequential and sharded) and the
//! fuzzy name grouper on a synthetic domain list.
//!
//! ## Running
//!
//! ```sh
//! cargo bench --bench similarity_bench
//! ```

use std::sync::OnceLock;
use std::time::Duration;

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use domsim_engine::app::classifier::{ClassifyOptions, classify_with_options};
use domsim_engine::domain::company::unique_company_names;
use domsim_engine::{GroupOptions, classify, group_names, token_sort_ratio};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const SEED: u64 = 0x5EED;
const DOMAIN_COUNT: usize = 1_000;
const TLDS: &[&str] = &["com", "net", "org", "io", "co.uk"];

// =============================================================================
// Input Data
// =============================================================================

static DOMAINS: OnceLock<Vec<String>> = OnceLock::new();

/// Deterministic synthetic domain list
fn get_domains() -> &'static Vec<String> {
    DOMAINS.get_or_init(|| {
        let mut rng = StdRng::seed_from_u64(SEED);
        (0..DOMAIN_COUNT)
            .map(|_| {
                let len = rng.gen_range(4..12);
                let name: String = (0..len)
                    .map(|_| rng.gen_range(b'a'..=b'z') as char)
                    .collect();
                let tld = TLDS[rng.gen_range(0..TLDS.len())];
                format!("{}.{}", name, tld)
            })
            .collect()
    })
}

fn ci_criterion() -> Criterion {
    Criterion::default()
        .sample_size(15)
        .measurement_time(Duration::from_secs(8))
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_token_sort_ratio(c: &mut Criterion) {
    let mut group = c.benchmark_group("fuzzy");

    group.bench_function("token_sort_ratio", |b| {
        b.iter(|| token_sort_ratio(black_box("acme holdings corp"), black_box("corp acme holding")))
    });

    group.finish();
}

fn bench_classify(c: &mut Criterion) {
    let domains = get_domains();
    let mut group = c.benchmark_group("classify");

    for &n in &[250usize, 1_000] {
        let input = &domains[..n];

        group.bench_with_input(BenchmarkId::new("sequential", n), input, |b, input| {
            b.iter(|| classify(black_box(input)))
        });

        group.bench_with_input(BenchmarkId::new("sharded", n), input, |b, input| {
            b.iter(|| classify_with_options(black_box(input), ClassifyOptions::default()))
        });
    }

    group.finish();
}

fn bench_group_names(c: &mut Criterion) {
    let names = unique_company_names(get_domains());
    let options = GroupOptions::default();
    let mut group = c.benchmark_group("group_names");

    group.bench_function("all_anchors", |b| {
        b.iter(|| group_names(black_box(&names), &options))
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = ci_criterion();
    targets =
        bench_token_sort_ratio,
        bench_classify,
        bench_group_names,
}

criterion_main!(benches);
