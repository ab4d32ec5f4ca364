//! Graph construction benchmarks (`build_graph` over generated records).
#![allow(clippy::expect_used)]

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use loopmap_bench::{SizeTier, generate_connections};
use loopmap_core::build_graph;

fn bench_build_graph(c: &mut Criterion) {
    let mut group = c.benchmark_group("build_graph");

    for (name, tier) in [
        ("S", SizeTier::Small),
        ("M", SizeTier::Medium),
        ("L", SizeTier::Large),
    ] {
        let records = generate_connections(&tier.config(42));
        group.throughput(Throughput::Elements(records.len() as u64));

        group.bench_function(BenchmarkId::new("records", name), |b| {
            b.iter(|| build_graph(&records));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build_graph);
criterion_main!(benches);
