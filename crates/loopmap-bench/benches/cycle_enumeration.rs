//! Cycle enumeration benchmarks: sequential vs rayon fan-out, on generated
//! maps and on complete graphs (the worst case for loop counts).
#![allow(clippy::expect_used)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use loopmap_bench::{SizeTier, complete_graph, generate_connections};
use loopmap_core::{
    EnumerateOptions, build_graph, enumerate_cycles, enumerate_cycles_parallel, loop_report,
};

fn bench_generated(c: &mut Criterion) {
    let mut group = c.benchmark_group("enumerate_cycles");

    for (name, tier) in [
        ("S", SizeTier::Small),
        ("M", SizeTier::Medium),
        ("L", SizeTier::Large),
    ] {
        let graph = build_graph(generate_connections(&tier.config(42)));
        let options = EnumerateOptions::default();

        group.bench_function(BenchmarkId::new("sequential", name), |b| {
            b.iter(|| enumerate_cycles(&graph));
        });

        group.bench_function(BenchmarkId::new("parallel", name), |b| {
            b.iter(|| enumerate_cycles_parallel(&graph, &options).expect("unbounded"));
        });
    }
    group.finish();
}

fn bench_complete(c: &mut Criterion) {
    let mut group = c.benchmark_group("complete_graph");
    group.sample_size(20);

    for n in [5usize, 6, 7] {
        let graph = build_graph(complete_graph(n));
        let options = EnumerateOptions::default();

        group.bench_function(BenchmarkId::new("sequential", n), |b| {
            b.iter(|| enumerate_cycles(&graph));
        });

        group.bench_function(BenchmarkId::new("parallel", n), |b| {
            b.iter(|| enumerate_cycles_parallel(&graph, &options).expect("unbounded"));
        });
    }
    group.finish();
}

fn bench_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("loop_report");

    let cycles = enumerate_cycles(&build_graph(complete_graph(7)));
    group.bench_function(BenchmarkId::new("rows", "K7"), |b| {
        b.iter(|| loop_report(&cycles));
    });
    group.bench_function(BenchmarkId::new("edge_tags", "K7"), |b| {
        b.iter(|| loopmap_core::edge_tags(&cycles));
    });
    group.finish();
}

criterion_group!(benches, bench_generated, bench_complete, bench_report);
criterion_main!(benches);
