//! Relationship-map generator and benchmark utilities for loopmap.
//!
//! This crate provides deterministic generation of causal-map style edge
//! lists for benchmarking and property-based testing of `loopmap-core`.

use std::path::PathBuf;

pub mod correctness;
pub mod generator;

pub use generator::{GeneratorConfig, SizeTier, complete_graph, generate_connections};

/// Returns the path of the connections workbook fixture for `tier`.
///
/// Fixtures live under `target/bench-fixtures/` so they are gitignored and
/// shared between the generator binary and the benchmark harness.
pub fn fixture_path(tier: SizeTier) -> PathBuf {
    fixtures_dir().join(format!("connections-{}.xlsx", tier.name()))
}

fn fixtures_dir() -> PathBuf {
    let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    manifest
        .join("..")
        .join("..")
        .join("target")
        .join("bench-fixtures")
}
