//! Shared fixture constructors for unit tests.
//!
//! Integration tests under `crates/loopmap-core/tests/` keep their own
//! helpers because this module only exists in test builds of the library.
use crate::graph::{Cycle, EdgeRecord, LoopGraph, build_graph};

/// Builds a graph from `(from, to)` label pairs, in order.
pub fn graph_of(edges: &[(&str, &str)]) -> LoopGraph {
    build_graph(edges.iter().map(|&(from, to)| EdgeRecord::new(from, to)))
}

/// Builds a record with optional endpoints.
pub fn record(from: Option<&str>, to: Option<&str>) -> EdgeRecord {
    EdgeRecord {
        from: from.map(str::to_owned),
        to: to.map(str::to_owned),
    }
}

/// Flattens cycles into plain label vectors for easy comparison.
pub fn cycle_labels(cycles: &[Cycle]) -> Vec<Vec<String>> {
    cycles.iter().map(|c| c.nodes().to_vec()).collect()
}

/// Builds a cycle from label slices.
pub fn cycle(nodes: &[&str]) -> Cycle {
    Cycle::new(nodes.iter().map(|s| (*s).to_owned()).collect())
}
