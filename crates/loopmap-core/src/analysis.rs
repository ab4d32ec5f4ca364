//! End-to-end pipeline: records → graph → cycles → projections.
use std::borrow::Borrow;

use serde::{Serialize, Serializer};
use tracing::info;

use crate::graph::{
    Cycle, EdgeRecord, EnumerateError, EnumerateOptions, LoopGraph, build_graph,
    enumerate_cycles_with,
};
use crate::report::{EdgeTagRow, LoopReportRow, edge_tags, loop_report};

/// The outcome of one loop analysis run.
///
/// An analysis with zero cycles is a successful result, not an error; use
/// [`LoopAnalysis::is_empty`] to tell the two apart from a failed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoopAnalysis {
    node_count: usize,
    edge_count: usize,
    dropped_records: usize,
    duplicate_edges: usize,
    cycles: Vec<Cycle>,
}

/// Serializable summary of a [`LoopAnalysis`], including both projections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisReport {
    pub node_count: usize,
    pub edge_count: usize,
    pub dropped_records: usize,
    pub duplicate_edges: usize,
    pub loop_count: usize,
    pub loops: Vec<LoopReportRow>,
    pub edge_tags: Vec<EdgeTagRow>,
}

impl LoopAnalysis {
    /// Pairs graph statistics with an already enumerated cycle list.
    pub fn from_graph(graph: &LoopGraph, cycles: Vec<Cycle>) -> Self {
        let analysis = Self {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            dropped_records: graph.dropped_records(),
            duplicate_edges: graph.duplicate_edges(),
            cycles,
        };
        info!(
            nodes = analysis.node_count,
            edges = analysis.edge_count,
            loops = analysis.cycles.len(),
            "loop analysis complete"
        );
        analysis
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    pub fn dropped_records(&self) -> usize {
        self.dropped_records
    }

    pub fn duplicate_edges(&self) -> usize {
        self.duplicate_edges
    }

    /// The cycles in canonical order.
    pub fn cycles(&self) -> &[Cycle] {
        &self.cycles
    }

    /// Number of loops found.
    pub fn loop_count(&self) -> usize {
        self.cycles.len()
    }

    /// Returns `true` when the run found no loops.
    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }

    /// Per-loop report rows.
    pub fn loop_report(&self) -> Vec<LoopReportRow> {
        loop_report(&self.cycles)
    }

    /// Per-edge tag rows.
    pub fn edge_tags(&self) -> Vec<EdgeTagRow> {
        edge_tags(&self.cycles)
    }

    /// Builds the serializable summary.
    pub fn report(&self) -> AnalysisReport {
        AnalysisReport {
            node_count: self.node_count,
            edge_count: self.edge_count,
            dropped_records: self.dropped_records,
            duplicate_edges: self.duplicate_edges,
            loop_count: self.cycles.len(),
            loops: self.loop_report(),
            edge_tags: self.edge_tags(),
        }
    }
}

impl Serialize for LoopAnalysis {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.report().serialize(serializer)
    }
}

/// Builds the graph from `records` and enumerates its cycles.
///
/// # Errors
///
/// Returns [`EnumerateError`] if `options` interrupts the enumeration.
pub fn analyze<I>(records: I, options: &EnumerateOptions) -> Result<LoopAnalysis, EnumerateError>
where
    I: IntoIterator,
    I::Item: Borrow<EdgeRecord>,
{
    let graph = build_graph(records);
    let cycles = enumerate_cycles_with(&graph, options)?;
    Ok(LoopAnalysis::from_graph(&graph, cycles))
}
