#![deny(clippy::print_stdout, clippy::print_stderr)]

pub mod analysis;
pub mod graph;
pub mod report;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use analysis::{AnalysisReport, LoopAnalysis, analyze};
#[cfg(feature = "parallel")]
pub use graph::enumerate_cycles_parallel;
pub use graph::{
    CancelToken, Cycle, EdgeRecord, EnumerateError, EnumerateOptions, LoopGraph, NodeWeight,
    build_graph, enumerate_cycles, enumerate_cycles_with,
};
pub use report::{
    EdgeTagRow, LoopReportRow, TAG_SEPARATOR, edge_tags, loop_id, loop_report, loop_tag,
};

/// Returns the current version of the loopmap-core library.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
