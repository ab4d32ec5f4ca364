//! Tabular projections of an enumerated cycle list.
//!
//! Two independent views are derived from the canonical cycle order:
//!
//! - [`loop_report`]: one row per cycle with its 1-based identifier, node
//!   count, and rendered closed path.
//! - [`edge_tags`]: one row per distinct edge that lies on at least one
//!   cycle, tagged with every loop that uses it. This is the shape a mapping
//!   tool needs to re-import loop membership as edge tags.
use std::collections::BTreeMap;

use serde::Serialize;

use crate::graph::Cycle;

/// Separator placed between loop tags on an edge used by several loops.
pub const TAG_SEPARATOR: &str = " | ";

/// Display identifier for the cycle at zero-based position `index`.
pub fn loop_id(index: usize) -> String {
    format!("Loop {}", index + 1)
}

/// Tag identifier for the cycle at zero-based position `index`.
pub fn loop_tag(index: usize) -> String {
    format!("Loop_{}", index + 1)
}

/// One row of the per-loop report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoopReportRow {
    /// `"Loop N"`, numbered from 1 in canonical order.
    pub loop_id: String,
    /// Number of nodes in the loop.
    pub length: usize,
    /// Closed path, e.g. `"a -> b -> a"`.
    pub full_path: String,
    /// The loop's nodes, starting from its least node.
    pub nodes: Vec<String>,
}

/// One row of the per-edge tagging table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeTagRow {
    /// Source label of the edge.
    pub from: String,
    /// Target label of the edge.
    pub to: String,
    /// Loop tags joined with [`TAG_SEPARATOR`], in loop order.
    pub tags: String,
}

/// Builds the per-loop report rows, one per cycle, in input order.
pub fn loop_report(cycles: &[Cycle]) -> Vec<LoopReportRow> {
    cycles
        .iter()
        .enumerate()
        .map(|(i, cycle)| LoopReportRow {
            loop_id: loop_id(i),
            length: cycle.len(),
            full_path: cycle.closed_path(),
            nodes: cycle.nodes().to_vec(),
        })
        .collect()
}

/// Builds the per-edge tagging table.
///
/// Every edge appears once no matter how many loops use it. Rows are sorted
/// by `(from, to)`; within a row, tags keep loop order.
pub fn edge_tags(cycles: &[Cycle]) -> Vec<EdgeTagRow> {
    let mut grouped: BTreeMap<(&str, &str), Vec<String>> = BTreeMap::new();
    for (i, cycle) in cycles.iter().enumerate() {
        let tag = loop_tag(i);
        for edge in cycle.edges() {
            grouped.entry(edge).or_default().push(tag.clone());
        }
    }

    grouped
        .into_iter()
        .map(|((from, to), tags)| EdgeTagRow {
            from: from.to_owned(),
            to: to.to_owned(),
            tags: tags.join(TAG_SEPARATOR),
        })
        .collect()
}
