/// Graph construction from raw `From`/`To` records using `petgraph`, plus
/// simple-cycle enumeration.
///
/// # Construction
///
/// [`build_graph`] makes a single pass over the records:
/// - Records with a missing or blank endpoint are dropped and counted.
/// - Each label is interned into the `StableDiGraph` the first time it is
///   seen, so node indices follow first-seen order. That order is the
///   canonical node order used by the enumerator.
/// - Repeated `(from, to)` pairs collapse into a single edge and are counted.
///
/// The resulting [`LoopGraph`] is never mutated again.
///
/// # Cycle Enumeration
///
/// See the [`cycles`] submodule for the block-and-unblock search, and
/// [`parallel`] (feature `parallel`) for the rayon fan-out by start node.
pub mod cycles;
mod options;
#[cfg(feature = "parallel")]
pub mod parallel;

pub use cycles::{Cycle, enumerate_cycles, enumerate_cycles_with};
pub use options::{CancelToken, EnumerateError, EnumerateOptions};
#[cfg(feature = "parallel")]
pub use parallel::enumerate_cycles_parallel;

use std::borrow::Borrow;
use std::collections::{HashMap, HashSet};

use petgraph::stable_graph::{EdgeIndex, NodeIndex, StableDiGraph};
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// One raw relationship row as supplied by an input adapter.
///
/// Either side may be absent; such records are dropped by [`build_graph`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    /// Source label (the `From` column).
    pub from: Option<String>,
    /// Target label (the `To` column).
    pub to: Option<String>,
}

impl EdgeRecord {
    /// Creates a record with both endpoints present.
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: Some(from.into()),
            to: Some(to.into()),
        }
    }

    /// Returns `(from, to)` when both endpoints are present and non-blank.
    pub fn endpoints(&self) -> Option<(&str, &str)> {
        Some((present(self.from.as_ref())?, present(self.to.as_ref())?))
    }
}

fn present(label: Option<&String>) -> Option<&str> {
    label.map(String::as_str).filter(|s| !s.trim().is_empty())
}

/// Weight stored on each petgraph node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeWeight {
    /// The variable label, exactly as it appeared in the input.
    pub label: String,
}

/// An immutable directed relationship graph.
///
/// Wraps a `petgraph` [`StableDiGraph`] whose node indices are dense and
/// follow first-seen order, and keeps a `label → NodeIndex` map for O(1)
/// lookup. Edges form a set per source node; adjacency order is the order in
/// which each distinct edge was first seen.
///
/// Construct with [`build_graph`] or by collecting `(from, to)` pairs.
#[derive(Debug, Default)]
pub struct LoopGraph {
    graph: StableDiGraph<NodeWeight, ()>,
    label_to_index: HashMap<String, NodeIndex>,
    dropped_records: usize,
    duplicate_edges: usize,
}

impl LoopGraph {
    /// Returns the number of distinct nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of distinct edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Returns `true` if the graph has no nodes (and therefore no edges).
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Number of input records skipped because an endpoint was missing.
    pub fn dropped_records(&self) -> usize {
        self.dropped_records
    }

    /// Number of input records that repeated an already-seen edge.
    pub fn duplicate_edges(&self) -> usize {
        self.duplicate_edges
    }

    /// Looks up the [`NodeIndex`] for a label.
    pub fn node_index(&self, label: &str) -> Option<NodeIndex> {
        self.label_to_index.get(label).copied()
    }

    /// Returns the label of the node at `idx`, or `None` if out of bounds.
    pub fn label(&self, idx: NodeIndex) -> Option<&str> {
        self.graph.node_weight(idx).map(|w| w.label.as_str())
    }

    /// Iterates node labels in canonical (first-seen) order.
    pub fn labels(&self) -> impl Iterator<Item = &str> + '_ {
        self.graph
            .node_indices()
            .map(move |idx| self.graph[idx].label.as_str())
    }

    /// Returns the successors of `idx` in adjacency order.
    ///
    /// petgraph walks a node's outgoing list newest-first, so the list is
    /// re-sorted by edge index to restore insertion order.
    pub fn successors(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut out: Vec<(EdgeIndex, NodeIndex)> = self
            .graph
            .edges(idx)
            .map(|e| (e.id(), e.target()))
            .collect();
        out.sort_unstable_by_key(|&(edge, _)| edge.index());
        out.into_iter().map(|(_, target)| target).collect()
    }

    /// Returns `true` if the edge `from → to` exists.
    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        match (self.node_index(from), self.node_index(to)) {
            (Some(a), Some(b)) => self.graph.find_edge(a, b).is_some(),
            (None, _) | (_, None) => false,
        }
    }

    /// Returns a reference to the underlying [`StableDiGraph`].
    pub fn graph(&self) -> &StableDiGraph<NodeWeight, ()> {
        &self.graph
    }

    /// Label lookup for indices produced by this graph.
    ///
    /// Panics if `idx` does not belong to the graph; every index handed out
    /// by the graph is valid, so a miss is a broken invariant.
    pub(crate) fn label_of(&self, idx: NodeIndex) -> &str {
        &self.graph[idx].label
    }

    fn intern(&mut self, label: &str) -> NodeIndex {
        if let Some(&idx) = self.label_to_index.get(label) {
            return idx;
        }
        let idx = self.graph.add_node(NodeWeight {
            label: label.to_owned(),
        });
        self.label_to_index.insert(label.to_owned(), idx);
        idx
    }
}

/// Builds a [`LoopGraph`] from raw relationship records.
///
/// Construction is O(R) in the number of records. Records with an absent or
/// blank endpoint are skipped without error; an empty input yields an empty
/// graph.
pub fn build_graph<I>(records: I) -> LoopGraph
where
    I: IntoIterator,
    I::Item: Borrow<EdgeRecord>,
{
    let mut lg = LoopGraph::default();
    let mut seen: HashSet<(NodeIndex, NodeIndex)> = HashSet::new();

    for item in records {
        let record: &EdgeRecord = item.borrow();
        let Some((from, to)) = record.endpoints() else {
            lg.dropped_records += 1;
            continue;
        };
        let source = lg.intern(from);
        let target = lg.intern(to);
        if !seen.insert((source, target)) {
            lg.duplicate_edges += 1;
            continue;
        }
        lg.graph.add_edge(source, target, ());
    }

    debug!(
        nodes = lg.node_count(),
        edges = lg.edge_count(),
        dropped = lg.dropped_records,
        duplicates = lg.duplicate_edges,
        "built relationship graph"
    );
    lg
}

impl<S, T> FromIterator<(S, T)> for LoopGraph
where
    S: Into<String>,
    T: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (S, T)>>(iter: I) -> Self {
        build_graph(iter.into_iter().map(|(from, to)| EdgeRecord::new(from, to)))
    }
}
