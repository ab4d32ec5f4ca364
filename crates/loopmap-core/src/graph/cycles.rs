/// Simple-cycle enumeration for [`LoopGraph`].
///
/// Implements Johnson's block-and-unblock search over an explicit stack.
///
/// # Canonical order
///
/// Start nodes are taken in canonical node order (first seen during graph
/// construction). The search from start `s` is confined to nodes at or after
/// `s` in that order, so every cycle is reported exactly once: from its least
/// node, which is always the cycle's first element. Cycles that share a start
/// node appear in the order a depth-first search from `s` discovers them,
/// trying successors in adjacency order.
///
/// # Pruning
///
/// Before searching from `s`, the candidate set is cut down to the strongly
/// connected component of `s` within the nodes `≥ s`; no other node can lie
/// on a cycle through `s`. During the search a node that cannot get back to
/// `s` stays blocked, and is listed in the blocking lists of its successors.
/// Finding a cycle through a node unblocks it and, transitively, every node
/// waiting on it. The worst case remains exponential in the number of
/// cycles, which is inherent to the output size.
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::time::Instant;

use petgraph::stable_graph::NodeIndex;
use serde::Serialize;
use tracing::{debug, trace};

use super::LoopGraph;
use super::options::{EnumerateError, EnumerateOptions, Interrupt};

// ---------------------------------------------------------------------------
// Cycle
// ---------------------------------------------------------------------------

/// A simple directed cycle, listed from its least node.
///
/// The closing edge from the last node back to the first is implicit. A
/// single-element cycle is a self-loop.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct Cycle {
    nodes: Vec<String>,
}

impl Cycle {
    /// Wraps an ordered list of node labels.
    pub fn new(nodes: Vec<String>) -> Self {
        Self { nodes }
    }

    /// The node labels in traversal order.
    pub fn nodes(&self) -> &[String] {
        &self.nodes
    }

    /// Number of nodes (equal to the number of edges).
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns `true` for a cycle with no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates the cycle's edges, including the closing edge.
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> + '_ {
        self.nodes
            .iter()
            .zip(self.nodes.iter().cycle().skip(1))
            .map(|(from, to)| (from.as_str(), to.as_str()))
    }

    /// Renders the closed path, e.g. `"a -> b -> c -> a"`.
    pub fn closed_path(&self) -> String {
        match self.nodes.first() {
            Some(first) => format!("{} -> {first}", self.nodes.join(" -> ")),
            None => String::new(),
        }
    }

    /// Returns `true` if `other` lists the same cycle from a different start.
    pub fn is_rotation_of(&self, other: &Cycle) -> bool {
        if self.nodes.len() != other.nodes.len() {
            return false;
        }
        let Some(first) = self.nodes.first() else {
            return true;
        };
        let Some(offset) = other.nodes.iter().position(|n| n == first) else {
            return false;
        };
        other.nodes[offset..]
            .iter()
            .chain(&other.nodes[..offset])
            .eq(self.nodes.iter())
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.closed_path())
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Enumerates every simple cycle of `graph` in canonical order.
///
/// Never fails: a graph without edges or without cycles yields an empty
/// `Vec`.
pub fn enumerate_cycles(graph: &LoopGraph) -> Vec<Cycle> {
    // With no deadline and no token the search cannot be interrupted.
    enumerate_cycles_with(graph, &EnumerateOptions::default()).unwrap_or_default()
}

/// Enumerates every simple cycle of `graph`, honouring `options`.
///
/// # Errors
///
/// - [`EnumerateError::Cancelled`] if the attached token is cancelled.
/// - [`EnumerateError::DeadlineExceeded`] if the deadline passes.
///
/// In both cases no cycles are returned.
pub fn enumerate_cycles_with(
    graph: &LoopGraph,
    options: &EnumerateOptions,
) -> Result<Vec<Cycle>, EnumerateError> {
    let started = Instant::now();
    let search = Search::new(graph);
    let mut interrupt = Interrupt::new(options);

    let mut cycles = Vec::new();
    for start in 0..search.node_count() {
        for path in search.cycles_from(start, &mut interrupt)? {
            cycles.push(search.to_cycle(&path));
        }
    }

    debug!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        cycles = cycles.len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "enumerated simple cycles"
    );
    Ok(cycles)
}

// ---------------------------------------------------------------------------
// Internal: per-start search
// ---------------------------------------------------------------------------

/// Dense, position-indexed view of a [`LoopGraph`] shared by all searches.
///
/// Positions are canonical node ranks: position `p` is the `p`-th node seen
/// during construction.
pub(crate) struct Search<'g> {
    graph: &'g LoopGraph,
    order: Vec<NodeIndex>,
    adjacency: Vec<Vec<usize>>,
    reverse: Vec<Vec<usize>>,
}

/// One level of the explicit DFS stack.
struct Frame {
    node: usize,
    successors: Vec<usize>,
    next: usize,
    /// Set once a cycle through this node has been found.
    closed: bool,
}

impl<'g> Search<'g> {
    pub(crate) fn new(graph: &'g LoopGraph) -> Self {
        let order: Vec<NodeIndex> = graph.graph().node_indices().collect();
        let position: HashMap<NodeIndex, usize> =
            order.iter().enumerate().map(|(p, &idx)| (idx, p)).collect();

        let adjacency: Vec<Vec<usize>> = order
            .iter()
            .map(|&idx| {
                graph
                    .successors(idx)
                    .into_iter()
                    .map(|succ| position[&succ])
                    .collect()
            })
            .collect();

        let mut reverse: Vec<Vec<usize>> = vec![Vec::new(); order.len()];
        for (from, targets) in adjacency.iter().enumerate() {
            for &to in targets {
                reverse[to].push(from);
            }
        }

        Self {
            graph,
            order,
            adjacency,
            reverse,
        }
    }

    pub(crate) fn node_count(&self) -> usize {
        self.order.len()
    }

    /// Converts a position path into a labelled [`Cycle`].
    pub(crate) fn to_cycle(&self, path: &[usize]) -> Cycle {
        Cycle::new(
            path.iter()
                .map(|&p| self.graph.label_of(self.order[p]).to_owned())
                .collect(),
        )
    }

    /// Finds every cycle whose least node is `start`, in discovery order.
    ///
    /// Each returned path begins with `start`.
    pub(crate) fn cycles_from(
        &self,
        start: usize,
        interrupt: &mut Interrupt<'_>,
    ) -> Result<Vec<Vec<usize>>, EnumerateError> {
        interrupt.check()?;

        let in_component = self.component(start);
        let successors = |v: usize| -> Vec<usize> {
            self.adjacency[v]
                .iter()
                .copied()
                .filter(|&w| in_component[w])
                .collect()
        };

        let first = successors(start);
        if first.is_empty() {
            return Ok(Vec::new());
        }

        let mut found: Vec<Vec<usize>> = Vec::new();
        let mut blocked = vec![false; self.node_count()];
        let mut blockers: HashMap<usize, Vec<usize>> = HashMap::new();
        let mut path: Vec<usize> = vec![start];
        blocked[start] = true;

        let mut stack: Vec<Frame> = vec![Frame {
            node: start,
            successors: first,
            next: 0,
            closed: false,
        }];

        while let Some(frame) = stack.last_mut() {
            interrupt.check()?;

            if let Some(&w) = frame.successors.get(frame.next) {
                frame.next += 1;
                if w == start {
                    found.push(path.clone());
                    frame.closed = true;
                } else if !blocked[w] {
                    blocked[w] = true;
                    path.push(w);
                    let next_successors = successors(w);
                    stack.push(Frame {
                        node: w,
                        successors: next_successors,
                        next: 0,
                        closed: false,
                    });
                }
                continue;
            }

            // All successors explored: backtrack.
            let Some(done) = stack.pop() else {
                break;
            };
            path.pop();

            if done.closed {
                unblock(done.node, &mut blocked, &mut blockers);
                if let Some(parent) = stack.last_mut() {
                    parent.closed = true;
                }
            } else {
                for &w in &done.successors {
                    let waiting = blockers.entry(w).or_default();
                    if !waiting.contains(&done.node) {
                        waiting.push(done.node);
                    }
                }
            }
        }

        trace!(
            start = self.graph.label_of(self.order[start]),
            cycles = found.len(),
            "finished start node"
        );
        Ok(found)
    }

    /// Marks the strongly connected component of `start` among nodes `≥ start`.
    fn component(&self, start: usize) -> Vec<bool> {
        let forward = self.reach(start, &self.adjacency);
        let backward = self.reach(start, &self.reverse);
        forward
            .iter()
            .zip(&backward)
            .map(|(&f, &b)| f && b)
            .collect()
    }

    /// BFS over `edges` from `start`, ignoring nodes before `start`.
    fn reach(&self, start: usize, edges: &[Vec<usize>]) -> Vec<bool> {
        let mut seen = vec![false; self.node_count()];
        seen[start] = true;
        let mut queue = VecDeque::from([start]);
        while let Some(v) = queue.pop_front() {
            for &w in &edges[v] {
                if w >= start && !seen[w] {
                    seen[w] = true;
                    queue.push_back(w);
                }
            }
        }
        seen
    }
}

/// Unblocks `node` and, transitively, every node waiting on it.
fn unblock(node: usize, blocked: &mut [bool], blockers: &mut HashMap<usize, Vec<usize>>) {
    let mut pending = vec![node];
    while let Some(v) = pending.pop() {
        blocked[v] = false;
        if let Some(waiting) = blockers.remove(&v) {
            pending.extend(waiting.into_iter().filter(|&w| blocked[w]));
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
