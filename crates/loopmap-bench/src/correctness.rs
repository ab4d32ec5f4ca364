//! Post-operation invariant checkers for correctness validation.

use std::collections::{BTreeSet, HashSet, VecDeque};

use loopmap_core::{Cycle, EdgeRecord, EdgeTagRow, LoopGraph, TAG_SEPARATOR, loop_tag};

/// Verifies graph construction invariants against the input records.
pub fn check_graph_invariants(records: &[EdgeRecord], graph: &LoopGraph) -> Result<(), String> {
    let complete: Vec<(&str, &str)> = records.iter().filter_map(EdgeRecord::endpoints).collect();

    let dropped = records.len() - complete.len();
    if graph.dropped_records() != dropped {
        return Err(format!(
            "dropped count mismatch: graph={}, records={dropped}",
            graph.dropped_records()
        ));
    }

    let distinct_edges: HashSet<(&str, &str)> = complete.iter().copied().collect();
    if graph.edge_count() != distinct_edges.len() {
        return Err(format!(
            "edge count mismatch: graph={}, distinct pairs={}",
            graph.edge_count(),
            distinct_edges.len()
        ));
    }
    if graph.edge_count() + graph.duplicate_edges() != complete.len() {
        return Err(format!(
            "edges + duplicates ({} + {}) != complete records ({})",
            graph.edge_count(),
            graph.duplicate_edges(),
            complete.len()
        ));
    }

    let labels: HashSet<&str> = complete.iter().flat_map(|&(a, b)| [a, b]).collect();
    if graph.node_count() != labels.len() {
        return Err(format!(
            "node count mismatch: graph={}, labels={}",
            graph.node_count(),
            labels.len()
        ));
    }
    for label in &labels {
        if graph.node_index(label).is_none() {
            return Err(format!("label {label:?} not found in graph index"));
        }
    }

    // First-seen order.
    let mut seen = HashSet::new();
    let first_seen: Vec<&str> = complete
        .iter()
        .flat_map(|&(a, b)| [a, b])
        .filter(|l| seen.insert(*l))
        .collect();
    let graph_order: Vec<&str> = graph.labels().collect();
    if graph_order != first_seen {
        return Err("node order does not follow first-seen order".to_owned());
    }
    Ok(())
}

/// Verifies every cycle is a real, simple, least-node-first loop.
pub fn check_cycles_valid(graph: &LoopGraph, cycles: &[Cycle]) -> Result<(), String> {
    for cycle in cycles {
        if cycle.is_empty() {
            return Err("empty cycle".to_owned());
        }
        let indices = indices_of(graph, cycle)?;
        let distinct: HashSet<usize> = indices.iter().copied().collect();
        if distinct.len() != indices.len() {
            return Err(format!("cycle {cycle} repeats a node"));
        }
        if indices.iter().min() != indices.first() {
            return Err(format!("cycle {cycle} does not start at its least node"));
        }
        for (from, to) in cycle.edges() {
            if !graph.contains_edge(from, to) {
                return Err(format!("cycle {cycle} uses missing edge {from} -> {to}"));
            }
        }
    }
    Ok(())
}

/// Verifies start nodes never decrease and no loop is emitted twice.
pub fn check_canonical_order(graph: &LoopGraph, cycles: &[Cycle]) -> Result<(), String> {
    let mut previous_start = 0;
    let mut emitted = HashSet::new();
    for (i, cycle) in cycles.iter().enumerate() {
        let indices = indices_of(graph, cycle)?;
        let start = indices.first().copied().unwrap_or_default();
        if start < previous_start {
            return Err(format!("{} starts before the loop ahead of it", loop_tag(i)));
        }
        previous_start = start;
        if !emitted.insert(indices) {
            return Err(format!("{} duplicates an earlier loop", loop_tag(i)));
        }
    }
    Ok(())
}

/// Verifies the enumerated set equals an exhaustive path search.
///
/// The reference is exponential; keep it to small graphs.
pub fn check_matches_reference(graph: &LoopGraph, cycles: &[Cycle]) -> Result<(), String> {
    let expected = reference_cycles(graph);
    let got: BTreeSet<Vec<usize>> = cycles
        .iter()
        .map(|c| indices_of(graph, c))
        .collect::<Result<_, _>>()?;
    if got.len() != cycles.len() {
        return Err("duplicate cycles emitted".to_owned());
    }
    if got != expected {
        let missing = expected.difference(&got).count();
        let extra = got.difference(&expected).count();
        return Err(format!("cycle set mismatch: {missing} missing, {extra} unexpected"));
    }
    Ok(())
}

/// Verifies the tag table covers exactly the cycle edges, once each, with
/// tags in loop order.
pub fn check_edge_tags(cycles: &[Cycle], tags: &[EdgeTagRow]) -> Result<(), String> {
    let keys: Vec<(&str, &str)> = tags
        .iter()
        .map(|r| (r.from.as_str(), r.to.as_str()))
        .collect();
    if let Some(pos) = keys.windows(2).position(|w| w[0] >= w[1]) {
        let (from, to) = keys[pos + 1];
        return Err(format!("tag rows out of order at {from} -> {to}"));
    }

    for row in tags {
        let expected: Vec<String> = cycles
            .iter()
            .enumerate()
            .filter(|(_, c)| c.edges().any(|e| e == (row.from.as_str(), row.to.as_str())))
            .map(|(i, _)| loop_tag(i))
            .collect();
        if expected.is_empty() {
            return Err(format!("edge {} -> {} lies on no loop", row.from, row.to));
        }
        if row.tags != expected.join(TAG_SEPARATOR) {
            return Err(format!(
                "edge {} -> {} tagged {:?}, expected {:?}",
                row.from,
                row.to,
                row.tags,
                expected.join(TAG_SEPARATOR)
            ));
        }
    }

    let tagged: HashSet<(&str, &str)> = keys.into_iter().collect();
    for cycle in cycles {
        for edge in cycle.edges() {
            if !tagged.contains(&edge) {
                return Err(format!("cycle edge {} -> {} is untagged", edge.0, edge.1));
            }
        }
    }
    Ok(())
}

/// Every simple cycle as node indices, rotated to its least node.
///
/// Depth-first over nodes greater than the start, pruned to nodes that can
/// still reach the start.
pub fn reference_cycles(graph: &LoopGraph) -> BTreeSet<Vec<usize>> {
    let n = graph
        .graph()
        .node_indices()
        .map(|i| i.index() + 1)
        .max()
        .unwrap_or(0);
    let mut forward: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut backward: Vec<Vec<usize>> = vec![Vec::new(); n];
    for idx in graph.graph().node_indices() {
        for succ in graph.successors(idx) {
            forward[idx.index()].push(succ.index());
            backward[succ.index()].push(idx.index());
        }
    }

    let mut found = BTreeSet::new();
    for start in 0..n {
        let can_return = reaches(&backward, start);
        let mut path = vec![start];
        walk(&forward, &can_return, start, &mut path, &mut found);
    }
    found
}

/// Nodes `>= start` that reach `start` through nodes `>= start`.
fn reaches(backward: &[Vec<usize>], start: usize) -> Vec<bool> {
    let mut seen = vec![false; backward.len()];
    let mut queue = VecDeque::from([start]);
    seen[start] = true;
    while let Some(v) = queue.pop_front() {
        for &p in &backward[v] {
            if p >= start && !seen[p] {
                seen[p] = true;
                queue.push_back(p);
            }
        }
    }
    seen
}

fn walk(
    forward: &[Vec<usize>],
    can_return: &[bool],
    start: usize,
    path: &mut Vec<usize>,
    found: &mut BTreeSet<Vec<usize>>,
) {
    let Some(&last) = path.last() else {
        return;
    };
    for &next in &forward[last] {
        if next == start {
            found.insert(path.clone());
        } else if next > start && can_return[next] && !path.contains(&next) {
            path.push(next);
            walk(forward, can_return, start, path, found);
            path.pop();
        }
    }
}

fn indices_of(graph: &LoopGraph, cycle: &Cycle) -> Result<Vec<usize>, String> {
    cycle
        .nodes()
        .iter()
        .map(|label| {
            graph
                .node_index(label)
                .map(|i| i.index())
                .ok_or_else(|| format!("cycle node {label:?} not in graph"))
        })
        .collect()
}
