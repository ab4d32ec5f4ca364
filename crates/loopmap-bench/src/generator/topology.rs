//! Topology strategies: forward backbone, feedback edges, self-loops, and
//! spreadsheet noise.

use loopmap_core::EdgeRecord;
use rand::Rng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use super::GeneratorConfig;

/// Label of the variable at `index`.
pub fn label(index: usize) -> String {
    format!("var-{index:05}")
}

/// Builds the full record list for `config`.
pub fn build_connections(config: &GeneratorConfig, rng: &mut StdRng) -> Vec<EdgeRecord> {
    let n = config.num_nodes;
    let mut records: Vec<EdgeRecord> = Vec::new();

    if n >= 2 {
        build_backbone(rng, config, &mut records);
        inject_feedback(rng, config, &mut records);
    }
    if n >= 1 {
        inject_self_loops(rng, config, &mut records);
    }

    records.shuffle(rng);
    inject_duplicates(rng, config.duplicate_rate, &mut records);
    inject_blanks(rng, n, config.blank_rate, &mut records);
    records
}

/// Edges `i -> j` with `i < j <= i + forward_span`; acyclic on their own.
fn build_backbone(rng: &mut StdRng, config: &GeneratorConfig, out: &mut Vec<EdgeRecord>) {
    let n = config.num_nodes;
    let span = config.forward_span.max(1);
    for _ in 0..config.num_forward_edges {
        let from = rng.gen_range(0..n - 1);
        let to = rng.gen_range(from + 1..=(from + span).min(n - 1));
        out.push(EdgeRecord::new(label(from), label(to)));
    }
}

/// Edges `j -> i` with `j - feedback_span <= i < j`.
fn inject_feedback(rng: &mut StdRng, config: &GeneratorConfig, out: &mut Vec<EdgeRecord>) {
    let span = config.feedback_span.max(1);
    for _ in 0..config.num_feedback_edges {
        let from = rng.gen_range(1..config.num_nodes);
        let to = rng.gen_range(from.saturating_sub(span)..from);
        out.push(EdgeRecord::new(label(from), label(to)));
    }
}

fn inject_self_loops(rng: &mut StdRng, config: &GeneratorConfig, out: &mut Vec<EdgeRecord>) {
    for _ in 0..config.num_self_loops {
        let v = label(rng.gen_range(0..config.num_nodes));
        out.push(EdgeRecord::new(v.clone(), v));
    }
}

fn inject_duplicates(rng: &mut StdRng, rate: f64, out: &mut Vec<EdgeRecord>) {
    if out.is_empty() {
        return;
    }
    let count = scaled(out.len(), rate);
    for _ in 0..count {
        let src = rng.gen_range(0..out.len());
        let at = rng.gen_range(0..=out.len());
        let copy = out[src].clone();
        out.insert(at, copy);
    }
}

fn inject_blanks(rng: &mut StdRng, n: usize, rate: f64, out: &mut Vec<EdgeRecord>) {
    if n == 0 {
        return;
    }
    let count = scaled(out.len(), rate);
    for _ in 0..count {
        let present = Some(label(rng.gen_range(0..n)));
        let record = if rng.gen_bool(0.5) {
            EdgeRecord {
                from: present,
                to: None,
            }
        } else {
            EdgeRecord {
                from: None,
                to: present,
            }
        };
        let at = rng.gen_range(0..=out.len());
        out.insert(at, record);
    }
}

fn scaled(len: usize, rate: f64) -> usize {
    (len as f64 * rate.clamp(0.0, 1.0)).round() as usize
}
