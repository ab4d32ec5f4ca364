//! Relationship-map generator.
//!
//! Produces `From`/`To` edge lists shaped like hand-drawn causal maps: a
//! mostly forward-flowing backbone, a sprinkling of short feedback edges
//! that close loops, a few self-reinforcing variables, and the noise real
//! spreadsheets carry (repeated rows and rows with a blank cell).

pub mod topology;

use loopmap_core::EdgeRecord;
use rand::SeedableRng;
use rand::rngs::StdRng;

use topology::build_connections;

/// Configuration for the connections generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Seed for the random number generator (deterministic).
    pub seed: u64,
    /// Number of variables.
    pub num_nodes: usize,
    /// Number of backbone edges, each pointing to a later variable.
    pub num_forward_edges: usize,
    /// Maximum index distance of a backbone edge.
    pub forward_span: usize,
    /// Number of edges pointing back to an earlier variable.
    pub num_feedback_edges: usize,
    /// Maximum index distance of a feedback edge.
    pub feedback_span: usize,
    /// Number of variables with an edge to themselves.
    pub num_self_loops: usize,
    /// Fraction of rows repeated verbatim (0.0-1.0).
    pub duplicate_rate: f64,
    /// Fraction of extra rows with one blank cell (0.0-1.0).
    pub blank_rate: f64,
}

/// Predefined size tiers for benchmarking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeTier {
    /// ~50 variables, ~110 edges
    Small,
    /// ~500 variables, ~1300 edges
    Medium,
    /// ~2000 variables, ~5200 edges
    Large,
}

impl SizeTier {
    /// Short lowercase name used in fixture file names and benchmark ids.
    pub fn name(self) -> &'static str {
        match self {
            SizeTier::Small => "small",
            SizeTier::Medium => "medium",
            SizeTier::Large => "large",
        }
    }

    /// Returns the default `GeneratorConfig` for this size tier.
    pub fn config(self, seed: u64) -> GeneratorConfig {
        match self {
            SizeTier::Small => GeneratorConfig {
                seed,
                num_nodes: 50,
                num_forward_edges: 100,
                forward_span: 6,
                num_feedback_edges: 8,
                feedback_span: 5,
                num_self_loops: 2,
                duplicate_rate: 0.05,
                blank_rate: 0.02,
            },
            SizeTier::Medium => GeneratorConfig {
                seed,
                num_nodes: 500,
                num_forward_edges: 1200,
                forward_span: 8,
                num_feedback_edges: 50,
                feedback_span: 6,
                num_self_loops: 10,
                duplicate_rate: 0.05,
                blank_rate: 0.02,
            },
            SizeTier::Large => GeneratorConfig {
                seed,
                num_nodes: 2000,
                num_forward_edges: 5000,
                forward_span: 8,
                num_feedback_edges: 150,
                feedback_span: 6,
                num_self_loops: 30,
                duplicate_rate: 0.05,
                blank_rate: 0.02,
            },
        }
    }
}

/// Generates a connections edge list from the given configuration.
///
/// All randomness is deterministic, seeded from `config.seed`.
pub fn generate_connections(config: &GeneratorConfig) -> Vec<EdgeRecord> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    build_connections(config, &mut rng)
}

/// Every ordered pair of `n` distinct variables, the worst case for loop
/// counts: `sum over k=2..=n of C(n, k) * (k - 1)!` simple cycles.
pub fn complete_graph(n: usize) -> Vec<EdgeRecord> {
    let mut records = Vec::with_capacity(n * n.saturating_sub(1));
    for a in 0..n {
        for b in 0..n {
            if a != b {
                records.push(EdgeRecord::new(topology::label(a), topology::label(b)));
            }
        }
    }
    records
}
