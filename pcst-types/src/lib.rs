use serde::{Deserialize, Serialize};

/// Post-processing policy applied to the grown moat forest.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pruning {
    /// Return the spanning forest exactly as grown.
    None,
    /// Repeatedly drop zero-prize leaves.
    Simple,
    /// Goemans-Williamson reverse-delete, processed in reverse deactivation order.
    Gw,
    /// Fixed-point connectivity-preserving prune.
    Strong,
}

impl Default for Pruning {
    fn default() -> Self {
        Pruning::Strong
    }
}

impl std::str::FromStr for Pruning {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(Pruning::None),
            "simple" => Ok(Pruning::Simple),
            "gw" => Ok(Pruning::Gw),
            "strong" => Ok(Pruning::Strong),
            other => Err(format!("unknown pruning policy: {other}")),
        }
    }
}

impl std::fmt::Display for Pruning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Pruning::None => "none",
            Pruning::Simple => "simple",
            Pruning::Gw => "gw",
            Pruning::Strong => "strong",
        };
        f.write_str(s)
    }
}

/// An undirected, non-negative-cost edge as given by the caller.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub u: usize,
    pub v: usize,
}

impl Edge {
    pub fn new(u: usize, v: usize) -> Self {
        Edge { u, v }
    }

    /// The endpoint that is not `from`.
    pub fn other(&self, from: usize) -> usize {
        if from == self.u {
            self.v
        } else {
            self.u
        }
    }
}

/// Caller-facing knobs of a solve, bundled for convenience.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolverOptions {
    pub root: Option<usize>,
    pub num_clusters: usize,
    pub pruning: Pruning,
    pub verbosity: u8,
}

impl Default for SolverOptions {
    fn default() -> Self {
        SolverOptions {
            root: None,
            num_clusters: 1,
            pruning: Pruning::default(),
            verbosity: 0,
        }
    }
}

/// Result of a solve: sorted, duplicate-free vertex and edge-index sets.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    pub vertices: Vec<usize>,
    pub edges: Vec<usize>,
}
