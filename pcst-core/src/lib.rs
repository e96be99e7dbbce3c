//! Prize-collecting Steiner tree/forest solver: a Goemans-Williamson moat-growing
//! primal-dual algorithm (C1-C6, see [`event_loop`]) followed by forest pruning
//! (C7, see [`pruner`]).

mod cluster_table;
mod edge_parts;
mod error;
mod event_loop;
mod pairing_heap;
mod priority_queue;
mod pruner;
mod union_find;
mod validation;

pub use error::Error;
pub use pcst_types::{Edge, Pruning, Solution, SolverOptions};

use tracing::{info, info_span};

/// Solves the prize-collecting Steiner tree/forest problem.
///
/// `root = Some(r)` requires `num_clusters == 1` and always keeps `r` in the
/// returned vertex set, regardless of its prize. See [`pcst_types::SolverOptions`]
/// for the default values mirrored by `pcst-cli` and `pcst-py`.
pub fn pcst(
    edges: &[(usize, usize)],
    prizes: &[f64],
    costs: &[f64],
    root: Option<usize>,
    num_clusters: usize,
    pruning: Pruning,
    verbosity: u8,
) -> Result<Solution, Error> {
    let _span = info_span!(
        "pcst",
        n = prizes.len(),
        m = edges.len(),
        num_clusters,
        ?pruning,
    )
    .entered();

    let edges: Vec<Edge> = edges.iter().map(|&(u, v)| Edge::new(u, v)).collect();
    validation::validate(&edges, prizes, costs, root, num_clusters)?;

    if verbosity >= 1 {
        info!(n = prizes.len(), m = edges.len(), "starting growth phase");
    }
    let clusters = event_loop::grow(&edges, prizes, costs, num_clusters);

    if verbosity >= 1 {
        info!(clusters = clusters.len(), "growth phase complete, pruning");
    }
    let solution = pruner::prune(&clusters, &edges, prizes, costs, root, num_clusters, pruning);

    if verbosity >= 1 {
        info!(
            vertices = solution.vertices.len(),
            edges = solution.edges.len(),
            "solve complete"
        );
    }
    Ok(solution)
}

/// Convenience entry point that runs [`pcst`] with `opts`.
pub fn pcst_with_options(
    edges: &[(usize, usize)],
    prizes: &[f64],
    costs: &[f64],
    opts: &SolverOptions,
) -> Result<Solution, Error> {
    pcst(
        edges,
        prizes,
        costs,
        opts.root,
        opts.num_clusters,
        opts.pruning,
        opts.verbosity,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn s1_triangle() {
        let solution = pcst(
            &[(0, 1), (1, 2), (0, 2)],
            &[0.0, 2.0, 2.0],
            &[1.0, 1.0, 5.0],
            None,
            1,
            Pruning::Strong,
            0,
        )
        .unwrap();
        assert_eq!(solution.vertices, vec![1, 2]);
        assert_eq!(solution.edges, vec![1]);
    }

    #[test]
    fn s2_star_with_root() {
        let solution = pcst(
            &[(0, 1), (0, 2), (0, 3)],
            &[0.0, 10.0, 10.0, 10.0],
            &[1.0, 1.0, 1.0],
            Some(0),
            1,
            Pruning::Strong,
            0,
        )
        .unwrap();
        assert_eq!(solution.vertices, vec![0, 1, 2, 3]);
        let mut edges = solution.edges.clone();
        edges.sort_unstable();
        assert_eq!(edges, vec![0, 1, 2]);
    }

    #[test]
    fn s3_expensive_edge_buys_nothing() {
        let solution = pcst(&[(0, 1)], &[1.0, 1.0], &[100.0], None, 1, Pruning::Strong, 0).unwrap();
        assert_eq!(solution.vertices, vec![0]);
        assert!(solution.edges.is_empty());
    }

    #[test]
    fn s4_multi_component() {
        let solution = pcst(
            &[(0, 1), (2, 3)],
            &[2.0, 2.0, 2.0, 2.0],
            &[1.0, 1.0],
            None,
            2,
            Pruning::Strong,
            0,
        )
        .unwrap();
        assert_eq!(solution.vertices, vec![0, 1, 2, 3]);
        let mut edges = solution.edges.clone();
        edges.sort_unstable();
        assert_eq!(edges, vec![0, 1]);
    }

    #[test]
    fn s5_zero_prize_leaf_pruned() {
        let solution = pcst(
            &[(0, 1), (1, 2)],
            &[5.0, 0.0, 0.0],
            &[0.1, 0.1],
            None,
            1,
            Pruning::Simple,
            0,
        )
        .unwrap();
        assert_eq!(solution.vertices, vec![0]);
        assert!(solution.edges.is_empty());
    }

    #[test]
    fn s6_virtual_node_reduction() {
        let solution = pcst(
            &[(0, 2), (2, 1)],
            &[0.0, 0.0, 3.0],
            &[0.0, 0.0],
            None,
            1,
            Pruning::Strong,
            0,
        )
        .unwrap();
        assert_eq!(solution.vertices, vec![0, 1, 2]);
        let mut edges = solution.edges.clone();
        edges.sort_unstable();
        assert_eq!(edges, vec![0, 1]);
    }

    #[test]
    fn no_prize_input_is_empty() {
        let solution = pcst(&[(0, 1)], &[0.0, 0.0], &[1.0], None, 1, Pruning::Strong, 0).unwrap();
        assert!(solution.vertices.is_empty());
        assert!(solution.edges.is_empty());
    }

    #[test]
    fn rejects_self_loop() {
        let err = pcst(&[(0, 0)], &[1.0, 1.0], &[1.0], None, 1, Pruning::Strong, 0).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
