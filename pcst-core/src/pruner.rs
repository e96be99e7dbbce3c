//! C7: turns the laminar merge tree produced by [`crate::event_loop::grow`] into a
//! concrete vertex/edge solution, first selecting components (Phase 1) then
//! applying the requested pruning policy (Phase 2).

use crate::cluster_table::ClusterTable;
use pcst_types::{Edge, Pruning, Solution};
use std::collections::{BTreeSet, HashSet};

const EPS: f64 = 1e-10;

/// One top-level surviving cluster: its member vertices and the edges (by
/// original index, with the merge time that created them) used to build it.
struct Component {
    vertices: Vec<usize>,
    edges: Vec<(usize, f64)>,
}

fn collect_component(clusters: &ClusterTable, root_id: usize) -> Component {
    let mut vertices = Vec::new();
    let mut edges = Vec::new();
    let mut stack = vec![root_id];
    while let Some(id) = stack.pop() {
        let cluster = clusters.get(id);
        match (cluster.child1, cluster.child2) {
            (Some(c1), Some(c2)) => {
                let part = clusters
                    .get(c1)
                    .merged_along_edge_part
                    .expect("merged cluster's child is missing its merge edge");
                edges.push((part / 2, cluster.active_start_time));
                stack.push(c1);
                stack.push(c2);
            }
            _ => vertices.push(id),
        }
    }
    Component { vertices, edges }
}

fn net_value(component: &Component, prizes: &[f64], costs: &[f64]) -> f64 {
    let prize: f64 = component.vertices.iter().map(|&v| prizes[v]).sum();
    let cost: f64 = component.edges.iter().map(|&(e, _)| costs[e]).sum();
    prize - cost
}

pub fn prune(
    clusters: &ClusterTable,
    edges: &[Edge],
    prizes: &[f64],
    costs: &[f64],
    root: Option<usize>,
    num_clusters: usize,
    pruning: Pruning,
) -> Solution {
    let components: Vec<Component> = clusters
        .iter()
        .filter(|c| c.merged_into.is_none())
        .map(|c| collect_component(clusters, c.id))
        .collect();

    let selected: Vec<usize> = if let Some(r) = root {
        let idx = components
            .iter()
            .position(|comp| comp.vertices.contains(&r))
            .expect("root vertex must belong to exactly one component");
        vec![idx]
    } else {
        let mut scored: Vec<(usize, f64)> = components
            .iter()
            .enumerate()
            .map(|(i, comp)| (i, net_value(comp, prizes, costs)))
            .filter(|&(_, value)| value > EPS)
            .collect();
        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored.into_iter().take(num_clusters).map(|(i, _)| i).collect()
    };

    let mut vertices: BTreeSet<usize> = BTreeSet::new();
    let mut forest: Vec<(usize, usize, usize, f64, f64)> = Vec::new(); // (edge_index,u,v,cost,merge_time)
    for &i in &selected {
        vertices.extend(components[i].vertices.iter().copied());
        for &(e, merge_time) in &components[i].edges {
            let edge = edges[e];
            forest.push((e, edge.u, edge.v, costs[e], merge_time));
        }
    }

    match pruning {
        Pruning::None => {}
        Pruning::Simple => simple_prune(&mut vertices, &mut forest, root, prizes),
        Pruning::Gw => reverse_delete(&mut vertices, &mut forest, root, prizes, true),
        Pruning::Strong => reverse_delete(&mut vertices, &mut forest, root, prizes, false),
    }

    let mut vertex_list: Vec<usize> = vertices.into_iter().collect();
    vertex_list.sort_unstable();
    let mut edge_list: Vec<usize> = forest.iter().map(|e| e.0).collect();
    edge_list.sort_unstable();
    Solution {
        vertices: vertex_list,
        edges: edge_list,
    }
}

fn degree_map(
    vertices: &BTreeSet<usize>,
    edges: &[(usize, usize, usize, f64, f64)],
) -> std::collections::HashMap<usize, usize> {
    let mut deg = std::collections::HashMap::new();
    for &v in vertices {
        deg.insert(v, 0);
    }
    for &(_, u, v, _, _) in edges {
        *deg.entry(u).or_insert(0) += 1;
        *deg.entry(v).or_insert(0) += 1;
    }
    deg
}

fn simple_prune(
    vertices: &mut BTreeSet<usize>,
    edges: &mut Vec<(usize, usize, usize, f64, f64)>,
    root: Option<usize>,
    prizes: &[f64],
) {
    loop {
        let deg = degree_map(vertices, edges);
        let leaf = vertices.iter().copied().find(|&v| {
            Some(v) != root && prizes[v] == 0.0 && deg.get(&v).copied().unwrap_or(0) <= 1
        });
        let Some(v) = leaf else {
            break;
        };
        edges.retain(|&(_, u, w, _, _)| u != v && w != v);
        vertices.remove(&v);
    }
}

/// Removes `edge_index` from `edges` if doing so severs a component whose total
/// original prize doesn't cover the edge's cost, dropping that component's
/// vertices too. Returns whether anything was removed.
fn try_remove_edge(
    vertices: &mut BTreeSet<usize>,
    edges: &mut Vec<(usize, usize, usize, f64, f64)>,
    edge_index: usize,
    cost: f64,
    anchor: usize,
    prizes: &[f64],
) -> bool {
    let mut reachable = HashSet::new();
    reachable.insert(anchor);
    let mut stack = vec![anchor];
    while let Some(cur) = stack.pop() {
        for &(ei, a, b, _, _) in edges.iter() {
            if ei == edge_index {
                continue;
            }
            let other = if a == cur {
                Some(b)
            } else if b == cur {
                Some(a)
            } else {
                None
            };
            if let Some(o) = other {
                if reachable.insert(o) {
                    stack.push(o);
                }
            }
        }
    }

    let severed: Vec<usize> = vertices.iter().copied().filter(|v| !reachable.contains(v)).collect();
    if severed.is_empty() {
        return false;
    }
    let severed_prize: f64 = severed.iter().map(|&w| prizes[w]).sum();
    // A tie (severed prize exactly covers the edge's cost) favors keeping the edge,
    // matching the zero-cost/zero-prize virtual-node case where dropping it would
    // gain nothing.
    if severed_prize >= cost - EPS {
        return false;
    }
    for w in &severed {
        vertices.remove(w);
    }
    edges.retain(|&(ei, a, b, _, _)| ei != edge_index && !severed.contains(&a) && !severed.contains(&b));
    true
}

/// `gw` processes edges in reverse order of the merge that created them, once
/// each; `strong` instead iterates every edge repeatedly to a fixed point.
fn reverse_delete(
    vertices: &mut BTreeSet<usize>,
    edges: &mut Vec<(usize, usize, usize, f64, f64)>,
    root: Option<usize>,
    prizes: &[f64],
    chronological: bool,
) {
    let Some(&anchor) = root.as_ref().or_else(|| vertices.iter().min()) else {
        return;
    };

    if chronological {
        // A single reverse pass: each time-sorted edge is considered exactly once.
        // A removal cuts off its whole severed subtree (and that subtree's edges
        // with it), but never re-opens edges already passed over earlier in the
        // scan, unlike the fixed-point loop below.
        edges.sort_by(|a, b| b.4.partial_cmp(&a.4).unwrap_or(std::cmp::Ordering::Equal));
        let mut i = 0;
        while i < edges.len() {
            let (edge_index, _, _, cost, _) = edges[i];
            if !try_remove_edge(vertices, edges, edge_index, cost, anchor, prizes) {
                i += 1;
            }
        }
    } else {
        loop {
            let mut changed = false;
            let mut i = 0;
            while i < edges.len() {
                let (edge_index, _, _, cost, _) = edges[i];
                if try_remove_edge(vertices, edges, edge_index, cost, anchor, prizes) {
                    changed = true;
                    i = 0;
                } else {
                    i += 1;
                }
            }
            if !changed {
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event_loop::grow;

    #[test]
    fn simple_prune_drops_zero_prize_leaf() {
        // S5: chain 0-1-2 with 0 holding all the prize.
        let edges = vec![Edge::new(0, 1), Edge::new(1, 2)];
        let costs = vec![0.1, 0.1];
        let prizes = vec![5.0, 0.0, 0.0];
        let clusters = grow(&edges, &prizes, &costs, 1);
        let solution = prune(&clusters, &edges, &prizes, &costs, None, 1, Pruning::Simple);
        assert_eq!(solution.vertices, vec![0]);
        assert!(solution.edges.is_empty());
    }

    #[test]
    fn strong_prune_drops_edge_not_worth_its_cost() {
        // S3: a single pricey edge between two low-prize vertices buys nothing.
        let edges = vec![Edge::new(0, 1)];
        let costs = vec![100.0];
        let prizes = vec![1.0, 1.0];
        let clusters = grow(&edges, &prizes, &costs, 1);
        let solution = prune(&clusters, &edges, &prizes, &costs, None, 1, Pruning::Strong);
        assert_eq!(solution.vertices, vec![0]);
        assert!(solution.edges.is_empty());
    }

    #[test]
    fn gw_single_pass_diverges_from_strong_fixed_point() {
        // Path 0(root)-1-2. Edge (1,2) merged before edge (0,1), so gw's reverse
        // pass (latest merge time first) checks (0,1) first: at that point vertex
        // 2 is still attached, so the severed prize (9+2=11) covers the edge's
        // cost (10) and it's kept. Checking (1,2) next severs vertex 2 alone
        // (prize 2 < cost 3) and removes it — but gw never revisits (0,1), even
        // though vertex 2's prize no longer props it up (9 < 10 on its own).
        // strong's fixed point restarts after every removal and catches this.
        let prizes = vec![0.0, 9.0, 2.0];
        let edge_01 = (0usize, 0usize, 1usize, 10.0, 5.0);
        let edge_12 = (1usize, 1usize, 2usize, 3.0, 2.0);

        let mut gw_vertices: BTreeSet<usize> = [0, 1, 2].into_iter().collect();
        let mut gw_edges = vec![edge_01, edge_12];
        reverse_delete(&mut gw_vertices, &mut gw_edges, Some(0), &prizes, true);
        assert_eq!(gw_vertices, [0, 1].into_iter().collect());
        assert_eq!(gw_edges.iter().map(|e| e.0).collect::<Vec<_>>(), vec![0]);

        let mut strong_vertices: BTreeSet<usize> = [0, 1, 2].into_iter().collect();
        let mut strong_edges = vec![edge_01, edge_12];
        reverse_delete(&mut strong_vertices, &mut strong_edges, Some(0), &prizes, false);
        assert_eq!(strong_vertices, [0].into_iter().collect());
        assert!(strong_edges.is_empty());
    }

    #[test]
    fn root_is_always_retained() {
        let edges = vec![Edge::new(0, 1), Edge::new(0, 2), Edge::new(0, 3)];
        let costs = vec![1.0, 1.0, 1.0];
        let prizes = vec![0.0, 10.0, 10.0, 10.0];
        let clusters = grow(&edges, &prizes, &costs, 1);
        let solution = prune(&clusters, &edges, &prizes, &costs, Some(0), 1, Pruning::Strong);
        assert_eq!(solution.vertices, vec![0, 1, 2, 3]);
        let mut edge_idx = solution.edges.clone();
        edge_idx.sort_unstable();
        assert_eq!(edge_idx, vec![0, 1, 2]);
    }
}
