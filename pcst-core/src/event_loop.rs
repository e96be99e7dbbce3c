//! C6: the moat-growth phase. Drives C1 (global event queue), C2 (per-cluster
//! pairing heaps), C3 (union-find), C4 (edge-part bookkeeping) and C5 (the cluster
//! table) through the Goemans-Williamson primal-dual growth process.

use crate::cluster_table::{Cluster, ClusterTable};
use crate::edge_parts::EdgePartStore;
use crate::pairing_heap::Arena;
use crate::priority_queue::{Handle, PriorityQueue};
use crate::union_find::UnionFind;
use pcst_types::Edge;
use tracing::{debug, trace};

/// Residuals within this distance of zero are treated as exactly zero, matching
/// the spec's numerical policy for clamping near-zero reinsertions.
const EPS: f64 = 1e-10;

#[derive(Clone, Copy, Debug)]
enum Event {
    Edge(usize),
    Deactivation(usize),
}

fn remaining_prize(cluster: &Cluster, t: f64) -> f64 {
    let r = cluster.prize - (t - cluster.active_start_time);
    if r < EPS {
        0.0
    } else {
        r
    }
}

/// Runs the growth phase to completion and returns the populated cluster table.
///
/// `num_clusters` gates only merges of two *currently active* clusters (Case B):
/// once the active count has fallen to the target, further such merges are
/// skipped so the count never drops below it. Absorbing an inactive neighbor
/// (Case C once its edge is fully paid) never changes the active count, so it is
/// never gated, and neither are internal edges (Case A) or natural deactivations:
/// all of those still need to run to produce a correctly shaped merge tree even
/// when the target has already been reached (e.g. a star around a zero-prize hub
/// absorbs every leaf into one active cluster well before any two *active*
/// clusters would otherwise merge).
pub fn grow(edges: &[Edge], prizes: &[f64], costs: &[f64], num_clusters: usize) -> ClusterTable {
    let n = prizes.len();
    let mut clusters = ClusterTable::with_singletons(prizes);
    let mut uf = UnionFind::new(n);
    let mut edge_parts = EdgePartStore::new(edges);
    let mut arena = Arena::new();
    let mut events: PriorityQueue<Event> = PriorityQueue::new();

    let mut incident: Vec<Vec<usize>> = vec![Vec::new(); n];
    for i in 0..edges.len() {
        incident[edges[i].u].push(2 * i);
        incident[edges[i].v].push(2 * i + 1);
    }

    let mut active_count = 0usize;
    for v in 0..n {
        for &part in &incident[v] {
            let cost = costs[edge_parts.edge_index(part)];
            let node = clusters.get_mut(v).heap.insert(&mut arena, cost / 2.0, part);
            edge_parts.set_heap_node(part, node);
        }
        if prizes[v] > 0.0 {
            let cluster = clusters.get_mut(v);
            cluster.active = true;
            active_count += 1;
            schedule_deactivation(&mut clusters, &mut events, v, prizes[v]);
            schedule_edge_event(&mut clusters, &mut events, &arena, v);
        }
    }

    loop {
        let Some((t, event)) = events.delete_min() else {
            break;
        };
        match event {
            Event::Deactivation(c) => {
                let cluster = clusters.get_mut(c);
                cluster.deactivation_handle = None;
                if cluster.active && cluster.merged_into.is_none() {
                    cluster.active = false;
                    cluster.active_end_time = Some(t);
                    cluster.moat_size += t - cluster.active_start_time;
                    if let Some(h) = cluster.edge_event_handle.take() {
                        events.delete(h);
                    }
                    active_count -= 1;
                    debug!(cluster = c, time = t, "cluster deactivated");
                }
            }
            Event::Edge(c) => {
                clusters.get_mut(c).edge_event_handle = None;
                let still_active = {
                    let cluster = clusters.get(c);
                    cluster.active && cluster.merged_into.is_none()
                };
                if !still_active {
                    continue;
                }
                let Some((_, p)) = clusters.get_mut(c).heap.delete_min(&mut arena) else {
                    continue;
                };
                let q = EdgePartStore::sibling(p);
                let d = uf.find(edge_parts.vertex(q));
                trace!(cluster = c, edge = edge_parts.edge_index(p), time = t, "edge event");

                if d == c {
                    schedule_edge_event(&mut clusters, &mut events, &arena, c);
                } else if clusters.get(d).active {
                    if active_count <= num_clusters {
                        // Gated: merging two active clusters would drop below the
                        // target count. Drop this pairing and keep C growing.
                        schedule_edge_event(&mut clusters, &mut events, &arena, c);
                    } else {
                        merge(
                            &mut clusters,
                            &mut uf,
                            &mut events,
                            &mut arena,
                            &mut active_count,
                            c,
                            d,
                            p,
                            t,
                        );
                    }
                } else if edge_parts.resolved_against(p) == Some(d) {
                    // Second time around: C already paid D's frozen debt in full by
                    // waiting out the corrected deadline below, and D hasn't since
                    // moved (absorbed into something else) in the meantime. No need
                    // to recompute anything, just absorb it.
                    merge(
                        &mut clusters,
                        &mut uf,
                        &mut events,
                        &mut arena,
                        &mut active_count,
                        c,
                        d,
                        p,
                        t,
                    );
                } else {
                    // D's debt is fixed at the instant it stopped growing: either when it
                    // last deactivated, or its own birth if it was never active at all.
                    // (Using the *current* time here instead would wrongly assume D kept
                    // contributing its originally-assumed half-share right up to now.)
                    let d_cluster = clusters.get(d);
                    let t_freeze = d_cluster.active_end_time.unwrap_or(d_cluster.active_start_time);
                    let sibling_node = edge_parts.heap_node(q);
                    let frozen_deadline = arena.raw_key(sibling_node) + d_cluster.heap.offset();
                    let remaining = (frozen_deadline - t_freeze).max(0.0);
                    if remaining <= EPS {
                        // C alone has now paid the full cost: the inactive neighbor is
                        // absorbed. This never changes the active count (D contributed
                        // none), so it is never gated by `num_clusters`.
                        merge(
                            &mut clusters,
                            &mut uf,
                            &mut events,
                            &mut arena,
                            &mut active_count,
                            c,
                            d,
                            p,
                            t,
                        );
                    } else {
                        // Charge D's debt once: mark this part as resolved against D so
                        // that when it's popped again at the corrected deadline below, we
                        // don't add the same debt a second time.
                        edge_parts.set_resolved_against(p, d);
                        let node = clusters.get_mut(c).heap.insert(&mut arena, t + remaining, p);
                        edge_parts.set_heap_node(p, node);
                        schedule_edge_event(&mut clusters, &mut events, &arena, c);
                    }
                }
            }
        }
    }

    clusters
}

fn schedule_deactivation(
    clusters: &mut ClusterTable,
    events: &mut PriorityQueue<Event>,
    cluster_id: usize,
    remaining_prize: f64,
) {
    let cluster = clusters.get_mut(cluster_id);
    let deadline = cluster.active_start_time + remaining_prize;
    let h = events.insert(deadline, Event::Deactivation(cluster_id));
    cluster.deactivation_handle = Some(h);
}

fn schedule_edge_event(
    clusters: &mut ClusterTable,
    events: &mut PriorityQueue<Event>,
    arena: &Arena,
    cluster_id: usize,
) {
    let min = clusters.get(cluster_id).heap.get_min(arena);
    if let Some((deadline, _part)) = min {
        let h: Handle = events.insert(deadline, Event::Edge(cluster_id));
        clusters.get_mut(cluster_id).edge_event_handle = Some(h);
    }
}

/// Merges `c` and `d` into a freshly appended cluster. `d` may be active (Case B,
/// a genuine mutual merge) or inactive (Case C once `c` alone has fully paid the
/// edge); `active_count` is adjusted by however many of the two actually were
/// active, so absorbing an inactive neighbor never changes it.
#[allow(clippy::too_many_arguments)]
fn merge(
    clusters: &mut ClusterTable,
    uf: &mut UnionFind,
    events: &mut PriorityQueue<Event>,
    arena: &mut Arena,
    active_count: &mut usize,
    c: usize,
    d: usize,
    part: usize,
    t: f64,
) {
    let c_remaining = remaining_prize(clusters.get(c), t);
    let d_remaining = remaining_prize(clusters.get(d), t);
    let was_active = clusters.get(c).active as usize + clusters.get(d).active as usize;

    if let Some(h) = clusters.get_mut(c).deactivation_handle.take() {
        events.delete(h);
    }
    if let Some(h) = clusters.get_mut(d).deactivation_handle.take() {
        events.delete(h);
    }

    let c_heap = std::mem::take(&mut clusters.get_mut(c).heap);
    let d_heap = std::mem::take(&mut clusters.get_mut(d).heap);
    let merged_heap = c_heap.meld(d_heap, arena);

    clusters.get_mut(c).active = false;
    clusters.get_mut(d).active = false;
    *active_count -= was_active;

    let combined_prize = c_remaining + d_remaining;
    let k = clusters.push_merged(t, combined_prize, c, d);
    let uf_id = uf.add_cluster();
    debug_assert_eq!(k, uf_id, "ClusterTable and UnionFind ids must stay in lockstep");
    clusters.get_mut(k).heap = merged_heap;

    clusters.get_mut(c).merged_into = Some(k);
    clusters.get_mut(c).merged_along_edge_part = Some(part);
    clusters.get_mut(d).merged_into = Some(k);
    clusters.get_mut(d).merged_along_edge_part = Some(part);

    uf.union_into(c, d, k);
    debug!(c, d, k, time = t, "clusters merged");

    if combined_prize > 0.0 {
        clusters.get_mut(k).active = true;
        *active_count += 1;
        schedule_deactivation(clusters, events, k, combined_prize);
        schedule_edge_event(clusters, events, arena, k);
    }
}
