//! C5: the flat, append-only table of cluster records. Singletons occupy ids
//! `0..n`; every merge appends exactly one new record. No record is ever removed,
//! since the pruner later needs to walk the whole laminar merge tree.

use crate::pairing_heap::PairingHeap;
use crate::priority_queue::Handle;

pub struct Cluster {
    pub id: usize,
    pub active: bool,
    pub active_start_time: f64,
    pub active_end_time: Option<f64>,
    pub moat_size: f64,
    /// Remaining prize budget as of `active_start_time`; the cluster deactivates at
    /// `active_start_time + prize` unless merged away first.
    pub prize: f64,
    pub merged_into: Option<usize>,
    pub merged_along_edge_part: Option<usize>,
    pub child1: Option<usize>,
    pub child2: Option<usize>,
    pub deactivation_handle: Option<Handle>,
    pub edge_event_handle: Option<Handle>,
    pub heap: PairingHeap,
}

impl Cluster {
    fn new(id: usize, active_start_time: f64, prize: f64, child1: Option<usize>, child2: Option<usize>) -> Self {
        Cluster {
            id,
            active: false,
            active_start_time,
            active_end_time: None,
            moat_size: 0.0,
            prize,
            merged_into: None,
            merged_along_edge_part: None,
            child1,
            child2,
            deactivation_handle: None,
            edge_event_handle: None,
            heap: PairingHeap::new(),
        }
    }
}

pub struct ClusterTable {
    clusters: Vec<Cluster>,
}

impl ClusterTable {
    /// Builds the `n` singleton clusters. A singleton with zero prize starts
    /// inactive; its edge-parts are still reachable through its (empty-growth) heap.
    pub fn with_singletons(prizes: &[f64]) -> Self {
        let clusters = prizes
            .iter()
            .enumerate()
            .map(|(v, &prize)| Cluster::new(v, 0.0, prize, None, None))
            .collect();
        ClusterTable { clusters }
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    pub fn get(&self, id: usize) -> &Cluster {
        &self.clusters[id]
    }

    pub fn get_mut(&mut self, id: usize) -> &mut Cluster {
        &mut self.clusters[id]
    }

    /// Appends a new merged cluster with id `len()`, returning that id.
    pub fn push_merged(
        &mut self,
        active_start_time: f64,
        prize: f64,
        child1: usize,
        child2: usize,
    ) -> usize {
        let id = self.clusters.len();
        self.clusters
            .push(Cluster::new(id, active_start_time, prize, Some(child1), Some(child2)));
        id
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cluster> {
        self.clusters.iter()
    }
}
