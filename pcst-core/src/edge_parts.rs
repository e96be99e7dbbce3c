//! C4: the two halves of every edge. Edge `i` owns parts `2i` (endpoint `u`) and
//! `2i+1` (endpoint `v`); the "other part" of `p` is `p ^ 1`.

use crate::pairing_heap::NodeId;
use pcst_types::Edge;

struct EdgePart {
    /// The endpoint vertex this part is charged against.
    vertex: usize,
    edge_index: usize,
    /// Where this part currently lives in the pairing-heap arena. Changes across
    /// reinsertions (event loop Case A / Case C).
    heap_node: Option<NodeId>,
    /// The inactive neighbor cluster this part's deadline was last corrected
    /// against (event loop Case C), so a repeat pop against the *same* frozen
    /// neighbor is recognized as already fully paid rather than re-applying its
    /// debt a second time.
    resolved_against: Option<usize>,
}

pub struct EdgePartStore {
    parts: Vec<EdgePart>,
}

impl EdgePartStore {
    pub fn new(edges: &[Edge]) -> Self {
        let mut parts = Vec::with_capacity(edges.len() * 2);
        for (i, e) in edges.iter().enumerate() {
            parts.push(EdgePart {
                vertex: e.u,
                edge_index: i,
                heap_node: None,
                resolved_against: None,
            });
            parts.push(EdgePart {
                vertex: e.v,
                edge_index: i,
                heap_node: None,
                resolved_against: None,
            });
        }
        EdgePartStore { parts }
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[inline]
    pub fn sibling(part: usize) -> usize {
        part ^ 1
    }

    pub fn vertex(&self, part: usize) -> usize {
        self.parts[part].vertex
    }

    pub fn edge_index(&self, part: usize) -> usize {
        self.parts[part].edge_index
    }

    pub fn set_heap_node(&mut self, part: usize, node: NodeId) {
        self.parts[part].heap_node = Some(node);
    }

    /// The part's current node in the pairing-heap arena. Panics if the part has
    /// never been inserted into any heap, which would indicate a logic error in the
    /// event loop rather than a reachable runtime condition.
    pub fn heap_node(&self, part: usize) -> NodeId {
        self.parts[part]
            .heap_node
            .expect("edge part queried before being inserted into a heap")
    }

    /// The inactive cluster this part's deadline was last corrected against, if any.
    pub fn resolved_against(&self, part: usize) -> Option<usize> {
        self.parts[part].resolved_against
    }

    pub fn set_resolved_against(&mut self, part: usize, cluster: usize) {
        self.parts[part].resolved_against = Some(cluster);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sibling_is_an_involution() {
        for i in 0..10 {
            assert_eq!(EdgePartStore::sibling(EdgePartStore::sibling(i)), i);
            assert_ne!(EdgePartStore::sibling(i), i);
        }
    }

    #[test]
    fn parts_are_assigned_to_correct_endpoints() {
        let edges = vec![Edge::new(0, 1), Edge::new(2, 3)];
        let store = EdgePartStore::new(&edges);
        assert_eq!(store.len(), 4);
        assert_eq!(store.vertex(0), 0);
        assert_eq!(store.vertex(1), 1);
        assert_eq!(store.vertex(2), 2);
        assert_eq!(store.vertex(3), 3);
        assert_eq!(store.edge_index(0), 0);
        assert_eq!(store.edge_index(1), 0);
        assert_eq!(store.edge_index(2), 1);
        assert_eq!(store.edge_index(3), 1);
    }
}
