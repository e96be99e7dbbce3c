//! C3: path-compressed disjoint-set over cluster ids.
//!
//! `parent[i] == i` means cluster `i` is still its own representative (alive, whether
//! active or deactivated); `parent[i] == k` (with `k != i`) means `i` was absorbed into
//! `k`. Because merges only ever append new, larger ids and point the two merged
//! clusters at the new id, the representative returned by `find` is always the
//! largest-id live cluster containing the queried vertex.

pub struct UnionFind {
    parent: Vec<usize>,
}

impl UnionFind {
    /// One singleton cluster per vertex, ids `0..n`.
    pub fn new(n: usize) -> Self {
        UnionFind {
            parent: (0..n).collect(),
        }
    }

    /// Registers a new cluster id, returning it. Must be called with ids assigned
    /// consecutively, matching `ClusterTable::push`.
    pub fn add_cluster(&mut self) -> usize {
        let id = self.parent.len();
        self.parent.push(id);
        id
    }

    pub fn find(&mut self, x: usize) -> usize {
        let mut root = x;
        while self.parent[root] != root {
            root = self.parent[root];
        }
        let mut cur = x;
        while self.parent[cur] != root {
            let next = self.parent[cur];
            self.parent[cur] = root;
            cur = next;
        }
        root
    }

    /// Points both merged clusters' representatives at the freshly created `new_root`.
    pub fn union_into(&mut self, a: usize, b: usize, new_root: usize) {
        let ra = self.find(a);
        let rb = self.find(b);
        self.parent[ra] = new_root;
        self.parent[rb] = new_root;
    }
}
