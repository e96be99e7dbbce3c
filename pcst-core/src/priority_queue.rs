//! C1: a min-heap keyed by `f64` deadline with O(log n) delete-by-handle.
//!
//! Ties are broken by insertion order so that event processing is deterministic
//! regardless of the platform's floating-point comparison quirks.

pub type Handle = usize;

struct Entry<T> {
    key: f64,
    seq: u64,
    handle: Handle,
    payload: T,
}

fn order(a: &Entry<impl Sized>, b: &Entry<impl Sized>) -> std::cmp::Ordering {
    a.key
        .partial_cmp(&b.key)
        .unwrap_or(std::cmp::Ordering::Equal)
        .then(a.seq.cmp(&b.seq))
}

pub struct PriorityQueue<T> {
    heap: Vec<Entry<T>>,
    /// `position[handle]` is this entry's current index in `heap`, or `None` if deleted.
    position: Vec<Option<usize>>,
    next_seq: u64,
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        PriorityQueue {
            heap: Vec::new(),
            position: Vec::new(),
            next_seq: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn insert(&mut self, key: f64, payload: T) -> Handle {
        let handle = self.position.len();
        let seq = self.next_seq;
        self.next_seq += 1;
        self.position.push(Some(self.heap.len()));
        self.heap.push(Entry {
            key,
            seq,
            handle,
            payload,
        });
        self.sift_up(self.heap.len() - 1);
        handle
    }

    pub fn get_min(&self) -> Option<(f64, &T)> {
        self.heap.first().map(|e| (e.key, &e.payload))
    }

    pub fn delete_min(&mut self) -> Option<(f64, T)> {
        self.delete_at(0)
    }

    /// Removes the entry referenced by `handle`. No-op if it was already deleted.
    pub fn delete(&mut self, handle: Handle) -> Option<(f64, T)> {
        let pos = self.position.get(handle).copied().flatten()?;
        self.delete_at(pos)
    }

    fn delete_at(&mut self, pos: usize) -> Option<(f64, T)> {
        if pos >= self.heap.len() {
            return None;
        }
        let last = self.heap.len() - 1;
        self.swap_entries(pos, last);
        let removed = self.heap.pop().expect("checked non-empty above");
        self.position[removed.handle] = None;
        if pos < self.heap.len() {
            // The element that bubbled into `pos` could belong above or below it; sift_up
            // is a no-op if it's not smaller than its parent, so trying both is safe and
            // at most one of the two calls does any work.
            self.sift_up(pos);
            self.sift_down(pos);
        }
        Some((removed.key, removed.payload))
    }

    fn swap_entries(&mut self, i: usize, j: usize) {
        self.heap.swap(i, j);
        self.position[self.heap[i].handle] = Some(i);
        self.position[self.heap[j].handle] = Some(j);
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let parent = (i - 1) / 2;
            if order(&self.heap[i], &self.heap[parent]) == std::cmp::Ordering::Less {
                self.swap_entries(i, parent);
                i = parent;
            } else {
                break;
            }
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * i + 1;
            let right = 2 * i + 2;
            let mut smallest = i;
            if left < len && order(&self.heap[left], &self.heap[smallest]) == std::cmp::Ordering::Less
            {
                smallest = left;
            }
            if right < len && order(&self.heap[right], &self.heap[smallest]) == std::cmp::Ordering::Less
            {
                smallest = right;
            }
            if smallest == i {
                break;
            }
            self.swap_entries(i, smallest);
            i = smallest;
        }
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pops_in_key_order() {
        let mut q = PriorityQueue::new();
        q.insert(3.0, "c");
        q.insert(1.0, "a");
        q.insert(2.0, "b");
        assert_eq!(q.delete_min(), Some((1.0, "a")));
        assert_eq!(q.delete_min(), Some((2.0, "b")));
        assert_eq!(q.delete_min(), Some((3.0, "c")));
        assert_eq!(q.delete_min(), None);
    }

    #[test]
    fn ties_break_by_insertion_order() {
        let mut q = PriorityQueue::new();
        q.insert(1.0, "first");
        q.insert(1.0, "second");
        q.insert(1.0, "third");
        assert_eq!(q.delete_min(), Some((1.0, "first")));
        assert_eq!(q.delete_min(), Some((1.0, "second")));
        assert_eq!(q.delete_min(), Some((1.0, "third")));
    }

    #[test]
    fn delete_by_handle() {
        let mut q = PriorityQueue::new();
        q.insert(1.0, "a");
        let h2 = q.insert(2.0, "b");
        q.insert(3.0, "c");
        assert_eq!(q.delete(h2), Some((2.0, "b")));
        assert_eq!(q.delete(h2), None);
        assert_eq!(q.delete_min(), Some((1.0, "a")));
        assert_eq!(q.delete_min(), Some((3.0, "c")));
    }

    #[test]
    fn handles_survive_reordering() {
        let mut q = PriorityQueue::new();
        let handles: Vec<_> = (0..20).map(|i| q.insert((20 - i) as f64, i)).collect();
        for &h in handles.iter().step_by(2) {
            q.delete(h);
        }
        let mut seen = vec![];
        while let Some((_, v)) = q.delete_min() {
            seen.push(v);
        }
        let expected: Vec<i32> = (1..20).step_by(2).rev().collect();
        assert_eq!(seen, expected);
    }
}
