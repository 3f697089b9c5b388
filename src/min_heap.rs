use crate::error::{HuffError, Result};
use crate::node::Node;

#[derive(Debug, Clone)]
struct Entry {
    sequence: u64,
    node: Node,
}

impl Entry {
    fn key(&self) -> (u64, u64) {
        (self.node.frequency(), self.sequence)
    }
}

/// Array-backed binary min-heap of nodes, keyed by frequency.
///
/// Each inserted node is stamped with an increasing sequence number and the
/// ordering key is `(frequency, sequence)`. Nodes with equal frequency are
/// therefore extracted in insertion order, which keeps tree construction a
/// pure function of the insertion order.
#[derive(Debug, Clone, Default)]
pub struct MinHeap {
    elements: Vec<Entry>,
    next_sequence: u64,
}

impl MinHeap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn parent(i: usize) -> usize {
        (i - 1) / 2
    }

    fn left(i: usize) -> usize {
        2 * i + 1
    }

    fn right(i: usize) -> usize {
        2 * i + 2
    }

    fn less(&self, a: usize, b: usize) -> bool {
        self.elements[a].key() < self.elements[b].key()
    }

    pub fn insert(&mut self, node: Node) {
        self.elements.push(Entry {
            sequence: self.next_sequence,
            node,
        });
        self.next_sequence += 1;
        self.sift_up(self.elements.len() - 1);
        debug_assert!(self.is_valid_heap());
    }

    pub fn extract_min(&mut self) -> Result<Node> {
        if self.elements.is_empty() {
            return Err(HuffError::EmptyQueue);
        }
        let last = self.elements.len() - 1;
        self.elements.swap(0, last);
        let min = self.elements.pop().ok_or(HuffError::EmptyQueue)?;
        if !self.elements.is_empty() {
            self.sift_down(0);
        }
        Ok(min.node)
    }

    pub fn peek(&self) -> Option<&Node> {
        self.elements.first().map(|e| &e.node)
    }

    /// Nodes in backing-array order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.elements.iter().map(|e| &e.node)
    }

    fn sift_up(&mut self, mut i: usize) {
        while i > 0 {
            let p = Self::parent(i);
            if !self.less(i, p) {
                break;
            }
            self.elements.swap(i, p);
            i = p;
        }
    }

    fn sift_down(&mut self, mut i: usize) {
        let n = self.elements.len();
        loop {
            let l = Self::left(i);
            let r = Self::right(i);
            let mut smallest = i;

            if l < n && self.less(l, smallest) {
                smallest = l;
            }
            if r < n && self.less(r, smallest) {
                smallest = r;
            }
            if smallest == i {
                break;
            }
            self.elements.swap(i, smallest);
            i = smallest;
        }
    }

    /// Every element is no larger than its children.
    pub fn is_valid_heap(&self) -> bool {
        (1..self.elements.len()).all(|i| !self.less(i, Self::parent(i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_in_frequency_order() {
        let mut heap = MinHeap::new();
        for (symbol, freq) in [(0u8, 5u64), (1, 1), (2, 9), (3, 3), (4, 7)] {
            heap.insert(Node::leaf(symbol, freq));
        }
        assert_eq!(heap.len(), 5);
        assert_eq!(heap.peek().map(Node::frequency), Some(1));

        let mut out = Vec::new();
        while !heap.is_empty() {
            out.push(heap.extract_min().unwrap().frequency());
            assert!(heap.is_valid_heap());
        }
        assert_eq!(out, vec![1, 3, 5, 7, 9]);
    }

    #[test]
    fn ties_leave_in_insertion_order() {
        let mut heap = MinHeap::new();
        for symbol in [9u8, 4, 200, 1] {
            heap.insert(Node::leaf(symbol, 2));
        }
        let order: Vec<u8> = (0..4)
            .map(|_| heap.extract_min().unwrap().symbol().unwrap())
            .collect();
        assert_eq!(order, vec![9, 4, 200, 1]);
    }

    #[test]
    fn empty_extract_is_an_error() {
        let mut heap = MinHeap::new();
        assert!(matches!(heap.extract_min(), Err(HuffError::EmptyQueue)));
    }
}
