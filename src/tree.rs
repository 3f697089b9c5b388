use tracing::debug;

use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::min_heap::MinHeap;
use crate::node::Node;

/// A Huffman tree. `root` is `None` when built from an empty input.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HuffmanTree {
    pub root: Option<Node>,
}

impl HuffmanTree {
    /// Leaves for every present symbol, inserted in ascending symbol order.
    pub fn initial_queue(frequencies: &FrequencyTable) -> MinHeap {
        let mut heap = MinHeap::new();
        for (symbol, count) in frequencies.present() {
            heap.insert(Node::leaf(symbol, count));
        }
        heap
    }

    /// Merge the two lightest nodes until a single root remains.
    pub fn build(mut heap: MinHeap) -> Result<Self> {
        if heap.is_empty() {
            return Ok(Self { root: None });
        }

        while heap.len() > 1 {
            let left = heap.extract_min()?;
            let right = heap.extract_min()?;
            heap.insert(Node::merge(left, right));
        }

        let root = heap.extract_min()?;
        debug!(
            leaves = root.leaf_count(),
            depth = root.depth(),
            weight = root.frequency(),
            "built huffman tree"
        );
        Ok(Self { root: Some(root) })
    }

    pub fn from_frequencies(frequencies: &FrequencyTable) -> Result<Self> {
        Self::build(Self::initial_queue(frequencies))
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Indented dump, one line per node, edges labelled with their bit.
    pub fn render(&self) -> String {
        let mut out = String::new();
        if let Some(root) = &self.root {
            render_node(root, "", &mut out);
        }
        out
    }
}

fn render_node(node: &Node, prefix: &str, out: &mut String) {
    out.push_str(&format!("{prefix}-> {node}\n"));
    if let Node::Internal { left, right, .. } = node {
        render_node(left, &format!("{prefix}  |--(0)"), out);
        render_node(right, &format!("{prefix}  |--(1)"), out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_table_gives_empty_tree() {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::default()).unwrap();
        assert!(tree.is_empty());
        assert_eq!(tree.render(), "");
    }

    #[test]
    fn single_symbol_root_is_leaf() {
        let tree = HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(&[0x41; 1000])).unwrap();
        assert_eq!(tree.root, Some(Node::leaf(0x41, 1000)));
    }

    #[test]
    fn root_weight_is_input_length() {
        let table = FrequencyTable::from_bytes(b"AAAABBBCCD");
        let tree = HuffmanTree::from_frequencies(&table).unwrap();
        let root = tree.root.as_ref().unwrap();
        assert_eq!(root.frequency(), 10);
        assert_eq!(root.leaf_count(), 4);
    }

    #[test]
    fn rebuild_is_deterministic() {
        let table = FrequencyTable::from_bytes(b"abcdefabcabaaaxyzxyz  \n\n");
        let a = HuffmanTree::from_frequencies(&table).unwrap();
        let b = HuffmanTree::from_frequencies(&table.clone()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn render_labels_edges() {
        let table = FrequencyTable::from_bytes(b"aab");
        let tree = HuffmanTree::from_frequencies(&table).unwrap();
        let dump = tree.render();
        assert_eq!(dump, "-> (*, 3)\n  |--(0)-> ('b', 1)\n  |--(1)-> ('a', 2)\n");
    }
}
