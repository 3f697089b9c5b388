use tracing::debug;

use crate::code_table::CodeTable;
use crate::frequency::FrequencyTable;
use crate::min_heap::MinHeap;
use crate::tree::HuffmanTree;

/// Receives the intermediate structures of a compress or decompress call.
///
/// Every hook defaults to doing nothing.
pub trait Observer {
    fn frequencies(&mut self, _frequencies: &FrequencyTable) {}

    /// The queue right after the leaves are inserted, before any merge.
    fn queue(&mut self, _queue: &MinHeap) {}

    fn tree(&mut self, _tree: &HuffmanTree) {}

    fn codes(&mut self, _codes: &CodeTable, _frequencies: &FrequencyTable) {}

    fn payload(&mut self, _payload_bits: u64, _container_len: usize) {}

    /// Tree rebuilt from the header of a container being decompressed.
    fn rebuilt_tree(&mut self, _tree: &HuffmanTree) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl Observer for NoopObserver {}

/// Reports each stage as a `tracing` debug event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn frequencies(&mut self, frequencies: &FrequencyTable) {
        debug!(
            total = frequencies.total(),
            distinct = frequencies.distinct(),
            "frequency table"
        );
    }

    fn queue(&mut self, queue: &MinHeap) {
        let weights: Vec<u64> = queue.iter().map(|n| n.frequency()).collect();
        debug!(len = queue.len(), ?weights, "initial queue");
    }

    fn tree(&mut self, tree: &HuffmanTree) {
        if let Some(root) = &tree.root {
            debug!(depth = root.depth(), leaves = root.leaf_count(), "tree");
        }
    }

    fn codes(&mut self, codes: &CodeTable, frequencies: &FrequencyTable) {
        debug!(
            symbols = codes.len(),
            bits = codes.weighted_length(frequencies),
            "code table"
        );
    }

    fn payload(&mut self, payload_bits: u64, container_len: usize) {
        debug!(payload_bits, container_len, "container written");
    }

    fn rebuilt_tree(&mut self, tree: &HuffmanTree) {
        if let Some(root) = &tree.root {
            debug!(depth = root.depth(), weight = root.frequency(), "rebuilt tree");
        }
    }
}
