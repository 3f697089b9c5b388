use huffpack::node::printable;
use huffpack::{CodeTable, FrequencyTable, HuffmanTree, MinHeap, Observer};

/// Prints each compression stage to stdout.
#[derive(Debug, Default)]
pub struct ConsoleObserver;

impl Observer for ConsoleObserver {
    fn frequencies(&mut self, frequencies: &FrequencyTable) {
        println!("STAGE 1: Byte frequency table");
        for (symbol, count) in frequencies.present() {
            println!("Byte {} ({symbol}): {count}", printable(symbol));
        }
    }

    fn queue(&mut self, queue: &MinHeap) {
        println!("\nSTAGE 2: Initial min-heap (array order)");
        let entries: Vec<String> = queue.iter().map(ToString::to_string).collect();
        println!("[{}]", entries.join(", "));
    }

    fn tree(&mut self, tree: &HuffmanTree) {
        println!("\nSTAGE 3: Huffman tree");
        print!("{}", tree.render());
    }

    fn codes(&mut self, codes: &CodeTable, _frequencies: &FrequencyTable) {
        println!("\nSTAGE 4: Huffman code table");
        for (symbol, code) in codes.iter() {
            println!("Byte {}: {code}", printable(symbol));
        }
    }
}
