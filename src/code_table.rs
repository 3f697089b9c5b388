use std::collections::BTreeMap;
use std::fmt;

use crate::frequency::FrequencyTable;
use crate::node::Node;
use crate::tree::HuffmanTree;

/// Prefix code for one symbol, most significant bit first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Code(Vec<bool>);

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn starts_with(&self, other: &Code) -> bool {
        self.0.starts_with(&other.0)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.0 {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to code mapping derived from a tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    pub fn generate(tree: &HuffmanTree) -> Self {
        let mut codes = BTreeMap::new();
        if let Some(root) = &tree.root {
            build_codes_recursive(root, Vec::new(), &mut codes);
        }
        Self { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> {
        self.codes.iter().map(|(&s, c)| (s, c))
    }

    /// No code is a prefix of a different code.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<&Code> = self.codes.values().collect();
        codes.iter().enumerate().all(|(i, a)| {
            codes
                .iter()
                .enumerate()
                .all(|(j, b)| i == j || !b.starts_with(a))
        })
    }

    /// Total number of payload bits for an input with these frequencies.
    pub fn weighted_length(&self, frequencies: &FrequencyTable) -> u64 {
        self.iter()
            .map(|(symbol, code)| frequencies.get(symbol) * code.len() as u64)
            .sum()
    }
}

fn build_codes_recursive(node: &Node, prefix: Vec<bool>, codes: &mut BTreeMap<u8, Code>) {
    match node {
        Node::Leaf { symbol, .. } => {
            // A lone root leaf still needs one bit per occurrence.
            let bits = if prefix.is_empty() { vec![false] } else { prefix };
            codes.insert(*symbol, Code(bits));
        }
        Node::Internal { left, right, .. } => {
            let mut left_prefix = prefix.clone();
            left_prefix.push(false);
            build_codes_recursive(left, left_prefix, codes);

            let mut right_prefix = prefix;
            right_prefix.push(true);
            build_codes_recursive(right, right_prefix, codes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_for(data: &[u8]) -> (FrequencyTable, CodeTable) {
        let freqs = FrequencyTable::from_bytes(data);
        let tree = HuffmanTree::from_frequencies(&freqs).unwrap();
        (freqs, CodeTable::generate(&tree))
    }

    #[test]
    fn example_code_lengths() {
        let (freqs, codes) = table_for(b"AAAABBBCCD");
        let lengths: Vec<usize> = [b'A', b'B', b'C', b'D']
            .iter()
            .map(|&s| codes.get(s).unwrap().len())
            .collect();
        assert_eq!(lengths, vec![1, 2, 3, 3]);
        assert_eq!(codes.weighted_length(&freqs), 19);
        assert!(codes.is_prefix_free());
    }

    #[test]
    fn single_symbol_gets_one_bit() {
        let (freqs, codes) = table_for(&[0x41; 1000]);
        assert_eq!(codes.len(), 1);
        assert_eq!(codes.get(0x41).unwrap().to_string(), "0");
        assert_eq!(codes.weighted_length(&freqs), 1000);
    }

    #[test]
    fn empty_tree_has_no_codes() {
        let codes = CodeTable::generate(&HuffmanTree::default());
        assert!(codes.is_empty());
        assert!(codes.is_prefix_free());
    }

    #[test]
    fn left_is_zero_right_is_one() {
        let (_, codes) = table_for(b"aab");
        assert_eq!(codes.get(b'b').unwrap().to_string(), "0");
        assert_eq!(codes.get(b'a').unwrap().to_string(), "1");
    }

    #[test]
    fn detects_prefix_violation() {
        let mut codes = BTreeMap::new();
        codes.insert(1, Code(vec![false]));
        codes.insert(2, Code(vec![false, true]));
        assert!(!CodeTable { codes }.is_prefix_free());
    }
}
