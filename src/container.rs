use std::io::Cursor;

use bincode::Options;
use tracing::debug;

use crate::bits;
use crate::code_table::CodeTable;
use crate::error::{Corruption, Result};
use crate::frequency::{ALPHABET_SIZE, FrequencyTable};
use crate::observer::{NoopObserver, Observer};
use crate::tree::HuffmanTree;

/// Encoded size of the frequency header: a u64 length prefix followed by
/// 256 little-endian u64 counts.
pub const HEADER_LEN: usize = 8 + ALPHABET_SIZE * 8;

fn header_options() -> impl Options {
    bincode::options()
        .with_fixint_encoding()
        .with_little_endian()
        .with_limit(HEADER_LEN as u64)
}

/// A parsed compressed stream: frequency header plus packed payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub frequencies: FrequencyTable,
    /// Padding-count byte followed by the packed bitstream.
    pub payload: Vec<u8>,
}

impl Container {
    pub fn encode(&self) -> Result<Vec<u8>> {
        let header = header_options().serialize(self.frequencies.counts())?;
        debug_assert_eq!(header.len(), HEADER_LEN);

        let mut output = Vec::with_capacity(header.len() + self.payload.len());
        output.extend_from_slice(&header);
        output.extend_from_slice(&self.payload);
        Ok(output)
    }

    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = Cursor::new(data);
        let counts: Vec<u64> = header_options()
            .deserialize_from(&mut reader)
            .map_err(|e| Corruption::Header(e.to_string()))?;
        let frequencies = FrequencyTable::from_counts(counts)?;

        let offset = reader.position() as usize;
        Ok(Self {
            frequencies,
            payload: data[offset..].to_vec(),
        })
    }

    /// Length of the original input, as declared by the header.
    pub fn original_len(&self) -> u64 {
        self.frequencies.total()
    }
}

pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    compress_with(data, &mut NoopObserver)
}

pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    decompress_with(data, &mut NoopObserver)
}

pub fn compress_with(data: &[u8], observer: &mut dyn Observer) -> Result<Vec<u8>> {
    let frequencies = FrequencyTable::from_bytes(data);
    observer.frequencies(&frequencies);

    let queue = HuffmanTree::initial_queue(&frequencies);
    observer.queue(&queue);

    let tree = HuffmanTree::build(queue)?;
    observer.tree(&tree);

    let codes = CodeTable::generate(&tree);
    observer.codes(&codes, &frequencies);

    let payload_bits = codes.weighted_length(&frequencies);
    let payload = bits::pack(data, &codes)?;
    let encoded = Container {
        frequencies,
        payload,
    }
    .encode()?;
    observer.payload(payload_bits, encoded.len());

    debug!(
        input = data.len(),
        output = encoded.len(),
        payload_bits,
        "compressed"
    );
    Ok(encoded)
}

pub fn decompress_with(data: &[u8], observer: &mut dyn Observer) -> Result<Vec<u8>> {
    let container = Container::parse(data)?;
    let expected = container.original_len();

    let tree = HuffmanTree::from_frequencies(&container.frequencies)?;
    observer.rebuilt_tree(&tree);

    let output = bits::unpack(&container.payload, &tree, expected)?;
    debug!(input = data.len(), output = output.len(), "decompressed");
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HuffError;

    #[test]
    fn example_round_trip() {
        let compressed = compress(b"AAAABBBCCD").unwrap();
        // A=0 B=10 D=110 C=111 gives 19 bits in 3 bytes.
        assert_eq!(compressed.len(), HEADER_LEN + 1 + 3);
        assert_eq!(compressed[HEADER_LEN], 3);
        assert_eq!(decompress(&compressed).unwrap(), b"AAAABBBCCD");
    }

    #[test]
    fn empty_input_layout() {
        let compressed = compress(&[]).unwrap();
        assert_eq!(compressed.len(), HEADER_LEN + 1);
        assert_eq!(compressed[HEADER_LEN], 8);

        let container = Container::parse(&compressed).unwrap();
        assert_eq!(container.frequencies, FrequencyTable::default());
        assert_eq!(container.original_len(), 0);
        assert!(decompress(&compressed).unwrap().is_empty());
    }

    #[test]
    fn bare_empty_header_is_malformed() {
        let compressed = compress(&[]).unwrap();
        assert!(matches!(
            decompress(&compressed[..HEADER_LEN]),
            Err(HuffError::MalformedContainer(Corruption::MissingPadding))
        ));
    }

    #[test]
    fn header_is_fixed_width_little_endian() {
        let compressed = compress(b"AB").unwrap();
        assert_eq!(&compressed[..8], &256u64.to_le_bytes());
        let a = 8 + 8 * b'A' as usize;
        assert_eq!(&compressed[a..a + 8], &1u64.to_le_bytes());
    }

    #[test]
    fn truncated_header_is_malformed() {
        let compressed = compress(b"hello").unwrap();
        for len in [0, 7, 100, HEADER_LEN - 1] {
            let err = decompress(&compressed[..len]).unwrap_err();
            assert!(matches!(
                err,
                HuffError::MalformedContainer(Corruption::Header(_))
            ));
        }
    }

    #[test]
    fn wrong_entry_count_is_malformed() {
        let mut data = 255u64.to_le_bytes().to_vec();
        data.extend(std::iter::repeat(0u8).take(255 * 8));
        data.push(8);
        let err = decompress(&data).unwrap_err();
        assert!(matches!(
            err,
            HuffError::MalformedContainer(Corruption::HeaderLength(255))
        ));
    }

    #[test]
    fn truncated_payload_is_malformed() {
        let compressed = compress(&[0x41; 1000]).unwrap();
        let err = decompress(&compressed[..compressed.len() - 1]).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn observer_sees_every_stage() {
        #[derive(Default)]
        struct Recorder(Vec<&'static str>);
        impl Observer for Recorder {
            fn frequencies(&mut self, _: &FrequencyTable) {
                self.0.push("frequencies");
            }
            fn queue(&mut self, queue: &crate::min_heap::MinHeap) {
                assert!(queue.is_valid_heap());
                self.0.push("queue");
            }
            fn tree(&mut self, _: &HuffmanTree) {
                self.0.push("tree");
            }
            fn codes(&mut self, codes: &CodeTable, _: &FrequencyTable) {
                assert!(codes.is_prefix_free());
                self.0.push("codes");
            }
            fn payload(&mut self, bits: u64, _: usize) {
                assert_eq!(bits, 19);
                self.0.push("payload");
            }
            fn rebuilt_tree(&mut self, _: &HuffmanTree) {
                self.0.push("rebuilt");
            }
        }

        let mut recorder = Recorder::default();
        let compressed = compress_with(b"AAAABBBCCD", &mut recorder).unwrap();
        decompress_with(&compressed, &mut recorder).unwrap();
        assert_eq!(
            recorder.0,
            vec!["frequencies", "queue", "tree", "codes", "payload", "rebuilt"]
        );
    }
}
