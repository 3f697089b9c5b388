use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::code_table::CodeTable;
use crate::error::{Corruption, HuffError, Result};
use crate::node::Node;
use crate::tree::HuffmanTree;

/// Encode `data` with `codes` as `[padding][packed bits...]`.
///
/// `padding` is the number of meaningful bits in the final byte, 1 to 8,
/// with 8 standing for a fully used byte (and for an empty bitstream).
pub fn pack(data: &[u8], codes: &CodeTable) -> Result<Vec<u8>> {
    let mut packed = Vec::new();
    let mut bit_count: u64 = 0;
    {
        let mut writer = BitWriter::endian(&mut packed, BigEndian);
        for &byte in data {
            let code = codes.get(byte).ok_or(HuffError::UnknownSymbol(byte))?;
            for &bit in code.bits() {
                writer.write_bit(bit)?;
            }
            bit_count += code.len() as u64;
        }
        writer.byte_align()?;
    }

    let padding = match (bit_count % 8) as u8 {
        0 => 8,
        n => n,
    };

    let mut output = Vec::with_capacity(packed.len() + 1);
    output.push(padding);
    output.extend_from_slice(&packed);
    Ok(output)
}

/// Decode a packed payload against `tree`, expecting exactly `expected_len`
/// symbols.
pub fn unpack(payload: &[u8], tree: &HuffmanTree, expected_len: u64) -> Result<Vec<u8>> {
    let (&padding, data) = payload.split_first().ok_or(Corruption::MissingPadding)?;
    if !(1..=8).contains(&padding) {
        return Err(Corruption::InvalidPadding(padding).into());
    }

    let total_bits = match data.len() {
        0 => 0,
        n => (n - 1) * 8 + padding as usize,
    };

    // Each symbol takes at least one bit, so the payload bounds the output.
    let capacity = expected_len.min(total_bits as u64) as usize;
    let mut output = Vec::with_capacity(capacity);
    let mut reader = BitReader::endian(Cursor::new(data), BigEndian);

    match &tree.root {
        None => {
            if total_bits > 0 {
                return Err(Corruption::InvalidPath {
                    bit: reader.read_bit()?,
                    offset: 0,
                }
                .into());
            }
        }
        Some(Node::Leaf { symbol, .. }) => {
            for offset in 0..total_bits {
                let bit = reader.read_bit()?;
                if bit {
                    return Err(Corruption::InvalidPath { bit, offset }.into());
                }
                output.push(*symbol);
            }
        }
        Some(root) => {
            let mut current = root;
            let mut mid_path = false;
            for offset in 0..total_bits {
                let bit = reader.read_bit()?;
                let next: &Node = match current {
                    Node::Internal { left, right, .. } => {
                        if bit {
                            right.as_ref()
                        } else {
                            left.as_ref()
                        }
                    }
                    Node::Leaf { .. } => {
                        return Err(Corruption::InvalidPath { bit, offset }.into());
                    }
                };
                if let Node::Leaf { symbol, .. } = next {
                    output.push(*symbol);
                    current = root;
                    mid_path = false;
                } else {
                    current = next;
                    mid_path = true;
                }
            }
            if mid_path {
                return Err(Corruption::TruncatedCode.into());
            }
        }
    }

    if !data.is_empty() {
        for _ in padding..8 {
            if reader.read_bit()? {
                return Err(Corruption::NonZeroPadding.into());
            }
        }
    }

    if output.len() as u64 != expected_len {
        return Err(Corruption::LengthMismatch {
            expected: expected_len,
            actual: output.len() as u64,
        }
        .into());
    }
    Ok(output)
}
