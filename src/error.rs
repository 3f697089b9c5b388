use std::io;

use thiserror::Error;

/// Structural problems found while parsing a compressed container.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Corruption {
    #[error("frequency header is unreadable: {0}")]
    Header(String),

    #[error("frequency header has {0} entries, expected 256")]
    HeaderLength(usize),

    #[error("frequency header total overflows a 64-bit count")]
    FrequencyOverflow,

    #[error("payload is missing its padding-count byte")]
    MissingPadding,

    #[error("padding-count byte is {0}, expected 1 to 8")]
    InvalidPadding(u8),

    #[error("unused bits of the final payload byte are not zero")]
    NonZeroPadding,

    #[error("bitstream ends in the middle of a code")]
    TruncatedCode,

    #[error("decoded {actual} bytes but the header declares {expected}")]
    LengthMismatch { expected: u64, actual: u64 },

    #[error("bit {bit} at offset {offset} has no path in the tree")]
    InvalidPath { bit: bool, offset: usize },
}

#[derive(Error, Debug)]
pub enum HuffError {
    /// Extraction from an empty priority queue. Only reachable through a
    /// sequencing bug in the caller.
    #[error("extract_min called on an empty priority queue")]
    EmptyQueue,

    #[error("malformed container: {0}")]
    MalformedContainer(#[from] Corruption),

    /// A byte had no code. The code table is built from the same input, so
    /// this is an invariant breach rather than bad data.
    #[error("no code assigned to byte {0:#04x}")]
    UnknownSymbol(u8),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("header serialization failed: {0}")]
    Encode(#[from] bincode::Error),
}

impl HuffError {
    pub fn is_malformed(&self) -> bool {
        matches!(self, HuffError::MalformedContainer(_))
    }
}

pub type Result<T> = std::result::Result<T, HuffError>;
