//! # huffpack
//!
//! Whole-buffer Huffman compression with a self-describing container.
//!
//! ```rust
//! let packed = huffpack::compress(b"AAAABBBCCD")?;
//! assert_eq!(huffpack::decompress(&packed)?, b"AAAABBBCCD");
//! # Ok::<(), huffpack::HuffError>(())
//! ```
//!
//! A container is a frequency header (256 counts) followed by a payload whose
//! first byte records how many bits of the final byte are meaningful. The
//! decoder rebuilds the tree from the header, so leaves are always queued in
//! ascending symbol order and equal weights leave the queue first-in first-out.

pub mod bits;
pub mod code_table;
pub mod container;
pub mod error;
pub mod frequency;
pub mod min_heap;
pub mod node;
pub mod observer;
pub mod tree;

pub use code_table::{Code, CodeTable};
pub use container::{Container, compress, compress_with, decompress, decompress_with};
pub use error::{Corruption, HuffError};
pub use frequency::FrequencyTable;
pub use min_heap::MinHeap;
pub use node::Node;
pub use observer::{NoopObserver, Observer, TracingObserver};
pub use tree::HuffmanTree;
