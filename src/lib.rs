//! Huffman coding over bytes.
//!
//! Count symbol frequencies, build the prefix-code tree, derive each symbol's
//! code, encode and decode bit strings, and pack them into bytes:
//!
//! ```
//! use huffcode::{huffman, decode, CodeTable};
//!
//! let s = "Hello my name is Sam!";
//! let tree = huffman(s.as_bytes()).unwrap();
//! let codes = CodeTable::from_tree(&tree);
//!
//! let out = codes.encode(s.as_bytes());
//! let dec = decode(&tree, &out).unwrap();
//!
//! assert_eq!(dec, s.as_bytes());
//! ```

use bitvec::prelude::*;

pub mod archive;
pub mod bits;
pub mod code;
pub mod decode;
pub mod error;
pub mod freq;
pub mod tree;

pub use archive::Archive;
pub use code::CodeTable;
pub use decode::{decode, decoded_len, Walk};
pub use error::{HuffmanError, Result};
pub use freq::FrequencyTable;
pub use tree::Node;

/// A symbol is one byte; it is also the index into per-symbol tables.
pub type Symbol = u8;

/// Size of the symbol alphabet.
pub const NUM_SYMBOLS: usize = 256;

pub type Frequency = u64;

/// In-memory bit string, first bit in the most significant position.
pub type Bits = BitVec<u8, Msb0>;

/// Build the Huffman tree for the symbols of `symbols`.
pub fn huffman(symbols: &[Symbol]) -> Result<Node> {
    Node::from_frequencies(&FrequencyTable::from_symbols(symbols.iter().copied()))
}
