use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::bits::{pack_bits, unpack_bits};
use crate::code::CodeTable;
use crate::decode::decode;
use crate::error::{HuffmanError, Result};
use crate::freq::FrequencyTable;
use crate::tree::Node;
use crate::Frequency;

/// Packed Huffman output together with what a reader needs to decode it.
///
/// Packed bytes do not record how many of their bits are padding, and the
/// tree is rebuilt from the frequency table, so both travel with the data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archive {
    frequencies: FrequencyTable,
    bit_len: usize,
    data: Vec<u8>,
}

impl Archive {
    pub fn compress(input: &[u8]) -> Result<Self> {
        let frequencies = FrequencyTable::from_symbols(input.iter().copied());
        let tree = Node::from_frequencies(&frequencies)?;
        debug!("tree depth {} over {} leaves", tree.depth(), tree.leaf_count());

        let bits = CodeTable::from_tree(&tree).encode(input);
        let data = pack_bits(&bits);
        info!("compressed {} bytes into {} bytes", input.len(), data.len());

        Ok(Self {
            frequencies,
            bit_len: bits.len(),
            data,
        })
    }

    pub fn decompress(&self) -> Result<Vec<u8>> {
        if self.data.len() != self.bit_len.div_ceil(8) {
            return Err(HuffmanError::LengthMismatch {
                bit_len: self.bit_len,
                bytes: self.data.len(),
            });
        }

        let tree = Node::from_frequencies(&self.frequencies)?;
        let mut bits = unpack_bits(&self.data);
        bits.truncate(self.bit_len);

        let out = decode(&tree, &bits)?;
        let expected = self.frequencies.total();
        if out.len() as Frequency != expected {
            return Err(HuffmanError::SymbolCount {
                expected,
                actual: out.len() as Frequency,
            });
        }
        info!("decompressed {} bytes into {} bytes", self.data.len(), out.len());

        Ok(out)
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    /// Number of meaningful bits in [`Archive::data`].
    pub fn bit_len(&self) -> usize {
        self.bit_len
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
}
