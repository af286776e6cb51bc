use bitvec::prelude::*;
use log::debug;

use crate::tree::Node;
use crate::{Bits, Symbol, NUM_SYMBOLS};

/// The code of every leaf symbol of a tree, indexed by symbol.
///
/// A left branch contributes a `0` bit and a right branch a `1` bit. Because
/// codes are root-to-leaf paths, no code is a prefix of another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable {
    codes: Box<[Option<BitBox<u8, Msb0>>]>,
}

impl CodeTable {
    /// Walk `tree` depth first, recording each leaf's path.
    ///
    /// # Panics
    ///
    /// Panics if `tree` is not well formed.
    pub fn from_tree(tree: &Node) -> Self {
        fn traverse(node: &Node, path: &mut Bits, codes: &mut [Option<BitBox<u8, Msb0>>]) {
            match node {
                Node::Leaf { symbol, .. } => {
                    codes[*symbol as usize] = Some(path.clone().into_boxed_bitslice());
                }
                Node::Interior { left, right, .. } => {
                    path.push(false);
                    traverse(left, path, codes);
                    path.pop();

                    path.push(true);
                    traverse(right, path, codes);
                    path.pop();
                }
            }
        }

        assert!(
            tree.is_well_formed(),
            "code table requested for a malformed huffman tree"
        );

        let mut codes: Vec<Option<BitBox<u8, Msb0>>> = vec![None; NUM_SYMBOLS];
        let mut path = Bits::with_capacity(NUM_SYMBOLS);
        traverse(tree, &mut path, &mut codes);

        Self {
            codes: codes.into_boxed_slice(),
        }
    }

    /// The code for `s`, or `None` if `s` is not a leaf of the tree.
    pub fn get(&self, s: Symbol) -> Option<&BitSlice<u8, Msb0>> {
        self.codes[s as usize].as_deref()
    }

    /// Symbols that have a code, in increasing symbol order.
    pub fn symbols(&self) -> impl Iterator<Item = Symbol> + '_ {
        self.codes
            .iter()
            .enumerate()
            .filter(|(_, code)| code.is_some())
            .map(|(s, _)| s as Symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.iter().filter(|code| code.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn code(&self, s: Symbol) -> &BitSlice<u8, Msb0> {
        match self.get(s) {
            Some(code) => code,
            None => panic!("symbol {:#04x} has no code in this table", s),
        }
    }

    /// Number of bits `encode` produces for `src`.
    ///
    /// # Panics
    ///
    /// Panics if a symbol of `src` has no code.
    pub fn encoded_len(&self, src: &[Symbol]) -> usize {
        src.iter().map(|&s| self.code(s).len()).sum()
    }

    /// Concatenate the codes of `src` in order.
    ///
    /// # Panics
    ///
    /// Panics if a symbol of `src` has no code.
    pub fn encode(&self, src: &[Symbol]) -> Bits {
        let len = self.encoded_len(src);
        let mut out = Bits::with_capacity(len);
        for &s in src {
            out.extend_from_bitslice(self.code(s));
        }
        debug!("encoded {} symbols into {} bits", src.len(), len);

        out
    }
}
