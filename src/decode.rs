use bitvec::prelude::*;
use log::debug;
use std::ptr;

use crate::error::{HuffmanError, Result};
use crate::tree::Node;
use crate::Symbol;

/// Lazily walks a tree along a bit string, yielding a symbol every time a
/// leaf is reached.
///
/// If the bits run out away from the root, the walk yields one
/// [`HuffmanError::TruncatedCode`] and then ends.
pub struct Walk<'a> {
    root: &'a Node,
    cursor: &'a Node,
    bits: &'a BitSlice<u8, Msb0>,
    pos: usize,
    dangling: usize,
    done: bool,
}

impl<'a> Walk<'a> {
    /// # Panics
    ///
    /// Panics if `tree` is not well formed.
    pub fn new(tree: &'a Node, bits: &'a BitSlice<u8, Msb0>) -> Self {
        assert!(
            tree.is_well_formed(),
            "decoding with a malformed huffman tree"
        );

        Self::unchecked(tree, bits)
    }

    /// A walk over a tree the caller has already checked.
    pub(crate) fn unchecked(tree: &'a Node, bits: &'a BitSlice<u8, Msb0>) -> Self {
        Self {
            root: tree,
            cursor: tree,
            bits,
            pos: 0,
            dangling: 0,
            done: false,
        }
    }
}

impl<'a> Iterator for Walk<'a> {
    type Item = Result<Symbol>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        while self.pos < self.bits.len() {
            let b = self.bits[self.pos];
            self.pos += 1;

            let (left, right) = match self.cursor.children() {
                Some(children) => children,
                None => panic!("cannot descend below a leaf"),
            };
            self.cursor = if b { right } else { left };
            self.dangling += 1;

            if let Some(s) = self.cursor.symbol() {
                self.cursor = self.root;
                self.dangling = 0;
                return Some(Ok(s));
            }
        }

        self.done = true;
        if ptr::eq(self.cursor, self.root) {
            None
        } else {
            Some(Err(HuffmanError::TruncatedCode {
                dangling: self.dangling,
            }))
        }
    }
}

/// Count the symbols `bits` decodes to without collecting them.
pub fn decoded_len(tree: &Node, bits: &BitSlice<u8, Msb0>) -> Result<usize> {
    Walk::new(tree, bits).try_fold(0, |n, s| s.map(|_| n + 1))
}

/// Recover the symbol sequence encoded in `bits`.
///
/// The bits must end exactly on a code boundary; otherwise nothing is
/// returned and the error is [`HuffmanError::TruncatedCode`].
///
/// # Panics
///
/// Panics if `tree` is not well formed, or if `tree` is a single leaf and
/// `bits` is not empty.
pub fn decode(tree: &Node, bits: &BitSlice<u8, Msb0>) -> Result<Vec<Symbol>> {
    let len = decoded_len(tree, bits)?;
    let mut out = Vec::with_capacity(len);
    for s in Walk::unchecked(tree, bits) {
        out.push(s?);
    }
    debug!("decoded {} bits into {} symbols", bits.len(), out.len());

    Ok(out)
}

/// [`decode`] for an ASCII bit string.
///
/// # Panics
///
/// Panics if `bits` holds anything other than `'0'` and `'1'`.
pub fn decode_ascii(tree: &Node, bits: &str) -> Result<Vec<Symbol>> {
    decode(tree, &crate::bits::from_ascii(bits))
}
