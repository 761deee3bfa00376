//! Codewords and code tables.

use std::fmt;
use std::ops::Index;
use dyn_size_of::GetSize;

use crate::SYMBOLS;

/// Codeword: sequence of bits that leads from the root of the Huffman tree to a leaf
/// (`0` for the left and `1` for the right child).
#[derive(PartialEq, Eq, Debug, Clone, Copy, Default, Hash)]
pub struct Code {
    /// Bits of the codeword. The lowest bit is the last one.
    pub bits: u128,
    /// Number of bits, at most [`Code::MAX_LEN`].
    pub len: u8
}

impl Code {
    /// Maximum length of a code. It is enough for any tree whose total frequency fits in `u64`.
    pub const MAX_LEN: u8 = u128::BITS as u8;

    /// Appends `bit` to the end of `self`.
    #[inline] pub fn push(&mut self, bit: bool) {
        debug_assert!(self.len < Self::MAX_LEN);
        self.bits = (self.bits << 1) | bit as u128;
        self.len += 1;
    }

    /// Returns whether `self` consists of zero bits.
    #[inline] pub fn is_empty(&self) -> bool { self.len == 0 }

    /// Returns iterator over the bits of `self`, from the first one.
    #[inline] pub fn iter(&self) -> impl ExactSizeIterator<Item = bool> {
        let bits = self.bits;
        (0..self.len).rev().map(move |i| (bits >> i) & 1 == 1)
    }

    /// Returns whether `self` is a (not necessarily proper) prefix of `other`.
    #[inline] pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && other.bits.checked_shr((other.len - self.len) as u32).unwrap_or(0) == self.bits
    }

    /// Returns bits of `self` moved to the most significant positions of `u128`.
    #[inline] fn aligned(&self) -> u128 {
        self.bits.checked_shl((Self::MAX_LEN - self.len) as u32).unwrap_or(0)
    }
}

impl fmt::Display for Code {
    /// Writes `self` as a sequence of `0` and `1` characters.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.iter().try_for_each(|b| f.write_str(if b { "1" } else { "0" }))
    }
}

impl GetSize for Code {}

/// Code table: maps each byte to its codeword. Bytes absent from the tree have empty codes.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Codebook {
    /// Codes indexed by bytes.
    codes: Box<[Code]>
}

impl Codebook {
    /// Constructs codebook from the codes of all 256 bytes.
    pub(crate) fn new(codes: Box<[Code]>) -> Self {
        debug_assert_eq!(codes.len(), SYMBOLS);
        Self { codes }
    }

    /// Returns the code of `byte`, empty if `byte` has no code.
    #[inline] pub fn get(&self, byte: u8) -> &Code { &self.codes[byte as usize] }

    /// Returns iterator over `(byte, code)` pairs with non-empty codes, in ascending order of bytes.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes.iter().enumerate().filter(|(_, c)| !c.is_empty()).map(|(b, c)| (b as u8, c))
    }

    /// Returns the length of the longest code.
    pub fn max_len(&self) -> u8 {
        self.codes.iter().map(|c| c.len).max().unwrap_or(0)
    }

    /// Returns whether no non-empty code is a prefix of another one (this also means that all codes are different).
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<_> = self.iter().map(|(_, c)| *c).collect();
        codes.sort_unstable_by_key(|c| (c.aligned(), c.len));
        // in lexicographic order, a prefix is directly followed by a code that extends it
        codes.windows(2).all(|w| !w[0].is_prefix_of(&w[1]))
    }
}

impl Index<u8> for Codebook {
    type Output = Code;

    #[inline] fn index(&self, byte: u8) -> &Code { self.get(byte) }
}

impl GetSize for Codebook {
    fn size_bytes_dyn(&self) -> usize { self.codes.size_bytes_dyn() }
    const USES_DYN_MEM: bool = true;
}
